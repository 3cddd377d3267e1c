//! Closed set of actions a turn can end in, and the canned-reply responder.

use humanity_core::{EmotionKind, ReplyIntent};
use serde::Serialize;

const STATUS_COMMAND: &str = "/status";
const RESET_COMMAND: &str = "/reset";

pub const RESET_REPLY: &str = "Память очищена. Начинаем заново!";

/// Commands handled during perception, before the utterance reaches memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlCommand {
    Status,
    Reset,
}

impl ControlCommand {
    /// Recognised by prefix, case-insensitive.
    pub fn parse(text: &str) -> Option<ControlCommand> {
        let lowered = text.trim_start().to_lowercase();
        if lowered.starts_with(STATUS_COMMAND) {
            Some(ControlCommand::Status)
        } else if lowered.starts_with(RESET_COMMAND) {
            Some(ControlCommand::Reset)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ControlCommand::Status => "status",
            ControlCommand::Reset => "reset",
        }
    }
}

impl From<ControlCommand> for Action {
    fn from(command: ControlCommand) -> Self {
        match command {
            ControlCommand::Status => Action::Status,
            ControlCommand::Reset => Action::Reset,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Report the current state.
    Status,
    /// Clear working and episodic memory.
    Reset,
    /// Ask the generation backend.
    Generate,
    /// Canned reply, no backend.
    Fallback,
}

impl Action {
    pub fn control(text: &str) -> Option<Action> {
        ControlCommand::parse(text).map(Action::from)
    }

    /// Fixed precedence: `/status`, `/reset`, then generate if a backend exists.
    pub fn select(text: &str, has_backend: bool) -> Action {
        match Action::control(text) {
            Some(action) => action,
            None if has_backend => Action::Generate,
            None => Action::Fallback,
        }
    }

    pub fn is_control(&self) -> bool {
        matches!(self, Action::Status | Action::Reset)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Status => "status",
            Action::Reset => "reset",
            Action::Generate => "generate",
            Action::Fallback => "fallback",
        }
    }
}

/// Reply used when no generation backend is configured.
pub fn fallback_reply(intent: ReplyIntent, feeling: EmotionKind) -> String {
    match intent {
        ReplyIntent::Greeting => "Привет! Рад тебя видеть! 😊".to_string(),
        ReplyIntent::SmallTalk => format!(
            "У меня всё хорошо! Чувствую {}. А у тебя как?",
            feeling.label()
        ),
        ReplyIntent::Question => "Интересный вопрос! Дай подумать...".to_string(),
        ReplyIntent::Other => "Понял тебя! Что-нибудь ещё?".to_string(),
    }
}
