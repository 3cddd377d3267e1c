//! The per-turn cognitive cycle.
//!
//! Every accepted turn runs the same ordered stages:
//!
//! 1. perceive (input safety check, control-command detection)
//! 2. working-memory update
//! 3. attention
//! 4. retrieval
//! 5. emotion update
//! 6. goal check (inert hook)
//! 7. action selection
//! 8. action execution, followed by the output safety check
//! 9. learning
//! 10. cleanup (affect decay)
//!
//! `/status` and `/reset` are recognised during perception and skip stages
//! 2 through 6 and 9; they still count as cycles and still decay the mood.
//!
//! One instance serves one conversation. `run_cycle` takes `&mut self`, so a
//! host sharing an instance has to serialize turns itself.

use crate::action::{fallback_reply, Action, ControlCommand, RESET_REPLY};
use crate::llm::{CompletionParams, LlmClient};
use crate::prompts;
use crate::providers::build_backend;
use anyhow::Result;
use humanity_core::{
    EmotionKind, HumanityConfig, IntentClassifier, KeywordClassifier, Pad, SafetyGate,
    SafetyMode, SkillLedger, Turn,
};
use humanity_limbic::{AffectModel, SensorReading, SENSOR_BLEND_WEIGHT};
use humanity_memory::{Episode, EpisodicMemory};
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

/// Why a generation attempt produced no usable reply.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("generation timed out after {0:?}")]
    Timeout(Duration),
    #[error("{0:#}")]
    Backend(anyhow::Error),
    #[error("backend returned an empty completion")]
    EmptyCompletion,
}

impl GenerationError {
    /// How the failure is shown to the user in place of a reply.
    pub fn render(&self) -> String {
        format!("Ошибка API: {}", self)
    }
}

/// Snapshot of the cycle for status displays.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CycleState {
    pub cycle_count: u64,
    pub dominant_emotion: EmotionKind,
    pub confidence: f32,
    pub mood_label: &'static str,
    pub pad: Pad,
    pub aggregate_skill_level: u32,
    pub safety_mode: SafetyMode,
}

impl CycleState {
    /// One-line human-readable summary, used as the `/status` reply.
    pub fn summary(&self) -> String {
        format!(
            "Цикл: {}, эмоция: {} ({}), настроение: {}",
            self.cycle_count,
            self.dominant_emotion.label(),
            prompts::percent(self.confidence),
            self.mood_label
        )
    }
}

/// How far an utterance got through the cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnKind {
    /// Blocked by the input check. Only the violation counter changed.
    Rejected,
    /// A control command; working memory was not touched by the utterance.
    Control(ControlCommand),
    /// An ordinary utterance. `remembered` is false when the reply stayed out
    /// of working memory (generation failed or the reply was withheld).
    Dialogue { remembered: bool },
}

/// Reply text plus how it was produced, for hosts that persist turns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReply {
    pub text: String,
    pub kind: TurnKind,
}

pub struct CognitiveCycle {
    affect: AffectModel,
    skills: SkillLedger,
    safety: SafetyGate,
    memory: EpisodicMemory,
    classifier: Box<dyn IntentClassifier>,
    backend: Option<Box<dyn LlmClient>>,
    params: CompletionParams,
    timeout: Duration,
    cycle_count: u64,
}

impl CognitiveCycle {
    /// A cycle without a generation backend; replies come from the canned responder.
    pub fn new(config: &HumanityConfig) -> Self {
        Self {
            affect: AffectModel::new(),
            skills: SkillLedger::new(),
            safety: SafetyGate::new(config.safety.mode),
            memory: EpisodicMemory::new(),
            classifier: Box::new(KeywordClassifier),
            backend: None,
            params: CompletionParams::from(&config.llm),
            timeout: Duration::from_secs(config.llm.timeout_secs.max(1)),
            cycle_count: 0,
        }
    }

    /// A cycle with whatever backend `config.llm` describes.
    pub fn from_config(config: &HumanityConfig) -> Result<Self> {
        let mut cycle = Self::new(config);
        cycle.backend = build_backend(&config.llm)?;
        Ok(cycle)
    }

    pub fn with_backend(mut self, backend: Box<dyn LlmClient>) -> Self {
        self.backend = Some(backend);
        self
    }

    pub fn with_classifier(mut self, classifier: Box<dyn IntentClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Process one utterance and return the reply. Never fails: rejections and
    /// backend errors come back as reply text.
    pub async fn run_cycle(&mut self, input: &str) -> String {
        self.respond(input).await.text
    }

    /// Same as [`run_cycle`](Self::run_cycle), also reporting which path the
    /// utterance took.
    #[tracing::instrument(skip(self, input), fields(cycle = self.cycle_count + 1))]
    pub async fn respond(&mut self, input: &str) -> CycleReply {
        // 1. Perceive
        if let Err(rejection) = self.safety.check_input(input) {
            return CycleReply {
                text: format!("⚠️ {}", rejection),
                kind: TurnKind::Rejected,
            };
        }
        self.cycle_count += 1;

        let reply = match ControlCommand::parse(input) {
            Some(command) => {
                tracing::debug!("Control command: {}", command.as_str());
                let text = self.execute_control(command);
                CycleReply {
                    text: self.screen_output(text).unwrap_or_else(|withheld| withheld),
                    kind: TurnKind::Control(command),
                }
            }
            None => self.run_turn(input).await,
        };

        // 10. Cleanup
        self.affect.decay();
        reply
    }

    /// Stages 2 through 9 for an ordinary utterance.
    async fn run_turn(&mut self, input: &str) -> CycleReply {
        // 2. Working memory
        self.memory.remember_turn(Turn::user(input));

        // 3. Attention
        let context = self.memory.attention();

        // 4. Retrieval
        let retrieved = self.memory.retrieve();

        // 5. Emotion
        if let Some(cue) = self.classifier.stimulus(input) {
            self.affect.apply_stimulus(cue.emotion, cue.intensity);
        }

        // 6. Goals
        self.check_goals(&context, &retrieved);

        // 7. Action selection
        let action = Action::select(input, self.backend.is_some());
        tracing::debug!("Selected action: {}", action.as_str());

        // 8. Execution
        self.exercise_skills(input);
        let (reply, generation_failed) =
            match self.generate_or_fallback(input, action, &context).await {
                Ok(text) => (text, false),
                Err(e) => {
                    tracing::warn!("Generation failed: {}", e);
                    (e.render(), true)
                }
            };
        let (reply, withheld) = match self.screen_output(reply) {
            Ok(text) => (text, false),
            Err(withheld) => (withheld, true),
        };

        // 9. Learning
        self.memory.record_episode(
            Episode::new(input, reply.clone(), context, &retrieved).failed(generation_failed),
        );
        let remembered = !generation_failed && !withheld;
        if remembered {
            self.memory.remember_turn(Turn::assistant(reply.clone()));
        }

        CycleReply {
            text: reply,
            kind: TurnKind::Dialogue { remembered },
        }
    }

    /// Extension point for goal tracking; no goals are tracked yet.
    fn check_goals(&self, _context: &[Turn], _retrieved: &[Episode]) {}

    fn execute_control(&mut self, command: ControlCommand) -> String {
        match command {
            ControlCommand::Status => self.get_state().summary(),
            ControlCommand::Reset => {
                self.memory.reset();
                RESET_REPLY.to_string()
            }
        }
    }

    fn exercise_skills(&mut self, input: &str) {
        for skill in self.classifier.skill_cues(input) {
            self.skills.use_skill(&skill, true);
        }
    }

    async fn generate_or_fallback(
        &self,
        input: &str,
        action: Action,
        context: &[Turn],
    ) -> Result<String, GenerationError> {
        let backend = match (action, self.backend.as_deref()) {
            (Action::Generate, Some(backend)) => backend,
            _ => {
                let feeling = self.affect.dominant_emotion().emotion;
                return Ok(fallback_reply(self.classifier.reply_intent(input), feeling));
            }
        };

        let system = prompts::system_preamble(&self.affect.dominant_emotion());
        let call = backend.complete(&system, context.to_vec(), self.params.clone());
        let completion = match tokio::time::timeout(self.timeout, call).await {
            Err(_) => return Err(GenerationError::Timeout(self.timeout)),
            Ok(Err(e)) => return Err(GenerationError::Backend(e)),
            Ok(Ok(completion)) => completion,
        };

        let text = completion.text.trim();
        if text.is_empty() {
            return Err(GenerationError::EmptyCompletion);
        }
        Ok(text.to_string())
    }

    /// `Err` carries the notice shown instead of a withheld reply.
    fn screen_output(&self, reply: String) -> Result<String, String> {
        match self.safety.check_output(&reply) {
            Ok(()) => Ok(reply),
            Err(rejection) => {
                tracing::warn!("Reply withheld: {}", rejection);
                Err(format!("⚠️ {}", rejection))
            }
        }
    }

    /// Clear working and episodic memory.
    pub fn reset(&mut self) {
        self.memory.reset();
    }

    pub fn get_state(&self) -> CycleState {
        let reading = self.affect.dominant_emotion();
        CycleState {
            cycle_count: self.cycle_count,
            dominant_emotion: reading.emotion,
            confidence: reading.confidence,
            mood_label: self.affect.mood_description(),
            pad: self.affect.state(),
            aggregate_skill_level: self.skills.total_level(),
            safety_mode: self.safety.mode(),
        }
    }

    /// Replace working memory with prior turns, e.g. from a stored conversation.
    pub fn seed_working_memory(&mut self, turns: Vec<Turn>) {
        self.memory.seed(turns);
    }

    /// Blend an external affect reading into the mood. Unreliable readings are
    /// ignored; returns whether the reading was applied.
    pub fn absorb_external_affect(&mut self, reading: SensorReading) -> bool {
        if !reading.is_reliable() {
            tracing::debug!(
                "Ignoring sensor reading {:?} at confidence {:.2}",
                reading.emotion,
                reading.confidence
            );
            return false;
        }
        self.affect
            .blend_signal(reading.emotion.pad(), SENSOR_BLEND_WEIGHT);
        true
    }

    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }

    pub fn has_backend(&self) -> bool {
        self.backend.is_some()
    }

    pub fn affect(&self) -> &AffectModel {
        &self.affect
    }

    pub fn skills(&self) -> &SkillLedger {
        &self.skills
    }

    pub fn memory(&self) -> &EpisodicMemory {
        &self.memory
    }

    pub fn safety(&self) -> &SafetyGate {
        &self.safety
    }
}
