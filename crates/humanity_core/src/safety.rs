use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use thiserror::Error;

/// Replies longer than this are rejected in strict mode.
pub const STRICT_OUTPUT_LIMIT: usize = 5000;

// ============================================================================
// Blocked topics
// ============================================================================

struct BlockedTopic {
    category: &'static str,
    pattern: Regex,
}

static BLOCKED_TOPICS: LazyLock<Vec<BlockedTopic>> = LazyLock::new(|| {
    [
        ("hacking", r"(?i)(взлом|хакер|ddos|exploit)"),
        ("violence", r"(?i)(убить|насилие)"),
        ("weapons", r"(?i)(бомб|оруж)"),
        ("drugs", r"(?i)(нарко|наркотик|героин|кокаин)"),
    ]
    .into_iter()
    .map(|(category, pattern)| BlockedTopic {
        category,
        pattern: Regex::new(pattern).expect("blocked topic pattern is valid"),
    })
    .collect()
});

// ============================================================================
// Types
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SafetyMode {
    Strict,
    #[default]
    Normal,
    Permissive,
}

impl SafetyMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SafetyMode::Strict => "strict",
            SafetyMode::Normal => "normal",
            SafetyMode::Permissive => "permissive",
        }
    }

    pub fn parse_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "strict" => Some(SafetyMode::Strict),
            "normal" => Some(SafetyMode::Normal),
            "permissive" => Some(SafetyMode::Permissive),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct SafetyRejection {
    pub reason: String,
    /// Blocked-topic category for input rejections, `None` for output checks.
    pub category: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SafetyStatus {
    pub mode: SafetyMode,
    pub violations: u64,
}

// ============================================================================
// SafetyGate
// ============================================================================

/// Pattern gate consulted before (input) and after (output) a turn.
#[derive(Debug, Clone, Default)]
pub struct SafetyGate {
    mode: SafetyMode,
    violations: u64,
}

impl SafetyGate {
    pub fn new(mode: SafetyMode) -> Self {
        Self {
            mode,
            violations: 0,
        }
    }

    pub fn mode(&self) -> SafetyMode {
        self.mode
    }

    pub fn violations(&self) -> u64 {
        self.violations
    }

    /// Reject text that mentions a blocked topic. Each rejection counts as a violation.
    pub fn check_input(&mut self, text: &str) -> Result<(), SafetyRejection> {
        let lowered = text.to_lowercase();
        if let Some(topic) = BLOCKED_TOPICS.iter().find(|t| t.pattern.is_match(&lowered)) {
            self.violations += 1;
            tracing::warn!(
                "Input rejected (category={}, violations={})",
                topic.category,
                self.violations
            );
            return Err(SafetyRejection {
                reason: "Запрос содержит недопустимый контент".to_string(),
                category: Some(topic.category),
            });
        }
        Ok(())
    }

    /// Bound outgoing text. Only strict mode has a length limit.
    pub fn check_output(&self, text: &str) -> Result<(), SafetyRejection> {
        if self.mode == SafetyMode::Strict && text.chars().count() > STRICT_OUTPUT_LIMIT {
            return Err(SafetyRejection {
                reason: "Ответ слишком длинный".to_string(),
                category: None,
            });
        }
        Ok(())
    }

    pub fn status(&self) -> SafetyStatus {
        SafetyStatus {
            mode: self.mode,
            violations: self.violations,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
