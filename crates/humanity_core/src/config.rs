use crate::safety::SafetyMode;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

// ============================================================================
// Top-level config
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HumanityConfig {
    pub llm: LlmConfig,
    pub safety: SafetyConfig,
    pub memory: MemoryConfig,
    pub log: LogConfig,
}

impl HumanityConfig {
    /// Load config from a TOML file, falling back to defaults for missing fields.
    /// After loading, env var overrides are applied.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;
        let mut config: HumanityConfig =
            toml::from_str(&content).with_context(|| "Failed to parse TOML config")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Try to load from path; if the file is missing or invalid, return defaults with env overrides.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::info!("Config file not found or invalid ({:#}), using defaults", e);
                let mut cfg = Self::default();
                cfg.apply_env_overrides();
                cfg
            }
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("LLM_PROVIDER") {
            self.llm.provider = v;
        }
        if let Ok(v) = std::env::var("LLM_MODEL") {
            self.llm.model = v;
        }
        if let Ok(v) = std::env::var("LLM_BASE_URL") {
            self.llm.base_url = v;
        }
        if let Ok(v) = std::env::var("OPENAI_API_KEY") {
            if !v.trim().is_empty() {
                self.llm.api_key = Some(v);
            }
        }
        if let Ok(v) = std::env::var("LLM_MAX_TOKENS") {
            if let Ok(n) = v.parse() {
                self.llm.max_tokens = n;
            }
        }
        if let Ok(v) = std::env::var("LLM_TIMEOUT_SECS") {
            if let Ok(n) = v.parse() {
                self.llm.timeout_secs = n;
            }
        }
        if let Ok(v) = std::env::var("SAFETY_MODE") {
            match SafetyMode::parse_str(&v) {
                Some(mode) => self.safety.mode = mode,
                None => tracing::warn!("Ignoring unknown SAFETY_MODE '{}'", v),
            }
        }
        if let Ok(v) = std::env::var("LOG_LEVEL") {
            self.log.level = v.to_lowercase();
        }
        if let Ok(v) = std::env::var("DEBUG") {
            if parse_flag(&v) {
                self.log.level = "debug".to_string();
            }
        }
    }
}

/// `true`, `1`, `yes` (any case) count as set.
pub fn parse_flag(v: &str) -> bool {
    matches!(v.trim().to_lowercase().as_str(), "true" | "1" | "yes")
}

// ============================================================================
// Sub-configs
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// `openai`, `mock` or `none`.
    pub provider: String,
    pub model: String,
    pub base_url: String,
    pub api_key: Option<String>,
    pub max_tokens: u32,
    pub temperature: f32,
    /// Upper bound for a single generation call; exceeding it is a generation failure.
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: None,
            max_tokens: 500,
            temperature: 0.7,
            timeout_secs: 60,
        }
    }
}

impl LlmConfig {
    /// Whether a generation backend can be built from this config.
    pub fn backend_enabled(&self) -> bool {
        match self.provider.as_str() {
            "mock" => true,
            "openai" => self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty()),
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SafetyConfig {
    pub mode: SafetyMode,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    pub storage_dir: PathBuf,
    /// Messages kept per stored conversation.
    pub max_history: usize,
    /// Stored turns handed to the cycle to seed working memory.
    pub seed_turns: usize,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from("data/memory"),
            max_history: 100,
            seed_turns: 20,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = HumanityConfig::default();
        assert_eq!(cfg.llm.provider, "openai");
        assert_eq!(cfg.llm.model, "gpt-4o-mini");
        assert_eq!(cfg.llm.max_tokens, 500);
        assert_eq!(cfg.safety.mode, SafetyMode::Normal);
        assert_eq!(cfg.memory.max_history, 100);
        assert_eq!(cfg.log.level, "info");
        assert!(!cfg.llm.backend_enabled());
    }

    #[test]
    fn test_parse_minimal_toml() {
        let toml_str = r#"
[llm]
provider = "mock"
"#;
        let cfg: HumanityConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(cfg.llm.provider, "mock");
        assert_eq!(cfg.llm.timeout_secs, 60);
        assert!(cfg.llm.backend_enabled());
    }

    #[test]
    fn test_parse_full_toml() {
        let toml_str = r#"
[llm]
provider = "openai"
model = "gpt-4o"
base_url = "http://localhost:8000/v1"
api_key = "sk-test"
max_tokens = 256
temperature = 0.2
timeout_secs = 5

[safety]
mode = "strict"

[memory]
storage_dir = "/tmp/humanity"
max_history = 50
seed_turns = 10

[log]
level = "debug"
file = "humanity.log"
"#;
        let cfg: HumanityConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(cfg.llm.model, "gpt-4o");
        assert_eq!(cfg.llm.timeout_secs, 5);
        assert!(cfg.llm.backend_enabled());
        assert_eq!(cfg.safety.mode, SafetyMode::Strict);
        assert_eq!(cfg.memory.storage_dir, PathBuf::from("/tmp/humanity"));
        assert_eq!(cfg.memory.seed_turns, 10);
        assert_eq!(cfg.log.file, Some(PathBuf::from("humanity.log")));
    }

    #[test]
    fn test_backend_enabled_rules() {
        let mut llm = LlmConfig::default();
        assert!(!llm.backend_enabled());
        llm.api_key = Some("   ".to_string());
        assert!(!llm.backend_enabled());
        llm.api_key = Some("sk-x".to_string());
        assert!(llm.backend_enabled());
        llm.provider = "none".to_string();
        assert!(!llm.backend_enabled());
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("TRUE"));
        assert!(parse_flag("1"));
        assert!(parse_flag("yes"));
        assert!(!parse_flag("no"));
        assert!(!parse_flag(""));
    }

    #[test]
    fn test_env_overrides_and_defaults() {
        std::env::set_var("LLM_PROVIDER", "mock");
        std::env::set_var("SAFETY_MODE", "strict");

        let mut cfg = HumanityConfig::default();
        cfg.apply_env_overrides();
        assert_eq!(cfg.llm.provider, "mock");
        assert_eq!(cfg.safety.mode, SafetyMode::Strict);

        std::env::remove_var("LLM_PROVIDER");
        std::env::remove_var("SAFETY_MODE");

        let cfg = HumanityConfig::load_or_default("/nonexistent/humanity.toml");
        assert_eq!(cfg.llm.provider, "openai");
        assert_eq!(cfg.safety.mode, SafetyMode::Normal);
    }
}
