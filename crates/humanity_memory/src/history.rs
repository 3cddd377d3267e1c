//! Persistent conversation history, one JSON file per conversation.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Local, Utc};
use humanity_core::{Role, Turn};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Rough characters-per-token ratio used when packing context.
const CHARS_PER_TOKEN: usize = 4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryMessage {
    pub role: Role,
    pub content: String,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl HistoryMessage {
    pub fn turn(&self) -> Turn {
        Turn::new(self.role, self.content.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    #[serde(default)]
    pub messages: Vec<HistoryMessage>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl Conversation {
    pub fn new(id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
            metadata: Map::new(),
        }
    }
}

/// In-memory set of conversations backed by `<storage_dir>/<id>.json`.
///
/// Methods taking `id: Option<&str>` act on the current conversation when `None`.
pub struct ConversationStore {
    storage_dir: PathBuf,
    max_history: usize,
    conversations: HashMap<String, Conversation>,
    current: Option<String>,
}

impl ConversationStore {
    pub fn new(storage_dir: impl Into<PathBuf>, max_history: usize) -> Result<Self> {
        let storage_dir = storage_dir.into();
        std::fs::create_dir_all(&storage_dir).with_context(|| {
            format!(
                "Failed to create history directory {}",
                storage_dir.display()
            )
        })?;
        Ok(Self {
            storage_dir,
            max_history: max_history.max(1),
            conversations: HashMap::new(),
            current: None,
        })
    }

    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }

    pub fn current_id(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Start a fresh conversation and make it current. The default id is a
    /// local timestamp (`%Y%m%d_%H%M%S`).
    pub fn create_conversation(&mut self, id: Option<&str>) -> Result<String> {
        let id = match id {
            Some(id) => {
                validate_id(id)?;
                id.to_string()
            }
            None => Local::now().format("%Y%m%d_%H%M%S").to_string(),
        };
        self.conversations
            .insert(id.clone(), Conversation::new(id.clone()));
        self.current = Some(id.clone());
        tracing::info!("Created conversation: {}", id);
        Ok(id)
    }

    /// Append a message, creating the conversation if needed. Keeps at most
    /// `max_history` messages, dropping the oldest.
    pub fn add_message(
        &mut self,
        role: Role,
        content: impl Into<String>,
        id: Option<&str>,
        metadata: Option<Map<String, Value>>,
    ) -> Result<()> {
        let id = match id.or(self.current.as_deref()) {
            Some(id) => id.to_string(),
            None => self.create_conversation(None)?,
        };
        validate_id(&id)?;

        let max_history = self.max_history;
        let conv = self
            .conversations
            .entry(id.clone())
            .or_insert_with(|| Conversation::new(id));
        let now = Utc::now();
        conv.messages.push(HistoryMessage {
            role,
            content: content.into(),
            timestamp: now,
            metadata: metadata.unwrap_or_default(),
        });
        conv.updated_at = now;

        if conv.messages.len() > max_history {
            let excess = conv.messages.len() - max_history;
            conv.messages.drain(..excess);
        }
        Ok(())
    }

    pub fn conversation(&self, id: Option<&str>) -> Option<&Conversation> {
        let id = id.or(self.current.as_deref())?;
        self.conversations.get(id)
    }

    /// Messages as `{role, content}` turns, optionally only the last `limit`.
    pub fn history(&self, id: Option<&str>, limit: Option<usize>) -> Vec<Turn> {
        let Some(conv) = self.conversation(id) else {
            return Vec::new();
        };
        let skip = match limit {
            Some(n) => conv.messages.len().saturating_sub(n),
            None => 0,
        };
        conv.messages.iter().skip(skip).map(|m| m.turn()).collect()
    }

    /// Newest messages rendered as `role: content` lines, oldest first, fitting
    /// in a `max_tokens * 4` character budget.
    pub fn context(&self, id: Option<&str>, max_tokens: usize) -> String {
        let budget = max_tokens.saturating_mul(CHARS_PER_TOKEN);
        let mut parts = Vec::new();
        let mut used = 0usize;
        for turn in self.history(id, None).iter().rev() {
            let line = format!("{}: {}", turn.role, turn.content);
            let len = line.chars().count();
            if used + len > budget {
                break;
            }
            used += len;
            parts.push(line);
        }
        parts.reverse();
        parts.join("\n")
    }

    /// Write a conversation to disk. `Ok(false)` when there is nothing to save.
    pub fn save(&self, id: Option<&str>) -> Result<bool> {
        let Some(conv) = self.conversation(id) else {
            return Ok(false);
        };
        let path = self.path_for(&conv.id);
        let json = serde_json::to_string_pretty(conv)
            .with_context(|| format!("Failed to serialize conversation {}", conv.id))?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::debug!("Saved conversation {} to {}", conv.id, path.display());
        Ok(true)
    }

    /// Read a saved conversation and make it current. `Ok(false)` when no file exists.
    pub fn load(&mut self, id: &str) -> Result<bool> {
        validate_id(id)?;
        let path = self.path_for(id);
        if !path.exists() {
            return Ok(false);
        }
        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let mut conv: Conversation = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        conv.id = id.to_string();
        tracing::info!(
            "Loaded conversation {} ({} messages)",
            id,
            conv.messages.len()
        );
        self.conversations.insert(id.to_string(), conv);
        self.current = Some(id.to_string());
        Ok(true)
    }

    /// Drop all messages of a conversation; the file on disk is untouched until the next save.
    pub fn clear(&mut self, id: Option<&str>) {
        let Some(id) = id.or(self.current.as_deref()).map(str::to_string) else {
            return;
        };
        if let Some(conv) = self.conversations.get_mut(&id) {
            conv.messages.clear();
            conv.updated_at = Utc::now();
            tracing::info!("Cleared conversation: {}", id);
        }
    }

    /// Ids of conversations saved in the storage directory, sorted.
    pub fn list(&self) -> Result<Vec<String>> {
        let entries = std::fs::read_dir(&self.storage_dir)
            .with_context(|| format!("Failed to list {}", self.storage_dir.display()))?;
        let mut ids = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                ids.push(stem.to_string());
            }
        }
        ids.sort();
        Ok(ids)
    }

    fn path_for(&self, id: &str) -> PathBuf {
        self.storage_dir.join(format!("{}.json", id))
    }
}

/// Ids become file names; reject anything that could escape the storage directory.
fn validate_id(id: &str) -> Result<()> {
    if id.is_empty() || id == "." || id == ".." || id.contains(['/', '\\']) {
        bail!("Invalid conversation id: {:?}", id);
    }
    Ok(())
}
