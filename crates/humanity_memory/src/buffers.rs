//! Short-term buffers feeding context into a turn.
//!
//! - Working memory: the last few dialogue turns, source of the attention window
//! - Episodic log: completed turns with the context they were produced in
//!
//! Both are FIFO with a hard cap; retrieval is recency-only.

use chrono::{DateTime, Utc};
use humanity_core::Turn;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

pub const WORKING_MEMORY_CAPACITY: usize = 20;
pub const ATTENTION_WINDOW: usize = 10;
pub const EPISODIC_CAPACITY: usize = 100;
pub const RETRIEVAL_WINDOW: usize = 5;

// ============================================================================
// BoundedBuffer
// ============================================================================

/// Ordered buffer that evicts its oldest items once `capacity` is exceeded.
#[derive(Debug, Clone)]
pub struct BoundedBuffer<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T: Clone> BoundedBuffer<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    pub fn push(&mut self, item: T) {
        self.items.push_back(item);
        while self.items.len() > self.capacity {
            self.items.pop_front();
        }
    }

    /// Up to `n` newest items, oldest first.
    pub fn recent(&self, n: usize) -> Vec<T> {
        let skip = self.items.len().saturating_sub(n);
        self.items.iter().skip(skip).cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

// ============================================================================
// Episodes
// ============================================================================

/// Flat view of an earlier episode, as captured in a later one's retrieval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecalledEpisode {
    pub input: String,
    pub output: String,
}

/// One completed turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    pub input: String,
    pub output: String,
    /// Attention window the turn was answered with.
    pub context: Vec<Turn>,
    /// Episodes retrieved for the turn.
    pub retrieved: Vec<RecalledEpisode>,
    /// The reply is a rendered generation error rather than a real answer.
    pub generation_failed: bool,
    pub recorded_at: DateTime<Utc>,
}

impl Episode {
    pub fn new(
        input: impl Into<String>,
        output: impl Into<String>,
        context: Vec<Turn>,
        retrieved: &[Episode],
    ) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            context,
            retrieved: retrieved.iter().map(Episode::recall).collect(),
            generation_failed: false,
            recorded_at: Utc::now(),
        }
    }

    pub fn failed(mut self, failed: bool) -> Self {
        self.generation_failed = failed;
        self
    }

    pub fn recall(&self) -> RecalledEpisode {
        RecalledEpisode {
            input: self.input.clone(),
            output: self.output.clone(),
        }
    }
}

// ============================================================================
// EpisodicMemory
// ============================================================================

/// Working memory plus the episodic log, owned by one conversation.
#[derive(Debug, Clone)]
pub struct EpisodicMemory {
    working: BoundedBuffer<Turn>,
    episodes: BoundedBuffer<Episode>,
}

impl Default for EpisodicMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl EpisodicMemory {
    pub fn new() -> Self {
        Self {
            working: BoundedBuffer::new(WORKING_MEMORY_CAPACITY),
            episodes: BoundedBuffer::new(EPISODIC_CAPACITY),
        }
    }

    pub fn remember_turn(&mut self, turn: Turn) {
        self.working.push(turn);
    }

    /// Replace working memory with prior turns (only the newest that fit are kept).
    pub fn seed(&mut self, turns: impl IntoIterator<Item = Turn>) {
        self.working.clear();
        for turn in turns {
            self.working.push(turn);
        }
        tracing::debug!("Working memory seeded with {} turns", self.working.len());
    }

    /// The last [`ATTENTION_WINDOW`] working-memory turns.
    pub fn attention(&self) -> Vec<Turn> {
        self.working.recent(ATTENTION_WINDOW)
    }

    /// The last [`RETRIEVAL_WINDOW`] episodes.
    pub fn retrieve(&self) -> Vec<Episode> {
        self.episodes.recent(RETRIEVAL_WINDOW)
    }

    pub fn record_episode(&mut self, episode: Episode) {
        self.episodes.push(episode);
    }

    pub fn reset(&mut self) {
        self.working.clear();
        self.episodes.clear();
        tracing::info!("Working and episodic memory cleared");
    }

    pub fn working(&self) -> &BoundedBuffer<Turn> {
        &self.working
    }

    pub fn episodes(&self) -> &BoundedBuffer<Episode> {
        &self.episodes
    }
}
