pub mod buffers;
pub mod history;

pub use buffers::{
    BoundedBuffer, Episode, EpisodicMemory, RecalledEpisode, ATTENTION_WINDOW, EPISODIC_CAPACITY,
    RETRIEVAL_WINDOW, WORKING_MEMORY_CAPACITY,
};
pub use history::{Conversation, ConversationStore, HistoryMessage};
