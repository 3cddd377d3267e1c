//! Property-based tests for the bounded memory buffers.

use humanity_core::Turn;
use humanity_memory::{
    BoundedBuffer, Episode, EpisodicMemory, ATTENTION_WINDOW, EPISODIC_CAPACITY,
    RETRIEVAL_WINDOW, WORKING_MEMORY_CAPACITY,
};
use proptest::prelude::*;

proptest! {
    /// The buffer holds exactly the newest `min(n, cap)` items in push order.
    #[test]
    fn buffer_keeps_newest(cap in 1usize..50, items in prop::collection::vec(any::<u32>(), 0..200)) {
        let mut buf = BoundedBuffer::new(cap);
        for &i in &items {
            buf.push(i);
            prop_assert!(buf.len() <= cap);
        }
        let expected: Vec<u32> = items.iter().skip(items.len().saturating_sub(cap)).copied().collect();
        prop_assert_eq!(buf.iter().copied().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn memory_windows_never_exceed_caps(turns in 0usize..80, episodes in 0usize..250) {
        let mut mem = EpisodicMemory::new();
        for i in 0..turns {
            mem.remember_turn(Turn::user(i.to_string()));
        }
        for i in 0..episodes {
            let retrieved = mem.retrieve();
            mem.record_episode(Episode::new(i.to_string(), "", mem.attention(), &retrieved));
        }
        prop_assert_eq!(mem.working().len(), turns.min(WORKING_MEMORY_CAPACITY));
        prop_assert_eq!(mem.attention().len(), turns.min(ATTENTION_WINDOW));
        prop_assert_eq!(mem.episodes().len(), episodes.min(EPISODIC_CAPACITY));
        prop_assert_eq!(mem.retrieve().len(), episodes.min(RETRIEVAL_WINDOW));
    }
}
