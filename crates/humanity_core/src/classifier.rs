//! Keyword-based intent classification for Russian chat input.
//!
//! The cycle only talks to the [`IntentClassifier`] trait, so the word lists
//! here can be swapped for a learned model without touching control flow.
//! Matching is plain substring membership on the lowercased text; rule order
//! is significant.

use crate::affect::EmotionKind;

/// An emotional stimulus detected in text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StimulusCue {
    pub emotion: EmotionKind,
    pub intensity: f32,
}

/// Coarse intent used to pick a canned reply when no backend is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyIntent {
    Greeting,
    SmallTalk,
    Question,
    Other,
}

pub trait IntentClassifier: Send + Sync {
    /// At most one stimulus per utterance.
    fn stimulus(&self, text: &str) -> Option<StimulusCue>;

    /// Names of every skill exercised by the utterance. Rules are independent.
    fn skill_cues(&self, text: &str) -> Vec<String>;

    fn reply_intent(&self, text: &str) -> ReplyIntent;
}

// ============================================================================
// Word lists
// ============================================================================

const GREETING_WORDS: &[&str] = &["привет", "здравствуй", "добрый"];
const SADNESS_WORDS: &[&str] = &["грустно", "плохо", "печаль"];
const ANGER_WORDS: &[&str] = &["злюсь", "бесит", "раздражает"];

const SOCIAL_SKILL_WORDS: &[&str] = &["привет", "пока", "спасибо"];
const SEARCH_SKILL_WORDS: &[&str] = &["найди", "поищи", "загугли"];
const EMPATHY_SKILL_WORDS: &[&str] = &["грустно", "плохо", "расстроен"];

const HELLO_REPLY_WORDS: &[&str] = &["привет", "здравствуй"];
const SMALL_TALK_PHRASES: &[&str] = &["как дела"];

fn contains_any(text: &str, words: &[&str]) -> bool {
    words.iter().any(|w| text.contains(w))
}

// ============================================================================
// KeywordClassifier
// ============================================================================

/// Default classifier. Precedence:
/// greeting → joy@0.3, sadness → sadness@0.4, anger → anger@0.3, `?` → interest@0.2.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordClassifier;

impl IntentClassifier for KeywordClassifier {
    fn stimulus(&self, text: &str) -> Option<StimulusCue> {
        let lowered = text.to_lowercase();
        let (emotion, intensity) = if contains_any(&lowered, GREETING_WORDS) {
            (EmotionKind::Joy, 0.3)
        } else if contains_any(&lowered, SADNESS_WORDS) {
            (EmotionKind::Sadness, 0.4)
        } else if contains_any(&lowered, ANGER_WORDS) {
            (EmotionKind::Anger, 0.3)
        } else if text.contains('?') {
            (EmotionKind::Interest, 0.2)
        } else {
            return None;
        };
        Some(StimulusCue { emotion, intensity })
    }

    fn skill_cues(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        let mut cues = Vec::new();
        if contains_any(&lowered, SOCIAL_SKILL_WORDS) {
            cues.push("greeting".to_string());
        }
        if contains_any(&lowered, SEARCH_SKILL_WORDS) {
            cues.push("internet_search".to_string());
        }
        if contains_any(&lowered, EMPATHY_SKILL_WORDS) {
            cues.push("empathy".to_string());
        }
        cues
    }

    fn reply_intent(&self, text: &str) -> ReplyIntent {
        let lowered = text.to_lowercase();
        if contains_any(&lowered, HELLO_REPLY_WORDS) {
            ReplyIntent::Greeting
        } else if contains_any(&lowered, SMALL_TALK_PHRASES) {
            ReplyIntent::SmallTalk
        } else if text.contains('?') {
            ReplyIntent::Question
        } else {
            ReplyIntent::Other
        }
    }
}
