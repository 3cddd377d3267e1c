//! Property-based tests for humanity_core.
//!
//! Classification and skill progression must behave for every input, not
//! just the hand-picked cases in the unit tests.

use humanity_core::{emotion_table, nearest_emotion, EmotionKind, Pad, SkillLedger, SkillLevel};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

fn arb_pad() -> impl Strategy<Value = Pad> {
    (-1.0f32..=1.0, -1.0f32..=1.0, -1.0f32..=1.0).prop_map(|(p, a, d)| Pad::new(p, a, d))
}

fn arb_outcomes() -> impl Strategy<Value = Vec<bool>> {
    prop::collection::vec(any::<bool>(), 0..400)
}

// ============================================================================
// Classification
// ============================================================================

proptest! {
    /// Confidence is always a valid probability-like score.
    #[test]
    fn confidence_in_unit_interval(pad in arb_pad()) {
        let reading = nearest_emotion(&pad, &emotion_table());
        prop_assert!(reading.confidence >= 0.0 && reading.confidence <= 1.0);
    }

    /// The chosen emotion is never farther away than any other anchor.
    #[test]
    fn classification_is_nearest(pad in arb_pad()) {
        let reading = nearest_emotion(&pad, &emotion_table());
        let chosen = pad.distance(&reading.emotion.target());
        for kind in EmotionKind::ALL {
            prop_assert!(chosen <= pad.distance(&kind.target()) + 1e-6);
        }
    }

    #[test]
    fn pad_new_always_in_bounds(p in -10.0f32..10.0, a in -10.0f32..10.0, d in -10.0f32..10.0) {
        prop_assert!(Pad::new(p, a, d).is_within_bounds());
    }
}

// ============================================================================
// Skill progression
// ============================================================================

proptest! {
    /// Level always matches the highest threshold not above the experience.
    #[test]
    fn level_consistent_with_experience(outcomes in arb_outcomes()) {
        let mut ledger = SkillLedger::new();
        for success in &outcomes {
            ledger.use_skill("analysis", *success);
        }
        let skill = ledger.get("analysis").unwrap();
        prop_assert_eq!(skill.uses as usize, outcomes.len());
        prop_assert!(skill.experience >= skill.level.threshold());
        if let Some(next) = SkillLevel::ALL.iter().find(|l| **l > skill.level) {
            prop_assert!(skill.experience < next.threshold());
        }
    }

    /// Per-use grant is bounded by the base XP and the 2x cap.
    #[test]
    fn xp_grant_bounded(outcomes in arb_outcomes()) {
        let mut ledger = SkillLedger::new();
        let mut total = 0.0;
        for success in outcomes {
            let xp = ledger.use_skill("greeting", success);
            let base = if success { 10.0 } else { 3.0 };
            prop_assert!(xp >= base && xp <= base * 2.0 + 1e-9);
            total += xp;
        }
        prop_assert!((ledger.total_experience() - total).abs() < 1e-6);
        prop_assert!(ledger.total_level() >= 1);
    }

    /// Level never decreases as a skill is used.
    #[test]
    fn level_is_monotone(outcomes in arb_outcomes()) {
        let mut ledger = SkillLedger::new();
        let mut previous = SkillLevel::Novice;
        for success in outcomes {
            ledger.use_skill("empathy", success);
            let level = ledger.get("empathy").unwrap().level;
            prop_assert!(level >= previous);
            previous = level;
        }
    }
}
