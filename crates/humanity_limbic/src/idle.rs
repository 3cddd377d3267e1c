//! Idle thoughts surfaced while the user is quiet.

use rand::seq::SliceRandom;
use rand::Rng;

const DEFAULT_THOUGHTS: &[&str] = &[
    "Интересно, что происходит в мире...",
    "Хочется узнать что-то новое",
    "Как там дела у пользователя?",
];

#[derive(Debug, Clone)]
pub struct IdleThoughts {
    /// Chance that a tick produces a thought.
    probability: f64,
    thoughts: Vec<String>,
    current: Option<String>,
}

impl Default for IdleThoughts {
    fn default() -> Self {
        Self::new(0.3, DEFAULT_THOUGHTS.iter().map(|t| t.to_string()).collect())
    }
}

impl IdleThoughts {
    pub fn new(probability: f64, thoughts: Vec<String>) -> Self {
        Self {
            probability: probability.clamp(0.0, 1.0),
            thoughts,
            current: None,
        }
    }

    /// Roll once; on success pick and remember a new thought.
    pub fn tick<R: Rng>(&mut self, rng: &mut R) -> Option<&str> {
        if !rng.gen_bool(self.probability) {
            return None;
        }
        let thought = self.thoughts.choose(rng)?.clone();
        self.current = Some(thought);
        self.current.as_deref()
    }

    /// Most recent thought, if any.
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_always_thinks_at_probability_one() {
        let mut idle = IdleThoughts::new(1.0, vec!["мысль".to_string()]);
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(idle.tick(&mut rng), Some("мысль"));
        assert_eq!(idle.current(), Some("мысль"));
    }

    #[test]
    fn test_never_thinks_at_probability_zero() {
        let mut idle = IdleThoughts::new(0.0, vec!["мысль".to_string()]);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            assert!(idle.tick(&mut rng).is_none());
        }
        assert!(idle.current().is_none());
    }

    #[test]
    fn test_default_thoughts_come_from_the_list() {
        let mut idle = IdleThoughts::default();
        let mut rng = StdRng::seed_from_u64(42);
        let mut produced = 0;
        for _ in 0..200 {
            if let Some(t) = idle.tick(&mut rng) {
                assert!(DEFAULT_THOUGHTS.contains(&t));
                produced += 1;
            }
        }
        // 0.3 * 200 = 60 expected
        assert!(produced > 20 && produced < 110);
    }

    #[test]
    fn test_empty_list_yields_nothing() {
        let mut idle = IdleThoughts::new(1.0, vec![]);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(idle.tick(&mut rng).is_none());
    }
}
