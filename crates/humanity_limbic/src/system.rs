//! The affect model: one mutable PAD point per conversation.

use humanity_core::affect::clamp_axis;
use humanity_core::{emotion_table, nearest_emotion, EmotionKind, EmotionReading, Pad};

/// Fraction of the mood kept on each decay step.
pub const DECAY_RATE: f32 = 0.95;
/// How far one full-intensity stimulus moves the mood toward its anchor.
pub const STIMULUS_GAIN: f32 = 0.3;
/// Magnitude pleasure/arousal must exceed to leave the neutral mood label.
const MOOD_THRESHOLD: f32 = 0.3;

#[derive(Debug, Clone)]
pub struct AffectModel {
    state: Pad,
    decay_rate: f32,
}

impl Default for AffectModel {
    fn default() -> Self {
        Self::new()
    }
}

impl AffectModel {
    pub fn new() -> Self {
        Self {
            state: Pad::NEUTRAL,
            decay_rate: DECAY_RATE,
        }
    }

    /// Start from an arbitrary (clamped) mood.
    pub fn with_state(state: Pad) -> Self {
        let mut model = Self::new();
        model.state = Pad::new(state.pleasure, state.arousal, state.dominance);
        model
    }

    pub fn state(&self) -> Pad {
        self.state
    }

    /// `state += target * intensity * 0.3` on every axis, then clamp.
    ///
    /// Intensity is clamped to `[0, 1]` first; out-of-range values are a caller bug.
    pub fn apply_stimulus(&mut self, emotion: EmotionKind, intensity: f32) {
        let intensity = if (0.0..=1.0).contains(&intensity) {
            intensity
        } else {
            tracing::warn!(
                "Stimulus intensity {} outside [0, 1] for {}, clamping",
                intensity,
                emotion.as_str()
            );
            if intensity.is_nan() {
                0.0
            } else {
                intensity.clamp(0.0, 1.0)
            }
        };

        let delta = emotion.target().scale(intensity * STIMULUS_GAIN);
        self.state.pleasure += delta.pleasure;
        self.state.arousal += delta.arousal;
        self.state.dominance += delta.dominance;
        self.state.clamp();

        tracing::debug!(
            "Stimulus {}@{:.2} -> P={:+.3} A={:+.3} D={:+.3}",
            emotion.as_str(),
            intensity,
            self.state.pleasure,
            self.state.arousal,
            self.state.dominance
        );
    }

    /// Overwrite any subset of axes, each clamped.
    pub fn update_pad(
        &mut self,
        pleasure: Option<f32>,
        arousal: Option<f32>,
        dominance: Option<f32>,
    ) {
        if let Some(p) = pleasure {
            self.state.pleasure = clamp_axis(p);
        }
        if let Some(a) = arousal {
            self.state.arousal = clamp_axis(a);
        }
        if let Some(d) = dominance {
            self.state.dominance = clamp_axis(d);
        }
    }

    /// Nudge the mood by `point * weight` through [`Self::update_pad`].
    pub fn blend_signal(&mut self, point: Pad, weight: f32) {
        let current = self.state;
        self.update_pad(
            Some(current.pleasure + point.pleasure * weight),
            Some(current.arousal + point.arousal * weight),
            Some(current.dominance + point.dominance * weight),
        );
    }

    /// Pull every axis toward zero by the decay rate.
    pub fn decay(&mut self) {
        self.state = self.state.scale(self.decay_rate);
    }

    /// Nearest emotion anchor and `max(0, 1 - distance/2)` confidence.
    pub fn dominant_emotion(&self) -> EmotionReading {
        nearest_emotion(&self.state, &emotion_table())
    }

    /// Verbal mood from the signs of pleasure and arousal.
    pub fn mood_description(&self) -> &'static str {
        let p = self.state.pleasure;
        let a = self.state.arousal;
        if p > MOOD_THRESHOLD && a > MOOD_THRESHOLD {
            "Энергичное и позитивное настроение"
        } else if p > MOOD_THRESHOLD && a < -MOOD_THRESHOLD {
            "Спокойное и довольное состояние"
        } else if p < -MOOD_THRESHOLD && a > MOOD_THRESHOLD {
            "Напряжённое состояние"
        } else if p < -MOOD_THRESHOLD && a < -MOOD_THRESHOLD {
            "Подавленное настроение"
        } else {
            "Нейтральное состояние"
        }
    }
}
