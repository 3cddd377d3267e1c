//! PAD affect space: Pleasure × Arousal × Dominance
//!
//! Mood is a single point in a bounded 3D cube. Discrete emotions are fixed
//! anchor points inside the same cube; classifying the current mood means
//! finding the nearest anchor.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A point in PAD space. Every axis lives in `[-1.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pad {
    pub pleasure: f32,
    pub arousal: f32,
    pub dominance: f32,
}

impl Pad {
    pub const NEUTRAL: Pad = Pad {
        pleasure: 0.0,
        arousal: 0.0,
        dominance: 0.0,
    };

    /// Build a point, clamping each axis into range.
    pub fn new(pleasure: f32, arousal: f32, dominance: f32) -> Self {
        Self {
            pleasure: clamp_axis(pleasure),
            arousal: clamp_axis(arousal),
            dominance: clamp_axis(dominance),
        }
    }

    /// Re-apply the axis bounds in place.
    pub fn clamp(&mut self) {
        self.pleasure = clamp_axis(self.pleasure);
        self.arousal = clamp_axis(self.arousal);
        self.dominance = clamp_axis(self.dominance);
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: &Pad) -> f32 {
        ((self.pleasure - other.pleasure).powi(2)
            + (self.arousal - other.arousal).powi(2)
            + (self.dominance - other.dominance).powi(2))
        .sqrt()
    }

    /// Per-axis scaling (no clamping).
    pub fn scale(&self, factor: f32) -> Pad {
        Pad {
            pleasure: self.pleasure * factor,
            arousal: self.arousal * factor,
            dominance: self.dominance * factor,
        }
    }

    pub fn is_within_bounds(&self) -> bool {
        [self.pleasure, self.arousal, self.dominance]
            .iter()
            .all(|v| (-1.0..=1.0).contains(v))
    }
}

/// Clamp one axis to `[-1, 1]`. NaN collapses to neutral instead of poisoning state.
pub fn clamp_axis(v: f32) -> f32 {
    if v.is_nan() {
        tracing::warn!("NaN detected on PAD axis, resetting to 0.0");
        return 0.0;
    }
    v.clamp(-1.0, 1.0)
}

/// Discrete emotion categories, each anchored to a fixed PAD point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmotionKind {
    Joy,
    Sadness,
    Anger,
    Fear,
    Surprise,
    Disgust,
    Interest,
    Neutral,
}

impl EmotionKind {
    /// Classification order. Ties in nearest-anchor search resolve to the
    /// earliest entry of this table.
    pub const ALL: [EmotionKind; 8] = [
        EmotionKind::Joy,
        EmotionKind::Sadness,
        EmotionKind::Anger,
        EmotionKind::Fear,
        EmotionKind::Surprise,
        EmotionKind::Disgust,
        EmotionKind::Interest,
        EmotionKind::Neutral,
    ];

    /// Fixed anchor point of this emotion in PAD space.
    pub fn target(&self) -> Pad {
        let (p, a, d) = match self {
            EmotionKind::Joy => (0.8, 0.5, 0.6),
            EmotionKind::Sadness => (-0.7, -0.4, -0.5),
            EmotionKind::Anger => (-0.6, 0.8, 0.7),
            EmotionKind::Fear => (-0.7, 0.7, -0.6),
            EmotionKind::Surprise => (0.3, 0.8, 0.0),
            EmotionKind::Disgust => (-0.6, 0.2, 0.3),
            EmotionKind::Interest => (0.5, 0.6, 0.3),
            EmotionKind::Neutral => (0.0, 0.0, 0.0),
        };
        Pad {
            pleasure: p,
            arousal: a,
            dominance: d,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EmotionKind::Joy => "joy",
            EmotionKind::Sadness => "sadness",
            EmotionKind::Anger => "anger",
            EmotionKind::Fear => "fear",
            EmotionKind::Surprise => "surprise",
            EmotionKind::Disgust => "disgust",
            EmotionKind::Interest => "interest",
            EmotionKind::Neutral => "neutral",
        }
    }

    /// Human-facing label used in replies and the generation preamble.
    pub fn label(&self) -> &'static str {
        match self {
            EmotionKind::Joy => "радость",
            EmotionKind::Sadness => "грусть",
            EmotionKind::Anger => "гнев",
            EmotionKind::Fear => "страх",
            EmotionKind::Surprise => "удивление",
            EmotionKind::Disgust => "отвращение",
            EmotionKind::Interest => "интерес",
            EmotionKind::Neutral => "нейтрально",
        }
    }
}

impl fmt::Display for EmotionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of classifying a PAD point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EmotionReading {
    pub emotion: EmotionKind,
    /// `max(0, 1 - distance / 2)`
    pub confidence: f32,
}

/// Nearest anchor in `table` to `point`.
///
/// Uses a strict `<` comparison so that on equal distances the first entry of
/// `table` wins. An empty table classifies as neutral with zero confidence.
pub fn nearest_emotion(point: &Pad, table: &[(EmotionKind, Pad)]) -> EmotionReading {
    let mut best = EmotionKind::Neutral;
    let mut best_dist = f32::INFINITY;
    for (emotion, target) in table {
        let dist = point.distance(target);
        if dist < best_dist {
            best_dist = dist;
            best = *emotion;
        }
    }
    let confidence = if best_dist.is_finite() {
        (1.0 - best_dist / 2.0).max(0.0)
    } else {
        0.0
    };
    EmotionReading {
        emotion: best,
        confidence,
    }
}

/// The default anchor table, in `EmotionKind::ALL` order.
pub fn emotion_table() -> [(EmotionKind, Pad); 8] {
    EmotionKind::ALL.map(|e| (e, e.target()))
}
