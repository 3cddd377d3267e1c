//! External affect readings, e.g. facial-expression recognition.

use humanity_core::{EmotionKind, Pad};
use serde::{Deserialize, Serialize};

/// Weight at which a sensor reading is blended into the mood.
pub const SENSOR_BLEND_WEIGHT: f32 = 0.1;
/// Readings below this confidence are ignored.
pub const SENSOR_MIN_CONFIDENCE: f32 = 0.3;

/// Vocabulary of facial-expression recognizers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorEmotion {
    Angry,
    Disgust,
    Fear,
    Happy,
    Sad,
    Surprise,
    Neutral,
}

impl SensorEmotion {
    pub fn parse_str(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "angry" => Some(SensorEmotion::Angry),
            "disgust" => Some(SensorEmotion::Disgust),
            "fear" => Some(SensorEmotion::Fear),
            "happy" => Some(SensorEmotion::Happy),
            "sad" => Some(SensorEmotion::Sad),
            "surprise" => Some(SensorEmotion::Surprise),
            "neutral" => Some(SensorEmotion::Neutral),
            _ => None,
        }
    }

    /// The internal emotion sharing this expression's PAD anchor.
    pub fn emotion(&self) -> EmotionKind {
        match self {
            SensorEmotion::Angry => EmotionKind::Anger,
            SensorEmotion::Disgust => EmotionKind::Disgust,
            SensorEmotion::Fear => EmotionKind::Fear,
            SensorEmotion::Happy => EmotionKind::Joy,
            SensorEmotion::Sad => EmotionKind::Sadness,
            SensorEmotion::Surprise => EmotionKind::Surprise,
            SensorEmotion::Neutral => EmotionKind::Neutral,
        }
    }

    pub fn pad(&self) -> Pad {
        self.emotion().target()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    pub emotion: SensorEmotion,
    pub confidence: f32,
}

impl SensorReading {
    pub fn is_reliable(&self) -> bool {
        self.confidence >= SENSOR_MIN_CONFIDENCE
    }
}
