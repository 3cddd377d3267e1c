use humanity_core::EmotionReading;

/// System instruction for the generation backend, carrying the current feeling.
pub fn system_preamble(reading: &EmotionReading) -> String {
    format!(
        "Ты AI-компаньон. Твоя эмоция: {} ({}). Отвечай кратко и дружелюбно.",
        reading.emotion.label(),
        percent(reading.confidence)
    )
}

/// `0.834` -> `"83%"`
pub fn percent(confidence: f32) -> String {
    format!("{:.0}%", confidence * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use humanity_core::EmotionKind;

    #[test]
    fn test_preamble_embeds_emotion_and_confidence() {
        let reading = EmotionReading {
            emotion: EmotionKind::Joy,
            confidence: 0.75,
        };
        let prompt = system_preamble(&reading);
        assert!(prompt.contains("радость"));
        assert!(prompt.contains("(75%)"));
    }

    #[test]
    fn test_percent_rounding() {
        assert_eq!(percent(1.0), "100%");
        assert_eq!(percent(0.0), "0%");
        assert_eq!(percent(0.456), "46%");
    }
}
