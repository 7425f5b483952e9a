use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Ekman's six basic emotions plus a neutral fallback.
///
/// Variant order is the tie-break order used when two emotions carry the
/// same weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionKind {
    Happiness,
    Sadness,
    Fear,
    Anger,
    Disgust,
    Surprise,
    Neutral,
}

impl EmotionKind {
    /// The six scored dimensions, without `Neutral`.
    pub const DIMENSIONS: [EmotionKind; 6] = [
        EmotionKind::Happiness,
        EmotionKind::Sadness,
        EmotionKind::Fear,
        EmotionKind::Anger,
        EmotionKind::Disgust,
        EmotionKind::Surprise,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            EmotionKind::Happiness => "happiness",
            EmotionKind::Sadness => "sadness",
            EmotionKind::Fear => "fear",
            EmotionKind::Anger => "anger",
            EmotionKind::Disgust => "disgust",
            EmotionKind::Surprise => "surprise",
            EmotionKind::Neutral => "neutral",
        }
    }
}

impl fmt::Display for EmotionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EmotionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "happiness" | "joy" => Ok(EmotionKind::Happiness),
            "sadness" => Ok(EmotionKind::Sadness),
            "fear" => Ok(EmotionKind::Fear),
            "anger" => Ok(EmotionKind::Anger),
            "disgust" => Ok(EmotionKind::Disgust),
            "surprise" => Ok(EmotionKind::Surprise),
            "neutral" => Ok(EmotionKind::Neutral),
            other => Err(format!("Unknown emotion: {}", other)),
        }
    }
}

/// One emotion with its intensity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Emotion {
    pub kind: EmotionKind,
    pub weight: f64,
}

impl Emotion {
    pub fn new(kind: EmotionKind, weight: f64) -> Self {
        Self { kind, weight }
    }

    /// Zero-weight placeholder for a dimension that was not detected.
    pub fn absent(kind: EmotionKind) -> Self {
        Self { kind, weight: 0.0 }
    }

    /// Strongest first: descending weight, then dimension order.
    pub fn strongest_first(a: &Emotion, b: &Emotion) -> Ordering {
        b.weight
            .total_cmp(&a.weight)
            .then_with(|| a.kind.cmp(&b.kind))
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:.3}", self.kind, self.weight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tie_break_follows_dimension_order() {
        let mut emotions = vec![
            Emotion::new(EmotionKind::Anger, 0.5),
            Emotion::new(EmotionKind::Fear, 0.5),
            Emotion::new(EmotionKind::Surprise, 0.7),
        ];
        emotions.sort_by(Emotion::strongest_first);

        assert_eq!(emotions[0].kind, EmotionKind::Surprise);
        assert_eq!(emotions[1].kind, EmotionKind::Fear);
        assert_eq!(emotions[2].kind, EmotionKind::Anger);
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("Happiness".parse::<EmotionKind>(), Ok(EmotionKind::Happiness));
        assert_eq!("disgust".parse::<EmotionKind>(), Ok(EmotionKind::Disgust));
        assert!("boredom".parse::<EmotionKind>().is_err());
    }

    #[test]
    fn test_serialize_lowercase() {
        let json = serde_json::to_string(&Emotion::new(EmotionKind::Fear, 0.25)).unwrap();
        assert_eq!(json, r#"{"kind":"fear","weight":0.25}"#);
    }
}
