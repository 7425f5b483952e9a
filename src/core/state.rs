use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::sync::{Arc, Weak};
use uuid::Uuid;

use super::emotion::{Emotion, EmotionKind};

/// The scored result of one `feel` call.
///
/// `emotions` is never empty and is ordered strongest first. The optional
/// `previous` link points at the state of the prior utterance in a
/// conversation without keeping it alive.
#[derive(Debug, Clone, Serialize)]
pub struct EmotionalState {
    /// Unique identifier (UUID v4)
    pub id: String,

    /// The analysed text, after escape normalisation
    pub text: String,

    emotions: Vec<Emotion>,

    /// Strongest general weight of any matched word (0.0 if none)
    pub general_weight: f64,

    /// Net polarity: -1, 0 or 1
    pub valence: i8,

    /// When this state was computed
    pub felt_at: DateTime<Utc>,

    #[serde(skip)]
    previous: Option<Weak<EmotionalState>>,
}

impl EmotionalState {
    /// Create a state from ranked emotions. An empty list degrades to a
    /// single full-weight neutral emotion.
    pub fn new(
        text: impl Into<String>,
        mut emotions: Vec<Emotion>,
        general_weight: f64,
        valence: i8,
    ) -> Self {
        if emotions.is_empty() {
            emotions.push(Emotion::new(EmotionKind::Neutral, 1.0));
        }

        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            emotions,
            general_weight,
            valence: valence.signum(),
            felt_at: Utc::now(),
            previous: None,
        }
    }

    /// Link this state to the one that came before it in a conversation.
    pub fn with_previous(mut self, previous: &Arc<EmotionalState>) -> Self {
        self.previous = Some(Arc::downgrade(previous));
        self
    }

    /// The prior state, if it is still alive.
    pub fn previous(&self) -> Option<Arc<EmotionalState>> {
        self.previous.as_ref().and_then(Weak::upgrade)
    }

    /// Walk back through the live part of the conversation, nearest first.
    pub fn history(&self) -> impl Iterator<Item = Arc<EmotionalState>> {
        std::iter::successors(self.previous(), |state| state.previous())
    }

    pub fn emotions(&self) -> &[Emotion] {
        &self.emotions
    }

    /// The dominant emotion.
    pub fn strongest_emotion(&self) -> Emotion {
        self.emotions
            .first()
            .copied()
            .unwrap_or(Emotion::new(EmotionKind::Neutral, 1.0))
    }

    /// Up to `n` emotions, strongest first.
    pub fn first_strongest(&self, n: usize) -> &[Emotion] {
        &self.emotions[..n.min(self.emotions.len())]
    }

    /// The emotion of the given kind, or a zero-weight placeholder.
    pub fn emotion(&self, kind: EmotionKind) -> Emotion {
        self.emotions
            .iter()
            .find(|e| e.kind == kind)
            .copied()
            .unwrap_or(Emotion::absent(kind))
    }

    pub fn happiness(&self) -> Emotion {
        self.emotion(EmotionKind::Happiness)
    }

    pub fn sadness(&self) -> Emotion {
        self.emotion(EmotionKind::Sadness)
    }

    pub fn fear(&self) -> Emotion {
        self.emotion(EmotionKind::Fear)
    }

    pub fn anger(&self) -> Emotion {
        self.emotion(EmotionKind::Anger)
    }

    pub fn disgust(&self) -> Emotion {
        self.emotion(EmotionKind::Disgust)
    }

    pub fn surprise(&self) -> Emotion {
        self.emotion(EmotionKind::Surprise)
    }

    pub fn happiness_weight(&self) -> f64 {
        self.happiness().weight
    }

    pub fn sadness_weight(&self) -> f64 {
        self.sadness().weight
    }

    pub fn fear_weight(&self) -> f64 {
        self.fear().weight
    }

    pub fn anger_weight(&self) -> f64 {
        self.anger().weight
    }

    pub fn disgust_weight(&self) -> f64 {
        self.disgust().weight
    }

    pub fn surprise_weight(&self) -> f64 {
        self.surprise().weight
    }
}

impl fmt::Display for EmotionalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Text: {}", self.text)?;
        writeln!(f, "General weight: {:.3}", self.general_weight)?;
        writeln!(f, "Valence: {}", self.valence)?;
        writeln!(f, "Happiness weight: {:.3}", self.happiness_weight())?;
        writeln!(f, "Sadness weight: {:.3}", self.sadness_weight())?;
        writeln!(f, "Anger weight: {:.3}", self.anger_weight())?;
        writeln!(f, "Fear weight: {:.3}", self.fear_weight())?;
        writeln!(f, "Disgust weight: {:.3}", self.disgust_weight())?;
        writeln!(f, "Surprise weight: {:.3}", self.surprise_weight())
    }
}
