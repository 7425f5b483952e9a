use serde::{Deserialize, Serialize};
use std::fmt;

use super::emotion::EmotionKind;

/// A lexicon entry: a word or emoticon with its emotional weights.
///
/// Entries stored in a [`Lexicon`](super::Lexicon) are never mutated. Lookups
/// hand out clones, and the sensor scales those per occurrence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffectWord {
    word: String,
    general_weight: f64,
    happiness_weight: f64,
    sadness_weight: f64,
    anger_weight: f64,
    fear_weight: f64,
    disgust_weight: f64,
    surprise_weight: f64,
    /// Sign of the net affect, fixed at construction.
    general_valence: i8,
    #[serde(default)]
    starts_with_emoticon: bool,
}

impl AffectWord {
    /// Create an entry with unscaled weights.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        word: impl Into<String>,
        general_weight: f64,
        happiness_weight: f64,
        sadness_weight: f64,
        anger_weight: f64,
        fear_weight: f64,
        disgust_weight: f64,
        surprise_weight: f64,
    ) -> Self {
        let mut value = Self {
            word: word.into(),
            general_weight,
            happiness_weight,
            sadness_weight,
            anger_weight,
            fear_weight,
            disgust_weight,
            surprise_weight,
            general_valence: 0,
            starts_with_emoticon: false,
        };
        value.general_valence = value.valence_sign();
        value
    }

    /// Create an entry whose weights are first scaled by `normalisation`.
    /// Valence is taken after scaling.
    #[allow(clippy::too_many_arguments)]
    pub fn normalised(
        word: impl Into<String>,
        general_weight: f64,
        happiness_weight: f64,
        sadness_weight: f64,
        anger_weight: f64,
        fear_weight: f64,
        disgust_weight: f64,
        surprise_weight: f64,
        normalisation: f64,
    ) -> Self {
        let mut value = Self::new(
            word,
            general_weight,
            happiness_weight,
            sadness_weight,
            anger_weight,
            fear_weight,
            disgust_weight,
            surprise_weight,
        );
        value.adjust_weights(normalisation);
        value.general_valence = value.valence_sign();
        value
    }

    /// Scale every weight by `factor`, capping each at 1.0.
    ///
    /// `general_valence` is left as it was.
    pub fn adjust_weights(&mut self, factor: f64) {
        for weight in self.weights_mut() {
            *weight = (*weight * factor).min(1.0);
        }
    }

    /// Turn the entry into its negated reading: the strongest negative
    /// affect becomes happiness, and happiness is spread over sadness,
    /// anger, fear and disgust. Surprise is unaffected.
    pub fn flip_valence(&mut self) {
        self.general_valence = -self.general_valence;
        let happiness = self.happiness_weight;
        self.happiness_weight = self
            .sadness_weight
            .max(self.anger_weight)
            .max(self.fear_weight.max(self.disgust_weight));
        self.sadness_weight = happiness;
        self.anger_weight = happiness / 2.0;
        self.fear_weight = happiness / 2.0;
        self.disgust_weight = happiness / 2.0;
    }

    /// True when none of the six dimensions carries any weight.
    pub fn is_zero_ekman(&self) -> bool {
        self.weight_sum() == 0.0
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn general_weight(&self) -> f64 {
        self.general_weight
    }

    pub fn general_valence(&self) -> i8 {
        self.general_valence
    }

    pub fn happiness_weight(&self) -> f64 {
        self.happiness_weight
    }

    pub fn sadness_weight(&self) -> f64 {
        self.sadness_weight
    }

    pub fn anger_weight(&self) -> f64 {
        self.anger_weight
    }

    pub fn fear_weight(&self) -> f64 {
        self.fear_weight
    }

    pub fn disgust_weight(&self) -> f64 {
        self.disgust_weight
    }

    pub fn surprise_weight(&self) -> f64 {
        self.surprise_weight
    }

    /// Weight of one dimension. `Neutral` maps to the general weight.
    pub fn weight(&self, kind: EmotionKind) -> f64 {
        match kind {
            EmotionKind::Happiness => self.happiness_weight,
            EmotionKind::Sadness => self.sadness_weight,
            EmotionKind::Fear => self.fear_weight,
            EmotionKind::Anger => self.anger_weight,
            EmotionKind::Disgust => self.disgust_weight,
            EmotionKind::Surprise => self.surprise_weight,
            EmotionKind::Neutral => self.general_weight,
        }
    }

    pub fn starts_with_emoticon(&self) -> bool {
        self.starts_with_emoticon
    }

    pub fn set_starts_with_emoticon(&mut self, starts_with_emoticon: bool) {
        self.starts_with_emoticon = starts_with_emoticon;
    }

    fn weights_mut(&mut self) -> [&mut f64; 7] {
        [
            &mut self.general_weight,
            &mut self.happiness_weight,
            &mut self.sadness_weight,
            &mut self.anger_weight,
            &mut self.fear_weight,
            &mut self.disgust_weight,
            &mut self.surprise_weight,
        ]
    }

    fn valence_sign(&self) -> i8 {
        let sum = self.happiness_weight
            - self.sadness_weight
            - self.anger_weight
            - self.fear_weight
            - self.disgust_weight;
        if sum > 0.0 {
            1
        } else if sum < 0.0 {
            -1
        } else {
            0
        }
    }

    fn weight_sum(&self) -> f64 {
        self.happiness_weight
            + self.sadness_weight
            + self.anger_weight
            + self.fear_weight
            + self.disgust_weight
            + self.surprise_weight
    }
}

/// Renders the record in lexicon-file form:
/// `word general happiness sadness anger fear disgust surprise`.
impl fmt::Display for AffectWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {} {} {}",
            self.word,
            self.general_weight,
            self.happiness_weight,
            self.sadness_weight,
            self.anger_weight,
            self.fear_weight,
            self.disgust_weight,
            self.surprise_weight
        )
    }
}
