use std::sync::Arc;

use super::affect_word::AffectWord;
use super::emotion::{Emotion, EmotionKind};
use super::heuristics;
use super::lexicon::Lexicon;
use super::state::EmotionalState;

/// A sentence body plus the `.`/`!` run that closed it.
#[derive(Debug, PartialEq)]
struct Sentence<'a> {
    body: &'a str,
    text: &'a str,
}

/// The "feel" pipeline: scores text against a shared lexicon.
#[derive(Debug, Clone)]
pub struct AffectSensor {
    lexicon: Arc<Lexicon>,
}

impl AffectSensor {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self { lexicon }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Score `text` and return its emotional state.
    pub fn feel(&self, text: &str) -> EmotionalState {
        let text = normalise_escapes(text);
        let affect_words = self.sense_normalised(&text);
        let state = create_emotional_state(&text, &affect_words);

        tracing::debug!(
            matches = affect_words.len(),
            valence = state.valence,
            strongest = %state.strongest_emotion(),
            "Felt text"
        );

        state
    }

    /// Score `text` as the next utterance after `previous`.
    pub fn feel_after(&self, text: &str, previous: &Arc<EmotionalState>) -> EmotionalState {
        self.feel(text).with_previous(previous)
    }

    /// Every affect word matched in `text`, with heuristics applied. These
    /// are the words `feel` aggregates.
    pub fn sense(&self, text: &str) -> Vec<AffectWord> {
        self.sense_normalised(&normalise_escapes(text))
    }

    fn sense_normalised(&self, text: &str) -> Vec<AffectWord> {
        let mut affect_words = Vec::new();

        for sentence in split_sentences(text) {
            let has_negation = self.lexicon.contains_negation(&sentence.body.to_lowercase());
            let exclamation = heuristics::exclamation_coef(&sentence.text.to_lowercase());
            let mut previous_word = "";

            for token in sentence.body.split(' ') {
                if let Some(mut emoticon) = self.lexicon.lookup_emoticon(token) {
                    let coef = heuristics::emoticon_repeat_coef(token, &emoticon) * exclamation;
                    emoticon.adjust_weights(coef);
                    tracing::trace!(emoticon = emoticon.word(), coef, "Matched emoticon");
                    affect_words.push(emoticon);
                    continue;
                }

                for word in sub_words(token) {
                    if let Some(mut affect) = self.lexicon.lookup_word(&word.to_lowercase()) {
                        if has_negation {
                            affect.flip_valence();
                        }
                        let coef = heuristics::caps_lock_coef(word)
                            * heuristics::modifier_coef(&self.lexicon, previous_word)
                            * exclamation;
                        affect.adjust_weights(coef);
                        tracing::trace!(word = affect.word(), coef, negated = has_negation, "Matched word");
                        affect_words.push(affect);
                    }
                    previous_word = word;
                }
            }
        }

        affect_words
    }
}

/// Only the two-character escape `\n` is replaced, not real line breaks.
fn normalise_escapes(text: &str) -> String {
    text.replace("\\n", " ")
}

fn split_sentences(text: &str) -> Vec<Sentence<'_>> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut body_end: Option<usize> = None;

    let mut push = |start: usize, body_end: usize, end: usize| {
        let body = &text[start..body_end];
        if !body.is_empty() {
            sentences.push(Sentence {
                body,
                text: &text[start..end],
            });
        }
    };

    for (i, c) in text.char_indices() {
        let boundary = c == '.' || c == '!';
        match body_end {
            None if boundary => body_end = Some(i),
            Some(end) if !boundary => {
                push(start, end, i);
                start = i;
                body_end = None;
            }
            _ => {}
        }
    }
    push(start, body_end.unwrap_or(text.len()), text.len());

    sentences
}

/// Letters and hyphens form words; anything else separates them. A token
/// with no word characters is kept whole.
fn sub_words(token: &str) -> Vec<&str> {
    let words: Vec<&str> = token
        .split(|c: char| !(c.is_ascii_alphabetic() || c == '-'))
        .filter(|w| !w.is_empty())
        .collect();

    if words.is_empty() {
        vec![token]
    } else {
        words
    }
}

/// Strongest word wins per dimension; valence is the sign of the summed
/// per-word valences.
fn create_emotional_state(text: &str, affect_words: &[AffectWord]) -> EmotionalState {
    let mut valence_sum: i64 = 0;
    let mut general_weight = 0.0_f64;
    let mut weights = [0.0_f64; 6];

    for affect in affect_words {
        valence_sum += i64::from(affect.general_valence());
        general_weight = general_weight.max(affect.general_weight());
        for (weight, kind) in weights.iter_mut().zip(EmotionKind::DIMENSIONS) {
            *weight = weight.max(affect.weight(kind));
        }
    }

    let mut emotions: Vec<Emotion> = EmotionKind::DIMENSIONS
        .iter()
        .zip(weights)
        .filter(|(_, weight)| *weight > 0.0)
        .map(|(&kind, weight)| Emotion::new(kind, weight))
        .collect();

    if emotions.is_empty() {
        emotions.push(Emotion::new(
            EmotionKind::Neutral,
            (0.2 + general_weight) / 1.2,
        ));
    }

    emotions.sort_by(Emotion::strongest_first);

    EmotionalState::new(text, emotions, general_weight, valence_sum.signum() as i8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::lexicon::tests::stub_lexicon;

    fn sensor() -> AffectSensor {
        AffectSensor::new(Arc::new(stub_lexicon()))
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_split_sentences() {
        let sentences = split_sentences("Hi there!!! How are you... fine.");
        let bodies: Vec<_> = sentences.iter().map(|s| s.body).collect();
        assert_eq!(bodies, vec!["Hi there", " How are you", " fine"]);
        assert_eq!(sentences[0].text, "Hi there!!!");

        assert!(split_sentences("").is_empty());
        assert!(split_sentences("!!..!").is_empty());
        assert_eq!(split_sentences("...no end")[0].body, "no end");
    }

    #[test]
    fn test_sub_words() {
        assert_eq!(sub_words("(glad)"), vec!["glad"]);
        assert_eq!(sub_words("don't"), vec!["don", "t"]);
        assert_eq!(sub_words("well-being,"), vec!["well-being"]);
        assert_eq!(sub_words("1234"), vec!["1234"]);
        assert_eq!(sub_words(""), vec![""]);
    }

    #[test]
    fn test_empty_text_is_neutral() {
        let sensor = sensor();
        for text in ["", "   "] {
            let state = sensor.feel(text);
            assert_eq!(state.emotions().len(), 1);
            let strongest = state.strongest_emotion();
            assert_eq!(strongest.kind, EmotionKind::Neutral);
            assert!(approx(strongest.weight, 0.2 / 1.2));
            assert_eq!(state.general_weight, 0.0);
            assert_eq!(state.valence, 0);
        }
    }

    #[test]
    fn test_single_word() {
        let state = sensor().feel("I am happy");
        assert_eq!(state.emotions(), &[Emotion::new(EmotionKind::Happiness, 0.9)]);
        assert_eq!(state.valence, 1);
        assert!(approx(state.general_weight, 0.8));
    }

    #[test]
    fn test_exclamation_amplifies() {
        let sensor = sensor();
        assert!(approx(sensor.feel("glad").happiness_weight(), 0.5));
        assert!(approx(sensor.feel("glad!!!").happiness_weight(), 0.8));
        // already strong weights clamp at 1.0
        assert!(approx(sensor.feel("happy!!!").happiness_weight(), 1.0));
        assert!(sensor.feel("happy!!!").happiness_weight() > sensor.feel("happy").happiness_weight());
    }

    #[test]
    fn test_negation_flips() {
        let state = sensor().feel("not happy");

        assert_eq!(state.valence, -1);
        assert_eq!(state.happiness_weight(), 0.0);
        assert!(approx(state.sadness_weight(), 0.9));
        assert!(approx(state.anger_weight(), 0.45));
        assert!(approx(state.fear_weight(), 0.45));
        assert!(approx(state.disgust_weight(), 0.45));

        let kinds: Vec<_> = state.emotions().iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                EmotionKind::Sadness,
                EmotionKind::Fear,
                EmotionKind::Anger,
                EmotionKind::Disgust
            ]
        );
    }

    #[test]
    fn test_negation_is_per_sentence() {
        let state = sensor().feel("I am not glad. I am happy");
        assert!(approx(state.happiness_weight(), 0.9));
        assert!(approx(state.sadness_weight(), 0.5));
        assert_eq!(state.valence, 0);
    }

    #[test]
    fn test_negation_matches_inside_words() {
        // "know" contains "no"
        let state = sensor().feel("I know I am glad");
        assert_eq!(state.valence, -1);
        assert_eq!(state.happiness_weight(), 0.0);
    }

    #[test]
    fn test_caps_lock_amplifies() {
        let sensor = sensor();
        assert!(approx(sensor.feel("GLAD").happiness_weight(), 0.75));
        assert!(approx(sensor.feel("HAPPY").happiness_weight(), 1.0));
        assert!(sensor.feel("HAPPY").happiness_weight() > sensor.feel("happy").happiness_weight());
    }

    #[test]
    fn test_intensity_modifier_is_case_sensitive() {
        let sensor = sensor();
        assert!(approx(sensor.feel("extremely glad").happiness_weight(), 0.75));
        assert!(approx(sensor.feel("Extremely glad").happiness_weight(), 0.5));
        // the modifier must immediately precede the word
        assert!(approx(sensor.feel("extremely very glad").happiness_weight(), 0.75));
        assert!(approx(sensor.feel("very much glad").happiness_weight(), 0.5));
    }

    #[test]
    fn test_emoticon_repetition() {
        let sensor = sensor();
        assert!(approx(sensor.feel(":)").happiness_weight(), 0.5));
        assert!(approx(sensor.feel(":)))").happiness_weight(), 0.8));
        assert!(approx(sensor.feel("so :DDDD").happiness_weight(), 1.0));
    }

    #[test]
    fn test_emoticon_repetition_and_exclamation_multiply() {
        let sensor = sensor();
        // (1.0 + 2 * 0.2) * (1.0 + 0.2) = 1.68
        let state = sensor.feel(":))!");
        assert!(approx(state.happiness_weight(), 0.84));
        assert!(approx(state.general_weight, 0.84));
        assert!(approx(sensor.feel(":)))!!").happiness_weight(), 1.0));
        assert!(approx(sensor.feel(":(!").sadness_weight(), 0.6));
    }

    #[test]
    fn test_emoticon_tokens_are_not_split() {
        let sensor = AffectSensor::new(Arc::new(Lexicon::from_parts(
            vec![AffectWord::new("d", 0.9, 0.0, 0.9, 0.0, 0.0, 0.0, 0.0)],
            vec![AffectWord::new(":D", 0.6, 0.6, 0.0, 0.0, 0.0, 0.0, 0.0)],
            Vec::<String>::new(),
            Vec::<String>::new(),
        )));
        let state = sensor.feel(":D");
        assert_eq!(state.sadness_weight(), 0.0);
        assert!(approx(state.happiness_weight(), 0.6));
    }

    #[test]
    fn test_punctuation_inside_tokens() {
        let sensor = sensor();
        assert!(approx(sensor.feel("(glad)").happiness_weight(), 0.5));
        assert!(approx(sensor.feel("well-being,").happiness_weight(), 0.4));
    }

    #[test]
    fn test_literal_escape_is_replaced() {
        let state = sensor().feel("glad\\ngross");
        assert_eq!(state.text, "glad gross");
        assert!(approx(state.happiness_weight(), 0.5));
        assert!(approx(state.disgust_weight(), 0.6));
    }

    #[test]
    fn test_strongest_word_wins_per_dimension() {
        let state = sensor().feel("I am glad. That is gross!");

        assert!(approx(state.happiness_weight(), 0.5));
        assert!(approx(state.disgust_weight(), 0.72));
        assert!(approx(state.anger_weight(), 0.24));
        assert!(approx(state.general_weight, 0.72));
        assert_eq!(state.valence, 0);
        assert_eq!(state.strongest_emotion().kind, EmotionKind::Disgust);
        assert_eq!(state.first_strongest(2)[1].kind, EmotionKind::Happiness);
    }

    #[test]
    fn test_emotions_ranked_strongest_first() {
        let state = sensor().feel("scared wow glad");
        let weights: Vec<_> = state.emotions().iter().map(|e| e.weight).collect();
        assert!(weights.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(state.strongest_emotion().kind, EmotionKind::Fear);
    }

    #[test]
    fn test_neutral_uses_general_weight() {
        let sensor = AffectSensor::new(Arc::new(Lexicon::from_parts(
            vec![AffectWord::new("meh", 0.4, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0)],
            vec![],
            Vec::<String>::new(),
            Vec::<String>::new(),
        )));
        let state = sensor.feel("meh");
        assert_eq!(state.strongest_emotion().kind, EmotionKind::Neutral);
        assert!(approx(state.strongest_emotion().weight, 0.5));
        assert!(approx(state.general_weight, 0.4));
    }

    #[test]
    fn test_negating_neutral_word_keeps_zero_valence() {
        let state = sensor().feel("not wow");
        assert_eq!(state.valence, 0);
        assert!(approx(state.surprise_weight(), 0.6));
    }

    #[test]
    fn test_valence_frozen_after_clamping() {
        // both weights clamp to 1.0 but the word keeps its positive valence
        let sensor = AffectSensor::new(Arc::new(Lexicon::from_parts(
            vec![AffectWord::new("bittersweet", 0.6, 0.9, 0.8, 0.0, 0.0, 0.0, 0.0)],
            vec![],
            Vec::<String>::new(),
            Vec::<String>::new(),
        )));
        let state = sensor.feel("BITTERSWEET!!");
        assert!(approx(state.happiness_weight(), 1.0));
        assert!(approx(state.sadness_weight(), 1.0));
        assert_eq!(state.valence, 1);
    }

    #[test]
    fn test_sense_returns_adjusted_words() {
        let words = sensor().sense("GLAD and scared");
        let names: Vec<_> = words.iter().map(|w| w.word()).collect();
        assert_eq!(names, vec!["glad", "scared"]);
        assert!(approx(words[0].happiness_weight(), 0.75));
    }

    #[test]
    fn test_sense_agrees_with_feel_on_literal_escape() {
        let sensor = sensor();
        let words = sensor.sense("glad\\ngross");
        let names: Vec<_> = words.iter().map(|w| w.word()).collect();
        assert_eq!(names, vec!["glad", "gross"]);

        let state = sensor.feel("glad\\ngross");
        let strongest_disgust = words
            .iter()
            .map(|w| w.disgust_weight())
            .fold(0.0_f64, f64::max);
        assert!(approx(state.disgust_weight(), strongest_disgust));
        assert!(approx(state.happiness_weight(), words[0].happiness_weight()));
    }

    #[test]
    fn test_equal_weights_rank_in_dimension_order() {
        let sensor = AffectSensor::new(Arc::new(Lexicon::from_parts(
            vec![AffectWord::new("mixed", 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5)],
            vec![],
            Vec::<String>::new(),
            Vec::<String>::new(),
        )));
        let state = sensor.feel("mixed");
        let kinds: Vec<_> = state.emotions().iter().map(|e| e.kind).collect();
        assert_eq!(kinds, EmotionKind::DIMENSIONS.to_vec());
    }

    #[test]
    fn test_feel_after_links_history() {
        let sensor = sensor();
        let first = Arc::new(sensor.feel("glad"));
        let second = sensor.feel_after("gross", &first);

        assert_eq!(second.previous().unwrap().text, "glad");
        assert!(sensor.feel("gross").previous().is_none());
    }

    #[test]
    fn test_concurrent_feel() {
        let sensor = sensor();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let sensor = sensor.clone();
                std::thread::spawn(move || sensor.feel("not happy!!").valence)
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), -1);
        }
        assert_eq!(sensor.lexicon().lookup_word("happy").unwrap().general_valence(), 1);
    }
}
