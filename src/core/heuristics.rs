//! Surface-form amplifiers applied to affect words.
//!
//! Every function here is pure: the lexicon is passed in where a rule
//! depends on it.

use super::affect_word::AffectWord;
use super::lexicon::Lexicon;

const EXCLAMATION_STEP: f64 = 0.2;
const EMOTICON_STEP: f64 = 0.2;
const CAPS_LOCK_COEF: f64 = 1.5;
const MODIFIER_COEF: f64 = 1.5;

/// `1.0 + 0.2` per `!` in `text`.
pub fn exclamation_coef(text: &str) -> f64 {
    1.0 + EXCLAMATION_STEP * text.matches('!').count() as f64
}

/// 1.5 for shouted words such as "HAPPY", else 1.0.
pub fn caps_lock_coef(word: &str) -> f64 {
    if is_caps_lock(word) {
        CAPS_LOCK_COEF
    } else {
        1.0
    }
}

/// 1.5 when `previous_word` intensifies the next one ("extremely happy").
pub fn modifier_coef(lexicon: &Lexicon, previous_word: &str) -> f64 {
    if lexicon.is_intensity_modifier(previous_word) {
        MODIFIER_COEF
    } else {
        1.0
    }
}

/// For an emoticon matched by prefix, `1.0 + 0.2` per repetition of its
/// last character inside `token` (":DDDD" counts four `D`s).
pub fn emoticon_repeat_coef(token: &str, emoticon: &AffectWord) -> f64 {
    if !emoticon.starts_with_emoticon() {
        return 1.0;
    }
    match emoticon.word().chars().last() {
        Some(last) => 1.0 + EMOTICON_STEP * token.matches(last).count() as f64,
        None => 1.0,
    }
}

/// Product of the repetition coefficients of every emoticon in `sentence`.
pub fn emoticon_coef_for_sentence(lexicon: &Lexicon, sentence: &str) -> f64 {
    lexicon
        .emoticons_contained_in(sentence)
        .iter()
        .map(|emoticon| emoticon_repeat_coef(sentence, emoticon))
        .product()
}

fn is_caps_lock(word: &str) -> bool {
    word.chars().any(char::is_alphabetic) && word == word.to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::lexicon::tests::stub_lexicon;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_exclamation_coef() {
        assert!(approx(exclamation_coef("hello"), 1.0));
        assert!(approx(exclamation_coef("hello!!!"), 1.6));
        assert!(approx(exclamation_coef("!a!"), 1.4));
    }

    #[test]
    fn test_caps_lock_coef() {
        assert!(approx(caps_lock_coef("HAPPY"), 1.5));
        assert!(approx(caps_lock_coef("Happy"), 1.0));
        assert!(approx(caps_lock_coef("WELL-BEING"), 1.5));
        // no letters, not shouting
        assert!(approx(caps_lock_coef("123"), 1.0));
        assert!(approx(caps_lock_coef(""), 1.0));
    }

    #[test]
    fn test_modifier_coef() {
        let lexicon = stub_lexicon();
        assert!(approx(modifier_coef(&lexicon, "extremely"), 1.5));
        assert!(approx(modifier_coef(&lexicon, "Extremely"), 1.0));
        assert!(approx(modifier_coef(&lexicon, ""), 1.0));
    }

    #[test]
    fn test_emoticon_repeat_coef() {
        let lexicon = stub_lexicon();

        let prefix = lexicon.lookup_emoticon(":DDDD").unwrap();
        assert!(approx(emoticon_repeat_coef(":DDDD", &prefix), 1.8));

        let exact = lexicon.lookup_emoticon(":D").unwrap();
        assert!(approx(emoticon_repeat_coef(":D", &exact), 1.0));
    }

    #[test]
    fn test_emoticon_coef_for_sentence() {
        let lexicon = stub_lexicon();
        // ":)" -> two ')' => 1.4, ":(" -> one '(' => 1.2
        let coef = emoticon_coef_for_sentence(&lexicon, "ok :)) then :(");
        assert!(approx(coef, 1.4 * 1.2));
        assert!(approx(emoticon_coef_for_sentence(&lexicon, "nothing here"), 1.0));
    }
}
