use std::collections::{HashMap, HashSet};

use super::affect_word::AffectWord;
use super::error::Result;

/// Source of the four tables a [`Lexicon`] is built from.
///
/// Implementations must fail with a `LexiconLoadError` rather than return
/// partial tables.
pub trait LexiconProvider {
    fn affect_words(&self) -> Result<Vec<AffectWord>>;
    fn emoticons(&self) -> Result<Vec<AffectWord>>;
    fn negations(&self) -> Result<Vec<String>>;
    fn intensity_modifiers(&self) -> Result<Vec<String>>;
}

/// Emoticon entry with its lowercased glyph, for case-insensitive matching.
#[derive(Debug, Clone)]
struct EmoticonEntry {
    key: String,
    word: AffectWord,
}

/// Immutable word, emoticon, negation and modifier tables.
///
/// Every lookup returns an owned copy, so a `Lexicon` can be shared across
/// threads behind an `Arc` without locking.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    words: Vec<AffectWord>,
    index: HashMap<String, usize>,
    emoticons: Vec<EmoticonEntry>,
    negations: Vec<String>,
    intensity_modifiers: HashSet<String>,
}

impl Lexicon {
    /// Build a lexicon by draining a provider.
    pub fn from_provider(provider: &dyn LexiconProvider) -> Result<Self> {
        let lexicon = Self::from_parts(
            provider.affect_words()?,
            provider.emoticons()?,
            provider.negations()?,
            provider.intensity_modifiers()?,
        );

        tracing::info!(
            words = lexicon.words.len(),
            emoticons = lexicon.emoticons.len(),
            negations = lexicon.negations.len(),
            modifiers = lexicon.intensity_modifiers.len(),
            "Lexicon loaded"
        );

        Ok(lexicon)
    }

    /// Build a lexicon from in-memory tables.
    ///
    /// When a word appears twice, the first record wins.
    pub fn from_parts<N, M>(
        words: Vec<AffectWord>,
        emoticons: Vec<AffectWord>,
        negations: N,
        intensity_modifiers: M,
    ) -> Self
    where
        N: IntoIterator,
        N::Item: Into<String>,
        M: IntoIterator,
        M::Item: Into<String>,
    {
        let mut index = HashMap::with_capacity(words.len());
        for (position, word) in words.iter().enumerate() {
            index.entry(word.word().to_lowercase()).or_insert(position);
        }

        let emoticons = emoticons
            .into_iter()
            .filter(|word| !word.word().is_empty())
            .map(|word| EmoticonEntry {
                key: word.word().to_lowercase(),
                word,
            })
            .collect();

        let negations = negations
            .into_iter()
            .map(|n| Into::<String>::into(n).to_lowercase())
            .filter(|n| !n.is_empty())
            .collect();

        Self {
            words,
            index,
            emoticons,
            negations,
            intensity_modifiers: intensity_modifiers
                .into_iter()
                .map(|m| Into::<String>::into(m))
                .collect(),
        }
    }

    /// A lexicon with no entries. Every lookup misses.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Case-insensitive exact match against the word table.
    pub fn lookup_word(&self, word: &str) -> Option<AffectWord> {
        self.index
            .get(&word.to_lowercase())
            .map(|&position| self.words[position].clone())
    }

    /// Exact (case-insensitive) emoticon match, else the first emoticon the
    /// token starts with. Prefix hits come back marked as starting with an
    /// emoticon.
    pub fn lookup_emoticon(&self, token: &str) -> Option<AffectWord> {
        let token = token.to_lowercase();

        if let Some(entry) = self.emoticons.iter().find(|e| e.key == token) {
            return Some(entry.word.clone());
        }

        self.emoticons
            .iter()
            .find(|e| token.starts_with(&e.key))
            .map(|entry| {
                let mut word = entry.word.clone();
                word.set_starts_with_emoticon(true);
                word
            })
    }

    /// Every emoticon appearing anywhere in `sentence`.
    pub fn emoticons_contained_in(&self, sentence: &str) -> Vec<AffectWord> {
        let sentence = sentence.to_lowercase();
        self.emoticons
            .iter()
            .filter(|e| sentence.contains(&e.key))
            .map(|entry| {
                let mut word = entry.word.clone();
                word.set_starts_with_emoticon(true);
                word
            })
            .collect()
    }

    /// True if any negation word occurs as a substring of `sentence`.
    ///
    /// Substring matching means "no" also fires inside "know".
    pub fn contains_negation(&self, sentence: &str) -> bool {
        let sentence = sentence.to_lowercase();
        self.negations.iter().any(|n| sentence.contains(n.as_str()))
    }

    pub fn is_negation(&self, word: &str) -> bool {
        self.negations.iter().any(|n| n == word)
    }

    /// Case-sensitive membership in the modifier set.
    pub fn is_intensity_modifier(&self, word: &str) -> bool {
        self.intensity_modifiers.contains(word)
    }

    pub fn affect_words(&self) -> &[AffectWord] {
        &self.words
    }

    pub fn emoticons(&self) -> impl Iterator<Item = &AffectWord> {
        self.emoticons.iter().map(|e| &e.word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
