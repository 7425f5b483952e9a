use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use crate::core::error::{LexiconLoadError, Result};
use crate::core::{AffectWord, Lexicon, LexiconProvider};

/// Scale applied to every weight read from a lexicon file.
pub const DEFAULT_NORMALISATION: f64 = 0.75;

pub const DEFAULT_NEGATIONS: &[&str] = &[
    "no", "not", "don't", "dont", "haven't", "weren't", "wasn't", "didn't",
];

pub const DEFAULT_INTENSITY_MODIFIERS: &[&str] = &[
    "very", "awfully", "dreadfully", "eminently", "exceedingly", "exceptionally",
    "extra", "extremely", "greatly", "highly", "most", "notably", "absolutely",
    "completely", "deeply", "emphatically", "great", "high", "hugely", "huge",
    "mighty", "much", "remarkably", "strikingly", "surpassingly", "terribly",
];

const BUILTIN_WORDS: &str = include_str!("../data/lexicon.txt");
const BUILTIN_EMOTICONS: &str = include_str!("../data/emoticons.txt");

const FIELDS: [&str; 7] = [
    "general", "happiness", "sadness", "anger", "fear", "disgust", "surprise",
];

static BUILTIN: OnceLock<std::result::Result<Arc<Lexicon>, String>> = OnceLock::new();

/// Parse lexicon records, one per line:
/// `word general happiness sadness anger fear disgust surprise`.
///
/// Blank lines and lines starting with `#` are skipped. Any malformed
/// record fails the whole parse.
pub fn parse_lexicon(source_name: &str, text: &str, normalisation: f64) -> Result<Vec<AffectWord>> {
    if !normalisation.is_finite() || normalisation <= 0.0 {
        return Err(LexiconLoadError::Normalisation(normalisation));
    }

    let mut words = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        words.push(parse_record(source_name, index + 1, line, normalisation)?);
    }
    Ok(words)
}

/// Read and parse a lexicon file.
pub fn read_lexicon_file(path: &Path, normalisation: f64) -> Result<Vec<AffectWord>> {
    let text = std::fs::read_to_string(path).map_err(|source| LexiconLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_lexicon(&path.display().to_string(), &text, normalisation)
}

fn parse_record(source_name: &str, line: usize, record: &str, normalisation: f64) -> Result<AffectWord> {
    let fields: Vec<&str> = record.split_whitespace().collect();
    if fields.len() != FIELDS.len() + 1 {
        return Err(LexiconLoadError::Parse {
            source_name: source_name.to_string(),
            line,
            reason: format!("expected {} fields, found {}", FIELDS.len() + 1, fields.len()),
        });
    }

    let word = fields[0];

    let mut weights = [0.0_f64; 7];
    for ((weight, raw), field) in weights.iter_mut().zip(&fields[1..]).zip(FIELDS) {
        let value: f64 = raw.parse().map_err(|_| LexiconLoadError::Parse {
            source_name: source_name.to_string(),
            line,
            reason: format!("{} weight '{}' is not a number", field, raw),
        })?;
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(LexiconLoadError::InvalidWeight {
                source_name: source_name.to_string(),
                line,
                field,
                value,
            });
        }
        *weight = value;
    }

    let [general, happiness, sadness, anger, fear, disgust, surprise] = weights;
    Ok(AffectWord::normalised(
        word,
        general,
        happiness,
        sadness,
        anger,
        fear,
        disgust,
        surprise,
        normalisation,
    ))
}

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

/// Lexicon read from a word file and an emoticon file on disk.
#[derive(Debug, Clone)]
pub struct FileLexicon {
    pub words_path: PathBuf,
    pub emoticons_path: PathBuf,
    pub normalisation: f64,
    pub negations: Vec<String>,
    pub intensity_modifiers: Vec<String>,
}

impl FileLexicon {
    /// File-backed provider with the default normalisation and keyword sets.
    pub fn new(words_path: impl Into<PathBuf>, emoticons_path: impl Into<PathBuf>) -> Self {
        Self {
            words_path: words_path.into(),
            emoticons_path: emoticons_path.into(),
            normalisation: DEFAULT_NORMALISATION,
            negations: owned(DEFAULT_NEGATIONS),
            intensity_modifiers: owned(DEFAULT_INTENSITY_MODIFIERS),
        }
    }
}

impl LexiconProvider for FileLexicon {
    fn affect_words(&self) -> Result<Vec<AffectWord>> {
        read_lexicon_file(&self.words_path, self.normalisation)
    }

    fn emoticons(&self) -> Result<Vec<AffectWord>> {
        read_lexicon_file(&self.emoticons_path, self.normalisation)
    }

    fn negations(&self) -> Result<Vec<String>> {
        Ok(self.negations.clone())
    }

    fn intensity_modifiers(&self) -> Result<Vec<String>> {
        Ok(self.intensity_modifiers.clone())
    }
}

/// The sample lexicon compiled into the crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinLexicon;

impl BuiltinLexicon {
    /// Process-wide built-in lexicon, parsed once on first use. Concurrent
    /// first callers block until the single build finishes.
    pub fn shared() -> Result<Arc<Lexicon>> {
        let built = BUILTIN.get_or_init(|| {
            Lexicon::from_provider(&BuiltinLexicon)
                .map(Arc::new)
                .map_err(|e| e.to_string())
        });
        match built {
            Ok(lexicon) => Ok(Arc::clone(lexicon)),
            Err(reason) => Err(LexiconLoadError::Builtin(reason.clone())),
        }
    }
}

impl LexiconProvider for BuiltinLexicon {
    fn affect_words(&self) -> Result<Vec<AffectWord>> {
        parse_lexicon("builtin:lexicon.txt", BUILTIN_WORDS, DEFAULT_NORMALISATION)
    }

    fn emoticons(&self) -> Result<Vec<AffectWord>> {
        parse_lexicon("builtin:emoticons.txt", BUILTIN_EMOTICONS, DEFAULT_NORMALISATION)
    }

    fn negations(&self) -> Result<Vec<String>> {
        Ok(owned(DEFAULT_NEGATIONS))
    }

    fn intensity_modifiers(&self) -> Result<Vec<String>> {
        Ok(owned(DEFAULT_INTENSITY_MODIFIERS))
    }
}
