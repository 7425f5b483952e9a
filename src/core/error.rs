use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LexiconLoadError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{source_name}:{line}: {reason}")]
    Parse {
        source_name: String,
        line: usize,
        reason: String,
    },

    #[error("{source_name}:{line}: {field} weight {value} is outside [0, 1]")]
    InvalidWeight {
        source_name: String,
        line: usize,
        field: &'static str,
        value: f64,
    },

    #[error("Invalid normalisation factor: {0}")]
    Normalisation(f64),

    #[error("Built-in lexicon failed to load: {0}")]
    Builtin(String),
}

pub type Result<T> = std::result::Result<T, LexiconLoadError>;
