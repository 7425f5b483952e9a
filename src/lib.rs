//! Lexicon-based emotion sensing for short informal text.
//!
//! ```no_run
//! use empathyscope::{AffectSensor, BuiltinLexicon, Lexicon};
//! use std::sync::Arc;
//!
//! let lexicon = Arc::new(Lexicon::from_provider(&BuiltinLexicon)?);
//! let sensor = AffectSensor::new(lexicon);
//! let state = sensor.feel("I am SO happy today!!! :DDD");
//! println!("{}", state.strongest_emotion());
//! # Ok::<(), empathyscope::LexiconLoadError>(())
//! ```

pub mod config;
pub mod core;
pub mod loader;

pub use crate::core::{
    AffectSensor, AffectWord, Emotion, EmotionKind, EmotionalState, Lexicon, LexiconLoadError,
    LexiconProvider,
};
pub use loader::{BuiltinLexicon, FileLexicon};
