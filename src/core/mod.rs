pub mod affect_word;
pub mod emotion;
pub mod error;
pub mod heuristics;
pub mod lexicon;
pub mod sensor;
pub mod state;

pub use affect_word::AffectWord;
pub use emotion::{Emotion, EmotionKind};
pub use error::{LexiconLoadError, Result};
pub use lexicon::{Lexicon, LexiconProvider};
pub use sensor::AffectSensor;
pub use state::EmotionalState;
