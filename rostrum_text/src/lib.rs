//! Text analysis core: emotion categories, the NRC word-level lexicon,
//! stopword filtering, punctuation-aware tokenization and the emotion
//! scorer. Everything in this crate is a pure computation over its inputs;
//! file reading and rendering live in the `rostrum` binary.

pub mod emotion;
pub mod lexicon;
pub mod score;
pub mod stem;
pub mod stopwords;
pub mod tokenize;

pub use emotion::Emotion;
pub use lexicon::{Lexicon, LexiconError};
pub use score::{score, score_tokens, ScoreRecord};
pub use stopwords::Stopwords;
