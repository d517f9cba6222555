//! Word-level Markov-chain text generation and text utilities.
//!
//! This crate provides:
//! - First-order word adjacency maps built from raw text
//! - Random-walk sentence generation with an injectable random source
//! - Text preparation (stopword and special-character removal)
//! - Frequency data behind a visual text report
//! - A `TextCaret` facade composing all of the above
//!
//! Internal details of the chain (successor storage, key ordering) are
//! kept private so every map upholds its invariants.

/// Adjacency maps, random sources and sequence generation.
pub mod model;

/// Stopwords, text preparation and frequency statistics.
pub mod text;

/// High-level facade over a single document.
pub mod caret;

/// Error taxonomy shared by the whole crate.
pub mod error;

pub use caret::TextCaret;
pub use error::{ChainError, Result};
pub use model::adjacency_map::{build_adjacency_map, AdjacencyMap};
pub use model::generator::{generate_sequence, generate_text, Generator, DEFAULT_WORD_COUNT};
pub use model::generation_input::{GenerationInput, StartToken};
pub use model::random_source::{FixedIndex, RandomSource, RngSource};
