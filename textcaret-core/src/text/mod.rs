//! Text utilities used around the chain.
//!
//! - Stopword lists (`StopwordFilter`)
//! - Cleanup before analysis or generation (`prepare`)
//! - Frequency data of the visual report (`stats`)

pub mod stopwords;

/// Stopword and special-character removal.
pub mod prepare;

/// Token frequencies and word-length distribution.
pub mod stats;
