//! Word-level Markov chain.
//!
//! - First-order adjacency maps (`AdjacencyMap`)
//! - Injectable randomness (`RandomSource`)
//! - Generation parameters (`GenerationInput`)
//! - Random-walk sentence generation (`Generator`)

/// Token adjacency built from raw text.
///
/// Each key maps to the ordered list of tokens that followed it,
/// duplicates included, so frequent transitions weigh more.
pub mod adjacency_map;

/// Index selection used by every random choice of the walk.
pub mod random_source;

/// Generation parameters: word count, start token, retry budget.
pub mod generation_input;

/// Random walk over an `AdjacencyMap`.
pub mod generator;
