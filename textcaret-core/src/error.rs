use thiserror::Error;

pub type Result<T> = std::result::Result<T, ChainError>;

/// Failures raised while building a chain or walking it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChainError {
	/// The text held fewer than two space-separated tokens.
	#[error("Input must contain at least two tokens, got {0}")]
	EmptyInput(usize),

	/// The walk reached a token with no recorded successor.
	///
	/// `step` is the 1-based position of the word that could not be produced.
	#[error("Dead end at token {token:?}: no successor for word {step}")]
	DeadEnd { token: String, step: usize },

	#[error("Word count must be >= 1, got {0}")]
	InvalidCount(usize),

	#[error("Start token {0:?} is not part of the chain")]
	UnknownStartToken(String),

	#[error("Every generation attempt hit a dead end ({attempts} attempts)")]
	RetriesExhausted { attempts: usize },
}
