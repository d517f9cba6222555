use crate::error::{ChainError, Result};

/// Strategy used to select the first token of a generated sentence.
///
/// # Variants
/// - `Random`: pick a key of the chain uniformly at random.
/// - `Custom(String)`: start from the given token, which must be a key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StartToken {
	#[default]
	Random,
	Custom(String),
}

/// Input parameters of a generation.
///
/// # Invariants
/// - `word_count` is always >= 1
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationInput {
	/// Number of words of the sentence, trailing period excluded.
	word_count: usize,

	/// Extra attempts allowed when a walk ends in a dead end.
	/// `0` means a dead end is returned to the caller as is.
	pub max_retries: usize,

	/// How the first token is chosen.
	pub start: StartToken,
}

impl Default for GenerationInput {
	fn default() -> Self {
		Self {
			word_count: super::generator::DEFAULT_WORD_COUNT,
			max_retries: 0,
			start: StartToken::Random,
		}
	}
}

impl GenerationInput {
	/// Creates an input for `word_count` words with a random start and no retry.
	///
	/// # Errors
	/// Returns `ChainError::InvalidCount` if `word_count` is 0.
	pub fn new(word_count: usize) -> Result<Self> {
		let mut input = Self::default();
		input.set_word_count(word_count)?;
		Ok(input)
	}

	pub fn word_count(&self) -> usize {
		self.word_count
	}

	/// Sets the number of words to generate.
	///
	/// # Errors
	/// Returns `ChainError::InvalidCount` if `word_count` is 0.
	pub fn set_word_count(&mut self, word_count: usize) -> Result<()> {
		if word_count < 1 {
			return Err(ChainError::InvalidCount(word_count));
		}
		self.word_count = word_count;
		Ok(())
	}
}
