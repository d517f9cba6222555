use std::fmt;

use crate::error::Result;
use crate::model::generation_input::GenerationInput;
use crate::model::generator::Generator;
use crate::model::random_source::RandomSource;
use crate::text::prepare::{prepare, PrepareOptions};
use crate::text::stats::VisualReport;
use crate::text::stopwords::StopwordFilter;

/// Facade over a single document.
///
/// Each capability lives in its own component (stopword filter, text
/// preparation, statistics, generator); `TextCaret` only holds the text and
/// the shared stopword list and forwards to them.
///
/// Usage:
/// ```
/// use textcaret_core::TextCaret;
/// use textcaret_core::model::random_source::FixedIndex;
///
/// let caret = TextCaret::new("I love apples. John hates eating onions");
/// let report = caret.visual_report(10);
/// assert!(!report.word_length_curve.is_empty());
/// assert_eq!(caret.generate(3, &mut FixedIndex(0)).unwrap(), "I love apples..");
/// ```
#[derive(Debug, Clone)]
pub struct TextCaret {
	text: String,
	stopwords: StopwordFilter,
}

impl TextCaret {
	/// Wraps `text` with the English stopword list.
	pub fn new(text: impl Into<String>) -> Self {
		Self { text: text.into(), stopwords: StopwordFilter::default() }
	}

	/// Replaces the stopword list used by `prepare` and `visual_report`.
	pub fn with_stopwords(mut self, stopwords: StopwordFilter) -> Self {
		self.stopwords = stopwords;
		self
	}

	pub fn text(&self) -> &str {
		&self.text
	}

	pub fn stopwords(&self) -> &StopwordFilter {
		&self.stopwords
	}

	/// Cleans the held text in place and returns the result.
	pub fn prepare(&mut self, options: PrepareOptions) -> &str {
		self.text = prepare(&self.text, options, &self.stopwords);
		&self.text
	}

	/// Frequency tables and word-length curve of the held text.
	pub fn visual_report(&self, num: usize) -> VisualReport {
		VisualReport::new(&self.text, num, &self.stopwords)
	}

	/// Builds a generator over the held text.
	///
	/// # Errors
	/// Returns `ChainError::EmptyInput` if the text has fewer than two tokens.
	pub fn generator(&self) -> Result<Generator> {
		Generator::new(&self.text)
	}

	/// Generates a sentence of `word_count` words from the held text.
	pub fn generate<R: RandomSource + ?Sized>(&self, word_count: usize, rng: &mut R) -> Result<String> {
		let input = GenerationInput::new(word_count)?;
		self.generator()?.generate(&input, rng)
	}
}

impl fmt::Display for TextCaret {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.text)
	}
}
