//! Stopword filtering
//!
//! Lists come from the `stop-words` crate; membership is case-insensitive.

use std::collections::HashSet;

use stop_words::{get, LANGUAGE};

/// A set of words ignored by frequency statistics and text preparation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopwordFilter {
	/// Lower-cased stopwords
	stopwords: HashSet<String>,
}

impl Default for StopwordFilter {
	fn default() -> Self {
		Self::new("en")
	}
}

impl StopwordFilter {
	/// Create a filter for the given language.
	///
	/// Unknown languages fall back to English.
	pub fn new(language: &str) -> Self {
		Self { stopwords: Self::load_stopwords(language) }
	}

	/// Create a filter from a custom list
	pub fn from_list(words: &[&str]) -> Self {
		Self { stopwords: words.iter().map(|w| w.to_lowercase()).collect() }
	}

	pub fn is_stopword(&self, word: &str) -> bool {
		self.stopwords.contains(&word.to_lowercase())
	}

	pub fn len(&self) -> usize {
		self.stopwords.len()
	}

	pub fn is_empty(&self) -> bool {
		self.stopwords.is_empty()
	}

	fn load_stopwords(language: &str) -> HashSet<String> {
		let lang = match language.to_lowercase().as_str() {
			"de" | "german" => LANGUAGE::German,
			"fr" | "french" => LANGUAGE::French,
			"es" | "spanish" => LANGUAGE::Spanish,
			"it" | "italian" => LANGUAGE::Italian,
			"pt" | "portuguese" => LANGUAGE::Portuguese,
			"nl" | "dutch" => LANGUAGE::Dutch,
			_ => LANGUAGE::English,
		};

		get(lang).iter().map(|s| s.to_lowercase()).collect()
	}
}
