use once_cell::sync::Lazy;
use regex::Regex;

use super::stopwords::StopwordFilter;

/// Anything that is neither an ASCII letter, a digit nor a space.
static SPECIAL_CHARACTERS: Lazy<Regex> = Lazy::new(|| {
	Regex::new(r"[^A-Za-z0-9 ]+").expect("special characters pattern is valid")
});

/// Cleanup steps applied by [`prepare`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrepareOptions {
	/// Drop every stopword.
	pub stopwords: bool,
	/// Drop every character that is not alphanumeric or a space.
	pub special_chars: bool,
}

/// Removes stopwords from `text`.
///
/// The text is split on whitespace and the remaining words are joined with
/// a single space, so line breaks and repeated spaces are collapsed.
pub fn remove_stopwords(text: &str, filter: &StopwordFilter) -> String {
	text.split_whitespace()
		.filter(|word| !filter.is_stopword(word))
		.collect::<Vec<_>>()
		.join(" ")
}

/// Removes every character that is not an ASCII letter, a digit or a space.
pub fn remove_special_characters(text: &str) -> String {
	SPECIAL_CHARACTERS.replace_all(text, "").into_owned()
}

/// Applies the cleanup steps selected in `options`, stopwords first.
pub fn prepare(text: &str, options: PrepareOptions, filter: &StopwordFilter) -> String {
	let mut prepared = text.to_owned();
	if options.stopwords {
		prepared = remove_stopwords(&prepared, filter);
	}
	if options.special_chars {
		prepared = remove_special_characters(&prepared);
	}
	prepared
}
