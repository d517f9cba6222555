use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use super::prepare::remove_stopwords;
use super::stopwords::StopwordFilter;

/// Number of entries kept in the frequency tables of a report by default.
pub const DEFAULT_TOP_TOKENS: usize = 10;

/// Token counter that remembers first-occurrence order.
///
/// Ties in `most_common` are broken by that order, so the output does not
/// depend on hashing.
#[derive(Debug, Default)]
struct Counter {
	index: HashMap<String, usize>,
	counts: Vec<(String, usize)>,
}

impl Counter {
	fn add(&mut self, token: &str) {
		match self.index.get(token) {
			Some(&position) => self.counts[position].1 += 1,
			None => {
				self.index.insert(token.to_owned(), self.counts.len());
				self.counts.push((token.to_owned(), 1));
			}
		}
	}

	/// Returns the `num` most frequent tokens, most frequent first.
	fn most_common(mut self, num: usize) -> Vec<(String, usize)> {
		// Stable sort keeps first-occurrence order between equal counts
		self.counts.sort_by(|a, b| b.1.cmp(&a.1));
		self.counts.truncate(num);
		self.counts
	}
}

/// Returns the `num` most frequent whitespace-separated tokens of `text`,
/// stopwords excluded.
pub fn most_common_tokens(text: &str, num: usize, filter: &StopwordFilter) -> Vec<(String, usize)> {
	let mut counter = Counter::default();
	for token in remove_stopwords(text, filter).split_whitespace() {
		counter.add(token);
	}
	counter.most_common(num)
}

/// Returns the `num` most frequent stopwords of `text`, lower-cased.
pub fn stopword_frequency(text: &str, num: usize, filter: &StopwordFilter) -> Vec<(String, usize)> {
	let mut counter = Counter::default();
	for token in text.split_whitespace() {
		if filter.is_stopword(token) {
			counter.add(&token.to_lowercase());
		}
	}
	counter.most_common(num)
}

/// Word-length distribution (Mendenhall curve) of `text`.
///
/// Each entry is `(length in characters, number of tokens)`, sorted by length.
pub fn word_length_curve(text: &str) -> Vec<(usize, usize)> {
	let mut lengths: BTreeMap<usize, usize> = BTreeMap::new();
	for token in text.split_whitespace() {
		*lengths.entry(token.chars().count()).or_insert(0) += 1;
	}
	lengths.into_iter().collect()
}

/// Data behind the visual report of a text.
///
/// Holds the series that would be plotted; rendering is left to the consumer.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct VisualReport {
	pub most_common_tokens: Vec<(String, usize)>,
	pub stopword_frequency: Vec<(String, usize)>,
	pub word_length_curve: Vec<(usize, usize)>,
}

impl VisualReport {
	/// Computes every series of the report, keeping `num` entries in the
	/// frequency tables.
	pub fn new(text: &str, num: usize, filter: &StopwordFilter) -> Self {
		Self {
			most_common_tokens: most_common_tokens(text, num, filter),
			stopword_frequency: stopword_frequency(text, num, filter),
			word_length_curve: word_length_curve(text),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	fn filter() -> StopwordFilter {
		StopwordFilter::from_list(&["the", "a", "on"])
	}

	fn pairs(items: &[(&str, usize)]) -> Vec<(String, usize)> {
		items.iter().map(|(t, c)| (t.to_string(), *c)).collect()
	}

	#[test]
	fn test_most_common_tokens() {
		let text = "the cat sat on the mat the cat ran to a mat dog";
		assert_eq!(
			most_common_tokens(text, 3, &filter()),
			pairs(&[("cat", 2), ("mat", 2), ("sat", 1)])
		);
		assert_eq!(most_common_tokens(text, 0, &filter()), Vec::new());
	}

	#[test]
	fn test_stopword_frequency() {
		let text = "The cat sat on the mat the cat ran to a mat";
		assert_eq!(
			stopword_frequency(text, 10, &filter()),
			pairs(&[("the", 3), ("on", 1), ("a", 1)])
		);
	}

	#[test]
	fn test_word_length_curve() {
		assert_eq!(word_length_curve("I love apples. I"), vec![(1, 2), (4, 1), (7, 1)]);
		assert_eq!(word_length_curve("   "), Vec::new());
	}

	#[test]
	fn test_report_serializes() {
		let report = VisualReport::new("the cat the dog", 5, &filter());
		let json = serde_json::to_value(&report).unwrap();
		assert_eq!(json["most_common_tokens"], serde_json::json!([["cat", 1], ["dog", 1]]));
		assert_eq!(json["stopword_frequency"], serde_json::json!([["the", 2]]));
		assert_eq!(json["word_length_curve"], serde_json::json!([[3, 4]]));
	}
}
