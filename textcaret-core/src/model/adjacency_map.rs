use std::collections::{HashMap, HashSet};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{ChainError, Result};
use super::random_source::RandomSource;

/// First-order word adjacency of a text.
///
/// Conceptually, each key is a node of a Markov chain and its successor list
/// holds one entry per observed outgoing transition. A token that followed
/// the key three times appears three times, which makes uniform sampling over
/// the list proportional to the observed frequency.
///
/// ## Invariants
/// - Every key has a non-empty successor list
/// - Successors are stored in source order
/// - `keys` lists every key exactly once, in first-occurrence order
///
/// Deserialization goes through the same checks and rejects any map that
/// breaks them.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(try_from = "UncheckedAdjacencyMap")]
pub struct AdjacencyMap {
	/// Keys in the order they were first seen as a predecessor.
	keys: Vec<String>,
	/// Observed successors of each key.
	/// Example: { "a" => ["b", "c"], "b" => ["a"] }
	successors: HashMap<String, Vec<String>>,
}

/// Serialized form of an `AdjacencyMap`, before validation.
#[derive(Deserialize)]
struct UncheckedAdjacencyMap {
	keys: Vec<String>,
	successors: HashMap<String, Vec<String>>,
}

impl TryFrom<UncheckedAdjacencyMap> for AdjacencyMap {
	type Error = String;

	fn try_from(raw: UncheckedAdjacencyMap) -> std::result::Result<Self, Self::Error> {
		let mut seen = HashSet::new();
		for key in &raw.keys {
			if !seen.insert(key.as_str()) {
				return Err(format!("Duplicate key {key:?}"));
			}
			match raw.successors.get(key) {
				None => return Err(format!("Key {key:?} has no successor list")),
				Some(list) if list.is_empty() => return Err(format!("Key {key:?} has an empty successor list")),
				Some(_) => (),
			}
		}
		// Every listed key is present and unique, so equal sizes means no extra entry
		if raw.successors.len() != raw.keys.len() {
			return Err("Successor lists found for unlisted keys".to_owned());
		}

		Ok(Self { keys: raw.keys, successors: raw.successors })
	}
}

/// Returns the entry at the index drawn by `rng`.
///
/// `items` must not be empty. An index past the end is a broken
/// `RandomSource`: it panics in debug builds and is clamped otherwise.
fn pick<'a, R: RandomSource + ?Sized>(items: &'a [String], rng: &mut R) -> &'a str {
	let index = rng.choose_index(items.len());
	debug_assert!(index < items.len(), "random index {index} out of range 0..{}", items.len());
	&items[index.min(items.len() - 1)]
}

/// Builds the adjacency map of `text`.
///
/// Shorthand for [`AdjacencyMap::build`].
pub fn build_adjacency_map(text: &str) -> Result<AdjacencyMap> {
	AdjacencyMap::build(text)
}

impl AdjacencyMap {
	/// Builds the adjacency map of `text`.
	///
	/// Tokens are obtained by splitting on the single space character only.
	/// Punctuation and case are kept, so `"apples."` and `"apples"` are
	/// distinct tokens, and two consecutive spaces produce an empty token.
	///
	/// # Errors
	/// Returns `ChainError::EmptyInput` if the text has fewer than two tokens.
	pub fn build(text: &str) -> Result<Self> {
		let tokens: Vec<&str> = text.split(' ').collect();
		if tokens.len() < 2 {
			return Err(ChainError::EmptyInput(tokens.len()));
		}

		let mut map = Self::default();
		for pair in tokens.windows(2) {
			map.add_transition(pair[0], pair[1]);
		}

		debug!("Built adjacency map: {} tokens, {} keys", tokens.len(), map.len());
		Ok(map)
	}

	/// Records one occurrence of `current -> next`.
	fn add_transition(&mut self, current: &str, next: &str) {
		match self.successors.get_mut(current) {
			Some(list) => list.push(next.to_owned()),
			None => {
				self.keys.push(current.to_owned());
				self.successors.insert(current.to_owned(), vec![next.to_owned()]);
			}
		}
	}

	/// Number of distinct keys.
	pub fn len(&self) -> usize {
		self.keys.len()
	}

	pub fn is_empty(&self) -> bool {
		self.keys.is_empty()
	}

	/// Keys in first-occurrence order.
	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.keys.iter().map(String::as_str)
	}

	pub fn contains(&self, token: &str) -> bool {
		self.successors.contains_key(token)
	}

	/// Returns the recorded successors of `token`, in source order.
	///
	/// Returns `None` if the token was never observed as a predecessor.
	pub fn successors(&self, token: &str) -> Option<&[String]> {
		self.successors.get(token).map(Vec::as_slice)
	}

	/// Picks a key uniformly at random.
	///
	/// Returns `None` if the map is empty.
	pub fn random_key<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Option<&str> {
		if self.keys.is_empty() {
			return None;
		}
		Some(pick(&self.keys, rng))
	}

	/// Picks the next token after `token` by uniform sampling over its
	/// successor list.
	///
	/// Returns `None` if the token has no recorded successor.
	pub fn next_token<R: RandomSource + ?Sized>(&self, token: &str, rng: &mut R) -> Option<&str> {
		let list = self.successors.get(token)?;
		if list.is_empty() {
			return None;
		}
		Some(pick(list, rng))
	}

	/// Merges another map into this one.
	///
	/// Successors of shared keys are appended after the existing ones, new
	/// keys are added after the existing keys. No transition is created
	/// between the last token of one text and the first token of the other.
	pub fn merge(&mut self, other: &Self) {
		for key in &other.keys {
			let Some(list) = other.successors.get(key) else { continue };
			match self.successors.get_mut(key) {
				Some(existing) => existing.extend(list.iter().cloned()),
				None => {
					self.keys.push(key.clone());
					self.successors.insert(key.clone(), list.clone());
				}
			}
		}
	}
}
