use log::{debug, warn};

use crate::error::{ChainError, Result};
use super::adjacency_map::AdjacencyMap;
use super::generation_input::{GenerationInput, StartToken};
use super::random_source::{RandomSource, RngSource};

/// Number of words produced by `generate_text` callers that have no preference.
pub const DEFAULT_WORD_COUNT: usize = 15;

/// Generates a sentence of `word_count` words by randomly walking `map`.
///
/// # Behavior
/// - Picks a uniformly random key as the first word, upper-cases its
///   first character and lower-cases the rest of it.
/// - Appends `word_count - 1` words, each sampled uniformly from the
///   successor list of the previous one.
/// - Ends the sentence with a literal `.`, even if the last token already
///   carries punctuation.
///
/// # Errors
/// - `ChainError::InvalidCount` if `word_count` is 0.
/// - `ChainError::EmptyInput` if the map has no key.
/// - `ChainError::DeadEnd` if the walk reaches a token without successor
///   before `word_count` words are produced.
pub fn generate_sequence<R: RandomSource + ?Sized>(
	map: &AdjacencyMap,
	word_count: usize,
	rng: &mut R,
) -> Result<String> {
	walk(map, word_count, None, rng)
}

/// Builds the adjacency map of `text` and generates a sentence from it,
/// using the thread-local random generator.
///
/// # Errors
/// See [`AdjacencyMap::build`] and [`generate_sequence`].
pub fn generate_text(text: &str, word_count: usize) -> Result<String> {
	let map = AdjacencyMap::build(text)?;
	generate_sequence(&map, word_count, &mut RngSource::thread())
}

/// Single walk over the chain.
///
/// `start` forces the first token instead of drawing one.
fn walk<'a, R: RandomSource + ?Sized>(
	map: &'a AdjacencyMap,
	word_count: usize,
	start: Option<&'a str>,
	rng: &mut R,
) -> Result<String> {
	if word_count < 1 {
		return Err(ChainError::InvalidCount(word_count));
	}

	let mut current = match start {
		Some(token) if map.contains(token) => token,
		Some(token) => return Err(ChainError::UnknownStartToken(token.to_owned())),
		None => map.random_key(rng).ok_or(ChainError::EmptyInput(0))?,
	};

	let mut sentence = capitalize(current);
	for step in 2..=word_count {
		let next = map.next_token(current, rng).ok_or_else(|| ChainError::DeadEnd {
			token: current.to_owned(),
			step,
		})?;
		sentence.push(' ');
		sentence.push_str(next);
		current = next;
	}

	sentence.push('.');
	Ok(sentence)
}

/// Upper-cases the first character and lower-cases the rest.
fn capitalize(token: &str) -> String {
	let mut chars = token.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
		None => String::new(),
	}
}

/// High-level generator owning the chain of one or more texts.
///
/// # Responsibilities
/// - Build and hold an `AdjacencyMap`
/// - Generate sentences according to a `GenerationInput`
/// - Restart from a new random token when a walk hits a dead end, within
///   the retry budget of the input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generator {
	map: AdjacencyMap,
}

impl Generator {
	/// Creates a generator from a single text.
	///
	/// # Errors
	/// Returns `ChainError::EmptyInput` if the text has fewer than two tokens.
	pub fn new(text: &str) -> Result<Self> {
		Ok(Self { map: AdjacencyMap::build(text)? })
	}

	/// Creates a generator from several independent texts.
	///
	/// Each text is chained on its own, then the maps are merged; the last
	/// token of a text never leads to the first token of the next one.
	///
	/// # Errors
	/// - `ChainError::EmptyInput(0)` if `texts` is empty.
	/// - The first error raised while building one of the texts.
	pub fn from_texts<I, S>(texts: I) -> Result<Self>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut merged: Option<AdjacencyMap> = None;
		for text in texts {
			let map = AdjacencyMap::build(text.as_ref())?;
			match merged.as_mut() {
				Some(existing) => existing.merge(&map),
				None => merged = Some(map),
			}
		}

		match merged {
			Some(map) => Ok(Self { map }),
			None => Err(ChainError::EmptyInput(0)),
		}
	}

	/// Returns the underlying chain.
	pub fn map(&self) -> &AdjacencyMap {
		&self.map
	}

	/// Creates a `GenerationInput` with default values
	/// (`DEFAULT_WORD_COUNT` words, random start, no retry).
	pub fn make_generation_input(&self) -> GenerationInput {
		GenerationInput::default()
	}

	/// Generates a sentence according to `input`.
	///
	/// # Behavior
	/// - The first attempt starts from `input.start`.
	/// - When an attempt hits a dead end and `input.max_retries > 0`, a new
	///   attempt starts from a random key, up to `max_retries` extra attempts.
	///
	/// # Errors
	/// - `ChainError::UnknownStartToken` if a custom start is not a key.
	/// - `ChainError::DeadEnd` if `max_retries` is 0 and the walk dead-ends.
	/// - `ChainError::RetriesExhausted` if every allowed attempt dead-ends.
	pub fn generate<R: RandomSource + ?Sized>(&self, input: &GenerationInput, rng: &mut R) -> Result<String> {
		let mut start = match &input.start {
			StartToken::Random => None,
			StartToken::Custom(token) => Some(token.as_str()),
		};

		let mut attempts = 0;
		loop {
			attempts += 1;
			match walk(&self.map, input.word_count(), start, rng) {
				Err(ChainError::DeadEnd { token, step }) if input.max_retries > 0 => {
					if attempts > input.max_retries {
						return Err(ChainError::RetriesExhausted { attempts });
					}
					warn!("Dead end at {token:?} (word {step}), retrying ({attempts}/{})", input.max_retries);
					start = None;
				}
				result => {
					debug!("Generation finished after {attempts} attempt(s)");
					return result;
				}
			}
		}
	}

	/// Merges the chain of another generator into this one.
	pub fn merge(&mut self, other: &Self) {
		self.map.merge(&other.map);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::adjacency_map::build_adjacency_map;
	use crate::model::random_source::FixedIndex;
	use pretty_assertions::assert_eq;

	const SCENARIO: &str = "I love apples. John hates eating onions without using a mint afterwards";

	fn word_count(sentence: &str) -> usize {
		sentence.strip_suffix('.').unwrap().split(' ').count()
	}

	#[test]
	fn test_scenario_with_forced_start() {
		let generator = Generator::new(SCENARIO).unwrap();
		let map = generator.map();
		assert_eq!(map.successors("I").unwrap(), ["love".to_owned()].as_slice());
		assert_eq!(map.successors("apples.").unwrap(), ["John".to_owned()].as_slice());

		let mut input = GenerationInput::new(3).unwrap();
		input.start = StartToken::Custom("I".to_owned());
		assert_eq!(generator.generate(&input, &mut FixedIndex(0)).unwrap(), "I love apples..");
	}

	#[test]
	fn test_first_index_is_reproducible() {
		let map = build_adjacency_map(SCENARIO).unwrap();
		let first = generate_sequence(&map, 3, &mut FixedIndex(0)).unwrap();
		let second = generate_sequence(&map, 3, &mut FixedIndex(0)).unwrap();
		assert_eq!(first, "I love apples..");
		assert_eq!(first, second);
	}

	#[test]
	fn test_seeded_generation_is_reproducible() {
		let map = build_adjacency_map("the cat sat on the mat and the cat ran to the mat").unwrap();
		let first = generate_sequence(&map, 4, &mut RngSource::seeded(7));
		let second = generate_sequence(&map, 4, &mut RngSource::seeded(7));
		assert_eq!(first, second);
	}

	#[test]
	fn test_word_count_is_exact() {
		let map = build_adjacency_map("a b c a b a c").unwrap();
		let mut rng = RngSource::seeded(3);
		for count in 1..40 {
			let sentence = generate_sequence(&map, count, &mut rng).unwrap();
			assert_eq!(word_count(&sentence), count, "{sentence}");
			assert!(sentence.ends_with('.'));
		}
	}

	#[test]
	fn test_capitalize_lowers_the_rest_of_the_first_word() {
		let map = build_adjacency_map("iPhone cases iPhone").unwrap();
		assert_eq!(generate_sequence(&map, 2, &mut FixedIndex(0)).unwrap(), "Iphone cases.");

		// Only the first word is touched
		let map = build_adjacency_map("NASA rocks HARD").unwrap();
		assert_eq!(generate_sequence(&map, 2, &mut FixedIndex(0)).unwrap(), "Nasa rocks.");
		assert_eq!(generate_sequence(&map, 2, &mut FixedIndex(1)).unwrap(), "Rocks HARD.");

		let map = build_adjacency_map("über alles über").unwrap();
		assert_eq!(generate_sequence(&map, 1, &mut FixedIndex(0)).unwrap(), "Über.");
	}

	#[test]
	fn test_dead_end() {
		let map = build_adjacency_map("x y").unwrap();
		assert_eq!(
			generate_sequence(&map, 5, &mut FixedIndex(0)),
			Err(ChainError::DeadEnd { token: "y".to_owned(), step: 3 })
		);
		// A single word never needs a successor
		assert_eq!(generate_sequence(&map, 1, &mut FixedIndex(0)).unwrap(), "X.");
	}

	#[test]
	fn test_invalid_count_and_empty_map() {
		let map = build_adjacency_map("x y").unwrap();
		assert_eq!(generate_sequence(&map, 0, &mut FixedIndex(0)), Err(ChainError::InvalidCount(0)));
		assert_eq!(
			generate_sequence(&AdjacencyMap::default(), 3, &mut FixedIndex(0)),
			Err(ChainError::EmptyInput(0))
		);
	}

	#[test]
	fn test_unknown_start_token() {
		let generator = Generator::new("x y z").unwrap();
		let mut input = GenerationInput::new(2).unwrap();
		input.start = StartToken::Custom("z".to_owned());
		assert_eq!(
			generator.generate(&input, &mut FixedIndex(0)),
			Err(ChainError::UnknownStartToken("z".to_owned()))
		);
	}

	#[test]
	fn test_retry_restarts_from_random_key() {
		let generator = Generator::new("x y z").unwrap();
		let mut input = GenerationInput::new(3).unwrap();

		// First walk starts at "y" and dies at "z", second one starts at "x"
		let mut script = vec![1usize, 0, 0, 0, 0].into_iter();
		let mut rng = move |_: usize| script.next().unwrap_or(0);
		input.max_retries = 1;
		assert_eq!(generator.generate(&input, &mut rng).unwrap(), "X y z.");

		input.max_retries = 0;
		assert_eq!(
			generator.generate(&input, &mut |len: usize| len - 1),
			Err(ChainError::DeadEnd { token: "z".to_owned(), step: 3 })
		);
	}

	#[test]
	fn test_custom_start_falls_back_to_random_start() {
		let generator = Generator::new("x y z").unwrap();
		let mut input = GenerationInput::new(3).unwrap();
		input.start = StartToken::Custom("y".to_owned());
		input.max_retries = 1;
		assert_eq!(generator.generate(&input, &mut FixedIndex(0)).unwrap(), "X y z.");
	}

	#[test]
	fn test_retries_exhausted() {
		let generator = Generator::new("x y").unwrap();
		let mut input = GenerationInput::new(3).unwrap();
		input.max_retries = 2;
		assert_eq!(
			generator.generate(&input, &mut RngSource::seeded(1)),
			Err(ChainError::RetriesExhausted { attempts: 3 })
		);
	}

	#[test]
	fn test_frequent_transitions_are_sampled_more() {
		let map = build_adjacency_map("x y x y x z").unwrap();
		let mut rng = RngSource::seeded(11);
		let mut y = 0;
		for _ in 0..3000 {
			if map.next_token("x", &mut rng) == Some("y") {
				y += 1;
			}
		}
		assert!((1800..2200).contains(&y), "{y}");
	}

	#[test]
	fn test_from_texts() {
		let generator = Generator::from_texts(["a b", "b c"]).unwrap();
		assert_eq!(generator.map().keys().collect::<Vec<_>>(), vec!["a", "b"]);
		assert_eq!(
			generator.generate(&GenerationInput::new(3).unwrap(), &mut FixedIndex(0)).unwrap(),
			"A b c."
		);

		let empty: [&str; 0] = [];
		assert_eq!(Generator::from_texts(empty), Err(ChainError::EmptyInput(0)));
		assert_eq!(Generator::from_texts(["a b", "alone"]), Err(ChainError::EmptyInput(1)));
	}

	#[test]
	fn test_merge_generators() {
		let mut generator = Generator::new("a b").unwrap();
		generator.merge(&Generator::new("b c").unwrap());
		assert_eq!(generator, Generator::from_texts(["a b", "b c"]).unwrap());
	}

	#[test]
	fn test_generate_text() {
		let sentence = generate_text("a b a", 4).unwrap();
		assert_eq!(word_count(&sentence), 4);
		assert!(sentence.starts_with('A') || sentence.starts_with('B'), "{sentence}");

		assert_eq!(generate_text("onlyoneword", DEFAULT_WORD_COUNT), Err(ChainError::EmptyInput(1)));
	}
}
