use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

/// Source of the uniform index choices made during a random walk.
///
/// Generation never touches global random state: every call receives its
/// own source, which keeps runs reproducible under a fixed seed and lets
/// concurrent callers use independent generators.
///
/// Implemented for:
/// - closures `FnMut(usize) -> usize`
/// - `RngSource<R>` wrapping any `rand::Rng`
/// - `FixedIndex`, which always answers the same index
pub trait RandomSource {
	/// Returns an index in `0..len`.
	///
	/// Callers never pass `len == 0`.
	fn choose_index(&mut self, len: usize) -> usize;
}

impl<F: FnMut(usize) -> usize> RandomSource for F {
	fn choose_index(&mut self, len: usize) -> usize {
		self(len)
	}
}

/// Uniform index selection backed by a `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R>(R);

impl<R: Rng> RngSource<R> {
	pub fn new(rng: R) -> Self {
		Self(rng)
	}
}

impl RngSource<StdRng> {
	/// Deterministic source: the same seed always yields the same walk.
	pub fn seeded(seed: u64) -> Self {
		Self(StdRng::seed_from_u64(seed))
	}
}

impl RngSource<ThreadRng> {
	/// Source backed by the thread-local generator.
	pub fn thread() -> Self {
		Self(rand::rng())
	}
}

impl<R: Rng> RandomSource for RngSource<R> {
	fn choose_index(&mut self, len: usize) -> usize {
		self.0.random_range(0..len)
	}
}

/// Always picks the same index, clamped to the last valid position.
///
/// `FixedIndex(0)` walks the chain by always taking the first recorded
/// successor, which makes the output fully reproducible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixedIndex(pub usize);

impl RandomSource for FixedIndex {
	fn choose_index(&mut self, len: usize) -> usize {
		self.0.min(len.saturating_sub(1))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_seeded_source_is_reproducible() {
		let mut a = RngSource::seeded(42);
		let mut b = RngSource::seeded(42);
		let first: Vec<usize> = (0..32).map(|_| a.choose_index(10)).collect();
		let second: Vec<usize> = (0..32).map(|_| b.choose_index(10)).collect();
		assert_eq!(first, second);
		assert!(first.iter().all(|i| *i < 10));
	}

	#[test]
	fn test_thread_source_stays_in_range() {
		let mut rng = RngSource::thread();
		for len in 1..20 {
			assert!(rng.choose_index(len) < len);
		}
	}

	#[test]
	fn test_fixed_index_is_clamped() {
		assert_eq!(FixedIndex(0).choose_index(3), 0);
		assert_eq!(FixedIndex(7).choose_index(3), 2);
	}

	#[test]
	fn test_closure_source() {
		let mut calls = Vec::new();
		let mut source = |len: usize| {
			calls.push(len);
			len - 1
		};
		assert_eq!(source.choose_index(4), 3);
		assert_eq!(source.choose_index(1), 0);
		assert_eq!(calls, vec![4, 1]);
	}
}
