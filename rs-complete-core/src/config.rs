use crate::error::{CompleteError, Result};

/// Boundary marker injected after every sentence-final word.
pub const DEFAULT_BOUNDARY: &str = "[]";

/// Initial number of slots of a token table (rounded up to a prime).
pub const DEFAULT_INITIAL_CAPACITY: usize = 101;

/// Settings used when building a model from text.
///
/// # Invariants
/// - `boundary` is non-empty and contains no whitespace, otherwise the
///   tokenizer could never produce it as a single token
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModelConfig {
	/// Token separating two sentences in the training stream.
	pub boundary: String,

	/// Starting capacity of the token table.
	pub initial_capacity: usize,
}

impl Default for ModelConfig {
	fn default() -> Self {
		Self {
			boundary: DEFAULT_BOUNDARY.to_owned(),
			initial_capacity: DEFAULT_INITIAL_CAPACITY,
		}
	}
}

impl ModelConfig {
	/// Checks the configuration.
	///
	/// # Errors
	/// Returns `InvalidConfig` if the boundary is empty or contains whitespace.
	pub fn validate(&self) -> Result<()> {
		if self.boundary.is_empty() {
			return Err(CompleteError::InvalidConfig("boundary marker cannot be empty".to_owned()));
		}
		if self.boundary.chars().any(char::is_whitespace) {
			return Err(CompleteError::InvalidConfig(format!(
				"boundary marker {:?} cannot contain whitespace",
				self.boundary
			)));
		}
		Ok(())
	}
}

/// Parameters of a single completion request.
///
/// Built with [`CompletionInput::default`] and adjusted through its fields
/// and setters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompletionInput {
	/// Maximum number of words to emit (0 = until a boundary is drawn).
	///
	/// Walks perform no cycle detection, so an unbounded walk on a corpus
	/// without boundaries may run for a long time.
	pub max_words: usize,

	/// Keep the first emitted token, which always equals the seed.
	pub echo_seed: bool,

	/// Seed of the random generator; `None` draws one from the OS.
	rng_seed: Option<u64>,
}

impl CompletionInput {
	/// Returns the configured random seed, if any.
	pub fn rng_seed(&self) -> Option<u64> {
		self.rng_seed
	}

	/// Makes completions reproducible.
	pub fn set_rng_seed(&mut self, seed: u64) {
		self.rng_seed = Some(seed);
	}

	/// Reverts to OS-seeded, independent completions.
	pub fn clear_rng_seed(&mut self) {
		self.rng_seed = None;
	}

	/// Sets the word cap.
	///
	/// # Errors
	/// Returns `InvalidConfig` if the cap is larger than `limit`, which the
	/// server uses to bound request cost.
	pub fn set_max_words(&mut self, max_words: usize, limit: usize) -> Result<()> {
		if max_words > limit {
			return Err(CompleteError::InvalidConfig(format!(
				"max_words must be at most {limit}, got {max_words}"
			)));
		}
		self.max_words = max_words;
		Ok(())
	}
}
