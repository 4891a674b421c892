use std::path::Path;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

use crate::config::{CompletionInput, ModelConfig};
use crate::corpus::{self, Corpus};
use crate::error::Result;
use super::token_table::TokenTable;

/// Completes typed sentences from a word-level Markov chain.
///
/// # Responsibilities
/// - Train and extend the chain from files, folders or token streams
/// - Pick the walk seed from a typed line
/// - Shape the walk into a completion (echo removal, word cap)
#[derive(Clone, Debug)]
pub struct SentenceCompleter {
	table: TokenTable<String>,
	config: ModelConfig,
	sources: Vec<String>,
}

/// Size of the trained chain.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct ModelStats {
	/// Distinct tokens stored.
	pub tokens: usize,
	/// Slots of the token table.
	pub capacity: usize,
	/// Names of the corpora learned so far, in order.
	pub sources: Vec<String>,
}

/// Result of a completion request.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Completion {
	/// Seed extracted from the typed line, if any.
	pub seed: Option<String>,
	/// Generated words, the seed excluded unless echo was requested.
	pub words: Vec<String>,
}

impl Completion {
	/// Words joined by single spaces.
	pub fn text(&self) -> String {
		self.words.join(" ")
	}
}

impl SentenceCompleter {
	/// Creates an untrained completer.
	///
	/// # Errors
	/// Returns `InvalidConfig` if `config` is rejected by [`ModelConfig::validate`].
	pub fn new(config: ModelConfig) -> Result<Self> {
		config.validate()?;
		Ok(Self {
			table: TokenTable::with_hasher(config.initial_capacity, Default::default()),
			config,
			sources: Vec::new(),
		})
	}

	/// Creates a completer trained on an already tokenized stream.
	pub fn from_tokens<I>(tokens: I, config: ModelConfig) -> Result<Self>
	where
		I: IntoIterator<Item = String>,
	{
		let mut completer = Self::new(config)?;
		completer.learn_tokens(tokens);
		Ok(completer)
	}

	/// Creates a completer trained on one text file.
	pub fn from_file<P: AsRef<Path>>(path: P, config: ModelConfig) -> Result<Self> {
		let mut completer = Self::new(config)?;
		completer.learn_file(path)?;
		Ok(completer)
	}

	/// Creates a completer trained on every `*.extension` file of a folder.
	pub fn from_folder<P: AsRef<Path>>(dir: P, extension: &str, config: ModelConfig) -> Result<Self> {
		let mut completer = Self::new(config)?;
		for corpus in corpus::load_folder(dir, extension, &completer.config.boundary)? {
			completer.learn_corpus(corpus);
		}
		Ok(completer)
	}

	/// Extends the chain with a token stream.
	pub fn learn_tokens<I>(&mut self, tokens: I)
	where
		I: IntoIterator<Item = String>,
	{
		self.table.learn(tokens, self.config.boundary.as_str());
	}

	/// Extends the chain with one text file.
	///
	/// # Errors
	/// Returns an error if the file cannot be read.
	pub fn learn_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
		let corpus = corpus::load_file(path, &self.config.boundary)?;
		self.learn_corpus(corpus);
		Ok(())
	}

	/// Extends the chain with an already loaded corpus and records its name.
	pub fn learn_corpus(&mut self, corpus: Corpus) {
		let count = corpus.tokens.len();
		self.learn_tokens(corpus.tokens);
		log::info!(
			"learned {} tokens from '{}', {} distinct in {} slots",
			count,
			corpus.name,
			self.table.len(),
			self.table.capacity()
		);
		self.sources.push(corpus.name);
	}

	/// The underlying chain.
	pub fn table(&self) -> &TokenTable<String> {
		&self.table
	}

	/// The configuration the completer was built with.
	pub fn config(&self) -> &ModelConfig {
		&self.config
	}

	/// Names of the learned corpora.
	pub fn source_names(&self) -> &[String] {
		&self.sources
	}

	/// Current size of the chain.
	pub fn stats(&self) -> ModelStats {
		ModelStats {
			tokens: self.table.len(),
			capacity: self.table.capacity(),
			sources: self.sources.clone(),
		}
	}

	/// Completes `line` from its last word.
	///
	/// The seed is the last word of `line`, normalized like the training
	/// text. The first token of the walk always equals the seed and is
	/// dropped unless `input.echo_seed` is set. An unknown seed gives an
	/// empty completion.
	pub fn complete(&self, line: &str, input: &CompletionInput) -> Completion {
		let Some(seed) = corpus::last_word(line) else {
			return Completion { seed: None, words: Vec::new() };
		};

		let rng = match input.rng_seed() {
			Some(value) => StdRng::seed_from_u64(value),
			None => StdRng::from_os_rng(),
		};
		let limit = if input.max_words == 0 { usize::MAX } else { input.max_words };
		let skip = if input.echo_seed { 0 } else { 1 };

		let words = self
			.table
			.walk_with_rng(seed.as_str(), rng)
			.skip(skip)
			.take(limit)
			.cloned()
			.collect();

		Completion { seed: Some(seed), words }
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::corpus::tokenize;

	fn completer(text: &str) -> SentenceCompleter {
		let config = ModelConfig::default();
		SentenceCompleter::from_tokens(tokenize(text, &config.boundary), config)
			.expect("default config is valid")
	}

	fn seeded(seed: u64) -> CompletionInput {
		let mut input = CompletionInput::default();
		input.set_rng_seed(seed);
		input
	}

	#[test]
	fn completes_from_last_word() {
		let completer = completer("The quick brown fox jumps.");
		let completion = completer.complete("look at the Quick", &seeded(1));
		assert_eq!(completion.seed.as_deref(), Some("quick"));
		assert_eq!(completion.text(), "brown fox jumps.");
	}

	#[test]
	fn echo_keeps_the_seed() {
		let completer = completer("The quick brown fox jumps.");
		let mut input = seeded(1);
		input.echo_seed = true;
		assert_eq!(completer.complete("quick", &input).text(), "quick brown fox jumps.");
	}

	#[test]
	fn max_words_truncates() {
		let completer = completer("one two three four five six.");
		let mut input = seeded(3);
		input.max_words = 2;
		assert_eq!(completer.complete("one", &input).words, vec!["two", "three"]);
	}

	#[test]
	fn unknown_or_missing_seed_is_empty() {
		let completer = completer("a b c.");
		let unknown = completer.complete("zebra", &seeded(0));
		assert_eq!(unknown.seed.as_deref(), Some("zebra"));
		assert!(unknown.words.is_empty());

		let blank = completer.complete("   ", &seeded(0));
		assert_eq!(blank, Completion { seed: None, words: Vec::new() });
	}

	#[test]
	fn sentence_end_seed_completes_nothing() {
		let completer = completer("it ends here.");
		assert!(completer.complete("here.", &seeded(0)).words.is_empty());
	}

	#[test]
	fn rejects_invalid_config() {
		let mut config = ModelConfig::default();
		config.boundary = String::new();
		assert!(SentenceCompleter::new(config).is_err());
	}

	#[test]
	fn stats_follow_learning() {
		let mut completer = completer("a b.");
		assert_eq!(completer.stats().tokens, 2);

		completer.learn_tokens(tokenize("c d.", "[]"));
		let stats = completer.stats();
		assert_eq!(stats.tokens, 4);
		assert_eq!(stats.capacity, 101);
		assert!(stats.sources.is_empty());
	}

	#[test]
	fn sources_are_recorded_in_order() {
		let dir = tempfile::tempdir().expect("temp dir");
		std::fs::write(dir.path().join("beta.txt"), "the end.").expect("write beta");
		std::fs::write(dir.path().join("alpha.txt"), "the start.").expect("write alpha");
		let extra = dir.path().join("gamma.text");
		std::fs::write(&extra, "the middle.").expect("write gamma");

		let mut completer = SentenceCompleter::from_folder(dir.path(), "txt", ModelConfig::default())
			.expect("folder is readable");
		assert_eq!(completer.source_names(), ["alpha", "beta"]);

		completer.learn_file(&extra).expect("file is readable");
		assert_eq!(completer.source_names(), ["alpha", "beta", "gamma"]);

		let stats = completer.stats();
		assert_eq!(stats.tokens, 4);
		assert_eq!(stats.sources, vec!["alpha", "beta", "gamma"]);
		assert_eq!(completer.table().find_node("the").map(|n| n.successors().len()), Some(3));
	}

	#[test]
	fn custom_capacity_is_used() {
		let config = ModelConfig { initial_capacity: 10, ..ModelConfig::default() };
		let completer = SentenceCompleter::new(config).expect("valid config");
		assert_eq!(completer.table().capacity(), 11);
	}
}
