//! Turns raw text into the token stream the model learns from.
//!
//! Words are split on whitespace, stripped of ASCII punctuation other than
//! `.`, `?` and `!`, and lowercased. A word ending a sentence is followed
//! by the boundary marker. `"end."` and `"end"` are distinct tokens.

use std::path::Path;

use crate::error::{CompleteError, Result};
use crate::io::{get_filename, list_files, read_file};

/// Characters kept by [`normalize_word`] despite being punctuation.
const SENTENCE_TERMINATORS: [char; 3] = ['.', '?', '!'];

/// Tokens read from one source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Corpus {
	/// Source name (file stem for files).
	pub name: String,
	/// Token stream, boundaries included.
	pub tokens: Vec<String>,
}

/// Lowercases `word` and drops ASCII punctuation except sentence terminators.
///
/// Digits and non-ASCII characters are kept as is.
pub fn normalize_word(word: &str) -> String {
	word.chars()
		.filter(|c| !c.is_ascii_punctuation() || SENTENCE_TERMINATORS.contains(c))
		.flat_map(char::to_lowercase)
		.collect()
}

/// Returns `true` if a normalized word closes a sentence.
pub fn ends_sentence(word: &str) -> bool {
	word.ends_with(SENTENCE_TERMINATORS)
}

/// Splits `text` into tokens, inserting `boundary` after each sentence.
///
/// Words left empty by normalization (ex. `"--"`) are skipped.
pub fn tokenize(text: &str, boundary: &str) -> Vec<String> {
	let mut tokens = Vec::new();

	for word in text.split_whitespace().map(normalize_word) {
		if word.is_empty() {
			continue;
		}
		let closes = ends_sentence(&word);
		tokens.push(word);
		if closes {
			tokens.push(boundary.to_owned());
		}
	}

	tokens
}

/// Normalized last word of a typed line, used as a walk seed.
///
/// Returns `None` if the line holds no usable word.
pub fn last_word(line: &str) -> Option<String> {
	line.split_whitespace()
		.map(normalize_word)
		.filter(|word| !word.is_empty())
		.last()
}

/// Reads and tokenizes a single text file.
///
/// # Errors
/// - `NotAFile` if `path` is not a regular file
/// - `Io` if reading fails
pub fn load_file<P: AsRef<Path>>(path: P, boundary: &str) -> Result<Corpus> {
	let path = path.as_ref();
	if !path.is_file() {
		return Err(CompleteError::NotAFile(path.to_path_buf()));
	}

	let name = get_filename(path)?;
	let tokens = tokenize(&read_file(path)?, boundary);
	log::debug!("tokenized {} into {} tokens", path.display(), tokens.len());

	Ok(Corpus { name, tokens })
}

/// Reads every `*.extension` file of a directory, in name order.
///
/// Subdirectories are ignored.
///
/// # Errors
/// - `NotADirectory` if `dir` is not a directory
/// - any error of [`load_file`]
pub fn load_folder<P: AsRef<Path>>(dir: P, extension: &str, boundary: &str) -> Result<Vec<Corpus>> {
	let dir = dir.as_ref();
	if !dir.is_dir() {
		return Err(CompleteError::NotADirectory(dir.to_path_buf()));
	}

	let corpora = list_files(dir, extension)?
		.iter()
		.map(|file| load_file(dir.join(file), boundary))
		.collect::<Result<Vec<_>>>()?;
	log::debug!("loaded {} corpora from {}", corpora.len(), dir.display());

	Ok(corpora)
}
