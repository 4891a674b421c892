//! Error types shared by the model, the ingestion layer and the completer.

use std::path::PathBuf;

/// Result alias defaulting to [`CompleteError`].
pub type Result<T, E = CompleteError> = std::result::Result<T, E>;

/// All failures the crate can report.
///
/// The model itself has a single failure: advancing a walk that is already
/// exhausted. An unknown seed, an empty successor list or an empty training
/// input are normal outcomes (an empty walk), not errors.
#[derive(Debug, thiserror::Error)]
pub enum CompleteError {
	/// A walk was advanced past its last token.
	#[error("no more tokens: the walk is exhausted")]
	NoMoreTokens,

	/// A configuration value was rejected.
	#[error("invalid configuration: {0}")]
	InvalidConfig(String),

	/// A corpus path was expected to be a regular file.
	#[error("the path '{0}' is not a file")]
	NotAFile(PathBuf),

	/// A corpus path was expected to be a directory.
	#[error("the path '{0}' is not a directory")]
	NotADirectory(PathBuf),

	/// Reading a corpus failed.
	#[error(transparent)]
	Io(#[from] std::io::Error),
}
