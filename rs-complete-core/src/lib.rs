//! Sentence completion with a word-level Markov chain.
//!
//! This crate provides:
//! - A hand-rolled open-addressed token table (prime capacities, quadratic probing)
//! - A first-order chain learned from a token stream with sentence boundaries
//! - Random walks that complete a sentence from a seed word
//! - Corpus ingestion and a text-level completer for applications
//!
//! Quick start:
//! ```
//! use rs_complete_core::model::{build_model, walk};
//!
//! let model = build_model(["x", ".", "[]"], "[]");
//! let words: Vec<&str> = walk(&model, "x").copied().collect();
//! assert_eq!(words, ["x", "."]);
//! ```

/// Token table, walks and the sentence completer.
pub mod model;

/// Text ingestion: normalization, tokenization and corpus loading.
pub mod corpus;

/// Model and completion settings.
pub mod config;

/// Error type and `Result` alias.
pub mod error;

/// File helpers (reading, listing, path handling).
pub mod io;

pub use config::{CompletionInput, ModelConfig};
pub use error::{CompleteError, Result};
pub use model::completer::{Completion, ModelStats, SentenceCompleter};
