//! Top-level module for the word-level Markov chain.
//!
//! This module provides:
//! - Stored tokens and their observed successors (`TokenNode`)
//! - The open-addressed table owning every node (`TokenTable`)
//! - Random walks producing sentence completions (`Walk`)
//! - A high-level completer working on raw text (`SentenceCompleter`)

use std::borrow::Borrow;
use std::hash::Hash;

/// A single token of the chain and the multiset of its successors.
///
/// Successors are stored once per observation so that uniform sampling
/// over occurrences is a single index draw.
pub mod token_node;

/// Hash table with prime capacities and quadratic probing.
///
/// Owns every node, learns transitions from a token stream and keeps its
/// load factor at or below one half.
pub mod token_table;

/// Lazy random walk over a trained table.
pub mod walk;

/// Text-level completion built on top of the table.
///
/// Handles corpus loading, seed extraction from a typed line and
/// truncation of the produced walk.
pub mod completer;

pub use token_node::{NodeId, Successor, TokenNode};
pub use token_table::TokenTable;
pub use walk::Walk;

/// A trained chain with the default hasher.
pub type Model<T> = TokenTable<T>;

/// Trains a new model on `input`, `boundary` marking sentence ends.
pub fn build_model<T, I, Q>(input: I, boundary: &Q) -> Model<T>
where
	T: Eq + Hash + Borrow<Q>,
	I: IntoIterator<Item = T>,
	Q: Eq + ?Sized,
{
	TokenTable::new(input, boundary)
}

/// Starts a random walk from `seed`.
///
/// The walk is empty if `seed` was never learned.
pub fn walk<'a, T, Q>(model: &'a Model<T>, seed: &Q) -> Walk<'a, T>
where
	T: Eq + Hash + Borrow<Q>,
	Q: Hash + Eq + ?Sized,
{
	model.walk(seed)
}

/// Extends a model with more training data.
pub fn extend_model<T, I, Q>(model: &mut Model<T>, input: I, boundary: &Q)
where
	T: Eq + Hash + Borrow<Q>,
	I: IntoIterator<Item = T>,
	Q: Eq + ?Sized,
{
	model.learn(input, boundary);
}
