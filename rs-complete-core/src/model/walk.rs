use std::borrow::Borrow;
use std::hash::{BuildHasher, BuildHasherDefault, DefaultHasher, Hash};
use std::iter::FusedIterator;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{CompleteError, Result};
use super::token_node::{NodeId, Successor};
use super::token_table::TokenTable;

/// A random walk over a trained [`TokenTable`].
///
/// Yields the seed first, then one sampled successor per step, and stops
/// as soon as a boundary is drawn (or the current token has no successor).
///
/// The walk borrows the table immutably and owns its random generator, so
/// any number of walks can run over the same table without sharing state.
///
/// ## States
/// - `current == Some(node)`: the next call yields `node`
/// - `current == None`: exhausted, for good
pub struct Walk<'a, T, S = BuildHasherDefault<DefaultHasher>, R = StdRng> {
	table: &'a TokenTable<T, S>,
	current: Option<NodeId>,
	rng: R,
}

impl<'a, T, S, R> Walk<'a, T, S, R>
where
	R: Rng,
{
	/// Returns `true` if the next call to `next` yields a token.
	pub fn has_next(&self) -> bool {
		self.current.is_some()
	}

	/// Like `next`, but fails when the walk is exhausted.
	///
	/// # Errors
	/// Returns `NoMoreTokens` once the walk has ended.
	pub fn advance(&mut self) -> Result<&'a T> {
		self.next().ok_or(CompleteError::NoMoreTokens)
	}
}

impl<'a, T, S, R> Iterator for Walk<'a, T, S, R>
where
	R: Rng,
{
	type Item = &'a T;

	fn next(&mut self) -> Option<Self::Item> {
		let table = self.table;
		let node = table.node_at(self.current.take()?);

		self.current = match node.sample_successor(&mut self.rng) {
			Successor::Node(next) => Some(next),
			Successor::Boundary => None,
		};
		Some(node.value())
	}
}

impl<T, S, R: Rng> FusedIterator for Walk<'_, T, S, R> {}

impl<T, S> TokenTable<T, S>
where
	T: Eq + Hash,
	S: BuildHasher,
{
	/// Starts a walk at `seed` with a freshly OS-seeded generator.
	///
	/// An unknown seed (including the boundary marker) gives a walk that is
	/// already exhausted.
	pub fn walk<Q>(&self, seed: &Q) -> Walk<'_, T, S>
	where
		T: Borrow<Q>,
		Q: Hash + Eq + ?Sized,
	{
		self.walk_with_rng(seed, StdRng::from_os_rng())
	}

	/// Starts a walk at `seed` drawing from `rng`.
	pub fn walk_with_rng<Q, R>(&self, seed: &Q, rng: R) -> Walk<'_, T, S, R>
	where
		T: Borrow<Q>,
		Q: Hash + Eq + ?Sized,
		R: Rng,
	{
		Walk {
			table: self,
			current: self.slot(self.find_pos(seed)),
			rng,
		}
	}
}
