use rand::Rng;

/// Index of a node inside the arena of its [`TokenTable`](super::token_table::TokenTable).
///
/// Ids are stable for the lifetime of the table: rehashing moves slots,
/// never nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
	/// Position of the node in the arena.
	pub fn index(self) -> usize {
		self.0
	}
}

/// One observed transition out of a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Successor {
	/// The next token, stored in the same table.
	Node(NodeId),
	/// A sentence ended after this token.
	Boundary,
}

/// A state of the chain: one token and every transition observed out of it.
///
/// Conceptually this is a node in a Markov chain whose outgoing edges are
/// stored once per observation instead of being counted, so sampling by
/// occurrence is a single index draw.
///
/// # Invariants
/// - `successors` only grows, and only during training
/// - each `Successor::Node` refers to a node of the owning table
#[derive(Clone, Debug)]
pub struct TokenNode<T> {
	value: T,
	successors: Vec<Successor>,
}

impl<T> TokenNode<T> {
	/// Creates a node with no observed successor.
	pub fn new(value: T) -> Self {
		Self { value, successors: Vec::new() }
	}

	/// The token this node stands for.
	pub fn value(&self) -> &T {
		&self.value
	}

	/// Observed successors, in training order, duplicates included.
	pub fn successors(&self) -> &[Successor] {
		&self.successors
	}

	/// Records one more observation. No deduplication is done.
	pub fn append_successor(&mut self, successor: Successor) {
		self.successors.push(successor);
	}

	/// Draws one successor, each occurrence being equally likely.
	///
	/// Returns `Successor::Boundary` if nothing was ever observed after
	/// this token.
	pub fn sample_successor<R: Rng>(&self, rng: &mut R) -> Successor {
		if self.successors.is_empty() {
			return Successor::Boundary;
		}
		self.successors[rng.random_range(0..self.successors.len())]
	}
}
