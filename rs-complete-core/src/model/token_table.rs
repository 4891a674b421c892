use std::borrow::Borrow;
use std::hash::{BuildHasher, BuildHasherDefault, DefaultHasher, Hash};

use crate::config::DEFAULT_INITIAL_CAPACITY;
use super::token_node::{NodeId, Successor, TokenNode};

/// Open-addressed table holding every distinct token once, linked into a
/// first-order Markov chain.
///
/// Nodes are owned by an arena (`nodes`); the slot array only stores their
/// ids. Rehashing rebuilds the slot array and leaves the arena untouched, so
/// the ids kept in successor lists stay valid forever.
///
/// # Responsibilities
/// - Map each token value to exactly one node
/// - Learn successor transitions from a token stream
/// - Serve as the immutable source of walks once trained
///
/// # Invariants
/// - `slots.len()` is always prime
/// - `current_size <= slots.len() / 2` after every insertion
/// - no token equal to the boundary marker is ever stored
#[derive(Clone, Debug)]
pub struct TokenTable<T, S = BuildHasherDefault<DefaultHasher>> {
	slots: Vec<Option<NodeId>>,
	nodes: Vec<TokenNode<T>>,
	current_size: usize,
	hasher: S,
}

/// Training position: where the previous token left us.
#[derive(Clone, Copy)]
enum Cursor {
	/// Nothing tracked yet.
	Start,
	/// The next token links from this node.
	Linked(NodeId),
	/// A boundary was seen after this node; the next token starts a sentence.
	AfterBoundary(NodeId),
}

impl<T, S> Default for TokenTable<T, S>
where
	S: Default,
{
	fn default() -> Self {
		Self::with_hasher(DEFAULT_INITIAL_CAPACITY, S::default())
	}
}

impl<T, S> TokenTable<T, S> {
	/// Creates an empty table with at least `capacity` slots.
	pub fn with_hasher(capacity: usize, hasher: S) -> Self {
		Self {
			slots: vec![None; next_prime(capacity)],
			nodes: Vec::new(),
			current_size: 0,
			hasher,
		}
	}

	/// Number of distinct tokens stored.
	pub fn len(&self) -> usize {
		self.current_size
	}

	/// Returns `true` if nothing was learned yet.
	pub fn is_empty(&self) -> bool {
		self.current_size == 0
	}

	/// Number of slots of the backing array (always prime).
	pub fn capacity(&self) -> usize {
		self.slots.len()
	}

	/// Returns the node with the given id, if it belongs to this table.
	pub fn node(&self, id: NodeId) -> Option<&TokenNode<T>> {
		self.nodes.get(id.0)
	}

	/// Iterates over every stored node, in insertion order.
	pub fn nodes(&self) -> impl Iterator<Item = &TokenNode<T>> {
		self.nodes.iter()
	}

	/// Resolves a successor entry to its token; `None` for a boundary.
	pub fn resolve(&self, successor: Successor) -> Option<&T> {
		match successor {
			Successor::Node(id) => self.nodes.get(id.0).map(TokenNode::value),
			Successor::Boundary => None,
		}
	}

	pub(crate) fn slot(&self, pos: usize) -> Option<NodeId> {
		self.slots[pos]
	}

	pub(crate) fn node_at(&self, id: NodeId) -> &TokenNode<T> {
		&self.nodes[id.0]
	}
}

impl<T> TokenTable<T>
where
	T: Eq + Hash,
{
	/// Builds a table with the default capacity and trains it on `input`.
	pub fn new<I, Q>(input: I, boundary: &Q) -> Self
	where
		I: IntoIterator<Item = T>,
		T: Borrow<Q>,
		Q: Eq + ?Sized,
	{
		Self::with_capacity(DEFAULT_INITIAL_CAPACITY, input, boundary)
	}

	/// Builds a table with at least `capacity` slots and trains it on `input`.
	pub fn with_capacity<I, Q>(capacity: usize, input: I, boundary: &Q) -> Self
	where
		I: IntoIterator<Item = T>,
		T: Borrow<Q>,
		Q: Eq + ?Sized,
	{
		let mut table = Self::with_hasher(capacity, Default::default());
		table.learn(input, boundary);
		table
	}
}

impl<T, S> TokenTable<T, S>
where
	T: Eq + Hash,
	S: BuildHasher,
{
	/// Trains the table on a token stream.
	///
	/// Every token other than `boundary` gets a node (created on first
	/// sight) and is appended to the successors of the token before it.
	/// A boundary appends `Successor::Boundary` to the tracked token and
	/// the following token starts a new sentence without being linked.
	///
	/// Each call starts with no tracked token: nothing links the last token
	/// of a previous call to the first token of this one.
	pub fn learn<I, Q>(&mut self, input: I, boundary: &Q)
	where
		I: IntoIterator<Item = T>,
		T: Borrow<Q>,
		Q: Eq + ?Sized,
	{
		let mut cursor = Cursor::Start;
		for token in input {
			cursor = if <T as Borrow<Q>>::borrow(&token) == boundary {
				match cursor {
					Cursor::Start => Cursor::Start,
					Cursor::Linked(last) | Cursor::AfterBoundary(last) => {
						self.nodes[last.0].append_successor(Successor::Boundary);
						Cursor::AfterBoundary(last)
					}
				}
			} else {
				let id = self.insert(token);
				if let Cursor::Linked(last) = cursor {
					self.nodes[last.0].append_successor(Successor::Node(id));
				}
				Cursor::Linked(id)
			};
		}
	}

	/// Returns the node stored for `value`, if any.
	pub fn find_node<Q>(&self, value: &Q) -> Option<&TokenNode<T>>
	where
		T: Borrow<Q>,
		Q: Hash + Eq + ?Sized,
	{
		self.find_id(value).map(|id| &self.nodes[id.0])
	}

	/// Returns the id of the node stored for `value`, if any.
	pub fn find_id<Q>(&self, value: &Q) -> Option<NodeId>
	where
		T: Borrow<Q>,
		Q: Hash + Eq + ?Sized,
	{
		self.slots[self.find_pos(value)]
	}

	/// Returns the node for `value`, creating it if needed.
	///
	/// Duplicates are never stored: an existing node's id is returned as is.
	pub fn insert(&mut self, value: T) -> NodeId {
		let pos = self.find_pos(&value);
		if let Some(id) = self.slots[pos] {
			return id;
		}

		let id = NodeId(self.nodes.len());
		self.nodes.push(TokenNode::new(value));
		self.slots[pos] = Some(id);
		self.current_size += 1;

		if self.current_size > self.slots.len() / 2 {
			self.rehash();
		}
		id
	}

	/// Slot a node holding `value` occupies, or would occupy if inserted.
	///
	/// Quadratic probing: offsets 1, 3, 5, ... from the home slot, so the
	/// i-th probe lands on `home + i^2`. With a prime capacity and a load
	/// factor of at most one half, an empty slot is always reached.
	pub(crate) fn find_pos<Q>(&self, value: &Q) -> usize
	where
		T: Borrow<Q>,
		Q: Hash + Eq + ?Sized,
	{
		let capacity = self.slots.len();
		let mut pos = (self.hasher.hash_one(value) % capacity as u64) as usize;
		let mut offset = 1;

		while let Some(id) = self.slots[pos] {
			if <T as Borrow<Q>>::borrow(self.nodes[id.0].value()) == value {
				break;
			}
			pos = (pos + offset) % capacity;
			offset += 2;
		}
		pos
	}

	/// Grows the slot array to `next_prime(4 * len)` and re-places every id.
	fn rehash(&mut self) {
		let old_slots = std::mem::take(&mut self.slots);
		self.slots = vec![None; next_prime(4 * self.current_size)];
		self.current_size = 0;

		for id in old_slots.into_iter().flatten() {
			let pos = self.find_pos(self.nodes[id.0].value());
			self.slots[pos] = Some(id);
			self.current_size += 1;
		}
	}
}

/// Smallest odd prime `>= n` (3 for any `n <= 3`).
pub fn next_prime(n: usize) -> usize {
	let mut candidate = if n % 2 == 0 { n + 1 } else { n };
	while !is_prime(candidate) {
		candidate += 2;
	}
	candidate
}

/// Trial division up to the square root.
pub fn is_prime(n: usize) -> bool {
	if n == 2 || n == 3 {
		return true;
	}
	if n < 2 || n % 2 == 0 {
		return false;
	}

	let mut i = 3;
	while i * i <= n {
		if n % i == 0 {
			return false;
		}
		i += 2;
	}
	true
}
