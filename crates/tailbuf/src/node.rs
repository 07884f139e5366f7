//! Retention chain nodes and chain reclamation.

use std::sync::{Arc, OnceLock, Weak};

/// One element of the retention chain.
///
/// A node never changes once it is linked into the chain: `value` and
/// `older` are fixed at link time, and `newer` is written exactly once,
/// under the buffer lock, when the successor element arrives.
///
/// `newer` is the owning direction. Holding an `Arc` to any node keeps every
/// newer node alive through the chain, which is how a snapshot pins its
/// captured range with a single reference to its oldest node. `older` is a
/// weak back edge used only for newest-first traversal; it never extends a
/// node's lifetime.
pub(crate) struct Node<T> {
	pub(crate) value: T,
	/// Weak link to the node pushed immediately before this one.
	pub(crate) older: Option<Weak<Node<T>>>,
	/// Strong link to the node pushed immediately after this one.
	pub(crate) newer: OnceLock<Arc<Node<T>>>,
}

impl<T> Node<T> {
	pub(crate) fn new(value: T) -> Self {
		Self {
			value,
			older: None,
			newer: OnceLock::new(),
		}
	}
}

/// Releases a strong chain starting at `head` without recursing.
///
/// Walks the `newer` links, dismantling each node that has no other owner
/// and stopping at the first shared one: whoever holds the other reference
/// (the live buffer or another snapshot) releases the remainder when it
/// drops. Nested `Arc` drops would otherwise recurse once per node, which
/// overflows the stack for large capacities.
pub(crate) fn release<T>(mut head: Option<Arc<Node<T>>>) {
	while let Some(node) = head {
		head = match Arc::try_unwrap(node) {
			Ok(node) => node.newer.into_inner(),
			Err(_) => None,
		};
	}
}
