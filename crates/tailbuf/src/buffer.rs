//! The bounded retention buffer.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use tracing::trace;

use crate::error::CapacityError;
use crate::iter::Iter;
use crate::node::{self, Node};

/// Both ends of the retention chain, guarded as a unit.
///
/// `newest` and `oldest` only change together with the length counter, and
/// only under the one mutex wrapping this struct.
struct Ends<T> {
	/// Most recently pushed node.
	newest: Option<Arc<Node<T>>>,
	/// Least recently pushed node still retained.
	oldest: Option<Arc<Node<T>>>,
}

/// Thread-safe fixed-capacity buffer retaining the most recent elements.
///
/// Once `capacity` elements are held, each [`push`](TailBuffer::push)
/// silently evicts the oldest element. [`iter`](TailBuffer::iter) captures a
/// consistent point-in-time snapshot in an O(1) critical section and walks
/// it, newest first, with no further synchronization: an arbitrarily slow
/// traversal never blocks writers, and writers never invalidate a captured
/// snapshot.
///
/// Evicted nodes stay alive exactly as long as some outstanding iterator can
/// still reach them, so iterators should not be retained beyond one
/// traversal.
pub struct TailBuffer<T> {
	capacity: usize,
	ends: Mutex<Ends<T>>,
	/// Element count. Written only while `ends` is locked; read without the
	/// lock by [`TailBuffer::len`], which makes that read advisory.
	len: AtomicUsize,
}

impl<T> TailBuffer<T> {
	/// Creates an empty buffer that retains at most `capacity` elements.
	///
	/// # Errors
	///
	/// Returns [`CapacityError`] if `capacity` is zero.
	pub fn new(capacity: usize) -> Result<Self, CapacityError> {
		if capacity == 0 {
			return Err(CapacityError);
		}
		Ok(Self {
			capacity,
			ends: Mutex::new(Ends {
				newest: None,
				oldest: None,
			}),
			len: AtomicUsize::new(0),
		})
	}

	/// Returns the fixed capacity set at construction.
	pub fn capacity(&self) -> usize {
		self.capacity
	}

	/// Returns the current element count without taking the lock.
	///
	/// Under concurrent pushes the value is advisory: it may be stale by the
	/// time the caller acts on it, and a snapshot captured afterwards may
	/// hold a different count.
	pub fn len(&self) -> usize {
		self.len.load(Ordering::Relaxed)
	}

	/// Returns `true` if the buffer held no elements at the time of the read.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Appends `value` as the newest element.
	///
	/// When the buffer is full, the oldest element is evicted in the same
	/// step; iterators that captured it before this call keep it alive until
	/// they are dropped. Concurrent pushes are serialized by the buffer
	/// lock, with an O(1) critical section.
	pub fn push(&self, value: T) {
		let mut node = Node::new(value);
		let mut evicted = None;

		let mut ends = self.ends.lock();
		match ends.newest.take() {
			None => {
				let node = Arc::new(node);
				ends.oldest = Some(Arc::clone(&node));
				ends.newest = Some(node);
				self.len.store(1, Ordering::Relaxed);
			}
			Some(prev) => {
				node.older = Some(Arc::downgrade(&prev));
				let node = Arc::new(node);
				// `prev` was the newest node, so its newer link is still
				// unset.
				let _ = prev.newer.set(Arc::clone(&node));
				ends.newest = Some(node);

				let len = self.len.load(Ordering::Relaxed);
				if len < self.capacity {
					self.len.store(len + 1, Ordering::Relaxed);
				} else {
					evicted = ends.oldest.take();
					ends.oldest = evicted.as_ref().and_then(|old| old.newer.get().cloned());
					debug_assert!(ends.oldest.is_some(), "full chain has a successor to evict to");
					trace!(capacity = self.capacity, "evicted oldest element");
				}
			}
		}
		drop(ends);

		// The evicted node leaves the chain here, after unlock, so the
		// value's destructor never runs inside the critical section.
		drop(evicted);
	}

	/// Returns an iterator over a point-in-time snapshot of the buffer.
	///
	/// The snapshot is captured under the buffer lock for the duration of
	/// two reference copies and one integer read; traversal afterwards is
	/// lock-free and unaffected by concurrent pushes. Each call captures a
	/// fresh snapshot; the returned iterator is single-pass and should not
	/// outlive its traversal (see [`Iter`]).
	pub fn iter(&self) -> Iter<T> {
		let ends = self.ends.lock();
		let newest = ends.newest.clone();
		let oldest = ends.oldest.clone();
		let len = self.len.load(Ordering::Relaxed);
		drop(ends);

		trace!(len, "captured buffer snapshot");
		Iter::new(newest, oldest, len)
	}
}

impl<T> fmt::Debug for TailBuffer<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TailBuffer")
			.field("capacity", &self.capacity)
			.field("len", &self.len())
			.finish_non_exhaustive()
	}
}

impl<T> Drop for TailBuffer<T> {
	fn drop(&mut self) {
		let ends = self.ends.get_mut();
		ends.newest = None;
		node::release(ends.oldest.take());
	}
}
