//! Thread-safe bounded buffer retaining the most recent elements.
//!
//! [`TailBuffer`] keeps the last `capacity` values pushed into it. Any number
//! of threads may race on [`push`](TailBuffer::push); readers call
//! [`iter`](TailBuffer::iter) to capture a point-in-time snapshot and walk
//! it, newest first, without blocking writers and without taking any lock
//! during traversal.
//!
//! Elements live on a chain of nodes that are immutable once linked. A
//! snapshot is the atomically captured pair of chain ends plus the element
//! count; because linked nodes never change, walking the captured range
//! stays consistent while concurrent pushes extend the chain and evict from
//! its tail.
//!
//! Iterators are meant to be short-lived objects: a live iterator pins its
//! captured nodes (and anything still reachable from them) against
//! reclamation.
//!
//! ```
//! use tailbuf::TailBuffer;
//!
//! let buf = TailBuffer::new(3).unwrap();
//! for n in 1..=5 {
//! 	buf.push(n);
//! }
//! assert_eq!(buf.iter().collect::<Vec<_>>(), [5, 4, 3]);
//! ```

mod buffer;
mod error;
mod iter;
mod node;

pub use buffer::TailBuffer;
pub use error::CapacityError;
pub use iter::Iter;
