//! # threadset
//!
//! An ordered set backed by an AVL tree whose nodes are additionally
//! threaded with a doubly-linked list, giving O(log n) mutation and O(1)
//! bidirectional in-order iteration without re-traversing the tree.
//!
//! ## Overview
//!
//! The crate provides a single collection, [`AvlSet`]:
//!
//! - **Sorted, unique elements**: duplicate insertions and absent removals
//!   are silent no-ops.
//! - **Logarithmic mutation**: `insert`, `remove`, `find`, and
//!   `lower_bound` all run in O(log n) by the AVL balance invariant.
//! - **Constant-time stepping**: every node carries `prev`/`next` links to
//!   its in-order neighbors, so iterators and cursors step in O(1).
//! - **Pluggable ordering**: the element order is a [`Comparator`] type
//!   parameter; [`NaturalOrder`] delegates to `Ord`, and any
//!   `Fn(&T, &T) -> Ordering` closure works directly.
//!
//! Nodes live in a generation-tagged slot arena rather than behind raw
//! pointers, so the tree's owning edges and the list's non-owning edges are
//! plain indices over the same storage, and a node leaves both graphs
//! before its slot can be reused.
//!
//! ## Example
//!
//! ```rust
//! use threadset::AvlSet;
//!
//! let mut set = AvlSet::new();
//! for element in [5, 3, 5, 1, 3] {
//!     set.insert(element);
//! }
//!
//! // Duplicates were deduplicated, iteration is sorted.
//! assert_eq!(set.len(), 3);
//! let sorted: Vec<&i32> = set.iter().collect();
//! assert_eq!(sorted, vec![&1, &3, &5]);
//!
//! // Bounded search returns a cursor into the sorted sequence.
//! let cursor = set.lower_bound(&2);
//! assert_eq!(cursor.value(), Some(&3));
//! ```
//!
//! ## Concurrency
//!
//! [`AvlSet`] has no internal synchronization and is intended for
//! single-threaded, sequential use; it is `Send`/`Sync` exactly when its
//! element type is, like any other plain in-memory collection.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use threadset::prelude::*;
/// ```
pub mod prelude {
    pub use crate::compare::{Comparator, NaturalOrder};
    pub use crate::set::{AvlSet, Cursor};
}

mod arena;

pub mod compare;
pub mod set;

pub use compare::{Comparator, NaturalOrder};
pub use set::{AvlSet, Cursor, IntoIter, Iter};
