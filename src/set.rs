//! Ordered set over an AVL tree threaded with a doubly-linked list.
//!
//! This module provides [`AvlSet`], a sorted collection of unique elements.
//! The tree gives logarithmic mutation and bounded search; the list threads
//! every node to its in-order neighbors so iterators and cursors step in
//! O(1) without re-traversing the tree.
//!
//! # Overview
//!
//! `AvlSet` keeps three structures in lockstep over one set of nodes:
//!
//! - An AVL tree whose `left`/`right` edges own the nodes and keep the
//!   balance invariant |height(left) − height(right)| ≤ 1 at every node.
//! - A doubly-linked list whose `prev`/`next` edges connect the nodes in
//!   ascending order; the list is repaired incrementally inside the same
//!   recursive descent that mutates the tree, never by a separate pass.
//! - O(1) caches of the minimum and maximum nodes, updated at the point an
//!   extremum is created or removed.
//!
//! All nodes live in a generation-tagged slot arena, so both edge sets are
//! plain indices and a removed node leaves the tree, the list, and the
//! min/max caches before its slot can be reused.
//!
//! # Time Complexity
//!
//! | Operation       | Complexity   |
//! |-----------------|--------------|
//! | `insert`        | O(log n)     |
//! | `remove`/`take` | O(log n)     |
//! | `contains`      | O(log n)     |
//! | `find`          | O(log n)     |
//! | `lower_bound`   | O(log n)     |
//! | `first`/`last`  | O(1)         |
//! | iterator step   | O(1)         |
//! | `len`/`is_empty`| O(1)         |
//! | `clone`         | O(n)         |
//!
//! # Examples
//!
//! ```rust
//! use threadset::AvlSet;
//!
//! let mut set: AvlSet<i32> = [1, 3, 5, 7, 9].into();
//!
//! assert!(set.contains(&7));
//! assert_eq!(set.lower_bound(&4).value(), Some(&5));
//!
//! set.remove(&1);
//! assert_eq!(set.first(), Some(&3));
//!
//! let forward: Vec<&i32> = set.iter().collect();
//! assert_eq!(forward, vec![&3, &5, &7, &9]);
//! ```
//!
//! # Cursor validity
//!
//! [`Cursor`] borrows the set, so the borrow checker already rules out the
//! classic misuse of stepping an iterator whose element was erased. The
//! cursor additionally records the generation of the slot it points at and
//! panics if that slot was ever recycled, so even an internal bookkeeping
//! bug surfaces as a contract violation instead of reading reused storage.
//! Dereferencing the end position is not an error: [`Cursor::value`]
//! returns `None` there.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FusedIterator;

use crate::arena::Arena;
use crate::compare::{Comparator, NaturalOrder};

// =============================================================================
// Node Definition
// =============================================================================

/// A tree node and its list threading.
///
/// `left`/`right` are the owning tree edges; `prev`/`next` are the
/// non-owning list edges over the same arena. `height` caches the subtree
/// height (leaf = 1, absent child = 0). `next == None` marks the maximum:
/// the position past it is the end position.
#[derive(Clone, Debug)]
struct Node<T> {
    value: T,
    left: Option<usize>,
    right: Option<usize>,
    prev: Option<usize>,
    next: Option<usize>,
    height: u8,
}

impl<T> Node<T> {
    /// A fresh unlinked leaf.
    const fn new(value: T) -> Self {
        Self {
            value,
            left: None,
            right: None,
            prev: None,
            next: None,
            height: 1,
        }
    }
}

/// A node position as seen by a cursor: slot index plus the slot
/// generation captured when the cursor was created.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct Position {
    index: usize,
    generation: u32,
}

// =============================================================================
// AvlSet Definition
// =============================================================================

/// A sorted set of unique elements with O(log n) mutation and O(1)
/// bidirectional iterator stepping.
///
/// Element order is defined by the comparator `C`, a strict weak ordering;
/// two elements are duplicates exactly when the comparator returns
/// [`Ordering::Equal`] for them. The default [`NaturalOrder`] delegates to
/// `Ord`.
///
/// Duplicate insertion and absent removal are silent no-ops, reported
/// through the return values of [`insert`](Self::insert) and
/// [`remove`](Self::remove).
///
/// # Examples
///
/// ```rust
/// use threadset::AvlSet;
///
/// let mut set = AvlSet::new();
/// assert!(set.insert(2));
/// assert!(set.insert(1));
/// assert!(!set.insert(2)); // duplicate: no-op
///
/// assert_eq!(set.len(), 2);
/// let sorted: Vec<&i32> = set.iter().collect();
/// assert_eq!(sorted, vec![&1, &2]);
/// ```
pub struct AvlSet<T, C = NaturalOrder> {
    arena: Arena<Node<T>>,
    root: Option<usize>,
    min: Option<usize>,
    max: Option<usize>,
    comparator: C,
}

impl<T> AvlSet<T> {
    /// Creates a new empty set ordered by `Ord`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use threadset::AvlSet;
    ///
    /// let set: AvlSet<i32> = AvlSet::new();
    /// assert!(set.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }
}

impl<T, C> AvlSet<T, C> {
    /// Creates a new empty set ordered by the given comparator.
    ///
    /// Any `Fn(&T, &T) -> Ordering` closure is a comparator.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use threadset::AvlSet;
    ///
    /// let mut set = AvlSet::with_comparator(|a: &i32, b: &i32| b.cmp(a));
    /// set.extend([1, 2, 3]);
    ///
    /// let descending: Vec<&i32> = set.iter().collect();
    /// assert_eq!(descending, vec![&3, &2, &1]);
    /// ```
    #[inline]
    #[must_use]
    pub const fn with_comparator(comparator: C) -> Self {
        Self {
            arena: Arena::new(),
            root: None,
            min: None,
            max: None,
            comparator,
        }
    }

    /// Returns the number of elements in the set.
    ///
    /// # Complexity
    ///
    /// O(1)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use threadset::AvlSet;
    ///
    /// let set: AvlSet<i32> = [1, 2, 2, 3].into();
    /// assert_eq!(set.len(), 3);
    /// ```
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.arena.len()
    }

    /// Returns `true` if the set contains no elements.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use threadset::AvlSet;
    ///
    /// let set: AvlSet<i32> = AvlSet::new();
    /// assert!(set.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes all elements.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use threadset::AvlSet;
    ///
    /// let mut set: AvlSet<i32> = [1, 2, 3].into();
    /// set.clear();
    /// assert!(set.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.arena = Arena::new();
        self.root = None;
        self.min = None;
        self.max = None;
    }

    /// Returns the depth of the tree: 0 for an empty set, 1 for a single
    /// element.
    ///
    /// By the AVL invariant the depth is O(log n); this accessor exists for
    /// invariant testing and benchmarking.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use threadset::AvlSet;
    ///
    /// // Ten ascending inserts stay balanced instead of degenerating
    /// // into a depth-10 chain.
    /// let set: AvlSet<i32> = (1..=10).collect();
    /// assert!(set.depth() <= 4);
    /// ```
    #[must_use]
    pub fn depth(&self) -> usize {
        usize::from(self.height_of(self.root))
    }

    /// Returns a reference to the smallest element, or `None` if the set is
    /// empty.
    ///
    /// # Complexity
    ///
    /// O(1) — answered from the cached minimum.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use threadset::AvlSet;
    ///
    /// let set: AvlSet<i32> = [3, 1, 2].into();
    /// assert_eq!(set.first(), Some(&1));
    /// ```
    #[inline]
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.min.map(|index| &self.arena[index].value)
    }

    /// Returns a reference to the largest element, or `None` if the set is
    /// empty.
    ///
    /// # Complexity
    ///
    /// O(1) — answered from the cached maximum.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use threadset::AvlSet;
    ///
    /// let set: AvlSet<i32> = [3, 1, 2].into();
    /// assert_eq!(set.last(), Some(&3));
    /// ```
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.max.map(|index| &self.arena[index].value)
    }

    // -- internal node helpers ------------------------------------------------

    fn height_of(&self, node: Option<usize>) -> u8 {
        node.map_or(0, |index| self.arena[index].height)
    }

    fn position_of(&self, index: usize) -> Position {
        Position {
            index,
            generation: self.arena.generation(index),
        }
    }

    fn live_node(&self, position: Position) -> &Node<T> {
        assert!(
            self.arena.is_live(position.index, position.generation),
            "cursor refers to an element that was removed from the set"
        );
        &self.arena[position.index]
    }

    fn cursor_at(&self, index: Option<usize>) -> Cursor<'_, T, C> {
        Cursor {
            set: self,
            at: index.map(|i| self.position_of(i)),
        }
    }
}

// =============================================================================
// Balance Engine
// =============================================================================

impl<T, C> AvlSet<T, C> {
    /// Recomputes the cached height of `v` from its children.
    fn update_height(&mut self, v: usize) {
        let height = 1 + self
            .height_of(self.arena[v].left)
            .max(self.height_of(self.arena[v].right));
        self.arena[v].height = height;
    }

    /// Left height minus right height.
    fn balance_factor(&self, v: usize) -> i32 {
        i32::from(self.height_of(self.arena[v].left)) - i32::from(self.height_of(self.arena[v].right))
    }

    /// Single left rotation around `a`; returns the node replacing `a`.
    ///
    /// Rotations re-wire tree edges and heights only; the `prev`/`next`
    /// list is ordering-based and indifferent to tree shape.
    fn rotate_left(&mut self, a: usize) -> usize {
        let b = self.arena[a].right.expect("left rotation requires a right child");
        self.arena[a].right = self.arena[b].left;
        self.arena[b].left = Some(a);
        self.update_height(a);
        self.update_height(b);
        b
    }

    /// Single right rotation around `a`; returns the node replacing `a`.
    fn rotate_right(&mut self, a: usize) -> usize {
        let b = self.arena[a].left.expect("right rotation requires a left child");
        self.arena[a].left = self.arena[b].right;
        self.arena[b].right = Some(a);
        self.update_height(a);
        self.update_height(b);
        b
    }

    /// Restores the AVL invariant at `v`, assuming both children already
    /// satisfy it, and returns the node that replaces `v` in its parent.
    ///
    /// A single insertion or removal below `v` can only produce a balance
    /// factor of ±2 here; the inner child's lean decides between a single
    /// and a double rotation.
    fn balance(&mut self, v: usize) -> usize {
        self.update_height(v);
        match self.balance_factor(v) {
            -2 => {
                let right = self.arena[v].right.expect("right subtree is over-tall");
                if self.balance_factor(right) > 0 {
                    self.arena[v].right = Some(self.rotate_right(right));
                }
                self.rotate_left(v)
            }
            2 => {
                let left = self.arena[v].left.expect("left subtree is over-tall");
                if self.balance_factor(left) < 0 {
                    self.arena[v].left = Some(self.rotate_left(left));
                }
                self.rotate_right(v)
            }
            _ => v,
        }
    }
}

// =============================================================================
// Insertion
// =============================================================================

/// Result of one recursive insertion frame.
///
/// `fresh` carries the newly created node for exactly one level: the
/// immediate parent splices it into the list and clears the field, so no
/// ancestor above can splice it twice.
struct InsertStep {
    subtree: usize,
    fresh: Option<usize>,
    inserted: bool,
}

impl<T, C: Comparator<T>> AvlSet<T, C> {
    /// Inserts an element, returning `true` if it was not already present.
    ///
    /// If an equal element (under the set's comparator) is already present
    /// the set is not mutated, the new value is dropped, and `false` is
    /// returned.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use threadset::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// assert!(set.insert(7));
    /// assert!(!set.insert(7));
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn insert(&mut self, value: T) -> bool {
        let step = self.insert_below(self.root, value);
        self.root = Some(step.subtree);
        step.inserted
    }

    /// Recursive BST descent. The new node is created at a null child; each
    /// ancestor rebalances on the way back up, and the immediate parent of
    /// the creation point splices the node into the list.
    fn insert_below(&mut self, node: Option<usize>, value: T) -> InsertStep {
        let Some(v) = node else {
            let fresh = self.attach_leaf(value);
            return InsertStep {
                subtree: fresh,
                fresh: Some(fresh),
                inserted: true,
            };
        };
        match self.comparator.compare(&value, &self.arena[v].value) {
            Ordering::Less => {
                let step = self.insert_below(self.arena[v].left, value);
                self.arena[v].left = Some(step.subtree);
                if let Some(fresh) = step.fresh {
                    self.splice_before(fresh, v);
                }
                InsertStep {
                    subtree: self.balance(v),
                    fresh: None,
                    inserted: step.inserted,
                }
            }
            Ordering::Greater => {
                let step = self.insert_below(self.arena[v].right, value);
                self.arena[v].right = Some(step.subtree);
                if let Some(fresh) = step.fresh {
                    self.splice_after(fresh, v);
                }
                InsertStep {
                    subtree: self.balance(v),
                    fresh: None,
                    inserted: step.inserted,
                }
            }
            Ordering::Equal => InsertStep {
                subtree: v,
                fresh: None,
                inserted: false,
            },
        }
    }

    /// Allocates the new leaf and updates the min/max caches by direct
    /// comparison against the current extrema.
    ///
    /// The comparisons happen before the allocation and the allocation
    /// happens before any link is touched, so a failed allocation cannot
    /// leave the set half-linked.
    fn attach_leaf(&mut self, value: T) -> usize {
        let is_new_min = match self.min {
            None => true,
            Some(min) => self.comparator.compare(&value, &self.arena[min].value) == Ordering::Less,
        };
        let is_new_max = match self.max {
            None => true,
            Some(max) => self.comparator.compare(&self.arena[max].value, &value) == Ordering::Less,
        };
        let fresh = self.arena.insert(Node::new(value));
        if is_new_min {
            self.min = Some(fresh);
        }
        if is_new_max {
            self.max = Some(fresh);
        }
        fresh
    }

    /// Splices `fresh` into the list immediately before `anchor`.
    fn splice_before(&mut self, fresh: usize, anchor: usize) {
        let old_prev = self.arena[anchor].prev;
        self.arena[fresh].prev = old_prev;
        self.arena[fresh].next = Some(anchor);
        if let Some(prev) = old_prev {
            self.arena[prev].next = Some(fresh);
        }
        self.arena[anchor].prev = Some(fresh);
    }

    /// Splices `fresh` into the list immediately after `anchor`.
    fn splice_after(&mut self, fresh: usize, anchor: usize) {
        let old_next = self.arena[anchor].next;
        self.arena[fresh].next = old_next;
        self.arena[fresh].prev = Some(anchor);
        if let Some(next) = old_next {
            self.arena[next].prev = Some(fresh);
        }
        self.arena[anchor].next = Some(fresh);
    }
}

// =============================================================================
// Removal
// =============================================================================

impl<T, C: Comparator<T>> AvlSet<T, C> {
    /// Removes the element equal to `value`, returning `true` if one was
    /// present.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use threadset::AvlSet;
    ///
    /// let mut set: AvlSet<i32> = [1, 2, 3].into();
    /// assert!(set.remove(&2));
    /// assert!(!set.remove(&2));
    /// assert_eq!(set.len(), 2);
    /// ```
    pub fn remove(&mut self, value: &T) -> bool {
        self.take(value).is_some()
    }

    /// Removes and returns the element equal to `value`, or `None` if the
    /// set has no such element.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use threadset::AvlSet;
    ///
    /// let mut set: AvlSet<String> = ["a".to_string(), "b".to_string()].into();
    /// assert_eq!(set.take(&"a".to_string()), Some("a".to_string()));
    /// assert_eq!(set.take(&"a".to_string()), None);
    /// ```
    pub fn take(&mut self, value: &T) -> Option<T> {
        let (root, taken) = self.remove_below(self.root, value);
        self.root = root;
        taken
    }

    /// Recursive BST descent; every frame on the return path rebalances.
    ///
    /// On a match the node leaves the min/max caches, then the list, then
    /// the tree, and only then is its slot vacated.
    fn remove_below(&mut self, node: Option<usize>, value: &T) -> (Option<usize>, Option<T>) {
        let Some(v) = node else {
            return (None, None);
        };
        match self.comparator.compare(value, &self.arena[v].value) {
            Ordering::Less => {
                let (left, taken) = self.remove_below(self.arena[v].left, value);
                self.arena[v].left = left;
                (Some(self.balance(v)), taken)
            }
            Ordering::Greater => {
                let (right, taken) = self.remove_below(self.arena[v].right, value);
                self.arena[v].right = right;
                (Some(self.balance(v)), taken)
            }
            Ordering::Equal => {
                if self.min == Some(v) {
                    self.min = self.arena[v].next;
                }
                if self.max == Some(v) {
                    self.max = self.arena[v].prev;
                }
                self.unlink(v);
                let removed = self.arena.remove(v);
                let replacement = match removed.right {
                    // No right child: the left subtree (already balanced)
                    // takes the node's place directly.
                    None => removed.left,
                    // Two-child case: the in-order successor is detached
                    // from the right subtree and re-hung over both
                    // subtrees.
                    Some(right) => {
                        let successor = self.leftmost(right);
                        let trimmed = self.detach_leftmost(right);
                        self.arena[successor].left = removed.left;
                        self.arena[successor].right = trimmed;
                        Some(self.balance(successor))
                    }
                };
                (replacement, Some(removed.value))
            }
        }
    }

    /// Connects the list neighbors of `v` to each other, removing `v` from
    /// the list in O(1).
    fn unlink(&mut self, v: usize) {
        let prev = self.arena[v].prev;
        let next = self.arena[v].next;
        if let Some(prev) = prev {
            self.arena[prev].next = next;
        }
        if let Some(next) = next {
            self.arena[next].prev = prev;
        }
    }

    /// Index of the leftmost node of the subtree rooted at `v`.
    fn leftmost(&self, v: usize) -> usize {
        let mut current = v;
        while let Some(left) = self.arena[current].left {
            current = left;
        }
        current
    }

    /// Removes the leftmost node from the subtree rooted at `v`,
    /// rebalancing along its path, and returns the new subtree root.
    ///
    /// The detached node is not freed; the caller re-hangs it as the
    /// replacement for a removed two-child node.
    fn detach_leftmost(&mut self, v: usize) -> Option<usize> {
        match self.arena[v].left {
            None => self.arena[v].right,
            Some(left) => {
                self.arena[v].left = self.detach_leftmost(left);
                Some(self.balance(v))
            }
        }
    }
}

// =============================================================================
// Lookup
// =============================================================================

impl<T, C: Comparator<T>> AvlSet<T, C> {
    /// Returns `true` if the set contains an element equal to `value`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use threadset::AvlSet;
    ///
    /// let set: AvlSet<i32> = [1, 3, 5].into();
    /// assert!(set.contains(&3));
    /// assert!(!set.contains(&4));
    /// ```
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.find_index(value).is_some()
    }

    /// Returns a cursor at the element equal to `value`, or at the end
    /// position if there is no such element.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use threadset::AvlSet;
    ///
    /// let set: AvlSet<i32> = [1, 3, 5].into();
    /// assert_eq!(set.find(&3).value(), Some(&3));
    /// assert!(set.find(&4).is_end());
    /// ```
    #[must_use]
    pub fn find(&self, value: &T) -> Cursor<'_, T, C> {
        self.cursor_at(self.find_index(value))
    }

    /// Returns a cursor at the first element not less than `value`, or at
    /// the end position if every element is less.
    ///
    /// The result is the minimum qualifying element: when both the left
    /// subtree and the current node qualify, the left subtree's answer
    /// wins because it is smaller yet still not less than `value`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use threadset::AvlSet;
    ///
    /// let set: AvlSet<i32> = [1, 3, 5, 7, 9].into();
    /// assert_eq!(set.lower_bound(&4).value(), Some(&5));
    /// assert_eq!(set.lower_bound(&5).value(), Some(&5));
    /// assert!(set.lower_bound(&10).is_end());
    /// ```
    #[must_use]
    pub fn lower_bound(&self, value: &T) -> Cursor<'_, T, C> {
        self.cursor_at(self.lower_bound_in(self.root, value))
    }

    fn find_index(&self, value: &T) -> Option<usize> {
        let mut current = self.root;
        while let Some(v) = current {
            current = match self.comparator.compare(value, &self.arena[v].value) {
                Ordering::Less => self.arena[v].left,
                Ordering::Greater => self.arena[v].right,
                Ordering::Equal => return Some(v),
            };
        }
        None
    }

    fn lower_bound_in(&self, node: Option<usize>, value: &T) -> Option<usize> {
        let v = node?;
        if self.comparator.compare(&self.arena[v].value, value) == Ordering::Less {
            return self.lower_bound_in(self.arena[v].right, value);
        }
        self.lower_bound_in(self.arena[v].left, value).or(Some(v))
    }
}

// =============================================================================
// Iteration
// =============================================================================

impl<T, C> AvlSet<T, C> {
    /// Returns an iterator over the elements in ascending order.
    ///
    /// The iterator walks the threaded list, so each step is O(1). It is
    /// double-ended and exact-sized.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use threadset::AvlSet;
    ///
    /// let set: AvlSet<i32> = [2, 1, 3].into();
    ///
    /// let forward: Vec<&i32> = set.iter().collect();
    /// assert_eq!(forward, vec![&1, &2, &3]);
    ///
    /// let backward: Vec<&i32> = set.iter().rev().collect();
    /// assert_eq!(backward, vec![&3, &2, &1]);
    /// ```
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            arena: &self.arena,
            front: self.min,
            back: self.max,
            remaining: self.len(),
        }
    }

    /// Returns a cursor at the smallest element, or at the end position if
    /// the set is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use threadset::AvlSet;
    ///
    /// let set: AvlSet<i32> = [2, 1].into();
    /// let mut cursor = set.cursor_front();
    /// assert_eq!(cursor.value(), Some(&1));
    /// cursor.move_next();
    /// assert_eq!(cursor.value(), Some(&2));
    /// ```
    #[must_use]
    pub fn cursor_front(&self) -> Cursor<'_, T, C> {
        self.cursor_at(self.min)
    }

    /// Returns a cursor at the end position, one past the largest element.
    ///
    /// Together with [`cursor_front`](Self::cursor_front) this defines the
    /// half-open range `[front, end)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use threadset::AvlSet;
    ///
    /// let set: AvlSet<i32> = [1, 2, 3].into();
    /// let mut cursor = set.cursor_end();
    /// assert!(cursor.is_end());
    /// cursor.move_prev();
    /// assert_eq!(cursor.value(), Some(&3));
    /// ```
    #[must_use]
    pub fn cursor_end(&self) -> Cursor<'_, T, C> {
        self.cursor_at(None)
    }
}

/// A borrowed iterator over an [`AvlSet`] in ascending order.
///
/// Created by [`AvlSet::iter`]. Each step follows one threaded list link.
pub struct Iter<'a, T> {
    arena: &'a Arena<Node<T>>,
    front: Option<usize>,
    back: Option<usize>,
    remaining: usize,
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            arena: self.arena,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let index = self.front.expect("threaded list ends before the counted length");
        let node = &self.arena[index];
        self.front = node.next;
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let index = self.back.expect("threaded list ends before the counted length");
        let node = &self.arena[index];
        self.back = node.prev;
        self.remaining -= 1;
        Some(&node.value)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

/// An owning iterator over an [`AvlSet`] in ascending order.
///
/// Created by the `IntoIterator` implementation for `AvlSet`. Each yielded
/// element's slot is vacated as the iterator passes it.
pub struct IntoIter<T> {
    arena: Arena<Node<T>>,
    front: Option<usize>,
    back: Option<usize>,
    remaining: usize,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.remaining == 0 {
            return None;
        }
        let index = self.front.expect("threaded list ends before the counted length");
        let node = self.arena.remove(index);
        self.front = node.next;
        self.remaining -= 1;
        Some(node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        if self.remaining == 0 {
            return None;
        }
        let index = self.back.expect("threaded list ends before the counted length");
        let node = self.arena.remove(index);
        self.back = node.prev;
        self.remaining -= 1;
        Some(node.value)
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<T> FusedIterator for IntoIter<T> {}

// =============================================================================
// Cursor
// =============================================================================

/// A read-only, bidirectional position in an [`AvlSet`].
///
/// A cursor is either at an element or at the end position one past the
/// largest element. [`value`](Self::value) returns `None` at the end
/// position rather than failing; the end position is a normal result of
/// [`AvlSet::find`] and [`AvlSet::lower_bound`], not an error.
///
/// Elements are never mutable through a cursor: changing an element in
/// place would silently break the search-tree ordering without triggering
/// any rebalancing.
///
/// # Validity
///
/// A cursor borrows its set, so the set cannot be mutated while any cursor
/// exists; the "stepping a dangling iterator" misuse is rejected at compile
/// time. Each cursor also carries the generation of the arena slot it
/// points at and panics if the slot was recycled, making any internal
/// bookkeeping bug a loud contract violation instead of a silent read of
/// reused storage.
///
/// # Examples
///
/// ```rust
/// use threadset::AvlSet;
///
/// let set: AvlSet<i32> = [10, 20, 30].into();
///
/// let mut cursor = set.lower_bound(&15);
/// assert_eq!(cursor.value(), Some(&20));
///
/// cursor.move_prev();
/// assert_eq!(cursor.value(), Some(&10));
/// ```
pub struct Cursor<'a, T, C = NaturalOrder> {
    set: &'a AvlSet<T, C>,
    at: Option<Position>,
}

impl<T, C> Clone for Cursor<'_, T, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, C> Copy for Cursor<'_, T, C> {}

impl<T, C> PartialEq for Cursor<'_, T, C> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.set, other.set) && self.at == other.at
    }
}

impl<T, C> Eq for Cursor<'_, T, C> {}

impl<'a, T, C> Cursor<'a, T, C> {
    /// Returns the element the cursor is at, or `None` at the end
    /// position.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use threadset::AvlSet;
    ///
    /// let set: AvlSet<i32> = [1].into();
    /// assert_eq!(set.cursor_front().value(), Some(&1));
    /// assert_eq!(set.cursor_end().value(), None);
    /// ```
    #[must_use]
    pub fn value(&self) -> Option<&'a T> {
        self.at.map(|position| &self.set.live_node(position).value)
    }

    /// Returns `true` if the cursor is at the end position.
    #[inline]
    #[must_use]
    pub const fn is_end(&self) -> bool {
        self.at.is_none()
    }

    /// Moves to the in-order successor; moving past the largest element
    /// lands on the end position.
    ///
    /// # Complexity
    ///
    /// O(1) — one threaded list link.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is already at the end position.
    pub fn move_next(&mut self) {
        let position = self.at.expect("cannot advance a cursor already at the end position");
        self.at = self
            .set
            .live_node(position)
            .next
            .map(|index| self.set.position_of(index));
    }

    /// Moves to the in-order predecessor; moving from the end position
    /// lands on the largest element.
    ///
    /// # Complexity
    ///
    /// O(1) — one threaded list link.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is at the smallest element (or if the set is
    /// empty).
    pub fn move_prev(&mut self) {
        let index = match self.at {
            None => self
                .set
                .max
                .expect("cannot retreat a cursor before the first element"),
            Some(position) => self
                .set
                .live_node(position)
                .prev
                .expect("cannot retreat a cursor before the first element"),
        };
        self.at = Some(self.set.position_of(index));
    }
}

impl<T: fmt::Debug, C> fmt::Debug for Cursor<'_, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value() {
            Some(value) => write!(f, "Cursor({value:?})"),
            None => write!(f, "Cursor(end)"),
        }
    }
}

// =============================================================================
// Clone
// =============================================================================

impl<T: Clone, C: Clone> Clone for AvlSet<T, C> {
    /// Deep-copies the set: the tree shape is copied structurally into a
    /// fresh arena, then a single in-order pass threads `prev`/`next`
    /// across consecutive nodes and the min/max caches are taken from the
    /// ends of that sequence.
    fn clone(&self) -> Self {
        let mut arena = Arena::with_capacity(self.len());
        let root = self.copy_subtree(self.root, &mut arena);

        let mut order = Vec::with_capacity(self.len());
        collect_in_order(&arena, root, &mut order);
        for pair in order.windows(2) {
            arena[pair[0]].next = Some(pair[1]);
            arena[pair[1]].prev = Some(pair[0]);
        }

        Self {
            arena,
            root,
            min: order.first().copied(),
            max: order.last().copied(),
            comparator: self.comparator.clone(),
        }
    }
}

impl<T: Clone, C: Clone> AvlSet<T, C> {
    /// Copies the tree rooted at `node` into `target`, preserving shape
    /// and cached heights but none of the list links.
    fn copy_subtree(&self, node: Option<usize>, target: &mut Arena<Node<T>>) -> Option<usize> {
        let v = node?;
        let left = self.copy_subtree(self.arena[v].left, target);
        let right = self.copy_subtree(self.arena[v].right, target);
        let source = &self.arena[v];
        Some(target.insert(Node {
            value: source.value.clone(),
            left,
            right,
            prev: None,
            next: None,
            height: source.height,
        }))
    }
}

/// Appends the in-order sequence of the subtree at `node` to `order`.
fn collect_in_order<T>(arena: &Arena<Node<T>>, node: Option<usize>, order: &mut Vec<usize>) {
    if let Some(v) = node {
        collect_in_order(arena, arena[v].left, order);
        order.push(v);
        collect_in_order(arena, arena[v].right, order);
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl<T, C: Default> Default for AvlSet<T, C> {
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<T: Ord> FromIterator<T> for AvlSet<T> {
    /// Builds a set from any sequence; duplicates are silently
    /// deduplicated because later insertions of an equal element are
    /// no-ops.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<T, C: Comparator<T>> Extend<T> for AvlSet<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.insert(element);
        }
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for AvlSet<T> {
    /// Builds a set from a literal element list, deduplicating equal
    /// elements.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use threadset::AvlSet;
    ///
    /// let set: AvlSet<i32> = [5, 3, 5, 1, 3].into();
    /// assert_eq!(set.len(), 3);
    /// ```
    fn from(elements: [T; N]) -> Self {
        elements.into_iter().collect()
    }
}

impl<T, C> IntoIterator for AvlSet<T, C> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        let remaining = self.arena.len();
        IntoIter {
            arena: self.arena,
            front: self.min,
            back: self.max,
            remaining,
        }
    }
}

impl<'a, T, C> IntoIterator for &'a AvlSet<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T: PartialEq, C> PartialEq for AvlSet<T, C> {
    /// Two sets are equal when their ascending sequences are equal.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq, C> Eq for AvlSet<T, C> {}

impl<T: Hash, C> Hash for AvlSet<T, C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len());
        for element in self {
            element.hash(state);
        }
    }
}

impl<T: fmt::Debug, C> fmt::Debug for AvlSet<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display, C> fmt::Display for AvlSet<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, element) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{element}")?;
        }
        write!(f, "}}")
    }
}

static_assertions::assert_impl_all!(AvlSet<i32>: Send, Sync, Clone, Default);
static_assertions::assert_impl_all!(AvlSet<String>: Send, Sync);

// =============================================================================
// Tests
// =============================================================================
