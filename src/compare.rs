//! Pluggable element ordering for [`AvlSet`](crate::AvlSet).
//!
//! The set never assumes its element type's built-in ordering. Instead the
//! order is supplied by a [`Comparator`], carried by the set as a type
//! parameter. [`NaturalOrder`] is the zero-sized default that delegates to
//! `Ord`, and any `Fn(&T, &T) -> Ordering` closure is a comparator as well,
//! so ad-hoc orderings need no wrapper type.
//!
//! A comparator must be a **strict weak ordering**: two elements are treated
//! as equal exactly when the comparator returns [`Ordering::Equal`], which
//! is what deduplication on insert and the `lower_bound` tie-break rely on.
//!
//! # Examples
//!
//! ```rust
//! use threadset::AvlSet;
//!
//! // Descending order via a closure comparator.
//! let mut set = AvlSet::with_comparator(|a: &i32, b: &i32| b.cmp(a));
//! set.insert(1);
//! set.insert(3);
//! set.insert(2);
//!
//! let descending: Vec<&i32> = set.iter().collect();
//! assert_eq!(descending, vec![&3, &2, &1]);
//! ```

use std::cmp::Ordering;

/// A strict weak ordering over elements of type `T`.
///
/// Implementations must be consistent: for any `a`, `b`, `c`,
/// `compare(a, b)` always returns the same result, `compare(a, b)` is the
/// inverse of `compare(b, a)`, and equality (`Ordering::Equal`) is
/// transitive. The set's uniqueness guarantee is defined in terms of this
/// comparator, not `Eq`: elements the comparator calls equal are duplicates
/// even if they differ under `==`.
pub trait Comparator<T> {
    /// Compares two elements, returning their relative order.
    fn compare(&self, lhs: &T, rhs: &T) -> Ordering;
}

/// A zero-sized comparator that delegates to the `Ord` implementation of
/// the element type.
///
/// This is the default comparator of [`AvlSet`](crate::AvlSet), making
/// `AvlSet<T>` behave like an ordinary sorted set over `T: Ord`.
///
/// # Examples
///
/// ```rust
/// use std::cmp::Ordering;
/// use threadset::{Comparator, NaturalOrder};
///
/// assert_eq!(NaturalOrder.compare(&1, &2), Ordering::Less);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NaturalOrder;

impl<T: Ord> Comparator<T> for NaturalOrder {
    #[inline]
    fn compare(&self, lhs: &T, rhs: &T) -> Ordering {
        lhs.cmp(rhs)
    }
}

/// Any ordering closure is usable as a comparator directly.
impl<T, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, lhs: &T, rhs: &T) -> Ordering {
        self(lhs, rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_natural_order_matches_ord() {
        assert_eq!(NaturalOrder.compare(&1, &2), Ordering::Less);
        assert_eq!(NaturalOrder.compare(&2, &2), Ordering::Equal);
        assert_eq!(NaturalOrder.compare(&3, &2), Ordering::Greater);
    }

    #[rstest]
    fn test_closure_comparator_reverses() {
        let reverse = |a: &i32, b: &i32| b.cmp(a);
        assert_eq!(reverse.compare(&1, &2), Ordering::Greater);
        assert_eq!(reverse.compare(&2, &1), Ordering::Less);
    }
}
