//! Monoid trait for combinable partial results
//!
//! Workers build partial results over disjoint slices of the input. As long
//! as those results form a monoid, the coordinator can merge them in any
//! grouping and still get the same answer:
//! - Associativity: (a ⊕ b) ⊕ c = a ⊕ (b ⊕ c)
//! - Identity: a ⊕ identity = identity ⊕ a = a

use smallvec::SmallVec;

/// A type with an associative combine and an identity element
pub trait Monoid: Clone + Send + Sync {
    /// Returns the identity element of the monoid
    ///
    /// The identity element must satisfy: a.combine(Self::identity()) == a
    /// for all values a of this type.
    fn identity() -> Self;

    /// Combines two elements of the monoid
    ///
    /// This operation must be associative: a.combine(b.combine(c)) == a.combine(b).combine(c)
    /// for all values a, b, c of this type.
    fn combine(&self, other: &Self) -> Self;
}

/// Extension trait for monoids that can be reduced from collections
pub trait MonoidReduce: Monoid {
    /// Reduces a collection of monoid elements to a single result
    ///
    /// Combines neighbours level by level, so the merge tree has depth
    /// O(log n). Order is preserved; commutativity is not required.
    fn reduce<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        let mut items: SmallVec<[Self; 16]> = iter.into_iter().collect();

        // Pairwise levels; an odd element is carried up unchanged
        while items.len() > 1 {
            let mut next_level = SmallVec::<[Self; 16]>::new();
            for pair in items.chunks(2) {
                match pair {
                    [left, right] => next_level.push(left.combine(right)),
                    [single] => next_level.push(single.clone()),
                    _ => {}
                }
            }

            items = next_level;
        }

        items.into_iter().next().unwrap_or_else(Self::identity)
    }

    /// Reduces a collection with a left-to-right fold from the identity
    fn fold_all<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        iter.into_iter()
            .fold(Self::identity(), |acc, item| acc.combine(&item))
    }
}

impl<T: Monoid> MonoidReduce for T {}
