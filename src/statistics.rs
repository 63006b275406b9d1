use alloc::collections::BTreeSet;

/// Frequency statistics over the members of an ordered collection.
///
/// Implemented by [`RbTree`](crate::RbTree) (over keys),
/// [`SortedMultiSet`](crate::SortedMultiSet) (over elements),
/// [`SortedMultiMap`](crate::SortedMultiMap) (over keys) and by the standard
/// [`BTreeSet`], where each requested value counts at most once.
///
/// `probability_of` treats the collection as a uniform draw over its stored
/// entries (multiplicity included), and `expected_value_of` is the plain
/// Bernoulli expectation over that draw.
pub trait Statistical {
    /// The value type the statistics range over.
    type Item;

    /// Total multiplicity of the given items in the collection.
    fn count_of(&self, items: &[Self::Item]) -> usize;

    /// Probability, in `[0, 1]`, that a uniformly drawn entry matches one of
    /// the given items. `0.0` for an empty collection.
    fn probability_of(&self, items: &[Self::Item]) -> f64;

    /// Expected number of matches over `trials` independent uniform draws.
    ///
    /// # Examples
    ///
    /// ```
    /// use scarlet_tree::{SortedMultiSet, Statistical};
    ///
    /// let rolls: SortedMultiSet<i32> = [1, 1, 2, 3, 3, 3].into();
    /// assert_eq!(rolls.expected_value_of(10, &[3]), 5.0);
    /// ```
    #[allow(clippy::cast_precision_loss)]
    fn expected_value_of(&self, trials: usize, items: &[Self::Item]) -> f64 {
        trials as f64 * self.probability_of(items)
    }
}

impl<T: Ord> Statistical for BTreeSet<T> {
    type Item = T;

    /// Number of the given items present in the set. A plain set holds each
    /// value at most once, so this is a membership count.
    fn count_of(&self, items: &[T]) -> usize {
        items.iter().filter(|item| self.contains(item)).count()
    }

    #[allow(clippy::cast_precision_loss)]
    fn probability_of(&self, items: &[T]) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.count_of(items) as f64 / self.len() as f64
        }
    }
}
