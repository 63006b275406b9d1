use core::fmt;
use core::ops::{BitAnd, BitOr, BitOrAssign, BitXor, Sub, SubAssign};

use alloc::vec::Vec;

use crate::rb_tree::RbTree;
use crate::statistics::Statistical;

/// A sorted collection that keeps duplicate elements.
///
/// Backed by a multi-keyed [`RbTree`], so insertion, removal of a single
/// occurrence, and ordinal access are all O(log n) while iteration yields
/// elements in ascending order with their full multiplicity.
///
/// The algebra ([`union`], [`intersect`], [`subtract`], [`exclusive_or`])
/// treats multiplicity one-for-one, and each operation is also available as
/// an operator: `|`, `&`, `-`, `^`, plus `|=` and `-=`.
///
/// [`union`]: SortedMultiSet::union
/// [`intersect`]: SortedMultiSet::intersect
/// [`subtract`]: SortedMultiSet::subtract
/// [`exclusive_or`]: SortedMultiSet::exclusive_or
///
/// # Examples
///
/// ```
/// use scarlet_tree::SortedMultiSet;
///
/// let mut rolls = SortedMultiSet::new();
/// for roll in [3, 1, 3, 6, 3] {
///     rolls.insert(roll);
/// }
/// assert_eq!(rolls.len(), 5);
/// assert_eq!(rolls.to_vec(), [1, 3, 3, 3, 6]);
/// assert_eq!(rolls.select(2), 3);
/// ```
pub struct SortedMultiSet<T> {
    tree: RbTree<T, ()>,
}

impl<T> SortedMultiSet<T> {
    /// Creates an empty multiset.
    #[must_use]
    pub fn new() -> Self {
        Self { tree: RbTree::multi() }
    }

    /// The number of elements, duplicates counted.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.tree.len()
    }

    /// `true` if the multiset holds no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.tree.clear();
    }
}

impl<T: Ord + Clone> SortedMultiSet<T> {
    /// Adds one occurrence of `element`. Duplicates always accumulate.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn insert(&mut self, element: T) {
        self.tree.insert(element, None);
    }

    /// Removes **every** occurrence of each listed element.
    ///
    /// # Examples
    ///
    /// ```
    /// use scarlet_tree::SortedMultiSet;
    ///
    /// let mut set: SortedMultiSet<i32> = [1, 2, 2, 3].into();
    /// set.remove(&[2]);
    /// assert_eq!(set.to_vec(), [1, 3]);
    /// ```
    pub fn remove(&mut self, elements: &[T]) {
        self.tree.remove_all(elements);
    }

    /// Removes a single occurrence of `element`, returning `true` if one was
    /// present.
    pub fn remove_one(&mut self, element: &T) -> bool {
        let before = self.tree.len();
        let _ = self.tree.remove_one(element);
        self.tree.len() < before
    }

    /// `true` if **every** listed element is present. An empty list matches
    /// nothing, so it returns `false`.
    ///
    /// # Examples
    ///
    /// ```
    /// use scarlet_tree::SortedMultiSet;
    ///
    /// let set: SortedMultiSet<i32> = [1, 2, 2, 3].into();
    /// assert!(set.contains(&[1, 2]));
    /// assert!(!set.contains(&[1, 9]));
    /// assert!(!set.contains(&[]));
    /// ```
    #[must_use]
    pub fn contains(&self, elements: &[T]) -> bool {
        !elements.is_empty() && elements.iter().all(|element| self.tree.rank_of(element).is_some())
    }

    /// The element at zero-based sorted position `ordinal`, copied out.
    ///
    /// # Panics
    ///
    /// Panics if `ordinal >= len()`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn select(&self, ordinal: usize) -> T {
        self.tree.select(ordinal).0
    }

    /// The rank of the first occurrence matched while searching for
    /// `element`, or `None` if absent.
    #[must_use]
    pub fn index_of(&self, element: &T) -> Option<usize> {
        self.tree.rank_of(element)
    }

    /// All elements in ascending order, duplicates included.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.tree.to_vec().into_iter().map(|(element, _)| element).collect()
    }

    /// The multiset union: each element appears with the **larger** of its
    /// two multiplicities. `A ∪ A == A`.
    ///
    /// # Examples
    ///
    /// ```
    /// use scarlet_tree::SortedMultiSet;
    ///
    /// let a: SortedMultiSet<i32> = [1, 2, 2, 3].into();
    /// let b: SortedMultiSet<i32> = [2, 3, 4].into();
    /// assert_eq!(a.union(&b).to_vec(), [1, 2, 2, 3, 4]);
    /// ```
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let (left, right) = (self.to_vec(), other.to_vec());
        let (mut i, mut j) = (0, 0);
        let mut merged = Vec::with_capacity(left.len().max(right.len()));
        while i < left.len() && j < right.len() {
            match left[i].cmp(&right[j]) {
                core::cmp::Ordering::Less => {
                    merged.push(left[i].clone());
                    i += 1;
                }
                core::cmp::Ordering::Greater => {
                    merged.push(right[j].clone());
                    j += 1;
                }
                core::cmp::Ordering::Equal => {
                    // A shared occurrence counts once.
                    merged.push(left[i].clone());
                    i += 1;
                    j += 1;
                }
            }
        }
        merged.extend_from_slice(&left[i..]);
        merged.extend_from_slice(&right[j..]);
        merged.into_iter().collect()
    }

    /// The multiset intersection: each element appears with the **smaller**
    /// of its two multiplicities.
    ///
    /// # Examples
    ///
    /// ```
    /// use scarlet_tree::SortedMultiSet;
    ///
    /// let a: SortedMultiSet<i32> = [1, 2, 2, 3].into();
    /// let b: SortedMultiSet<i32> = [2, 3, 4].into();
    /// assert_eq!(a.intersect(&b).to_vec(), [2, 3]);
    /// ```
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Self {
        let (left, right) = (self.to_vec(), other.to_vec());
        let (mut i, mut j) = (0, 0);
        let mut shared = Vec::new();
        while i < left.len() && j < right.len() {
            match left[i].cmp(&right[j]) {
                core::cmp::Ordering::Less => i += 1,
                core::cmp::Ordering::Greater => j += 1,
                core::cmp::Ordering::Equal => {
                    shared.push(left[i].clone());
                    i += 1;
                    j += 1;
                }
            }
        }
        shared.into_iter().collect()
    }

    /// The multiset difference: occurrences in `other` cancel occurrences
    /// here one-for-one.
    ///
    /// # Examples
    ///
    /// ```
    /// use scarlet_tree::SortedMultiSet;
    ///
    /// let a: SortedMultiSet<i32> = [1, 2, 2, 3].into();
    /// let b: SortedMultiSet<i32> = [2, 3, 4].into();
    /// assert_eq!(a.subtract(&b).to_vec(), [1, 2]);
    /// ```
    #[must_use]
    pub fn subtract(&self, other: &Self) -> Self {
        let (left, right) = (self.to_vec(), other.to_vec());
        let (mut i, mut j) = (0, 0);
        let mut rest = Vec::new();
        while i < left.len() && j < right.len() {
            match left[i].cmp(&right[j]) {
                core::cmp::Ordering::Less => {
                    rest.push(left[i].clone());
                    i += 1;
                }
                core::cmp::Ordering::Greater => j += 1,
                core::cmp::Ordering::Equal => {
                    i += 1;
                    j += 1;
                }
            }
        }
        rest.extend_from_slice(&left[i..]);
        rest.into_iter().collect()
    }

    /// The symmetric difference over **values**: an element shared by both
    /// sides is dropped entirely, regardless of how its multiplicities
    /// compare.
    ///
    /// # Examples
    ///
    /// ```
    /// use scarlet_tree::SortedMultiSet;
    ///
    /// let a: SortedMultiSet<i32> = [1, 2, 2, 3].into();
    /// let b: SortedMultiSet<i32> = [2, 3, 4].into();
    /// assert_eq!(a.exclusive_or(&b).to_vec(), [1, 4]);
    /// ```
    #[must_use]
    pub fn exclusive_or(&self, other: &Self) -> Self {
        let (left, right) = (self.to_vec(), other.to_vec());
        let (mut i, mut j) = (0, 0);
        let mut unshared = Vec::new();
        while i < left.len() && j < right.len() {
            match left[i].cmp(&right[j]) {
                core::cmp::Ordering::Less => {
                    unshared.push(left[i].clone());
                    i += 1;
                }
                core::cmp::Ordering::Greater => {
                    unshared.push(right[j].clone());
                    j += 1;
                }
                core::cmp::Ordering::Equal => {
                    // Skip the whole equal run on both sides.
                    let shared = left[i].clone();
                    while i < left.len() && left[i] == shared {
                        i += 1;
                    }
                    while j < right.len() && right[j] == shared {
                        j += 1;
                    }
                }
            }
        }
        unshared.extend_from_slice(&left[i..]);
        unshared.extend_from_slice(&right[j..]);
        unshared.into_iter().collect()
    }

    /// `true` if the two multisets share no element.
    #[must_use]
    pub fn is_disjoint(&self, other: &Self) -> bool {
        self.intersect(other).is_empty()
    }

    /// `true` if every element here also occurs in `other` at least once.
    /// Multiplicity is not compared. Follows [`contains`], so an empty
    /// multiset is a subset of nothing.
    ///
    /// [`contains`]: SortedMultiSet::contains
    #[must_use]
    pub fn is_subset(&self, other: &Self) -> bool {
        other.contains(&self.to_vec())
    }

    /// A subset whose size differs from `other`'s.
    #[must_use]
    pub fn is_strict_subset(&self, other: &Self) -> bool {
        self.len() != other.len() && self.is_subset(other)
    }

    /// `true` if every element of `other` also occurs here at least once.
    #[must_use]
    pub fn is_superset(&self, other: &Self) -> bool {
        other.is_subset(self)
    }

    /// A superset that is not equal.
    #[must_use]
    pub fn is_strict_superset(&self, other: &Self) -> bool {
        other.is_strict_subset(self)
    }
}

impl<T: Ord + Clone> Statistical for SortedMultiSet<T> {
    type Item = T;

    /// Total multiplicity of the given elements.
    fn count_of(&self, items: &[T]) -> usize {
        self.tree.count_of(items)
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

impl<T> Default for SortedMultiSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for SortedMultiSet<T> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree.clone(),
        }
    }
}

impl<T: Ord + Clone + fmt::Debug> fmt::Debug for SortedMultiSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.to_vec()).finish()
    }
}

impl<T: Ord + Clone> PartialEq for SortedMultiSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.to_vec() == other.to_vec()
    }
}

impl<T: Ord + Clone> Eq for SortedMultiSet<T> {}

impl<T: Ord + Clone> PartialOrd for SortedMultiSet<T> {
    /// Ordering by containment: `Less` when the element sets nest one way
    /// only, `Greater` the other, `Equal` for equal multisets, `None` when
    /// neither side contains the other (or the sets merely differ in
    /// multiplicity).
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        let (subset, superset) = (self.is_subset(other), self.is_superset(other));
        if self == other {
            Some(core::cmp::Ordering::Equal)
        } else if subset && !superset {
            Some(core::cmp::Ordering::Less)
        } else if superset && !subset {
            Some(core::cmp::Ordering::Greater)
        } else {
            None
        }
    }
}

impl<T: Ord + Clone> FromIterator<T> for SortedMultiSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<T: Ord + Clone> Extend<T> for SortedMultiSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.insert(element);
        }
    }
}

impl<T: Ord + Clone, const N: usize> From<[T; N]> for SortedMultiSet<T> {
    fn from(elements: [T; N]) -> Self {
        elements.into_iter().collect()
    }
}

impl<T: Ord + Clone> BitOr for &SortedMultiSet<T> {
    type Output = SortedMultiSet<T>;

    fn bitor(self, rhs: Self) -> SortedMultiSet<T> {
        self.union(rhs)
    }
}

impl<T: Ord + Clone> BitOrAssign<&Self> for SortedMultiSet<T> {
    fn bitor_assign(&mut self, rhs: &Self) {
        *self = self.union(rhs);
    }
}

impl<T: Ord + Clone> BitAnd for &SortedMultiSet<T> {
    type Output = SortedMultiSet<T>;

    fn bitand(self, rhs: Self) -> SortedMultiSet<T> {
        self.intersect(rhs)
    }
}

impl<T: Ord + Clone> Sub for &SortedMultiSet<T> {
    type Output = SortedMultiSet<T>;

    fn sub(self, rhs: Self) -> SortedMultiSet<T> {
        self.subtract(rhs)
    }
}

impl<T: Ord + Clone> SubAssign<&Self> for SortedMultiSet<T> {
    fn sub_assign(&mut self, rhs: &Self) {
        *self = self.subtract(rhs);
    }
}

impl<T: Ord + Clone> BitXor for &SortedMultiSet<T> {
    type Output = SortedMultiSet<T>;

    fn bitxor(self, rhs: Self) -> SortedMultiSet<T> {
        self.exclusive_or(rhs)
    }
}
