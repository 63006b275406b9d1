use core::borrow::Borrow;
use core::fmt;
use core::ops::{BitAnd, BitOr, BitOrAssign, BitXor, Sub, SubAssign};

use alloc::vec::Vec;

use crate::multiset::SortedMultiSet;
use crate::rb_tree::RbTree;
use crate::statistics::Statistical;

/// A sorted key-value collection that keeps duplicate keys.
///
/// Backed by a multi-keyed [`RbTree`]: every [`insert`] adds a new entry even
/// when the key is already present, entries iterate in ascending key order,
/// and ordinal access is O(log n). Values are optional: an entry may carry a
/// key with no payload.
///
/// The set algebra (`|`, `&`, `-`, `^` and the named methods) compares
/// entries by **key only**; where both sides contribute an equal key, the
/// left operand's entry wins.
///
/// [`insert`]: SortedMultiMap::insert
///
/// # Examples
///
/// ```
/// use scarlet_tree::SortedMultiMap;
///
/// let mut scores = SortedMultiMap::new();
/// scores.insert("alice", 10);
/// scores.insert("alice", 12);
/// scores.insert("bob", 7);
///
/// assert_eq!(scores.len(), 3);
/// assert_eq!(scores.search(&["alice"]).len(), 2);
/// assert_eq!(scores.values(), [10, 12, 7]);
/// ```
pub struct SortedMultiMap<K, V> {
    tree: RbTree<K, V>,
}

impl<K, V> SortedMultiMap<K, V> {
    /// Creates an empty multimap.
    #[must_use]
    pub fn new() -> Self {
        Self { tree: RbTree::multi() }
    }

    /// The number of entries, duplicate keys counted.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.tree.len()
    }

    /// `true` if the multimap holds no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.tree.clear();
    }
}

impl<K: Ord + Clone, V: Clone> SortedMultiMap<K, V> {
    /// Adds an entry. A duplicate key never overwrites; the new entry sits
    /// beside the existing ones; use [`set`](SortedMultiMap::set) to
    /// overwrite.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn insert(&mut self, key: K, value: V) {
        self.tree.insert(key, Some(value));
    }

    /// The payload of the first entry matching `key` on the search path, or
    /// `None` if the key is absent or the entry carries no payload.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.tree.find(key)
    }

    /// Upsert: assigns `value` to **every** entry with this key, or inserts a
    /// fresh entry when the key is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use scarlet_tree::SortedMultiMap;
    ///
    /// let mut map = SortedMultiMap::new();
    /// map.insert("k", 1);
    /// map.insert("k", 2);
    /// map.set("k", Some(9));
    /// assert_eq!(map.to_vec(), [("k", Some(9)), ("k", Some(9))]);
    /// map.set("fresh", Some(3));
    /// assert_eq!(map.len(), 3);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n) when the key is present, since every instance is updated.
    pub fn set(&mut self, key: K, value: Option<V>) {
        if self.tree.rank_of(&key).is_some() {
            self.tree.update_value(&key, value);
        } else {
            self.tree.insert(key, value);
        }
    }

    /// Removes **every** entry whose key matches any of `keys`.
    pub fn remove(&mut self, keys: &[K]) {
        self.tree.remove_all(keys);
    }

    /// Removes a single entry for `key` and returns its payload. `None` if
    /// the key is absent (a removed entry with no payload also yields
    /// `None`).
    pub fn remove_one<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.tree.remove_one(key)
    }

    /// `true` if **every** listed key is present. An empty list returns
    /// `false`.
    #[must_use]
    pub fn contains(&self, keys: &[K]) -> bool {
        !keys.is_empty() && keys.iter().all(|key| self.tree.rank_of(key).is_some())
    }

    /// The copied entry at zero-based key-sorted position `ordinal`.
    ///
    /// # Panics
    ///
    /// Panics if `ordinal >= len()`.
    #[must_use]
    pub fn select(&self, ordinal: usize) -> (K, Option<V>) {
        self.tree.select(ordinal)
    }

    /// The rank of the first entry matched while searching for `key`, or
    /// `None` if absent.
    pub fn index_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.tree.rank_of(key)
    }

    /// Every key as a [`SortedMultiSet`], duplicates included.
    #[must_use]
    pub fn keys(&self) -> SortedMultiSet<K> {
        self.tree.to_vec().into_iter().map(|(key, _)| key).collect()
    }

    /// Every present payload, in key order. Entries without a payload are
    /// skipped.
    #[must_use]
    pub fn values(&self) -> Vec<V> {
        self.tree.to_vec().into_iter().filter_map(|(_, value)| value).collect()
    }

    /// All entries whose key matches any of `keys`, as a new multimap.
    ///
    /// # Examples
    ///
    /// ```
    /// use scarlet_tree::SortedMultiMap;
    ///
    /// let map: SortedMultiMap<&str, i32> = [("a", 1), ("a", 2), ("b", 3)].into();
    /// let hits = map.search(&["a"]);
    /// assert_eq!(hits.to_vec(), [("a", Some(1)), ("a", Some(2))]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n); duplicate keys may sit anywhere in the tree.
    #[must_use]
    pub fn search(&self, keys: &[K]) -> Self {
        let mut hits = Self::new();
        for (key, value) in self.tree.to_vec() {
            if keys.contains(&key) {
                hits.tree.insert(key, value);
            }
        }
        hits
    }

    /// All entries in ascending key order, copied out.
    #[must_use]
    pub fn to_vec(&self) -> Vec<(K, Option<V>)> {
        self.tree.to_vec()
    }

    /// The union by key, multiplicities merged like
    /// [`SortedMultiSet::union`]. Where both sides contribute an equal key,
    /// the entry comes from `self`.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let (left, right) = (self.to_vec(), other.to_vec());
        let (mut i, mut j) = (0, 0);
        let mut merged = Self::new();
        while i < left.len() && j < right.len() {
            match left[i].0.cmp(&right[j].0) {
                core::cmp::Ordering::Less => {
                    let (key, value) = left[i].clone();
                    merged.tree.insert(key, value);
                    i += 1;
                }
                core::cmp::Ordering::Greater => {
                    let (key, value) = right[j].clone();
                    merged.tree.insert(key, value);
                    j += 1;
                }
                core::cmp::Ordering::Equal => {
                    let (key, value) = left[i].clone();
                    merged.tree.insert(key, value);
                    i += 1;
                    j += 1;
                }
            }
        }
        for (key, value) in left[i..].iter().chain(&right[j..]).cloned() {
            merged.tree.insert(key, value);
        }
        merged
    }

    /// The intersection by key, keeping `self`'s entries.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Self {
        let (left, right) = (self.to_vec(), other.to_vec());
        let (mut i, mut j) = (0, 0);
        let mut shared = Self::new();
        while i < left.len() && j < right.len() {
            match left[i].0.cmp(&right[j].0) {
                core::cmp::Ordering::Less => i += 1,
                core::cmp::Ordering::Greater => j += 1,
                core::cmp::Ordering::Equal => {
                    let (key, value) = left[i].clone();
                    shared.tree.insert(key, value);
                    i += 1;
                    j += 1;
                }
            }
        }
        shared
    }

    /// The difference by key: each of `other`'s keys cancels one of `self`'s
    /// entries with that key.
    #[must_use]
    pub fn subtract(&self, other: &Self) -> Self {
        let (left, right) = (self.to_vec(), other.to_vec());
        let (mut i, mut j) = (0, 0);
        let mut rest = Self::new();
        while i < left.len() && j < right.len() {
            match left[i].0.cmp(&right[j].0) {
                core::cmp::Ordering::Less => {
                    let (key, value) = left[i].clone();
                    rest.tree.insert(key, value);
                    i += 1;
                }
                core::cmp::Ordering::Greater => j += 1,
                core::cmp::Ordering::Equal => {
                    i += 1;
                    j += 1;
                }
            }
        }
        for (key, value) in left[i..].iter().cloned() {
            rest.tree.insert(key, value);
        }
        rest
    }

    /// The symmetric difference by key: a key present on both sides is
    /// dropped entirely, with all its entries.
    #[must_use]
    pub fn exclusive_or(&self, other: &Self) -> Self {
        let (left, right) = (self.to_vec(), other.to_vec());
        let (mut i, mut j) = (0, 0);
        let mut unshared = Self::new();
        while i < left.len() && j < right.len() {
            match left[i].0.cmp(&right[j].0) {
                core::cmp::Ordering::Less => {
                    let (key, value) = left[i].clone();
                    unshared.tree.insert(key, value);
                    i += 1;
                }
                core::cmp::Ordering::Greater => {
                    let (key, value) = right[j].clone();
                    unshared.tree.insert(key, value);
                    j += 1;
                }
                core::cmp::Ordering::Equal => {
                    let shared = left[i].0.clone();
                    while i < left.len() && left[i].0 == shared {
                        i += 1;
                    }
                    while j < right.len() && right[j].0 == shared {
                        j += 1;
                    }
                }
            }
        }
        for (key, value) in left[i..].iter().chain(&right[j..]).cloned() {
            unshared.tree.insert(key, value);
        }
        unshared
    }
}

impl<K: Ord + Clone, V: Clone> Statistical for SortedMultiMap<K, V> {
    type Item = K;

    /// Total multiplicity of the given keys.
    fn count_of(&self, items: &[K]) -> usize {
        self.tree.count_of(items)
    }

    #[allow(clippy::cast_precision_loss)]
    fn probability_of(&self, items: &[K]) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.count_of(items) as f64 / self.len() as f64
        }
    }
}

impl<K, V> Default for SortedMultiMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone, V: Clone> Clone for SortedMultiMap<K, V> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree.clone(),
        }
    }
}

impl<K: Ord + Clone + fmt::Debug, V: Clone + fmt::Debug> fmt::Debug for SortedMultiMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.to_vec()).finish()
    }
}

impl<K: Ord + Clone, V: Clone + PartialEq> PartialEq for SortedMultiMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.to_vec() == other.to_vec()
    }
}

impl<K: Ord + Clone, V: Clone + Eq> Eq for SortedMultiMap<K, V> {}

impl<K: Ord + Clone, V: Clone> FromIterator<(K, V)> for SortedMultiMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K: Ord + Clone, V: Clone> Extend<(K, V)> for SortedMultiMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Ord + Clone, V: Clone, const N: usize> From<[(K, V); N]> for SortedMultiMap<K, V> {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl<K: Ord + Clone, V: Clone> BitOr for &SortedMultiMap<K, V> {
    type Output = SortedMultiMap<K, V>;

    fn bitor(self, rhs: Self) -> SortedMultiMap<K, V> {
        self.union(rhs)
    }
}

impl<K: Ord + Clone, V: Clone> BitOrAssign<&Self> for SortedMultiMap<K, V> {
    fn bitor_assign(&mut self, rhs: &Self) {
        *self = self.union(rhs);
    }
}

impl<K: Ord + Clone, V: Clone> BitAnd for &SortedMultiMap<K, V> {
    type Output = SortedMultiMap<K, V>;

    fn bitand(self, rhs: Self) -> SortedMultiMap<K, V> {
        self.intersect(rhs)
    }
}

impl<K: Ord + Clone, V: Clone> Sub for &SortedMultiMap<K, V> {
    type Output = SortedMultiMap<K, V>;

    fn sub(self, rhs: Self) -> SortedMultiMap<K, V> {
        self.subtract(rhs)
    }
}

impl<K: Ord + Clone, V: Clone> SubAssign<&Self> for SortedMultiMap<K, V> {
    fn sub_assign(&mut self, rhs: &Self) {
        *self = self.subtract(rhs);
    }
}

impl<K: Ord + Clone, V: Clone> BitXor for &SortedMultiMap<K, V> {
    type Output = SortedMultiMap<K, V>;

    fn bitxor(self, rhs: Self) -> SortedMultiMap<K, V> {
        self.exclusive_or(rhs)
    }
}
