use core::borrow::Borrow;
use core::fmt;

use alloc::vec::Vec;

use crate::raw::RawRbTree;
use crate::statistics::Statistical;

/// A red-black search tree with order-statistic support.
///
/// Every node carries its subtree size, so ordinal access ([`select`]) and
/// rank lookup ([`rank_of`]) run in O(log n) alongside the usual
/// insert/remove/find operations. The tree is constructed in one of two
/// modes, fixed for its lifetime: *unique* mode refuses duplicate keys,
/// *multi* mode stores any number of nodes per key.
///
/// Values are optional payloads: a node always has a key, but its value slot
/// may be empty. Operations hand out copied `(key, value)` pairs: no node
/// reference ever escapes, and the tree remains the sole owner of its nodes.
///
/// The tree assumes one logical owner; it does no internal locking and no
/// operation blocks or suspends.
///
/// [`select`]: RbTree::select
/// [`rank_of`]: RbTree::rank_of
///
/// # Examples
///
/// ```
/// use scarlet_tree::RbTree;
///
/// let mut ranking: RbTree<&str, u32> = RbTree::unique();
/// ranking.insert("carol", Some(92));
/// ranking.insert("alice", Some(100));
/// ranking.insert("bob", Some(85));
///
/// // Keys come back in sorted order, by ordinal.
/// assert_eq!(ranking.select(0), ("alice", Some(100)));
/// assert_eq!(ranking.rank_of("carol"), Some(2));
/// assert_eq!(ranking.find("bob"), Some(85));
/// ```
pub struct RbTree<K, V> {
    raw: RawRbTree<K, V>,
}

impl<K, V> RbTree<K, V> {
    /// Creates an empty tree that rejects duplicate keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use scarlet_tree::RbTree;
    ///
    /// let tree: RbTree<i32, i32> = RbTree::unique();
    /// assert!(tree.is_uniquely_keyed());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn unique() -> Self {
        Self {
            raw: RawRbTree::new(true),
        }
    }

    /// Creates an empty tree that accepts any number of nodes per key.
    ///
    /// # Examples
    ///
    /// ```
    /// use scarlet_tree::RbTree;
    ///
    /// let tree: RbTree<i32, i32> = RbTree::multi();
    /// assert!(!tree.is_uniquely_keyed());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn multi() -> Self {
        Self {
            raw: RawRbTree::new(false),
        }
    }

    /// Whether this tree was constructed in unique-key mode.
    #[must_use]
    pub const fn is_uniquely_keyed(&self) -> bool {
        self.raw.is_uniquely_keyed()
    }

    /// The number of nodes in the tree (duplicates counted).
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// `true` if the tree holds no nodes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.len() == 0
    }

    /// Removes every node.
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn clear(&mut self) {
        self.raw.clear();
    }
}

impl<K: Ord + Clone, V: Clone> RbTree<K, V> {
    /// Inserts a key with an optional payload.
    ///
    /// In unique mode, inserting an existing key is a no-op returning `false`
    /// and the stored value is **not** overwritten; use [`update_value`] to
    /// replace it. In multi mode insertion always succeeds and returns
    /// `true`, adding a new node alongside any same-keyed ones.
    ///
    /// [`update_value`]: RbTree::update_value
    ///
    /// # Examples
    ///
    /// ```
    /// use scarlet_tree::RbTree;
    ///
    /// let mut unique: RbTree<i32, &str> = RbTree::unique();
    /// assert!(unique.insert(1, Some("one")));
    /// assert!(!unique.insert(1, Some("uno")));
    /// assert_eq!(unique.find(&1), Some("one"));
    ///
    /// let mut multi: RbTree<i32, &str> = RbTree::multi();
    /// assert!(multi.insert(1, Some("one")));
    /// assert!(multi.insert(1, Some("uno")));
    /// assert_eq!(multi.len(), 2);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn insert(&mut self, key: K, value: Option<V>) -> bool {
        self.raw.insert(key, value)
    }

    /// Removes **every** node matching any of `keys`.
    ///
    /// # Examples
    ///
    /// ```
    /// use scarlet_tree::RbTree;
    ///
    /// let mut tree: RbTree<i32, i32> = RbTree::multi();
    /// for _ in 0..3 {
    ///     tree.insert(7, None);
    /// }
    /// tree.insert(8, None);
    /// tree.remove_all(&[7]);
    /// assert_eq!(tree.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(k log n) where k is the number of nodes removed.
    pub fn remove_all(&mut self, keys: &[K]) {
        self.raw.remove_all(keys);
    }

    /// Removes exactly one node for `key` (the first found on the search
    /// path) and returns its payload. `None` if the key is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use scarlet_tree::RbTree;
    ///
    /// let mut tree: RbTree<i32, &str> = RbTree::multi();
    /// tree.insert(2, Some("a"));
    /// tree.insert(2, Some("b"));
    /// assert!(tree.remove_one(&2).is_some());
    /// assert_eq!(tree.len(), 1);
    /// assert_eq!(tree.remove_one(&9), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn remove_one<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.remove_node(key).flatten()
    }

    /// Assigns `value` to **every** node whose key equals `key`; in a
    /// multi-keyed tree this updates all instances, not just one.
    ///
    /// # Examples
    ///
    /// ```
    /// use scarlet_tree::RbTree;
    ///
    /// let mut tree: RbTree<i32, &str> = RbTree::multi();
    /// tree.insert(4, Some("old"));
    /// tree.insert(4, Some("old"));
    /// tree.update_value(&4, Some("new"));
    /// assert_eq!(tree.select(0).1, Some("new"));
    /// assert_eq!(tree.select(1).1, Some("new"));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n), a full traversal, since same-keyed nodes may be scattered.
    pub fn update_value<Q>(&mut self, key: &Q, value: Option<V>)
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.update_value(key, value);
    }

    /// The payload of the first node matching `key` on the search path (not
    /// necessarily ordinal 0 among duplicates), or `None` if absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use scarlet_tree::RbTree;
    ///
    /// let mut tree: RbTree<i32, &str> = RbTree::unique();
    /// tree.insert(1, Some("one"));
    /// assert_eq!(tree.find(&1), Some("one"));
    /// assert_eq!(tree.find(&2), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn find<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.find(key)
    }

    /// The copied `(key, value)` pair at zero-based sorted position
    /// `ordinal`.
    ///
    /// # Panics
    ///
    /// Panics if `ordinal >= len()`. An out-of-range ordinal is a caller
    /// contract violation, not a recoverable condition.
    ///
    /// # Examples
    ///
    /// ```
    /// use scarlet_tree::RbTree;
    ///
    /// let mut tree: RbTree<i32, i32> = RbTree::unique();
    /// for key in [5, 3, 8, 1, 4] {
    ///     tree.insert(key, None);
    /// }
    /// let keys: Vec<i32> = (0..tree.len()).map(|i| tree.select(i).0).collect();
    /// assert_eq!(keys, [1, 3, 4, 5, 8]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn select(&self, ordinal: usize) -> (K, Option<V>) {
        self.raw.select(ordinal)
    }

    /// The in-order rank of the first node matched while descending for
    /// `key`, or `None` if the key is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use scarlet_tree::RbTree;
    ///
    /// let mut tree: RbTree<i32, i32> = RbTree::unique();
    /// for key in [10, 20, 30] {
    ///     tree.insert(key, None);
    /// }
    /// assert_eq!(tree.rank_of(&20), Some(1));
    /// assert_eq!(tree.rank_of(&15), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn rank_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.rank_of_first(key)
    }

    /// All pairs in ascending key order, copied out.
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn to_vec(&self) -> Vec<(K, Option<V>)> {
        self.raw.in_order()
    }
}

impl<K: Ord + Clone, V: Clone> Statistical for RbTree<K, V> {
    type Item = K;

    /// Total multiplicity of the given keys. One full traversal per key.
    ///
    /// # Complexity
    ///
    /// O(n) per requested key.
    fn count_of(&self, items: &[K]) -> usize {
        self.raw.count_of(items)
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

impl<K: Clone, V: Clone> Clone for RbTree<K, V> {
    fn clone(&self) -> Self {
        Self {
            raw: self.raw.clone(),
        }
    }
}

impl<K: Ord + Clone + fmt::Debug, V: Clone + fmt::Debug> fmt::Debug for RbTree<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.to_vec()).finish()
    }
}

impl<K: Ord + Clone, V: Clone + PartialEq> PartialEq for RbTree<K, V> {
    /// Trees are equal when they hold the same pairs in the same order,
    /// regardless of internal shape.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.to_vec() == other.to_vec()
    }
}

impl<K: Ord + Clone, V: Clone + Eq> Eq for RbTree<K, V> {}
