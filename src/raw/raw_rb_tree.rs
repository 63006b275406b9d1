use core::borrow::Borrow;
use core::cmp::Ordering;

use alloc::vec::Vec;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Color, Node};

/// The core red-black tree backing [`RbTree`](crate::RbTree).
///
/// Every node lives in the arena and is addressed by `Handle`; `nil` names
/// the single sentinel slot that stands in for "no child"/"no parent". The
/// sentinel is allocated first, is always black with `order == 0`, and its
/// key/value are never read. Its links are only ever written transiently, so
/// the delete fixup can climb from a spliced-in sentinel child.
///
/// Beyond the classic red-black discipline, every node carries `order`, the
/// number of nodes in its subtree. All rebalancing paths repair it in place,
/// which is what makes `select` and `rank_of_first` O(log n).
pub(crate) struct RawRbTree<K, V> {
    nodes: Arena<Node<K, V>>,
    root: Handle,
    nil: Handle,
    len: usize,
    uniquely_keyed: bool,
}

impl<K, V> RawRbTree<K, V> {
    /// Creates an empty tree. `uniquely_keyed` fixes the duplicate policy for
    /// the lifetime of the tree.
    pub(crate) fn new(uniquely_keyed: bool) -> Self {
        let mut nodes = Arena::new();
        let nil = nodes.alloc(Node::sentinel());
        let mut tree = Self {
            nodes,
            root: nil,
            nil,
            len: 0,
            uniquely_keyed,
        };
        // The sentinel's links point at itself.
        let sentinel = tree.node_mut(nil);
        sentinel.parent = nil;
        sentinel.left = nil;
        sentinel.right = nil;
        tree
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) const fn is_uniquely_keyed(&self) -> bool {
        self.uniquely_keyed
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        let nil = self.nodes.alloc(Node::sentinel());
        let sentinel = self.node_mut(nil);
        sentinel.parent = nil;
        sentinel.left = nil;
        sentinel.right = nil;
        self.nil = nil;
        self.root = nil;
        self.len = 0;
    }

    #[inline]
    fn node(&self, handle: Handle) -> &Node<K, V> {
        self.nodes.get(handle)
    }

    #[inline]
    fn node_mut(&mut self, handle: Handle) -> &mut Node<K, V> {
        self.nodes.get_mut(handle)
    }
}

impl<K: Ord + Clone, V: Clone> RawRbTree<K, V> {
    /// Inserts a key and optional payload.
    ///
    /// In unique mode an existing key makes this a no-op returning `false`;
    /// the stored value is not touched. In multi mode insertion always
    /// succeeds, placing the new node beside any same-keyed nodes (equal keys
    /// descend right, so the first match on a search path is the topmost
    /// instance).
    pub(crate) fn insert(&mut self, key: K, value: Option<V>) -> bool {
        let mut parent = self.nil;
        let mut cursor = self.root;
        let mut went_left = false;
        while cursor != self.nil {
            let node = self.node(cursor);
            match key.cmp(node.key()) {
                Ordering::Less => {
                    parent = cursor;
                    went_left = true;
                    cursor = node.left;
                }
                Ordering::Equal if self.uniquely_keyed => return false,
                Ordering::Equal | Ordering::Greater => {
                    parent = cursor;
                    went_left = false;
                    cursor = node.right;
                }
            }
        }

        let fresh = self.nodes.alloc(Node::new(key, value, parent, self.nil));
        if parent == self.nil {
            self.root = fresh;
        } else if went_left {
            self.node_mut(parent).left = fresh;
        } else {
            self.node_mut(parent).right = fresh;
        }

        // Every ancestor gained a node; repair `order` before rebalancing so
        // the rotations below start from correct subtree counts.
        let mut ancestor = parent;
        while ancestor != self.nil {
            self.node_mut(ancestor).order += 1;
            ancestor = self.node(ancestor).parent;
        }

        self.len += 1;
        self.insert_fixup(fresh);
        true
    }

    /// Removes one node per call for `key`, the first found on the descent
    /// path. `Some(payload)` if a node was removed, `None` if absent.
    pub(crate) fn remove_node<Q>(&mut self, key: &Q) -> Option<Option<V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let target = self.find_node(key)?;
        Some(self.delete(target))
    }

    /// Removes every node matching any of `keys`.
    pub(crate) fn remove_all(&mut self, keys: &[K]) {
        for key in keys {
            while self.remove_node(key).is_some() {}
        }
    }

    /// Assigns `value` to every node whose key equals `key`. Multi-keyed
    /// trees update all instances, which is why this is a full traversal.
    pub(crate) fn update_value<Q>(&mut self, key: &Q, value: Option<V>)
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut stack: Vec<Handle> = Vec::new();
        if self.root != self.nil {
            stack.push(self.root);
        }
        while let Some(handle) = stack.pop() {
            let node = self.node(handle);
            let (left, right) = (node.left, node.right);
            if node.key().borrow() == key {
                self.node_mut(handle).value = value.clone();
            }
            if left != self.nil {
                stack.push(left);
            }
            if right != self.nil {
                stack.push(right);
            }
        }
    }

    /// The payload of the first node matching `key` on the search path, or
    /// `None` if the key is absent.
    pub(crate) fn find<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.find_node(key).and_then(|handle| self.node(handle).value.clone())
    }

    /// The copied pair at zero-based sorted position `ordinal`.
    ///
    /// An out-of-range ordinal is a caller bug, not a recoverable condition.
    pub(crate) fn select(&self, ordinal: usize) -> (K, Option<V>) {
        assert!(ordinal < self.len, "`RawRbTree::select()` - `ordinal` is out of range!");
        let mut cursor = self.root;
        let mut remaining = ordinal;
        loop {
            let node = self.node(cursor);
            let left_order = self.node(node.left).order;
            match remaining.cmp(&left_order) {
                Ordering::Less => cursor = node.left,
                Ordering::Equal => return (node.key().clone(), node.value.clone()),
                Ordering::Greater => {
                    remaining -= left_order + 1;
                    cursor = node.right;
                }
            }
        }
    }

    /// The in-order rank of the first node matching `key` on the descent
    /// path, or `None` if absent. Walks from the match back to the root,
    /// adding the left sibling subtree at every right turn.
    pub(crate) fn rank_of_first<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let found = self.find_node(key)?;
        let mut rank = self.node(self.node(found).left).order;
        let mut cursor = found;
        while cursor != self.root {
            let parent = self.node(cursor).parent;
            if cursor == self.node(parent).right {
                rank += self.node(self.node(parent).left).order + 1;
            }
            cursor = parent;
        }
        Some(rank)
    }

    /// Total multiplicity of the given keys. One full traversal per requested
    /// key; duplicates may be scattered, so rank arithmetic does not apply.
    pub(crate) fn count_of(&self, keys: &[K]) -> usize {
        keys.iter().map(|key| self.count_one(key)).sum()
    }

    /// All pairs in ascending key order, copied out.
    pub(crate) fn in_order(&self) -> Vec<(K, Option<V>)> {
        let mut out = Vec::with_capacity(self.len);
        let mut stack: Vec<Handle> = Vec::new();
        let mut cursor = self.root;
        loop {
            while cursor != self.nil {
                stack.push(cursor);
                cursor = self.node(cursor).left;
            }
            let Some(handle) = stack.pop() else { break };
            let node = self.node(handle);
            out.push((node.key().clone(), node.value.clone()));
            cursor = node.right;
        }
        out
    }

    fn count_one(&self, key: &K) -> usize {
        let mut count = 0;
        let mut stack: Vec<Handle> = Vec::new();
        if self.root != self.nil {
            stack.push(self.root);
        }
        while let Some(handle) = stack.pop() {
            let node = self.node(handle);
            if node.key() == key {
                count += 1;
            }
            if node.left != self.nil {
                stack.push(node.left);
            }
            if node.right != self.nil {
                stack.push(node.right);
            }
        }
        count
    }

    fn find_node<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut cursor = self.root;
        while cursor != self.nil {
            let node = self.node(cursor);
            match key.cmp(node.key().borrow()) {
                Ordering::Less => cursor = node.left,
                Ordering::Greater => cursor = node.right,
                Ordering::Equal => return Some(cursor),
            }
        }
        None
    }

    fn minimum(&self, mut cursor: Handle) -> Handle {
        while self.node(cursor).left != self.nil {
            cursor = self.node(cursor).left;
        }
        cursor
    }

    /// Unlinks `target` and returns its payload.
    fn delete(&mut self, target: Handle) -> Option<V> {
        let mut spliced_color = self.node(target).color;
        let replacement;

        if self.node(target).left == self.nil {
            self.shrink_to_root(self.node(target).parent);
            replacement = self.node(target).right;
            self.transplant(target, replacement);
        } else if self.node(target).right == self.nil {
            self.shrink_to_root(self.node(target).parent);
            replacement = self.node(target).left;
            self.transplant(target, replacement);
        } else {
            // Two real children: splice out the in-order successor instead,
            // then let it take over the target's place, color and order.
            let successor = self.minimum(self.node(target).right);
            spliced_color = self.node(successor).color;
            self.shrink_to_root(self.node(successor).parent);
            replacement = self.node(successor).right;
            if self.node(successor).parent == target {
                // `replacement` may be the sentinel; the transient parent
                // write is what lets the fixup climb out of it.
                self.node_mut(replacement).parent = successor;
            } else {
                self.transplant(successor, replacement);
                let right = self.node(target).right;
                self.node_mut(successor).right = right;
                self.node_mut(right).parent = successor;
            }
            self.transplant(target, successor);
            let left = self.node(target).left;
            self.node_mut(successor).left = left;
            self.node_mut(left).parent = successor;
            self.node_mut(successor).color = self.node(target).color;
            let order = self.node(left).order + self.node(self.node(successor).right).order + 1;
            self.node_mut(successor).order = order;
        }

        if spliced_color == Color::Black {
            self.delete_fixup(replacement);
        }
        self.len -= 1;
        self.nodes.take(target).into_pair().1
    }

    /// Replaces the subtree rooted at `out` with the one rooted at `in_`.
    /// Writes `in_.parent` even when `in_` is the sentinel; the delete fixup
    /// relies on that transient link.
    fn transplant(&mut self, out: Handle, in_: Handle) {
        let parent = self.node(out).parent;
        if parent == self.nil {
            self.root = in_;
        } else if out == self.node(parent).left {
            self.node_mut(parent).left = in_;
        } else {
            self.node_mut(parent).right = in_;
        }
        self.node_mut(in_).parent = parent;
    }

    /// Decrements `order` from `ancestor` up to the root: the subtree under
    /// each of them is about to lose one node.
    fn shrink_to_root(&mut self, mut ancestor: Handle) {
        while ancestor != self.nil {
            self.node_mut(ancestor).order -= 1;
            ancestor = self.node(ancestor).parent;
        }
    }

    fn insert_fixup(&mut self, mut fresh: Handle) {
        loop {
            let parent = self.node(fresh).parent;
            if self.node(parent).color != Color::Red {
                break;
            }
            // A red parent is never the root, so the grandparent is real.
            let grand = self.node(parent).parent;
            if parent == self.node(grand).left {
                let uncle = self.node(grand).right;
                if self.node(uncle).color == Color::Red {
                    self.node_mut(parent).color = Color::Black;
                    self.node_mut(uncle).color = Color::Black;
                    self.node_mut(grand).color = Color::Red;
                    fresh = grand;
                } else {
                    if fresh == self.node(parent).right {
                        // Triangle: align into a line first.
                        fresh = parent;
                        self.rotate_left(fresh);
                    }
                    let parent = self.node(fresh).parent;
                    let grand = self.node(parent).parent;
                    self.node_mut(parent).color = Color::Black;
                    self.node_mut(grand).color = Color::Red;
                    self.rotate_right(grand);
                }
            } else {
                let uncle = self.node(grand).left;
                if self.node(uncle).color == Color::Red {
                    self.node_mut(parent).color = Color::Black;
                    self.node_mut(uncle).color = Color::Black;
                    self.node_mut(grand).color = Color::Red;
                    fresh = grand;
                } else {
                    if fresh == self.node(parent).left {
                        fresh = parent;
                        self.rotate_right(fresh);
                    }
                    let parent = self.node(fresh).parent;
                    let grand = self.node(parent).parent;
                    self.node_mut(parent).color = Color::Black;
                    self.node_mut(grand).color = Color::Red;
                    self.rotate_left(grand);
                }
            }
        }
        let root = self.root;
        self.node_mut(root).color = Color::Black;
    }

    fn delete_fixup(&mut self, mut short: Handle) {
        while short != self.root && self.node(short).color == Color::Black {
            let parent = self.node(short).parent;
            if short == self.node(parent).left {
                let mut sibling = self.node(parent).right;
                if self.node(sibling).color == Color::Red {
                    self.node_mut(sibling).color = Color::Black;
                    self.node_mut(parent).color = Color::Red;
                    self.rotate_left(parent);
                    sibling = self.node(self.node(short).parent).right;
                }
                let near = self.node(sibling).left;
                let far = self.node(sibling).right;
                if self.node(near).color == Color::Black && self.node(far).color == Color::Black {
                    self.node_mut(sibling).color = Color::Red;
                    short = self.node(short).parent;
                } else {
                    if self.node(far).color == Color::Black {
                        self.node_mut(near).color = Color::Black;
                        self.node_mut(sibling).color = Color::Red;
                        self.rotate_right(sibling);
                        sibling = self.node(self.node(short).parent).right;
                    }
                    let parent = self.node(short).parent;
                    self.node_mut(sibling).color = self.node(parent).color;
                    self.node_mut(parent).color = Color::Black;
                    let far = self.node(sibling).right;
                    self.node_mut(far).color = Color::Black;
                    self.rotate_left(parent);
                    short = self.root;
                }
            } else {
                let mut sibling = self.node(parent).left;
                if self.node(sibling).color == Color::Red {
                    self.node_mut(sibling).color = Color::Black;
                    self.node_mut(parent).color = Color::Red;
                    self.rotate_right(parent);
                    sibling = self.node(self.node(short).parent).left;
                }
                let near = self.node(sibling).right;
                let far = self.node(sibling).left;
                if self.node(near).color == Color::Black && self.node(far).color == Color::Black {
                    self.node_mut(sibling).color = Color::Red;
                    short = self.node(short).parent;
                } else {
                    if self.node(far).color == Color::Black {
                        self.node_mut(near).color = Color::Black;
                        self.node_mut(sibling).color = Color::Red;
                        self.rotate_left(sibling);
                        sibling = self.node(self.node(short).parent).left;
                    }
                    let parent = self.node(short).parent;
                    self.node_mut(sibling).color = self.node(parent).color;
                    self.node_mut(parent).color = Color::Black;
                    let far = self.node(sibling).left;
                    self.node_mut(far).color = Color::Black;
                    self.rotate_right(parent);
                    short = self.root;
                }
            }
        }
        self.node_mut(short).color = Color::Black;
    }

    /// Left rotation at `pivot`. The riser takes over the pivot's whole span
    /// (`riser.order = pivot.order`), then the pivot's count is rebuilt from
    /// its new children, the step a vanilla red-black port forgets.
    fn rotate_left(&mut self, pivot: Handle) {
        let riser = self.node(pivot).right;
        let transfer = self.node(riser).left;
        self.node_mut(pivot).right = transfer;
        if transfer != self.nil {
            self.node_mut(transfer).parent = pivot;
        }
        let parent = self.node(pivot).parent;
        self.node_mut(riser).parent = parent;
        if parent == self.nil {
            self.root = riser;
        } else if pivot == self.node(parent).left {
            self.node_mut(parent).left = riser;
        } else {
            self.node_mut(parent).right = riser;
        }
        self.node_mut(riser).left = pivot;
        self.node_mut(pivot).parent = riser;

        self.node_mut(riser).order = self.node(pivot).order;
        let rebuilt = self.node(self.node(pivot).left).order + self.node(self.node(pivot).right).order + 1;
        self.node_mut(pivot).order = rebuilt;
    }

    /// Mirror of [`rotate_left`](Self::rotate_left).
    fn rotate_right(&mut self, pivot: Handle) {
        let riser = self.node(pivot).left;
        let transfer = self.node(riser).right;
        self.node_mut(pivot).left = transfer;
        if transfer != self.nil {
            self.node_mut(transfer).parent = pivot;
        }
        let parent = self.node(pivot).parent;
        self.node_mut(riser).parent = parent;
        if parent == self.nil {
            self.root = riser;
        } else if pivot == self.node(parent).right {
            self.node_mut(parent).right = riser;
        } else {
            self.node_mut(parent).left = riser;
        }
        self.node_mut(riser).right = pivot;
        self.node_mut(pivot).parent = riser;

        self.node_mut(riser).order = self.node(pivot).order;
        let rebuilt = self.node(self.node(pivot).left).order + self.node(self.node(pivot).right).order + 1;
        self.node_mut(pivot).order = rebuilt;
    }
}

impl<K: Clone, V: Clone> Clone for RawRbTree<K, V> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
            root: self.root,
            nil: self.nil,
            len: self.len,
            uniquely_keyed: self.uniquely_keyed,
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::collections::BTreeMap;
    use alloc::vec;
    use proptest::prelude::*;

    impl<K: Ord + Clone, V: Clone> RawRbTree<K, V> {
        /// Checks every structural invariant and panics on the first breach.
        pub(crate) fn validate_invariants(&self) {
            let sentinel = self.node(self.nil);
            assert_eq!(sentinel.order, 0, "sentinel order must stay 0");
            assert_eq!(sentinel.color, Color::Black, "sentinel must stay black");
            if self.root == self.nil {
                assert_eq!(self.len, 0, "empty tree must report len 0");
                return;
            }
            assert_eq!(self.node(self.root).color, Color::Black, "root must be black");
            let (size, _) = self.validate_node(self.root);
            assert_eq!(size, self.len, "len must match the reachable node count");
            let pairs = self.in_order();
            for window in pairs.windows(2) {
                assert!(window[0].0 <= window[1].0, "in-order keys must ascend");
            }
        }

        /// Returns (subtree size, black height) for the subtree at `handle`.
        fn validate_node(&self, handle: Handle) -> (usize, usize) {
            if handle == self.nil {
                return (0, 1);
            }
            let node = self.node(handle);
            if node.color == Color::Red {
                assert_eq!(self.node(node.left).color, Color::Black, "red node with red left child");
                assert_eq!(self.node(node.right).color, Color::Black, "red node with red right child");
            }
            if node.left != self.nil {
                assert_eq!(self.node(node.left).parent, handle, "left child parent link broken");
            }
            if node.right != self.nil {
                assert_eq!(self.node(node.right).parent, handle, "right child parent link broken");
            }
            let (left_size, left_black) = self.validate_node(node.left);
            let (right_size, right_black) = self.validate_node(node.right);
            assert_eq!(left_black, right_black, "unequal black heights");
            assert_eq!(node.order, left_size + right_size + 1, "order must be 1 + left.order + right.order");
            (left_size + right_size + 1, left_black + usize::from(node.color == Color::Black))
        }
    }

    #[derive(Clone, Debug)]
    enum TreeOp {
        Insert(i16),
        RemoveOne(i16),
        Find(i16),
        Select(usize),
        Rank(i16),
    }

    fn op_strategy() -> impl Strategy<Value = TreeOp> {
        // A tight key range forces collisions, which is where the duplicate
        // handling and order bookkeeping earn their keep.
        let key = -40i16..40i16;
        prop_oneof![
            6 => key.clone().prop_map(TreeOp::Insert),
            3 => key.clone().prop_map(TreeOp::RemoveOne),
            2 => key.clone().prop_map(TreeOp::Find),
            2 => any::<usize>().prop_map(TreeOp::Select),
            2 => key.prop_map(TreeOp::Rank),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// Unique mode must agree with `BTreeMap` at every step, with all
        /// invariants intact after every mutation.
        #[test]
        fn unique_mode_matches_btreemap(ops in prop::collection::vec(op_strategy(), 0..300)) {
            let mut tree: RawRbTree<i16, i16> = RawRbTree::new(true);
            let mut model: BTreeMap<i16, i16> = BTreeMap::new();

            for op in ops {
                match op {
                    TreeOp::Insert(key) => {
                        let inserted = tree.insert(key, Some(key.wrapping_mul(3)));
                        let expected = !model.contains_key(&key);
                        if expected {
                            model.insert(key, key.wrapping_mul(3));
                        }
                        prop_assert_eq!(inserted, expected);
                    }
                    TreeOp::RemoveOne(key) => {
                        let removed = tree.remove_node(&key);
                        let expected = model.remove(&key).map(Some);
                        prop_assert_eq!(removed, expected);
                    }
                    TreeOp::Find(key) => {
                        prop_assert_eq!(tree.find(&key), model.get(&key).copied());
                    }
                    TreeOp::Select(ordinal) => {
                        if model.is_empty() {
                            continue;
                        }
                        let ordinal = ordinal % model.len();
                        let (key, value) = tree.select(ordinal);
                        let (expected_key, expected_value) = model.iter().nth(ordinal).map(|(k, v)| (*k, *v)).unwrap();
                        prop_assert_eq!(key, expected_key);
                        prop_assert_eq!(value, Some(expected_value));
                    }
                    TreeOp::Rank(key) => {
                        let expected = model.contains_key(&key).then(|| model.range(..key).count());
                        prop_assert_eq!(tree.rank_of_first(&key), expected);
                    }
                }
                tree.validate_invariants();
                prop_assert_eq!(tree.len(), model.len());
            }
        }

        /// Multi mode against a sorted-vector model: multiplicities, ordinal
        /// reads and invariants after every operation.
        #[test]
        fn multi_mode_matches_sorted_model(ops in prop::collection::vec(op_strategy(), 0..300)) {
            let mut tree: RawRbTree<i16, i16> = RawRbTree::new(false);
            let mut model: Vec<i16> = Vec::new();

            for op in ops {
                match op {
                    TreeOp::Insert(key) => {
                        prop_assert!(tree.insert(key, Some(key)));
                        let at = model.partition_point(|existing| *existing <= key);
                        model.insert(at, key);
                    }
                    TreeOp::RemoveOne(key) => {
                        let removed = tree.remove_node(&key).is_some();
                        let expected = model.iter().position(|existing| *existing == key);
                        prop_assert_eq!(removed, expected.is_some());
                        if let Some(at) = expected {
                            model.remove(at);
                        }
                    }
                    TreeOp::Find(key) => {
                        let expected = model.contains(&key).then_some(key);
                        prop_assert_eq!(tree.find(&key), expected);
                    }
                    TreeOp::Select(ordinal) => {
                        if model.is_empty() {
                            continue;
                        }
                        let ordinal = ordinal % model.len();
                        prop_assert_eq!(tree.select(ordinal).0, model[ordinal]);
                    }
                    TreeOp::Rank(key) => {
                        // The reported rank is the first match on the descent
                        // path, which rotations may place anywhere inside the
                        // equal run; any rank holding the key is correct.
                        match tree.rank_of_first(&key) {
                            Some(rank) => prop_assert_eq!(model[rank], key),
                            None => prop_assert!(!model.contains(&key)),
                        }
                    }
                }
                tree.validate_invariants();
                prop_assert_eq!(tree.len(), model.len());
                prop_assert_eq!(tree.count_of(&[7]), model.iter().filter(|existing| **existing == 7).count());
            }
        }
    }

    #[test]
    fn insert_returns_false_on_duplicate_in_unique_mode() {
        let mut tree: RawRbTree<u32, &str> = RawRbTree::new(true);
        assert!(tree.insert(1, Some("first")));
        assert!(!tree.insert(1, Some("second")));
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.find(&1), Some("first"));
    }

    #[test]
    fn update_value_touches_every_instance() {
        let mut tree: RawRbTree<u32, u32> = RawRbTree::new(false);
        for value in 0..4 {
            tree.insert(9, Some(value));
            tree.insert(5, Some(value));
        }
        tree.update_value(&9, Some(100));
        for (key, value) in tree.in_order() {
            if key == 9 {
                assert_eq!(value, Some(100));
            } else {
                assert!(value.is_some_and(|v| v < 4));
            }
        }
    }

    #[test]
    fn remove_all_drains_every_instance() {
        let mut tree: RawRbTree<u32, u32> = RawRbTree::new(false);
        for _ in 0..5 {
            tree.insert(3, None);
            tree.insert(8, None);
        }
        tree.insert(1, None);
        tree.remove_all(&[3, 8]);
        tree.validate_invariants();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.count_of(&[3, 8]), 0);
        assert_eq!(tree.count_of(&[1]), 1);
    }

    /// Insert-fixup rotations lift an interior duplicate to the top of the
    /// equal run, so the first match on the descent path need not be the
    /// leftmost occurrence. The reported rank must still land on the key.
    #[test]
    fn rank_of_first_lands_inside_the_equal_run() {
        let mut tree: RawRbTree<u32, u32> = RawRbTree::new(false);
        for _ in 0..5 {
            tree.insert(3, None);
        }
        tree.insert(1, None);
        tree.insert(9, None);

        let rank = tree.rank_of_first(&3).unwrap();
        assert_eq!(tree.select(rank).0, 3);
        // The run of 3s occupies ranks 1..=5; with five duplicates the
        // descent stops above the leftmost one.
        assert!((1..=5).contains(&rank));
        assert!(rank > 1);
    }

    #[test]
    #[should_panic(expected = "`RawRbTree::select()` - `ordinal` is out of range!")]
    fn select_out_of_range_panics() {
        let mut tree: RawRbTree<u32, u32> = RawRbTree::new(true);
        tree.insert(1, None);
        let _ = tree.select(1);
    }

    /// Keep removing the current root of a 7-node tree; invariants must hold
    /// after every single removal.
    #[test]
    fn repeated_root_removal_keeps_invariants() {
        let mut tree: RawRbTree<u32, u32> = RawRbTree::new(true);
        for key in [4, 2, 6, 1, 3, 5, 7] {
            tree.insert(key, Some(key * 10));
        }
        while tree.len() > 0 {
            let root_key = *tree.node(tree.root).key();
            assert!(tree.remove_node(&root_key).is_some());
            tree.validate_invariants();
        }
        assert_eq!(tree.len(), 0);
    }

    #[test]
    fn shuffled_insertion_reads_back_sorted() {
        let mut tree: RawRbTree<i32, i32> = RawRbTree::new(true);
        for key in [5, 3, 8, 1, 4] {
            tree.insert(key, Some(key));
        }
        let keys: Vec<i32> = (0..tree.len()).map(|ordinal| tree.select(ordinal).0).collect();
        assert_eq!(keys, vec![1, 3, 4, 5, 8]);
    }
}
