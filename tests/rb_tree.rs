//! Integration tests for the public `RbTree` API.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use scarlet_tree::{RbTree, Statistical};

#[test]
fn unique_mode_refuses_duplicates_without_overwriting() {
    let mut tree: RbTree<u32, &str> = RbTree::unique();
    assert!(tree.insert(7, Some("kept")));
    assert!(!tree.insert(7, Some("dropped")));
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.find(&7), Some("kept"));
}

#[test]
fn multi_mode_keeps_every_instance() {
    let mut tree: RbTree<u32, u32> = RbTree::multi();
    for value in 0..4 {
        assert!(tree.insert(7, Some(value)));
    }
    assert_eq!(tree.len(), 4);
    assert_eq!(tree.count_of(&[7]), 4);
}

#[test]
fn shuffled_insertion_selects_in_sorted_order() {
    let mut tree: RbTree<i32, i32> = RbTree::unique();
    for key in [5, 3, 8, 1, 4] {
        tree.insert(key, None);
    }
    let keys: Vec<i32> = (0..tree.len()).map(|ordinal| tree.select(ordinal).0).collect();
    assert_eq!(keys, [1, 3, 4, 5, 8]);
    assert_eq!(tree.rank_of(&4), Some(2));
    assert_eq!(tree.rank_of(&6), None);
}

#[test]
fn update_value_reaches_every_duplicate() {
    let mut tree: RbTree<u32, &str> = RbTree::multi();
    for _ in 0..3 {
        tree.insert(2, Some("old"));
    }
    tree.insert(1, Some("other"));
    tree.update_value(&2, Some("new"));
    for ordinal in 0..tree.len() {
        let (key, value) = tree.select(ordinal);
        if key == 2 {
            assert_eq!(value, Some("new"));
        } else {
            assert_eq!(value, Some("other"));
        }
    }
}

#[test]
fn remove_all_drains_and_remove_one_takes_single_nodes() {
    let mut tree: RbTree<u32, u32> = RbTree::multi();
    for key in [3, 3, 3, 5, 5, 9] {
        tree.insert(key, None);
    }
    tree.remove_all(&[3]);
    assert_eq!(tree.len(), 3);
    assert_eq!(tree.count_of(&[3]), 0);

    assert!(tree.remove_one(&5).is_none()); // entry had no payload
    assert_eq!(tree.count_of(&[5]), 1);
}

#[test]
fn payloadless_nodes_are_found_but_yield_nothing() {
    let mut tree: RbTree<u32, u32> = RbTree::unique();
    tree.insert(4, None);
    assert_eq!(tree.find(&4), None);
    assert_eq!(tree.rank_of(&4), Some(0));
    assert_eq!(tree.select(0), (4, None));
}

#[test]
#[should_panic(expected = "out of range")]
fn select_past_the_end_panics() {
    let mut tree: RbTree<u32, u32> = RbTree::unique();
    tree.insert(1, None);
    let _ = tree.select(1);
}

#[test]
fn clear_resets_to_empty() {
    let mut tree: RbTree<u32, u32> = RbTree::multi();
    for key in 0..20 {
        tree.insert(key % 5, Some(key));
    }
    tree.clear();
    assert!(tree.is_empty());
    assert!(!tree.is_uniquely_keyed());
    tree.insert(1, None);
    assert_eq!(tree.len(), 1);
}

#[test]
fn probabilities_weigh_multiplicity() {
    let mut tree: RbTree<u32, u32> = RbTree::multi();
    for key in [1, 1, 2, 3, 3, 3] {
        tree.insert(key, None);
    }
    assert_eq!(tree.count_of(&[1, 3]), 5);
    assert!((tree.probability_of(&[3]) - 0.5).abs() < 1e-12);
    assert_eq!(tree.expected_value_of(10, &[3]), 5.0);

    let empty: RbTree<u32, u32> = RbTree::unique();
    assert_eq!(empty.probability_of(&[1]), 0.0);
}

#[test]
fn clones_compare_equal_and_diverge_independently() {
    let mut tree: RbTree<i32, i32> = RbTree::unique();
    for key in [2, 1, 3] {
        tree.insert(key, Some(key * 10));
    }
    let mut copy = tree.clone();
    assert_eq!(tree, copy);

    copy.insert(4, None);
    assert_ne!(tree, copy);
    assert_eq!(tree.len(), 3);
}

proptest! {
    /// Interleaved inserts and removals in unique mode must track a
    /// `BTreeMap` holding the same pairs.
    #[test]
    fn unique_tree_tracks_btreemap(keys in prop::collection::vec(-50i32..50, 0..120)) {
        let mut tree: RbTree<i32, i32> = RbTree::unique();
        let mut model = std::collections::BTreeMap::new();

        for (step, key) in keys.iter().copied().enumerate() {
            if step % 3 == 0 {
                prop_assert_eq!(tree.remove_one(&key), model.remove(&key));
            } else {
                let inserted = tree.insert(key, Some(key));
                let expected = !model.contains_key(&key);
                if expected {
                    model.insert(key, key);
                }
                prop_assert_eq!(inserted, expected);
            }
            prop_assert_eq!(tree.len(), model.len());
        }

        let pairs: Vec<(i32, Option<i32>)> = model.iter().map(|(k, v)| (*k, Some(*v))).collect();
        prop_assert_eq!(tree.to_vec(), pairs);
    }

    /// Multi mode: every ordinal read agrees with the sorted insert history.
    #[test]
    fn multi_tree_selects_the_sorted_history(keys in prop::collection::vec(-20i32..20, 1..80)) {
        let mut tree: RbTree<i32, i32> = RbTree::multi();
        for key in keys.iter().copied() {
            tree.insert(key, None);
        }
        let mut sorted = keys;
        sorted.sort_unstable();
        for (ordinal, key) in sorted.iter().copied().enumerate() {
            prop_assert_eq!(tree.select(ordinal).0, key);
        }
    }
}
