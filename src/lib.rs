//! Ordered collections built on a red-black order-statistic tree.
//!
//! This crate provides [`RbTree`], a red-black search tree whose nodes carry
//! subtree sizes, plus two collections built directly on it:
//!
//! - [`RbTree`] - the tree itself: unique or multi-keyed, with O(log n)
//!   [`select`](RbTree::select) (element at a sorted position) and
//!   [`rank_of`](RbTree::rank_of) (sorted position of a key)
//! - [`SortedMultiSet`] - a sorted bag of elements with duplicates and a
//!   full multiset algebra (`|`, `&`, `-`, `^`)
//! - [`SortedMultiMap`] - a sorted key-value collection with duplicate keys
//!
//! All three, together with the standard `BTreeSet`, implement the
//! [`Statistical`] trait: frequency counts, draw probabilities and expected
//! values over the stored entries.
//!
//! # Example
//!
//! ```
//! use scarlet_tree::{SortedMultiSet, Statistical};
//!
//! let mut rolls = SortedMultiSet::new();
//! for roll in [3, 1, 4, 1, 5, 1] {
//!     rolls.insert(roll);
//! }
//!
//! // Elements come back sorted, duplicates kept.
//! assert_eq!(rolls.to_vec(), [1, 1, 1, 3, 4, 5]);
//!
//! // Ordinal access and ranks are O(log n).
//! assert_eq!(rolls.select(3), 3);
//! assert_eq!(rolls.index_of(&4), Some(4));
//!
//! // Frequency statistics over the stored elements.
//! assert_eq!(rolls.count_of(&[1]), 3);
//! assert_eq!(rolls.expected_value_of(12, &[1]), 6.0);
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **O(log n) order statistics** - Subtree size augmentation on every node
//! - **Duplicate-aware** - Multi-keyed trees, multisets and multimaps keep
//!   every occurrence
//! - **Arena storage** - Nodes live in one contiguous arena addressed by
//!   compact handles, no per-node allocation
//!
//! # Implementation
//!
//! The tree is a classic red-black tree with a sentinel boundary node and an
//! `order` (subtree node count) field maintained through every rotation and
//! both fixup passes. The collections never hand out node references; all
//! reads copy the stored keys and values out.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod raw;
mod statistics;

pub mod multimap;
pub mod multiset;
pub mod rb_tree;

pub use multimap::SortedMultiMap;
pub use multiset::SortedMultiSet;
pub use rb_tree::RbTree;
pub use statistics::Statistical;
