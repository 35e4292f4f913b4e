//! This crate exposes a linked, unbalanced Binary Search Tree with an opt-in rebalance.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! add, find, and remove stored items. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores an item and
//! may have a left and a right child `Node`. The most important invariants
//! of this BST are:
//!
//! 1. For every `Node`, all the `Node`s in its left subtree hold an item
//!    less than its own item.
//! 2. For every `Node`, all the `Node`s in its right subtree hold an item
//!    greater than or equal to its own item.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching for items in the tree takes `O(height)` (where `height` is the
//! longest path from the root `Node` to a leaf `Node`). Nothing here keeps the
//! height down automatically: adding already sorted items produces a chain with
//! a height of `N - 1`. Calling [`linked::LinkedBst::rebalance`] rebuilds the tree
//! with the minimal height of `⌈lg(N + 1)⌉ - 1`. BSTs also naturally support
//! sorted iteration by visiting the left subtree, then the subtree root, then the
//! right subtree.
//!
//! The tree is not thread safe. Wrap the whole tree in a single lock if it has to
//! be shared.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod error;
pub mod linked;
