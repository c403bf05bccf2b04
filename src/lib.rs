//! This crate is a small in-memory database of forensic DNA profiles backed
//! by a Binary Search Tree (BST).
//!
//! ## Binary Search Tree
//!
//! Profiles are stored in [`Node`]s keyed by a person's name. The most
//! important invariants of the tree are:
//!
//! 1. For every `Node`, all the `Node`s in its left subtree have a name less
//!    than its own name.
//! 2. For every `Node`, all the `Node`s in its right subtree have a name
//!    greater than its own name.
//!
//! Names are compared as plain strings so the comparison is case sensitive.
//! The tree is never rebalanced which means operations take `O(height)` and
//! inserting names in sorted order gives a tree as tall as it is large.
//!
//! ## Profiles of interest
//!
//! Each [`Profile`] holds a list of short tandem repeats ([`StrRecord`]s): a
//! repeat unit along with how many times it is expected to occur. The tree
//! also holds two unknown sequences. A profile is *of interest* when at least
//! half (rounded up) of its STRs occur exactly the expected number of times in
//! the two unknown sequences joined together. See
//! [`ProfileTree::flag_profiles_of_interest`] and [`ProfileTree::cleanup`].
//!
//! The [`loader`] module builds a tree from the plain-text database format.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod iter;
pub mod loader;
pub mod profile;
pub mod tree;

pub use loader::LoadError;
pub use profile::{Profile, StrRecord};
pub use tree::{Node, ProfileTree};
