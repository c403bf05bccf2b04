//! A plain (unbalanced) Binary Search Tree of [`Profile`]s keyed by name,
//! along with the two unknown sequences profiles are compared against.
//!
//! # Examples
//!
//! ```
//! use forensic::{Profile, ProfileTree, StrRecord};
//!
//! let mut tree = ProfileTree::with_sequences("AGGT", "CCTT");
//! tree.insert("Doe, Jane", Profile::new(vec![StrRecord::new("GGT", 1)]));
//! tree.insert("Ames, Bob", Profile::new(vec![StrRecord::new("GGT", 2)]));
//!
//! tree.flag_profiles_of_interest();
//! assert_eq!(tree.count_matching(true), 1);
//! assert_eq!(tree.collect_unmarked(), ["Ames, Bob"]);
//!
//! // Unflagged profiles are removed.
//! tree.cleanup();
//! assert_eq!(tree.len(), 1);
//! assert!(tree.find("Ames, Bob").is_none());
//! ```

use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt;

use tracing::{debug, info};

use crate::iter::{InOrder, LevelOrder};
use crate::profile::Profile;

/// An owned, possibly empty, subtree.
pub type Link = Option<Box<Node>>;

/// A node owns a name, the profile stored under that name, and its children.
///
/// Nothing keeps the tree balanced so a subtree can be as tall as it is large. `Drop`, `Clone`,
/// and `PartialEq` are therefore implemented with explicit stacks/queues instead of recursion.
pub struct Node {
    name: String,
    profile: Profile,
    left: Link,
    right: Link,
}

impl Node {
    /// Creates a leaf node.
    pub fn new(name: impl Into<String>, profile: Profile) -> Self {
        Self::with_children(name, profile, None, None)
    }

    /// Creates a node with the given children. Nothing checks that the
    /// children keep the tree ordered - that's on the caller.
    pub fn with_children(
        name: impl Into<String>,
        profile: Profile,
        left: Link,
        right: Link,
    ) -> Self {
        Self {
            name: name.into(),
            profile,
            left,
            right,
        }
    }

    /// The key of this node.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The profile stored under [`name`][Self::name].
    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// The left child, if any.
    pub fn left(&self) -> Option<&Node> {
        self.left.as_deref()
    }

    /// The right child, if any.
    pub fn right(&self) -> Option<&Node> {
        self.right.as_deref()
    }

    /// Replaces the left subtree, returning the old one.
    pub fn set_left(&mut self, left: Link) -> Link {
        std::mem::replace(&mut self.left, left)
    }

    /// Replaces the right subtree, returning the old one.
    pub fn set_right(&mut self, right: Link) -> Link {
        std::mem::replace(&mut self.right, right)
    }
}

impl Drop for Node {
    fn drop(&mut self) {
        // Detach every descendant before it's dropped so each one drops without children.
        let mut stack: Vec<Box<Node>> = Vec::new();
        stack.extend(self.left.take());
        stack.extend(self.right.take());
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

impl Clone for Node {
    fn clone(&self) -> Self {
        Self::with_children(
            self.name.clone(),
            self.profile.clone(),
            clone_subtree(self.left()),
            clone_subtree(self.right()),
        )
    }
}

/// Two nodes are equal when their subtrees have the same shape, names, and profiles.
impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        let mut ours = LevelOrder::new(Some(self));
        let mut theirs = LevelOrder::new(Some(other));
        loop {
            match (ours.next(), theirs.next()) {
                (None, None) => return true,
                // Matching child slots at every step means both queues line up node for node.
                (Some(a), Some(b))
                    if a.name == b.name
                        && a.profile == b.profile
                        && a.left.is_some() == b.left.is_some()
                        && a.right.is_some() == b.right.is_some() => {}
                _ => return false,
            }
        }
    }
}

impl Eq for Node {}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Children are only named so tall trees don't recurse.
        f.debug_struct("Node")
            .field("name", &self.name)
            .field("profile", &self.profile)
            .field("left", &self.left().map(Node::name))
            .field("right", &self.right().map(Node::name))
            .finish()
    }
}

/// A Binary Search Tree of profiles keyed by name, plus the two unknown
/// sequences used to flag profiles of interest.
#[derive(Default)]
pub struct ProfileTree {
    root: Link,
    sequence_a: String,
    sequence_b: String,
}

impl Clone for ProfileTree {
    fn clone(&self) -> Self {
        Self {
            root: clone_subtree(self.root()),
            sequence_a: self.sequence_a.clone(),
            sequence_b: self.sequence_b.clone(),
        }
    }
}

impl fmt::Debug for ProfileTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProfileTree")
            .field("sequence_a", &self.sequence_a)
            .field("sequence_b", &self.sequence_b)
            .field("nodes", &LevelOrderDebug(self))
            .finish()
    }
}

/// Lists a tree's nodes in level order.
struct LevelOrderDebug<'a>(&'a ProfileTree);

impl fmt::Debug for LevelOrderDebug<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.level_order()).finish()
    }
}

impl ProfileTree {
    /// Generates a new, empty `ProfileTree` with empty sequences.
    pub fn new() -> Self {
        Self::default()
    }

    /// Generates a new, empty `ProfileTree` with the given unknown sequences.
    pub fn with_sequences(sequence_a: impl Into<String>, sequence_b: impl Into<String>) -> Self {
        Self {
            root: None,
            sequence_a: sequence_a.into(),
            sequence_b: sequence_b.into(),
        }
    }

    /// Inserts `profile` under `name`. Inserting a name that's already in the
    /// tree replaces its profile (flag included) and leaves the shape alone.
    ///
    /// # Examples
    ///
    /// ```
    /// use forensic::{Profile, ProfileTree, StrRecord};
    ///
    /// let mut tree = ProfileTree::new();
    /// tree.insert("Doe, Jane", Profile::default());
    /// tree.insert("Doe, Jane", Profile::new(vec![StrRecord::new("AGAT", 5)]));
    ///
    /// assert_eq!(tree.len(), 1);
    /// assert_eq!(tree.find("Doe, Jane").map(|p| p.strs().len()), Some(1));
    /// ```
    pub fn insert(&mut self, name: impl Into<String>, profile: Profile) {
        let name = name.into();
        let link = seek(&mut self.root, &name);
        match link {
            Some(node) => {
                debug!(name = %name, "replacing profile");
                node.profile = profile;
            }
            None => {
                debug!(name = %name, "inserting profile");
                *link = Some(Box::new(Node::new(name, profile)));
            }
        }
    }

    /// Potentially finds the profile stored under `name`.
    pub fn find(&self, name: &str) -> Option<&Profile> {
        let mut node = self.root();
        while let Some(n) = node {
            node = match name.cmp(n.name()) {
                Ordering::Less => n.left(),
                Ordering::Equal => return Some(n.profile()),
                Ordering::Greater => n.right(),
            };
        }

        None
    }

    /// Counts the profiles whose flag equals `of_interest`.
    ///
    /// # Examples
    ///
    /// ```
    /// use forensic::{Profile, ProfileTree};
    ///
    /// let mut tree = ProfileTree::new();
    /// assert_eq!(tree.count_matching(false), 0);
    ///
    /// tree.insert("Doe, Jane", Profile::default());
    /// assert_eq!(tree.count_matching(false), 1);
    /// assert_eq!(tree.count_matching(true), 0);
    /// ```
    pub fn count_matching(&self, of_interest: bool) -> usize {
        self.level_order()
            .filter(|node| node.profile.is_of_interest() == of_interest)
            .count()
    }

    /// Flags every profile that matches the concatenation of the two unknown
    /// sequences (see [`Profile::is_match`]) and unflags the rest.
    pub fn flag_profiles_of_interest(&mut self) {
        let sequence = format!("{}{}", self.sequence_a, self.sequence_b);
        let mut flagged = 0;

        let mut queue: VecDeque<&mut Node> = self.root.as_deref_mut().into_iter().collect();
        while let Some(node) = queue.pop_front() {
            let Node {
                name,
                profile,
                left,
                right,
            } = node;
            queue.extend(left.as_deref_mut());
            queue.extend(right.as_deref_mut());

            let of_interest = profile.is_match(&sequence);
            debug!(name = %name, of_interest, "flagged profile");
            profile.set_of_interest(of_interest);
            flagged += usize::from(of_interest);
        }

        info!(flagged, "flagged profiles of interest");
    }

    /// Names of the profiles that aren't of interest, in level order.
    pub fn collect_unmarked(&self) -> Vec<String> {
        let mut names = Vec::with_capacity(self.count_matching(false));
        names.extend(
            self.level_order()
                .filter(|node| !node.profile.is_of_interest())
                .map(|node| node.name.clone()),
        );

        names
    }

    /// Removes the profile stored under `name`. Does nothing if there isn't one.
    ///
    /// # Examples
    ///
    /// ```
    /// use forensic::{Profile, ProfileTree};
    ///
    /// let mut tree = ProfileTree::new();
    /// tree.insert("Doe, Jane", Profile::default());
    ///
    /// tree.remove("Doe, Jane");
    /// assert!(tree.is_empty());
    ///
    /// // Nothing happens the second time around.
    /// tree.remove("Doe, Jane");
    /// assert!(tree.is_empty());
    /// ```
    pub fn remove(&mut self, name: &str) {
        let link = seek(&mut self.root, name);
        let Some(node) = link.as_mut() else {
            debug!(name, "no profile to remove");
            return;
        };

        if node.left.is_some() && node.right.is_some() {
            // Take over the successor's contents. The node itself stays where it is.
            if let Some(mut successor) = take_leftmost(&mut node.right) {
                debug!(name, successor = %successor.name, "promoting in-order successor");
                node.name = std::mem::take(&mut successor.name);
                node.profile = std::mem::take(&mut successor.profile);
            }
        } else {
            debug!(name, "splicing out profile");
            let child = node.left.take().or_else(|| node.right.take());
            *link = child;
        }
    }

    /// Removes every profile that isn't of interest.
    pub fn cleanup(&mut self) {
        let unmarked = self.collect_unmarked();
        info!(removing = unmarked.len(), "cleaning up unmarked profiles");

        for name in &unmarked {
            self.remove(name);
        }
    }

    /// The number of profiles in the tree.
    pub fn len(&self) -> usize {
        self.level_order().count()
    }

    /// Whether the tree has no profiles.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Iterates over the nodes breadth first.
    pub fn level_order(&self) -> LevelOrder<'_> {
        LevelOrder::new(self.root())
    }

    /// Iterates over the nodes in ascending name order.
    pub fn in_order(&self) -> InOrder<'_> {
        InOrder::new(self.root())
    }

    /// The root node, if any.
    pub fn root(&self) -> Option<&Node> {
        self.root.as_deref()
    }

    /// Mutable access to the root for building arbitrary shapes.
    pub fn root_mut(&mut self) -> Option<&mut Node> {
        self.root.as_deref_mut()
    }

    /// Replaces the whole tree, returning the old root.
    pub fn set_root(&mut self, root: Link) -> Link {
        std::mem::replace(&mut self.root, root)
    }

    /// The first unknown sequence.
    pub fn sequence_a(&self) -> &str {
        &self.sequence_a
    }

    /// Sets the first unknown sequence.
    pub fn set_sequence_a(&mut self, sequence: impl Into<String>) {
        self.sequence_a = sequence.into();
    }

    /// The second unknown sequence.
    pub fn sequence_b(&self) -> &str {
        &self.sequence_b
    }

    /// Sets the second unknown sequence.
    pub fn set_sequence_b(&mut self, sequence: impl Into<String>) {
        self.sequence_b = sequence.into();
    }
}

/// Walks down from `link` to the link holding `name`, or to the empty link
/// where `name` would be attached.
fn seek<'a>(mut link: &'a mut Link, name: &str) -> &'a mut Link {
    loop {
        let ordering = match link.as_deref() {
            Some(node) => name.cmp(&node.name),
            None => return link,
        };
        link = match (ordering, link) {
            (Ordering::Less, Some(node)) => &mut node.left,
            (Ordering::Greater, Some(node)) => &mut node.right,
            (_, found) => return found,
        };
    }
}

/// Deep copies the subtree under `root`. Children are built before their parents (post-order)
/// using explicit stacks.
fn clone_subtree(root: Option<&Node>) -> Link {
    // `true` once the node's children have been pushed onto `built`.
    let mut pending: Vec<(&Node, bool)> = root.map(|node| (node, false)).into_iter().collect();
    let mut built: Vec<Box<Node>> = Vec::new();
    while let Some((node, children_built)) = pending.pop() {
        if children_built {
            // The right subtree was finished last so it's on top.
            let right = node.right.as_ref().and_then(|_| built.pop());
            let left = node.left.as_ref().and_then(|_| built.pop());
            built.push(Box::new(Node::with_children(
                node.name.clone(),
                node.profile.clone(),
                left,
                right,
            )));
        } else {
            pending.push((node, true));
            pending.extend(node.right().map(|right| (right, false)));
            pending.extend(node.left().map(|left| (left, false)));
        }
    }

    built.pop()
}

/// Detaches the leftmost node of the subtree at `link`, putting its right
/// child in its place.
fn take_leftmost(mut link: &mut Link) -> Option<Box<Node>> {
    while link.as_ref().map_or(false, |node| node.left.is_some()) {
        if let Some(node) = link {
            link = &mut node.left;
        }
    }

    let mut leftmost = link.take()?;
    *link = leftmost.right.take();

    Some(leftmost)
}
