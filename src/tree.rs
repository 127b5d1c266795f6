//! An ordered BST with owned links. Every child slot is an
//! `Option<Box<Node>>` so absence is a first-class, checked state, and every
//! node has exactly one owner: its parent, or the tree itself for the root.
//!
//! The tree stores distinct values only. Inserting a value that is already
//! present leaves the tree untouched, which is not an error. The tree never
//! rebalances itself; [`OrderedTree::is_balanced`] reports whether the shape
//! that insertion order produced happens to satisfy the AVL criterion.
//!
//! # Examples
//!
//! ```
//! use ordered_tree::tree::OrderedTree;
//!
//! let mut tree = OrderedTree::new();
//!
//! // Nothing in here yet.
//! assert_eq!(tree.find(&5), None);
//!
//! // Insertion returns the tree so calls can be chained.
//! tree.insert(5).insert(3).insert(8);
//!
//! assert_eq!(tree.dfs_in_order(), [&3, &5, &8]);
//!
//! // Removal returns the removed value.
//! assert_eq!(tree.remove(&3), Some(3));
//! assert_eq!(tree.find(&3), None);
//! ```

use std::cmp::Ordering;
use std::collections::VecDeque;
use std::mem;

type Link<T> = Option<Box<Node<T>>>;

/// A single entry in an [`OrderedTree`]. A `Node` owns its children
/// exclusively and stores no parent pointer, so a tree is only ever navigated
/// top-down.
#[derive(Debug, Clone, PartialEq)]
pub struct Node<T> {
    value: T,
    left: Link<T>,
    right: Link<T>,
}

impl<T> Node<T> {
    /// Constructs a leaf node holding the given value.
    pub fn new(value: T) -> Self {
        Self {
            value,
            left: None,
            right: None,
        }
    }

    /// Constructs a node with the given children. The caller is responsible
    /// for the BST ordering of a hand-built subtree: everything under `left`
    /// must compare less than `value` and everything under `right` greater.
    pub fn with_children(value: T, left: Option<Node<T>>, right: Option<Node<T>>) -> Self {
        Self {
            value,
            left: left.map(Box::new),
            right: right.map(Box::new),
        }
    }

    /// The value stored in this node.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// This node's left child, if it has one.
    pub fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    /// This node's right child, if it has one.
    pub fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    fn find(&self, value: &T) -> Option<&Self>
    where
        T: Ord,
    {
        match value.cmp(&self.value) {
            Ordering::Less => self.left.as_deref().and_then(|n| n.find(value)),
            Ordering::Equal => Some(self),
            Ordering::Greater => self.right.as_deref().and_then(|n| n.find(value)),
        }
    }

    fn pre_order<'a>(&'a self, values: &mut Vec<&'a T>) {
        values.push(&self.value);
        if let Some(left) = self.left.as_deref() {
            left.pre_order(values);
        }
        if let Some(right) = self.right.as_deref() {
            right.pre_order(values);
        }
    }

    fn in_order<'a>(&'a self, values: &mut Vec<&'a T>) {
        if let Some(left) = self.left.as_deref() {
            left.in_order(values);
        }
        values.push(&self.value);
        if let Some(right) = self.right.as_deref() {
            right.in_order(values);
        }
    }

    fn post_order<'a>(&'a self, values: &mut Vec<&'a T>) {
        if let Some(left) = self.left.as_deref() {
            left.post_order(values);
        }
        if let Some(right) = self.right.as_deref() {
            right.post_order(values);
        }
        values.push(&self.value);
    }

    /// Reverse in-order scan (right, node, left) yielding values in
    /// descending order. `highest` is the largest value seen so far; the
    /// first value that differs from it is the second highest, and returning
    /// it as `Some` short-circuits every frame above so no further nodes are
    /// visited.
    fn second_highest<'a>(&'a self, highest: &mut Option<&'a T>) -> Option<&'a T>
    where
        T: Ord,
    {
        if let Some(right) = self.right.as_deref() {
            if let Some(second) = right.second_highest(highest) {
                return Some(second);
            }
        }

        match highest {
            None => *highest = Some(&self.value),
            // No duplicates are stored, so any later value differs.
            Some(seen) if **seen != self.value => return Some(&self.value),
            Some(_) => {}
        }

        self.left
            .as_deref()
            .and_then(|left| left.second_highest(highest))
    }
}

/// An ordered Binary Search Tree. This can be used for inserting, finding,
/// and removing values, walking the tree in the classical orders, and asking
/// shape questions of the whole tree.
///
/// Values are distinct: inserting a value that is already present is a no-op.
/// The tree does not rebalance itself.
///
/// # Examples
///
/// ```
/// use ordered_tree::tree::OrderedTree;
///
/// let mut tree = OrderedTree::new();
/// tree.insert(2).insert(1).insert(3);
///
/// assert_eq!(tree.bfs(), [&2, &1, &3]);
/// assert!(tree.is_balanced());
/// assert_eq!(tree.find_second_highest(), Some(&2));
/// ```
#[derive(Debug, Clone)]
pub struct OrderedTree<T> {
    root: Link<T>,
}

impl<T> Default for OrderedTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for OrderedTree<T> {
    // Dismantle the tree with an explicit stack. Dropping the boxes directly
    // would recurse per level, and a degenerate tree is as deep as it is
    // large.
    fn drop(&mut self) {
        let mut stack = Vec::new();
        stack.extend(self.root.take());
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

impl<T> OrderedTree<T> {
    /// Generates a new, empty tree.
    pub fn new() -> Self {
        Self { root: None }
    }

    /// Builds a tree around an existing root node.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::tree::{Node, OrderedTree};
    ///
    /// let root = Node::with_children(5, Some(Node::new(3)), Some(Node::new(8)));
    /// let tree = OrderedTree::from_root(root);
    ///
    /// assert_eq!(tree.dfs_in_order(), [&3, &5, &8]);
    /// ```
    pub fn from_root(root: Node<T>) -> Self {
        Self {
            root: Some(Box::new(root)),
        }
    }

    /// Inserts the given value at the unique position that preserves the BST
    /// ordering, using an iterative descent. Inserting a value that is
    /// already present leaves the tree unchanged. Returns the tree so calls
    /// can be chained.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::tree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    /// tree.insert(1).insert(2).insert(2);
    ///
    /// assert_eq!(tree.dfs_in_order(), [&1, &2]);
    /// ```
    pub fn insert(&mut self, value: T) -> &mut Self
    where
        T: Ord,
    {
        self.insert_value(value);
        self
    }

    /// Iterative descent to the first absent slot on `value`'s search path.
    fn insert_value(&mut self, value: T)
    where
        T: Ord,
    {
        let mut cur = &mut self.root;
        loop {
            match cur {
                None => {
                    *cur = Some(Box::new(Node::new(value)));
                    return;
                }
                Some(node) => match value.cmp(&node.value) {
                    Ordering::Less => cur = &mut node.left,
                    // Already present, nothing to do.
                    Ordering::Equal => return,
                    Ordering::Greater => cur = &mut node.right,
                },
            }
        }
    }

    /// Inserts the given value using a recursive descent. Produces exactly
    /// the same tree shape as [`insert`][Self::insert] for the same sequence
    /// of insertions.
    pub fn insert_recursively(&mut self, value: T) -> &mut Self
    where
        T: Ord,
    {
        Self::insert_link(&mut self.root, value);
        self
    }

    fn insert_link(link: &mut Link<T>, value: T)
    where
        T: Ord,
    {
        match link {
            None => *link = Some(Box::new(Node::new(value))),
            Some(node) => match value.cmp(&node.value) {
                Ordering::Less => Self::insert_link(&mut node.left, value),
                Ordering::Equal => {}
                Ordering::Greater => Self::insert_link(&mut node.right, value),
            },
        }
    }

    /// Searches the tree for a node with the given value using an iterative
    /// descent and returns a reference to it, or `None` if no node holds the
    /// value.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::tree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    /// tree.insert(1);
    ///
    /// assert_eq!(tree.find(&1).map(|node| node.value()), Some(&1));
    /// assert!(tree.find(&42).is_none());
    /// ```
    pub fn find(&self, value: &T) -> Option<&Node<T>>
    where
        T: Ord,
    {
        let mut cur = self.root.as_deref();
        while let Some(node) = cur {
            match value.cmp(&node.value) {
                Ordering::Less => cur = node.left.as_deref(),
                Ordering::Equal => return Some(node),
                Ordering::Greater => cur = node.right.as_deref(),
            }
        }
        None
    }

    /// Searches the tree using a recursive descent. Semantically identical to
    /// [`find`][Self::find].
    pub fn find_recursively(&self, value: &T) -> Option<&Node<T>>
    where
        T: Ord,
    {
        self.root.as_deref().and_then(|root| root.find(value))
    }

    /// Visits every node pre-order (node, left subtree, right subtree) and
    /// returns the values in visitation order. An empty tree yields an empty
    /// vector.
    pub fn dfs_pre_order(&self) -> Vec<&T> {
        let mut values = Vec::new();
        if let Some(root) = self.root.as_deref() {
            root.pre_order(&mut values);
        }
        values
    }

    /// Visits every node in-order (left subtree, node, right subtree) and
    /// returns the values in visitation order. For a BST this is ascending
    /// sorted order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::tree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    /// tree.insert(5).insert(3).insert(8);
    ///
    /// assert_eq!(tree.dfs_in_order(), [&3, &5, &8]);
    /// ```
    pub fn dfs_in_order(&self) -> Vec<&T> {
        let mut values = Vec::new();
        if let Some(root) = self.root.as_deref() {
            root.in_order(&mut values);
        }
        values
    }

    /// Visits every node post-order (left subtree, right subtree, node) and
    /// returns the values in visitation order.
    pub fn dfs_post_order(&self) -> Vec<&T> {
        let mut values = Vec::new();
        if let Some(root) = self.root.as_deref() {
            root.post_order(&mut values);
        }
        values
    }

    /// Visits every node level by level, left child before right child, and
    /// returns the values in visitation order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::tree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    /// tree.insert(5).insert(3).insert(8).insert(1);
    ///
    /// assert_eq!(tree.bfs(), [&5, &3, &8, &1]);
    /// ```
    pub fn bfs(&self) -> Vec<&T> {
        let mut values = Vec::new();
        let mut queue = VecDeque::new();
        queue.extend(self.root.as_deref());

        while let Some(node) = queue.pop_front() {
            values.push(&node.value);
            queue.extend(node.left.as_deref());
            queue.extend(node.right.as_deref());
        }

        values
    }

    /// Removes the node holding the given value and returns the value, or
    /// `None` (leaving the tree unchanged) if no node holds it.
    ///
    /// A node with two children is not detached itself: its value is
    /// overwritten with its in-order successor's (the leftmost value of its
    /// right subtree) and the successor's node is spliced out instead. The
    /// successor has no left child by construction, so its right child takes
    /// its place.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::tree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    /// tree.insert(5).insert(3).insert(8);
    ///
    /// assert_eq!(tree.remove(&5), Some(5));
    /// assert_eq!(tree.remove(&5), None);
    /// assert_eq!(tree.dfs_in_order(), [&3, &8]);
    /// ```
    pub fn remove(&mut self, value: &T) -> Option<T>
    where
        T: Ord,
    {
        let (root, removed) = Self::remove_link(self.root.take(), value);
        self.root = root;
        removed
    }

    fn remove_link(link: Link<T>, value: &T) -> (Link<T>, Option<T>)
    where
        T: Ord,
    {
        let mut node = match link {
            None => return (None, None),
            Some(node) => node,
        };

        match value.cmp(&node.value) {
            Ordering::Less => {
                let (left, removed) = Self::remove_link(node.left.take(), value);
                node.left = left;
                (Some(node), removed)
            }
            Ordering::Greater => {
                let (right, removed) = Self::remove_link(node.right.take(), value);
                node.right = right;
                (Some(node), removed)
            }
            Ordering::Equal => match (node.left.take(), node.right.take()) {
                // A leaf detaches directly.
                (None, None) => (None, Some(node.value)),
                // A single child is spliced into its parent's slot.
                (Some(child), None) | (None, Some(child)) => (Some(child), Some(node.value)),
                // With two children the node itself stays put: it takes over
                // its successor's value and the successor's node is detached
                // instead.
                (Some(left), Some(right)) => {
                    let (successor, right) = Self::detach_min(right);
                    let removed = mem::replace(&mut node.value, successor);
                    node.left = Some(left);
                    node.right = right;
                    (Some(node), Some(removed))
                }
            },
        }
    }

    /// Detaches the leftmost node of this subtree and returns its value along
    /// with what remains of the subtree. The leftmost node has no left child,
    /// so its right child (if any) takes its slot.
    fn detach_min(mut node: Box<Node<T>>) -> (T, Link<T>) {
        match node.left.take() {
            Some(left) => {
                let (min, rest) = Self::detach_min(left);
                node.left = rest;
                (min, Some(node))
            }
            None => {
                let Node { value, right, .. } = *node;
                (value, right)
            }
        }
    }

    /// Returns `true` iff every node's left and right subtree heights differ
    /// by at most one (the AVL criterion, checked at every node). An empty
    /// tree is balanced. Runs in a single post-order pass, linear in the node
    /// count.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::tree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    /// tree.insert(2).insert(1).insert(3);
    /// assert!(tree.is_balanced());
    ///
    /// // Ascending insertion degrades into a chain.
    /// let mut chain = OrderedTree::new();
    /// chain.insert(1).insert(2).insert(3);
    /// assert!(!chain.is_balanced());
    /// ```
    pub fn is_balanced(&self) -> bool {
        Self::balance_info(self.root.as_deref()).0
    }

    /// Computes `(balanced, height)` for a subtree in one post-order pass.
    /// An absent subtree is balanced with height zero.
    fn balance_info(node: Option<&Node<T>>) -> (bool, usize) {
        match node {
            None => (true, 0),
            Some(n) => {
                let (left_balanced, left_height) = Self::balance_info(n.left.as_deref());
                let (right_balanced, right_height) = Self::balance_info(n.right.as_deref());
                let balanced =
                    left_balanced && right_balanced && left_height.abs_diff(right_height) <= 1;
                (balanced, left_height.max(right_height) + 1)
            }
        }
    }

    /// Returns the second-largest value in the tree, or `None` if the tree
    /// holds fewer than two values.
    ///
    /// The scan walks the tree in descending order and stops as soon as it
    /// sees a value that differs from the largest, so it touches only the
    /// right spine and one extra node in the common case.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::tree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    /// for value in [5, 3, 8, 1, 4, 7, 9] {
    ///     tree.insert(value);
    /// }
    ///
    /// assert_eq!(tree.find_second_highest(), Some(&8));
    ///
    /// let mut single = OrderedTree::new();
    /// single.insert(5);
    /// assert_eq!(single.find_second_highest(), None);
    /// ```
    pub fn find_second_highest(&self) -> Option<&T>
    where
        T: Ord,
    {
        let root = self.root.as_deref()?;
        // A childless root is the only value in the tree.
        if root.is_leaf() {
            return None;
        }

        let mut highest = None;
        root.second_highest(&mut highest)
    }
}
