//! A linked BST. Every node exclusively owns its two optional children and nothing is ever
//! rebalanced behind the caller's back: the shape of the tree is purely a function of insertion
//! order until [`LinkedBst::rebalance`] is called.
//!
//! # Examples
//!
//! ```
//! use linked_bst::linked::LinkedBst;
//!
//! let mut tree = LinkedBst::new();
//!
//! // Nothing in here yet.
//! assert_eq!(tree.find(&1), None);
//!
//! tree.add(1);
//! assert_eq!(tree.find(&1), Some(&1));
//!
//! // Equal items are kept, to the right of the first one.
//! tree.add(1);
//! assert_eq!(tree.len(), 2);
//!
//! // Removing an item returns it.
//! assert_eq!(tree.remove(&1), Ok(1));
//! assert_eq!(tree.len(), 1);
//! ```

use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt;
use std::mem;

use tracing::{debug, trace};

use crate::error::{BstError, Result};

/// The slot a node hangs from: the tree's root or one side of a parent.
type Link<T> = Option<Box<Node<T>>>;

struct Node<T> {
    item: T,
    left: Link<T>,
    right: Link<T>,
}

impl<T> Node<T> {
    fn new_boxed(item: T) -> Box<Self> {
        Box::new(Node {
            item,
            left: None,
            right: None,
        })
    }
}

/// An unbalanced Binary Search Tree. Items smaller than a node live in its left subtree and items
/// greater than or equal to it live in its right subtree, so duplicates are allowed.
///
/// Searching is `O(height)`. Inserting already sorted items degrades the tree into a chain with
/// `O(n)` height; [`LinkedBst::rebalance`] rebuilds it with minimal height.
pub struct LinkedBst<T> {
    root: Link<T>,
    size: usize,
}

impl<T> Default for LinkedBst<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for LinkedBst<T> {
    fn drop(&mut self) {
        release(self.root.take());
    }
}

impl<T> fmt::Debug for LinkedBst<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkedBst")
            .field("size", &self.size)
            .field("preorder", &self.preorder())
            .finish()
    }
}

impl<T> Clone for LinkedBst<T>
where
    T: Clone,
{
    /// Copies the nodes in postorder so that both children of a node are built before it.
    fn clone(&self) -> Self {
        let mut built: Vec<Box<Node<T>>> = Vec::with_capacity(self.size);
        for node in postorder_nodes(&self.root) {
            let right = if node.right.is_some() { built.pop() } else { None };
            let left = if node.left.is_some() { built.pop() } else { None };
            built.push(Box::new(Node {
                item: node.item.clone(),
                left,
                right,
            }));
        }
        Self {
            root: built.pop(),
            size: self.size,
        }
    }
}

/// Renders the tree rotated 90 degrees counterclockwise: the right subtree is printed above a
/// node, the left subtree below it, and every level is indented by one `"| "`.
///
/// # Examples
///
/// ```
/// use linked_bst::linked::LinkedBst;
///
/// let tree: LinkedBst<_> = [2, 1, 3].into_iter().collect();
///
/// assert_eq!(tree.to_string(), "| 3\n2\n| 1\n");
/// ```
impl<T> fmt::Display for LinkedBst<T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn render<T: fmt::Display>(
            f: &mut fmt::Formatter<'_>,
            link: &Link<T>,
            level: usize,
        ) -> fmt::Result {
            if let Some(node) = link {
                render(f, &node.right, level + 1)?;
                writeln!(f, "{}{}", "| ".repeat(level), node.item)?;
                render(f, &node.left, level + 1)?;
            }
            Ok(())
        }

        render(f, &self.root, 0)
    }
}

impl<T> FromIterator<T> for LinkedBst<T>
where
    T: Ord,
{
    /// Adds the items one by one in iteration order, so the shape depends on that order.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T> Extend<T> for LinkedBst<T>
where
    T: Ord,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.add(item);
        }
    }
}

impl<T> LinkedBst<T> {
    /// Generate a new, empty `LinkedBst`.
    pub fn new() -> Self {
        Self {
            root: None,
            size: 0,
        }
    }

    /// The number of items stored in the tree.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Whether the tree holds no items.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Removes every item from the tree.
    pub fn clear(&mut self) {
        debug!(size = self.size, "clearing tree");
        release(self.root.take());
        self.size = 0;
    }

    /// Potentially finds the stored item equal to the given one. If no node holds an equal item,
    /// `None` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::linked::LinkedBst;
    ///
    /// let tree: LinkedBst<_> = [5, 3, 8].into_iter().collect();
    ///
    /// assert_eq!(tree.find(&3), Some(&3));
    /// assert_eq!(tree.find(&42), None);
    /// ```
    pub fn find(&self, item: &T) -> Option<&T>
    where
        T: Ord,
    {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            match item.cmp(&node.item) {
                Ordering::Less => current = node.left.as_deref(),
                Ordering::Equal => return Some(&node.item),
                Ordering::Greater => current = node.right.as_deref(),
            }
        }
        None
    }

    /// Whether an item equal to the given one is stored in the tree.
    pub fn contains(&self, item: &T) -> bool
    where
        T: Ord,
    {
        self.find(item).is_some()
    }

    /// Adds the item as a new leaf. Smaller items go left and greater or equal items go right,
    /// so adding an item that is already present stores a second copy.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::linked::LinkedBst;
    ///
    /// let mut tree = LinkedBst::new();
    /// tree.add(2);
    /// tree.add(1);
    /// tree.add(2);
    ///
    /// assert_eq!(tree.inorder(), vec![&1, &2, &2]);
    /// ```
    pub fn add(&mut self, item: T)
    where
        T: Ord,
    {
        let mut link = &mut self.root;
        while let Some(node) = link {
            link = match item.cmp(&node.item) {
                Ordering::Less => &mut node.left,
                Ordering::Equal | Ordering::Greater => &mut node.right,
            };
        }
        *link = Some(Node::new_boxed(item));
        self.size += 1;
    }

    /// Removes the first node holding an item equal to the given one (searching from the root
    /// down) and returns its item. If the tree does not hold such an item, it is left untouched
    /// and [`BstError::NotFound`] is returned.
    ///
    /// A node with two children takes over the largest item of its left subtree, and the node
    /// that held that item is spliced out instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::error::BstError;
    /// use linked_bst::linked::LinkedBst;
    ///
    /// let mut tree: LinkedBst<_> = [1, 3, 5].into_iter().collect();
    ///
    /// assert_eq!(tree.remove(&5), Ok(5));
    /// assert_eq!(tree.remove(&5), Err(BstError::NotFound));
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn remove(&mut self, item: &T) -> Result<T>
    where
        T: Ord,
    {
        // The root link acts as the left link of a parent sitting above the root, so replacing
        // the root is no different from replacing any other node.
        let link = seek(&mut self.root, item);
        let Some(mut target) = link.take() else {
            trace!(size = self.size, "item to remove not found");
            return Err(BstError::NotFound);
        };

        let removed = if target.left.is_some() && target.right.is_some() {
            let largest = take_largest(&mut target.left);
            let removed = mem::replace(&mut target.item, largest);
            *link = Some(target);
            removed
        } else {
            let Node {
                item: removed,
                left,
                right,
            } = *target;
            *link = left.or(right);
            removed
        };

        self.size -= 1;
        trace!(size = self.size, "removed item");
        Ok(removed)
    }

    /// Swaps the stored item equal to `item` for `new_item` and returns the old one, or `None`
    /// if no node holds an equal item.
    ///
    /// The node keeps its position, so the tree is only still ordered if `new_item` fits where
    /// `item` was. Nothing checks this.
    pub fn replace(&mut self, item: &T, new_item: T) -> Option<T>
    where
        T: Ord,
    {
        seek(&mut self.root, item)
            .as_mut()
            .map(|node| mem::replace(&mut node.item, new_item))
    }

    /// Iterates the items in preorder without recursion. See [`Iter`].
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            stack: self.root.as_deref().into_iter().collect(),
            remaining: self.size,
        }
    }

    /// Collects the items in preorder: node, left subtree, right subtree.
    pub fn preorder(&self) -> Vec<&T> {
        self.iter().collect()
    }

    /// Collects the items in ascending order (left subtree, node, right subtree).
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::linked::LinkedBst;
    ///
    /// let tree: LinkedBst<_> = [5, 3, 8, 1, 4, 7, 9].into_iter().collect();
    ///
    /// assert_eq!(tree.inorder(), vec![&1, &3, &4, &5, &7, &8, &9]);
    /// ```
    pub fn inorder(&self) -> Vec<&T> {
        let mut items = Vec::with_capacity(self.size);
        let mut stack = Vec::new();
        let mut current = self.root.as_deref();
        loop {
            while let Some(node) = current {
                stack.push(node);
                current = node.left.as_deref();
            }
            let Some(node) = stack.pop() else {
                break;
            };
            items.push(&node.item);
            current = node.right.as_deref();
        }
        items
    }

    /// Collects the items in postorder: left subtree, right subtree, node.
    pub fn postorder(&self) -> Vec<&T> {
        postorder_nodes(&self.root)
            .into_iter()
            .map(|node| &node.item)
            .collect()
    }

    /// Collects the items level by level from the root down, left to right within a level.
    pub fn levelorder(&self) -> Vec<&T> {
        let mut items = Vec::with_capacity(self.size);
        let mut queue: VecDeque<&Node<T>> = self.root.as_deref().into_iter().collect();
        while let Some(node) = queue.pop_front() {
            items.push(&node.item);
            queue.extend(node.left.as_deref());
            queue.extend(node.right.as_deref());
        }
        items
    }

    /// The number of edges on the longest path from the root to a leaf. A tree with a single
    /// node has height `0` and an empty tree has height `-1`.
    pub fn height(&self) -> isize {
        let mut height = -1;
        let mut stack: Vec<(&Node<T>, isize)> =
            self.root.as_deref().map(|root| (root, 0)).into_iter().collect();
        while let Some((node, depth)) = stack.pop() {
            height = height.max(depth);
            stack.extend(node.left.as_deref().map(|left| (left, depth + 1)));
            stack.extend(node.right.as_deref().map(|right| (right, depth + 1)));
        }
        height
    }

    /// Whether the height is below `2 * log2(len + 1) - 1`. This only flags trees that are far
    /// taller than the `log2` minimum; it is not an AVL or red-black invariant. An empty tree is
    /// balanced.
    pub fn is_balanced(&self) -> bool {
        if self.is_empty() {
            return true;
        }
        (self.height() as f64) < 2.0 * ((self.size + 1) as f64).log2() - 1.0
    }

    /// Rebuilds the tree with minimal height from its sorted items. The items themselves, and
    /// their ascending order, are unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::linked::LinkedBst;
    ///
    /// // Sorted input produces a chain.
    /// let mut tree: LinkedBst<_> = (1..=5).collect();
    /// assert_eq!(tree.height(), 4);
    ///
    /// tree.rebalance();
    /// assert_eq!(tree.height(), 2);
    /// assert_eq!(tree.inorder(), vec![&1, &2, &3, &4, &5]);
    /// ```
    pub fn rebalance(&mut self)
    where
        T: Ord,
    {
        let height_before = self.height();
        let mut items: Vec<Option<T>> = into_sorted(self.root.take(), self.size)
            .into_iter()
            .map(Some)
            .collect();
        self.clear();
        self.add_medians(&mut items);

        debug!(
            size = self.size,
            height_before,
            height_after = self.height(),
            "rebalanced tree"
        );

        if cfg!(debug_assertions) {
            let items = self.inorder();
            assert_eq!(items.len(), self.size);
            assert!(items.windows(2).all(|pair| pair[0] <= pair[1]));
        }
    }

    /// Adds the middle item of `items`, then does the same for each half, so that every middle
    /// item becomes the root of the subtree built from its half.
    fn add_medians(&mut self, items: &mut [Option<T>])
    where
        T: Ord,
    {
        if items.is_empty() {
            return;
        }
        let middle = items.len() / 2;
        if let Some(item) = items[middle].take() {
            self.add(item);
        }
        let (smaller, rest) = items.split_at_mut(middle);
        self.add_medians(smaller);
        self.add_medians(&mut rest[1..]);
    }

    /// The smallest stored item strictly greater than `item`, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::linked::LinkedBst;
    ///
    /// let tree: LinkedBst<_> = [1, 3, 5, 7, 9].into_iter().collect();
    ///
    /// assert_eq!(tree.successor(&5), Some(&7));
    /// assert_eq!(tree.successor(&9), None);
    /// ```
    pub fn successor(&self, item: &T) -> Option<&T>
    where
        T: Ord,
    {
        let mut best = None;
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            if node.item > *item {
                best = Some(&node.item);
                current = node.left.as_deref();
            } else {
                current = node.right.as_deref();
            }
        }
        best
    }

    /// The largest stored item strictly less than `item`, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::linked::LinkedBst;
    ///
    /// let tree: LinkedBst<_> = [1, 3, 5, 7, 9].into_iter().collect();
    ///
    /// assert_eq!(tree.predecessor(&5), Some(&3));
    /// assert_eq!(tree.predecessor(&1), None);
    /// ```
    pub fn predecessor(&self, item: &T) -> Option<&T>
    where
        T: Ord,
    {
        let mut best = None;
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            if node.item < *item {
                best = Some(&node.item);
                current = node.right.as_deref();
            } else {
                current = node.left.as_deref();
            }
        }
        best
    }

    /// All items `x` with `low <= x <= high`, in ascending order. The bounds don't have to be
    /// stored in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::linked::LinkedBst;
    ///
    /// let tree: LinkedBst<_> = [5, 3, 8, 1, 4, 7, 9].into_iter().collect();
    ///
    /// assert_eq!(tree.range_find(&2, &7), vec![&3, &4, &5, &7]);
    /// assert!(tree.range_find(&7, &2).is_empty());
    /// ```
    pub fn range_find(&self, low: &T, high: &T) -> Vec<&T>
    where
        T: Ord,
    {
        let mut found = Vec::new();
        if low > high {
            return found;
        }

        let mut stack = Vec::new();
        let mut current = self.root.as_deref();
        loop {
            while let Some(node) = current {
                stack.push(node);
                // Everything on the left is smaller than `node.item`.
                current = if *low < node.item {
                    node.left.as_deref()
                } else {
                    None
                };
            }
            let Some(node) = stack.pop() else {
                break;
            };
            // Every item still to come is at least `node.item`.
            if node.item > *high {
                break;
            }
            if node.item >= *low {
                found.push(&node.item);
            }
            current = node.right.as_deref();
        }
        found
    }
}

/// Walks down from `link` to the link holding an item equal to `item`, or to the empty link the
/// search ended on.
fn seek<'a, T>(mut link: &'a mut Link<T>, item: &T) -> &'a mut Link<T>
where
    T: Ord,
{
    loop {
        let go_left = match link.as_deref() {
            None => return link,
            Some(node) => match item.cmp(&node.item) {
                Ordering::Equal => return link,
                Ordering::Less => true,
                Ordering::Greater => false,
            },
        };
        link = match link {
            Some(node) => {
                if go_left {
                    &mut node.left
                } else {
                    &mut node.right
                }
            }
            None => unreachable!("Link was just checked to hold a node"),
        };
    }
}

/// Splices the node holding the largest item out of the subtree in `link` and returns that item.
/// The node has no right child, so its left child takes its place.
///
/// ## Panics
///
/// When `link` is empty.
fn take_largest<T>(mut link: &mut Link<T>) -> T {
    while link.as_ref().map_or(false, |node| node.right.is_some()) {
        link = match link {
            Some(node) => &mut node.right,
            None => unreachable!("Link was just checked to hold a node"),
        };
    }
    match link.take() {
        Some(node) => {
            let Node { item, left, .. } = *node;
            *link = left;
            item
        }
        None => panic!("No largest node in an empty subtree"),
    }
}

/// Consumes the subtree in ascending order without recursion.
fn into_sorted<T>(link: Link<T>, size: usize) -> Vec<T> {
    let mut items = Vec::with_capacity(size);
    let mut stack = Vec::new();
    let mut current = link;
    loop {
        while let Some(mut node) = current {
            current = node.left.take();
            stack.push(node);
        }
        let Some(node) = stack.pop() else {
            break;
        };
        let Node { item, right, .. } = *node;
        items.push(item);
        current = right;
    }
    items
}

/// The nodes of the subtree in postorder, found without recursion.
fn postorder_nodes<T>(link: &Link<T>) -> Vec<&Node<T>> {
    // Node, right, left in reverse.
    let mut nodes = Vec::new();
    let mut stack: Vec<&Node<T>> = link.as_deref().into_iter().collect();
    while let Some(node) = stack.pop() {
        nodes.push(node);
        stack.extend(node.left.as_deref());
        stack.extend(node.right.as_deref());
    }
    nodes.reverse();
    nodes
}

/// Drops a subtree one node at a time so that a chain-shaped tree doesn't overflow the stack.
fn release<T>(link: Link<T>) {
    let mut stack: Vec<Box<Node<T>>> = link.into_iter().collect();
    while let Some(mut node) = stack.pop() {
        stack.extend(node.left.take());
        stack.extend(node.right.take());
    }
}

/// A preorder iterator over the items of a [`LinkedBst`]. Created by [`LinkedBst::iter`].
///
/// Nodes waiting to be visited are kept on a stack: the right child is pushed before the left
/// one so the whole left subtree is yielded before the right one.
pub struct Iter<'a, T> {
    stack: Vec<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.right.as_deref());
        self.stack.extend(node.left.as_deref());
        self.remaining -= 1;
        Some(&node.item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a LinkedBst<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning preorder iterator over the items of a [`LinkedBst`].
pub struct IntoIter<T> {
    stack: Vec<Box<Node<T>>>,
    remaining: usize,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        let Node { item, left, right } = *node;
        self.stack.extend(right);
        self.stack.extend(left);
        self.remaining -= 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        for node in self.stack.drain(..) {
            release(Some(node));
        }
    }
}

impl<T> IntoIterator for LinkedBst<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(mut self) -> Self::IntoIter {
        let remaining = mem::take(&mut self.size);
        IntoIter {
            stack: self.root.take().into_iter().collect(),
            remaining,
        }
    }
}
