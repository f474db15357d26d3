//! Arena-backed red-black tree keyed by ride id
//!
//! Nodes live in a `Vec` and refer to each other by slot index. Slot 0 is
//! the shared sentinel: it stands in for every external leaf, is always
//! black and never carries a key. Freed slots are recycled through a free
//! list so the arena does not grow under insert/delete churn.

use std::cmp::Ordering;

use super::errors::{IndexError, IndexResult};
use crate::ride::RideId;

/// Slot of the shared sentinel leaf.
const NIL: usize = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    Red,
    Black,
}

#[derive(Debug, Clone)]
struct Node {
    key: RideId,
    color: Color,
    parent: usize,
    left: usize,
    right: usize,
}

impl Node {
    fn sentinel() -> Self {
        Self {
            key: 0,
            color: Color::Black,
            parent: NIL,
            left: NIL,
            right: NIL,
        }
    }

    fn leaf(key: RideId) -> Self {
        Self {
            key,
            color: Color::Red,
            parent: NIL,
            left: NIL,
            right: NIL,
        }
    }
}

/// Red-black tree of ride ids.
///
/// Gives O(log n) insert, delete and search, and in-order range
/// enumeration. Duplicate detection is the caller's job: inserting a
/// present id is a no-op.
#[derive(Debug, Clone)]
pub struct OrderedIndex {
    nodes: Vec<Node>,
    free: Vec<usize>,
    root: usize,
    len: usize,
}

impl Default for OrderedIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderedIndex {
    /// Creates an empty tree holding only the sentinel
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::sentinel()],
            free: Vec::new(),
            root: NIL,
            len: 0,
        }
    }

    /// Number of ids in the tree
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the tree holds no ids
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true if `id` is present
    pub fn contains(&self, id: RideId) -> bool {
        self.find(id) != NIL
    }

    /// Insert `id`.
    ///
    /// Returns false (and changes nothing) if the id is already present.
    pub fn insert(&mut self, id: RideId) -> bool {
        let mut parent = NIL;
        let mut cursor = self.root;
        while cursor != NIL {
            parent = cursor;
            cursor = match id.cmp(&self.nodes[cursor].key) {
                Ordering::Less => self.nodes[cursor].left,
                Ordering::Greater => self.nodes[cursor].right,
                Ordering::Equal => return false,
            };
        }

        let node = self.alloc(id);
        self.nodes[node].parent = parent;
        if parent == NIL {
            self.root = node;
        } else if id < self.nodes[parent].key {
            self.nodes[parent].left = node;
        } else {
            self.nodes[parent].right = node;
        }
        self.len += 1;

        self.insert_fixup(node);
        true
    }

    /// Remove `id`.
    ///
    /// Returns false if the id was not present.
    pub fn remove(&mut self, id: RideId) -> bool {
        let found = self.find(id);
        if found == NIL {
            return false;
        }

        // A node with two children takes its successor's key, and the
        // successor (which has no left child) is spliced out instead.
        let target = if self.left(found) != NIL && self.right(found) != NIL {
            let successor = self.minimum(self.right(found));
            self.nodes[found].key = self.nodes[successor].key;
            successor
        } else {
            found
        };

        let child = if self.left(target) != NIL {
            self.left(target)
        } else {
            self.right(target)
        };
        let parent = self.parent(target);

        // May write the sentinel's parent; delete_fixup relies on it.
        self.nodes[child].parent = parent;
        if parent == NIL {
            self.root = child;
        } else if target == self.left(parent) {
            self.nodes[parent].left = child;
        } else {
            self.nodes[parent].right = child;
        }

        let removed_color = self.nodes[target].color;
        self.release(target);
        self.len -= 1;

        if removed_color == Color::Black {
            self.delete_fixup(child);
        }
        self.nodes[NIL].parent = NIL;
        true
    }

    /// Ids in `[lo, hi]`, ascending. An inverted range is empty.
    pub fn range(&self, lo: RideId, hi: RideId) -> Vec<RideId> {
        let mut out = Vec::new();
        if lo <= hi {
            self.collect_range(self.root, lo, hi, &mut out);
        }
        out
    }

    /// All ids, ascending
    pub fn keys(&self) -> Vec<RideId> {
        self.range(RideId::MIN, RideId::MAX)
    }

    /// Longest root-to-leaf path, counted in real nodes
    pub fn height(&self) -> usize {
        self.subtree_height(self.root)
    }

    /// Check every red-black invariant and the parent links.
    ///
    /// Returns the black-height of the root on success.
    pub fn verify(&self) -> IndexResult<usize> {
        if self.nodes[NIL].color != Color::Black {
            return Err(IndexError::tree("sentinel is not black"));
        }
        if self.root != NIL {
            if self.nodes[self.root].color != Color::Black {
                return Err(IndexError::tree_at(self.nodes[self.root].key, "root is not black"));
            }
            if self.parent(self.root) != NIL {
                return Err(IndexError::tree_at(self.nodes[self.root].key, "root has a parent"));
            }
        }

        let mut count = 0;
        let black_height = self.verify_subtree(self.root, None, None, &mut count)?;
        if count != self.len {
            return Err(IndexError::tree(format!(
                "reachable node count {} does not match length {}",
                count, self.len
            )));
        }
        Ok(black_height)
    }

    // ---------------------------------------------------------------------
    // Arena helpers
    // ---------------------------------------------------------------------

    fn alloc(&mut self, key: RideId) -> usize {
        match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = Node::leaf(key);
                slot
            }
            None => {
                self.nodes.push(Node::leaf(key));
                self.nodes.len() - 1
            }
        }
    }

    fn release(&mut self, slot: usize) {
        self.nodes[slot] = Node::sentinel();
        self.free.push(slot);
    }

    fn left(&self, node: usize) -> usize {
        self.nodes[node].left
    }

    fn right(&self, node: usize) -> usize {
        self.nodes[node].right
    }

    fn parent(&self, node: usize) -> usize {
        self.nodes[node].parent
    }

    fn color(&self, node: usize) -> Color {
        self.nodes[node].color
    }

    fn set_color(&mut self, node: usize, color: Color) {
        self.nodes[node].color = color;
    }

    fn find(&self, id: RideId) -> usize {
        let mut cursor = self.root;
        while cursor != NIL {
            cursor = match id.cmp(&self.nodes[cursor].key) {
                Ordering::Less => self.left(cursor),
                Ordering::Greater => self.right(cursor),
                Ordering::Equal => return cursor,
            };
        }
        NIL
    }

    fn minimum(&self, mut node: usize) -> usize {
        while self.left(node) != NIL {
            node = self.left(node);
        }
        node
    }

    // ---------------------------------------------------------------------
    // Rebalancing
    // ---------------------------------------------------------------------

    fn rotate_left(&mut self, x: usize) {
        let y = self.right(x);
        let inner = self.left(y);

        self.nodes[x].right = inner;
        if inner != NIL {
            self.nodes[inner].parent = x;
        }

        let parent = self.parent(x);
        self.nodes[y].parent = parent;
        if parent == NIL {
            self.root = y;
        } else if x == self.left(parent) {
            self.nodes[parent].left = y;
        } else {
            self.nodes[parent].right = y;
        }

        self.nodes[y].left = x;
        self.nodes[x].parent = y;
    }

    fn rotate_right(&mut self, x: usize) {
        let y = self.left(x);
        let inner = self.right(y);

        self.nodes[x].left = inner;
        if inner != NIL {
            self.nodes[inner].parent = x;
        }

        let parent = self.parent(x);
        self.nodes[y].parent = parent;
        if parent == NIL {
            self.root = y;
        } else if x == self.right(parent) {
            self.nodes[parent].right = y;
        } else {
            self.nodes[parent].left = y;
        }

        self.nodes[y].right = x;
        self.nodes[x].parent = y;
    }

    fn insert_fixup(&mut self, mut node: usize) {
        // The sentinel is black, so the root's "parent" ends the loop.
        while self.color(self.parent(node)) == Color::Red {
            let parent = self.parent(node);
            let grandparent = self.parent(parent);

            if parent == self.left(grandparent) {
                let uncle = self.right(grandparent);
                if self.color(uncle) == Color::Red {
                    self.set_color(parent, Color::Black);
                    self.set_color(uncle, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    node = grandparent;
                } else {
                    if node == self.right(parent) {
                        node = parent;
                        self.rotate_left(node);
                    }
                    let parent = self.parent(node);
                    let grandparent = self.parent(parent);
                    self.set_color(parent, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    self.rotate_right(grandparent);
                }
            } else {
                let uncle = self.left(grandparent);
                if self.color(uncle) == Color::Red {
                    self.set_color(parent, Color::Black);
                    self.set_color(uncle, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    node = grandparent;
                } else {
                    if node == self.left(parent) {
                        node = parent;
                        self.rotate_right(node);
                    }
                    let parent = self.parent(node);
                    let grandparent = self.parent(parent);
                    self.set_color(parent, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    self.rotate_left(grandparent);
                }
            }
        }

        let root = self.root;
        self.set_color(root, Color::Black);
    }

    fn delete_fixup(&mut self, mut node: usize) {
        while node != self.root && self.color(node) == Color::Black {
            let parent = self.parent(node);

            if node == self.left(parent) {
                let mut sibling = self.right(parent);
                if self.color(sibling) == Color::Red {
                    self.set_color(sibling, Color::Black);
                    self.set_color(parent, Color::Red);
                    self.rotate_left(parent);
                    sibling = self.right(self.parent(node));
                }

                if self.color(self.left(sibling)) == Color::Black
                    && self.color(self.right(sibling)) == Color::Black
                {
                    self.set_color(sibling, Color::Red);
                    node = self.parent(node);
                } else {
                    if self.color(self.right(sibling)) == Color::Black {
                        let near = self.left(sibling);
                        self.set_color(near, Color::Black);
                        self.set_color(sibling, Color::Red);
                        self.rotate_right(sibling);
                        sibling = self.right(self.parent(node));
                    }
                    let parent = self.parent(node);
                    let far = self.right(sibling);
                    self.set_color(sibling, self.color(parent));
                    self.set_color(parent, Color::Black);
                    self.set_color(far, Color::Black);
                    self.rotate_left(parent);
                    node = self.root;
                }
            } else {
                let mut sibling = self.left(parent);
                if self.color(sibling) == Color::Red {
                    self.set_color(sibling, Color::Black);
                    self.set_color(parent, Color::Red);
                    self.rotate_right(parent);
                    sibling = self.left(self.parent(node));
                }

                if self.color(self.left(sibling)) == Color::Black
                    && self.color(self.right(sibling)) == Color::Black
                {
                    self.set_color(sibling, Color::Red);
                    node = self.parent(node);
                } else {
                    if self.color(self.left(sibling)) == Color::Black {
                        let near = self.right(sibling);
                        self.set_color(near, Color::Black);
                        self.set_color(sibling, Color::Red);
                        self.rotate_left(sibling);
                        sibling = self.left(self.parent(node));
                    }
                    let parent = self.parent(node);
                    let far = self.left(sibling);
                    self.set_color(sibling, self.color(parent));
                    self.set_color(parent, Color::Black);
                    self.set_color(far, Color::Black);
                    self.rotate_right(parent);
                    node = self.root;
                }
            }
        }

        self.set_color(node, Color::Black);
    }

    // ---------------------------------------------------------------------
    // Traversal
    // ---------------------------------------------------------------------

    fn collect_range(&self, node: usize, lo: RideId, hi: RideId, out: &mut Vec<RideId>) {
        if node == NIL {
            return;
        }
        let key = self.nodes[node].key;
        if lo < key {
            self.collect_range(self.left(node), lo, hi, out);
        }
        if lo <= key && key <= hi {
            out.push(key);
        }
        if key < hi {
            self.collect_range(self.right(node), lo, hi, out);
        }
    }

    fn subtree_height(&self, node: usize) -> usize {
        if node == NIL {
            return 0;
        }
        1 + self
            .subtree_height(self.left(node))
            .max(self.subtree_height(self.right(node)))
    }

    fn verify_subtree(
        &self,
        node: usize,
        lower: Option<RideId>,
        upper: Option<RideId>,
        count: &mut usize,
    ) -> IndexResult<usize> {
        if node == NIL {
            return Ok(1);
        }
        *count += 1;

        let key = self.nodes[node].key;
        if lower.is_some_and(|lo| key <= lo) || upper.is_some_and(|hi| key >= hi) {
            return Err(IndexError::tree_at(key, "key out of in-order position"));
        }

        for child in [self.left(node), self.right(node)] {
            if child == NIL {
                continue;
            }
            if self.parent(child) != node {
                return Err(IndexError::tree_at(key, "child has a stale parent link"));
            }
            if self.color(node) == Color::Red && self.color(child) == Color::Red {
                return Err(IndexError::tree_at(key, "red node has a red child"));
            }
        }

        let left_height = self.verify_subtree(self.left(node), lower, Some(key), count)?;
        let right_height = self.verify_subtree(self.right(node), Some(key), upper, count)?;
        if left_height != right_height {
            return Err(IndexError::tree_at(
                key,
                format!("black-height mismatch ({} vs {})", left_height, right_height),
            ));
        }

        let own = usize::from(self.color(node) == Color::Black);
        Ok(left_height + own)
    }
}
