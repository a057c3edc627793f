use std::{borrow::Borrow, cmp::Ordering::*, fmt, fmt::Debug};

use crate::{
    Color, Error,
    node::{Node, NodeId},
};

/// An ordered map backed by a red-black tree.
///
/// All nodes live in an arena owned by the map; links between them are
/// arena indices, so rebalancing is plain index reassignment and the whole
/// structure drops in one go. Insertion is O(log n); there is no removal
/// of individual entries, only [`Tree::clear`].
#[derive(Clone)]
pub struct Tree<K, V> {
    pub(crate) nodes: Vec<Node<K, V>>,
    pub(crate) root: Option<NodeId>,
}

// Public API.
impl<K, V> Tree<K, V> {
    pub fn new() -> Self {
        Tree {
            nodes: Vec::new(),
            root: None,
        }
    }

    /// Number of entries. Arena slots are never freed while the tree is
    /// live, so the arena length is the entry count.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    /// Returns the entry currently sitting at the root of the tree.
    ///
    /// The root is whatever node the balancing left on top; it is neither
    /// the minimum, the maximum, nor necessarily the first insertion, and
    /// it can change on any insert. Fails with [`Error::EmptyTree`] when
    /// the tree has no nodes.
    pub fn peek_root(&self) -> Result<(&K, &V), Error> {
        let root = self.root.ok_or(Error::EmptyTree)?;
        let node = self.node(root);
        Ok((&node.key, &node.value))
    }

    /// Entry with the smallest key.
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.leftmost().map(|id| {
            let node = self.node(id);
            (&node.key, &node.value)
        })
    }

    /// Entry with the largest key.
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.rightmost().map(|id| {
            let node = self.node(id);
            (&node.key, &node.value)
        })
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q> + Ord,
        Q: Ord + ?Sized,
    {
        self.get_key_value(key).is_some()
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q> + Ord,
        Q: Ord + ?Sized,
    {
        self.get_key_value(key).map(|(_, v)| v)
    }

    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q> + Ord,
        Q: Ord + ?Sized,
    {
        let mut current = self.root;
        while let Some(id) = current {
            let node = self.node(id);
            match key.cmp(node.key.borrow()) {
                Equal => return Some((&node.key, &node.value)),
                Less => current = node.left,
                Greater => current = node.right,
            }
        }
        None
    }

    /// Inserts a key/value pair.
    ///
    /// If the key is already present the tree is left untouched and the
    /// new value is dropped; the first value stored under a key wins.
    pub fn insert(&mut self, key: K, value: V)
    where
        K: Ord,
    {
        let Some(mut current) = self.root else {
            let root = self.alloc(Node::new(key, value));
            self.node_mut(root).color = Color::Black;
            self.root = Some(root);
            return;
        };

        // Standard BST descent. An equal key anywhere on the path keeps
        // the existing entry.
        let (parent, go_left) = loop {
            let node = self.node(current);
            match key.cmp(&node.key) {
                Equal => return,
                Less => match node.left {
                    Some(left) => current = left,
                    None => break (current, true),
                },
                Greater => match node.right {
                    Some(right) => current = right,
                    None => break (current, false),
                },
            }
        };

        let node = self.alloc(Node::new(key, value));
        self.node_mut(node).parent = Some(parent);
        if go_left {
            self.node_mut(parent).left = Some(node);
        } else {
            self.node_mut(parent).right = Some(node);
        }
        self.insert_fixup(node);
    }
}

// Arena plumbing shared with the balancing and iterator code.
impl<K, V> Tree<K, V> {
    #[inline]
    pub(crate) fn node(&self, id: NodeId) -> &Node<K, V> {
        &self.nodes[id.0]
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node<K, V> {
        &mut self.nodes[id.0]
    }

    #[inline]
    pub(crate) fn is_red(&self, node: Option<NodeId>) -> bool {
        node.is_some_and(|id| self.node(id).color == Color::Red)
    }

    #[inline]
    pub(crate) fn is_black(&self, node: Option<NodeId>) -> bool {
        !self.is_red(node)
    }

    fn alloc(&mut self, node: Node<K, V>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    pub(crate) fn leftmost(&self) -> Option<NodeId> {
        let mut current = self.root?;
        while let Some(left) = self.node(current).left {
            current = left;
        }
        Some(current)
    }

    pub(crate) fn rightmost(&self) -> Option<NodeId> {
        let mut current = self.root?;
        while let Some(right) = self.node(current).right {
            current = right;
        }
        Some(current)
    }

    /// In-order successor of `id`.
    pub(crate) fn successor(&self, id: NodeId) -> Option<NodeId> {
        // With a right-hand child, go down and then left as far as we can.
        if let Some(mut current) = self.node(id).right {
            while let Some(left) = self.node(current).left {
                current = left;
            }
            return Some(current);
        }
        // Otherwise climb until we leave a left subtree; that parent is
        // the next node. Climbing off the rightmost node ends at the root
        // with no parent.
        let mut current = id;
        loop {
            let parent = self.node(current).parent?;
            if self.node(parent).left == Some(current) {
                return Some(parent);
            }
            current = parent;
        }
    }

    /// In-order predecessor of `id`.
    pub(crate) fn predecessor(&self, id: NodeId) -> Option<NodeId> {
        if let Some(mut current) = self.node(id).left {
            while let Some(right) = self.node(current).right {
                current = right;
            }
            return Some(current);
        }
        let mut current = id;
        loop {
            let parent = self.node(current).parent?;
            if self.node(parent).right == Some(current) {
                return Some(parent);
            }
            current = parent;
        }
    }
}

impl<K, V> Default for Tree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Debug for Tree<K, V>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> PartialEq for Tree<K, V>
where
    K: PartialEq,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K, V> Eq for Tree<K, V>
where
    K: Eq,
    V: Eq,
{
}

impl<K: Ord, V> FromIterator<(K, V)> for Tree<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Tree::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord, V> Extend<(K, V)> for Tree<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

#[cfg(test)]
impl<K: Ord, V> Tree<K, V> {
    /// Walks the whole tree and panics on the first violated red-black or
    /// structural invariant.
    pub(crate) fn check_invariants(&self) {
        let Some(root) = self.root else {
            assert!(self.nodes.is_empty(), "empty tree with live arena slots");
            return;
        };
        assert_eq!(self.node(root).parent, None, "root has a parent");
        assert!(self.is_black(Some(root)), "root is red");
        let mut visited = 0;
        self.check_subtree(root, None, None, &mut visited);
        assert_eq!(visited, self.len(), "arena slot unreachable from the root");
    }

    /// Returns the black height of the subtree rooted at `id`, checking
    /// key bounds, link symmetry, and the no-red-red rule on the way.
    fn check_subtree(
        &self,
        id: NodeId,
        lower: Option<&K>,
        upper: Option<&K>,
        visited: &mut usize,
    ) -> usize {
        *visited += 1;
        let node = self.node(id);
        if let Some(lower) = lower {
            assert!(*lower < node.key, "key not above its lower bound");
        }
        if let Some(upper) = upper {
            assert!(node.key < *upper, "key not below its upper bound");
        }

        let left_black_height = match node.left {
            Some(left) => {
                assert_eq!(self.node(left).parent, Some(id), "left parent link broken");
                assert!(
                    !(self.is_red(Some(id)) && self.is_red(Some(left))),
                    "red node has a red left child"
                );
                self.check_subtree(left, lower, Some(&node.key), visited)
            }
            None => 1,
        };
        let right_black_height = match node.right {
            Some(right) => {
                assert_eq!(self.node(right).parent, Some(id), "right parent link broken");
                assert!(
                    !(self.is_red(Some(id)) && self.is_red(Some(right))),
                    "red node has a red right child"
                );
                self.check_subtree(right, Some(&node.key), upper, visited)
            }
            None => 1,
        };
        assert_eq!(left_black_height, right_black_height, "black height mismatch");

        left_black_height + usize::from(node.color == Color::Black)
    }

    pub(crate) fn height(&self) -> usize {
        fn walk<K, V>(tree: &Tree<K, V>, node: Option<NodeId>) -> usize {
            match node {
                None => 0,
                Some(id) => {
                    let node = tree.node(id);
                    1 + walk(tree, node.left).max(walk(tree, node.right))
                }
            }
        }
        walk(self, self.root)
    }
}
