//! Insert rebalancing: rotations plus the recolor/rotate fix-up loop.

use crate::{Color, Tree, node::NodeId};

impl<K, V> Tree<K, V> {
    /// Restores the red-black invariants after linking `node`, a freshly
    /// inserted red non-root node.
    ///
    /// Loop invariant: `node` is red. Each round either recolors and moves
    /// two levels up (red uncle) or rotates locally and stops (black
    /// uncle), so the loop is bounded by the height of the tree.
    pub(crate) fn insert_fixup(&mut self, mut node: NodeId) {
        loop {
            let Some(parent) = self.node(node).parent else {
                break;
            };
            if self.is_black(Some(parent)) {
                break;
            }
            // The parent is red, so it is not the root and the
            // grandparent exists.
            let gparent = self
                .node(parent)
                .parent
                .expect("red node is never the root");

            if self.node(gparent).left == Some(parent) {
                let uncle = self.node(gparent).right;
                if self.is_red(uncle) {
                    /*
                     * Case 1 - red uncle: color flips only.
                     *
                     *       G            g
                     *      / \          / \
                     *     p   u  -->   P   U
                     *    /            /
                     *   n            n
                     *
                     * g may now sit under another red node, so continue
                     * the loop from g.
                     */
                    self.node_mut(parent).color = Color::Black;
                    self.node_mut(uncle.expect("a red uncle is present")).color = Color::Black;
                    self.node_mut(gparent).color = Color::Red;
                    node = gparent;
                    continue;
                }

                if self.node(parent).right == Some(node) {
                    /*
                     * Case 2 - black uncle, zig-zag: a left rotation at p
                     * straightens the p-n edge into Case 3.
                     *
                     *      G             G
                     *     / \           / \
                     *    p   U  -->    n   U
                     *     \           /
                     *      n         p
                     */
                    node = parent;
                    self.rotate_left(node);
                }

                /*
                 * Case 3 - black uncle, straight line: recolor, then a
                 * right rotation at G settles the subtree for good.
                 *
                 *        G           P
                 *       / \         / \
                 *      p   U  -->  n   g
                 *     /                 \
                 *    n                   U
                 */
                let parent = self
                    .node(node)
                    .parent
                    .expect("case 2 keeps node below the root");
                self.node_mut(parent).color = Color::Black;
                self.node_mut(gparent).color = Color::Red;
                self.rotate_right(gparent);
                break;
            } else {
                // Mirror image: the parent is the grandparent's right
                // child, rotations swap direction.
                let uncle = self.node(gparent).left;
                if self.is_red(uncle) {
                    /* Case 1 - color flips */
                    self.node_mut(parent).color = Color::Black;
                    self.node_mut(uncle.expect("a red uncle is present")).color = Color::Black;
                    self.node_mut(gparent).color = Color::Red;
                    node = gparent;
                    continue;
                }

                if self.node(parent).left == Some(node) {
                    /* Case 2 - right rotate at p */
                    node = parent;
                    self.rotate_right(node);
                }

                /* Case 3 - left rotate at G */
                let parent = self
                    .node(node)
                    .parent
                    .expect("case 2 keeps node below the root");
                self.node_mut(parent).color = Color::Black;
                self.node_mut(gparent).color = Color::Red;
                self.rotate_left(gparent);
                break;
            }
        }

        // Case 1 can bubble red all the way up; the root is black no
        // matter what happened above.
        let root = self.root.expect("fix-up runs on a non-empty tree");
        self.node_mut(root).color = Color::Black;
    }

    /// Promotes `x`'s right child into `x`'s position. Pure index
    /// reassignment, no comparisons, colors untouched.
    pub(crate) fn rotate_left(&mut self, x: NodeId) {
        let y = self.node(x).right.expect("rotate_left needs a right child");

        let y_left = self.node(y).left;
        self.node_mut(x).right = y_left;
        if let Some(child) = y_left {
            self.node_mut(child).parent = Some(x);
        }

        let parent = self.node(x).parent;
        self.node_mut(y).parent = parent;
        self.change_child(x, y, parent);

        self.node_mut(y).left = Some(x);
        self.node_mut(x).parent = Some(y);
    }

    /// Mirror image of [`Tree::rotate_left`].
    pub(crate) fn rotate_right(&mut self, x: NodeId) {
        let y = self.node(x).left.expect("rotate_right needs a left child");

        let y_right = self.node(y).right;
        self.node_mut(x).left = y_right;
        if let Some(child) = y_right {
            self.node_mut(child).parent = Some(x);
        }

        let parent = self.node(x).parent;
        self.node_mut(y).parent = parent;
        self.change_child(x, y, parent);

        self.node_mut(y).right = Some(x);
        self.node_mut(x).parent = Some(y);
    }

    /// Rewires `parent` (or the root reference) from `old` to `new`.
    fn change_child(&mut self, old: NodeId, new: NodeId, parent: Option<NodeId>) {
        match parent {
            Some(parent) => {
                let parent = self.node_mut(parent);
                if parent.left == Some(old) {
                    parent.left = Some(new);
                } else {
                    parent.right = Some(new);
                }
            }
            None => self.root = Some(new),
        }
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::Tree;

    fn keys(tree: &Tree<u32, ()>) -> Vec<u32> {
        tree.iter().map(|(k, _)| *k).collect()
    }

    #[test]
    fn rotations_preserve_in_order_and_move_the_root() {
        let mut tree: Tree<u32, ()> = (1..=7).map(|k| (k, ())).collect();
        let before = keys(&tree);
        let root = tree.root.unwrap();
        let right = tree.node(root).right.unwrap();

        tree.rotate_left(root);
        // The old right child took over the top slot.
        assert_eq!(tree.root, Some(right));
        assert_eq!(keys(&tree), before);

        tree.rotate_right(right);
        assert_eq!(tree.root, Some(root));
        assert_eq!(keys(&tree), before);
    }

    #[test]
    fn rotation_reattaches_the_inner_subtree() {
        let mut tree: Tree<u32, ()> = [4, 2, 6, 5].into_iter().map(|k| (k, ())).collect();
        let root = tree.root.unwrap();

        // y's former left subtree (5) must become x's new right child.
        tree.rotate_left(root);
        assert_eq!(tree.node(root).right.map(|id| tree.node(id).key), Some(5));
        assert_eq!(tree.node(root).parent, tree.root);
        assert_eq!(keys(&tree), vec![2, 4, 5, 6]);
    }
}
