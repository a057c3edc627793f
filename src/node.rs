use std::fmt::Debug;

use crate::Color;

/// Index of a node in the tree's arena.
///
/// Stable for the lifetime of the node: slots are only ever appended, and
/// the arena is emptied wholesale by `clear`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NodeId(pub(crate) usize);

#[derive(Clone)]
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) color: Color,
    // The parent index is observational only; ownership runs strictly
    // downward through `left` and `right`.
    pub(crate) parent: Option<NodeId>,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
}

impl<K, V> Node<K, V> {
    /// A fresh, unlinked node. New nodes start red; insertion recolors the
    /// root case and fix-up handles the rest.
    pub(crate) fn new(key: K, value: V) -> Self {
        Node {
            key,
            value,
            color: Color::Red,
            parent: None,
            left: None,
            right: None,
        }
    }
}

impl<K, V> Debug for Node<K, V>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!(
            "{:?}::({:?},{:?})",
            self.color, self.key, self.value
        ))
    }
}
