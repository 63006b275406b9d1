use super::handle::Handle;

/// Node color for the red-black balancing discipline.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Color {
    Red,
    Black,
}

/// One tree node: a required key, an optional payload, the red-black color,
/// the subtree node count (`order`, including the node itself), and links to
/// parent and children.
///
/// Links are plain handles; "no child"/"no parent" is the tree's sentinel
/// node, never an absent value. The sentinel itself is stored as a node with
/// `key == None`, `order == 0` and color black; its key and value are never
/// read, only its bookkeeping fields.
#[derive(Clone)]
pub(crate) struct Node<K, V> {
    key: Option<K>,
    pub(crate) value: Option<V>,
    pub(crate) color: Color,
    pub(crate) order: usize,
    pub(crate) parent: Handle,
    pub(crate) left: Handle,
    pub(crate) right: Handle,
}

impl<K, V> Node<K, V> {
    /// A fresh data node: red, `order == 1`, both children at the sentinel.
    pub(crate) fn new(key: K, value: Option<V>, parent: Handle, nil: Handle) -> Self {
        Self {
            key: Some(key),
            value,
            color: Color::Red,
            order: 1,
            parent,
            left: nil,
            right: nil,
        }
    }

    /// The boundary marker. Its links are patched to point at itself right
    /// after allocation; see `RawRbTree::new`.
    pub(crate) fn sentinel() -> Self {
        let placeholder = Handle::from_index(0);
        Self {
            key: None,
            value: None,
            color: Color::Black,
            order: 0,
            parent: placeholder,
            left: placeholder,
            right: placeholder,
        }
    }

    /// The node's key. Must never be called on the sentinel.
    #[inline]
    pub(crate) fn key(&self) -> &K {
        self.key.as_ref().expect("`Node::key()` - the sentinel carries no key!")
    }

    /// Consumes the node, yielding its key and value. Must never be called on
    /// the sentinel.
    pub(crate) fn into_pair(self) -> (K, Option<V>) {
        let key = self.key.expect("`Node::into_pair()` - the sentinel carries no key!");
        (key, self.value)
    }
}
