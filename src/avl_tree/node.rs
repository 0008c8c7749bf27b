use crate::arena::Handle;
use crate::entry::Entry;

/// A struct representing an internal node of an AVL tree.
///
/// Nodes live in an arena and refer to their parent and children by handle. The balance
/// factor is the height of the right subtree minus the height of the left subtree; it rests
/// in {-1, 0, 1} and reaches plus or minus two only transiently while a fix-up walk repairs
/// the tree.
pub struct Node<T, U> {
    pub entry: Entry<T, U>,
    pub balance: i8,
    pub parent: Option<Handle>,
    pub left: Option<Handle>,
    pub right: Option<Handle>,
}

impl<T, U> Node<T, U> {
    pub fn new(key: T, value: U, parent: Option<Handle>) -> Self {
        Node {
            entry: Entry::new(key, value),
            balance: 0,
            parent,
            left: None,
            right: None,
        }
    }
}
