//! Generic binary tree and a leaf-depth equality check.

/// A node of a plain binary tree with owned children.
///
/// # Examples
///
/// ```
/// use balanced_collections::binary_tree::BinaryNode;
///
/// let mut root = BinaryNode::new(1);
/// root.left = Some(Box::new(BinaryNode::new(2)));
/// assert!(!root.is_leaf());
/// ```
pub struct BinaryNode<T> {
    pub value: T,
    pub left: Option<Box<BinaryNode<T>>>,
    pub right: Option<Box<BinaryNode<T>>>,
}

impl<T> BinaryNode<T> {
    pub fn new(value: T) -> Self {
        BinaryNode {
            value,
            left: None,
            right: None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Computes the depth at which leaves are expected to occur. A node with a single child
/// passes through to that child's leaves at one greater depth; a node with two children
/// requires both subtrees to agree on a non-zero leaf depth, and reports a mismatch as 0.
fn leaf_depth<T>(node: &BinaryNode<T>) -> usize {
    if node.is_leaf() {
        return 1;
    }
    let left_depth = node.left.as_ref().map_or(0, |left| leaf_depth(left));
    let right_depth = node.right.as_ref().map_or(0, |right| leaf_depth(right));
    if node.left.is_some() && node.right.is_some() {
        if left_depth != 0 && right_depth != 0 {
            left_depth.max(right_depth) + 1
        } else {
            0
        }
    } else {
        left_depth + right_depth + 1
    }
}

/// Verifies that every leaf below `node` occurs at exactly `target` depth.
fn depths_match<T>(node: &BinaryNode<T>, target: usize, current: usize) -> bool {
    if node.is_leaf() {
        return current == target;
    }
    node.left
        .as_ref()
        .map_or(true, |left| depths_match(left, target, current + 1))
        && node
            .right
            .as_ref()
            .map_or(true, |right| depths_match(right, target, current + 1))
}

/// Returns `true` if every leaf of the tree occurs at the same depth from the root. An empty
/// tree is vacuously balanced in this sense, and a chain of single-child nodes counts as one
/// path of increasing depth.
///
/// # Examples
///
/// ```
/// use balanced_collections::binary_tree::{equal_paths, BinaryNode};
///
/// let mut root = BinaryNode::new(1);
/// assert!(equal_paths(Some(&root)));
///
/// root.left = Some(Box::new(BinaryNode::new(2)));
/// assert!(equal_paths(Some(&root)));
/// ```
pub fn equal_paths<T>(root: Option<&BinaryNode<T>>) -> bool {
    match root {
        None => true,
        Some(node) => depths_match(node, leaf_depth(node), 1),
    }
}

#[cfg(test)]
mod tests {
    use super::{equal_paths, BinaryNode};

    fn node<T>(value: T) -> Box<BinaryNode<T>> {
        Box::new(BinaryNode::new(value))
    }

    #[test]
    fn test_empty_tree() {
        assert!(equal_paths::<u32>(None));
    }

    #[test]
    fn test_single_node() {
        let root = BinaryNode::new(1);
        assert!(equal_paths(Some(&root)));
    }

    #[test]
    fn test_root_with_one_child() {
        let mut root = BinaryNode::new(1);
        root.left = Some(node(2));
        assert!(equal_paths(Some(&root)));
    }

    #[test]
    fn test_balanced_two_children() {
        let mut root = BinaryNode::new(1);
        root.left = Some(node(2));
        root.right = Some(node(3));
        assert!(equal_paths(Some(&root)));
    }

    #[test]
    fn test_unequal_leaf_depths() {
        // Leaves at depth 2 (left) and depth 3 (right).
        let mut root = BinaryNode::new(1);
        root.left = Some(node(2));
        let mut right = node(3);
        right.left = Some(node(4));
        root.right = Some(right);
        assert!(!equal_paths(Some(&root)));
    }

    #[test]
    fn test_single_child_chains_of_equal_depth() {
        // Both branches bottom out at depth 3 through single-child chains.
        let mut left = node(2);
        left.right = Some(node(4));
        let mut right = node(3);
        right.left = Some(node(5));
        let mut root = BinaryNode::new(1);
        root.left = Some(left);
        root.right = Some(right);
        assert!(equal_paths(Some(&root)));
    }

    #[test]
    fn test_deep_mismatch() {
        let mut left = node(2);
        left.left = Some(node(4));
        let mut right = node(3);
        let mut far = node(5);
        far.right = Some(node(6));
        right.right = Some(far);
        let mut root = BinaryNode::new(1);
        root.left = Some(left);
        root.right = Some(right);
        assert!(!equal_paths(Some(&root)));
    }
}
