use crate::arena::{Arena, Handle};
use crate::avl_tree::node::Node;
use crate::entry::Entry;
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::mem;

/// An AVL tree over an arena of handle-linked nodes.
///
/// The arena owns every node; `parent`, `left`, and `right` are back-references for
/// traversal only. Rotations and the node-position swap repoint links but never change the
/// set of live nodes.
pub struct Tree<T, U> {
    pub arena: Arena<Node<T, U>>,
    pub root: Option<Handle>,
}

impl<T, U> Tree<T, U> {
    pub fn new() -> Self {
        Tree {
            arena: Arena::new(),
            root: None,
        }
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
    }

    pub fn find<V>(&self, key: &V) -> Option<Handle>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let mut current = self.root;
        while let Some(handle) = current {
            current = match key.cmp(self.arena[handle].entry.key.borrow()) {
                Ordering::Less => self.arena[handle].left,
                Ordering::Greater => self.arena[handle].right,
                Ordering::Equal => return Some(handle),
            };
        }
        None
    }

    pub fn get<V>(&self, key: &V) -> Option<&Entry<T, U>>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.find(key).map(move |handle| &self.arena[handle].entry)
    }

    pub fn get_mut<V>(&mut self, key: &V) -> Option<&mut Entry<T, U>>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.find(key)
            .map(move |handle| &mut self.arena[handle].entry)
    }

    fn subtree_min(&self, handle: Handle) -> Handle {
        let mut current = handle;
        while let Some(left) = self.arena[current].left {
            current = left;
        }
        current
    }

    fn subtree_max(&self, handle: Handle) -> Handle {
        let mut current = handle;
        while let Some(right) = self.arena[current].right {
            current = right;
        }
        current
    }

    pub fn min(&self) -> Option<&Entry<T, U>> {
        self.root
            .map(|root| &self.arena[self.subtree_min(root)].entry)
    }

    pub fn max(&self) -> Option<&Entry<T, U>> {
        self.root
            .map(|root| &self.arena[self.subtree_max(root)].entry)
    }

    /// Returns the node holding the largest key smaller than `handle`'s key.
    pub fn predecessor(&self, handle: Handle) -> Option<Handle> {
        if let Some(left) = self.arena[handle].left {
            return Some(self.subtree_max(left));
        }
        let mut current = handle;
        while let Some(parent) = self.arena[current].parent {
            if self.arena[parent].right == Some(current) {
                return Some(parent);
            }
            current = parent;
        }
        None
    }

    pub fn floor<V>(&self, key: &V) -> Option<&Entry<T, U>>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let mut current = self.root;
        let mut result = None;
        while let Some(handle) = current {
            current = match key.cmp(self.arena[handle].entry.key.borrow()) {
                Ordering::Less => self.arena[handle].left,
                Ordering::Greater => {
                    result = Some(handle);
                    self.arena[handle].right
                }
                Ordering::Equal => return Some(&self.arena[handle].entry),
            };
        }
        result.map(|handle| &self.arena[handle].entry)
    }

    pub fn ceil<V>(&self, key: &V) -> Option<&Entry<T, U>>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let mut current = self.root;
        let mut result = None;
        while let Some(handle) = current {
            current = match key.cmp(self.arena[handle].entry.key.borrow()) {
                Ordering::Greater => self.arena[handle].right,
                Ordering::Less => {
                    result = Some(handle);
                    self.arena[handle].left
                }
                Ordering::Equal => return Some(&self.arena[handle].entry),
            };
        }
        result.map(|handle| &self.arena[handle].entry)
    }

    /// Repoints the child slot of `parent` that held `old` to `new`, or the root pointer if
    /// `parent` is absent.
    fn replace_child(&mut self, parent: Option<Handle>, old: Handle, new: Handle) {
        match parent {
            None => self.root = Some(new),
            Some(parent) => {
                if self.arena[parent].left == Some(old) {
                    self.arena[parent].left = Some(new);
                } else {
                    self.arena[parent].right = Some(new);
                }
            }
        }
    }

    /// Promotes `handle`'s right child into `handle`'s position. Purely structural: balance
    /// factors are adjusted by the caller.
    fn rotate_left(&mut self, handle: Handle) {
        let child = match self.arena[handle].right {
            Some(child) => child,
            None => unreachable!(),
        };
        let parent = self.arena[handle].parent;
        self.replace_child(parent, handle, child);

        let grandchild = self.arena[child].left;
        self.arena[handle].right = grandchild;
        if let Some(grandchild) = grandchild {
            self.arena[grandchild].parent = Some(handle);
        }
        self.arena[child].left = Some(handle);
        self.arena[child].parent = parent;
        self.arena[handle].parent = Some(child);
    }

    /// Promotes `handle`'s left child into `handle`'s position. Purely structural: balance
    /// factors are adjusted by the caller.
    fn rotate_right(&mut self, handle: Handle) {
        let child = match self.arena[handle].left {
            Some(child) => child,
            None => unreachable!(),
        };
        let parent = self.arena[handle].parent;
        self.replace_child(parent, handle, child);

        let grandchild = self.arena[child].right;
        self.arena[handle].left = grandchild;
        if let Some(grandchild) = grandchild {
            self.arena[grandchild].parent = Some(handle);
        }
        self.arena[child].right = Some(handle);
        self.arena[child].parent = parent;
        self.arena[handle].parent = Some(child);
    }

    pub fn insert(&mut self, key: T, value: U) -> Option<Entry<T, U>>
    where
        T: Ord,
    {
        let mut parent = None;
        let mut went_left = false;
        let mut current = self.root;
        while let Some(handle) = current {
            match key.cmp(&self.arena[handle].entry.key) {
                Ordering::Equal => {
                    let entry = &mut self.arena[handle].entry;
                    return Some(mem::replace(entry, Entry::new(key, value)));
                }
                Ordering::Less => {
                    parent = Some(handle);
                    went_left = true;
                    current = self.arena[handle].left;
                }
                Ordering::Greater => {
                    parent = Some(handle);
                    went_left = false;
                    current = self.arena[handle].right;
                }
            }
        }

        let handle = self.arena.allocate(Node::new(key, value, parent));
        match parent {
            None => self.root = Some(handle),
            Some(parent) => {
                if went_left {
                    self.arena[parent].left = Some(handle);
                    self.arena[parent].balance -= 1;
                } else {
                    self.arena[parent].right = Some(handle);
                    self.arena[parent].balance += 1;
                }
                // A parent that ends up balanced previously had one child; the subtree
                // height under it did not grow.
                if self.arena[parent].balance != 0 {
                    self.insert_fix(parent, handle);
                }
            }
        }
        None
    }

    /// Walks from `parent` toward the root after `node` was attached, updating balance
    /// factors. Terminates at the first ancestor whose subtree height did not grow; a single
    /// or double rotation fully restores the heights above it, so rotations never propagate.
    fn insert_fix(&mut self, parent: Handle, node: Handle) {
        let grandparent = match self.arena[parent].parent {
            Some(grandparent) => grandparent,
            None => return,
        };
        if self.arena[grandparent].left == Some(parent) {
            self.arena[grandparent].balance -= 1;
            match self.arena[grandparent].balance {
                0 => {}
                -1 => self.insert_fix(grandparent, parent),
                _ => {
                    if self.arena[parent].left == Some(node) {
                        // Zig-zig.
                        self.rotate_right(grandparent);
                        self.arena[parent].balance = 0;
                        self.arena[grandparent].balance = 0;
                    } else {
                        // Zig-zag.
                        self.rotate_left(parent);
                        self.rotate_right(grandparent);
                        let (parent_balance, grandparent_balance) =
                            match self.arena[node].balance {
                                -1 => (0, 1),
                                0 => (0, 0),
                                _ => (-1, 0),
                            };
                        self.arena[parent].balance = parent_balance;
                        self.arena[grandparent].balance = grandparent_balance;
                        self.arena[node].balance = 0;
                    }
                }
            }
        } else {
            self.arena[grandparent].balance += 1;
            match self.arena[grandparent].balance {
                0 => {}
                1 => self.insert_fix(grandparent, parent),
                _ => {
                    if self.arena[parent].right == Some(node) {
                        // Zig-zig.
                        self.rotate_left(grandparent);
                        self.arena[parent].balance = 0;
                        self.arena[grandparent].balance = 0;
                    } else {
                        // Zig-zag.
                        self.rotate_right(parent);
                        self.rotate_left(grandparent);
                        let (parent_balance, grandparent_balance) =
                            match self.arena[node].balance {
                                1 => (0, -1),
                                0 => (0, 0),
                                _ => (1, 0),
                            };
                        self.arena[parent].balance = parent_balance;
                        self.arena[grandparent].balance = grandparent_balance;
                        self.arena[node].balance = 0;
                    }
                }
            }
        }
    }

    pub fn remove<V>(&mut self, key: &V) -> Option<Entry<T, U>>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let handle = self.find(key)?;

        // A node with two children trades positions with its in-order predecessor so that
        // the node physically unlinked has at most one child.
        if self.arena[handle].left.is_some() && self.arena[handle].right.is_some() {
            let predecessor = match self.predecessor(handle) {
                Some(predecessor) => predecessor,
                None => unreachable!(),
            };
            self.node_swap(handle, predecessor);
        }

        let parent = self.arena[handle].parent;
        let child = self.arena[handle].left.or(self.arena[handle].right);

        let mut diff = 0;
        if let Some(parent) = parent {
            diff = if self.arena[parent].left == Some(handle) {
                1
            } else {
                -1
            };
        }

        match parent {
            None => self.root = child,
            Some(parent) => {
                if self.arena[parent].left == Some(handle) {
                    self.arena[parent].left = child;
                } else {
                    self.arena[parent].right = child;
                }
            }
        }
        if let Some(child) = child {
            self.arena[child].parent = parent;
        }

        let node = self.arena.free(handle);
        if let Some(parent) = parent {
            self.remove_fix(parent, diff);
        }
        Some(node.entry)
    }

    /// Walks from `node` toward the root after a removal shortened the subtree on one side
    /// by one (`diff` is +1 when the left subtree shrank, -1 for the right). Unlike the
    /// insertion walk, a rotation here does not end the walk: whenever the rebalanced
    /// subtree's height shrank, the walk continues into the ancestor.
    fn remove_fix(&mut self, handle: Handle, diff: i8) {
        let parent = self.arena[handle].parent;
        let mut next_diff = 0;
        if let Some(parent) = parent {
            next_diff = if self.arena[parent].left == Some(handle) {
                1
            } else {
                -1
            };
        }

        let balance = self.arena[handle].balance + diff;
        self.arena[handle].balance = balance;
        match balance {
            0 => {
                if let Some(parent) = parent {
                    self.remove_fix(parent, next_diff);
                }
            }
            -1 | 1 => {}
            -2 => {
                let child = match self.arena[handle].left {
                    Some(child) => child,
                    None => unreachable!(),
                };
                let child_balance = self.arena[child].balance;
                if child_balance <= 0 {
                    // Zig-zig.
                    self.rotate_right(handle);
                    if child_balance == 0 {
                        // The rotated subtree kept its height; the walk ends here.
                        self.arena[handle].balance = -1;
                        self.arena[child].balance = 1;
                    } else {
                        self.arena[handle].balance = 0;
                        self.arena[child].balance = 0;
                        if let Some(parent) = parent {
                            self.remove_fix(parent, next_diff);
                        }
                    }
                } else {
                    // Zig-zag.
                    let grandchild = match self.arena[child].right {
                        Some(grandchild) => grandchild,
                        None => unreachable!(),
                    };
                    let grandchild_balance = self.arena[grandchild].balance;
                    self.rotate_left(child);
                    self.rotate_right(handle);
                    let (handle_balance, child_balance) = match grandchild_balance {
                        -1 => (1, 0),
                        0 => (0, 0),
                        _ => (0, -1),
                    };
                    self.arena[handle].balance = handle_balance;
                    self.arena[child].balance = child_balance;
                    self.arena[grandchild].balance = 0;
                    if let Some(parent) = parent {
                        self.remove_fix(parent, next_diff);
                    }
                }
            }
            _ => {
                let child = match self.arena[handle].right {
                    Some(child) => child,
                    None => unreachable!(),
                };
                let child_balance = self.arena[child].balance;
                if child_balance >= 0 {
                    // Zig-zig.
                    self.rotate_left(handle);
                    if child_balance == 0 {
                        // The rotated subtree kept its height; the walk ends here.
                        self.arena[handle].balance = 1;
                        self.arena[child].balance = -1;
                    } else {
                        self.arena[handle].balance = 0;
                        self.arena[child].balance = 0;
                        if let Some(parent) = parent {
                            self.remove_fix(parent, next_diff);
                        }
                    }
                } else {
                    // Zig-zag.
                    let grandchild = match self.arena[child].left {
                        Some(grandchild) => grandchild,
                        None => unreachable!(),
                    };
                    let grandchild_balance = self.arena[grandchild].balance;
                    self.rotate_right(child);
                    self.rotate_left(handle);
                    let (handle_balance, child_balance) = match grandchild_balance {
                        1 => (-1, 0),
                        0 => (0, 0),
                        _ => (0, 1),
                    };
                    self.arena[handle].balance = handle_balance;
                    self.arena[child].balance = child_balance;
                    self.arena[grandchild].balance = 0;
                    if let Some(parent) = parent {
                        self.remove_fix(parent, next_diff);
                    }
                }
            }
        }
    }

    /// Exchanges the tree positions of two nodes, then exchanges their balance fields so
    /// that each structural slot keeps its balance value. Keys and values stay with their
    /// node. The shape of the tree is unchanged, so this may leave keys out of order; it is
    /// only used immediately before unlinking a two-child node.
    fn node_swap(&mut self, n1: Handle, n2: Handle) {
        if n1 == n2 {
            return;
        }
        if self.arena[n1].parent == Some(n2) {
            return self.node_swap(n2, n1);
        }

        let parent1 = self.arena[n1].parent;
        let left1 = self.arena[n1].left;
        let right1 = self.arena[n1].right;
        let n1_on_left = parent1.map_or(false, |parent| self.arena[parent].left == Some(n1));
        let parent2 = self.arena[n2].parent;
        let left2 = self.arena[n2].left;
        let right2 = self.arena[n2].right;
        let n2_on_left = parent2.map_or(false, |parent| self.arena[parent].left == Some(n2));

        // n1 takes n2's children in both cases.
        self.arena[n1].left = left2;
        self.arena[n1].right = right2;
        if let Some(left) = left2 {
            self.arena[left].parent = Some(n1);
        }
        if let Some(right) = right2 {
            self.arena[right].parent = Some(n1);
        }

        if parent2 == Some(n1) {
            // Adjacent: n2 moves up into n1's slot and keeps n1 below it on the same side.
            if n2_on_left {
                self.arena[n2].left = Some(n1);
                self.arena[n2].right = right1;
                if let Some(right) = right1 {
                    self.arena[right].parent = Some(n2);
                }
            } else {
                self.arena[n2].right = Some(n1);
                self.arena[n2].left = left1;
                if let Some(left) = left1 {
                    self.arena[left].parent = Some(n2);
                }
            }
            self.arena[n1].parent = Some(n2);
        } else {
            self.arena[n2].left = left1;
            self.arena[n2].right = right1;
            if let Some(left) = left1 {
                self.arena[left].parent = Some(n2);
            }
            if let Some(right) = right1 {
                self.arena[right].parent = Some(n2);
            }
            self.arena[n1].parent = parent2;
            match parent2 {
                None => self.root = Some(n1),
                Some(parent) => {
                    if n2_on_left {
                        self.arena[parent].left = Some(n1);
                    } else {
                        self.arena[parent].right = Some(n1);
                    }
                }
            }
        }

        self.arena[n2].parent = parent1;
        match parent1 {
            None => self.root = Some(n2),
            Some(parent) => {
                if n1_on_left {
                    self.arena[parent].left = Some(n2);
                } else {
                    self.arena[parent].right = Some(n2);
                }
            }
        }

        // Balance stays with the structural slot, not the node.
        let balance = self.arena[n1].balance;
        self.arena[n1].balance = self.arena[n2].balance;
        self.arena[n2].balance = balance;
    }
}

#[cfg(test)]
mod tests {
    use super::Tree;
    use crate::arena::Handle;
    use rand::{Rng, SeedableRng, XorShiftRng};

    fn validate_node<T, U>(tree: &Tree<T, U>, handle: Option<Handle>, parent: Option<Handle>) -> i32
    where
        T: Ord,
    {
        let handle = match handle {
            Some(handle) => handle,
            None => return 0,
        };
        let node = &tree.arena[handle];
        assert_eq!(node.parent, parent);
        if let Some(left) = node.left {
            assert!(tree.arena[left].entry.key < node.entry.key);
        }
        if let Some(right) = node.right {
            assert!(tree.arena[right].entry.key > node.entry.key);
        }
        let left_height = validate_node(tree, node.left, Some(handle));
        let right_height = validate_node(tree, node.right, Some(handle));
        assert_eq!(i32::from(node.balance), right_height - left_height);
        assert!(node.balance.abs() <= 1);
        left_height.max(right_height) + 1
    }

    fn validate<T, U>(tree: &Tree<T, U>) -> i32
    where
        T: Ord,
    {
        validate_node(tree, tree.root, None)
    }

    fn keys<T, U>(tree: &Tree<T, U>) -> Vec<T>
    where
        T: Ord + Clone,
    {
        let mut result = Vec::new();
        let mut stack = Vec::new();
        let mut current = tree.root;
        loop {
            while let Some(handle) = current {
                stack.push(handle);
                current = tree.arena[handle].left;
            }
            match stack.pop() {
                None => return result,
                Some(handle) => {
                    result.push(tree.arena[handle].entry.key.clone());
                    current = tree.arena[handle].right;
                }
            }
        }
    }

    #[test]
    fn test_insert_ascending_single_rotation() {
        let mut tree = Tree::new();
        tree.insert(1, 1);
        tree.insert(2, 2);
        tree.insert(3, 3);

        let root = tree.root.unwrap();
        assert_eq!(tree.arena[root].entry.key, 2);
        assert_eq!(tree.arena[root].balance, 0);
        let left = tree.arena[root].left.unwrap();
        let right = tree.arena[root].right.unwrap();
        assert_eq!(tree.arena[left].entry.key, 1);
        assert_eq!(tree.arena[left].balance, 0);
        assert_eq!(tree.arena[right].entry.key, 3);
        assert_eq!(tree.arena[right].balance, 0);
        validate(&tree);
    }

    #[test]
    fn test_insert_descending_single_rotation() {
        let mut tree = Tree::new();
        tree.insert(3, 3);
        tree.insert(2, 2);
        tree.insert(1, 1);

        let root = tree.root.unwrap();
        assert_eq!(tree.arena[root].entry.key, 2);
        assert_eq!(keys(&tree), vec![1, 2, 3]);
        validate(&tree);
    }

    #[test]
    fn test_insert_zig_zag_double_rotation() {
        let mut tree = Tree::new();
        tree.insert(3, 3);
        tree.insert(1, 1);
        tree.insert(2, 2);

        let root = tree.root.unwrap();
        assert_eq!(tree.arena[root].entry.key, 2);
        assert_eq!(tree.arena[root].balance, 0);
        let left = tree.arena[root].left.unwrap();
        let right = tree.arena[root].right.unwrap();
        assert_eq!(tree.arena[left].entry.key, 1);
        assert_eq!(tree.arena[right].entry.key, 3);
        validate(&tree);
    }

    #[test]
    fn test_insert_mirrored_zig_zag_double_rotation() {
        let mut tree = Tree::new();
        tree.insert(1, 1);
        tree.insert(3, 3);
        tree.insert(2, 2);

        let root = tree.root.unwrap();
        assert_eq!(tree.arena[root].entry.key, 2);
        assert_eq!(keys(&tree), vec![1, 2, 3]);
        validate(&tree);
    }

    #[test]
    fn test_insert_balanced_parent_stops_walk() {
        let mut tree = Tree::new();
        tree.insert(2, 2);
        tree.insert(1, 1);
        tree.insert(3, 3);

        let root = tree.root.unwrap();
        assert_eq!(tree.arena[root].entry.key, 2);
        assert_eq!(tree.arena[root].balance, 0);
        validate(&tree);
    }

    #[test]
    fn test_insert_overwrite_keeps_shape() {
        let mut tree = Tree::new();
        tree.insert(1, 1);
        tree.insert(2, 2);
        tree.insert(3, 3);
        let replaced = tree.insert(2, 5);

        assert_eq!(replaced.map(|entry| entry.into_pair()), Some((2, 2)));
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.get(&2).map(|entry| entry.value), Some(5));
        validate(&tree);
    }

    #[test]
    fn test_remove_absent_key_is_noop() {
        let mut tree = Tree::new();
        tree.insert(1, 1);
        assert!(tree.remove(&2).is_none());
        assert_eq!(tree.len(), 1);
        validate(&tree);
    }

    #[test]
    fn test_remove_leaf() {
        let mut tree = Tree::new();
        tree.insert(2, 2);
        tree.insert(1, 1);
        tree.insert(3, 3);
        assert_eq!(tree.remove(&1).map(|entry| entry.into_pair()), Some((1, 1)));

        assert_eq!(keys(&tree), vec![2, 3]);
        validate(&tree);
    }

    #[test]
    fn test_remove_node_with_one_child() {
        let mut tree = Tree::new();
        tree.insert(2, 2);
        tree.insert(1, 1);
        tree.insert(3, 3);
        tree.insert(4, 4);
        assert_eq!(tree.remove(&3).map(|entry| entry.into_pair()), Some((3, 3)));

        assert_eq!(keys(&tree), vec![1, 2, 4]);
        validate(&tree);
    }

    #[test]
    fn test_remove_node_with_two_children_swaps_predecessor() {
        let mut tree = Tree::new();
        for key in &[4, 2, 6, 1, 3, 5, 7] {
            tree.insert(*key, *key);
        }
        assert_eq!(tree.remove(&4).map(|entry| entry.into_pair()), Some((4, 4)));

        // The predecessor of the old root moves into its position.
        let root = tree.root.unwrap();
        assert_eq!(tree.arena[root].entry.key, 3);
        assert_eq!(keys(&tree), vec![1, 2, 3, 5, 6, 7]);
        validate(&tree);
    }

    #[test]
    fn test_remove_root_with_single_child() {
        let mut tree = Tree::new();
        tree.insert(1, 1);
        tree.insert(2, 2);
        assert_eq!(tree.remove(&1).map(|entry| entry.into_pair()), Some((1, 1)));

        let root = tree.root.unwrap();
        assert_eq!(tree.arena[root].entry.key, 2);
        assert_eq!(tree.arena[root].parent, None);
        validate(&tree);
    }

    #[test]
    fn test_remove_last_node_empties_tree() {
        let mut tree = Tree::new();
        tree.insert(1, 1);
        tree.remove(&1);
        assert!(tree.is_empty());
        assert_eq!(tree.root, None);
    }

    #[test]
    fn test_remove_single_rotation_continues_walk() {
        // Removing 8 unbalances the root; the single rotation at the root shortens the
        // whole tree, which the recursive walk must observe without panicking.
        let mut tree = Tree::new();
        for key in &[4, 2, 8, 1, 3, 6, 9, 5] {
            tree.insert(*key, *key);
        }
        tree.remove(&9);
        assert_eq!(keys(&tree), vec![1, 2, 3, 4, 5, 6, 8]);
        validate(&tree);
    }

    #[test]
    fn test_remove_single_rotation_height_preserving_stops_walk() {
        // The taller child is perfectly balanced, so the rotation keeps the subtree height
        // and the rotated pair rests at (-1, +1).
        let mut tree = Tree::new();
        for key in &[4, 2, 5, 1, 3] {
            tree.insert(*key, *key);
        }
        tree.remove(&5);

        let root = tree.root.unwrap();
        assert_eq!(tree.arena[root].entry.key, 2);
        assert_eq!(tree.arena[root].balance, 1);
        let right = tree.arena[root].right.unwrap();
        assert_eq!(tree.arena[right].entry.key, 4);
        assert_eq!(tree.arena[right].balance, -1);
        validate(&tree);
    }

    #[test]
    fn test_remove_zig_zag_rotation() {
        let mut tree = Tree::new();
        for key in &[4, 2, 5, 3] {
            tree.insert(*key, *key);
        }
        tree.remove(&5);

        let root = tree.root.unwrap();
        assert_eq!(tree.arena[root].entry.key, 3);
        assert_eq!(keys(&tree), vec![2, 3, 4]);
        validate(&tree);
    }

    #[test]
    fn test_node_swap_adjacent_exchanges_slots_and_keeps_slot_balance() {
        let mut tree = Tree::new();
        tree.insert(2, 2);
        tree.insert(1, 1);
        let root = tree.root.unwrap();
        let child = tree.arena[root].left.unwrap();
        let root_balance = tree.arena[root].balance;
        let child_balance = tree.arena[child].balance;

        tree.node_swap(root, child);

        assert_eq!(tree.root, Some(child));
        assert_eq!(tree.arena[child].parent, None);
        assert_eq!(tree.arena[child].left, Some(root));
        assert_eq!(tree.arena[root].parent, Some(child));
        assert_eq!(tree.arena[root].left, None);
        assert_eq!(tree.arena[root].right, None);
        // Each slot keeps the balance it had before the swap.
        assert_eq!(tree.arena[child].balance, root_balance);
        assert_eq!(tree.arena[root].balance, child_balance);
    }

    #[test]
    fn test_node_swap_disjoint_exchanges_slots() {
        let mut tree = Tree::new();
        for key in &[4, 2, 6, 1, 3, 5, 7] {
            tree.insert(*key, *key);
        }
        let root = tree.root.unwrap();
        let left = tree.arena[root].left.unwrap();
        let leaf = tree.arena[left].left.unwrap();

        tree.node_swap(root, leaf);

        assert_eq!(tree.root, Some(leaf));
        assert_eq!(tree.arena[leaf].parent, None);
        assert_eq!(tree.arena[leaf].left, Some(left));
        assert_eq!(tree.arena[left].left, Some(root));
        assert_eq!(tree.arena[root].parent, Some(left));
        assert_eq!(tree.arena[root].left, None);
        assert_eq!(tree.arena[root].right, None);
    }

    #[test]
    fn test_random_operations_hold_invariants() {
        let mut rng: XorShiftRng = SeedableRng::from_seed([1, 2, 3, 4]);
        let mut tree = Tree::new();
        let mut expected: Vec<u32> = Vec::new();

        for _ in 0..2000 {
            let key = rng.gen_range(0, 500);
            if rng.gen::<bool>() {
                if tree.insert(key, key).is_none() {
                    expected.push(key);
                }
            } else {
                let removed = tree.remove(&key).is_some();
                let position = expected.iter().position(|&k| k == key);
                assert_eq!(removed, position.is_some());
                if let Some(position) = position {
                    expected.swap_remove(position);
                }
            }
            validate(&tree);
        }

        expected.sort();
        assert_eq!(keys(&tree), expected);
    }

    #[test]
    fn test_height_bound() {
        let mut rng: XorShiftRng = SeedableRng::from_seed([1, 1, 1, 1]);
        let mut tree = Tree::new();
        let mut count = 0u32;
        for _ in 0..4000 {
            if tree.insert(rng.gen::<u32>(), 0).is_none() {
                count += 1;
            }
        }

        let height = validate(&tree);
        let bound = 1.44 * f64::from(count + 2).log2();
        assert!(f64::from(height) <= bound);
    }
}
