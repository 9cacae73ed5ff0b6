//! Dynamic connectivity for acyclic graphs.
//!
//! The forest is a link-cut tree: every tree of the represented forest is decomposed
//! into paths, and every path is stored as an auxiliary splay tree whose in-order
//! traversal lists the nodes of the path from the shallowest to the deepest one.
//! The root of an auxiliary tree points to the node the path hangs off through its
//! `upper` link.
//!
//! Nodes live in an arena owned by [DynamicForest] and are addressed by [Handle]s.

/// A node of the forest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle(usize);

#[derive(Debug, Clone, Default)]
struct Node {
    /// Parent in the auxiliary tree
    parent: Option<usize>,
    /// Path-parent link, only set on the root of an auxiliary tree
    upper: Option<usize>,
    left: Option<usize>,
    right: Option<usize>,
    /// Pending reversal of the subtree rooted here
    reversed: bool,
}

#[derive(Debug, Clone, Default)]
pub struct DynamicForest {
    nodes: Vec<Node>,
}

impl DynamicForest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new node which is not connected to any other node.
    pub fn create(&mut self) -> Handle {
        self.nodes.push(Node::default());
        Handle(self.nodes.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn is_connected(&mut self, u: Handle, v: Handle) -> bool {
        if u == v {
            return true;
        }
        self.lift_to_root(u.0);
        self.extend_to_root(v.0);
        self.splay(v.0);
        // If connected, `u` and `v` are in the same auxiliary tree.
        self.find_min(v.0) == u.0
    }

    /// Whether there is an edge between `u` and `v`.
    pub fn is_directly_connected(&mut self, u: Handle, v: Handle) -> bool {
        self.lift_to_root(u.0);
        self.extend_to_root(v.0);
        self.splay(v.0);
        self.push_down(v.0);
        match self.nodes[v.0].left {
            Some(left) => self.find_max(left) == u.0,
            None => false,
        }
    }

    /// Add an edge between `u` and `v` unless they are already connected.
    pub fn connect(&mut self, u: Handle, v: Handle) {
        if u != v && !self.is_connected(u, v) {
            self.connect_unchecked(u, v);
        }
    }

    /// Remove the edge between `u` and `v`, if there is one.
    pub fn disconnect(&mut self, u: Handle, v: Handle) {
        if u != v && self.is_directly_connected(u, v) {
            self.disconnect_unchecked(u, v);
        }
    }

    /// The caller guarantees that `u` and `v` are not connected yet.
    fn connect_unchecked(&mut self, u: Handle, v: Handle) {
        self.lift_to_root(v.0);
        self.nodes[v.0].upper = Some(u.0);
    }

    /// The caller guarantees that `u` and `v` are directly connected.
    fn disconnect_unchecked(&mut self, u: Handle, v: Handle) {
        self.lift_to_root(u.0);
        self.extend_to_root(v.0);
        self.splay(v.0);
        self.push_down(v.0);
        // `v` is now the deepest node of its auxiliary tree, `u` is to its left.
        debug_assert!(self.nodes[v.0].left.is_some());
        if let Some(left) = self.nodes[v.0].left.take() {
            self.nodes[left].parent = None;
        }
    }

    // Auxiliary trees
    //
    //

    fn child(&self, x: usize, is_right: bool) -> Option<usize> {
        if is_right { self.nodes[x].right } else { self.nodes[x].left }
    }

    fn set_child(&mut self, x: usize, is_right: bool, target: Option<usize>) {
        if is_right {
            self.nodes[x].right = target;
        } else {
            self.nodes[x].left = target;
        }
    }

    fn is_right_child(&self, x: usize) -> bool {
        match self.nodes[x].parent {
            Some(p) => self.nodes[p].right == Some(x),
            None => false,
        }
    }

    fn push_down(&mut self, x: usize) {
        let node = &mut self.nodes[x];
        if !node.reversed {
            return;
        }
        std::mem::swap(&mut node.left, &mut node.right);
        node.reversed = false;
        let (left, right) = (node.left, node.right);
        for child in [left, right].into_iter().flatten() {
            self.nodes[child].reversed = !self.nodes[child].reversed;
        }
    }

    fn rotate(&mut self, x: usize) {
        let Some(p) = self.nodes[x].parent else {
            return;
        };

        // Pending reversals of all touched nodes must be applied first.
        if let Some(g) = self.nodes[p].parent {
            self.push_down(g);
        }
        self.push_down(p);
        self.push_down(x);

        // Only the root of an auxiliary tree may carry an `upper` link.
        let upper = self.nodes[p].upper;
        self.nodes[p].upper = self.nodes[x].upper;
        self.nodes[x].upper = upper;

        let is_right = self.is_right_child(x);

        let grandparent = self.nodes[p].parent;
        if let Some(g) = grandparent {
            let p_is_right = self.is_right_child(p);
            self.set_child(g, p_is_right, Some(x));
        }
        self.nodes[x].parent = grandparent;

        let inner = self.child(x, !is_right);
        self.set_child(p, is_right, inner);
        if let Some(inner) = inner {
            self.nodes[inner].parent = Some(p);
        }

        self.set_child(x, !is_right, Some(p));
        self.nodes[p].parent = Some(x);
    }

    /// Rotate `x` up to the root of its auxiliary tree.
    fn splay(&mut self, x: usize) {
        while let Some(p) = self.nodes[x].parent {
            match self.nodes[p].parent {
                None => self.rotate(x),
                Some(g) => {
                    self.push_down(g);
                    self.push_down(p);
                    if self.is_right_child(x) == self.is_right_child(p) {
                        self.rotate(p);
                        self.rotate(x);
                    } else {
                        self.rotate(x);
                        self.rotate(x);
                    }
                }
            }
        }
    }

    /// Cut off all nodes deeper than `x` from its auxiliary tree.
    /// Afterwards `x` is the root of its auxiliary tree.
    fn separate_deeper(&mut self, x: usize) {
        self.splay(x);
        self.push_down(x);
        if let Some(right) = self.nodes[x].right.take() {
            self.nodes[right].parent = None;
            self.nodes[right].upper = Some(x);
        }
    }

    /// Merge the auxiliary tree of `x` into the one above it, keeping `x` the deepest node.
    /// Returns `false` if there is no path above.
    fn extend_to_upper(&mut self, x: usize) -> bool {
        self.splay(x);
        let Some(upper) = self.nodes[x].upper else {
            return false;
        };
        self.separate_deeper(upper);
        self.nodes[upper].right = Some(x);
        self.nodes[x].parent = Some(upper);
        self.nodes[x].upper = None;
        true
    }

    /// Make the path from the root of the represented tree to `x` one auxiliary tree.
    fn extend_to_root(&mut self, x: usize) {
        self.separate_deeper(x);
        while self.extend_to_upper(x) {}
    }

    /// Make `x` the root of its represented tree by reversing the path to the old root.
    fn lift_to_root(&mut self, x: usize) {
        self.extend_to_root(x);
        self.splay(x);
        self.nodes[x].reversed = !self.nodes[x].reversed;
    }

    fn find_min(&mut self, x: usize) -> usize {
        self.find_extreme(x, false)
    }

    fn find_max(&mut self, x: usize) -> usize {
        self.find_extreme(x, true)
    }

    fn find_extreme(&mut self, mut x: usize, rightmost: bool) -> usize {
        self.push_down(x);
        while let Some(next) = self.child(x, rightmost) {
            x = next;
            self.push_down(x);
        }
        self.splay(x);
        x
    }
}
