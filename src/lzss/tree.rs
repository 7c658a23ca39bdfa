//! Binary search trees over window positions for longest-match search.
//!
//! Every live window slot is a node. Strings are partitioned by their first
//! byte into 256 trees; tree `b` hangs off virtual node `N + b` as its right
//! child. Within a tree, the left subtree of a node holds strings that compare
//! smaller than the node's string, the right subtree larger.
//!
//! Inserting a slot walks the tree the new string belongs to and reports the
//! longest match seen along the way. The in-order neighbours of the new string
//! always lie on that path, so the walk finds the longest match in the window
//! in O(depth) comparisons.

use super::tokens::Match;
use super::window::Window;
use super::{F, N};
use crate::error::{Error, Result};
use std::cmp::Ordering;

/// Number of virtual root nodes, one per leading byte value
const ROOTS: usize = 256;

/// Sentinel for "no node"
pub const NIL: usize = N + ROOTS;

/// Parent/child links for every window slot plus the 256 virtual roots
pub struct MatchIndex {
    parent: Vec<usize>,
    left: Vec<usize>,
    right: Vec<usize>,
}

impl MatchIndex {
    /// Allocate an empty index, reporting allocation failure instead of aborting
    pub fn try_new() -> Result<Self> {
        Ok(Self { parent: nil_links()?, left: nil_links()?, right: nil_links()? })
    }

    /// Whether slot `slot` currently holds a node
    #[inline]
    pub fn is_live(&self, slot: usize) -> bool {
        self.parent[slot] != NIL
    }

    /// Root of the tree for strings starting with `byte`
    #[inline]
    pub fn root(&self, byte: u8) -> usize {
        self.right[N + byte as usize]
    }

    /// Insert the string at slot `i` (of which `run` bytes are real) and
    /// return the longest match found against the strings already indexed.
    ///
    /// Slot `i` must not be live. If an existing node turns out to be equal to
    /// the new string over all `run` bytes, the new node takes its place and
    /// children, and the old node leaves the index.
    pub fn insert(&mut self, window: &Window, i: usize, run: usize) -> Match {
        debug_assert!(i < N && !self.is_live(i));
        debug_assert!((1..=F).contains(&run));

        let mut best = Match::NONE;
        // Known-equal prefix lengths against the last left and right turns
        let mut k = 1;
        let mut l = 1;

        self.left[i] = NIL;
        self.right[i] = NIL;

        let mut p = N + window.get(i) as usize;
        let mut attach_left = false;
        let mut j = self.right[p];

        while j != NIL {
            let (n, ord) = window.compare(i, j, k.min(l), run);
            if n >= best.length {
                best = Match { position: j, length: n };
            }

            match ord {
                Ordering::Less => {
                    k = n;
                    p = j;
                    attach_left = true;
                    j = self.left[j];
                }
                Ordering::Greater => {
                    l = n;
                    p = j;
                    attach_left = false;
                    j = self.right[j];
                }
                Ordering::Equal => {
                    self.replace_node(j, i);
                    return best;
                }
            }
        }

        self.parent[i] = p;
        if attach_left {
            self.left[p] = i;
        } else {
            self.right[p] = i;
        }
        best
    }

    /// Remove slot `z` from the index; a no-op if it holds no node
    pub fn delete(&mut self, z: usize) {
        if !self.is_live(z) {
            return;
        }

        let q = if self.right[z] == NIL {
            self.left[z]
        } else if self.left[z] == NIL {
            self.right[z]
        } else {
            // Two children: promote the in-order predecessor
            let mut q = self.left[z];
            if self.right[q] != NIL {
                while self.right[q] != NIL {
                    q = self.right[q];
                }
                let q_parent = self.parent[q];
                let q_left = self.left[q];
                self.right[q_parent] = q_left;
                self.set_parent(q_left, q_parent);

                let z_left = self.left[z];
                self.left[q] = z_left;
                self.parent[z_left] = q;
            }
            let z_right = self.right[z];
            self.right[q] = z_right;
            self.parent[z_right] = q;
            q
        };

        let z_parent = self.parent[z];
        self.set_parent(q, z_parent);
        self.replace_child(z_parent, z, q);
        self.parent[z] = NIL;
    }

    /// Number of live nodes
    pub fn len(&self) -> usize {
        self.parent[..N].iter().filter(|&&p| p != NIL).count()
    }

    /// Check if no slot is indexed
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Depth of the deepest node across all 256 trees (0 when empty)
    pub fn max_depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = Vec::new();
        for byte in 0..=u8::MAX {
            let root = self.root(byte);
            if root != NIL {
                stack.push((root, 1));
            }
            while let Some((node, depth)) = stack.pop() {
                deepest = deepest.max(depth);
                if depth > N {
                    // Cycle; check_consistency reports the details
                    return depth;
                }
                for child in [self.left[node], self.right[node]] {
                    if child != NIL {
                        stack.push((child, depth + 1));
                    }
                }
            }
        }
        deepest
    }

    /// Walk every tree and verify the structural invariants:
    ///
    /// - virtual roots have no left child, and every link has a matching
    ///   parent back-link
    /// - each node sits in the tree of its own first byte
    /// - in-order traversal is non-decreasing over the first `limit` bytes
    /// - every live slot is reachable exactly once
    ///
    /// Ordering only holds over as many bytes as the shortest `run` any live
    /// node was inserted with, so `limit` must not exceed it. A session that
    /// drained its input at end of stream inserted runs down to 1.
    pub fn check_consistency(&self, window: &Window, limit: usize) -> Result<()> {
        let limit = limit.min(F);
        let mut seen = vec![false; N];
        let mut reached = 0;

        for byte in 0..=u8::MAX {
            let root_node = N + byte as usize;
            if self.left[root_node] != NIL {
                return Err(corrupt(root_node, "virtual root has a left child"));
            }

            let mut previous: Option<usize> = None;
            let mut stack = Vec::new();
            let mut node = self.root(byte);
            let mut parent = root_node;

            // Iterative in-order walk, validating parent links on the way down
            loop {
                while node != NIL {
                    if node >= N {
                        return Err(corrupt(node, "link points outside the window"));
                    }
                    if seen[node] {
                        return Err(corrupt(node, "node reachable twice"));
                    }
                    seen[node] = true;
                    if self.parent[node] != parent {
                        return Err(corrupt(node, "parent link does not match"));
                    }
                    if window.get(node) != byte {
                        return Err(corrupt(node, "node is in the wrong tree"));
                    }
                    stack.push(node);
                    parent = node;
                    node = self.left[node];
                }

                let Some(current) = stack.pop() else { break };
                reached += 1;

                if let Some(prev) = previous {
                    let (_, ord) = window.compare(prev, current, 0, limit);
                    if ord == Ordering::Greater {
                        return Err(corrupt(current, "in-order successor compares smaller"));
                    }
                }
                previous = Some(current);

                parent = current;
                node = self.right[current];
            }
        }

        let live = self.len();
        if reached != live {
            return Err(Error::CorruptIndex {
                slot: N,
                reason: format!("{} live slots but {} reachable", live, reached),
            });
        }
        Ok(())
    }

    /// Put `new` exactly where `old` is, inheriting its children, and drop `old`
    fn replace_node(&mut self, old: usize, new: usize) {
        let (left, right, parent) = (self.left[old], self.right[old], self.parent[old]);

        self.left[new] = left;
        self.right[new] = right;
        self.set_parent(left, new);
        self.set_parent(right, new);

        self.parent[new] = parent;
        self.replace_child(parent, old, new);
        self.parent[old] = NIL;
    }

    #[inline]
    fn set_parent(&mut self, child: usize, parent: usize) {
        if child != NIL {
            self.parent[child] = parent;
        }
    }

    /// Repoint whichever link of `parent` refers to `old`
    #[inline]
    fn replace_child(&mut self, parent: usize, old: usize, new: usize) {
        if self.right[parent] == old {
            self.right[parent] = new;
        } else {
            self.left[parent] = new;
        }
    }
}

fn nil_links() -> Result<Vec<usize>> {
    let size = N + ROOTS;
    let mut links = Vec::new();
    links
        .try_reserve_exact(size)
        .map_err(|_| Error::Allocation { requested: size * std::mem::size_of::<usize>() })?;
    links.resize(size, NIL);
    Ok(links)
}

fn corrupt(slot: usize, reason: &str) -> Error {
    Error::CorruptIndex { slot, reason: reason.to_string() }
}
