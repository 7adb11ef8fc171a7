//! Merge forest for label equivalences
//!
//! Labels are handed out densely from 0 during the labeling pass. Every
//! time two labels turn out to touch they are unioned; the root of a set is
//! always its smallest (earliest discovered) label.

/// Disjoint-set forest over dense labels
#[derive(Debug, Clone, Default)]
pub struct MergeForest {
    parent: Vec<u32>,
}

impl MergeForest {
    /// Create an empty forest
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of labels handed out so far
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// True if no label has been created
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Create a new singleton label and return it.
    #[inline]
    pub fn make_set(&mut self) -> u32 {
        let label = self.parent.len() as u32;
        self.parent.push(label);
        label
    }

    /// Current parent of `label`.
    pub fn parent(&self, label: u32) -> u32 {
        self.parent[label as usize]
    }

    /// Find the root of `label`, compressing the path on the way.
    pub fn find(&mut self, label: u32) -> u32 {
        let mut root = label;
        while self.parent[root as usize] != root {
            root = self.parent[root as usize];
        }

        let mut current = label;
        while current != root {
            let next = self.parent[current as usize];
            self.parent[current as usize] = root;
            current = next;
        }

        root
    }

    /// Merge the sets of `a` and `b`. The smaller root wins.
    ///
    /// Returns `true` if two different sets were joined.
    pub fn union(&mut self, a: u32, b: u32) -> bool {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            return false;
        }
        let (smaller, larger) = if root_a < root_b {
            (root_a, root_b)
        } else {
            (root_b, root_a)
        };
        self.parent[larger as usize] = smaller;
        true
    }

    /// Point every label directly at its root.
    ///
    /// Afterwards `parent(i) == parent(parent(i))` for every label.
    pub fn resolve(&mut self) {
        // parents always have smaller indices, so one ascending pass suffices
        for i in 0..self.parent.len() {
            let p = self.parent[i] as usize;
            self.parent[i] = self.parent[p];
        }
    }

    /// Check the idempotent-root invariant.
    pub fn is_resolved(&self) -> bool {
        self.parent
            .iter()
            .all(|&p| self.parent[p as usize] == p)
    }

    /// Distinct roots in ascending order.
    pub fn roots(&self) -> Vec<u32> {
        (0..self.parent.len() as u32)
            .filter(|&i| self.parent[i as usize] == i)
            .collect()
    }
}
