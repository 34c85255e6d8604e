//! A fixed-capacity binary min-heap over `(node, priority)` pairs.
//!
//! Nodes and priorities live in two parallel arrays. There is no
//! decrease-key: a search that finds a cheaper route to a node pushes a new
//! entry and ignores the old one when it is eventually popped.

/// Array-backed min-heap keyed by `i64` priority.
#[derive(Debug, Clone)]
pub struct ArrayHeap {
    nodes: Vec<usize>,
    priorities: Vec<i64>,
    capacity: usize,
}

impl ArrayHeap {
    /// Create an empty heap that accepts at most `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            priorities: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Heap sized for a search over `cells` cells with 4-connectivity.
    ///
    /// Each expansion pushes at most four entries and each cell is expanded
    /// at most once, so `4 * cells + 1` insertions can never be exceeded.
    pub fn for_cells(cells: usize) -> Self {
        Self::with_capacity(4 * cells + 1)
    }

    /// Number of entries, stale ones included.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the heap holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Maximum number of entries.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop every entry, keeping the allocation.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.priorities.clear();
    }

    /// Insert an entry. Returns `false`, leaving the heap unchanged, when
    /// the heap is full.
    pub fn push(&mut self, node: usize, priority: i64) -> bool {
        if self.nodes.len() >= self.capacity {
            return false;
        }
        self.nodes.push(node);
        self.priorities.push(priority);
        self.sift_up(self.nodes.len() - 1);
        true
    }

    /// Remove and return the entry with the smallest priority.
    pub fn pop_min(&mut self) -> Option<(usize, i64)> {
        if self.nodes.is_empty() {
            return None;
        }
        let top = (self.nodes[0], self.priorities[0]);
        let last = self.nodes.len() - 1;
        self.nodes.swap(0, last);
        self.priorities.swap(0, last);
        self.nodes.pop();
        self.priorities.pop();
        if !self.nodes.is_empty() {
            self.sift_down(0);
        }
        Some(top)
    }

    /// Smallest entry without removing it.
    pub fn peek(&self) -> Option<(usize, i64)> {
        Some((*self.nodes.first()?, self.priorities[0]))
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if self.priorities[parent] <= self.priorities[i] {
                break;
            }
            self.swap(i, parent);
            i = parent;
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let n = self.nodes.len();
        loop {
            let left = 2 * i + 1;
            if left >= n {
                break;
            }
            let right = left + 1;
            let child = if right < n && self.priorities[right] < self.priorities[left] {
                right
            } else {
                left
            };
            if self.priorities[i] <= self.priorities[child] {
                break;
            }
            self.swap(i, child);
            i = child;
        }
    }

    #[inline]
    fn swap(&mut self, a: usize, b: usize) {
        self.nodes.swap(a, b);
        self.priorities.swap(a, b);
    }
}
