//! Arena-backed doubly linked list ordered by recency.
//!
//! Nodes live in a slot vector and link to each other by [`NodeId`], so the
//! list never holds raw pointers and node handles stay stable while the node
//! is resident. Freed slots are recycled through a free list.
//!
//! ## Architecture
//!
//! ```text
//!   slots: Vec<Option<Node<T>>>
//!   ┌────────┬─────────────────────────────────────────────┐
//!   │ NodeId │ Node { value, prev, next }                  │
//!   ├────────┼─────────────────────────────────────────────┤
//!   │ 0      │ { value: A, prev: None,    next: Some(1) }  │
//!   │ 1      │ { value: B, prev: Some(0), next: Some(2) }  │
//!   │ 2      │ { value: C, prev: Some(1), next: None }     │
//!   └────────┴─────────────────────────────────────────────┘
//!
//!   head (MRU) ─► [0] ◄──► [1] ◄──► [2] ◄── tail (LRU)
//! ```
//!
//! ## Operations
//! - `push_front(value)`: allocate a slot and link it at the head
//! - `move_to_front(id)`: detach + attach at the head
//! - `remove(id)`: detach + free the slot
//!
//! All of the above are O(1). Iteration is O(n).

/// Stable handle to a node in a [`RecencyList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug)]
struct Node<T> {
    value: T,
    prev: Option<NodeId>,
    next: Option<NodeId>,
}

/// Doubly linked list whose head is the most recently used node.
#[derive(Debug)]
pub struct RecencyList<T> {
    slots: Vec<Option<Node<T>>>,
    free: Vec<usize>,
    head: Option<NodeId>,
    tail: Option<NodeId>,
    len: usize,
}

impl<T> RecencyList<T> {
    /// Creates an empty list with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns the id of the least recently used node.
    pub fn back_id(&self) -> Option<NodeId> {
        self.tail
    }

    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.node(id).map(|node| &node.value)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.node_mut(id).map(|node| &mut node.value)
    }

    /// Links a new node at the front (MRU) and returns its id.
    pub fn push_front(&mut self, value: T) -> NodeId {
        let node = Node {
            value,
            prev: None,
            next: self.head,
        };
        let id = match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(node);
                NodeId(idx)
            },
            None => {
                self.slots.push(Some(node));
                NodeId(self.slots.len() - 1)
            },
        };

        match self.head.and_then(|head| self.node_mut(head)) {
            Some(old_head) => old_head.prev = Some(id),
            None => self.tail = Some(id),
        }
        self.head = Some(id);
        self.len += 1;
        id
    }

    /// Moves a resident node to the front; returns `false` if `id` is stale.
    pub fn move_to_front(&mut self, id: NodeId) -> bool {
        if self.node(id).is_none() {
            return false;
        }
        if self.head == Some(id) {
            return true;
        }
        self.unlink(id);
        self.link_front(id);
        true
    }

    /// Unlinks the node and frees its slot, returning the stored value.
    pub fn remove(&mut self, id: NodeId) -> Option<T> {
        self.node(id)?;
        self.unlink(id);
        let node = self.slots.get_mut(id.0)?.take()?;
        self.free.push(id.0);
        self.len -= 1;
        Some(node.value)
    }

    /// Iterates values from least to most recently used.
    pub fn iter_lru(&self) -> RecencyIter<'_, T> {
        RecencyIter {
            list: self,
            current: self.tail,
        }
    }

    fn node(&self, id: NodeId) -> Option<&Node<T>> {
        self.slots.get(id.0).and_then(|slot| slot.as_ref())
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node<T>> {
        self.slots.get_mut(id.0).and_then(|slot| slot.as_mut())
    }

    fn unlink(&mut self, id: NodeId) {
        let (prev, next) = match self.node(id) {
            Some(node) => (node.prev, node.next),
            None => return,
        };

        match prev.and_then(|p| self.node_mut(p)) {
            Some(prev_node) => prev_node.next = next,
            None => self.head = next,
        }
        match next.and_then(|n| self.node_mut(n)) {
            Some(next_node) => next_node.prev = prev,
            None => self.tail = prev,
        }

        if let Some(node) = self.node_mut(id) {
            node.prev = None;
            node.next = None;
        }
    }

    fn link_front(&mut self, id: NodeId) {
        let old_head = self.head;
        if let Some(node) = self.node_mut(id) {
            node.prev = None;
            node.next = old_head;
        }
        match old_head.and_then(|h| self.node_mut(h)) {
            Some(head_node) => head_node.prev = Some(id),
            None => self.tail = Some(id),
        }
        self.head = Some(id);
    }

    #[cfg(test)]
    pub fn debug_validate_invariants(&self) {
        if self.head.is_none() || self.tail.is_none() {
            assert!(self.head.is_none());
            assert!(self.tail.is_none());
            assert_eq!(self.len, 0);
            return;
        }

        let mut count = 0usize;
        let mut prev = None;
        let mut current = self.head;
        while let Some(id) = current {
            let node = self.node(id).expect("linked node missing from arena");
            assert_eq!(node.prev, prev, "broken back link at {:?}", id);
            if node.next.is_none() {
                assert_eq!(self.tail, Some(id));
            }
            prev = Some(id);
            current = node.next;
            count += 1;
            assert!(count <= self.len, "cycle detected in recency list");
        }

        assert_eq!(count, self.len);
        let occupied = self.slots.iter().filter(|slot| slot.is_some()).count();
        assert_eq!(occupied, self.len);
    }
}

/// Iterator from the LRU end towards the MRU end.
pub struct RecencyIter<'a, T> {
    list: &'a RecencyList<T>,
    current: Option<NodeId>,
}

impl<'a, T> Iterator for RecencyIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let node = self.list.node(id)?;
        self.current = node.prev;
        Some(&node.value)
    }
}
