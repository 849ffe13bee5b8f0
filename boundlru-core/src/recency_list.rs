//! Arena-backed doubly linked list ordering entries by recency.
//!
//! Nodes live in a `Vec` of slots and link to each other by index, so a
//! [`NodeId`] stays valid until its node is removed and every splice is O(1)
//! without raw pointers.
//!
//! ```text
//!   slots: Vec<Option<Node<K, V>>>
//!
//!   head (LRU) ─► [k1] ◄──► [k2] ◄──► [k3] ◄── tail (MRU)
//! ```
//!
//! Freed slots are recycled through a free list, which keeps the arena at
//! roughly the cache capacity once it is full.

/// Stable handle to a node in a [`RecencyList`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

#[derive(Debug)]
struct Node<K, V> {
    key: K,
    value: V,
    prev: Option<NodeId>,
    next: Option<NodeId>,
}

#[derive(Debug)]
pub(crate) struct RecencyList<K, V> {
    slots: Vec<Option<Node<K, V>>>,
    free: Vec<usize>,
    head: Option<NodeId>,
    tail: Option<NodeId>,
    len: usize,
}

impl<K, V> RecencyList<K, V> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[cfg(test)]
    pub(crate) fn key(&self, id: NodeId) -> Option<&K> {
        self.node(id).map(|node| &node.key)
    }

    /// Key of the least-recently-used entry.
    pub(crate) fn front_key(&self) -> Option<&K> {
        self.head.and_then(|id| self.node(id)).map(|node| &node.key)
    }

    pub(crate) fn value(&self, id: NodeId) -> Option<&V> {
        self.node(id).map(|node| &node.value)
    }

    /// Appends a new entry at the most-recently-used end.
    pub(crate) fn push_back(&mut self, key: K, value: V) -> NodeId {
        let node = Node {
            key,
            value,
            prev: self.tail,
            next: None,
        };
        let id = match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(node);
                NodeId(idx)
            }
            None => {
                self.slots.push(Some(node));
                NodeId(self.slots.len() - 1)
            }
        };

        match self.tail {
            Some(tail) => {
                if let Some(tail_node) = self.node_mut(tail) {
                    tail_node.next = Some(id);
                }
            }
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        self.len += 1;
        id
    }

    /// Removes and returns the least-recently-used entry.
    pub(crate) fn pop_front(&mut self) -> Option<(K, V)> {
        let id = self.head?;
        self.remove(id)
    }

    /// Removes the node `id` and returns its entry.
    pub(crate) fn remove(&mut self, id: NodeId) -> Option<(K, V)> {
        self.detach(id)?;
        let node = self.slots.get_mut(id.0)?.take()?;
        self.free.push(id.0);
        self.len -= 1;
        Some((node.key, node.value))
    }

    /// Moves an existing node to the most-recently-used end.
    ///
    /// Returns `false` if `id` does not refer to a live node.
    pub(crate) fn move_to_back(&mut self, id: NodeId) -> bool {
        if self.node(id).is_none() {
            return false;
        }
        if self.tail == Some(id) {
            return true;
        }
        self.detach(id);
        self.attach_back(id);
        true
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Iterates entries from least to most recently used.
    #[cfg(test)]
    pub(crate) fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            list: self,
            current: self.head,
        }
    }

    fn node(&self, id: NodeId) -> Option<&Node<K, V>> {
        self.slots.get(id.0).and_then(|slot| slot.as_ref())
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node<K, V>> {
        self.slots.get_mut(id.0).and_then(|slot| slot.as_mut())
    }

    fn detach(&mut self, id: NodeId) -> Option<()> {
        let (prev, next) = {
            let node = self.node(id)?;
            (node.prev, node.next)
        };

        match prev {
            Some(prev_id) => {
                if let Some(prev_node) = self.node_mut(prev_id) {
                    prev_node.next = next;
                }
            }
            None => self.head = next,
        }

        match next {
            Some(next_id) => {
                if let Some(next_node) = self.node_mut(next_id) {
                    next_node.prev = prev;
                }
            }
            None => self.tail = prev,
        }

        let node = self.node_mut(id)?;
        node.prev = None;
        node.next = None;
        Some(())
    }

    fn attach_back(&mut self, id: NodeId) {
        let old_tail = self.tail;
        if let Some(node) = self.node_mut(id) {
            node.prev = old_tail;
            node.next = None;
        } else {
            return;
        }
        match old_tail {
            Some(tail) => {
                if let Some(tail_node) = self.node_mut(tail) {
                    tail_node.next = Some(id);
                }
            }
            None => self.head = Some(id),
        }
        self.tail = Some(id);
    }

    /// Panics if the links, the head/tail pointers or the length disagree.
    #[cfg(test)]
    pub(crate) fn validate_invariants(&self) {
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
            assert_eq!(node.prev, prev, "broken back link");
            prev = Some(id);
            current = node.next;
            count += 1;
            assert!(count <= self.len, "cycle in recency list");
        }
        assert_eq!(prev, self.tail, "tail does not end the chain");
        assert_eq!(count, self.len);

        let live = self.slots.iter().filter(|slot| slot.is_some()).count();
        assert_eq!(live, self.len);
        assert_eq!(live + self.free.len(), self.slots.len());
    }
}

#[cfg(test)]
pub(crate) struct Iter<'a, K, V> {
    list: &'a RecencyList<K, V>,
    current: Option<NodeId>,
}

#[cfg(test)]
impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let node = self.list.node(id)?;
        self.current = node.next;
        Some((&node.key, &node.value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(list: &RecencyList<&'static str, i32>) -> Vec<&'static str> {
        list.iter().map(|(k, _)| *k).collect()
    }

    #[test]
    fn test_push_back_orders_oldest_first() {
        let mut list = RecencyList::with_capacity(4);
        list.push_back("a", 1);
        list.push_back("b", 2);
        list.push_back("c", 3);

        assert_eq!(keys(&list), vec!["a", "b", "c"]);
        assert_eq!(list.len(), 3);
        list.validate_invariants();
    }

    #[test]
    fn test_pop_front_returns_oldest() {
        let mut list = RecencyList::with_capacity(2);
        list.push_back("a", 1);
        list.push_back("b", 2);

        assert_eq!(list.front_key(), Some(&"a"));
        assert_eq!(list.pop_front(), Some(("a", 1)));
        assert_eq!(list.front_key(), Some(&"b"));
        assert_eq!(list.pop_front(), Some(("b", 2)));
        assert_eq!(list.pop_front(), None);
        assert_eq!(list.front_key(), None);
        list.validate_invariants();
    }

    #[test]
    fn test_move_to_back_from_each_position() {
        let mut list = RecencyList::with_capacity(3);
        let a = list.push_back("a", 1);
        let b = list.push_back("b", 2);
        let c = list.push_back("c", 3);

        // Head
        assert!(list.move_to_back(a));
        assert_eq!(keys(&list), vec!["b", "c", "a"]);

        // Middle
        assert!(list.move_to_back(c));
        assert_eq!(keys(&list), vec!["b", "a", "c"]);

        // Already at tail
        assert!(list.move_to_back(c));
        assert_eq!(keys(&list), vec!["b", "a", "c"]);

        assert_eq!(list.key(b), Some(&"b"));
        list.validate_invariants();
    }

    #[test]
    fn test_remove_middle_and_reuse_slot() {
        let mut list = RecencyList::with_capacity(3);
        list.push_back("a", 1);
        let b = list.push_back("b", 2);
        list.push_back("c", 3);

        assert_eq!(list.remove(b), Some(("b", 2)));
        assert_eq!(keys(&list), vec!["a", "c"]);
        assert_eq!(list.value(b), None);
        assert!(!list.move_to_back(b));

        let d = list.push_back("d", 4);
        assert_eq!(d, b, "freed slot should be recycled");
        assert_eq!(keys(&list), vec!["a", "c", "d"]);
        list.validate_invariants();
    }

    #[test]
    fn test_single_node_list() {
        let mut list = RecencyList::with_capacity(1);
        let a = list.push_back("a", 1);
        assert!(list.move_to_back(a));
        assert_eq!(list.remove(a), Some(("a", 1)));
        assert_eq!(list.len(), 0);
        list.validate_invariants();
    }

    #[test]
    fn test_clear() {
        let mut list = RecencyList::with_capacity(2);
        list.push_back("a", 1);
        list.push_back("b", 2);
        list.clear();

        assert_eq!(list.len(), 0);
        assert_eq!(list.iter().count(), 0);
        list.validate_invariants();
    }
}
