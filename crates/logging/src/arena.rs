//! crates/logging/src/arena.rs
//! Singly-linked list stored in an index arena with a permanent head node.
//!
//! Nodes refer to their successor by slot index instead of by pointer. Slot 0
//! always holds the sentinel head, so the list is never empty and insertion is
//! always "after the head". Slots freed by removal are recycled.

const HEAD: usize = 0;

#[derive(Debug)]
struct Slot<T> {
    value: Option<T>,
    next: Option<usize>,
}

/// Arena-backed singly-linked list with a sentinel head.
#[derive(Debug)]
pub(crate) struct LinkedArena<T> {
    slots: Vec<Slot<T>>,
    free: Vec<usize>,
    len: usize,
}

impl<T> LinkedArena<T> {
    /// Creates a list holding only `head`.
    pub(crate) fn new(head: T) -> Self {
        Self {
            slots: vec![Slot {
                value: Some(head),
                next: None,
            }],
            free: Vec::new(),
            len: 1,
        }
    }

    /// Number of nodes, the head included.
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn head(&self) -> &T {
        self.value(HEAD)
    }

    /// Links `value` directly after the head in O(1).
    pub(crate) fn push_after_head(&mut self, value: T) {
        let next = self.slots[HEAD].next;
        let slot = Slot {
            value: Some(value),
            next,
        };
        let index = match self.free.pop() {
            Some(index) => {
                self.slots[index] = slot;
                index
            }
            None => {
                self.slots.push(slot);
                self.slots.len() - 1
            }
        };
        self.slots[HEAD].next = Some(index);
        self.len += 1;
    }

    /// Unlinks the first node after the head matching `pred`.
    ///
    /// The scan advances on every non-matching node and stops at the end of
    /// the list, returning `None` when nothing matched. The head is never a
    /// candidate.
    pub(crate) fn remove_first(&mut self, mut pred: impl FnMut(&T) -> bool) -> Option<T> {
        let mut prev = HEAD;
        let mut curr = self.slots[HEAD].next;

        while let Some(index) = curr {
            if pred(self.value(index)) {
                let slot = &mut self.slots[index];
                let next = slot.next.take();
                let value = slot.value.take();
                self.slots[prev].next = next;
                self.free.push(index);
                self.len -= 1;
                return value;
            }

            prev = index;
            curr = self.slots[index].next;
        }

        None
    }

    /// Iterates from the head to the last node.
    pub(crate) fn iter(&self) -> Iter<'_, T> {
        Iter {
            arena: self,
            next: Some(HEAD),
        }
    }

    fn value(&self, index: usize) -> &T {
        self.slots[index]
            .value
            .as_ref()
            .unwrap_or_else(|| unreachable!("linked slot {index} holds a value"))
    }
}

/// Iterator over a [`LinkedArena`] in link order.
pub(crate) struct Iter<'a, T> {
    arena: &'a LinkedArena<T>,
    next: Option<usize>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.next?;
        self.next = self.arena.slots[index].next;
        Some(self.arena.value(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(arena: &LinkedArena<&'static str>) -> Vec<&'static str> {
        arena.iter().copied().collect()
    }

    #[test]
    fn new_list_holds_only_the_head() {
        let arena = LinkedArena::new("head");
        assert_eq!(collect(&arena), ["head"]);
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn push_inserts_right_after_head() {
        let mut arena = LinkedArena::new("head");
        arena.push_after_head("a");
        arena.push_after_head("b");
        arena.push_after_head("c");
        assert_eq!(collect(&arena), ["head", "c", "b", "a"]);
        assert_eq!(arena.len(), 4);
    }

    #[test]
    fn remove_unlinks_middle_and_tail_nodes() {
        let mut arena = LinkedArena::new("head");
        for value in ["a", "b", "c"] {
            arena.push_after_head(value);
        }

        assert_eq!(arena.remove_first(|v| *v == "b"), Some("b"));
        assert_eq!(collect(&arena), ["head", "c", "a"]);

        assert_eq!(arena.remove_first(|v| *v == "a"), Some("a"));
        assert_eq!(collect(&arena), ["head", "c"]);
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn remove_of_missing_value_terminates() {
        let mut arena = LinkedArena::new("head");
        arena.push_after_head("a");
        arena.push_after_head("b");

        assert_eq!(arena.remove_first(|v| *v == "zzz"), None);
        assert_eq!(collect(&arena), ["head", "b", "a"]);
    }

    #[test]
    fn head_is_never_removed() {
        let mut arena = LinkedArena::new("head");
        assert_eq!(arena.remove_first(|v| *v == "head"), None);
        assert_eq!(collect(&arena), ["head"]);
    }

    #[test]
    fn freed_slots_are_reused() {
        let mut arena = LinkedArena::new("head");
        arena.push_after_head("a");
        arena.push_after_head("b");
        arena.remove_first(|v| *v == "a");
        arena.push_after_head("c");

        assert_eq!(arena.slots.len(), 3);
        assert_eq!(collect(&arena), ["head", "c", "b"]);
    }
}
