use core::marker::PhantomData;

use log::trace;

cfg_if::cfg_if! {
    if #[cfg(feature = "no-std")] {
        use alloc::boxed::Box;
    } else {
        use std::boxed::Box;
    }
}

pub type SinglyLinkedListResult<T> = Result<T, SinglyLinkedListError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinglyLinkedListError {
    /// the index does not name a valid position for the attempted operation
    IndexOutOfBounds { index: usize, len: usize },
}

impl core::fmt::Display for SinglyLinkedListError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "index {index} is out of bounds for list of length {len}")
            }
        }
    }
}

#[cfg(not(feature = "no-std"))]
impl std::error::Error for SinglyLinkedListError {}

/// an owning, singly-linked list that tracks both ends so appends are O(1).
///
/// nodes live on the heap and are linked through raw pointers. the list owns
/// every node reachable from `head` and frees them on removal or drop.
pub struct SinglyLinkedList<T> {
    /// the first node of the chain, null iff the list is empty
    head: *mut SinglyLinkedListNode<T>,
    /// the last node of the chain, null iff the list is empty. aliases `head`
    /// when the list holds a single node
    tail: *mut SinglyLinkedListNode<T>,
    /// the number of nodes reachable from `head`
    len: usize,
    _owns: PhantomData<Box<SinglyLinkedListNode<T>>>,
}

impl<T> SinglyLinkedList<T> {
    /// create a new, empty list
    pub const fn new() -> Self {
        Self {
            head: core::ptr::null_mut(),
            tail: core::ptr::null_mut(),
            len: 0,
            _owns: PhantomData,
        }
    }

    /// get the number of nodes in the list
    pub fn len(&self) -> usize {
        self.len
    }

    /// returns true if the length of the list is 0
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// get the first node of the list, or None if the list is empty
    pub fn head(&self) -> Option<&SinglyLinkedListNode<T>> {
        // SAFETY: `head` is either null or a node owned by this list
        unsafe { self.head.as_ref() }
    }

    /// get the last node of the list, or None if the list is empty
    pub fn tail(&self) -> Option<&SinglyLinkedListNode<T>> {
        // SAFETY: `tail` is either null or a node owned by this list
        unsafe { self.tail.as_ref() }
    }

    /// append a value to the end of the list
    pub fn push(&mut self, data: T) {
        let n = SinglyLinkedListNode::alloc(data);

        if self.is_empty() {
            self.head = n;
        } else {
            // SAFETY: a non-empty list always has a valid tail
            unsafe { (*self.tail).set_next(n) };
        }

        self.tail = n;
        self.len += 1;
    }

    /// remove the value at the end of the list. without a backward link this
    /// walks from the head to find the new tail. if the list is empty, None is
    /// returned and nothing changes.
    pub fn pop(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }

        let to_return = self.tail;
        if self.len == 1 {
            self.head = core::ptr::null_mut();
            self.tail = core::ptr::null_mut();
        } else {
            let new_tail = self.node_at(self.len - 2);
            // SAFETY: `len - 2` is in bounds so `new_tail` is a valid node
            unsafe { (*new_tail).set_next(core::ptr::null_mut()) };
            self.tail = new_tail;
        }
        self.len -= 1;

        // SAFETY: `to_return` was the tail and is no longer reachable
        Some(unsafe { SinglyLinkedListNode::into_data(to_return) })
    }

    /// remove the value at the front of the list. if the list is empty, None
    /// is returned and nothing changes.
    pub fn shift(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }

        let to_return = self.head;
        // SAFETY: a non-empty list always has a valid head
        self.head = unsafe { (*to_return).next() };
        if self.head.is_null() {
            self.tail = core::ptr::null_mut();
        }
        self.len -= 1;

        // SAFETY: `to_return` was the head and is no longer reachable
        Some(unsafe { SinglyLinkedListNode::into_data(to_return) })
    }

    /// prepend a value to the front of the list, returning the list so calls
    /// can be chained
    pub fn unshift(&mut self, data: T) -> &mut Self {
        let n = SinglyLinkedListNode::alloc(data);

        if self.is_empty() {
            self.tail = n;
        } else {
            // SAFETY: `n` was just allocated and is not shared
            unsafe { (*n).set_next(self.head) };
        }

        self.head = n;
        self.len += 1;
        self
    }

    /// get the node at `index`, or None if `index` is out of bounds
    pub fn get(&self, index: usize) -> Option<&SinglyLinkedListNode<T>> {
        if index >= self.len {
            return None;
        }
        // SAFETY: we validated `index` is in bounds
        Some(unsafe { &*self.node_at(index) })
    }

    /// mutably borrow the data at `index`, or None if `index` is out of
    /// bounds. only the data is reachable, never the node or its link
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index >= self.len {
            return None;
        }
        // SAFETY: we validated `index` is in bounds and hold `self` mutably
        let node = unsafe { &mut *self.node_at(index) };
        Some(node.data_mut())
    }

    /// overwrite the value at `index`, returning true on success. an out of
    /// bounds index leaves the list untouched and returns false.
    pub fn set(&mut self, index: usize, data: T) -> bool {
        self.try_set(index, data).is_ok()
    }

    /// overwrite the value at `index`, returning the value it replaced
    pub fn try_set(&mut self, index: usize, data: T) -> SinglyLinkedListResult<T> {
        let len = self.len;
        match self.get_mut(index) {
            Some(slot) => Ok(core::mem::replace(slot, data)),
            None => Err(SinglyLinkedListError::IndexOutOfBounds { index, len }),
        }
    }

    /// insert a value so that it ends up at `index`, returning true on
    /// success. `index == len` appends; anything past that returns false and
    /// leaves the list untouched.
    pub fn insert(&mut self, index: usize, data: T) -> bool {
        self.try_insert(index, data).is_ok()
    }

    /// insert a value so that it ends up at `index`
    pub fn try_insert(&mut self, index: usize, data: T) -> SinglyLinkedListResult<()> {
        if index > self.len {
            return Err(SinglyLinkedListError::IndexOutOfBounds {
                index,
                len: self.len,
            });
        }

        if index == 0 {
            self.unshift(data);
        } else if index == self.len {
            self.push(data);
        } else {
            // Before: (prev) -> (prev.next)
            // After: (prev) -> (n) -> (prev.next)
            let prev = self.node_at(index - 1);
            let n = SinglyLinkedListNode::alloc(data);
            // SAFETY: `index - 1` is in bounds and `n` was just allocated
            unsafe {
                (*n).set_next((*prev).next());
                (*prev).set_next(n);
            }
            self.len += 1;
            trace!("spliced node in at index {index}, len is now {}", self.len);
        }

        Ok(())
    }

    /// remove the value at `index`, or None if `index` is out of bounds
    pub fn remove(&mut self, index: usize) -> Option<T> {
        self.try_remove(index).ok()
    }

    /// remove the value at `index`
    pub fn try_remove(&mut self, index: usize) -> SinglyLinkedListResult<T> {
        let out_of_bounds = SinglyLinkedListError::IndexOutOfBounds {
            index,
            len: self.len,
        };

        if index >= self.len {
            return Err(out_of_bounds);
        }

        // the bounds check above guarantees a node at either end, so the
        // `ok_or` arms below never produce an error
        if index == 0 {
            self.shift().ok_or(out_of_bounds)
        } else if index == self.len - 1 {
            self.pop().ok_or(out_of_bounds)
        } else {
            // Before: (prev) -> (to_return) -> (to_return.next)
            // After: (prev) -> (to_return.next)
            let prev = self.node_at(index - 1);
            // SAFETY: `index` is strictly inside the chain so both `prev` and
            // its successor are valid nodes
            let to_return = unsafe {
                let to_return = (*prev).next();
                (*prev).set_next((*to_return).next());
                to_return
            };
            self.len -= 1;
            trace!("spliced node out at index {index}, len is now {}", self.len);

            // SAFETY: `to_return` is no longer reachable from the list
            Ok(unsafe { SinglyLinkedListNode::into_data(to_return) })
        }
    }

    /// reverse the list in place. head and tail trade places up front, then a
    /// single pass starting at the old head flips every link.
    pub fn reverse(&mut self) {
        let mut curr = self.head;
        let mut prev: *mut SinglyLinkedListNode<T> = core::ptr::null_mut();

        core::mem::swap(&mut self.head, &mut self.tail);

        for _ in 0..self.len {
            // SAFETY: the chain from the old head holds exactly `len` nodes
            unsafe {
                let next = (*curr).next();
                (*curr).set_next(prev);
                prev = curr;
                curr = next;
            }
        }

        trace!("reversed list of length {}", self.len);
    }

    /// walk `index` links from the head. callers must ensure `index < len`
    fn node_at(&self, index: usize) -> *mut SinglyLinkedListNode<T> {
        debug_assert!(index < self.len);

        let mut curr = self.head;
        for _ in 0..index {
            // SAFETY: fewer than `len` hops from the head stay on the chain
            curr = unsafe { (*curr).next() };
        }
        curr
    }

    /// walk the chain by following links until one is null
    pub(crate) fn nodes(&self) -> Nodes<'_, T> {
        Nodes {
            _ll: self,
            curr: self.head,
        }
    }
}

impl<T> Default for SinglyLinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for SinglyLinkedList<T> {
    fn drop(&mut self) {
        while self.shift().is_some() {}
    }
}

// SAFETY: the list exclusively owns its nodes, so moving it between threads
// moves every `T` along with it
unsafe impl<T: Send> Send for SinglyLinkedList<T> {}

impl<T: core::fmt::Debug> core::fmt::Debug for SinglyLinkedList<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list()
            .entries(self.nodes().map(SinglyLinkedListNode::data))
            .finish()
    }
}

impl<T> FromIterator<T> for SinglyLinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut ll = Self::new();
        for data in iter {
            ll.push(data);
        }
        ll
    }
}

/// a node in the list. the successor link is private so borrowed nodes can
/// only read or replace their data
pub struct SinglyLinkedListNode<T> {
    data: T,
    next: *mut SinglyLinkedListNode<T>,
}

impl<T> SinglyLinkedListNode<T> {
    /// move `data` into a fresh heap node that has no successor
    fn alloc(data: T) -> *mut Self {
        Box::into_raw(Box::new(Self {
            data,
            next: core::ptr::null_mut(),
        }))
    }

    /// free the node and hand back its data
    /// # Safety
    /// `node` must have come from `alloc` and must not be reachable from any
    /// list
    unsafe fn into_data(node: *mut Self) -> T {
        let node = *Box::from_raw(node);
        node.data
    }

    /// immutably borrow the data of the node
    pub fn data(&self) -> &T {
        &self.data
    }

    fn data_mut(&mut self) -> &mut T {
        &mut self.data
    }

    /// peek at the data of the successor, or None if this is the last node
    pub fn peek_next_data(&self) -> Option<&T> {
        // SAFETY: `next` is either null or a node owned by the same list
        unsafe { self.next.as_ref() }.map(|n| &n.data)
    }

    fn next(&self) -> *mut Self {
        self.next
    }

    fn set_next(&mut self, new_next: *mut Self) {
        self.next = new_next;
    }
}

impl<T: core::fmt::Debug> core::fmt::Debug for SinglyLinkedListNode<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Node")
            .field("self", &core::ptr::addr_of!(*self))
            .field("data", &self.data)
            .finish()
    }
}

pub(crate) struct Nodes<'a, T> {
    _ll: &'a SinglyLinkedList<T>,
    curr: *mut SinglyLinkedListNode<T>,
}

impl<'a, T> Iterator for Nodes<'a, T> {
    type Item = &'a SinglyLinkedListNode<T>;

    fn next(&mut self) -> Option<Self::Item> {
        // SAFETY: `curr` is either null or a node owned by the borrowed list
        let to_return = unsafe { self.curr.as_ref() }?;
        self.curr = to_return.next();
        Some(to_return)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn values<T: Copy>(ll: &SinglyLinkedList<T>) -> Vec<T> {
        ll.nodes().map(|n| *n.data()).collect()
    }

    #[test]
    fn singly_linked_lists_are_sendable() {
        fn send<S: Send>(_: S) {}
        send(SinglyLinkedList::<u32>::new());
    }

    #[test]
    fn head_and_tail_on_empty_list_return_none() {
        let ll = SinglyLinkedList::<u32>::new();
        assert!(ll.head().is_none());
        assert!(ll.tail().is_none());
        assert!(ll.is_empty());
    }

    #[test]
    fn pop_on_empty_list_returns_none() {
        let mut ll = SinglyLinkedList::<u32>::new();
        assert_eq!(ll.pop(), None);
        assert_eq!(ll.len(), 0);
        assert!(ll.head().is_none());
        assert!(ll.tail().is_none());
    }

    #[test]
    fn shift_on_empty_list_returns_none() {
        let mut ll = SinglyLinkedList::<u32>::new();
        assert_eq!(ll.shift(), None);
        assert_eq!(ll.len(), 0);
        assert!(ll.head().is_none());
        assert!(ll.tail().is_none());
    }

    #[test]
    fn push_appends_in_order() {
        let mut ll = SinglyLinkedList::new();
        for i in 1..=5 {
            ll.push(i);
            assert_eq!(ll.len(), i as usize);
            assert_eq!(ll.tail().map(|n| *n.data()), Some(i));
        }
        assert_eq!(values(&ll), vec![1, 2, 3, 4, 5]);
        assert_eq!(ll.head().map(|n| *n.data()), Some(1));
        assert_eq!(ll.tail().and_then(|n| n.peek_next_data()), None);
    }

    #[test]
    fn single_node_is_both_head_and_tail() {
        let mut ll = SinglyLinkedList::new();
        ll.push(73);
        let head = ll.head().expect("list has a head");
        let tail = ll.tail().expect("list has a tail");
        assert!(core::ptr::eq(head, tail));
    }

    #[test]
    fn push_then_pop_restores_list() {
        let mut ll: SinglyLinkedList<u32> = [1, 2, 3].into_iter().collect();
        ll.push(4);
        assert_eq!(ll.pop(), Some(4));
        assert_eq!(ll.len(), 3);
        assert_eq!(values(&ll), vec![1, 2, 3]);
        assert_eq!(ll.tail().map(|n| *n.data()), Some(3));
        assert_eq!(ll.tail().and_then(|n| n.peek_next_data()), None);
    }

    #[test]
    fn pop_last_node_clears_head_and_tail() {
        let mut ll = SinglyLinkedList::new();
        ll.push(73);
        assert_eq!(ll.pop(), Some(73));
        assert!(ll.head().is_none());
        assert!(ll.tail().is_none());
        ll.push(42);
        assert_eq!(values(&ll), vec![42]);
    }

    #[test]
    fn shift_last_node_clears_head_and_tail() {
        let mut ll = SinglyLinkedList::new();
        ll.push(73);
        assert_eq!(ll.shift(), Some(73));
        assert!(ll.head().is_none());
        assert!(ll.tail().is_none());
        ll.push(42);
        assert_eq!(ll.head().map(|n| *n.data()), Some(42));
        assert_eq!(ll.tail().map(|n| *n.data()), Some(42));
    }

    #[test]
    fn unshift_then_shift_restores_list() {
        let mut ll: SinglyLinkedList<u32> = [1, 2, 3].into_iter().collect();
        ll.unshift(0);
        assert_eq!(values(&ll), vec![0, 1, 2, 3]);
        assert_eq!(ll.shift(), Some(0));
        assert_eq!(values(&ll), vec![1, 2, 3]);
        assert_eq!(ll.head().map(|n| *n.data()), Some(1));
        assert_eq!(ll.tail().map(|n| *n.data()), Some(3));
    }

    #[test]
    fn unshift_can_be_chained() {
        let mut ll = SinglyLinkedList::new();
        ll.unshift(3).unshift(2).unshift(1);
        assert_eq!(values(&ll), vec![1, 2, 3]);
        assert_eq!(ll.tail().map(|n| *n.data()), Some(3));
    }

    #[test]
    fn get_out_of_bounds_returns_none() {
        let ll: SinglyLinkedList<u32> = [1, 2, 3].into_iter().collect();
        assert_eq!(ll.get(0).map(|n| *n.data()), Some(1));
        assert_eq!(ll.get(2).map(|n| *n.data()), Some(3));
        assert!(ll.get(3).is_none());
        assert!(ll.get(usize::MAX).is_none());
    }

    #[test]
    fn set_only_changes_target_position() {
        let mut ll: SinglyLinkedList<u32> = [1, 2, 3].into_iter().collect();
        assert!(ll.set(1, 9));
        assert_eq!(ll.get(1).map(|n| *n.data()), Some(9));
        assert_eq!(values(&ll), vec![1, 9, 3]);
    }

    #[test]
    fn set_out_of_bounds_returns_false() {
        let mut ll: SinglyLinkedList<u32> = [1, 2, 3].into_iter().collect();
        assert!(!ll.set(3, 9));
        assert_eq!(values(&ll), vec![1, 2, 3]);
    }

    #[test]
    fn try_set_returns_replaced_value() {
        let mut ll: SinglyLinkedList<u32> = [1, 2, 3].into_iter().collect();
        assert_eq!(ll.try_set(2, 7), Ok(3));
        assert_eq!(
            ll.try_set(5, 7),
            Err(SinglyLinkedListError::IndexOutOfBounds { index: 5, len: 3 })
        );
    }

    #[test]
    fn get_mut_can_mutate_data() {
        let mut ll: SinglyLinkedList<u32> = [1, 2, 3].into_iter().collect();
        if let Some(data) = ll.get_mut(2) {
            *data += 10;
        }
        assert_eq!(values(&ll), vec![1, 2, 13]);
        assert!(ll.get_mut(3).is_none());
    }

    #[test]
    fn swapping_mutable_data_across_lists_keeps_chains_intact() {
        let mut a: SinglyLinkedList<u32> = [1, 2].into_iter().collect();
        let mut b: SinglyLinkedList<u32> = [3, 4].into_iter().collect();

        if let (Some(x), Some(y)) = (a.get_mut(0), b.get_mut(0)) {
            core::mem::swap(x, y);
        }

        assert_eq!(values(&a), vec![3, 2]);
        assert_eq!(values(&b), vec![1, 4]);
        for ll in [&a, &b] {
            let last = ll.nodes().last().expect("list has nodes");
            let tail = ll.tail().expect("list has a tail");
            assert!(core::ptr::eq(last, tail));
            assert_eq!(ll.nodes().count(), ll.len());
        }

        assert_eq!(a.pop(), Some(2));
        assert_eq!(b.pop(), Some(4));
        assert_eq!(values(&a), vec![3]);
        assert_eq!(values(&b), vec![1]);
    }

    #[test]
    fn node_debug_shows_data_but_not_links() {
        let ll: SinglyLinkedList<u32> = [1, 2].into_iter().collect();
        let rendered = format!("{:?}", ll.get(0).expect("list has a head"));
        assert!(rendered.contains("data: 1"));
        assert!(!rendered.contains("next"));
    }

    #[test]
    fn insert_at_each_boundary() {
        let mut ll = SinglyLinkedList::new();
        assert!(ll.insert(0, 2));
        assert!(ll.insert(0, 1));
        assert!(ll.insert(2, 4));
        assert!(ll.insert(2, 3));
        assert_eq!(values(&ll), vec![1, 2, 3, 4]);
        assert_eq!(ll.tail().map(|n| *n.data()), Some(4));
        assert_eq!(ll.len(), 4);
    }

    #[test]
    fn insert_out_of_bounds_returns_false() {
        let mut ll: SinglyLinkedList<u32> = [1, 2, 3].into_iter().collect();
        assert!(!ll.insert(4, 9));
        assert_eq!(ll.len(), 3);
        assert_eq!(
            ll.try_insert(4, 9),
            Err(SinglyLinkedListError::IndexOutOfBounds { index: 4, len: 3 })
        );
        assert_eq!(values(&ll), vec![1, 2, 3]);
    }

    #[test]
    fn insert_then_remove_restores_list() {
        let mut ll: SinglyLinkedList<u32> = [1, 2, 3, 4].into_iter().collect();
        for i in 0..=ll.len() {
            assert!(ll.insert(i, 99));
            assert_eq!(ll.remove(i), Some(99));
            assert_eq!(values(&ll), vec![1, 2, 3, 4]);
            assert_eq!(ll.tail().map(|n| *n.data()), Some(4));
        }
    }

    #[test]
    fn remove_out_of_bounds_returns_none() {
        let mut ll: SinglyLinkedList<u32> = [1, 2, 3].into_iter().collect();
        assert_eq!(ll.remove(3), None);
        assert_eq!(ll.remove(4), None);
        assert_eq!(ll.len(), 3);
        assert_eq!(
            ll.try_remove(3),
            Err(SinglyLinkedListError::IndexOutOfBounds { index: 3, len: 3 })
        );
    }

    #[test]
    fn remove_tail_moves_tail_back() {
        let mut ll: SinglyLinkedList<u32> = [1, 2, 3].into_iter().collect();
        assert_eq!(ll.remove(2), Some(3));
        assert_eq!(ll.tail().map(|n| *n.data()), Some(2));
        assert_eq!(ll.tail().and_then(|n| n.peek_next_data()), None);
    }

    #[test]
    fn reverse_empty_and_single_are_noops() {
        let mut ll = SinglyLinkedList::<u32>::new();
        ll.reverse();
        assert!(ll.head().is_none());
        assert!(ll.tail().is_none());

        ll.push(73);
        ll.reverse();
        assert_eq!(values(&ll), vec![73]);
        assert_eq!(ll.head().map(|n| *n.data()), Some(73));
        assert_eq!(ll.tail().map(|n| *n.data()), Some(73));
    }

    #[test]
    fn reverse_flips_links_and_ends() {
        let mut ll: SinglyLinkedList<u32> = (1..=5).collect();
        ll.reverse();
        assert_eq!(values(&ll), vec![5, 4, 3, 2, 1]);
        assert_eq!(ll.head().map(|n| *n.data()), Some(5));
        assert_eq!(ll.tail().map(|n| *n.data()), Some(1));
        assert_eq!(ll.tail().and_then(|n| n.peek_next_data()), None);

        // the list stays fully usable after relinking
        ll.push(0);
        assert_eq!(ll.pop(), Some(0));
        assert_eq!(ll.pop(), Some(1));
        assert_eq!(ll.shift(), Some(5));
        assert_eq!(values(&ll), vec![4, 3, 2]);
    }

    #[test]
    fn reverse_twice_restores_list() {
        let mut ll: SinglyLinkedList<u32> = (1..=6).collect();
        ll.reverse();
        ll.reverse();
        assert_eq!(values(&ll), vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(ll.head().map(|n| *n.data()), Some(1));
        assert_eq!(ll.tail().map(|n| *n.data()), Some(6));
    }

    #[test]
    fn peek_next_data_follows_the_chain() {
        let ll: SinglyLinkedList<u32> = [1, 2].into_iter().collect();
        assert_eq!(ll.get(0).and_then(|n| n.peek_next_data()), Some(&2));
        assert_eq!(ll.get(1).and_then(|n| n.peek_next_data()), None);
    }

    #[test]
    fn debug_renders_values_in_order() {
        let ll: SinglyLinkedList<u32> = [1, 2, 3].into_iter().collect();
        assert_eq!(format!("{ll:?}"), "[1, 2, 3]");
    }

    #[test]
    fn error_display_names_index_and_len() {
        let err = SinglyLinkedListError::IndexOutOfBounds { index: 7, len: 3 };
        assert_eq!(
            err.to_string(),
            "index 7 is out of bounds for list of length 3"
        );
    }

    #[test]
    fn dropping_a_long_list_does_not_overflow_the_stack() {
        let ll: SinglyLinkedList<u32> = (0..1_000_000).collect();
        assert_eq!(ll.len(), 1_000_000);
        drop(ll);
    }

    #[test]
    fn owned_data_is_returned_and_dropped() {
        let mut ll = SinglyLinkedList::new();
        ll.push(String::from("peter"));
        ll.push(String::from("paul"));
        ll.unshift(String::from("mary"));
        assert_eq!(ll.remove(1).as_deref(), Some("peter"));
        assert!(ll.set(0, String::from("john")));
        assert_eq!(ll.get(0).map(|n| n.data().as_str()), Some("john"));
        assert_eq!(ll.get(1).map(|n| n.data().as_str()), Some("paul"));
    }

    #[test]
    fn smoke_test() {
        let mut ll = SinglyLinkedList::new();
        ll.push(1);
        ll.push(2);
        ll.push(3);
        assert_eq!(values(&ll), vec![1, 2, 3]);
        assert_eq!(ll.len(), 3);

        assert!(ll.insert(1, 9));
        assert_eq!(values(&ll), vec![1, 9, 2, 3]);
        assert_eq!(ll.len(), 4);

        assert_eq!(ll.remove(2), Some(2));
        assert_eq!(values(&ll), vec![1, 9, 3]);
        assert_eq!(ll.len(), 3);

        ll.reverse();
        assert_eq!(values(&ll), vec![3, 9, 1]);
    }
}

// proptest doesn't run under miri with default config
#[cfg(all(not(miri), test))]
mod proptests {
    use proptest::prelude::*;
    use proptest::test_runner::Config;
    use proptest_state_machine::{ReferenceStateMachine, StateMachineTest};

    use super::*;

    proptest_state_machine::prop_state_machine! {
        #![proptest_config(Config {
            failure_persistence: None,
            .. Config::default()
        })]

        #[test]
        fn singly_linked_list_state_machine_test(
            sequential
            1..200
            =>
            SinglyLinkedList<u32>
        );
    }

    #[derive(Clone, Debug)]
    pub enum Transition {
        Push(u32),
        Pop,
        Shift,
        Unshift(u32),
        Insert(usize, u32),
        Remove(usize),
        Set(usize, u32),
        Reverse,
    }

    pub struct SinglyLinkedListStateMachine;

    impl ReferenceStateMachine for SinglyLinkedListStateMachine {
        type State = Vec<u32>;
        type Transition = Transition;

        fn init_state() -> BoxedStrategy<Self::State> {
            Just(Vec::new()).boxed()
        }

        fn transitions(state: &Self::State) -> BoxedStrategy<Self::Transition> {
            // one past each valid range so out of bounds calls get exercised
            let len = state.len();
            prop_oneof![
                3 => any::<u32>().prop_map(Transition::Push),
                1 => Just(Transition::Pop),
                1 => Just(Transition::Shift),
                2 => any::<u32>().prop_map(Transition::Unshift),
                2 => (0..len + 2, any::<u32>()).prop_map(|(i, v)| Transition::Insert(i, v)),
                1 => (0..len + 1).prop_map(Transition::Remove),
                1 => (0..len + 1, any::<u32>()).prop_map(|(i, v)| Transition::Set(i, v)),
                1 => Just(Transition::Reverse),
            ]
            .boxed()
        }

        fn apply(mut state: Self::State, transition: &Self::Transition) -> Self::State {
            match transition {
                Transition::Push(value) => state.push(*value),
                Transition::Pop => {
                    state.pop();
                }
                Transition::Shift => {
                    if !state.is_empty() {
                        state.remove(0);
                    }
                }
                Transition::Unshift(value) => state.insert(0, *value),
                Transition::Insert(index, value) => {
                    if *index <= state.len() {
                        state.insert(*index, *value);
                    }
                }
                Transition::Remove(index) => {
                    if *index < state.len() {
                        state.remove(*index);
                    }
                }
                Transition::Set(index, value) => {
                    if let Some(slot) = state.get_mut(*index) {
                        *slot = *value;
                    }
                }
                Transition::Reverse => state.reverse(),
            }
            state
        }
    }

    impl StateMachineTest for SinglyLinkedList<u32> {
        type SystemUnderTest = Self;
        type Reference = SinglyLinkedListStateMachine;

        fn init_test(
            _ref_state: &<Self::Reference as ReferenceStateMachine>::State,
        ) -> Self::SystemUnderTest {
            Self::new()
        }

        fn apply(
            mut state: Self::SystemUnderTest,
            _ref_state: &<Self::Reference as ReferenceStateMachine>::State,
            transition: Transition,
        ) -> Self::SystemUnderTest {
            let len = state.len();
            match transition {
                Transition::Push(value) => state.push(value),
                Transition::Pop => {
                    let expected = state.tail().map(|n| *n.data());
                    assert_eq!(state.pop(), expected);
                }
                Transition::Shift => {
                    let expected = state.head().map(|n| *n.data());
                    assert_eq!(state.shift(), expected);
                }
                Transition::Unshift(value) => {
                    state.unshift(value);
                }
                Transition::Insert(index, value) => {
                    assert_eq!(state.insert(index, value), index <= len);
                }
                Transition::Remove(index) => {
                    let expected = state.get(index).map(|n| *n.data());
                    assert_eq!(state.remove(index), expected);
                }
                Transition::Set(index, value) => {
                    assert_eq!(state.set(index, value), index < len);
                }
                Transition::Reverse => state.reverse(),
            }
            state
        }

        fn check_invariants(
            state: &Self::SystemUnderTest,
            ref_state: &<Self::Reference as ReferenceStateMachine>::State,
        ) {
            assert_eq!(state.len(), ref_state.len());
            assert_eq!(state.is_empty(), state.head().is_none());
            assert_eq!(state.is_empty(), state.tail().is_none());
            assert_eq!(state.head().map(|n| *n.data()), ref_state.first().copied());
            assert_eq!(state.tail().map(|n| *n.data()), ref_state.last().copied());

            if let Some(tail) = state.tail() {
                assert!(tail.peek_next_data().is_none());
            }
            if let (1, Some(head), Some(tail)) = (state.len(), state.head(), state.tail()) {
                assert!(core::ptr::eq(head, tail));
            }

            // following links must visit exactly `len` nodes and end on the tail
            let walked = state.nodes().map(|n| *n.data()).collect::<Vec<_>>();
            assert_eq!(&walked, ref_state);
            if let (Some(last), Some(tail)) = (state.nodes().last(), state.tail()) {
                assert!(core::ptr::eq(last, tail));
            }
        }
    }
}

#[cfg(all(not(miri), test))]
mod longform_proptests {
    use std::collections::VecDeque;

    use proptest::collection::vec;
    use proptest::prelude::*;
    use proptest_derive::Arbitrary;
    use rand::Rng;

    use super::*;

    #[derive(Arbitrary, Debug)]
    enum Operation {
        Push(u32),
        Pop,
        Shift,
        Unshift(u32),
        Insert(u32),
        Remove,
        Set(u32),
        Reverse,
    }

    proptest! {
        #[test]
        fn longform(ops in vec(any::<Operation>(), 512)) {
            let mut reference = VecDeque::new();
            let mut ll = SinglyLinkedList::new();

            fn random_index(upper_inclusive: usize) -> usize {
                rand::thread_rng().gen_range(0..=upper_inclusive)
            }

            for op in ops.iter() {
                match op {
                    Operation::Push(v) => {
                        reference.push_back(*v);
                        ll.push(*v);
                    }
                    Operation::Pop => assert_eq!(ll.pop(), reference.pop_back()),
                    Operation::Shift => assert_eq!(ll.shift(), reference.pop_front()),
                    Operation::Unshift(v) => {
                        reference.push_front(*v);
                        ll.unshift(*v);
                    }
                    Operation::Insert(v) => {
                        let index = random_index(reference.len());
                        reference.insert(index, *v);
                        assert!(ll.insert(index, *v));
                    }
                    Operation::Remove => {
                        if !reference.is_empty() {
                            let index = random_index(reference.len() - 1);
                            assert_eq!(ll.remove(index), reference.remove(index));
                        }
                    }
                    Operation::Set(v) => {
                        if !reference.is_empty() {
                            let index = random_index(reference.len() - 1);
                            reference[index] = *v;
                            assert!(ll.set(index, *v));
                        }
                    }
                    Operation::Reverse => {
                        reference.make_contiguous().reverse();
                        ll.reverse();
                    }
                }

                prop_assert_eq!(ll.len(), reference.len());
                prop_assert_eq!(ll.tail().map(|n| *n.data()), reference.back().copied());
            }

            let walked = ll.nodes().map(|n| *n.data()).collect::<Vec<_>>();
            prop_assert_eq!(walked, reference.into_iter().collect::<Vec<_>>());
        }
    }
}
