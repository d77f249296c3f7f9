//! An owned singly linked list.
//!
//! Every node is exclusively owned by its predecessor (or by the list head), so
//! cycles cannot be built. [`CursorMut`] gives O(1) insertion and removal right
//! after any position it has walked to.

use alloc::boxed::Box;
use core::fmt::Debug;
use core::iter::FusedIterator;

type Link<T> = Option<Box<Node<T>>>;

pub(crate) struct Node<T> {
    pub(crate) data: T,
    next: Link<T>,
}

/// A singly linked list with O(1) push and pop at the front.
///
/// # Examples
///
/// ```rust
/// use keyed_tables::List;
///
/// let mut list = List::new();
/// list.push_front(3);
/// list.push_front(2);
/// list.push_front(1);
/// assert_eq!(list.iter().copied().collect::<Vec<_>>(), [1, 2, 3]);
///
/// assert_eq!(list.pop_front(), Some(1));
/// assert_eq!(list.front(), Some(&2));
/// ```
pub struct List<T> {
    head: Link<T>,
    len: usize,
}

impl<T> List<T> {
    /// Creates an empty list.
    pub const fn new() -> Self {
        Self { head: None, len: 0 }
    }

    /// Returns `true` if the list has no nodes.
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// First element, if any.
    pub fn front(&self) -> Option<&T> {
        self.head.as_ref().map(|node| &node.data)
    }

    /// First element for modification, if any.
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.head.as_mut().map(|node| &mut node.data)
    }

    /// Prepends `data`.
    pub fn push_front(&mut self, data: T) {
        self.link_front(Box::new(Node { data, next: None }));
    }

    /// Removes and returns the first element.
    pub fn pop_front(&mut self) -> Option<T> {
        self.unlink_front().map(|node| node.data)
    }

    /// Appends `data`. Walks the whole list.
    pub fn push_back(&mut self, data: T) {
        let mut cursor = self.cursor_front_mut();
        while cursor.move_next() {}
        cursor.insert_after(data);
    }

    /// Removes and returns the last element. Walks the whole list.
    pub fn pop_back(&mut self) -> Option<T> {
        let len = self.len;
        let mut cursor = self.cursor_front_mut();
        for _ in 1..len {
            cursor.move_next();
        }
        cursor.remove_after()
    }

    /// Drops every node.
    pub fn clear(&mut self) {
        let mut link = self.head.take();
        while let Some(mut node) = link {
            link = node.next.take();
        }
        self.len = 0;
    }

    /// Iterates over shared references, front to back.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            next: self.head.as_deref(),
            remaining: self.len,
        }
    }

    /// Iterates over mutable references, front to back.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            next: self.head.as_deref_mut(),
            remaining: self.len,
        }
    }

    /// Cursor positioned before the first node.
    pub fn cursor_front_mut(&mut self) -> CursorMut<'_, T> {
        CursorMut {
            link: Some(&mut self.head),
            len: &mut self.len,
        }
    }

    /// First element matching `pred`.
    pub fn find(&self, mut pred: impl FnMut(&T) -> bool) -> Option<&T> {
        self.iter().find(|&data| pred(data))
    }

    /// First element matching `pred`, for modification.
    pub fn find_mut(&mut self, mut pred: impl FnMut(&T) -> bool) -> Option<&mut T> {
        self.iter_mut().find(|data| pred(&**data))
    }

    /// Unlinks and returns the first element matching `pred`.
    pub fn remove_first(&mut self, mut pred: impl FnMut(&T) -> bool) -> Option<T> {
        let mut cursor = self.cursor_front_mut();
        loop {
            match cursor.peek_next() {
                Some(data) if pred(&*data) => return cursor.remove_after(),
                Some(_) => {
                    cursor.move_next();
                }
                None => return None,
            }
        }
    }

    pub(crate) fn link_front(&mut self, mut node: Box<Node<T>>) {
        node.next = self.head.take();
        self.head = Some(node);
        self.len += 1;
    }

    pub(crate) fn unlink_front(&mut self) -> Option<Box<Node<T>>> {
        let mut node = self.head.take()?;
        self.head = node.next.take();
        self.len -= 1;
        Some(node)
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for List<T> {
    fn drop(&mut self) {
        // Iterative so long chains do not recurse through `Box` drops.
        self.clear();
    }
}

impl<T: Clone> Clone for List<T> {
    fn clone(&self) -> Self {
        let mut list = List::new();
        let mut cursor = list.cursor_front_mut();
        for data in self {
            cursor.insert_after(data.clone());
            cursor.move_next();
        }
        list
    }
}

impl<T: PartialEq> PartialEq for List<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for List<T> {}

impl<T: Debug> Debug for List<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> FromIterator<T> for List<T> {
    /// Keeps the iteration order.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = List::new();
        let mut cursor = list.cursor_front_mut();
        for data in iter {
            cursor.insert_after(data);
            cursor.move_next();
        }
        list
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type IntoIter = Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> IntoIterator for List<T> {
    type IntoIter = IntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self }
    }
}

/// A mutable position in a [`List`].
///
/// The cursor sits on a link: initially the list head, after each
/// [`move_next`](CursorMut::move_next) the `next` link of the node it stepped
/// over. Insertions and removals act on the node right after the cursor, the
/// same way a predecessor pointer would.
///
/// # Examples
///
/// ```rust
/// use keyed_tables::List;
///
/// let mut list: List<i32> = [1, 3].into_iter().collect();
/// let mut cursor = list.cursor_front_mut();
/// cursor.move_next();
/// cursor.insert_after(2);
/// assert_eq!(list.iter().copied().collect::<Vec<_>>(), [1, 2, 3]);
/// ```
pub struct CursorMut<'a, T> {
    // Only `None` transiently inside `move_next`.
    link: Option<&'a mut Link<T>>,
    len: &'a mut usize,
}

impl<T> CursorMut<'_, T> {
    /// Element right after the cursor.
    pub fn peek_next(&mut self) -> Option<&mut T> {
        self.link
            .as_deref_mut()?
            .as_mut()
            .map(|node| &mut node.data)
    }

    /// Steps over the next node. Returns `false` at the end of the list.
    pub fn move_next(&mut self) -> bool {
        match self.link.take() {
            Some(link) if link.is_some() => {
                self.link = link.as_mut().map(|node| &mut node.next);
                true
            }
            link => {
                self.link = link;
                false
            }
        }
    }

    /// Links `data` right after the cursor. The cursor does not move.
    pub fn insert_after(&mut self, data: T) {
        if let Some(link) = self.link.as_deref_mut() {
            let next = link.take();
            *link = Some(Box::new(Node { data, next }));
            *self.len += 1;
        }
    }

    /// Unlinks and returns the element right after the cursor.
    pub fn remove_after(&mut self) -> Option<T> {
        let link = self.link.as_deref_mut()?;
        let Node { data, next } = *link.take()?;
        *link = next;
        *self.len -= 1;
        Some(data)
    }
}

/// Borrowing iterator over a [`List`].
pub struct Iter<'a, T> {
    next: Option<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.next.as_deref();
        self.remaining -= 1;
        Some(&node.data)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

/// Mutably borrowing iterator over a [`List`].
pub struct IterMut<'a, T> {
    next: Option<&'a mut Node<T>>,
    remaining: usize,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next.take()?;
        self.next = node.next.as_deref_mut();
        self.remaining -= 1;
        Some(&mut node.data)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T> FusedIterator for IterMut<'_, T> {}

/// Owning iterator over a [`List`].
pub struct IntoIter<T> {
    list: List<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.list.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len, Some(self.list.len))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::*;

    fn one_two_three() -> List<i32> {
        let mut list = List::new();
        list.push_front(3);
        list.push_front(2);
        list.push_front(1);
        list
    }

    fn contents(list: &List<i32>) -> Vec<i32> {
        list.iter().copied().collect()
    }

    #[test]
    fn clone_is_equal_and_independent() {
        let mut list = one_two_three();
        let copy = list.clone();
        assert_eq!(list, copy);

        *list.front_mut().unwrap() = 10;
        assert_ne!(list, copy);
        assert_eq!(contents(&copy), [1, 2, 3]);
    }

    #[test]
    fn clear_empties_the_list() {
        let mut list = one_two_three();
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        assert_eq!(list, List::new());
    }

    #[test]
    fn push_front_onto_empty_and_non_empty() {
        let mut list = List::new();
        list.push_front(1);
        assert_eq!(list.front(), Some(&1));
        assert_eq!(list.len(), 1);

        let mut list = one_two_three();
        list.push_front(10);
        assert_eq!(contents(&list), [10, 1, 2, 3]);
    }

    #[test]
    fn pop_front_and_pop_from_empty() {
        let mut list = one_two_three();
        assert_eq!(list.pop_front(), Some(1));
        assert_eq!(list.front(), Some(&2));

        let mut empty: List<i32> = List::new();
        assert_eq!(empty.pop_front(), None);
        assert_eq!(empty.pop_back(), None);
        assert!(empty.is_empty());
    }

    #[test]
    fn push_back_and_pop_back() {
        let mut list = List::new();
        list.push_front(1);
        list.push_back(10);
        assert_eq!(contents(&list), [1, 10]);

        let mut list = one_two_three();
        assert_eq!(list.pop_back(), Some(3));
        assert_eq!(contents(&list), [1, 2]);
        assert_eq!(list.pop_back(), Some(2));
        assert_eq!(list.pop_back(), Some(1));
        assert_eq!(list.pop_back(), None);
    }

    #[test]
    fn cursor_insert_and_remove_after() {
        let mut list = one_two_three();
        {
            let mut cursor = list.cursor_front_mut();
            assert!(cursor.move_next());
            cursor.insert_after(10);
        }
        assert_eq!(contents(&list), [1, 10, 2, 3]);

        {
            let mut cursor = list.cursor_front_mut();
            cursor.move_next();
            assert_eq!(cursor.remove_after(), Some(10));
            assert_eq!(cursor.peek_next(), Some(&mut 2));
        }
        assert_eq!(contents(&list), [1, 2, 3]);
        assert_eq!(list.len(), 3);

        {
            let mut cursor = list.cursor_front_mut();
            while cursor.move_next() {}
            assert!(!cursor.move_next());
            assert_eq!(cursor.remove_after(), None);
            cursor.insert_after(4);
        }
        assert_eq!(contents(&list), [1, 2, 3, 4]);
    }

    #[test]
    fn remove_first_unlinks_head_middle_and_tail() {
        let mut list: List<i32> = (1..=5).collect();
        assert_eq!(list.remove_first(|&x| x == 1), Some(1));
        assert_eq!(list.remove_first(|&x| x == 3), Some(3));
        assert_eq!(list.remove_first(|&x| x == 5), Some(5));
        assert_eq!(list.remove_first(|&x| x == 9), None);
        assert_eq!(contents(&list), [2, 4]);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn find_and_find_mut() {
        let mut list = one_two_three();
        assert_eq!(list.find(|&x| x > 1), Some(&2));
        if let Some(x) = list.find_mut(|&x| x == 3) {
            *x = 30;
        }
        assert_eq!(contents(&list), [1, 2, 30]);
        assert!(list.find(|&x| x == 3).is_none());
    }

    #[test]
    fn iterators_report_exact_sizes() {
        let mut list = one_two_three();
        assert_eq!(list.iter().len(), 3);
        for x in list.iter_mut() {
            *x *= 2;
        }
        assert_eq!(list.iter_mut().len(), 3);
        let owned: Vec<i32> = list.into_iter().collect();
        assert_eq!(owned, vec![2, 4, 6]);
    }

    #[test]
    fn relinking_nodes_keeps_counts() {
        let mut from = one_two_three();
        let mut to = List::new();
        while let Some(node) = from.unlink_front() {
            to.link_front(node);
        }
        assert!(from.is_empty());
        assert_eq!(contents(&to), [3, 2, 1]);
        assert_eq!(to.len(), 3);
    }

    #[test]
    #[cfg_attr(miri, ignore)]
    fn dropping_a_long_list_does_not_overflow_the_stack() {
        let mut list = List::new();
        for i in 0..1_000_000u32 {
            list.push_front(i);
        }
        assert_eq!(list.len(), 1_000_000);
        drop(list);
    }
}
