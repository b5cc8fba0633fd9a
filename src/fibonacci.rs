//! Fibonacci Heap implementation
//!
//! A Fibonacci heap is a data structure for priority queue operations with:
//! - O(1) amortized insert, union, and decrease (`update_value`)
//! - O(log n) amortized extract_min
//! - O(n) lookup by value (`find`) for callers that hold no handle
//!
//! The structure consists of a forest of heap-ordered trees. Siblings at every
//! level are linked in a circular doubly linked list; the heap keeps a pointer
//! to the minimum root. Insert and union only splice rings, deferring all
//! restructuring to `extract_min`, which merges trees of equal degree until at
//! most one tree per degree remains.
//!
//! # Minimum staleness after decrease
//!
//! When `update_value` decreases a non-root node, the node is cut from its
//! parent and spliced into the root list without being compared against the
//! current minimum pointer. Until the next `extract_min` rebuilds the root
//! list, `min` can therefore report a value that is no longer the smallest in
//! the heap, and `extract_min` removes the node the minimum pointer
//! designates. Decreases applied to root nodes do not have this window. See
//! [`FibonacciHeap::update_value`] for details.

use smallvec::SmallVec;
use std::ptr::NonNull;

/// Handle to an element in a Fibonacci heap
///
/// Returned by [`FibonacciHeap::insert`] and accepted by `update_value`,
/// `delete`, and `value`. Handles survive `union`: a handle minted by either
/// heap stays usable against the merged heap.
///
/// Note: a handle is tied to the node it was created for. Using it after that
/// node was removed by `extract_min` or `delete`, or after the heap is
/// dropped, is undefined behavior. No liveness check is performed.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct FibHandle {
    node: *const (), // Type-erased pointer to Node<V>
}

struct Node<V> {
    value: V,
    parent: Option<NonNull<Node<V>>>,
    child: Option<NonNull<Node<V>>>,
    prev: NonNull<Node<V>>,
    next: NonNull<Node<V>>,
    degree: usize,
    marked: bool,
}

/// Degree-indexed buckets used during consolidation. Grown on demand so the
/// maximum degree (~1.44 log2 n) never hits an artificial cap.
type DegreeBuckets<V> = SmallVec<[Option<NonNull<Node<V>>>; 16]>;

/// Fibonacci Heap
///
/// A min-heap over values of any totally ordered type. `insert` returns a
/// [`FibHandle`] for later use with [`update_value`](FibonacciHeap::update_value)
/// and [`delete`](FibonacciHeap::delete).
///
/// # Example
///
/// ```rust
/// use fibheap::FibonacciHeap;
///
/// let mut heap = FibonacciHeap::new();
/// let handle = heap.insert(5);
/// heap.insert(3);
/// assert_eq!(heap.min(), Some(&3));
///
/// heap.update_value(handle, 1);
/// assert_eq!(heap.min(), Some(&1));
/// ```
pub struct FibonacciHeap<V: Ord> {
    root: Option<NonNull<Node<V>>>,
    len: usize,
    // Phantom data to ensure proper drop semantics
    _phantom: std::marker::PhantomData<V>,
}

impl<V: Ord> Drop for FibonacciHeap<V> {
    fn drop(&mut self) {
        // Clean up all nodes in the heap
        while self.extract_min().is_some() {}
    }
}

impl<V: Ord> Default for FibonacciHeap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Ord> FibonacciHeap<V> {
    /// Creates a new empty heap.
    pub fn new() -> Self {
        Self {
            root: None,
            len: 0,
            _phantom: std::marker::PhantomData,
        }
    }

    /// Returns true if the heap is empty.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the number of elements in the heap.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Inserts a value, returning a handle for later `update_value`/`delete`.
    ///
    /// # Time Complexity
    /// O(1). The new node is spliced into the root list; no restructuring
    /// happens until the next `extract_min`.
    pub fn insert(&mut self, value: V) -> FibHandle {
        let node = Box::into_raw(Box::new(Node {
            value,
            parent: None,
            child: None,
            prev: NonNull::dangling(), // Will be set immediately
            next: NonNull::dangling(), // Will be set immediately
            degree: 0,
            marked: false,
        }));

        let node_ptr = unsafe { NonNull::new_unchecked(node) };

        unsafe {
            // Initialize circular list - node points to itself
            (*node).prev = node_ptr;
            (*node).next = node_ptr;

            match self.root {
                Some(root) => {
                    Self::meld1(root, node_ptr);
                    if (*node).value < (*root.as_ptr()).value {
                        self.root = Some(node_ptr);
                    }
                }
                None => self.root = Some(node_ptr),
            }
        }

        self.len += 1;
        FibHandle {
            node: node_ptr.as_ptr() as *const (),
        }
    }

    /// Merges another heap into this one in O(1).
    ///
    /// The other heap is left empty but remains usable. Ownership of every
    /// node transfers to the receiver; handles minted by either heap stay
    /// valid against the merged heap.
    pub fn union(&mut self, other: &mut Self) {
        match (self.root, other.root) {
            (None, _) => {
                self.root = other.root;
                self.len = other.len;
            }
            (Some(a), Some(b)) => unsafe {
                Self::meld2(a, b);
                if (*b.as_ptr()).value < (*a.as_ptr()).value {
                    self.root = Some(b);
                }
                self.len += other.len;
            },
            (Some(_), None) => {}
        }
        other.root = None;
        other.len = 0;
    }

    /// Returns the minimum value without removing it, or `None` when empty.
    ///
    /// # Time Complexity
    /// O(1). Subject to the staleness window described in the module docs.
    pub fn min(&self) -> Option<&V> {
        self.root.map(|root| unsafe { &(*root.as_ptr()).value })
    }

    /// Removes and returns the value the minimum pointer designates, or
    /// `None` when empty.
    ///
    /// Every remaining top-level root and every former child of the removed
    /// node is consolidated into degree-indexed buckets, so at most one tree
    /// per degree survives, and the minimum pointer is recomputed over the
    /// rebuilt root list.
    ///
    /// # Time Complexity
    /// O(log n) amortized; worst case proportional to the number of roots
    /// accumulated since the previous consolidation.
    pub fn extract_min(&mut self) -> Option<V> {
        let root = self.root?;
        let mut buckets = DegreeBuckets::<V>::new();

        unsafe {
            // Every other top-level root goes into the degree buckets.
            let mut node = (*root.as_ptr()).next;
            while node != root {
                let next = (*node.as_ptr()).next;
                Self::add_to_roots(node, &mut buckets);
                node = next;
            }

            // Then the former children of the removed root, unparented first.
            if let Some(child) = (*root.as_ptr()).child {
                (*child.as_ptr()).parent = None;
                (*child.as_ptr()).marked = false;
                let mut node = (*child.as_ptr()).next;
                Self::add_to_roots(child, &mut buckets);
                while node != child {
                    let next = (*node.as_ptr()).next;
                    (*node.as_ptr()).parent = None;
                    (*node.as_ptr()).marked = false;
                    Self::add_to_roots(node, &mut buckets);
                    node = next;
                }
            }

            let removed = Box::from_raw(root.as_ptr());
            let min = removed.value;

            // Rebuild the top-level ring from the occupied buckets, tracking
            // the minimum seen.
            let mut new_root: Option<NonNull<Node<V>>> = None;
            for node in buckets.into_iter().flatten() {
                match new_root {
                    None => {
                        (*node.as_ptr()).prev = node;
                        (*node.as_ptr()).next = node;
                        new_root = Some(node);
                    }
                    Some(current) => {
                        let after = (*current.as_ptr()).next;
                        (*node.as_ptr()).prev = current;
                        (*node.as_ptr()).next = after;
                        (*after.as_ptr()).prev = node;
                        (*current.as_ptr()).next = node;
                        if (*node.as_ptr()).value < (*current.as_ptr()).value {
                            new_root = Some(node);
                        }
                    }
                }
            }

            self.root = new_root;
            self.len -= 1;
            Some(min)
        }
    }

    /// Decreases the value of the node behind `handle` to `new_value`.
    ///
    /// Returns `false` and performs no mutation unless `new_value` is
    /// strictly less than the current value; equal values are refused. This
    /// is normal control flow, not an error.
    ///
    /// If the node is a root, the minimum pointer is updated as needed. If
    /// the node has a parent, it is cut (cascading up through marked
    /// ancestors) and spliced into the root list; on this path the fresh
    /// value is not compared against the current minimum pointer, so `min`
    /// can report a stale value until the next `extract_min` (see module
    /// docs).
    ///
    /// The handle must be live (from `insert`, its node not yet removed);
    /// see [`FibHandle`].
    ///
    /// # Time Complexity
    /// O(1) amortized; cascading cuts are charged against earlier decreases.
    pub fn update_value(&mut self, handle: FibHandle, new_value: V) -> bool {
        let node_ptr = unsafe { NonNull::new_unchecked(handle.node as *mut Node<V>) };

        unsafe {
            let node = node_ptr.as_ptr();
            if new_value >= (*node).value {
                return false;
            }
            (*node).value = new_value;

            if self.root == Some(node_ptr) {
                return true;
            }

            if (*node).parent.is_none() {
                if let Some(root) = self.root {
                    if (*node).value < (*root.as_ptr()).value {
                        self.root = Some(node_ptr);
                    }
                }
                return true;
            }

            self.cut_and_meld(node_ptr);
            true
        }
    }

    /// Removes the node behind `handle` from the heap.
    ///
    /// The designated minimum delegates to `extract_min` (full
    /// consolidation). Any other root is unlinked in O(1); a parented node is
    /// cut with the usual cascading. In the non-minimum cases the removed
    /// node's children are unparented and spliced into the root list as they
    /// are, leaving the forest ragged until the next `extract_min`.
    ///
    /// The handle must be live (from `insert`, its node not yet removed);
    /// see [`FibHandle`].
    pub fn delete(&mut self, handle: FibHandle) {
        let node_ptr = unsafe { NonNull::new_unchecked(handle.node as *mut Node<V>) };

        unsafe {
            let node = node_ptr.as_ptr();
            if (*node).parent.is_none() {
                if self.root == Some(node_ptr) {
                    self.extract_min();
                    return;
                }
                let prev = (*node).prev;
                let next = (*node).next;
                (*prev.as_ptr()).next = next;
                (*next.as_ptr()).prev = prev;
            } else {
                self.cut(node_ptr);
            }

            if let Some(child) = (*node).child {
                let mut current = child;
                loop {
                    (*current.as_ptr()).parent = None;
                    (*current.as_ptr()).marked = false;
                    current = (*current.as_ptr()).next;
                    if current == child {
                        break;
                    }
                }
                if let Some(root) = self.root {
                    Self::meld2(root, child);
                }
            }

            drop(Box::from_raw(node));
            self.len -= 1;
        }
    }

    /// Scans the forest for the first node whose value equals `value`,
    /// returning its handle.
    ///
    /// Intended for callers that hold no handle and need one for
    /// `update_value` or `delete`. The traversal uses an explicit work list,
    /// so deep trees cannot overflow the call stack.
    ///
    /// # Time Complexity
    /// O(n) worst case.
    pub fn find(&self, value: &V) -> Option<FibHandle> {
        let root = self.root?;
        let mut work: Vec<NonNull<Node<V>>> = Vec::new();

        unsafe {
            let mut node = root;
            loop {
                work.push(node);
                node = (*node.as_ptr()).next;
                if node == root {
                    break;
                }
            }

            while let Some(node) = work.pop() {
                if (*node.as_ptr()).value == *value {
                    return Some(FibHandle {
                        node: node.as_ptr() as *const (),
                    });
                }
                if let Some(child) = (*node.as_ptr()).child {
                    let mut sibling = child;
                    loop {
                        work.push(sibling);
                        sibling = (*sibling.as_ptr()).next;
                        if sibling == child {
                            break;
                        }
                    }
                }
            }
        }

        None
    }

    /// Returns a reference to the value behind `handle`.
    ///
    /// The handle must be live (from `insert`, its node not yet removed);
    /// see [`FibHandle`].
    pub fn value(&self, handle: FibHandle) -> &V {
        unsafe { &(*(handle.node as *const Node<V>)).value }
    }

    /// Splices the singleton `single` into the ring containing `list`.
    unsafe fn meld1(list: NonNull<Node<V>>, single: NonNull<Node<V>>) {
        let tail = (*list.as_ptr()).prev;
        (*tail.as_ptr()).next = single;
        (*single.as_ptr()).prev = tail;
        (*single.as_ptr()).next = list;
        (*list.as_ptr()).prev = single;
    }

    /// Splices the rings containing `a` and `b` into one ring.
    unsafe fn meld2(a: NonNull<Node<V>>, b: NonNull<Node<V>>) {
        let a_prev = (*a.as_ptr()).prev;
        let b_prev = (*b.as_ptr()).prev;
        (*a_prev.as_ptr()).next = b;
        (*b_prev.as_ptr()).next = a;
        (*a.as_ptr()).prev = b_prev;
        (*b.as_ptr()).prev = a_prev;
    }

    /// Detaches `node` from its parent's child list and applies the
    /// cascading-cut rule: a root parent stops the cascade, an unmarked
    /// parent is marked, and a marked parent is cut in turn.
    unsafe fn cut(&mut self, node: NonNull<Node<V>>) {
        let parent_ptr = match (*node.as_ptr()).parent {
            Some(parent) => parent,
            None => return,
        };
        let parent = parent_ptr.as_ptr();

        (*parent).degree -= 1;
        if (*parent).degree == 0 {
            (*parent).child = None;
        } else {
            (*parent).child = Some((*node.as_ptr()).next);
            let prev = (*node.as_ptr()).prev;
            let next = (*node.as_ptr()).next;
            (*prev.as_ptr()).next = next;
            (*next.as_ptr()).prev = prev;
        }

        if (*parent).parent.is_none() {
            return;
        }
        if !(*parent).marked {
            (*parent).marked = true;
            return;
        }

        self.cut_and_meld(parent_ptr);
    }

    /// Cuts `node` from its parent and promotes it to the root list.
    unsafe fn cut_and_meld(&mut self, node: NonNull<Node<V>>) {
        self.cut(node);
        (*node.as_ptr()).parent = None;
        (*node.as_ptr()).marked = false;
        match self.root {
            Some(root) => Self::meld1(root, node),
            None => {
                (*node.as_ptr()).prev = node;
                (*node.as_ptr()).next = node;
                self.root = Some(node);
            }
        }
    }

    /// Inserts `node` into the degree buckets, repeatedly linking it with any
    /// occupant of the same degree: the tree with the larger value becomes a
    /// child of the tree with the smaller one, the child is unmarked, and the
    /// winner moves up one degree until its bucket is free.
    unsafe fn add_to_roots(mut node: NonNull<Node<V>>, buckets: &mut DegreeBuckets<V>) {
        (*node.as_ptr()).prev = node;
        (*node.as_ptr()).next = node;

        loop {
            let degree = (*node.as_ptr()).degree;
            if degree >= buckets.len() {
                buckets.resize(degree + 1, None);
            }
            let mut existing = match buckets[degree].take() {
                Some(existing) => existing,
                None => break,
            };

            if (*existing.as_ptr()).value < (*node.as_ptr()).value {
                std::mem::swap(&mut node, &mut existing);
            }

            (*existing.as_ptr()).parent = Some(node);
            (*existing.as_ptr()).marked = false;
            match (*node.as_ptr()).child {
                Some(child) => Self::meld1(child, existing),
                None => {
                    (*existing.as_ptr()).prev = existing;
                    (*existing.as_ptr()).next = existing;
                    (*node.as_ptr()).child = Some(existing);
                }
            }
            (*node.as_ptr()).degree += 1;
        }

        let degree = (*node.as_ptr()).degree;
        if degree >= buckets.len() {
            buckets.resize(degree + 1, None);
        }
        buckets[degree] = Some(node);
    }
}
