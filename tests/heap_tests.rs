//! Deterministic scenario tests for the Fibonacci heap
//!
//! These walk the heap through fixed operation sequences covering the
//! interplay of insert, extract_min, union, update_value, delete, and find,
//! including the cases where consolidation and cascading cuts restructure the
//! forest mid-sequence.

use fibheap::FibonacciHeap;

/// Extracts every value, asserting the heap counts down to empty.
fn drain<V: Ord>(heap: &mut FibonacciHeap<V>) -> Vec<V> {
    let mut out = Vec::new();
    while let Some(value) = heap.extract_min() {
        out.push(value);
    }
    assert!(heap.is_empty());
    assert_eq!(heap.len(), 0);
    out
}

fn assert_empty<V: Ord + std::fmt::Debug>(heap: &mut FibonacciHeap<V>) {
    assert_eq!(heap.min(), None);
    assert_eq!(heap.extract_min(), None);
    assert!(heap.is_empty());
}

#[test]
fn basics_with_mid_sequence_delete() {
    let mut heap = FibonacciHeap::new();
    heap.insert("C");
    heap.insert("D");
    heap.insert("A");
    heap.insert("B");
    let node_e = heap.insert("E");
    heap.insert("G");
    heap.insert("F");

    assert_eq!(heap.min(), Some(&"A"));
    assert_eq!(heap.extract_min(), Some("A"));
    assert_eq!(heap.extract_min(), Some("B"));

    heap.delete(node_e);

    assert_eq!(heap.extract_min(), Some("C"));
    assert_eq!(heap.extract_min(), Some("D"));

    assert_eq!(heap.min(), Some(&"F"));
    assert_eq!(heap.extract_min(), Some("F"));
    assert_eq!(heap.extract_min(), Some("G"));

    assert_empty(&mut heap);
}

#[test]
fn delete_designated_minimum() {
    let mut heap = FibonacciHeap::new();
    let node_a = heap.insert("A");
    assert_eq!(heap.value(node_a), &"A");

    heap.insert("B");

    heap.delete(node_a);
    assert_eq!(heap.min(), Some(&"B"));
    assert_eq!(heap.extract_min(), Some("B"));

    assert_empty(&mut heap);
}

#[test]
fn union_with_duplicates() {
    let mut heap1 = FibonacciHeap::new();
    heap1.insert("A");
    heap1.insert("B");

    let mut heap2 = FibonacciHeap::new();
    heap2.insert("B");

    heap1.union(&mut heap2);
    assert_empty(&mut heap2);

    assert_eq!(drain(&mut heap1), vec!["A", "B", "B"]);
}

#[test]
fn union_smaller_minimum_on_other_side() {
    let mut heap1 = FibonacciHeap::new();
    heap1.insert("B");
    heap1.insert("C");

    let mut heap2 = FibonacciHeap::new();
    heap2.insert("A");
    heap2.insert("B");

    heap1.union(&mut heap2);
    assert_empty(&mut heap2);

    assert_eq!(drain(&mut heap1), vec!["A", "B", "B", "C"]);
}

#[test]
fn union_into_empty_heap() {
    let mut heap1 = FibonacciHeap::new();

    let mut heap2 = FibonacciHeap::new();
    heap2.insert("A");
    heap2.insert("B");

    heap1.union(&mut heap2);
    assert_empty(&mut heap2);

    assert_eq!(drain(&mut heap1), vec!["A", "B"]);
}

#[test]
fn union_with_empty_other_is_noop() {
    let mut heap1 = FibonacciHeap::new();
    heap1.insert("A");

    let mut heap2 = FibonacciHeap::new();
    heap1.union(&mut heap2);

    assert_eq!(heap1.len(), 1);
    assert_eq!(drain(&mut heap1), vec!["A"]);
}

#[test]
fn update_rejects_larger_and_equal_values() {
    let mut heap = FibonacciHeap::new();
    let node_a = heap.insert("A");

    assert!(!heap.update_value(node_a, "B"));
    assert!(!heap.update_value(node_a, "A"));
    assert_eq!(heap.min(), Some(&"A"));
    assert_eq!(heap.len(), 1);
}

#[test]
fn update_to_duplicate_of_minimum() {
    let mut heap = FibonacciHeap::new();
    heap.insert("A");
    let node_b = heap.insert("B");

    assert!(heap.update_value(node_b, "A"));

    assert_eq!(drain(&mut heap), vec!["A", "A"]);
}

#[test]
fn update_between_existing_values() {
    let mut heap = FibonacciHeap::new();
    heap.insert("A");
    let node_c = heap.insert("C");

    assert!(heap.update_value(node_c, "B"));

    assert_eq!(drain(&mut heap), vec!["A", "B"]);
}

#[test]
fn update_below_current_minimum() {
    let mut heap = FibonacciHeap::new();
    heap.insert("B");
    let node_c = heap.insert("C");

    assert!(heap.update_value(node_c, "A"));

    assert_eq!(drain(&mut heap), vec!["A", "B"]);
}

#[test]
fn update_the_designated_minimum() {
    let mut heap = FibonacciHeap::new();
    let node_b = heap.insert("B");
    heap.insert("C");

    assert!(heap.update_value(node_b, "A"));

    assert_eq!(drain(&mut heap), vec!["A", "C"]);
}

#[test]
fn update_after_consolidation() {
    let mut heap = FibonacciHeap::new();
    heap.insert("A");
    let node_b = heap.insert("B");
    heap.insert("C");
    let node_d = heap.insert("D");
    heap.insert("E");

    // Consolidates the remaining four values into trees.
    assert_eq!(heap.extract_min(), Some("A"));

    assert!(heap.update_value(node_d, "B"));
    assert!(heap.update_value(node_b, "A"));

    assert_eq!(drain(&mut heap), vec!["A", "B", "C", "E"]);
}

#[test]
fn update_after_unions_and_consolidation() {
    let mut heap1 = FibonacciHeap::new();
    heap1.insert("A");
    let node_b = heap1.insert("B");
    let node_c = heap1.insert("C");

    let mut heap2 = FibonacciHeap::new();
    heap2.insert("A");
    heap2.insert("B");
    heap2.insert("C");

    let mut heap3 = FibonacciHeap::new();
    heap3.insert("A");
    heap3.insert("B");
    heap3.insert("C");

    heap1.union(&mut heap2);
    heap1.union(&mut heap3);

    assert_eq!(heap1.extract_min(), Some("A"));

    assert!(heap1.update_value(node_c, "A"));
    assert!(heap1.update_value(node_b, "A"));

    assert_eq!(
        drain(&mut heap1),
        vec!["A", "A", "A", "A", "B", "B", "C", "C"]
    );
}

#[test]
fn find_over_flat_forest() {
    let mut heap = FibonacciHeap::new();
    heap.insert("A");
    heap.insert("B");
    heap.insert("C");
    heap.insert("D");
    heap.insert("E");

    for value in ["C", "B", "A"] {
        let handle = heap.find(&value).expect("value is in the heap");
        assert_eq!(heap.value(handle), &value);
    }
    assert!(heap.find(&"F").is_none());
}

#[test]
fn find_after_deletes_and_duplicates() {
    let mut heap = FibonacciHeap::new();
    let node_a = heap.insert("A");
    heap.insert("A");
    heap.insert("B");
    let node_c = heap.insert("C");

    for value in ["C", "B", "A"] {
        let handle = heap.find(&value).expect("value is in the heap");
        assert_eq!(heap.value(handle), &value);
    }

    heap.delete(node_c);
    assert!(heap.find(&"C").is_none());

    // One "A" remains after deleting the other.
    heap.delete(node_a);
    assert!(heap.find(&"A").is_some());
    assert_eq!(heap.extract_min(), Some("A"));
    assert!(heap.find(&"A").is_none());

    assert!(heap.find(&"B").is_some());
    assert_eq!(heap.extract_min(), Some("B"));

    assert_empty(&mut heap);
}

#[test]
fn drain_counts_duplicates_exactly() {
    let mut heap = FibonacciHeap::new();
    for i in 0..50 {
        heap.insert(i % 5);
    }
    assert_eq!(heap.len(), 50);

    let drained = drain(&mut heap);
    assert_eq!(drained.len(), 50);
    for (i, value) in drained.iter().enumerate() {
        assert_eq!(*value, (i / 10) as i32);
    }
}

#[test]
fn delete_parented_node_after_consolidation() {
    let mut heap = FibonacciHeap::new();
    let mut handles = Vec::new();
    for i in 0..16 {
        handles.push(heap.insert(i));
    }

    // Consolidate, then remove a node that ended up inside a tree.
    assert_eq!(heap.extract_min(), Some(0));
    heap.delete(handles[9]);
    heap.delete(handles[15]);

    let drained = drain(&mut heap);
    let expected: Vec<i32> = (1..16).filter(|v| *v != 9 && *v != 15).collect();
    assert_eq!(drained, expected);
}
