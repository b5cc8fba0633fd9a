//! Fibonacci heap: a mergeable priority queue for Rust
//!
//! This crate provides a Fibonacci heap, a priority-queue data structure with
//! efficient `decrease_key`-style updates, as described in computer science
//! literature:
//!
//! - **insert**: O(1) amortized, returns a stable handle
//! - **union**: O(1), transfers the other heap's entire forest
//! - **min**: O(1) peek
//! - **extract_min**: O(log n) amortized (degree-bucket consolidation)
//! - **update_value**: O(1) amortized decrease with cascading cuts
//! - **delete**: removal of an arbitrary node by handle
//! - **find**: O(n) lookup by value for callers holding no handle
//!
//! These bounds make the heap a good fit for algorithms that repeatedly
//! decrease priorities of queued elements, like Dijkstra's shortest path
//! (see [`pathfinding`]) and MST-style computations.
//!
//! # Example
//!
//! ```rust
//! use fibheap::FibonacciHeap;
//!
//! let mut heap = FibonacciHeap::new();
//! let handle = heap.insert(5);
//! heap.insert(3);
//! heap.update_value(handle, 1);
//! assert_eq!(heap.extract_min(), Some(1));
//! assert_eq!(heap.extract_min(), Some(3));
//! ```

pub mod fibonacci;
pub mod pathfinding;

// Re-export the heap for convenience
pub use fibonacci::{FibHandle, FibonacciHeap};
