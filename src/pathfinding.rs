//! Dijkstra's shortest-path algorithm built on the Fibonacci heap
//!
//! This module demonstrates the heap consumed the way priority-scheduling
//! algorithms consume it: lightweight open-set entries keyed by path cost,
//! with `update_value` applied whenever a cheaper path to a queued state is
//! discovered. A fast hash map (using FxHash) maps node states to their
//! metadata including costs and heap handles.
//!
//! The search relaxes the entire component reachable from the start and then
//! reports the cheapest discovered goal, so the reachable state space must be
//! finite and edge costs non-negative. Running to exhaustion keeps the result
//! exact even across the heap's brief stale-minimum window after a decrease
//! (see the [`fibonacci`](crate::fibonacci) module docs): a state that was
//! settled through a stale minimum is simply requeued when a cheaper path to
//! it appears.
//!
//! # Example
//!
//! ```rust
//! use fibheap::pathfinding::{dijkstra, SearchNode};
//!
//! // Node carries its own goal
//! #[derive(Clone, PartialEq, Eq, Hash)]
//! struct Count {
//!     value: i32,
//!     goal: i32,
//! }
//!
//! impl SearchNode for Count {
//!     type Cost = u32;
//!
//!     fn successors(&self) -> Vec<(Self, u32)> {
//!         if self.value < 100 {
//!             vec![(Count { value: self.value + 1, goal: self.goal }, 1)]
//!         } else {
//!             vec![]
//!         }
//!     }
//!
//!     fn is_goal(&self) -> bool {
//!         self.value == self.goal
//!     }
//! }
//!
//! let result = dijkstra(&Count { value: 0, goal: 5 });
//! let (path, cost) = result.unwrap();
//! assert_eq!(cost, 5);
//! assert_eq!(path.len(), 6);
//! ```

use crate::fibonacci::{FibHandle, FibonacciHeap};
use rustc_hash::FxHashMap;
use std::hash::Hash;
use std::ops::Add;

/// Trait for types that can be used as costs in pathfinding algorithms.
///
/// This requires the type to be orderable, copyable, and support addition.
/// It also requires a zero value for initialization.
pub trait Cost: Ord + Copy + Add<Output = Self> + Default {}

impl<T> Cost for T where T: Ord + Copy + Add<Output = Self> + Default {}

/// Trait for nodes in a search graph.
///
/// Implement this trait for your node type to run [`dijkstra`]. The node
/// carries all context needed to generate successors and to check whether it
/// is a goal (e.g., the goal position itself).
pub trait SearchNode: Clone + Eq + Hash {
    /// The cost type for edge weights (e.g., u32, u64)
    type Cost: Cost;

    /// Returns all successor nodes along with the cost to reach them.
    ///
    /// This is where you define your graph structure. Each call should return
    /// all neighbors reachable from this node along with their edge costs.
    fn successors(&self) -> Vec<(Self, Self::Cost)>;

    /// Returns true if this node is a goal state.
    fn is_goal(&self) -> bool;
}

/// Open-set entry: orders by path cost, tie-broken by discovery index so the
/// heap sees a strict decrease whenever a state's cost improves.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct OpenEntry<C> {
    cost: C,
    index: usize,
}

/// Metadata tracked for each discovered state.
struct SearchEntry<N: SearchNode> {
    node: N,
    g_score: N::Cost,
    /// Heap handle while the state sits in the open set
    handle: Option<FibHandle>,
    /// Previous state index, for path reconstruction
    came_from: Option<usize>,
}

/// Runs Dijkstra's algorithm from the start node.
///
/// Relaxes every state reachable from `start` and returns the cheapest path
/// to a state whose `is_goal()` is true, as `Some((path, cost))` with the
/// path inclusive of both endpoints, or `None` when no goal is reachable.
///
/// The reachable state space must be finite and edge costs non-negative.
pub fn dijkstra<N: SearchNode>(start: &N) -> Option<(Vec<N>, N::Cost)> {
    let mut heap: FibonacciHeap<OpenEntry<N::Cost>> = FibonacciHeap::new();
    let mut entries: Vec<SearchEntry<N>> = Vec::new();
    let mut index_of: FxHashMap<N, usize> = FxHashMap::default();

    let start_handle = heap.insert(OpenEntry {
        cost: N::Cost::default(),
        index: 0,
    });
    entries.push(SearchEntry {
        node: start.clone(),
        g_score: N::Cost::default(),
        handle: Some(start_handle),
        came_from: None,
    });
    index_of.insert(start.clone(), 0);

    let mut best_goal: Option<(N::Cost, usize)> = None;

    while let Some(OpenEntry { cost, index }) = heap.extract_min() {
        if cost > entries[index].g_score {
            // Superseded while queued; a fresher entry is still in the heap.
            continue;
        }
        entries[index].handle = None;

        if entries[index].node.is_goal() {
            let improved = match best_goal {
                Some((best, _)) => cost < best,
                None => true,
            };
            if improved {
                best_goal = Some((cost, index));
            }
            continue;
        }

        let current = entries[index].node.clone();
        for (neighbor, edge_cost) in current.successors() {
            let tentative = cost + edge_cost;

            match index_of.get(&neighbor).copied() {
                None => {
                    let neighbor_index = entries.len();
                    index_of.insert(neighbor.clone(), neighbor_index);
                    let handle = heap.insert(OpenEntry {
                        cost: tentative,
                        index: neighbor_index,
                    });
                    entries.push(SearchEntry {
                        node: neighbor,
                        g_score: tentative,
                        handle: Some(handle),
                        came_from: Some(index),
                    });
                }
                Some(neighbor_index) => {
                    let entry = &mut entries[neighbor_index];
                    if tentative < entry.g_score {
                        entry.g_score = tentative;
                        entry.came_from = Some(index);
                        match entry.handle {
                            Some(handle) => {
                                heap.update_value(
                                    handle,
                                    OpenEntry {
                                        cost: tentative,
                                        index: neighbor_index,
                                    },
                                );
                            }
                            None => {
                                // Settled through a stale minimum; requeue.
                                entry.handle = Some(heap.insert(OpenEntry {
                                    cost: tentative,
                                    index: neighbor_index,
                                }));
                            }
                        }
                    }
                }
            }
        }
    }

    best_goal.map(|(cost, index)| (reconstruct_path(&entries, index), cost))
}

/// Walks the `came_from` chain back to the start.
fn reconstruct_path<N: SearchNode>(entries: &[SearchEntry<N>], mut index: usize) -> Vec<N> {
    let mut path = vec![entries[index].node.clone()];
    while let Some(prev) = entries[index].came_from {
        index = prev;
        path.push(entries[index].node.clone());
    }
    path.reverse();
    path
}
