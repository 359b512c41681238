use crate::algorithms::common::{reconstruct_path, SearchResult, SearchStrategy};
use crate::grid::Position;
use rustc_hash::{FxHashMap, FxHashSet};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::f64::consts::SQRT_2;

/// Frontier entry ordered by cumulative path cost, with the insertion
/// counter as tie-break. `Ord` is reversed so `BinaryHeap` pops the
/// cheapest entry first.
#[derive(Debug, Clone, Copy, PartialEq)]
struct HeapEntry {
    cost: f64,
    counter: u64,
    pos: Position,
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.counter.cmp(&self.counter))
    }
}

/// Edge cost under the six-offset adjacency: 1 for orthogonal moves,
/// sqrt(2) for the two diagonals.
fn edge_cost(from: Position, to: Position) -> f64 {
    let dr = from.row.abs_diff(to.row);
    let dc = from.col.abs_diff(to.col);
    if dr == 1 && dc == 1 {
        SQRT_2
    } else {
        1.0
    }
}

/// Uniform-cost search: always expands the frontier node with the lowest
/// cumulative cost. A neighbor is re-enqueued whenever a strictly lower
/// cumulative cost is found, even if previously visited.
#[derive(Debug, Default)]
pub struct Ucs;

impl Ucs {
    pub fn new() -> Self {
        Ucs
    }

    /// Sum of edge costs along a path, as reported by this strategy.
    pub fn path_cost(path: &[Position]) -> f64 {
        path.windows(2).map(|w| edge_cost(w[0], w[1])).sum()
    }
}

impl SearchStrategy for Ucs {
    fn name(&self) -> &'static str {
        "UCS"
    }

    fn search(
        &mut self,
        start: Position,
        target: Position,
        neighbors: &dyn Fn(Position) -> Vec<Position>,
    ) -> SearchResult {
        let mut heap = BinaryHeap::new();
        let mut visited = FxHashSet::default();
        let mut parent: FxHashMap<Position, Option<Position>> = FxHashMap::default();
        let mut cost: FxHashMap<Position, f64> = FxHashMap::default();
        let mut counter: u64 = 0;

        heap.push(HeapEntry {
            cost: 0.0,
            counter,
            pos: start,
        });
        visited.insert(start);
        parent.insert(start, None);
        cost.insert(start, 0.0);

        let mut visited_order = Vec::new();
        let mut frontier_history = Vec::new();
        let mut steps = 0;

        while let Some(entry) = heap.pop() {
            let current = entry.pos;
            steps += 1;
            visited_order.push(current);
            frontier_history.push(heap.iter().map(|e| e.pos).collect());

            if current == target {
                let path = reconstruct_path(&parent, target);
                let message = format!(
                    "Path found! Length: {}, Cost: {:.3}, Visited: {}",
                    path.len(),
                    entry.cost,
                    visited_order.len()
                );
                return SearchResult::found(path, visited_order, frontier_history, steps, message);
            }

            let current_cost = cost.get(&current).copied().unwrap_or(f64::INFINITY);
            for neighbor in neighbors(current) {
                let new_cost = current_cost + edge_cost(current, neighbor);
                let known = cost.get(&neighbor).copied().unwrap_or(f64::INFINITY);
                // Relaxation: strictly cheaper routes re-enter the frontier.
                if !visited.contains(&neighbor) || new_cost < known {
                    visited.insert(neighbor);
                    parent.insert(neighbor, Some(current));
                    cost.insert(neighbor, new_cost);
                    counter += 1;
                    heap.push(HeapEntry {
                        cost: new_cost,
                        counter,
                        pos: neighbor,
                    });
                }
            }
        }

        let message = format!("No path found. Visited: {} nodes", visited_order.len());
        SearchResult::not_found(visited_order, frontier_history, steps, message)
    }
}
