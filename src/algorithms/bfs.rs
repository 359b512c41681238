use crate::algorithms::common::{reconstruct_path, SearchResult, SearchStrategy};
use crate::grid::Position;
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;

/// Breadth-first search. Level-by-level expansion over a FIFO frontier
/// guarantees a shortest path by hop count (diagonal and orthogonal moves
/// both count as one hop).
#[derive(Debug, Default)]
pub struct Bfs;

impl Bfs {
    pub fn new() -> Self {
        Bfs
    }
}

impl SearchStrategy for Bfs {
    fn name(&self) -> &'static str {
        "BFS"
    }

    fn search(
        &mut self,
        start: Position,
        target: Position,
        neighbors: &dyn Fn(Position) -> Vec<Position>,
    ) -> SearchResult {
        let mut queue = VecDeque::from([start]);
        let mut visited = FxHashSet::default();
        let mut parent: FxHashMap<Position, Option<Position>> = FxHashMap::default();
        visited.insert(start);
        parent.insert(start, None);

        let mut visited_order = Vec::new();
        let mut frontier_history = Vec::new();
        let mut steps = 0;

        while let Some(current) = queue.pop_front() {
            steps += 1;
            visited_order.push(current);
            frontier_history.push(queue.iter().copied().collect());

            // Target test happens on dequeue, not on discovery.
            if current == target {
                let path = reconstruct_path(&parent, target);
                let message = format!(
                    "Path found! Length: {}, Visited: {}",
                    path.len(),
                    visited_order.len()
                );
                return SearchResult::found(path, visited_order, frontier_history, steps, message);
            }

            for neighbor in neighbors(current) {
                if visited.insert(neighbor) {
                    parent.insert(neighbor, Some(current));
                    queue.push_back(neighbor);
                }
            }
        }

        let message = format!("No path found. Visited: {} nodes", visited_order.len());
        SearchResult::not_found(visited_order, frontier_history, steps, message)
    }
}
