use crate::algorithms::common::{reconstruct_path, SearchResult, SearchStrategy};
use crate::grid::Position;
use rustc_hash::{FxHashMap, FxHashSet};

/// Depth-first search over a LIFO frontier. Neighbors are pushed in
/// reverse of the fixed offset order so pops come out in forward
/// clockwise order. No shortest-path guarantee.
#[derive(Debug, Default)]
pub struct Dfs;

impl Dfs {
    pub fn new() -> Self {
        Dfs
    }
}

impl SearchStrategy for Dfs {
    fn name(&self) -> &'static str {
        "DFS"
    }

    fn search(
        &mut self,
        start: Position,
        target: Position,
        neighbors: &dyn Fn(Position) -> Vec<Position>,
    ) -> SearchResult {
        let mut stack = vec![start];
        let mut visited = FxHashSet::default();
        let mut parent: FxHashMap<Position, Option<Position>> = FxHashMap::default();
        visited.insert(start);
        parent.insert(start, None);

        let mut visited_order = Vec::new();
        let mut frontier_history = Vec::new();
        let mut steps = 0;

        while let Some(current) = stack.pop() {
            steps += 1;
            visited_order.push(current);
            frontier_history.push(stack.clone());

            if current == target {
                let path = reconstruct_path(&parent, target);
                let message = format!(
                    "Path found! Length: {}, Visited: {}",
                    path.len(),
                    visited_order.len()
                );
                return SearchResult::found(path, visited_order, frontier_history, steps, message);
            }

            for neighbor in neighbors(current).into_iter().rev() {
                if visited.insert(neighbor) {
                    parent.insert(neighbor, Some(current));
                    stack.push(neighbor);
                }
            }
        }

        let message = format!("No path found. Visited: {} nodes", visited_order.len());
        SearchResult::not_found(visited_order, frontier_history, steps, message)
    }
}
