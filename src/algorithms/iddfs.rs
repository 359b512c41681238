use crate::algorithms::common::{reconstruct_path, SearchResult, SearchStrategy};
use crate::grid::Position;
use rustc_hash::{FxHashMap, FxHashSet};

pub const DEFAULT_MAX_DEPTH: usize = 100;

/// Iterative deepening: depth-bounded sweeps at limits 0, 1, 2, ... up to
/// `max_depth`, each restarted from scratch. Visited order, frontier
/// history, and the step counter accumulate across every sweep.
#[derive(Debug)]
pub struct Iddfs {
    pub max_depth: usize,
}

impl Iddfs {
    pub fn new(max_depth: usize) -> Self {
        Iddfs { max_depth }
    }
}

impl Default for Iddfs {
    fn default() -> Self {
        Iddfs::new(DEFAULT_MAX_DEPTH)
    }
}

impl SearchStrategy for Iddfs {
    fn name(&self) -> &'static str {
        "IDDFS"
    }

    fn search(
        &mut self,
        start: Position,
        target: Position,
        neighbors: &dyn Fn(Position) -> Vec<Position>,
    ) -> SearchResult {
        if start == target {
            return SearchResult::found(
                vec![start],
                vec![start],
                vec![Vec::new()],
                1,
                "Start is target!".to_string(),
            );
        }

        let mut all_visited_order = Vec::new();
        let mut all_frontier_history = Vec::new();
        let mut total_steps = 0;

        for depth_limit in 0..=self.max_depth {
            // Fresh per-sweep state; only the cumulative trackers persist.
            let mut iteration_visited = FxHashSet::default();
            let mut parent: FxHashMap<Position, Option<Position>> = FxHashMap::default();
            parent.insert(start, None);
            let mut stack = vec![(start, 0usize)];
            let mut found_path: Option<Vec<Position>> = None;

            while let Some((node, depth)) = stack.pop() {
                total_steps += 1;
                if iteration_visited.insert(node) {
                    all_visited_order.push(node);
                }
                all_frontier_history.push(stack.iter().map(|&(n, _)| n).collect());

                if node == target {
                    found_path = Some(reconstruct_path(&parent, target));
                    break;
                }
                if depth >= depth_limit {
                    continue;
                }

                for neighbor in neighbors(node).into_iter().rev() {
                    if !iteration_visited.contains(&neighbor) && !parent.contains_key(&neighbor) {
                        parent.insert(neighbor, Some(node));
                        stack.push((neighbor, depth + 1));
                    }
                }
            }

            if let Some(path) = found_path {
                let message = format!(
                    "Path found at depth {}! Length: {}, Total Visited: {}",
                    depth_limit,
                    path.len(),
                    all_visited_order.len()
                );
                return SearchResult::found(
                    path,
                    all_visited_order,
                    all_frontier_history,
                    total_steps,
                    message,
                );
            }
        }

        let message = format!(
            "No path found within max depth {}. Total Visited: {}",
            self.max_depth,
            all_visited_order.len()
        );
        SearchResult::not_found(
            all_visited_order,
            all_frontier_history,
            total_steps,
            message,
        )
    }
}
