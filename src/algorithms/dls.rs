use crate::algorithms::common::{reconstruct_path, SearchResult, SearchStrategy};
use crate::grid::Position;
use rustc_hash::{FxHashMap, FxHashSet};

pub const DEFAULT_DEPTH_LIMIT: usize = 20;

/// Depth-limited search: depth-first descent that refuses to expand any
/// node past `depth_limit`. Cycle-safe within one attempt because a cell
/// enters the parent map at discovery and is never re-discovered.
#[derive(Debug)]
pub struct Dls {
    pub depth_limit: usize,
}

impl Dls {
    pub fn new(depth_limit: usize) -> Self {
        Dls { depth_limit }
    }
}

impl Default for Dls {
    fn default() -> Self {
        Dls::new(DEFAULT_DEPTH_LIMIT)
    }
}

struct DlsRun<'a> {
    neighbors: &'a dyn Fn(Position) -> Vec<Position>,
    target: Position,
    depth_limit: usize,
    visited: FxHashSet<Position>,
    parent: FxHashMap<Position, Option<Position>>,
    visited_order: Vec<Position>,
    frontier_history: Vec<Vec<Position>>,
    steps: usize,
}

impl DlsRun<'_> {
    /// Returns true once the target is reached. Depth is checked after
    /// the target test, so a hit exactly at the limit still counts.
    fn walk(&mut self, node: Position, depth: usize) -> bool {
        self.steps += 1;
        if self.visited.insert(node) {
            self.visited_order.push(node);
        }
        self.frontier_history.push(Vec::new());

        if node == self.target {
            return true;
        }
        if depth >= self.depth_limit {
            return false;
        }

        for neighbor in (self.neighbors)(node) {
            if !self.visited.contains(&neighbor) && !self.parent.contains_key(&neighbor) {
                self.parent.insert(neighbor, Some(node));
                if self.walk(neighbor, depth + 1) {
                    return true;
                }
            }
        }
        false
    }
}

impl SearchStrategy for Dls {
    fn name(&self) -> &'static str {
        "DLS"
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

        let mut run = DlsRun {
            neighbors,
            target,
            depth_limit: self.depth_limit,
            visited: FxHashSet::default(),
            parent: FxHashMap::default(),
            visited_order: Vec::new(),
            frontier_history: Vec::new(),
            steps: 0,
        };
        run.parent.insert(start, None);

        if run.walk(start, 0) {
            let path = reconstruct_path(&run.parent, target);
            let message = format!(
                "Path found within depth {}! Length: {}, Visited: {}",
                self.depth_limit,
                path.len(),
                run.visited_order.len()
            );
            SearchResult::found(
                path,
                run.visited_order,
                run.frontier_history,
                run.steps,
                message,
            )
        } else {
            let message = format!(
                "No path found within depth {}. Visited: {} nodes",
                self.depth_limit,
                run.visited_order.len()
            );
            SearchResult::not_found(
                run.visited_order,
                run.frontier_history,
                run.steps,
                message,
            )
        }
    }
}
