use crate::grid::Position;

/// Lifecycle of a single search invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    Idle,
    Running,
    Found,
    NotFound,
    Blocked,
}

/// Immutable snapshot produced by one `search` call. The caller owns it;
/// strategies keep no reference to past results.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Start-to-target cell sequence, absent on failure.
    pub path: Option<Vec<Position>>,
    /// Cells in the order they were expanded.
    pub visited_nodes: Vec<Position>,
    /// One frontier snapshot per expansion, for progressive visualization.
    pub frontier_nodes: Vec<Vec<Position>>,
    pub steps: usize,
    pub status: SearchStatus,
    pub message: String,
}

impl SearchResult {
    pub fn found(
        path: Vec<Position>,
        visited_nodes: Vec<Position>,
        frontier_nodes: Vec<Vec<Position>>,
        steps: usize,
        message: String,
    ) -> Self {
        SearchResult {
            path: Some(path),
            visited_nodes,
            frontier_nodes,
            steps,
            status: SearchStatus::Found,
            message,
        }
    }

    pub fn not_found(
        visited_nodes: Vec<Position>,
        frontier_nodes: Vec<Vec<Position>>,
        steps: usize,
        message: String,
    ) -> Self {
        SearchResult {
            path: None,
            visited_nodes,
            frontier_nodes,
            steps,
            status: SearchStatus::NotFound,
            message,
        }
    }

    pub fn path_len(&self) -> usize {
        self.path.as_ref().map_or(0, |p| p.len())
    }
}

/// Contract shared by all six traversal strategies. `neighbors` is the
/// grid's bounds-checked, walkability-filtered enumeration; it must be
/// pure with respect to the grid snapshot for the duration of the call.
pub trait SearchStrategy {
    fn name(&self) -> &'static str;

    fn search(
        &mut self,
        start: Position,
        target: Position,
        neighbors: &dyn Fn(Position) -> Vec<Position>,
    ) -> SearchResult;
}

/// Walk a parent map (`None` marks the root) from `target` back to the
/// root and return the start-to-target sequence. The walk is bounded by
/// the number of discovered nodes, which no acyclic chain can exceed.
pub(crate) fn reconstruct_path(
    parent: &rustc_hash::FxHashMap<Position, Option<Position>>,
    target: Position,
) -> Vec<Position> {
    let mut path = vec![target];
    let mut current = target;
    let ceiling = parent.len() + 1;
    for _ in 0..ceiling {
        match parent.get(&current) {
            Some(&Some(prev)) => {
                path.push(prev);
                current = prev;
            }
            _ => break,
        }
    }
    path.reverse();
    path
}
