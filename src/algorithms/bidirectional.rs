use crate::algorithms::common::{SearchResult, SearchStrategy};
use crate::grid::Position;
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;

/// Simultaneous breadth-first search from both endpoints. Each outer
/// iteration expands one node per side; the first neighbor discovered by
/// one side that the other side has already visited is the meeting cell.
#[derive(Debug, Default)]
pub struct BidirectionalSearch;

impl BidirectionalSearch {
    pub fn new() -> Self {
        BidirectionalSearch
    }

    /// Join the two parent chains through the meeting cell. Both walks
    /// are bounded by the total number of discovered nodes, which any
    /// acyclic chain is shorter than.
    fn reconstruct(
        meeting: Position,
        parent_start: &FxHashMap<Position, Option<Position>>,
        parent_target: &FxHashMap<Position, Option<Position>>,
    ) -> Vec<Position> {
        let ceiling = parent_start.len() + parent_target.len() + 1;

        // start -> meeting, walked backwards then reversed.
        let mut path = vec![meeting];
        let mut current = meeting;
        for _ in 0..ceiling {
            match parent_start.get(&current) {
                Some(&Some(prev)) => {
                    path.push(prev);
                    current = prev;
                }
                _ => break,
            }
        }
        path.reverse();

        // meeting -> target, following the target-rooted chain forward.
        let mut current = meeting;
        for _ in 0..ceiling {
            match parent_target.get(&current) {
                Some(&Some(next)) => {
                    path.push(next);
                    current = next;
                }
                _ => break,
            }
        }
        path
    }
}

impl SearchStrategy for BidirectionalSearch {
    fn name(&self) -> &'static str {
        "Bidir"
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

        let mut queue_start = VecDeque::from([start]);
        let mut queue_target = VecDeque::from([target]);
        let mut frontier_start: FxHashSet<Position> = FxHashSet::from_iter([start]);
        let mut frontier_target: FxHashSet<Position> = FxHashSet::from_iter([target]);
        let mut parent_start: FxHashMap<Position, Option<Position>> = FxHashMap::default();
        let mut parent_target: FxHashMap<Position, Option<Position>> = FxHashMap::default();
        parent_start.insert(start, None);
        parent_target.insert(target, None);
        let mut visited_start: FxHashSet<Position> = FxHashSet::from_iter([start]);
        let mut visited_target: FxHashSet<Position> = FxHashSet::from_iter([target]);

        let mut visited_order = Vec::new();
        let mut frontier_history = Vec::new();
        let mut steps = 0;
        let mut meeting: Option<Position> = None;

        while !queue_start.is_empty() && !queue_target.is_empty() {
            steps += 1;

            // One expansion from the start side.
            let current = queue_start.pop_front().unwrap();
            frontier_start.remove(&current);
            visited_order.push(current);
            for neighbor in neighbors(current) {
                if visited_start.insert(neighbor) {
                    parent_start.insert(neighbor, Some(current));
                    queue_start.push_back(neighbor);
                    frontier_start.insert(neighbor);
                    if visited_target.contains(&neighbor) {
                        meeting = Some(neighbor);
                        break;
                    }
                }
            }
            if meeting.is_some() {
                break;
            }

            // One expansion from the target side.
            if let Some(current) = queue_target.pop_front() {
                frontier_target.remove(&current);
                visited_order.push(current);
                for neighbor in neighbors(current) {
                    if visited_target.insert(neighbor) {
                        parent_target.insert(neighbor, Some(current));
                        queue_target.push_back(neighbor);
                        frontier_target.insert(neighbor);
                        if visited_start.contains(&neighbor) {
                            meeting = Some(neighbor);
                            break;
                        }
                    }
                }
            }

            frontier_history.push(
                frontier_start
                    .iter()
                    .chain(frontier_target.iter())
                    .copied()
                    .collect(),
            );

            if meeting.is_some() {
                break;
            }
        }

        match meeting {
            Some(meeting) => {
                let path = Self::reconstruct(meeting, &parent_start, &parent_target);
                let message = format!(
                    "Path found! Length: {}, Visited: {} (Bidirectional)",
                    path.len(),
                    visited_order.len()
                );
                SearchResult::found(path, visited_order, frontier_history, steps, message)
            }
            None => {
                let message = format!("No path found. Visited: {} nodes", visited_order.len());
                SearchResult::not_found(visited_order, frontier_history, steps, message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::bfs::Bfs;
    use crate::algorithms::SearchStatus;
    use crate::grid::Grid;

    fn open_grid() -> Grid {
        let mut grid = Grid::new(10).unwrap();
        grid.initialize_default();
        grid
    }

    #[test]
    fn path_connects_both_endpoints() {
        let grid = open_grid();
        let neighbors = |p: Position| grid.get_neighbors(p);
        let result = BidirectionalSearch::new().search(
            grid.start_pos.unwrap(),
            grid.target_pos.unwrap(),
            &neighbors,
        );
        assert_eq!(result.status, SearchStatus::Found);
        let path = result.path.unwrap();
        assert_eq!(path[0], Position::new(1, 1));
        assert_eq!(*path.last().unwrap(), Position::new(8, 8));
        for pair in path.windows(2) {
            let dr = pair[1].row as i32 - pair[0].row as i32;
            let dc = pair[1].col as i32 - pair[0].col as i32;
            assert!(
                crate::grid::DIRECTIONS.contains(&(dr, dc)),
                "illegal step {:?} -> {:?}",
                pair[0],
                pair[1]
            );
        }
        // The meeting cell appears exactly once.
        let mut seen = FxHashSet::default();
        for &cell in &path {
            assert!(seen.insert(cell), "cell {:?} duplicated in path", cell);
        }
    }

    #[test]
    fn visits_no_more_than_bfs() {
        let grid = open_grid();
        let neighbors = |p: Position| grid.get_neighbors(p);
        let start = grid.start_pos.unwrap();
        let target = grid.target_pos.unwrap();
        let bfs_result = Bfs::new().search(start, target, &neighbors);
        let bi_result = BidirectionalSearch::new().search(start, target, &neighbors);
        assert!(bi_result.visited_nodes.len() <= bfs_result.visited_nodes.len());
    }

    #[test]
    fn separated_halves_are_not_found() {
        let mut grid = open_grid();
        for col in 0..10 {
            grid.add_wall(Position::new(5, col));
        }
        let neighbors = |p: Position| grid.get_neighbors(p);
        let result = BidirectionalSearch::new().search(
            grid.start_pos.unwrap(),
            grid.target_pos.unwrap(),
            &neighbors,
        );
        assert_eq!(result.status, SearchStatus::NotFound);
        assert!(result.path.is_none());
    }

    #[test]
    fn adjacent_endpoints_meet_immediately() {
        let mut grid = open_grid();
        grid.set_target(Position::new(1, 2));
        let neighbors = |p: Position| grid.get_neighbors(p);
        let result = BidirectionalSearch::new().search(
            grid.start_pos.unwrap(),
            grid.target_pos.unwrap(),
            &neighbors,
        );
        assert_eq!(result.status, SearchStatus::Found);
        let path = result.path.unwrap();
        assert_eq!(path, vec![Position::new(1, 1), Position::new(1, 2)]);
    }
}
