use crate::algorithms::{SearchResult, SearchStatus, SearchStrategy};
use crate::grid::{Grid, Position};
use rand::Rng;
use std::fmt;

/// Counters kept by the coordinator across a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvironmentStats {
    pub replan_count: usize,
    pub blocked_paths: usize,
    pub dynamic_obstacles: usize,
}

impl fmt::Display for EnvironmentStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Replans: {} | Blocked paths: {} | Dynamic obstacles: {}",
            self.replan_count, self.blocked_paths, self.dynamic_obstacles
        )
    }
}

/// Watches a computed path against the live grid and re-invokes search
/// when the path stops being walkable. Owns the replan and blocked-path
/// counters; borrows the grid per call.
#[derive(Debug, Default)]
pub struct DynamicEnvironment {
    replan_count: usize,
    blocked_paths: usize,
}

impl DynamicEnvironment {
    pub fn new() -> Self {
        DynamicEnvironment::default()
    }

    /// Passthrough to the grid's obstacle roll, so the orchestration loop
    /// only talks to the coordinator during the dynamic phase.
    pub fn spawn_dynamic_obstacle(
        &self,
        grid: &mut Grid,
        rng: &mut impl Rng,
    ) -> Option<Position> {
        grid.spawn_dynamic_obstacle(rng)
    }

    /// Scan the path from `from_index` onward for any cell that is no
    /// longer walkable. A detection bumps the blocked-path counter even
    /// when the caller decides not to replan.
    pub fn check_path_blocked(
        &mut self,
        grid: &Grid,
        path: &[Position],
        from_index: usize,
    ) -> bool {
        if path.is_empty() || from_index >= path.len() {
            return false;
        }
        for &pos in &path[from_index..] {
            if !grid.is_walkable(pos) {
                self.blocked_paths += 1;
                return true;
            }
        }
        false
    }

    /// Decide whether the agent at `agent_pos` can keep following
    /// `result`. Replanning is needed when the agent has drifted off the
    /// path, when any remaining path cell is blocked, or when the single
    /// next cell is blocked (kept as its own check even though the scan
    /// above already covers it; the reported reason differs).
    pub fn replan_needed(
        &mut self,
        grid: &Grid,
        result: &SearchResult,
        agent_pos: Position,
    ) -> bool {
        if result.status != SearchStatus::Found {
            return false;
        }
        let Some(path) = result.path.as_ref() else {
            return false;
        };

        let Some(agent_index) = path.iter().position(|&p| p == agent_pos) else {
            // Agent is not on the known path at all.
            return true;
        };

        if self.check_path_blocked(grid, path, agent_index + 1) {
            return true;
        }

        let next_index = agent_index + 1;
        if next_index < path.len() && !grid.is_walkable(path[next_index]) {
            return true;
        }

        false
    }

    /// Re-run `strategy` from the agent's position toward the grid's
    /// current target. The replan counter increments unconditionally,
    /// even when the new search fails too.
    pub fn trigger_replan(
        &mut self,
        grid: &mut Grid,
        agent_pos: Position,
        strategy: &mut dyn SearchStrategy,
    ) -> SearchResult {
        self.replan_count += 1;
        grid.clear_search_visualization();

        let Some(target) = grid.target_pos else {
            log::error!("Cannot replan: no target set on the grid");
            return SearchResult::not_found(
                Vec::new(),
                Vec::new(),
                0,
                "Cannot replan: target not set".to_string(),
            );
        };

        log::info!(
            "Replanning with {} from ({}, {})",
            strategy.name(),
            agent_pos.row,
            agent_pos.col
        );
        let neighbors = |p: Position| grid.get_neighbors(p);
        strategy.search(agent_pos, target, &neighbors)
    }

    pub fn stats(&self, grid: &Grid) -> EnvironmentStats {
        EnvironmentStats {
            replan_count: self.replan_count,
            blocked_paths: self.blocked_paths,
            dynamic_obstacles: grid.dynamic_obstacle_count(),
        }
    }

    pub fn replan_count(&self) -> usize {
        self.replan_count
    }

    pub fn blocked_paths(&self) -> usize {
        self.blocked_paths
    }

    pub fn reset(&mut self) {
        self.replan_count = 0;
        self.blocked_paths = 0;
    }
}
