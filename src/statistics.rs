use crate::algorithms::SearchResult;
use std::fmt;

/// Aggregated numbers for one simulation run, printed at the end.
#[derive(Debug, Clone)]
pub struct RunStatistics {
    pub algorithm: String,
    pub total_moves: usize,
    pub nodes_visited: usize,
    pub search_steps: usize,
    pub path_length: usize,
    pub optimal_path_length: usize,
    pub replans: usize,
    pub blocked_paths: usize,
    pub dynamic_obstacles: usize,
    pub route_efficiency: f64,
}

impl RunStatistics {
    pub fn new(algorithm: &str, optimal_path_length: usize) -> Self {
        RunStatistics {
            algorithm: algorithm.to_string(),
            total_moves: 0,
            nodes_visited: 0,
            search_steps: 0,
            path_length: 0,
            optimal_path_length,
            replans: 0,
            blocked_paths: 0,
            dynamic_obstacles: 0,
            route_efficiency: 0.0,
        }
    }

    pub fn record_search(&mut self, result: &SearchResult) {
        self.nodes_visited += result.visited_nodes.len();
        self.search_steps += result.steps;
        self.path_length = result.path_len();
    }

    /// Moves taken relative to the optimal hop count; 1.0 means the agent
    /// walked a shortest route despite the dynamics.
    pub fn calculate_efficiency(&mut self) {
        if self.total_moves > 0 && self.optimal_path_length > 0 {
            self.route_efficiency = self.total_moves as f64 / self.optimal_path_length as f64;
        } else {
            self.route_efficiency = 0.0;
        }
    }
}

impl fmt::Display for RunStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Algorithm: {}", self.algorithm)?;
        writeln!(f, "Total Moves: {}", self.total_moves)?;
        writeln!(f, "Optimal Path Length: {}", self.optimal_path_length)?;
        writeln!(f, "Last Path Length: {}", self.path_length)?;
        writeln!(f, "Nodes Visited: {}", self.nodes_visited)?;
        writeln!(f, "Search Steps: {}", self.search_steps)?;
        writeln!(f, "Replans: {}", self.replans)?;
        writeln!(f, "Blocked Paths: {}", self.blocked_paths)?;
        writeln!(f, "Dynamic Obstacles: {}", self.dynamic_obstacles)?;
        writeln!(f, "Route Efficiency: {:.3}", self.route_efficiency)?;
        if self.route_efficiency > 0.0 && self.route_efficiency < 1.0 {
            writeln!(
                f,
                "Note: fewer moves than the pre-obstacle optimal (markers moved or shortcut opened)"
            )?;
        }
        Ok(())
    }
}
