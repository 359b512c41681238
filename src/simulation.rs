use crate::algorithms::{
    Bfs, BidirectionalSearch, Dfs, Dls, Iddfs, SearchResult, SearchStatus, SearchStrategy, Ucs,
};
use crate::config::Config;
use crate::grid::{CellState, Grid, Position};
use crate::replan::DynamicEnvironment;
use crate::statistics::RunStatistics;
use pathfinding::prelude::astar;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::thread;
use std::time::Duration;

const MAX_STUCK_ATTEMPTS: usize = 5;

/// Build the strategy the CLI asked for. Depth limits come from the
/// config; everything else is parameter-free.
pub fn build_strategy(config: &Config) -> Result<Box<dyn SearchStrategy>, String> {
    match config.algorithm.as_str() {
        "bfs" => Ok(Box::new(Bfs::new())),
        "dfs" => Ok(Box::new(Dfs::new())),
        "ucs" => Ok(Box::new(Ucs::new())),
        "dls" => Ok(Box::new(Dls::new(config.depth_limit))),
        "iddfs" => Ok(Box::new(Iddfs::new(config.max_depth))),
        "bidir" => Ok(Box::new(BidirectionalSearch::new())),
        other => Err(format!(
            "Unknown algorithm '{}'. Use bfs, dfs, ucs, dls, iddfs, bidir, or all",
            other
        )),
    }
}

/// One line of the `--algorithm all` comparison table.
#[derive(Debug, Clone)]
pub struct ComparisonRow {
    pub name: &'static str,
    pub status: SearchStatus,
    pub path_length: usize,
    pub path_cost: f64,
    pub nodes_visited: usize,
    pub steps: usize,
}

/// Drives one strategy over a live grid: initial search, agent walk,
/// obstacle spawning, and replanning, with optional terminal rendering.
pub struct Simulation {
    grid: Grid,
    env: DynamicEnvironment,
    strategy: Box<dyn SearchStrategy>,
    config: Config,
    rng: StdRng,
    optimal_path_length: usize,
}

impl Simulation {
    pub fn new(config: Config) -> Result<Self, String> {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut grid = Grid::with_obstacle_settings(
            config.grid_size,
            config.obstacle_probability,
            config.max_obstacles,
        )
        .map_err(|e| e.to_string())?;
        grid.initialize_default();
        grid.randomize_walls(config.wall_density, &mut rng);

        let optimal_path_length = Self::optimal_hop_count(&grid)
            .ok_or("No valid path exists from start to target! Try reducing --wall-density")?;

        let strategy = build_strategy(&config)?;

        Ok(Simulation {
            grid,
            env: DynamicEnvironment::new(),
            strategy,
            config,
            rng,
            optimal_path_length,
        })
    }

    /// Reference shortest hop count over the current walls, via the
    /// `pathfinding` crate. `None` when start and target are separated.
    fn optimal_hop_count(grid: &Grid) -> Option<usize> {
        let start = grid.start_pos?;
        let target = grid.target_pos?;
        let result = astar(
            &start,
            |&p| {
                grid.get_neighbors(p)
                    .into_iter()
                    .map(|n| (n, 1u32))
                    .collect::<Vec<_>>()
            },
            |&p| {
                // Each hop changes row and column by at most one, so the
                // larger coordinate gap never overestimates.
                p.row.abs_diff(target.row).max(p.col.abs_diff(target.col)) as u32
            },
            |&p| p == target,
        );
        result.map(|(path, _)| path.len().saturating_sub(1))
    }

    pub fn run(&mut self) -> RunStatistics {
        let mut stats = RunStatistics::new(self.strategy.name(), self.optimal_path_length);
        let start = self.grid.start_pos.expect("markers set at construction");
        let target = self.grid.target_pos.expect("markers set at construction");

        self.grid.clear_search_visualization();
        self.env.reset();

        let neighbors = |p: Position| self.grid.get_neighbors(p);
        let mut result = self.strategy.search(start, target, &neighbors);
        log::info!("{}", result.message);
        stats.record_search(&result);
        self.overlay_result(&result);

        let mut agent_pos = start;
        let mut stuck_attempts = 0;
        let mut total_iterations = 0;
        let max_iterations = self.grid.size * self.grid.size * 4;

        if !self.config.no_visualization {
            self.render(agent_pos, &result, stats.total_moves, total_iterations);
            thread::sleep(Duration::from_millis(self.config.delay_ms));
        }

        while agent_pos != target {
            total_iterations += 1;
            if total_iterations > max_iterations {
                log::error!("Iteration ceiling reached; aborting run");
                break;
            }

            if let Some(pos) = self.env.spawn_dynamic_obstacle(&mut self.grid, &mut self.rng) {
                log::debug!("Dynamic obstacle spawned at ({}, {})", pos.row, pos.col);
            }

            if result.status != SearchStatus::Found
                || self.env.replan_needed(&self.grid, &result, agent_pos)
            {
                result = self
                    .env
                    .trigger_replan(&mut self.grid, agent_pos, self.strategy.as_mut());
                stats.record_search(&result);
                self.overlay_result(&result);

                if result.status != SearchStatus::Found {
                    stuck_attempts += 1;
                    stats.total_moves += 1; // waiting costs a move
                    if stuck_attempts > MAX_STUCK_ATTEMPTS {
                        log::warn!(
                            "Agent permanently stuck at ({}, {}) after {} attempts",
                            agent_pos.row,
                            agent_pos.col,
                            MAX_STUCK_ATTEMPTS
                        );
                        break;
                    }
                    if !self.config.quiet {
                        println!(
                            "Agent stuck at ({}, {}) - waiting... (attempt {}/{})",
                            agent_pos.row, agent_pos.col, stuck_attempts, MAX_STUCK_ATTEMPTS
                        );
                    }
                    continue;
                }
                stuck_attempts = 0;
            }

            // Step to the next path cell.
            let path = result.path.as_ref().expect("FOUND result carries a path");
            let agent_index = path
                .iter()
                .position(|&p| p == agent_pos)
                .unwrap_or_default();
            match path.get(agent_index + 1) {
                Some(&next) => {
                    agent_pos = next;
                    stats.total_moves += 1;
                }
                None => break, // path exhausted at the target
            }

            if !self.config.no_visualization {
                self.render(agent_pos, &result, stats.total_moves, total_iterations);
                thread::sleep(Duration::from_millis(self.config.delay_ms));
            }
        }

        let env_stats = self.env.stats(&self.grid);
        stats.replans = env_stats.replan_count;
        stats.blocked_paths = env_stats.blocked_paths;
        stats.dynamic_obstacles = env_stats.dynamic_obstacles;
        stats.calculate_efficiency();

        if !self.config.quiet {
            println!("\n=== SIMULATION COMPLETE ===");
            if agent_pos == target {
                println!("SUCCESS: Agent reached the target!");
            } else {
                println!("FAILED: Agent did not reach the target");
            }
            self.print_grid(Some(agent_pos));
        }

        stats
    }

    /// Run every strategy once over identical walls (shared seed), with
    /// no dynamics, and collect the comparison rows. Returns the seed so
    /// the caller can rebuild the same environment.
    pub fn run_all_algorithms(config: &Config) -> Result<(u64, Vec<ComparisonRow>), String> {
        let seed = config.seed.unwrap_or_else(rand::random);
        if !config.quiet {
            println!("Environment seed: {} (for reproducibility)", seed);
        }

        let strategies: Vec<Box<dyn SearchStrategy>> = vec![
            Box::new(Bfs::new()),
            Box::new(Dfs::new()),
            Box::new(Ucs::new()),
            Box::new(Dls::new(config.depth_limit)),
            Box::new(Iddfs::new(config.max_depth)),
            Box::new(BidirectionalSearch::new()),
        ];

        let mut rows = Vec::new();
        for mut strategy in strategies {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut grid = Grid::with_obstacle_settings(
                config.grid_size,
                config.obstacle_probability,
                config.max_obstacles,
            )
            .map_err(|e| e.to_string())?;
            grid.initialize_default();
            grid.randomize_walls(config.wall_density, &mut rng);

            let start = grid.start_pos.unwrap();
            let target = grid.target_pos.unwrap();
            let neighbors = |p: Position| grid.get_neighbors(p);
            let result = strategy.search(start, target, &neighbors);

            let path_cost = result
                .path
                .as_ref()
                .map(|p| Ucs::path_cost(p))
                .unwrap_or(0.0);
            rows.push(ComparisonRow {
                name: strategy.name(),
                status: result.status,
                path_length: result.path_len(),
                path_cost,
                nodes_visited: result.visited_nodes.len(),
                steps: result.steps,
            });
        }
        Ok((seed, rows))
    }

    pub fn print_comparison_results(rows: &[ComparisonRow], optimal: Option<usize>) {
        println!("\n=== ALGORITHM COMPARISON RESULTS ===\n");
        println!(
            "{:<8} {:<10} {:<10} {:<10} {:<10} {:<8}",
            "Name", "Status", "Path Len", "Cost", "Visited", "Steps"
        );
        println!("{}", "-".repeat(60));
        for row in rows {
            println!(
                "{:<8} {:<10} {:<10} {:<10.3} {:<10} {:<8}",
                row.name,
                format!("{:?}", row.status),
                row.path_length,
                row.path_cost,
                row.nodes_visited,
                row.steps
            );
        }
        if let Some(optimal) = optimal {
            println!("\nOptimal hop count (A* reference): {}", optimal);
        }
    }

    /// Reference optimal for the comparison table, computed on a grid
    /// rebuilt from the same seed.
    pub fn comparison_optimal(config: &Config, seed: u64) -> Option<usize> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut grid = Grid::with_obstacle_settings(
            config.grid_size,
            config.obstacle_probability,
            config.max_obstacles,
        )
        .ok()?;
        grid.initialize_default();
        grid.randomize_walls(config.wall_density, &mut rng);
        Self::optimal_hop_count(&grid)
    }

    /// Paint explored/frontier/path overlays from a result onto the grid.
    fn overlay_result(&mut self, result: &SearchResult) {
        self.grid.clear_search_visualization();
        for &pos in &result.visited_nodes {
            self.grid.mark_explored(pos);
        }
        if let Some(frontier) = result.frontier_nodes.last() {
            for &pos in frontier {
                self.grid.mark_frontier(pos);
            }
        }
        if let Some(path) = &result.path {
            self.grid.mark_path(path);
        }
    }

    fn render(
        &self,
        agent_pos: Position,
        result: &SearchResult,
        moves: usize,
        iteration: usize,
    ) {
        self.clear_screen();
        println!("=== PATHFINDING SIMULATION ===");
        println!(
            "Algorithm: {} | Step: {} | Moves: {} | Obstacles: {} | Replans: {}",
            self.strategy.name(),
            iteration,
            moves,
            self.grid.dynamic_obstacle_count(),
            self.env.replan_count(),
        );
        println!("Optimal path length (A*): {}", self.optimal_path_length);
        println!("{}", result.message);
        self.print_grid(Some(agent_pos));
    }

    fn print_grid(&self, agent_pos: Option<Position>) {
        println!("Legend: S=Start, T=Target, A=Agent, #=Wall, O=Obstacle, *=Path, +=Frontier, ~=Explored");
        print!("   ");
        for col in 0..self.grid.size {
            print!("{:2}", col % 10);
        }
        println!();
        for row in 0..self.grid.size {
            print!("{:2} ", row);
            for col in 0..self.grid.size {
                let pos = Position::new(row, col);
                let glyph = if Some(pos) == agent_pos {
                    'A'
                } else {
                    match self.grid.get_cell_state(pos) {
                        CellState::Start => 'S',
                        CellState::Target => 'T',
                        CellState::Wall => '#',
                        CellState::DynamicObstacle => 'O',
                        CellState::Path => '*',
                        CellState::Frontier => '+',
                        CellState::Explored => '~',
                        CellState::Empty => '.',
                    }
                };
                print!("{} ", glyph);
            }
            println!();
        }
        println!();
    }

    fn clear_screen(&self) {
        print!("\x1B[2J\x1B[1;1H");
    }
}
