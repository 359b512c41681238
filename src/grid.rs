use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;
use thiserror::Error;

/// Default chance per tick that a dynamic obstacle appears.
pub const DEFAULT_OBSTACLE_PROBABILITY: f64 = 0.03;
/// Default upper bound on concurrently live dynamic obstacles.
pub const DEFAULT_MAX_DYNAMIC_OBSTACLES: usize = 50;

/// Movement offsets in clockwise order: Up, Right, Down, Down-Right,
/// Left, Up-Left. Up-Right and Down-Left are intentionally excluded;
/// the grid is not 8-connected. The order is load-bearing: it fixes the
/// expansion order of every search strategy.
pub const DIRECTIONS: [(i32, i32); 6] = [
    (-1, 0),  // Up
    (0, 1),   // Right
    (1, 0),   // Down
    (1, 1),   // Down-Right (diagonal)
    (0, -1),  // Left
    (-1, -1), // Up-Left (diagonal)
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }

    /// Apply a direction offset, returning `None` when it would leave
    /// the `size` x `size` board.
    pub fn offset(&self, (dr, dc): (i32, i32), size: usize) -> Option<Position> {
        let row = self.row as i32 + dr;
        let col = self.col as i32 + dc;
        if row >= 0 && row < size as i32 && col >= 0 && col < size as i32 {
            Some(Position::new(row as usize, col as usize))
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    Empty,
    Wall,
    Start,
    Target,
    Frontier,
    Explored,
    Path,
    DynamicObstacle,
}

#[derive(Debug, Error)]
pub enum GridError {
    #[error("grid size must be positive, got {0}")]
    InvalidSize(usize),
    #[error("obstacle probability must be within [0, 1], got {0}")]
    InvalidProbability(f64),
}

/// The search environment: a square board of cell states plus the
/// bookkeeping sets for static walls and dynamic obstacles.
///
/// Mutation entry points return a success flag instead of erroring;
/// rejected edits are logged and leave the grid untouched.
pub struct Grid {
    pub size: usize,
    cells: Vec<Vec<CellState>>,
    pub start_pos: Option<Position>,
    pub target_pos: Option<Position>,
    dynamic_obstacles: HashSet<Position>,
    static_walls: HashSet<Position>,
    obstacle_probability: f64,
    max_dynamic_obstacles: usize,
}

impl Grid {
    pub fn new(size: usize) -> Result<Self, GridError> {
        Self::with_obstacle_settings(
            size,
            DEFAULT_OBSTACLE_PROBABILITY,
            DEFAULT_MAX_DYNAMIC_OBSTACLES,
        )
    }

    /// Construct with explicit dynamic-obstacle tuning. Both values are
    /// validated here so no partially configured grid ever exists.
    pub fn with_obstacle_settings(
        size: usize,
        obstacle_probability: f64,
        max_dynamic_obstacles: usize,
    ) -> Result<Self, GridError> {
        if size == 0 {
            log::error!("Rejected grid construction: size {} is not positive", size);
            return Err(GridError::InvalidSize(size));
        }
        if !(0.0..=1.0).contains(&obstacle_probability) {
            log::error!(
                "Rejected grid construction: obstacle probability {} out of range",
                obstacle_probability
            );
            return Err(GridError::InvalidProbability(obstacle_probability));
        }
        Ok(Grid {
            size,
            cells: vec![vec![CellState::Empty; size]; size],
            start_pos: None,
            target_pos: None,
            dynamic_obstacles: HashSet::new(),
            static_walls: HashSet::new(),
            obstacle_probability,
            max_dynamic_obstacles,
        })
    }

    /// Place the default markers: start near one corner, target near the
    /// opposite one.
    pub fn initialize_default(&mut self) {
        let start = Position::new(1, 1);
        let target = Position::new(self.size - 2, self.size - 2);
        self.start_pos = Some(start);
        self.target_pos = Some(target);
        self.cells[start.row][start.col] = CellState::Start;
        self.cells[target.row][target.col] = CellState::Target;
    }

    pub fn is_valid_position(&self, pos: Position) -> bool {
        pos.row < self.size && pos.col < self.size
    }

    pub fn set_start(&mut self, pos: Position) -> bool {
        if !self.is_valid_position(pos) {
            log::error!(
                "Cannot set start: position out of bounds ({}, {})",
                pos.row,
                pos.col
            );
            return false;
        }
        if Some(pos) == self.target_pos {
            log::warn!("Cannot set start: start and target cannot be the same");
            return false;
        }
        if let Some(old) = self.start_pos {
            self.cells[old.row][old.col] = CellState::Empty;
        }
        self.start_pos = Some(pos);
        self.cells[pos.row][pos.col] = CellState::Start;
        true
    }

    pub fn set_target(&mut self, pos: Position) -> bool {
        if !self.is_valid_position(pos) {
            log::error!(
                "Cannot set target: position out of bounds ({}, {})",
                pos.row,
                pos.col
            );
            return false;
        }
        if Some(pos) == self.start_pos {
            log::warn!("Cannot set target: start and target cannot be the same");
            return false;
        }
        if let Some(old) = self.target_pos {
            self.cells[old.row][old.col] = CellState::Empty;
        }
        self.target_pos = Some(pos);
        self.cells[pos.row][pos.col] = CellState::Target;
        true
    }

    pub fn add_wall(&mut self, pos: Position) -> bool {
        if !self.is_valid_position(pos) {
            return false;
        }
        if Some(pos) == self.start_pos || Some(pos) == self.target_pos {
            log::warn!(
                "Cannot add wall at ({}, {}): position is start or target",
                pos.row,
                pos.col
            );
            return false;
        }
        // Walls and dynamic obstacles stay disjoint.
        if self.dynamic_obstacles.contains(&pos) {
            return false;
        }
        self.cells[pos.row][pos.col] = CellState::Wall;
        self.static_walls.insert(pos);
        true
    }

    pub fn remove_wall(&mut self, pos: Position) -> bool {
        if !self.is_valid_position(pos) {
            return false;
        }
        if self.cells[pos.row][pos.col] == CellState::Wall {
            self.cells[pos.row][pos.col] = CellState::Empty;
            self.static_walls.remove(&pos);
            return true;
        }
        false
    }

    pub fn clear_walls(&mut self) {
        for row in 0..self.size {
            for col in 0..self.size {
                if self.cells[row][col] == CellState::Wall {
                    self.cells[row][col] = CellState::Empty;
                }
            }
        }
        self.static_walls.clear();
    }

    /// Roll for a new dynamic obstacle. With probability
    /// `obstacle_probability`, and only while below the cap, one uniformly
    /// chosen EMPTY non-marker cell becomes an obstacle.
    pub fn spawn_dynamic_obstacle(&mut self, rng: &mut impl Rng) -> Option<Position> {
        if self.dynamic_obstacles.len() >= self.max_dynamic_obstacles {
            return None;
        }
        if rng.gen::<f64>() >= self.obstacle_probability {
            return None;
        }
        let mut empty_cells = Vec::new();
        for row in 0..self.size {
            for col in 0..self.size {
                let pos = Position::new(row, col);
                if self.cells[row][col] == CellState::Empty
                    && Some(pos) != self.start_pos
                    && Some(pos) != self.target_pos
                {
                    empty_cells.push(pos);
                }
            }
        }
        let pos = *empty_cells.choose(rng)?;
        self.cells[pos.row][pos.col] = CellState::DynamicObstacle;
        self.dynamic_obstacles.insert(pos);
        Some(pos)
    }

    pub fn remove_dynamic_obstacle(&mut self, pos: Position) -> bool {
        if !self.is_valid_position(pos) {
            return false;
        }
        if self.dynamic_obstacles.remove(&pos) {
            self.cells[pos.row][pos.col] = CellState::Empty;
            return true;
        }
        false
    }

    pub fn clear_dynamic_obstacles(&mut self) {
        for pos in self.dynamic_obstacles.drain() {
            self.cells[pos.row][pos.col] = CellState::Empty;
        }
    }

    pub fn dynamic_obstacle_count(&self) -> usize {
        self.dynamic_obstacles.len()
    }

    pub fn wall_count(&self) -> usize {
        self.static_walls.len()
    }

    pub fn is_walkable(&self, pos: Position) -> bool {
        if !self.is_valid_position(pos) {
            return false;
        }
        !matches!(
            self.cells[pos.row][pos.col],
            CellState::Wall | CellState::DynamicObstacle
        )
    }

    /// Walkable neighbors of `pos` in the fixed `DIRECTIONS` order.
    /// Returns an empty list for an out-of-bounds position.
    pub fn get_neighbors(&self, pos: Position) -> Vec<Position> {
        if !self.is_valid_position(pos) {
            return Vec::new();
        }
        DIRECTIONS
            .iter()
            .filter_map(|&offset| pos.offset(offset, self.size))
            .filter(|&next| self.is_walkable(next))
            .collect()
    }

    pub fn get_cell_state(&self, pos: Position) -> CellState {
        if !self.is_valid_position(pos) {
            // Out of bounds reads as a wall.
            return CellState::Wall;
        }
        self.cells[pos.row][pos.col]
    }

    /// Mark a discovered-but-unexpanded cell. Only plain EMPTY cells are
    /// repainted; markers, walls, and obstacles are never overwritten.
    pub fn mark_frontier(&mut self, pos: Position) -> bool {
        if !self.is_valid_position(pos) {
            return false;
        }
        if self.cells[pos.row][pos.col] == CellState::Empty {
            self.cells[pos.row][pos.col] = CellState::Frontier;
            return true;
        }
        false
    }

    pub fn mark_explored(&mut self, pos: Position) -> bool {
        if !self.is_valid_position(pos) {
            return false;
        }
        if matches!(
            self.cells[pos.row][pos.col],
            CellState::Frontier | CellState::Empty
        ) {
            self.cells[pos.row][pos.col] = CellState::Explored;
            return true;
        }
        false
    }

    /// Paint the final path overlay, skipping markers and blocked cells.
    /// Returns the number of cells actually painted.
    pub fn mark_path(&mut self, path: &[Position]) -> usize {
        let mut marked = 0;
        for &pos in path {
            if !self.is_valid_position(pos) {
                continue;
            }
            if Some(pos) == self.start_pos || Some(pos) == self.target_pos {
                continue;
            }
            if !matches!(
                self.cells[pos.row][pos.col],
                CellState::Wall | CellState::DynamicObstacle
            ) {
                self.cells[pos.row][pos.col] = CellState::Path;
                marked += 1;
            }
        }
        marked
    }

    pub fn clear_search_visualization(&mut self) {
        for row in 0..self.size {
            for col in 0..self.size {
                if matches!(
                    self.cells[row][col],
                    CellState::Frontier | CellState::Explored | CellState::Path
                ) {
                    self.cells[row][col] = CellState::Empty;
                }
            }
        }
    }

    /// Back to a clean board: visualization and dynamic obstacles gone,
    /// walls and markers kept.
    pub fn reset(&mut self) {
        self.clear_search_visualization();
        self.clear_dynamic_obstacles();
    }

    pub fn is_path_blocked(&self, path: &[Position]) -> bool {
        path.iter().any(|&pos| !self.is_walkable(pos))
    }

    /// Re-roll the wall layout at the given density. An out-of-range
    /// density is logged and skipped without touching the grid.
    pub fn randomize_walls(&mut self, density: f64, rng: &mut impl Rng) -> usize {
        if !(0.0..=1.0).contains(&density) {
            log::error!("Invalid wall density: {}. Must be between 0 and 1", density);
            return 0;
        }
        self.clear_walls();
        let mut walls_added = 0;
        for row in 0..self.size {
            for col in 0..self.size {
                let pos = Position::new(row, col);
                if Some(pos) != self.start_pos
                    && Some(pos) != self.target_pos
                    && rng.gen::<f64>() < density
                    && self.add_wall(pos)
                {
                    walls_added += 1;
                }
            }
        }
        log::info!("Randomized {} walls with density {}", walls_added, density);
        walls_added
    }
}
