use grid_pathfinder::algorithms::{
    Bfs, BidirectionalSearch, Dfs, Dls, Iddfs, SearchStatus, SearchStrategy, Ucs,
};
use grid_pathfinder::grid::{Grid, Position, DIRECTIONS};
use grid_pathfinder::replan::DynamicEnvironment;

fn all_strategies() -> Vec<Box<dyn SearchStrategy>> {
    vec![
        Box::new(Bfs::new()),
        Box::new(Dfs::new()),
        Box::new(Ucs::new()),
        Box::new(Dls::new(50)),
        Box::new(Iddfs::new(50)),
        Box::new(BidirectionalSearch::new()),
    ]
}

fn open_grid() -> Grid {
    let mut grid = Grid::new(10).unwrap();
    grid.initialize_default();
    grid
}

/// A vertical wall at column 5 with a single gap at row 7.
fn gapped_grid() -> Grid {
    let mut grid = open_grid();
    for row in 0..10 {
        if row != 7 {
            grid.add_wall(Position::new(row, 5));
        }
    }
    grid
}

#[test]
fn start_equals_target_for_every_strategy() {
    let grid = open_grid();
    let neighbors = |p: Position| grid.get_neighbors(p);
    let start = grid.start_pos.unwrap();
    for mut strategy in all_strategies() {
        let result = strategy.search(start, start, &neighbors);
        assert_eq!(
            result.status,
            SearchStatus::Found,
            "{} should find the trivial path",
            strategy.name()
        );
        assert_eq!(result.path, Some(vec![start]), "{}", strategy.name());
    }
}

#[test]
fn every_strategy_finds_the_open_board_target() {
    let grid = open_grid();
    let neighbors = |p: Position| grid.get_neighbors(p);
    let start = grid.start_pos.unwrap();
    let target = grid.target_pos.unwrap();
    for mut strategy in all_strategies() {
        let result = strategy.search(start, target, &neighbors);
        assert_eq!(result.status, SearchStatus::Found, "{}", strategy.name());
        let path = result.path.unwrap();
        assert_eq!(path[0], start, "{}", strategy.name());
        assert_eq!(*path.last().unwrap(), target, "{}", strategy.name());
        for pair in path.windows(2) {
            let dr = pair[1].row as i32 - pair[0].row as i32;
            let dc = pair[1].col as i32 - pair[0].col as i32;
            assert!(
                DIRECTIONS.contains(&(dr, dc)),
                "{}: illegal step {:?} -> {:?}",
                strategy.name(),
                pair[0],
                pair[1]
            );
        }
    }
}

#[test]
fn bfs_path_length_is_the_known_hop_distance() {
    // (1,1) -> (8,8) under the six-offset adjacency: seven Down-Right
    // hops, so eight cells, fixed and reproducible for this input.
    let grid = open_grid();
    let neighbors = |p: Position| grid.get_neighbors(p);
    let result = Bfs::new().search(
        grid.start_pos.unwrap(),
        grid.target_pos.unwrap(),
        &neighbors,
    );
    assert_eq!(result.path_len(), 8);
}

#[test]
fn bfs_is_minimal_among_all_strategies() {
    for grid in [open_grid(), gapped_grid()] {
        let neighbors = |p: Position| grid.get_neighbors(p);
        let start = grid.start_pos.unwrap();
        let target = grid.target_pos.unwrap();
        let bfs_len = Bfs::new().search(start, target, &neighbors).path_len();
        assert!(bfs_len > 0);
        for mut strategy in all_strategies() {
            let result = strategy.search(start, target, &neighbors);
            if result.status == SearchStatus::Found {
                assert!(
                    bfs_len <= result.path_len(),
                    "{} returned a shorter path ({}) than BFS ({})",
                    strategy.name(),
                    result.path_len(),
                    bfs_len
                );
            }
        }
    }
}

#[test]
fn ucs_takes_the_cheap_diagonal_shortcut() {
    // Both the two-hop diagonal through (2,2) and longer orthogonal
    // detours reach (3,3); UCS must come back with the sqrt(2)-priced one.
    let mut grid = Grid::new(6).unwrap();
    grid.initialize_default();
    grid.set_target(Position::new(3, 3));
    let neighbors = |p: Position| grid.get_neighbors(p);
    let result = Ucs::new().search(
        grid.start_pos.unwrap(),
        grid.target_pos.unwrap(),
        &neighbors,
    );
    assert_eq!(result.status, SearchStatus::Found);
    let path = result.path.unwrap();
    let cost = Ucs::path_cost(&path);
    assert!(
        (cost - 2.0 * std::f64::consts::SQRT_2).abs() < 1e-9,
        "expected two diagonal hops, got cost {}",
        cost
    );
}

#[test]
fn dls_respects_its_depth_limit() {
    let grid = open_grid();
    let neighbors = |p: Position| grid.get_neighbors(p);
    let start = grid.start_pos.unwrap();
    let target = grid.target_pos.unwrap();

    // Shortest hop distance is 7: any limit below that must fail.
    for limit in [0, 2, 6] {
        let result = Dls::new(limit).search(start, target, &neighbors);
        assert_eq!(result.status, SearchStatus::NotFound, "limit {}", limit);
    }
    // A generous limit succeeds with a path inside the bound.
    let result = Dls::new(50).search(start, target, &neighbors);
    assert_eq!(result.status, SearchStatus::Found);
    assert!(result.path_len() <= 51);
}

#[test]
fn iddfs_steps_accumulate_across_sweeps() {
    let grid = open_grid();
    let neighbors = |p: Position| grid.get_neighbors(p);
    let start = grid.start_pos.unwrap();
    let target = grid.target_pos.unwrap();
    let iddfs = Iddfs::new(50).search(start, target, &neighbors);
    let bfs = Bfs::new().search(start, target, &neighbors);
    assert_eq!(iddfs.status, SearchStatus::Found);
    // Restarting every sweep costs strictly more expansions than one BFS.
    assert!(iddfs.steps > bfs.steps);
}

#[test]
fn bidirectional_visits_no_more_than_bfs() {
    let grid = open_grid();
    let neighbors = |p: Position| grid.get_neighbors(p);
    let start = grid.start_pos.unwrap();
    let target = grid.target_pos.unwrap();
    let bfs = Bfs::new().search(start, target, &neighbors);
    let bidir = BidirectionalSearch::new().search(start, target, &neighbors);
    assert_eq!(bidir.status, SearchStatus::Found);
    assert!(bidir.visited_nodes.len() <= bfs.visited_nodes.len());
}

#[test]
fn enclosed_start_is_a_dead_end_not_an_error() {
    let mut grid = open_grid();
    let start = grid.start_pos.unwrap();
    for dr in -1..=1_i32 {
        for dc in -1..=1_i32 {
            if dr == 0 && dc == 0 {
                continue;
            }
            if let Some(pos) = start.offset((dr, dc), grid.size) {
                grid.add_wall(pos);
            }
        }
    }
    let neighbors = |p: Position| grid.get_neighbors(p);
    let target = grid.target_pos.unwrap();
    for mut strategy in all_strategies() {
        let result = strategy.search(start, target, &neighbors);
        assert_eq!(result.status, SearchStatus::NotFound, "{}", strategy.name());
        assert!(result.path.is_none(), "{}", strategy.name());
    }
}

#[test]
fn replan_scenario_restarts_from_the_agent() {
    let mut grid = open_grid();
    let mut env = DynamicEnvironment::new();
    let mut strategy = Bfs::new();

    let neighbors = |p: Position| grid.get_neighbors(p);
    let result = strategy.search(
        grid.start_pos.unwrap(),
        grid.target_pos.unwrap(),
        &neighbors,
    );
    assert_eq!(result.status, SearchStatus::Found);
    let path = result.path.clone().unwrap();

    // The agent has advanced two cells; a wall lands strictly ahead.
    let agent_pos = path[2];
    grid.add_wall(path[4]);

    assert!(env.replan_needed(&grid, &result, agent_pos));
    assert_eq!(env.blocked_paths(), 1);

    let new_result = env.trigger_replan(&mut grid, agent_pos, &mut strategy);
    assert_eq!(env.replan_count(), 1);
    assert_eq!(new_result.status, SearchStatus::Found);
    let new_path = new_result.path.unwrap();
    assert_eq!(new_path[0], agent_pos);
    assert_eq!(*new_path.last().unwrap(), grid.target_pos.unwrap());
    assert!(!new_path.contains(&path[4]));
}
