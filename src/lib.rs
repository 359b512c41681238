//! Grid pathfinding with interchangeable search strategies and dynamic
//! replanning: a square occupancy grid, six traversal algorithms behind
//! one `SearchStrategy` contract, and a coordinator that re-plans when
//! obstacles invalidate a computed path.

pub mod algorithms;
pub mod config;
pub mod grid;
pub mod replan;
pub mod simulation;
pub mod statistics;
