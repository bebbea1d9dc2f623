//! Solve text mazes with uninformed search.
//!
//! A [`Maze`] is parsed from text ([`parse::parse_maze`]), searched by a [`PathFinder`] that
//! removes nodes from a [`Frontier`] (depth-first through a [`StackFrontier`], breadth-first
//! through a [`QueueFrontier`]) and the resulting [`Solution`] can be rendered as text or
//! as an image.

pub mod config;
pub mod find;
pub mod frontier;
pub mod grid;
pub mod parse;
pub mod render;

pub use config::SolverConfig;
pub use find::{
    solve, Node, NodeArena, NodeId, PathFinder, SearchReport, SearchState, Solution, StepLimit,
};
pub use frontier::{EmptyFrontier, Frontier, FrontierKind, QueueFrontier, StackFrontier};
pub use grid::{Direction, Maze, Point};
