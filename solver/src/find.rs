use std::{collections::HashSet, error::Error, fmt::Display};

use log::{info, trace};
use serde::Serialize;

use crate::{
    frontier::{EmptyFrontier, Frontier, FrontierKind},
    grid::{Direction, Maze, Point},
};

/// Handle of a node stored in a [`NodeArena`]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(usize);

/// A vertex of the search tree: the state it represents, the node it was reached from and
/// the move that got there. Only the root has no parent and no action.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Node {
    pub state: Point,
    pub parent: Option<NodeId>,
    pub action: Option<Direction>,
}

impl Node {
    pub fn root(state: Point) -> Self {
        Self {
            state,
            parent: None,
            action: None,
        }
    }

    pub fn child(state: Point, parent: NodeId, action: Direction) -> Self {
        Self {
            state,
            parent: Some(parent),
            action: Some(action),
        }
    }
}

/// Owns every expanded node of one search run. Nodes are only ever appended, so handles
/// stay valid for the lifetime of the arena and parent chains can not form cycles.
#[derive(Debug, Default, Clone)]
pub struct NodeArena(Vec<Node>);

impl NodeArena {
    pub fn push(&mut self, node: Node) -> NodeId {
        self.0.push(node);
        NodeId(self.0.len() - 1)
    }

    pub fn get(&self, id: NodeId) -> &Node {
        &self.0[id.0]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Walk the parent chain from `node` back to the root and collect the moves in
    /// start to goal order
    pub fn backtrack(&self, node: &Node) -> Solution {
        let mut actions = Vec::new();
        let mut cells = Vec::new();

        let mut current = node;
        while let (Some(parent), Some(action)) = (current.parent, current.action) {
            actions.push(action);
            cells.push(current.state);
            current = self.get(parent);
        }

        actions.reverse();
        cells.reverse();

        Solution { actions, cells }
    }
}

/// A path from the start to the goal. `actions[i]` is the move that arrives at `cells[i]`,
/// the start itself is not part of `cells`.
#[derive(Debug, Default, PartialEq, Clone, Eq, Serialize)]
pub struct Solution {
    pub actions: Vec<Direction>,
    pub cells: Vec<Point>,
}

impl Solution {
    /// Number of moves
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn contains(&self, point: Point) -> bool {
        self.cells.contains(&point)
    }

    pub fn steps(&self) -> impl Iterator<Item = (Direction, Point)> + '_ {
        self.actions.iter().copied().zip(self.cells.iter().copied())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchState {
    Computing,
    NoSolution,
    Solved(Solution),
}

impl SearchState {
    pub fn is_done(&self) -> bool {
        !matches!(self, SearchState::Computing)
    }
}

/// The search did not terminate within the allowed number of steps
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct StepLimit {
    pub steps: usize,
}

impl Display for StepLimit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "search did not terminate within {} steps", self.steps)
    }
}

impl Error for StepLimit {}

/// The outcome of a finished search run
#[derive(Debug, Clone)]
pub struct SearchReport {
    pub state: SearchState,
    /// States that were expanded, the goal is never part of it
    pub explored: HashSet<Point>,
    /// Number of nodes removed from the frontier, including the goal node
    pub explored_count: usize,
}

impl SearchReport {
    pub fn solution(&self) -> Option<&Solution> {
        match &self.state {
            SearchState::Solved(solution) => Some(solution),
            _ => None,
        }
    }
}

/// Uninformed search from `start` to `goal`. The frontier decides the exploration order.
///
/// Every call to [`PathFinder::step`] removes one node from the frontier. Once the search
/// reached a terminal state further steps do nothing and return that state again.
#[derive(Debug)]
pub struct PathFinder<F: Frontier> {
    start: Point,
    goal: Point,
    frontier: F,
    explored: HashSet<Point>,
    nodes: NodeArena,
    explored_count: usize,
    state: SearchState,
}

impl<F: Frontier> PathFinder<F> {
    pub fn new(start: Point, goal: Point, mut frontier: F) -> Self {
        frontier.add(Node::root(start));
        Self {
            start,
            goal,
            frontier,
            explored: HashSet::new(),
            nodes: NodeArena::default(),
            explored_count: 0,
            state: SearchState::Computing,
        }
    }

    pub fn for_maze(maze: &Maze, frontier: F) -> Self {
        Self::new(maze.start, maze.goal, frontier)
    }

    pub fn finish(mut self, maze: &Maze) -> SearchReport {
        while !self.step(maze).is_done() {}
        self.into_report()
    }

    /// Like [`PathFinder::finish`] but gives up once `max_steps` nodes were removed from the
    /// frontier without reaching a terminal state
    pub fn finish_within(
        mut self,
        maze: &Maze,
        max_steps: usize,
    ) -> Result<SearchReport, StepLimit> {
        loop {
            if self.step(maze).is_done() {
                return Ok(self.into_report());
            }
            if self.explored_count >= max_steps {
                return Err(StepLimit { steps: max_steps });
            }
        }
    }

    pub fn step(&mut self, maze: &Maze) -> SearchState {
        if self.state.is_done() {
            return self.state.clone();
        }

        let node = match self.frontier.remove() {
            Ok(node) => node,
            Err(EmptyFrontier) => {
                info!(
                    "no path from {} to {}, explored {} states",
                    self.start, self.goal, self.explored_count
                );
                self.state = SearchState::NoSolution;
                return self.state.clone();
            }
        };
        self.explored_count += 1;
        trace!("expanding {} (step {})", node.state, self.explored_count);

        if node.state == self.goal {
            let solution = self.nodes.backtrack(&node);
            info!(
                "found path of {} moves to {}, explored {} states",
                solution.len(),
                self.goal,
                self.explored_count
            );
            self.state = SearchState::Solved(solution);
            return self.state.clone();
        }

        self.explored.insert(node.state);
        let id = self.nodes.push(node);

        for (action, state) in maze.neighbors(node.state) {
            if !self.frontier.contains_state(state) && !self.explored.contains(&state) {
                self.frontier.add(Node::child(state, id, action));
            }
        }

        self.state.clone()
    }

    fn into_report(self) -> SearchReport {
        SearchReport {
            state: self.state,
            explored: self.explored,
            explored_count: self.explored_count,
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn explored(&self) -> &HashSet<Point> {
        &self.explored
    }

    pub fn explored_count(&self) -> usize {
        self.explored_count
    }

    pub fn frontier(&self) -> &F {
        &self.frontier
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn goal(&self) -> Point {
        self.goal
    }
}

/// Run a complete search over `maze` with the selected frontier
pub fn solve(maze: &Maze, kind: FrontierKind) -> SearchReport {
    PathFinder::for_maze(maze, kind.create()).finish(maze)
}
