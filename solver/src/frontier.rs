use std::{
    collections::{HashMap, VecDeque},
    error::Error,
    fmt::Display,
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::{find::Node, grid::Point};

/// Returned when removing from a frontier that holds no nodes
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct EmptyFrontier;

impl Display for EmptyFrontier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "empty frontier")
    }
}

impl Error for EmptyFrontier {}

/// The collection of discovered but not yet expanded nodes.
///
/// Implementations only differ in the order nodes are removed. No de-duplication happens
/// here, the caller checks [`Frontier::contains_state`] before adding.
pub trait Frontier {
    fn add(&mut self, node: Node);

    /// Check if any node in the frontier holds the provided state
    fn contains_state(&self, state: Point) -> bool;

    fn is_empty(&self) -> bool;

    fn len(&self) -> usize;

    /// Remove the next node to expand
    fn remove(&mut self) -> Result<Node, EmptyFrontier>;
}

impl<F: Frontier + ?Sized> Frontier for Box<F> {
    fn add(&mut self, node: Node) {
        (**self).add(node)
    }

    fn contains_state(&self, state: Point) -> bool {
        (**self).contains_state(state)
    }

    fn is_empty(&self) -> bool {
        (**self).is_empty()
    }

    fn len(&self) -> usize {
        (**self).len()
    }

    fn remove(&mut self) -> Result<Node, EmptyFrontier> {
        (**self).remove()
    }
}

/// Counts how many held nodes carry each state, so membership checks do not need to scan
/// the whole frontier
#[derive(Debug, Default, Clone)]
struct PendingStates(HashMap<Point, usize>);

impl PendingStates {
    fn insert(&mut self, state: Point) {
        *self.0.entry(state).or_default() += 1;
    }

    fn remove(&mut self, state: Point) {
        if let Some(count) = self.0.get_mut(&state) {
            *count -= 1;
            if *count == 0 {
                self.0.remove(&state);
            }
        }
    }

    fn contains(&self, state: Point) -> bool {
        self.0.contains_key(&state)
    }
}

/// Last-in-first-out frontier, gives a depth-first search
#[derive(Debug, Default, Clone)]
pub struct StackFrontier {
    nodes: Vec<Node>,
    pending: PendingStates,
}

impl StackFrontier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Frontier for StackFrontier {
    fn add(&mut self, node: Node) {
        self.pending.insert(node.state);
        self.nodes.push(node);
    }

    fn contains_state(&self, state: Point) -> bool {
        self.pending.contains(state)
    }

    fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn remove(&mut self) -> Result<Node, EmptyFrontier> {
        let node = self.nodes.pop().ok_or(EmptyFrontier)?;
        self.pending.remove(node.state);
        Ok(node)
    }
}

/// First-in-first-out frontier, gives a breadth-first search. The first solution found
/// through this frontier uses the fewest possible moves.
#[derive(Debug, Default, Clone)]
pub struct QueueFrontier {
    nodes: VecDeque<Node>,
    pending: PendingStates,
}

impl QueueFrontier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Frontier for QueueFrontier {
    fn add(&mut self, node: Node) {
        self.pending.insert(node.state);
        self.nodes.push_back(node);
    }

    fn contains_state(&self, state: Point) -> bool {
        self.pending.contains(state)
    }

    fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn remove(&mut self) -> Result<Node, EmptyFrontier> {
        let node = self.nodes.pop_front().ok_or(EmptyFrontier)?;
        self.pending.remove(node.state);
        Ok(node)
    }
}

/// Selects which frontier a search uses
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrontierKind {
    #[default]
    #[serde(alias = "dfs")]
    Stack,
    #[serde(alias = "bfs")]
    Queue,
}

impl FrontierKind {
    pub fn create(self) -> Box<dyn Frontier> {
        match self {
            FrontierKind::Stack => Box::new(StackFrontier::new()),
            FrontierKind::Queue => Box::new(QueueFrontier::new()),
        }
    }
}

impl Display for FrontierKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                FrontierKind::Stack => "stack",
                FrontierKind::Queue => "queue",
            }
        )
    }
}

impl FromStr for FrontierKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "stack" | "dfs" => Ok(FrontierKind::Stack),
            "queue" | "bfs" => Ok(FrontierKind::Queue),
            _ => Err(anyhow::anyhow!("Invalid frontier: {}", s)),
        }
    }
}
