use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

/// A position in the maze, identified by its row and column
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub row: usize,
    pub col: usize,
}

impl Point {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The moves that can be taken between two adjacent cells
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions in the order neighbors are generated. The order decides how ties are
    /// broken by the frontier, so it must not change.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// The point one step away from `point` in this direction, or `None` if that would leave
    /// the non-negative coordinate space.
    pub fn apply(self, point: Point) -> Option<Point> {
        match self {
            Direction::Up => point.row.checked_sub(1).map(|row| Point { row, ..point }),
            Direction::Down => Some(Point {
                row: point.row + 1,
                ..point
            }),
            Direction::Left => point.col.checked_sub(1).map(|col| Point { col, ..point }),
            Direction::Right => Some(Point {
                col: point.col + 1,
                ..point
            }),
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Direction::Up => "up",
                Direction::Down => "down",
                Direction::Left => "left",
                Direction::Right => "right",
            }
        )
    }
}

impl FromStr for Direction {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            _ => Err(anyhow::anyhow!("Invalid direction: {}", s)),
        }
    }
}

/// A rectangular maze of open and blocked cells with a single start and a single goal.
///
/// The maze is expected to be valid when constructed: start and goal are inside the bounds
/// and not walls, and every row of `walls` holds `columns` entries. Use
/// [`parse_maze`](crate::parse::parse_maze) to build one from text with validation.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Maze {
    pub rows: usize,
    pub columns: usize,
    /// `true` marks an impassable cell
    pub walls: Vec<Vec<bool>>,
    pub start: Point,
    pub goal: Point,
}

impl Maze {
    /// Create a maze from a wall map. Rows shorter than the widest row are padded with open
    /// cells.
    pub fn new(mut walls: Vec<Vec<bool>>, start: Point, goal: Point) -> Self {
        let rows = walls.len();
        let columns = walls.iter().map(Vec::len).max().unwrap_or(0);

        for row in walls.iter_mut() {
            row.resize(columns, false);
        }

        Self {
            rows,
            columns,
            walls,
            start,
            goal,
        }
    }

    /// Create a maze without any walls
    pub fn open(rows: usize, columns: usize, start: Point, goal: Point) -> Self {
        Self {
            rows,
            columns,
            walls: vec![vec![false; columns]; rows],
            start,
            goal,
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        point.row < self.rows && point.col < self.columns
    }

    /// Points outside the maze count as walls
    pub fn is_wall(&self, point: Point) -> bool {
        !self.contains(point) || self.walls[point.row][point.col]
    }

    /// Return the moves that can be made from `state` together with the point they lead to.
    ///
    /// Candidates are generated up, down, left, right (in that order) and only those inside
    /// the maze that are not walls are kept.
    pub fn neighbors(&self, state: Point) -> impl Iterator<Item = (Direction, Point)> + '_ {
        Direction::ALL.into_iter().filter_map(move |direction| {
            direction
                .apply(state)
                .filter(|point| !self.is_wall(*point))
                .map(|point| (direction, point))
        })
    }

    /// Scales the maze by the given factor, i.e. to make it twice as large, pass 2.
    /// Every cell is repeated `factor` times in both directions and the start and goal are
    /// moved to the top left corner of their scaled block.
    pub fn scale_up(&mut self, factor: usize) {
        let mut new_walls = vec![vec![false; self.columns * factor]; self.rows * factor];

        for row in 0..self.rows {
            for col in 0..self.columns {
                for r in 0..factor {
                    for c in 0..factor {
                        new_walls[row * factor + r][col * factor + c] = self.walls[row][col];
                    }
                }
            }
        }

        self.rows *= factor;
        self.columns *= factor;
        self.walls = new_walls;
        self.start = Point::new(self.start.row * factor, self.start.col * factor);
        self.goal = Point::new(self.goal.row * factor, self.goal.col * factor);
    }

    /// Write the maze one line per row, marking the cells of `path` with `*`
    pub(crate) fn write_rows(
        &self,
        f: &mut impl std::fmt::Write,
        path: Option<&[Point]>,
    ) -> std::fmt::Result {
        for (row, walls) in self.walls.iter().enumerate() {
            for (col, &wall) in walls.iter().enumerate() {
                let point = Point { row, col };
                let symbol = if wall {
                    '█'
                } else if point == self.start {
                    'A'
                } else if point == self.goal {
                    'B'
                } else if path.is_some_and(|path| path.contains(&point)) {
                    '*'
                } else {
                    ' '
                };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

impl Display for Maze {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.write_rows(f, None)
    }
}
