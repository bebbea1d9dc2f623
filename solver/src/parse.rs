use std::path::Path;

use anyhow::{anyhow, bail, Context};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::grid::{Maze, Point};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ParseOptions {
    /// Treat positions past the end of a line that is shorter than the widest line as open
    /// cells. When disabled such lines are rejected.
    pub missing_as_open: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            missing_as_open: true,
        }
    }
}

/// Parse a maze from text.
///
/// `A` marks the start and `B` the goal, spaces are open cells and any other character is a
/// wall. The maze is as wide as its longest line.
pub fn parse_maze(text: &str, options: &ParseOptions) -> Result<Maze, anyhow::Error> {
    if text.matches('A').count() != 1 {
        bail!("maze must have exactly one start point");
    }
    if text.matches('B').count() != 1 {
        bail!("maze must have exactly one goal");
    }

    let lines: Vec<Vec<char>> = text.lines().map(|line| line.chars().collect()).collect();
    let width = lines.iter().map(Vec::len).max().unwrap_or(0);

    let mut start = None;
    let mut goal = None;
    let mut walls = Vec::with_capacity(lines.len());

    for (row, line) in lines.iter().enumerate() {
        if line.len() < width && !options.missing_as_open {
            bail!(
                "line {} has {} columns but the maze is {} wide",
                row + 1,
                line.len(),
                width
            );
        }

        let mut cells = vec![false; width];
        for (col, c) in line.iter().enumerate() {
            cells[col] = match c {
                'A' => {
                    start = Some(Point { row, col });
                    false
                }
                'B' => {
                    goal = Some(Point { row, col });
                    false
                }
                ' ' => false,
                _ => true,
            };
        }
        walls.push(cells);
    }

    // both markers were counted above
    let start = start.ok_or_else(|| anyhow!("maze must have exactly one start point"))?;
    let goal = goal.ok_or_else(|| anyhow!("maze must have exactly one goal"))?;

    let maze = Maze::new(walls, start, goal);
    debug!(
        "parsed {}x{} maze, start {}, goal {}",
        maze.rows, maze.columns, maze.start, maze.goal
    );

    Ok(maze)
}

/// Read a maze file and parse it
pub fn read_maze(path: impl AsRef<Path>, options: &ParseOptions) -> Result<Maze, anyhow::Error> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("could not read maze file {}", path.display()))?;

    parse_maze(&text, options).with_context(|| format!("invalid maze in {}", path.display()))
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn test_parse_basic() {
        let maze = parse_maze("A #\n  #\n# B\n", &ParseOptions::default()).unwrap();

        assert_eq!(maze.rows, 3);
        assert_eq!(maze.columns, 3);
        assert_eq!(maze.start, Point::new(0, 0));
        assert_eq!(maze.goal, Point::new(2, 2));
        assert_eq!(
            maze.walls,
            vec![
                vec![false, false, true],
                vec![false, false, true],
                vec![true, false, false],
            ]
        );
    }

    #[test]
    fn test_parse_crlf() {
        let maze = parse_maze("A#\r\n B\r\n", &ParseOptions::default()).unwrap();
        assert_eq!(maze.rows, 2);
        assert_eq!(maze.columns, 2);
        assert_eq!(maze.goal, Point::new(1, 1));
    }

    #[test]
    fn test_any_other_character_is_wall() {
        let maze = parse_maze("A.x\n|%B", &ParseOptions::default()).unwrap();
        assert_eq!(
            maze.walls,
            vec![vec![false, true, true], vec![true, true, false]]
        );
    }

    #[test]
    fn test_start_and_goal_count() {
        let options = ParseOptions::default();

        let err = parse_maze("  B\n   ", &options).unwrap_err();
        assert_eq!(err.to_string(), "maze must have exactly one start point");

        let err = parse_maze("A A\n  B", &options).unwrap_err();
        assert_eq!(err.to_string(), "maze must have exactly one start point");

        let err = parse_maze("A  \n   ", &options).unwrap_err();
        assert_eq!(err.to_string(), "maze must have exactly one goal");

        let err = parse_maze("AB\nB ", &options).unwrap_err();
        assert_eq!(err.to_string(), "maze must have exactly one goal");

        assert!(parse_maze("", &options).is_err());
    }

    #[test]
    fn test_short_lines_are_open() {
        let maze = parse_maze("####\nA\n###B", &ParseOptions::default()).unwrap();
        assert_eq!(maze.columns, 4);
        assert_eq!(maze.walls[1], vec![false, false, false, false]);
    }

    #[test]
    fn test_short_lines_rejected_when_strict() {
        let options = ParseOptions {
            missing_as_open: false,
        };

        let err = parse_maze("####\nA\n###B", &options).unwrap_err();
        assert_eq!(err.to_string(), "line 2 has 1 columns but the maze is 4 wide");

        assert!(parse_maze("A #\n  #\n# B", &options).is_ok());
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_maze("does/not/exist.txt", &ParseOptions::default()).unwrap_err();
        assert!(err.to_string().contains("does/not/exist.txt"));
    }
}
