use std::{collections::HashSet, path::Path};

use anyhow::Context;
use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::{
    find::Solution,
    grid::{Maze, Point},
};

const BACKGROUND: Rgba<u8> = Rgba([0, 0, 0, 255]);
const WALL: Rgba<u8> = Rgba([40, 40, 40, 255]);
const START: Rgba<u8> = Rgba([255, 0, 0, 255]);
const GOAL: Rgba<u8> = Rgba([0, 171, 28, 255]);
const PATH: Rgba<u8> = Rgba([220, 235, 113, 255]);
const EXPLORED: Rgba<u8> = Rgba([212, 97, 85, 255]);
const EMPTY: Rgba<u8> = Rgba([237, 240, 252, 255]);

/// Render the maze as text, with the cells of the solution (if any) marked by `*`
pub fn render_text(maze: &Maze, solution: Option<&Solution>) -> String {
    let mut out = String::from("\n");
    // writing into a String never fails
    let _ = maze.write_rows(&mut out, solution.map(|s| s.cells.as_slice()));
    out.push('\n');
    out
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageOptions {
    /// Where to write the image, `None` disables image output
    pub output: Option<String>,
    pub show_solution: bool,
    pub show_explored: bool,
    /// Size of one cell in pixels
    pub cell_size: u32,
    /// Background pixels left around each cell
    pub cell_border: u32,
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self {
            output: Some("maze.png".to_owned()),
            show_solution: true,
            show_explored: true,
            cell_size: 50,
            cell_border: 2,
        }
    }
}

fn fill_for(
    maze: &Maze,
    point: Point,
    solution: Option<&Solution>,
    explored: &HashSet<Point>,
    options: &ImageOptions,
) -> Rgba<u8> {
    if maze.walls[point.row][point.col] {
        WALL
    } else if point == maze.start {
        START
    } else if point == maze.goal {
        GOAL
    } else if solution.is_some_and(|s| options.show_solution && s.contains(point)) {
        PATH
    } else if solution.is_some() && options.show_explored && explored.contains(&point) {
        EXPLORED
    } else {
        EMPTY
    }
}

/// Draw the maze as an image with one filled square per cell.
///
/// Explored cells are only highlighted when a solution was found.
pub fn render_image(
    maze: &Maze,
    solution: Option<&Solution>,
    explored: &HashSet<Point>,
    options: &ImageOptions,
) -> RgbaImage {
    let size = options.cell_size;
    let border = options.cell_border;
    let width = maze.columns as u32 * size;
    let height = maze.rows as u32 * size;

    let mut img = RgbaImage::from_pixel(width, height, BACKGROUND);
    if width == 0 || height == 0 {
        return img;
    }

    for row in 0..maze.rows {
        for col in 0..maze.columns {
            let fill = fill_for(maze, Point { row, col }, solution, explored, options);

            // the square covers [x0, x1] x [y0, y1], both ends included
            let x0 = col as u32 * size + border;
            let y0 = row as u32 * size + border;
            let x1 = ((col as u32 + 1) * size).saturating_sub(border).min(width - 1);
            let y1 = ((row as u32 + 1) * size).saturating_sub(border).min(height - 1);

            for y in y0..=y1 {
                for x in x0..=x1 {
                    img.put_pixel(x, y, fill);
                }
            }
        }
    }

    img
}

/// Render the maze and write it to `path`, the format is picked from the file extension
pub fn save_image(
    path: impl AsRef<Path>,
    maze: &Maze,
    solution: Option<&Solution>,
    explored: &HashSet<Point>,
    options: &ImageOptions,
) -> Result<(), anyhow::Error> {
    let path = path.as_ref();
    render_image(maze, solution, explored, options)
        .save(path)
        .with_context(|| format!("could not write image {}", path.display()))
}

#[cfg(test)]
mod test {

    use super::*;
    use crate::find::solve;
    use crate::frontier::FrontierKind;
    use crate::parse::{parse_maze, ParseOptions};

    fn corridor() -> Maze {
        parse_maze("A #\n  #\n# B", &ParseOptions::default()).unwrap()
    }

    /// Color at the center of a cell
    fn cell_color(img: &RgbaImage, options: &ImageOptions, row: u32, col: u32) -> Rgba<u8> {
        let half = options.cell_size / 2;
        *img.get_pixel(col * options.cell_size + half, row * options.cell_size + half)
    }

    #[test]
    fn test_render_text_unsolved() {
        let maze = corridor();
        assert_eq!(render_text(&maze, None), "\nA █\n  █\n█ B\n\n");
    }

    #[test]
    fn test_render_text_solved() {
        let maze = corridor();
        let report = solve(&maze, FrontierKind::Queue);

        assert_eq!(
            render_text(&maze, report.solution()),
            "\nA █\n**█\n█*B\n\n"
        );
    }

    #[test]
    fn test_render_image() {
        let maze = corridor();
        let report = solve(&maze, FrontierKind::Queue);
        let options = ImageOptions::default();

        let img = render_image(&maze, report.solution(), &report.explored, &options);

        assert_eq!(img.dimensions(), (150, 150));
        // border pixels keep the background
        assert_eq!(*img.get_pixel(0, 0), BACKGROUND);
        assert_eq!(*img.get_pixel(49, 25), BACKGROUND);

        assert_eq!(cell_color(&img, &options, 0, 0), START);
        assert_eq!(cell_color(&img, &options, 2, 2), GOAL);
        assert_eq!(cell_color(&img, &options, 0, 2), WALL);
        assert_eq!(cell_color(&img, &options, 1, 1), PATH);
        // expanded but not on the path
        assert_eq!(cell_color(&img, &options, 0, 1), EXPLORED);
    }

    #[test]
    fn test_render_image_without_overlays() {
        let maze = corridor();
        let report = solve(&maze, FrontierKind::Queue);
        let options = ImageOptions {
            show_solution: false,
            show_explored: false,
            cell_size: 10,
            cell_border: 0,
            ..Default::default()
        };

        let img = render_image(&maze, report.solution(), &report.explored, &options);

        assert_eq!(img.dimensions(), (30, 30));
        assert_eq!(*img.get_pixel(0, 0), START);
        assert_eq!(*img.get_pixel(29, 29), GOAL);
        assert_eq!(cell_color(&img, &options, 1, 1), EMPTY);
        assert_eq!(cell_color(&img, &options, 0, 1), EMPTY);
    }

    #[test]
    fn test_explored_hidden_without_solution() {
        let maze = parse_maze("A #\n###\n  B", &ParseOptions::default()).unwrap();
        let report = solve(&maze, FrontierKind::Stack);
        assert!(report.solution().is_none());

        let options = ImageOptions::default();
        let img = render_image(&maze, None, &report.explored, &options);
        assert!(report.explored.contains(&Point::new(0, 1)));
        assert_eq!(cell_color(&img, &options, 0, 1), EMPTY);
    }
}
