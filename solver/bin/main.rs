use std::path::PathBuf;

use anyhow::bail;
use clap::Parser;
use log::info;
use serde::Serialize;
use solver::{
    parse::read_maze,
    render::{render_text, save_image},
    FrontierKind, PathFinder, SearchReport, Solution, SolverConfig,
};

/// Find a path from A to B through a text maze.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Path to the maze file.
    maze: PathBuf,
    /// JSON file with solver settings, flags override its values.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Exploration order: stack (depth-first) or queue (breadth-first).
    #[arg(short, long)]
    frontier: Option<FrontierKind>,
    /// Where to write the image of the solved maze.
    #[arg(short, long)]
    output: Option<String>,
    /// Do not write an image.
    #[arg(long, default_value_t = false)]
    no_image: bool,
    /// Do not highlight expanded cells in the image.
    #[arg(long, default_value_t = false)]
    hide_explored: bool,
    /// Do not highlight the path in the image.
    #[arg(long, default_value_t = false)]
    hide_solution: bool,
    /// Give up after expanding this many nodes.
    #[arg(long)]
    max_steps: Option<usize>,
    /// Reject lines that are shorter than the widest line.
    #[arg(long, default_value_t = false)]
    strict: bool,
    /// Print the result as JSON instead of drawing the maze.
    #[arg(short, long, default_value_t = false)]
    json: bool,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    frontier: FrontierKind,
    explored: usize,
    solution: Option<&'a Solution>,
}

fn load_config(args: &Args) -> Result<SolverConfig, anyhow::Error> {
    let mut config = match &args.config {
        Some(path) => SolverConfig::load(path)?,
        None => SolverConfig::default(),
    };

    if let Some(frontier) = args.frontier {
        config.frontier = frontier;
    }
    if let Some(output) = &args.output {
        config.image.output = Some(output.clone());
    }
    if args.no_image {
        config.image.output = None;
    }
    if args.hide_explored {
        config.image.show_explored = false;
    }
    if args.hide_solution {
        config.image.show_solution = false;
    }
    if args.max_steps.is_some() {
        config.max_steps = args.max_steps;
    }
    if args.strict {
        config.missing_as_open = false;
    }

    Ok(config)
}

fn main() -> Result<(), anyhow::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = load_config(&args)?;
    info!("solving {} with {} frontier", args.maze.display(), config.frontier);

    let maze = read_maze(&args.maze, &config.parse_options())?;

    if !args.json {
        println!("Maze:");
        print!("{}", render_text(&maze, None));
        println!("Solving...");
    }

    let finder = PathFinder::for_maze(&maze, config.frontier.create());
    let report: SearchReport = match config.max_steps {
        Some(max_steps) => finder.finish_within(&maze, max_steps)?,
        None => finder.finish(&maze),
    };

    if args.json {
        let output = JsonOutput {
            frontier: config.frontier,
            explored: report.explored_count,
            solution: report.solution(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("States Explored: {}", report.explored_count);
    }

    let Some(solution) = report.solution() else {
        bail!("no solution");
    };

    if !args.json {
        println!("Solution:");
        print!("{}", render_text(&maze, Some(solution)));
    }

    if let Some(path) = &config.image.output {
        save_image(path, &maze, Some(solution), &report.explored, &config.image)?;
        info!("wrote {}", path);
    }

    Ok(())
}
