//! Perfect maze generator
//!
//! Main entry point: generates a maze and writes the requested outputs.

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use log::info;

use maze_core::generate;
use maze_export::{save_maze, save_png, to_text, write_text};

/// Generate a perfect maze
#[derive(Parser, Debug)]
#[command(name = "maze")]
#[command(author, version, about = "Carve a random perfect maze", long_about = None)]
struct Args {
    /// Grid width in cells, including the border
    #[arg(short = 'W', long = "width", default_value_t = 300)]
    width: usize,

    /// Grid height in cells, including the border
    #[arg(short = 'H', long = "height", default_value_t = 300)]
    height: usize,

    /// RNG seed; omit for a random maze
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Text dump output path
    #[arg(short = 'o', long = "output", default_value = "maze.txt")]
    output: PathBuf,

    /// Also render the maze as a black/white PNG
    #[arg(long = "png")]
    png: Option<PathBuf>,

    /// Also save the maze with its seed as JSON
    #[arg(long = "json")]
    json: Option<PathBuf>,

    /// Print the text dump to stdout
    #[arg(long = "print")]
    print: bool,

    /// Verbose output
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

impl Args {
    fn log_level(&self) -> log::LevelFilter {
        if self.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.log_level())
        .parse_default_env()
        .init();

    run(&args)
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let maze = generate(args.width, args.height, args.seed)?;
    info!(
        "generated {}x{} maze (seed {})",
        args.width, args.height, maze.seed
    );

    write_text(&maze.grid, &args.output)?;

    if let Some(ref path) = args.png {
        save_png(&maze.grid, path)?;
    }

    if let Some(ref path) = args.json {
        save_maze(&maze, path)?;
    }

    if args.print {
        println!("{}", to_text(&maze.grid));
    }

    Ok(())
}
