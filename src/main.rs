//! Command line entry point: reads a mission and prints one line per robot.

use clap::Parser;
use martian_robots::{parse, Error, Result, Simulation};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Martian robots
///
/// Runs each robot of a mission in order and prints its final position,
/// followed by LOST if it fell off the grid.
#[derive(Parser)]
#[command(name = "martian_robots")]
#[command(about = "Simulate robots exploring a grid on Mars", long_about = None)]
#[command(version)]
struct Cli {
    /// Mission file, or `-` for stdin
    #[arg(default_value = "-")]
    input: PathBuf,

    /// Write a JSON replay of every robot to this file
    #[arg(long)]
    replay: Option<String>,

    /// Log each robot's progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG takes precedence over --verbose
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    match run(&cli) {
        Ok(lines) => {
            for line in lines {
                println!("{line}");
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<Vec<String>> {
    let input = read_input(&cli.input)?;
    let mission = parse(&input)?;

    let mut simulation = Simulation::new().with_replay(cli.replay.clone());
    let results = simulation.run_mission(&mission)?;
    simulation.save_replay()?;

    Ok(results.iter().map(ToString::to_string).collect())
}

fn read_input(path: &Path) -> Result<String> {
    let io_error = |source| Error::Io {
        path: path.to_path_buf(),
        source,
    };

    if path.as_os_str() == "-" {
        let mut input = String::new();
        io::stdin().read_to_string(&mut input).map_err(io_error)?;
        Ok(input)
    } else {
        std::fs::read_to_string(path).map_err(io_error)
    }
}
