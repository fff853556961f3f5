use anyhow::Context;
use clap::Parser;
use npuzzle_solver::heuristics::Distance;
use npuzzle_solver::solver::{Solver, SolverConfig, MAX_MOVES};
use npuzzle_solver::utils::{read_board_file, write_solution};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Find a shortest slide sequence for a sliding-tile puzzle", long_about = None)]
struct Args {
    /// File in which the start board is stored
    input_file: PathBuf,

    /// File the path and summary are written to
    output_file: PathBuf,

    /// File with the target board, if it differs from the standard one
    #[arg(short, long = "target_file")]
    target_file: Option<PathBuf>,

    /// Distance used to rank boards
    #[arg(short, long, value_enum, default_value_t = Distance::Manhattan)]
    distance: Distance,

    /// Boards needing this many moves or more are treated as unreachable
    #[arg(long, default_value_t = MAX_MOVES)]
    max_moves: u32,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let start = read_board_file(&args.input_file)
        .with_context(|| format!("Failed to read start board from {}", args.input_file.display()))?;
    let target = args
        .target_file
        .as_deref()
        .map(|path| {
            read_board_file(path)
                .with_context(|| format!("Failed to read target board from {}", path.display()))
        })
        .transpose()?;

    info!(input = %args.input_file.display(), distance = %args.distance, "loaded start board");

    let solver = Solver::new(start, target, args.distance).with_config(SolverConfig {
        max_moves: args.max_moves,
    });
    let solution = solver.solve().context("Inconsistent solver configuration")?;

    write_solution(&args.output_file, &solution)
        .with_context(|| format!("Failed to write {}", args.output_file.display()))?;

    info!(
        reachable = solution.reachable,
        moves = solution.moves,
        output = %args.output_file.display(),
        "solution written"
    );
    Ok(())
}
