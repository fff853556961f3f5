use clap::Parser;
use npuzzle_solver::engine::Board;
use npuzzle_solver::heuristics::Distance;
use npuzzle_solver::solver::{SearchStats, Solver};
use std::collections::HashMap;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Compare the built-in distances on scrambled boards", long_about = None)]
struct Args {
    /// Number of scrambled boards to evaluate
    #[arg(short, long, default_value_t = 20)]
    boards: usize,

    /// Side length of the boards
    #[arg(short, long, default_value_t = 3)]
    size: usize,

    /// Random slides applied to the standard board
    #[arg(long, default_value_t = 30)]
    slides: usize,

    /// Seed of the first board; board `i` uses `seed + i`
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

#[derive(Default)]
struct Totals {
    solved: usize,
    moves: u64,
    expanded: u64,
    generated: u64,
}

impl Totals {
    fn record(&mut self, reachable: bool, moves: u32, stats: &SearchStats) {
        if reachable {
            self.solved += 1;
            self.moves += moves as u64;
        }
        self.expanded += stats.expanded as u64;
        self.generated += stats.generated as u64;
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    anyhow::ensure!(args.size > 0, "board size must be positive");

    let mut totals: HashMap<Distance, Totals> = HashMap::new();

    println!(
        "Starting heuristic evaluation for {} boards ({}x{}, {} slides)...",
        args.boards, args.size, args.size, args.slides
    );

    for board_idx in 0..args.boards {
        let current_seed = args.seed + board_idx as u64;
        let start = Board::scrambled(args.size, args.slides, current_seed);

        println!("\nEvaluating Board {} (Seed: {})", board_idx, current_seed);

        for distance in Distance::ALL {
            let (solution, stats) = Solver::new(start.clone(), None, distance).solve_with_stats()?;
            println!(
                "  Distance: {:<10} Reachable: {:<5} Moves: {:<6} Expanded: {:<8} Generated: {}",
                distance.name(),
                solution.reachable,
                solution.moves,
                stats.expanded,
                stats.generated
            );
            totals
                .entry(distance)
                .or_default()
                .record(solution.reachable, solution.moves, &stats);
        }
    }

    println!("\n--- Evaluation Complete ---");
    println!("Number of boards evaluated: {}", args.boards);
    println!("\n--- Averages ---");

    for distance in Distance::ALL {
        let Some(t) = totals.get(&distance) else {
            println!("Distance {}: No results recorded.", distance);
            continue;
        };
        let avg_moves = if t.solved > 0 {
            t.moves as f64 / t.solved as f64
        } else {
            0.0
        };
        let runs = args.boards.max(1) as f64;
        println!(
            "Distance {:<10}: Solved {}/{}, Avg Moves = {:.2}, Avg Expanded = {:.1}, Avg Generated = {:.1}",
            distance.name(),
            t.solved,
            args.boards,
            avg_moves,
            t.expanded as f64 / runs,
            t.generated as f64 / runs
        );
    }
    Ok(())
}
