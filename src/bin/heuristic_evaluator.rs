use clap::Parser;
use eight_puzzle::engine::State;
use eight_puzzle::heuristics::Heuristic;
use eight_puzzle::logging;
use eight_puzzle::solver::{Algorithm, Puzzle, SolveOutcome};
use std::collections::BTreeMap;
use std::error::Error;
use std::time::Instant;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Compare search strategies on seeded random boards", long_about = None)]
struct Args {
    /// Number of random boards to evaluate
    #[clap(short, long, default_value_t = 20)]
    boards: u64,

    /// Seed of the first board; board i uses seed + i
    #[clap(short, long, default_value_t = 0)]
    seed: u64,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Default)]
struct Totals {
    steps: usize,
    expanded: usize,
    seconds: f64,
    runs: usize,
}

fn strategies() -> Vec<(Algorithm, Heuristic)> {
    let mut out = Vec::new();
    for algorithm in Algorithm::ALL {
        for heuristic in Heuristic::ALL {
            if algorithm == Algorithm::AStar && heuristic.is_informed() {
                out.push((algorithm, heuristic));
            } else if algorithm != Algorithm::AStar && heuristic == Heuristic::None {
                out.push((algorithm, heuristic));
            }
        }
    }
    out
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    logging::init(args.verbose);

    let strategies = strategies();
    let mut totals: BTreeMap<String, Totals> = BTreeMap::new();

    println!("Starting strategy evaluation for {} boards...", args.boards);

    for board_idx in 0..args.boards {
        let current_seed = args.seed + board_idx;
        let start = State::random_solvable_with_seed(current_seed);

        println!("\nEvaluating Board {} (Seed: {})", board_idx, current_seed);

        let mut optimal_steps: Option<usize> = None;
        for &(algorithm, heuristic) in &strategies {
            let name = format!("{}/{}", algorithm, heuristic);
            let puzzle = Puzzle::new(start, State::goal(), algorithm, heuristic)?;

            let started = Instant::now();
            let outcome = puzzle.solve();
            let seconds = started.elapsed().as_secs_f64();

            let SolveOutcome::Solved(solution) = outcome else {
                eprintln!(
                    "Error: {} found no solution for board {} (Seed: {}), which is solvable.",
                    name, board_idx, current_seed
                );
                continue;
            };

            if algorithm.is_optimal() {
                match optimal_steps {
                    None => optimal_steps = Some(solution.steps()),
                    Some(expected) if expected != solution.steps() => eprintln!(
                        "Warning: {} returned {} moves, expected {}.",
                        name,
                        solution.steps(),
                        expected
                    ),
                    Some(_) => {}
                }
            }

            println!(
                "  Strategy: {:<16} Moves: {:<6} Expanded: {:<8} Time: {:.3}s",
                name,
                solution.steps(),
                solution.stats.expanded,
                seconds
            );
            let entry = totals.entry(name).or_default();
            entry.steps += solution.steps();
            entry.expanded += solution.stats.expanded;
            entry.seconds += seconds;
            entry.runs += 1;
        }
    }

    println!("\n--- Evaluation Complete ---");
    println!("Number of boards evaluated: {}", args.boards);
    println!("\n--- Averages ---");

    let mut averages: Vec<(&String, f64, f64, f64)> = totals
        .iter()
        .filter(|(_, t)| t.runs > 0)
        .map(|(name, t)| {
            let runs = t.runs as f64;
            (
                name,
                t.steps as f64 / runs,
                t.expanded as f64 / runs,
                t.seconds / runs,
            )
        })
        .collect();

    // Fewest expansions first
    averages.sort_by(|a, b| a.2.partial_cmp(&b.2).unwrap_or(std::cmp::Ordering::Equal));

    for (name, steps, expanded, seconds) in averages {
        println!(
            "Strategy {:<16}: Moves = {:.2}, Expanded = {:.0}, Time = {:.3}s",
            name, steps, expanded, seconds
        );
    }
    Ok(())
}
