use clap::Parser;
use eight_puzzle::config::SolverConfig;
use eight_puzzle::engine::{State, BOARD_SIZE};
use eight_puzzle::heuristics::Heuristic;
use eight_puzzle::logging;
use eight_puzzle::solver::{Algorithm, SolveOutcome};
use eight_puzzle::utils::{parse_state, state_from_str_array};
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::{Duration, Instant};
use tracing::warn;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Path to a board file (three rows of three cells, or nine cells on one line)
    board_file: Option<PathBuf>,

    /// Board given inline, e.g. "123/456/780"
    #[clap(short, long, conflicts_with = "board_file")]
    board: Option<String>,

    /// Seed for a random solvable board when no board is given
    #[clap(short, long)]
    seed: Option<u64>,

    /// Search algorithm (overrides the config file)
    #[clap(short, long, value_enum)]
    algorithm: Option<Algorithm>,

    /// Heuristic for A* (overrides the config file)
    #[clap(long, value_enum)]
    heuristic: Option<Heuristic>,

    /// Goal board given inline (defaults to 123/456/780)
    #[clap(short, long)]
    goal: Option<String>,

    /// TOML configuration file
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Give up after this many seconds
    #[clap(short, long)]
    timeout: Option<u64>,

    /// Pause between printed steps, in milliseconds
    #[clap(long, default_value_t = 0)]
    delay_ms: u64,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn read_board_file(path: &Path) -> Result<State, Box<dyn Error>> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

    let lines: Vec<&str> = content
        .lines()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();

    let state = if lines.len() == BOARD_SIZE {
        state_from_str_array(&lines)?
    } else {
        parse_state(&content)?
    };
    Ok(state)
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    logging::init(args.verbose);

    let mut config = match &args.config {
        Some(path) => SolverConfig::load(path)?,
        None => SolverConfig::default(),
    };
    if let Some(algorithm) = args.algorithm {
        config.algorithm = algorithm;
    }
    if let Some(heuristic) = args.heuristic {
        config.heuristic = heuristic;
    }
    if let Some(goal) = &args.goal {
        config.goal = Some(*parse_state(goal)?.grid());
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let start = if let Some(path) = &args.board_file {
        println!("Loaded board from {}\n", path.display());
        read_board_file(path)?
    } else if let Some(board) = &args.board {
        parse_state(board)?
    } else {
        let seed = config.seed.unwrap_or_else(rand::random);
        println!("Generated board from seed {}\n", seed);
        State::random_solvable_with_seed(seed)
    };

    let puzzle = config.build_puzzle(start)?;
    if !puzzle.start().is_solvable_from(puzzle.goal()) {
        warn!("start and goal have different parity; the search will exhaust the state space");
    }

    println!("Initial board state:\n{}\n", puzzle.start());
    println!("Goal board state:\n{}\n", puzzle.goal());
    println!(
        "Searching with {} (heuristic: {})...\n",
        puzzle.algorithm(),
        puzzle.heuristic()
    );

    // The search runs on a worker so the timeout can be enforced from here.
    let cancel = Arc::new(AtomicBool::new(false));
    let (tx, rx) = mpsc::channel();
    let worker = {
        let cancel = Arc::clone(&cancel);
        let puzzle = puzzle.clone();
        thread::spawn(move || {
            let outcome = puzzle.solve_with_cancel(&cancel);
            let _ = tx.send(outcome);
        })
    };

    let started = Instant::now();
    let outcome = match args.timeout {
        Some(secs) => match rx.recv_timeout(Duration::from_secs(secs)) {
            Ok(outcome) => outcome,
            Err(_) => {
                cancel.store(true, Ordering::Relaxed);
                rx.recv()?
            }
        },
        None => rx.recv()?,
    };
    let elapsed = started.elapsed();
    worker.join().map_err(|_| "search thread panicked")?;

    match &outcome {
        SolveOutcome::Solved(solution) => {
            println!("Solution found:\n");
            for (i, state) in solution.path.iter().enumerate() {
                if i == 0 {
                    println!("Step 0 (start):");
                } else {
                    println!("Step {}: blank {}", i, solution.moves[i - 1]);
                }
                println!("{}\n", state);
                if args.delay_ms > 0 {
                    thread::sleep(Duration::from_millis(args.delay_ms));
                }
            }
            println!("Moves: {}", solution.steps());
        }
        SolveOutcome::NoSolution(_) => {
            println!("No solution exists between the start and goal boards.");
        }
        SolveOutcome::Cancelled(_) => {
            println!("Search cancelled after {:.2}s.", elapsed.as_secs_f64());
        }
    }

    let stats = outcome.stats();
    println!(
        "Time: {:.2}s | Expanded: {} | Generated: {} | Max frontier: {}",
        elapsed.as_secs_f64(),
        stats.expanded,
        stats.generated,
        stats.max_frontier
    );
    Ok(())
}
