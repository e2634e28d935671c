//! Puzzle Engine CLI
//!
//! `wordle` drives the entropy solver (one-shot, simulated solve, benchmark
//! or an interactive loop); `connections` partitions a 16 word puzzle.

use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::warn;
use rand::seq::SliceRandom;
use rand::thread_rng;

use puzzle_engine::demo::{pick_demo, DemoPuzzle, DEMO_PUZZLES};
use puzzle_engine::embedding::{fallback_embedding, EmbeddingStore, DEFAULT_FALLBACK_DIMS};
use puzzle_engine::partition::ITEM_COUNT;
use puzzle_engine::{
    codec, load_dictionary, solve_connections, solve_to_target, ConnectionsConfig,
    FeedbackPattern, FilterKind, SolverConfig, Step, WordTable, WordleSolver,
};

/// Entropy Wordle solver and Connections partitioner
#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    /// Debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Suggest guesses, simulate a solve, or play interactively
    Wordle(WordleArgs),
    /// Split 16 words into four groups of four
    Connections(ConnectionsArgs),
}

#[derive(clap::Args)]
struct WordleArgs {
    /// Five letter word list (whitespace or line separated)
    #[arg(short, long)]
    dict: PathBuf,

    /// Secret word: simulate a solve, or give automatic feedback interactively
    #[arg(short, long)]
    target: Option<String>,

    /// Maximum guesses
    #[arg(long, default_value_t = 6)]
    max_steps: usize,

    /// Only guess words that are still possible answers
    #[arg(long)]
    hard: bool,

    /// Interactive loop
    #[arg(short, long)]
    interactive: bool,

    /// Absurdle-style play: feedback keeps the most words alive
    #[arg(long, requires = "interactive", conflicts_with = "target")]
    adversarial: bool,

    /// Candidate filter implementation
    #[arg(long, value_enum, default_value_t = FilterKind::Lanes)]
    filter: FilterKind,

    /// Show the N best opening guesses
    #[arg(long, default_value_t = 1)]
    top: usize,

    /// Solve every word in the list and report the distribution
    #[arg(long, conflicts_with_all = ["interactive", "target"])]
    benchmark: bool,

    /// Print per-turn search and filter timings
    #[arg(long)]
    profile: bool,

    /// JSON output
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum EmbeddingFormat {
    Text,
    Word2vec,
}

#[derive(clap::Args)]
struct ConnectionsArgs {
    /// The 16 puzzle words (whitespace or line separated)
    #[arg(short, long, required_unless_present = "demo", conflicts_with = "demo")]
    words: Option<PathBuf>,

    /// Use a built-in puzzle with known answers: random, or number N (1-based)
    #[arg(long, value_name = "N", num_args = 0..=1)]
    demo: Option<Option<usize>>,

    /// Shuffle the word order before solving
    #[arg(long, conflicts_with = "demo")]
    shuffle: bool,

    /// Embedding vectors
    #[arg(short, long)]
    embeddings: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = EmbeddingFormat::Text)]
    embeddings_format: EmbeddingFormat,

    /// Use deterministic hash vectors for words without embeddings
    #[arg(long)]
    allow_fallback: bool,

    /// Blend lexical similarity in, for wordplay puzzles
    #[arg(long)]
    hard: bool,

    /// Weight of the lexical term in [0, 1]
    #[arg(long, default_value_t = 0.25)]
    lexical_weight: f64,

    /// Number of ambiguous words to list
    #[arg(long, default_value_t = 3)]
    red_herrings: usize,

    /// JSON output
    #[arg(long)]
    json: bool,
}

struct Spinner {
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Spinner {
    fn new(message: &'static str) -> Self {
        let running = Arc::new(AtomicBool::new(true));
        let running_clone = running.clone();
        let handle = thread::spawn(move || {
            let frames = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
            let mut i = 0;
            while running_clone.load(Ordering::Relaxed) {
                eprint!("\r{} {}", frames[i % frames.len()], message);
                let _ = io::stderr().flush();
                thread::sleep(Duration::from_millis(80));
                i += 1;
            }
            eprint!("\r{}\r", " ".repeat(message.len() + 3));
            let _ = io::stderr().flush();
        });
        Self {
            running,
            handle: Some(handle),
        }
    }

    fn stop(mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match args.command {
        Command::Wordle(args) => run_wordle(args),
        Command::Connections(args) => run_connections(args),
    }
}

fn run_wordle(args: WordleArgs) -> Result<()> {
    let table = load_dictionary(&args.dict)
        .with_context(|| format!("reading {}", args.dict.display()))?;
    if table.is_empty() {
        bail!("no five letter words in {}", args.dict.display());
    }

    let config = SolverConfig {
        max_steps: args.max_steps,
        hard_mode: args.hard,
        filter: args.filter,
    };

    let target = match &args.target {
        Some(raw) => {
            let normalized = codec::normalize(raw);
            if !codec::is_valid(&normalized) {
                bail!("invalid Wordle target: {raw}");
            }
            Some(normalized)
        }
        None => None,
    };

    if args.benchmark {
        return run_benchmark(&table, config, args.json);
    }
    if args.interactive {
        return run_interactive(&table, config, target.as_deref(), args.adversarial, args.profile);
    }

    match target {
        Some(target) => {
            let start = Instant::now();
            let (steps, timings) = if args.profile {
                solve_profiled(&table, &target, config)
            } else {
                (solve_to_target(&table, &target, config), Vec::new())
            };
            if args.json {
                println!("{}", serde_json::to_string_pretty(&steps)?);
            } else {
                println!("Solving for: {}", target.to_uppercase());
                println!();
                print_steps(&steps);
                for (i, elapsed) in timings.iter().enumerate() {
                    println!("Perf: turn {} search={}us", i + 1, elapsed.as_micros());
                }
                println!("Time: {:.2?}", start.elapsed());
            }
        }
        None => {
            let solver = WordleSolver::with_config(&table, config);
            let top = solver.find_best_guesses(args.top.max(1));
            if args.json {
                println!("{}", serde_json::to_string_pretty(&top)?);
            } else {
                println!("{:>4} {:>8} {:>8} {:>12}", "#", "Word", "Entropy", "Exp. Remain");
                println!("{}", "-".repeat(36));
                for (i, analysis) in top.iter().enumerate() {
                    println!(
                        "{:>4} {:>8} {:>8.3} {:>12.1}",
                        i + 1,
                        analysis.word.to_uppercase(),
                        analysis.entropy,
                        analysis.expected_remaining
                    );
                }
            }
        }
    }
    Ok(())
}

/// Simulated solve that also records how long each guess took to choose.
fn solve_profiled(
    table: &WordTable,
    target: &str,
    config: SolverConfig,
) -> (Vec<Step>, Vec<Duration>) {
    let mut solver = WordleSolver::with_config(table, config);
    let target = codec::encode(target);
    let mut timings = Vec::new();
    let mut last = Instant::now();
    let steps = solver.solve_with_feedback(|guess| {
        timings.push(last.elapsed());
        let pattern = FeedbackPattern::calculate(guess, target);
        last = Instant::now();
        pattern
    });
    (steps, timings)
}

fn print_steps(steps: &[Step]) {
    for (i, step) in steps.iter().enumerate() {
        println!(
            "Guess {}: {} {} {}  entropy={:.4} info={:.4}  ({} -> {})",
            i + 1,
            step.guess.to_uppercase(),
            step.pattern.to_digit_string(),
            step.pattern,
            step.entropy,
            step.info_bits,
            step.remaining,
            step.remaining_after
        );
    }
    println!();
    match steps.last() {
        Some(step) if step.pattern.is_win() => {
            println!("Solved in {} guesses.", steps.len())
        }
        Some(step) if step.remaining_after == 0 => {
            println!("Target is not in the word list.")
        }
        Some(_) => println!("Not solved within {} guesses.", steps.len()),
        None => println!("Nothing to solve."),
    }
}

fn run_benchmark(table: &WordTable, config: SolverConfig, json: bool) -> Result<()> {
    let solver = WordleSolver::with_config(table, config);

    let spinner = Spinner::new("Running benchmark...");
    let start = Instant::now();
    let distribution = solver.benchmark_guess_distribution();
    let elapsed = start.elapsed();
    spinner.stop();

    if json {
        println!("{}", serde_json::to_string_pretty(&distribution)?);
        return Ok(());
    }

    let total: usize = distribution.iter().map(|(_, c)| c).sum();
    let total_guesses: usize = distribution.iter().map(|(g, c)| g * c).sum();
    let average = total_guesses as f64 / total.max(1) as f64;

    println!("Guess distribution:");
    for (guesses, count) in &distribution {
        let pct = *count as f64 / total as f64 * 100.0;
        let bar = "█".repeat((*count * 40 / total).max(1));
        let label = if *guesses > config.max_steps {
            "failed".to_string()
        } else {
            format!("{guesses} guesses")
        };
        println!("  {label:>9}: {count:>5} ({pct:>5.1}%) {bar}");
    }
    println!();
    println!("Average guesses: {:.3}", average);
    println!("Total words: {}", total);
    println!("Time elapsed: {:.2?}", elapsed);
    Ok(())
}

fn print_help(auto: bool) {
    println!("Commands:");
    println!("  suggest | s              best next guess");
    println!("  top [n] | t [n]          n best guesses (default 5)");
    if auto {
        println!("  guess <word> | g <word>  play a word, feedback is automatic");
    } else {
        println!("  feedback <word> <pattern> | f ...");
        println!("                           e.g. f crane 20100 or f crane gbybb");
    }
    println!("  remaining | r            list remaining words");
    println!("  hard                     toggle hard mode");
    println!("  reset                    start over");
    println!("  quit | q");
}

fn run_interactive(
    table: &WordTable,
    config: SolverConfig,
    target: Option<&str>,
    adversarial: bool,
    profile: bool,
) -> Result<()> {
    let mut solver = WordleSolver::with_config(table, config);
    let auto = target.is_some() || adversarial;
    let target_packed = target.map(codec::encode);
    let mut round = 0usize;

    println!("Loaded {} words.", table.len());
    if adversarial {
        println!("Adversarial mode: feedback keeps as many words alive as possible.");
    } else if auto {
        println!("Automatic feedback enabled.");
    }
    println!("Type 'help' for commands or 'suggest' to get started.");
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }

        match parts[0].to_lowercase().as_str() {
            "help" | "h" | "?" => print_help(auto),
            "quit" | "exit" | "q" => break,
            "suggest" | "s" | "best" => {
                let start = Instant::now();
                let best = solver.find_best_guess();
                if profile {
                    println!("Perf: search={}us", start.elapsed().as_micros());
                }
                match best {
                    Some(analysis) => {
                        println!("Best guess: {}", analysis.word.to_uppercase());
                        println!("  Entropy: {:.3} bits", analysis.entropy);
                        println!("  Expected remaining: {:.1} words", analysis.expected_remaining);
                        if analysis.is_possible_answer {
                            println!("  ✓ This word is a possible answer");
                        } else {
                            println!("  ✗ This word is NOT a possible answer");
                        }
                        println!("Remaining possibilities: {}", solver.remaining_count());
                        println!();
                    }
                    None => println!("No possible words remaining. Use 'reset' to start over."),
                }
            }
            "top" | "t" => {
                let n: usize = parts.get(1).and_then(|s| s.parse().ok()).unwrap_or(5);
                for (i, analysis) in solver.find_best_guesses(n).iter().enumerate() {
                    println!(
                        "{:>4} {:>8} {:>8.3} {:>12.1} {}",
                        i + 1,
                        analysis.word.to_uppercase(),
                        analysis.entropy,
                        analysis.expected_remaining,
                        if analysis.is_possible_answer { "✓" } else { "" }
                    );
                }
            }
            "hard" | "hardmode" => {
                let enabled = !solver.is_hard_mode();
                solver.set_hard_mode(enabled);
                println!("Hard mode: {}", if enabled { "ON" } else { "OFF" });
            }
            "remaining" | "r" | "left" => {
                let remaining = solver.possible_answers();
                println!("Remaining possibilities: {}", remaining.len());
                for chunk in remaining.chunks(10).take(5) {
                    let row: Vec<String> =
                        chunk.iter().map(|w| format!("{:>8}", w.to_uppercase())).collect();
                    println!("{}", row.join(""));
                }
            }
            "reset" => {
                solver.reset();
                round = 0;
                println!(
                    "Reset to initial state. {} words available.",
                    solver.remaining_count()
                );
            }
            "guess" | "g" if auto => {
                let Some(&word) = parts.get(1) else {
                    println!("Usage: guess <word>");
                    continue;
                };
                let pattern = match target_packed {
                    Some(target) if codec::is_valid(&codec::normalize(word)) => {
                        let guess = codec::encode(&codec::normalize(word));
                        FeedbackPattern::calculate(guess, target)
                    }
                    Some(_) => {
                        println!("Invalid guess: {word}");
                        continue;
                    }
                    None => match solver.adversarial_feedback(word) {
                        Ok(pattern) => pattern,
                        Err(e) => {
                            println!("{e}");
                            continue;
                        }
                    },
                };
                if report_feedback(&mut solver, word, pattern, &mut round, profile) {
                    break;
                }
            }
            "feedback" | "f" | "fb" if !auto => {
                if parts.len() < 3 {
                    println!("Usage: feedback <word> <pattern>");
                    continue;
                }
                let Some(pattern) = FeedbackPattern::parse(parts[2]) else {
                    println!("Invalid pattern: {} (use 5 of 0/1/2 or b/y/g)", parts[2]);
                    continue;
                };
                if report_feedback(&mut solver, parts[1], pattern, &mut round, profile) {
                    break;
                }
            }
            other => {
                println!("Unknown command: {other}");
                println!("Type 'help' for available commands.");
            }
        }
    }
    Ok(())
}

/// Apply one round and print the outcome. Returns true when play is over.
fn report_feedback(
    solver: &mut WordleSolver,
    word: &str,
    pattern: FeedbackPattern,
    round: &mut usize,
    profile: bool,
) -> bool {
    let before = solver.remaining_count();
    let start = Instant::now();
    let after = match solver.apply_feedback(word, pattern) {
        Ok(after) => after,
        Err(e) => {
            println!("{e}");
            return false;
        }
    };
    let elapsed = start.elapsed();
    *round += 1;

    println!("{} {} {}", word.to_uppercase(), pattern.to_digit_string(), pattern);
    println!("Eliminated {} words ({} → {})", before - after, before, after);
    if profile {
        println!("Perf: filter={}us", elapsed.as_micros());
    }

    if pattern.is_win() {
        println!("🎉 Solved in {round} guesses!");
        return true;
    }
    if after == 0 {
        println!("⚠️  No words match this feedback. Use 'reset' to start over.");
    } else if after <= 10 {
        let remaining = solver.possible_answers().join(", ");
        println!("Remaining words: {}", remaining.to_uppercase());
    }
    let max_steps = solver.config().max_steps;
    if *round >= max_steps {
        println!("Out of rounds ({max_steps}).");
        return true;
    }
    false
}

fn read_words(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path).with_context(|| format!("reading {}", path.display()))?;
    let mut words = Vec::new();
    for line in BufReader::new(file).lines() {
        words.extend(line?.split_whitespace().map(|w| w.to_ascii_lowercase()));
    }
    Ok(words)
}

fn load_vectors(args: &ConnectionsArgs, words: &[String]) -> Result<Vec<Vec<f64>>> {
    let store = match &args.embeddings {
        Some(path) => {
            let needed: HashSet<String> = words.iter().cloned().collect();
            let file = File::open(path).with_context(|| format!("reading {}", path.display()))?;
            let reader = BufReader::new(file);
            let loaded = match args.embeddings_format {
                EmbeddingFormat::Text => EmbeddingStore::load_text(reader, &needed),
                EmbeddingFormat::Word2vec => EmbeddingStore::load_word2vec(reader, &needed),
            };
            match loaded {
                Ok(store) => Some(store),
                Err(e) if args.allow_fallback => {
                    warn!("{}: {e}; using fallback vectors", path.display());
                    None
                }
                Err(e) => {
                    return Err(e).with_context(|| format!("loading {}", path.display()));
                }
            }
        }
        None if args.allow_fallback => None,
        None => bail!("connections needs --embeddings or --allow-fallback"),
    };

    Ok(match store {
        Some(store) if args.allow_fallback => store.lookup_or_fallback(words),
        Some(store) => store.lookup(words)?,
        None => words
            .iter()
            .map(|w| fallback_embedding(w, DEFAULT_FALLBACK_DIMS))
            .collect(),
    })
}

/// The requested built-in puzzle; `None` picks one at random.
fn choose_demo(number: Option<usize>) -> Result<(usize, &'static DemoPuzzle)> {
    match number {
        Some(n) if (1..=DEMO_PUZZLES.len()).contains(&n) => Ok((n - 1, &DEMO_PUZZLES[n - 1])),
        Some(n) => bail!("demo puzzle {n} does not exist (1-{})", DEMO_PUZZLES.len()),
        None => Ok(pick_demo(&mut thread_rng())),
    }
}

fn run_connections(args: ConnectionsArgs) -> Result<()> {
    let (mut words, demo) = match (&args.words, args.demo) {
        (_, Some(number)) => {
            let (index, puzzle) = choose_demo(number)?;
            println!("Using built-in demo puzzle #{}.", index + 1);
            (puzzle.words(), Some(puzzle))
        }
        (Some(path), None) => (read_words(path)?, None),
        (None, None) => bail!("connections needs --words or --demo"),
    };
    if words.len() != ITEM_COUNT {
        bail!("expected {ITEM_COUNT} words, found {}", words.len());
    }
    if args.shuffle {
        words.shuffle(&mut thread_rng());
    }
    let vectors = load_vectors(&args, &words)?;

    let config = ConnectionsConfig {
        hybrid: args.hard,
        lexical_weight: args.lexical_weight,
        red_herrings: args.red_herrings,
    };

    let start = Instant::now();
    let mut report = solve_connections(&words, &vectors, &config)?;
    let elapsed = start.elapsed();
    let found = demo.map(|puzzle| puzzle.label_report(&mut report));

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Best score: {:.4}", report.score);
    let mut groups: Vec<_> = report.groups.iter().collect();
    groups.sort_by_key(|g| g.difficulty);
    for group in groups {
        println!(
            "  {}: {}  | score={:.3} avg_sim={:.3} conf={:.3}",
            group.label,
            group.words.join(", "),
            group.score,
            group.average_similarity,
            group.confidence
        );
    }
    if !report.red_herrings.is_empty() {
        println!("Red herrings (small margin): {}", report.red_herrings.join(", "));
    }
    if let (Some(puzzle), Some(found)) = (demo, found) {
        println!("Found {found} of {} answer groups.", puzzle.labels.len());
        for (label, answer) in puzzle.labels.iter().zip(puzzle.words.chunks(4)) {
            println!("  {}: {}", label, answer.join(", "));
        }
    }
    println!("Time: {:.2?}", elapsed);
    Ok(())
}
