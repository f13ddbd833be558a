use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Mutex;

use clap::Parser;
use sweeper::config::{self, Config};
use sweeper::engine::{ClickOutcome, RoundStatus};
use sweeper::game::Game;
use sweeper::tui;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "sweeper", about = "Minesweeper in the terminal", version)]
struct Args {
    /// Line-oriented text mode instead of the mouse-driven board
    #[arg(long)]
    plain: bool,
    /// Board rows
    #[arg(long, default_value_t = config::ROWS)]
    rows: usize,
    /// Board columns
    #[arg(long, default_value_t = config::COLS)]
    cols: usize,
    /// Number of mines
    #[arg(long, default_value_t = config::MINES)]
    mines: usize,
    /// Seed for reproducible boards
    #[arg(long)]
    seed: Option<u64>,
    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
    /// More log output (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(args: &Args) -> io::Result<()> {
    let level = match args.verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let filter = EnvFilter::builder().with_default_directive(level.into()).from_env_lossy();
    match &args.log_file {
        Some(path) => {
            let file = File::create(path)?;
            tracing_subscriber::fmt().with_env_filter(filter).with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        // The TUI owns the terminal, so it only logs to a file.
        None if args.plain => {
            tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
        }
        None => {}
    }
    Ok(())
}

fn print_help() {
    println!("Commands:");
    println!("  r row col - reveal cell (1-based); on an uncovered number, chord");
    println!("  f row col - toggle flag (1-based)");
    println!("  n         - new round");
    println!("  q         - quit");
    println!("  h/help    - show this help");
}

fn parse_pos(parts: &[&str]) -> Option<(usize, usize)> {
    if parts.len() < 3 { return None; }
    let row = parts[1].parse::<usize>().ok()?;
    let col = parts[2].parse::<usize>().ok()?;
    if row == 0 || col == 0 { return None; }
    Some((row - 1, col - 1))
}

fn run_plain(config: Config) {
    let mut game = match Game::new(config) {
        Ok(g) => g,
        Err(e) => { eprintln!("{}", e); return; }
    };

    let cfg = game.config();
    println!("Minesweeper {}x{} with {} mines{}", cfg.rows, cfg.cols, cfg.mines, cfg.seed.map(|s| format!(" (seed {})", s)).unwrap_or_default());
    println!("Coordinates are 1-based. Type 'h' for help.");
    print_help();

    let mut input = String::new();
    loop {
        let round = game.round();
        println!("\n{}", round);
        if round.status().is_over() {
            match round.status() {
                RoundStatus::Lost => println!("You lose! D:\n"),
                _ => println!("You WIN! :)\n"),
            }
            println!("Final board (mines shown):\n{}", round.render(true, true));
            if let Err(e) = game.reset() { eprintln!("{}", e); break; }
            println!("New round.");
            continue;
        }
        println!("Mines left: {}  Moves: {}", round.mines_left(), round.moves());

        print!("> ");
        let _ = io::stdout().flush();
        input.clear();
        match io::stdin().read_line(&mut input) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let line = input.trim();
        if line.is_empty() { continue; }

        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts[0].to_lowercase().as_str() {
            "q" | "quit" | "exit" => break,
            "h" | "help" => print_help(),
            "n" | "new" => { if let Err(e) = game.reset() { eprintln!("{}", e); break; } }
            "r" | "reveal" => {
                let Some((row, col)) = parse_pos(&parts) else { println!("Usage: r row col (1-based)"); continue; };
                match game.round_mut().primary_click(row, col) {
                    Ok(ClickOutcome::Ignored) => println!("Nothing to reveal there"),
                    Ok(ClickOutcome::Detonated((r, c))) => println!("Boom at {} {}", r + 1, c + 1),
                    Ok(_) => {}
                    Err(e) => println!("{}", e),
                }
            }
            "f" | "flag" => {
                let Some((row, col)) = parse_pos(&parts) else { println!("Usage: f row col (1-based)"); continue; };
                match game.round_mut().secondary_click(row, col) {
                    Ok(true) => {}
                    Ok(false) => println!("Cannot flag an uncovered cell"),
                    Err(e) => println!("{}", e),
                }
            }
            other => println!("Unknown command '{}'. Type 'h' for help.", other),
        }
    }
}

fn main() {
    let args = Args::parse();
    if let Err(e) = init_logging(&args) {
        eprintln!("Cannot open log file: {}", e);
        return;
    }
    let config = Config { rows: args.rows, cols: args.cols, mines: args.mines, seed: args.seed };
    if let Err(e) = config.validate() {
        eprintln!("{}", e);
        return;
    }
    if args.plain {
        run_plain(config);
    } else if let Err(e) = tui::run_tui(config) {
        eprintln!("TUI error: {}", e);
    }
}
