mod app;
mod report;
mod spinner;
mod tui;
mod ui;

use std::io::{self, BufRead, Write, stdout};

use clap::{ArgAction, Parser};
use color_eyre::Result;
use crossterm::{
    execute,
    style::Stylize,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode, enable_raw_mode,
    },
};
use crumbs_core::{
    Catalog, Cleaner, DiskProbe, DiscoveredEntry, DiscoveryOptions, PathResolver,
    SafetyValidator, SessionEnd, SystemDisk, discover, run_session,
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

use app::AppState;
use spinner::with_spinner;
use tui::TuiSession;

/// CRUMBS - Interactive Terminal Cache Cleaner
#[derive(Parser, Debug)]
#[command(name = "crumbs")]
#[command(about = "Find application cache directories and empty the ones you pick")]
#[command(version)]
struct Args {
    /// Report what would be deleted without deleting anything
    #[arg(long)]
    dry_run: bool,

    /// Skip the greeting and terminal title setup
    #[arg(long)]
    no_init: bool,

    /// Log to stderr; repeat for more detail (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    // Log lines and the spinner share the terminal, so only one of them runs
    let animate = !init_logging(args.verbose);

    let resolver = PathResolver::require_home()?;
    let catalog = Catalog::for_host();
    tracing::info!(
        platform = catalog.platform().label(),
        targets = catalog.len(),
        "catalog loaded"
    );

    if !args.no_init {
        greet(&catalog);
    }

    let options = DiscoveryOptions::default();
    let found = with_spinner("Looking for caches...", animate, || {
        discover(&catalog, &resolver, &options)
    });
    if found.is_empty() {
        println!("No cache directories found. Nothing to clean.");
        return Ok(());
    }

    let disk = SystemDisk::for_host();
    let selection = match run_menu(found, args.dry_run, disk.snapshot())? {
        SessionEnd::Committed(selection) => selection,
        SessionEnd::Interrupted => {
            println!("Nothing was deleted. Bye!");
            return Ok(());
        }
        SessionEnd::NothingFound => {
            println!("No cache directories found. Nothing to clean.");
            return Ok(());
        }
    };

    let cleaner = Cleaner::new(resolver, SafetyValidator::for_host(), disk);
    let label = if args.dry_run {
        "Checking selected caches..."
    } else {
        "Cleaning selected caches..."
    };
    let report = with_spinner(label, animate, || {
        cleaner.clean(selection.entries(), args.dry_run)
    });

    report::print_report(&report)?;
    wait_for_enter()?;

    Ok(())
}

/// `RUST_LOG` wins; otherwise each `-v` raises the level one step.
/// Returns whether any log output is enabled.
fn init_logging(verbose: u8) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));
    let enabled = logs_anything(&filter);

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
    enabled
}

fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "off",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn logs_anything(filter: &EnvFilter) -> bool {
    filter.max_level_hint() != Some(LevelFilter::OFF)
}

/// Greeting line for the terminal size; the size is cosmetic
fn terminal_size_line(size: Option<(u16, u16)>) -> String {
    match size {
        Some((cols, rows)) => format!("System: Terminal size {}x{}", cols, rows),
        None => "System: Terminal size unknown".to_string(),
    }
}

/// Title the terminal window. Returns false if the terminal refused.
fn set_title<W: Write>(out: &mut W) -> bool {
    match execute!(out, SetTitle(format!("crumbs {}", env!("CARGO_PKG_VERSION")))) {
        Ok(()) => true,
        Err(e) => {
            tracing::debug!(error = %e, "could not set terminal title");
            false
        }
    }
}

fn greet(catalog: &Catalog) {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "there".to_string());

    set_title(&mut stdout());

    println!(
        "{} {}",
        "crumbs".blue().bold(),
        env!("CARGO_PKG_VERSION").dim()
    );
    println!("Hi {}! Checking {} known cache locations.", user, catalog.len());

    let size = crossterm::terminal::size()
        .inspect_err(|e| tracing::debug!(error = %e, "terminal size unavailable"))
        .ok();
    println!("{}", terminal_size_line(size).dim());
}

fn run_menu(
    entries: Vec<DiscoveredEntry>,
    dry_run: bool,
    disk: Option<crumbs_core::DiskSnapshot>,
) -> Result<SessionEnd> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut session = TuiSession::new(&mut terminal, AppState::new(dry_run, disk));
    let end = run_session(entries, &mut session);
    let failure = session.take_error();

    // Restore terminal
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;

    match failure {
        Some(e) => Err(e),
        None => Ok(end),
    }
}

fn wait_for_enter() -> Result<()> {
    print!("\nPress ENTER to exit...");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(())
}
