use std::env;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use space_shooter::audio::{Audio, Silent, TerminalBell};
use space_shooter::config::GameConfig;
use space_shooter::display::TerminalRenderer;
use space_shooter::game;
use space_shooter::input::{spawn_event_reader, KeyTracker};
use space_shooter::score::HighScoreStore;

#[derive(Parser, Debug)]
#[command(name = "space_shooter")]
#[command(about = "Shoot the descending saucers before one reaches your ship")]
struct Args {
    /// TOML file overriding any of the default game settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// File holding the persisted high score
    #[arg(long, default_value = "High-score.txt")]
    high_score_file: PathBuf,

    /// Seed for enemy placement (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Where log output goes; the terminal itself is busy drawing the game
    #[arg(long, default_value = "space_shooter.log")]
    log_file: PathBuf,

    /// Disable sound cues
    #[arg(long)]
    mute: bool,
}

/// `RUST_LOG`-style directives, falling back to `info` when absent or unparsable.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(env::var(EnvFilter::DEFAULT_ENV).ok().as_deref()))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_file)?;

    let config = match &args.config {
        Some(path) => GameConfig::load_from_file(path)?,
        None => GameConfig::default(),
    };
    config.validate()?;
    tracing::info!(?config, "configuration loaded");

    // Fail before touching the terminal if the high score is unusable
    let store = HighScoreStore::open(&args.high_score_file)?;

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(terminal::SetTitle(&config.title))?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    let mut input = KeyTracker::new(spawn_event_reader());
    let mut audio: Box<dyn Audio> = if args.mute {
        Box::new(Silent)
    } else {
        Box::new(TerminalBell::new(stdout()))
    };

    let result = game::run(
        &config,
        &store,
        &mut TerminalRenderer::new(&mut out),
        &mut audio,
        &mut input,
        rng,
    );

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
    let _ = out.flush();

    if let Err(e) = &result {
        tracing::error!("game loop failed: {e}");
    }
    result.context("game loop failed")
}
