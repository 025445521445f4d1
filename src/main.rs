use anyhow::Context;
use clap::Parser;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use skyward::core::constants::{CONFIG_FILE, IDLE_POLL_MS, LOG_FILE};
use skyward::input::{map_event, InputAction};
use skyward::simulation::ControlMode;
use skyward::ui;
use skyward::utils::logging;
use skyward::utils::persistence::{data_path, BestScoreStore, JsonScoreStore, MemoryScoreStore};
use skyward::{GameConfig, Session};
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "skyward", version, about = "Steer a bird through scrolling pipes")]
struct Cli {
    /// Control scheme
    #[arg(long, value_enum, default_value_t = ControlMode::Discrete)]
    mode: ControlMode,

    /// Tuning file (TOML); defaults to ~/.skyward/config.toml when present
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for pipe placement
    #[arg(long)]
    seed: Option<u64>,

    /// Log file; defaults to ~/.skyward/skyward.log
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Clear the stored best score before playing
    #[arg(long)]
    reset_best: bool,
}

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Terminal features switched on for this run, undone on exit.
struct TerminalGuard {
    mouse: bool,
    enhanced_keys: bool,
}

impl TerminalGuard {
    fn enter(mode: ControlMode) -> anyhow::Result<Self> {
        enable_raw_mode().context("enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;

        let mouse = mode == ControlMode::Pursuit;
        if mouse {
            execute!(stdout, EnableMouseCapture)?;
        }

        // Key release events need the kitty keyboard protocol.
        let enhanced_keys =
            mode == ControlMode::Discrete && supports_keyboard_enhancement().unwrap_or(false);
        if enhanced_keys {
            execute!(
                stdout,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        }
        Ok(Self {
            mouse,
            enhanced_keys,
        })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        if self.enhanced_keys {
            let _ = execute!(stdout, PopKeyboardEnhancementFlags);
        }
        if self.mouse {
            let _ = execute!(stdout, DisableMouseCapture);
        }
        let _ = execute!(stdout, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_path = match &cli.log_file {
        Some(path) => path.clone(),
        None => data_path(LOG_FILE).context("locate data directory")?,
    };
    logging::init(&log_path)?;

    let config = load_config(cli.config.as_ref())?;
    let store = open_store();

    let guard = TerminalGuard::enter(cli.mode)?;
    let hold_frames = guard.enhanced_keys.then_some(0);
    info!(mode = ?cli.mode, release_events = guard.enhanced_keys, "terminal ready");

    let now = Instant::now();
    let control = cli
        .mode
        .build(&config.bird, config.field.height / 2.0, hold_frames);
    let rng = match cli.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    let mut session = Session::new(&config, control, store, rng, now);
    if cli.reset_best {
        session.clear_best();
    }

    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    terminal.hide_cursor()?;
    let result = run(&mut terminal, &mut session, cli.mode, config.field.height);
    terminal.show_cursor()?;
    drop(guard);

    let best = session.world().best_score;
    info!(best, "exiting");
    println!("Best score: {}", best);
    result
}

/// An explicit `--config` must load; the default location is optional.
fn load_config(explicit: Option<&PathBuf>) -> anyhow::Result<GameConfig> {
    let config = match explicit {
        Some(path) => GameConfig::load_from_file(path)?,
        None => match data_path(CONFIG_FILE) {
            Ok(path) => {
                let (config, error) = GameConfig::load_or_default(&path);
                if let Some(e) = error {
                    warn!(error = %e, "using default config");
                }
                config
            }
            Err(e) => {
                warn!(error = %e, "no data directory, using default config");
                GameConfig::default()
            }
        },
    };

    let (config, warnings) = config.sanitized();
    for w in warnings {
        warn!("config: {w}");
    }
    Ok(config)
}

/// Best scores go to ~/.skyward/; without a home directory they only live
/// for this run.
fn open_store() -> Box<dyn BestScoreStore> {
    match JsonScoreStore::in_data_dir() {
        Ok(store) => Box::new(store),
        Err(e) => {
            warn!(error = %e, "best score will not be saved");
            Box::new(MemoryScoreStore::default())
        }
    }
}

fn run<S: BestScoreStore>(
    terminal: &mut Tui,
    session: &mut Session<S>,
    mode: ControlMode,
    field_height: f64,
) -> anyhow::Result<()> {
    let mut play_area: Option<Rect> = None;

    loop {
        session.frame(Instant::now());

        let snapshot = session.snapshot();
        terminal.draw(|frame| {
            play_area = ui::draw(frame, session.world(), &snapshot);
        })?;

        let timeout = session
            .time_until_next_frame(Instant::now())
            .unwrap_or(Duration::from_millis(IDLE_POLL_MS));
        if !event::poll(timeout)? {
            continue;
        }

        // Drain everything queued so input never lags behind frames.
        loop {
            let ev = event::read()?;
            match map_event(&ev, mode, play_area, field_height) {
                InputAction::Control(input) => session.control_input(input),
                InputAction::Command(command) => {
                    session.command(command, Instant::now());
                }
                InputAction::Quit => return Ok(()),
                InputAction::None => {}
            }
            if !event::poll(Duration::ZERO)? {
                break;
            }
        }
    }
}
