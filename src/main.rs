use anyhow::Context;
use clap::{ArgAction, Parser};
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::style::{Print, ResetColor};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use progress_ellipsis::animations::{Color, Millis};
use progress_ellipsis::render::{EllipsisPollable, MonotonicClock, Pollable, PollableState, TerminalCanvas};
use progress_ellipsis::{Config, ProgressEllipsis};
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::Duration;

/// Play a chasing loading ellipsis in the terminal.
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// The path to the configuration file.
    #[arg(short, long, env = "PROGRESS_ELLIPSIS_CONFIG")]
    config: Option<PathBuf>,

    /// The number of dots.
    #[arg(short, long)]
    quantity: Option<usize>,

    /// The length of a single fade, in milliseconds.
    #[arg(short, long)]
    duration: Option<Millis>,

    /// How far into its fade a dot starts the next one.
    #[arg(short, long)]
    threshold: Option<f32>,

    /// The dot color, as #RRGGBB or #AARRGGBB.
    #[arg(long)]
    color: Option<Color>,

    /// The color the dots are drawn on.
    #[arg(long)]
    background: Option<Color>,

    /// The width of the ellipsis, in columns.
    #[arg(short, long)]
    width: Option<u16>,

    /// Frames drawn per second.
    #[arg(long)]
    fps: Option<u32>,

    /// Exit after drawing this many frames.
    #[arg(long)]
    frames: Option<u64>,

    /// Log more, can be repeated.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn load_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path).with_context(|| format!("loading {}", path.display()))?,
            None => Config::load_default().context("loading default config")?,
        };
        let ellipsis = &mut config.ellipsis;
        ellipsis.quantity = self.quantity.unwrap_or(ellipsis.quantity);
        ellipsis.duration = self.duration.unwrap_or(ellipsis.duration);
        ellipsis.threshold = self.threshold.unwrap_or(ellipsis.threshold);
        ellipsis.color = self.color.unwrap_or(ellipsis.color);

        let terminal = &mut config.terminal;
        terminal.width = self.width.unwrap_or(terminal.width);
        terminal.background = self.background.unwrap_or(terminal.background);
        terminal.fps = self.fps.unwrap_or(terminal.fps);

        config.validate().context("invalid options")?;
        Ok(config)
    }
}

/// Puts the terminal back the way it was found once dropped.
struct TerminalGuard;

impl TerminalGuard {
    fn enter(stdout: &mut Stdout) -> io::Result<Self> {
        enable_raw_mode()?;
        execute!(stdout, Hide)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), ResetColor, Show, Print("\r\n"));
        let _ = disable_raw_mode();
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt().with_writer(io::stderr).with_max_level(level).init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = cli.load_config()?;
    tracing::info!(?config, "starting");

    let canvas = TerminalCanvas::new(io::stdout(), config.terminal.width, config.terminal.background);
    let mut ellipsis = ProgressEllipsis::new(&config.ellipsis);
    ellipsis.on_size_changed(canvas.width().into(), 1);
    let mut pollable =
        EllipsisPollable::new(ellipsis, MonotonicClock::new(), canvas).with_frame_limit(cli.frames);
    let frame_interval = Duration::from_secs(1) / config.terminal.fps;

    let mut stdout = io::stdout();
    let _guard = TerminalGuard::enter(&mut stdout).context("setting up terminal")?;
    loop {
        if event::poll(frame_interval)? {
            if let Event::Key(key) = event::read()? {
                if is_quit(&key) {
                    break;
                }
            }
        }
        if pollable.poll().context("drawing frame")? == PollableState::Done {
            break;
        }
    }
    tracing::debug!(frames = pollable.frames(), "stopped");
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    if let Err(e) = run(cli) {
        eprintln!("Error running progress-ellipsis: {e:?}");
        std::process::exit(1);
    }
}
