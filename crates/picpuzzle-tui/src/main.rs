mod app;
mod render;
mod theme;

use app::{App, TICK_RATE};
use clap::{Parser, Subcommand, ValueEnum};
use crossterm::{
    cursor::Show,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{info, warn};
use picpuzzle_core::{slicer, Difficulty, GameConfig, GridSize, Picture};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Picture tile puzzle: swap pieces until the picture is whole again
#[derive(Parser)]
#[command(name = "picpuzzle", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Picture to play with (PNG or JPEG); a built-in gradient is used otherwise
    #[arg(short, long)]
    image: Option<PathBuf>,

    /// Difficulty preset
    #[arg(short, long, value_enum, default_value_t = DifficultyArg::Easy)]
    difficulty: DifficultyArg,

    /// Tiles per side, overrides the difficulty preset
    #[arg(short, long, value_parser = parse_grid_size)]
    grid_size: Option<GridSize>,

    /// Seed for reproducible shuffles
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (controlled by RUST_LOG, default `debug`)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Cut a picture into pieces and write them as PNG files
    Slice {
        /// Picture to slice
        image: PathBuf,

        /// Tiles per side
        #[arg(short, long, value_parser = parse_grid_size, default_value = "3")]
        grid_size: GridSize,

        /// Output directory
        #[arg(short, long, default_value = "pieces")]
        out: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DifficultyArg {
    Easy,
    Medium,
    Hard,
}

impl From<DifficultyArg> for Difficulty {
    fn from(d: DifficultyArg) -> Self {
        match d {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Medium => Difficulty::Medium,
            DifficultyArg::Hard => Difficulty::Hard,
        }
    }
}

fn parse_grid_size(value: &str) -> Result<GridSize, String> {
    let size: usize = value.parse().map_err(|e| format!("{}", e))?;
    GridSize::new(size).map_err(|e| e.to_string())
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    if let Some(Command::Slice {
        image,
        grid_size,
        out,
    }) = &cli.command
    {
        return slice_to_dir(image, *grid_size, out);
    }

    let config = match cli.grid_size {
        Some(grid_size) => GameConfig::with_grid_size(grid_size),
        None => GameConfig::for_difficulty(cli.difficulty.into()),
    };
    let seed = cli.seed.unwrap_or_else(rand::random);
    let picture = match &cli.image {
        Some(path) => match Picture::open(path) {
            Ok(picture) => Some(picture),
            Err(err) => {
                warn!("could not load {}: {}", path.display(), err);
                None
            }
        },
        None => Some(app::fallback_picture()),
    };
    info!("starting {} puzzle with seed {}", config.grid_size, seed);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let mut app = App::new(config, seed, picture);
    let result = run_app(&mut stdout, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen, Show)?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    Ok(())
}

fn run_app(stdout: &mut io::Stdout, app: &mut App) -> io::Result<()> {
    let mut last_tick = Instant::now();

    loop {
        render::render(stdout, app)?;
        stdout.flush()?;

        // Handle input with timeout for timer updates
        let timeout = TICK_RATE.saturating_sub(last_tick.elapsed());
        if event::poll(timeout.min(Duration::from_millis(33)))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                // Handle Ctrl+C
                if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                    break;
                }

                match app.handle_key(key) {
                    app::AppAction::Continue => {}
                    app::AppAction::Quit => break,
                }
            }
        }

        if last_tick.elapsed() >= TICK_RATE {
            app.tick();
            last_tick = Instant::now();
        }
    }

    Ok(())
}

/// Route `log` output to a file; the terminal itself belongs to the UI
fn init_logging(path: Option<&Path>) -> io::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn slice_to_dir(image: &Path, grid_size: GridSize, out: &Path) -> io::Result<()> {
    let bytes = fs::read(image)?;
    let slices = slicer::slice_bytes(&bytes, grid_size);
    if slices.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("{} could not be decoded as an image", image.display()),
        ));
    }

    fs::create_dir_all(out)?;
    for piece in &slices {
        let path = out.join(format!("piece_{}.png", piece.index()));
        piece.image().save(&path).map_err(io::Error::other)?;
    }
    println!(
        "Wrote {} pieces ({}) to {}",
        slices.len(),
        grid_size,
        out.display()
    );
    Ok(())
}
