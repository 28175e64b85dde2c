use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use floodit_core::{Color, Coord, FloodEngine, greedy_color};
use std::path::PathBuf;

use settings::Settings;
use store::StateStore;

mod settings;
mod store;

#[derive(Parser, Debug)]
#[command(version, about = "Flood the board with a single color", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Where the game in progress is kept between runs
    #[arg(long, default_value = "floodit-state.json")]
    state: PathBuf,

    /// Board size and color count
    #[arg(long, default_value = "floodit-settings.toml")]
    settings: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the current board
    Show,
    /// Start a new game
    New {
        /// Force a seed instead of random
        #[arg(short, long)]
        seed: Option<String>,
    },
    /// Start over with the current game's seed
    Replay,
    /// Print the current game's seed so it can be shared
    Seed,
    /// Flood the top-left region with a color, numbered from 1
    Flood { color: Color },
    /// Suggest the color that grows the flooded region the most
    Hint,
    /// Change the board size or color count; any change starts a new game
    Settings {
        #[arg(long)]
        size: Option<Coord>,
        #[arg(long)]
        colors: Option<Color>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let mut settings = Settings::load(&args.settings)?;
    let mut engine = StateStore::load(&args.state).resume_or_new(settings.game_config()?)?;
    log::debug!("seed: {:?}", engine.seed());

    match args.command.unwrap_or(Command::Show) {
        Command::Show => print_game(&engine),
        Command::New { seed } => {
            engine = match seed {
                Some(seed) => FloodEngine::with_seed(engine.config(), seed)?,
                None => FloodEngine::new(engine.config())?,
            };
            print_game(&engine);
        }
        Command::Replay => {
            engine = FloodEngine::with_seed(engine.config(), engine.seed())?;
            print_game(&engine);
        }
        Command::Seed => println!("{}", engine.seed()),
        Command::Flood { color } => {
            do_color(&mut engine, color)?;
            print_game(&engine);
            print_outcome(&engine);
        }
        Command::Hint => match greedy_color(&engine.board()) {
            Some(color) if !engine.is_finished() => println!("Try color {}", color + 1),
            _ => println!("Nothing left to flood, start a new game"),
        },
        Command::Settings { size, colors } => {
            if settings.update(size, colors) {
                let config = settings.game_config()?;
                settings.save(&args.settings)?;
                log::info!("Settings changed to {config:?}, starting a new game");
                engine = FloodEngine::new(config)?;
            }
            println!(
                "Board size {}, {} colors",
                settings.board_size, settings.num_colors
            );
            print_game(&engine);
        }
    }

    StateStore::suspend(&engine)?.save(&args.state)
}

fn do_color(engine: &mut FloodEngine, display_color: Color) -> Result<()> {
    let num_colors = engine.num_colors();
    if display_color == 0 || display_color > num_colors {
        bail!("color must be between 1 and {num_colors}");
    }
    if engine.is_finished() {
        println!("This game is over, start a new one");
        return Ok(());
    }

    let outcome = engine.flood(display_color - 1)?;
    if outcome.has_update() {
        log::debug!("{} cells recolored", outcome.recolored());
    } else {
        println!("Already that color");
    }
    Ok(())
}

fn print_game(engine: &FloodEngine) {
    let width = engine.num_colors().to_string().len();
    for row in engine.board().to_rows() {
        let cells: Vec<String> = row
            .iter()
            .map(|color| format!("{:>width$}", color + 1))
            .collect();
        println!("{}", cells.join(" "));
    }
    println!("{} / {}", engine.steps(), engine.max_steps());
}

fn print_outcome(engine: &FloodEngine) {
    if engine.check_win() {
        println!("You won in {} steps! Seed: {}", engine.steps(), engine.seed());
    } else if engine.is_out_of_moves() {
        println!("Out of moves. Seed: {}", engine.seed());
    }
}
