//! # Gridcrawl Main Entry Point
//!
//! Generates a dungeon, then reads one key per line from stdin and plays it out,
//! printing either an ASCII view or JSON lines after every input.

use clap::Parser;
use gridcrawl::{
    AsciiDisplay, GameCompletionState, GameEvent, GameInfo, GameState, GenerationConfig,
    GridcrawlResult, InputHandler, PlayerInput, Renderer, TurnResult,
};
use log::{info, warn};
use serde::Serialize;
use std::io::{self, BufRead, Write};

/// Command line arguments for the Gridcrawl roguelike.
#[derive(Parser, Debug)]
#[command(name = "gridcrawl")]
#[command(about = "A small turn-based roguelike played one key per line")]
#[command(version)]
struct Args {
    /// Random seed for dungeon generation
    #[arg(short, long)]
    seed: Option<u64>,

    /// Map width in tiles
    #[arg(long, default_value_t = gridcrawl::config::DEFAULT_MAP_WIDTH)]
    width: u32,

    /// Map height in tiles
    #[arg(long, default_value_t = gridcrawl::config::DEFAULT_MAP_HEIGHT)]
    height: u32,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Emit game info and events as JSON lines instead of drawing the map
    #[arg(long)]
    json: bool,

    /// Disable the h/j/k/l movement keys
    #[arg(long)]
    no_vi_keys: bool,
}

/// One JSON line of output.
#[derive(Serialize)]
struct Frame<'a> {
    turn: u64,
    completion: GameCompletionState,
    info: GameInfo,
    events: &'a [GameEvent],
}

fn main() -> GridcrawlResult<()> {
    let args = Args::parse();

    initialize_logging(&args.log_level);

    let seed = args.seed.unwrap_or_else(rand::random);
    info!("Starting Gridcrawl v{} with seed {}", gridcrawl::VERSION, seed);

    let config = GenerationConfig::new(seed).with_size(args.width, args.height);
    let game = GameState::generate_map(&config)?;

    let mut input = InputHandler::new();
    input.vi_keys_enabled = !args.no_vi_keys;

    run(game, &input, args.json)
}

/// Initializes env_logger; `RUST_LOG` takes precedence over `--log-level`.
fn initialize_logging(log_level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();
}

fn run(mut game: GameState, input: &InputHandler, json: bool) -> GridcrawlResult<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut display = AsciiDisplay::new();

    let initial = TurnResult {
        completion: game.completion_state(),
        events: Vec::new(),
        turn_number: game.turn_number(),
    };
    emit(&mut out, &game, &mut display, &initial, json)?;

    for line in stdin.lock().lines() {
        let line = line?;
        let Some(player_input) = input.map_line(&line) else {
            continue;
        };

        if !player_input.is_action() {
            if player_input == PlayerInput::Quit {
                info!("Player quit after {} turns", game.turn_number());
                return Ok(());
            }
            if !json {
                writeln!(out, "{}", display.ui.help_text(input))?;
            }
            continue;
        }

        let result = game.handle_input(player_input)?;
        emit(&mut out, &game, &mut display, &result, json)?;

        if result.is_terminal() {
            break;
        }
    }

    if !game.is_over() {
        warn!("Input ended before the game did");
    }
    Ok(())
}

fn emit(
    out: &mut impl Write,
    game: &GameState,
    display: &mut AsciiDisplay,
    result: &TurnResult,
    json: bool,
) -> GridcrawlResult<()> {
    if json {
        let frame = Frame {
            turn: result.turn_number,
            completion: result.completion,
            info: game.game_info(),
            events: &result.events,
        };
        writeln!(out, "{}", serde_json::to_string(&frame)?)?;
    } else {
        display.record_events(&result.events);
        writeln!(out, "{}\n", display.render(game))?;
    }
    out.flush()?;
    Ok(())
}
