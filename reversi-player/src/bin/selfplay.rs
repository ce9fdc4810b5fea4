//! Play one game of Reversi between two search players and print it.

use anyhow::{ensure, Context, Result};
use async_std::task;
use clap::Parser;
use itertools::Itertools;
use reversi_board::{Board, Game, Move, Player, MAX_EDGE_LENGTH};
use reversi_player::{
    render_dot, AiPlayer, Controller, EvaluationMethod, GameObserver, PlayerConfig,
    SearchAlgorithm,
};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "selfplay")]
#[command(about = "Play a game of Reversi between two minimax players")]
struct Args {
    /// Plies each player searches ahead
    #[arg(long, default_value_t = 4)]
    depth: usize,

    /// Search algorithm: minimax or alpha-beta
    #[arg(long, default_value_t = SearchAlgorithm::AlphaBeta)]
    algorithm: SearchAlgorithm,

    /// Evaluation for Black: total, sides or corners
    #[arg(long, default_value_t = EvaluationMethod::MovesAndCorners)]
    black_eval: EvaluationMethod,

    /// Evaluation for White: total, sides or corners
    #[arg(long, default_value_t = EvaluationMethod::MovesAndCorners)]
    white_eval: EvaluationMethod,

    /// Minimum time per move, in milliseconds
    #[arg(long, default_value_t = 0)]
    think_ms: u64,

    /// Board edge length
    #[arg(long, default_value_t = 8)]
    size: usize,

    /// Write the tree of Black's first search to this file as Graphviz
    #[arg(long)]
    dump_tree: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// Prints the board after every turn and keeps the move record.
struct Printer {
    record: Arc<Mutex<Vec<Move>>>,
}

impl GameObserver for Printer {
    fn move_played(&mut self, mv: Move, game: &Game) {
        if let Ok(mut record) = self.record.lock() {
            record.push(mv);
        }
        println!("{}\n{}\n", mv, game);
    }

    fn turn_skipped(&mut self, player: Player, _game: &Game) {
        println!("{} passes\n", player);
    }

    fn game_over(&mut self, game: &Game) {
        let (black, white) = game.board.score();
        match game.winner() {
            Some(winner) => println!("{} wins {} to {}", winner, black.max(white), black.min(white)),
            None => println!("Draw, {} all", black),
        }
    }
}

fn init_tracing(level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn player(args: &Args, evaluation: EvaluationMethod) -> AiPlayer {
    AiPlayer::new(
        PlayerConfig::default()
            .with_max_depth(args.depth)
            .with_algorithm(args.algorithm)
            .with_evaluation(evaluation)
            .with_min_think_time(Duration::from_millis(args.think_ms)),
    )
}

fn main() -> Result<()> {
    let args = Args::parse();
    ensure!(args.depth > 0, "--depth must be at least 1");
    ensure!(
        (2..=MAX_EDGE_LENGTH).contains(&args.size),
        "--size must be between 2 and {}",
        MAX_EDGE_LENGTH
    );
    init_tracing(&args.log_level);

    let black = player(&args, args.black_eval);
    let white = player(&args, args.white_eval);
    info!(
        depth = args.depth,
        algorithm = %args.algorithm,
        black = %args.black_eval,
        white = %args.white_eval,
        "starting selfplay"
    );

    let game = Game::new(Board::with_dimension(args.size), Player::Black);
    println!("{}\n", game);

    if let Some(path) = &args.dump_tree {
        let tree = black.search_tree(&game.board, game.active_player);
        let file = File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        render_dot(&tree, &mut writer)
            .and_then(|()| writer.flush())
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!(path = %path.display(), nodes = tree.len(), "wrote search tree");
    }

    let record = Arc::new(Mutex::new(Vec::new()));
    let mut controller = Controller::new(black, white).with_game(game);
    controller.add_observer(Printer {
        record: Arc::clone(&record),
    });

    task::block_on(controller.run())?;

    if let Ok(record) = record.lock() {
        println!("{}", record.iter().map(|mv| mv.to_string()).join(", "));
    }
    Ok(())
}
