//! Turn-by-turn driving of a game between two move sources.

use crate::player::AiPlayer;
use async_trait::async_trait;
use derive_more::{Display, Error};
use reversi_board::{Game, InvalidMove, Move, Player};
use tracing::{info, warn};

/// Anything that can be asked for a move: a search player, or a bridge to a
/// human or remote opponent.
#[async_trait]
pub trait MoveSource: Send {
    /// Produce a move for `game.active_player`. Returning `None` forfeits the
    /// turn and stops the game with [`ControllerError::NoMove`].
    async fn request_move(&mut self, game: &Game) -> Option<Move>;
}

#[async_trait]
impl MoveSource for AiPlayer {
    /// When every line the search followed ran into a forced pass, the root
    /// holds no move; the first legal move is played instead.
    async fn request_move(&mut self, game: &Game) -> Option<Move> {
        let report = self.think(game.board.clone(), game.active_player).await;
        report.best_move.or_else(|| {
            let fallback = game.legal_moves().into_iter().next();
            if let Some(mv) = fallback {
                warn!(%mv, "search chose no move, playing the first legal one");
            }
            fallback
        })
    }
}

/// Hooks called by the [`Controller`] after each change to the game.
/// Every hook defaults to doing nothing.
pub trait GameObserver: Send {
    fn move_played(&mut self, _mv: Move, _game: &Game) {}

    fn turn_skipped(&mut self, _player: Player, _game: &Game) {}

    fn game_over(&mut self, _game: &Game) {}
}

#[derive(Clone, Copy, Debug, Display, Error, PartialEq, Eq)]
pub enum ControllerError {
    #[display(fmt = "move rejected: {}", _0)]
    Rejected(InvalidMove),
    #[display(fmt = "{} did not provide a move", player)]
    NoMove { player: Player },
}

impl From<InvalidMove> for ControllerError {
    fn from(err: InvalidMove) -> Self {
        ControllerError::Rejected(err)
    }
}

/// What one call to [`Controller::step`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Turn {
    Played(Move),
    Passed(Player),
    /// The game was already over; nothing changed.
    Finished,
}

pub struct Controller {
    game: Game,
    black: Box<dyn MoveSource>,
    white: Box<dyn MoveSource>,
    observers: Vec<Box<dyn GameObserver>>,
}

impl Controller {
    /// A controller for a new game from the standard start position.
    pub fn new<B, W>(black: B, white: W) -> Self
    where
        B: MoveSource + 'static,
        W: MoveSource + 'static,
    {
        Self {
            game: Game::default(),
            black: Box::new(black),
            white: Box::new(white),
            observers: Vec::new(),
        }
    }

    /// Continue from `game` instead of the start position.
    pub fn with_game(mut self, game: Game) -> Self {
        self.game = game;
        self
    }

    pub fn add_observer<O: GameObserver + 'static>(&mut self, observer: O) {
        self.observers.push(Box::new(observer));
    }

    #[inline]
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Play one turn. A player without a legal move passes; otherwise the
    /// player's source is asked for a move, which is validated before it is
    /// applied. A rejected move leaves the game untouched.
    pub async fn step(&mut self) -> Result<Turn, ControllerError> {
        if self.game.is_finished() {
            return Ok(Turn::Finished);
        }

        let player = self.game.active_player;
        if self.game.must_pass() {
            info!(%player, "no legal move, passing");
            self.game = self.game.pass();
            for observer in self.observers.iter_mut() {
                observer.turn_skipped(player, &self.game);
            }
            return Ok(Turn::Passed(player));
        }

        let source = match player {
            Player::Black => &mut self.black,
            Player::White => &mut self.white,
        };
        let mv = source
            .request_move(&self.game)
            .await
            .ok_or(ControllerError::NoMove { player })?;

        self.game = self.game.apply_move(mv).map_err(|err| {
            warn!(%err, "rejected move");
            err
        })?;
        info!(%mv, "played");
        for observer in self.observers.iter_mut() {
            observer.move_played(mv, &self.game);
        }

        if self.game.is_finished() {
            let (black, white) = self.game.board.score();
            info!(black, white, winner = ?self.game.winner(), "game over");
            for observer in self.observers.iter_mut() {
                observer.game_over(&self.game);
            }
        }
        Ok(Turn::Played(mv))
    }

    /// Play until the game ends and return the winner, `None` for a draw.
    pub async fn run(&mut self) -> Result<Option<Player>, ControllerError> {
        while self.step().await? != Turn::Finished {}
        Ok(self.game.winner())
    }
}
