//! Interactive session: reads commands and applies them to a game.

use std::io::{BufRead, Write};

use chess_core::Square;
use chess_engine::{Game, GameError};
use thiserror::Error;
use tracing::{debug, info};

use crate::command::{Command, CommandError, HELP};
use crate::render::{render_board, render_status};
use crate::storage::{SaveStore, StorageError};

/// Errors reported back to the player. None of them end the session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Command(#[from] CommandError),
    #[error(transparent)]
    Game(#[from] GameError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("failed to encode game: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no pawn is waiting for promotion")]
    NoPendingPromotion,
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

/// Whether the session keeps reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// A game plus the settings and storage the commands act on.
pub struct Session<W: Write> {
    game: Game,
    store: SaveStore,
    unicode: bool,
    out: W,
}

impl<W: Write> Session<W> {
    pub fn new(game: Game, store: SaveStore, unicode: bool, out: W) -> Self {
        Self {
            game,
            store,
            unicode,
            out,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Processes lines from `reader` until `quit` or end of input.
    ///
    /// Player mistakes are printed and the prompt continues; only output
    /// failures end the loop with an error.
    pub fn run<R: BufRead>(&mut self, reader: R) -> std::io::Result<()> {
        self.show_board()?;
        self.prompt()?;
        for line in reader.lines() {
            let line = line?;
            match Command::parse(&line)
                .map_err(SessionError::from)
                .and_then(|command| self.execute(command))
            {
                Ok(Flow::Quit) => return Ok(()),
                Ok(Flow::Continue) => {}
                Err(SessionError::Output(err)) => return Err(err),
                Err(err) => writeln!(self.out, "error: {}", err)?,
            }
            self.prompt()?;
        }
        Ok(())
    }

    fn prompt(&mut self) -> std::io::Result<()> {
        write!(self.out, "{}> ", self.game.turn().name())?;
        self.out.flush()
    }

    /// Applies a single command.
    pub fn execute(&mut self, command: Command) -> Result<Flow, SessionError> {
        debug!(?command, "execute");
        match command {
            Command::Select(square) => {
                self.game.select_piece(square)?;
                let moves = self.game.legal_moves_of_selected()?;
                self.write_board(&moves)?;
                self.write_moves(&moves)?;
            }
            Command::Unselect => self.game.unselect(),
            Command::Moves => {
                let moves = self.game.legal_moves_of_selected()?;
                self.write_moves(&moves)?;
            }
            Command::Move(square) => {
                let outcome = self.game.move_selected_to(square)?;
                if !outcome.promotion_pending {
                    self.game.post_move_actions();
                }
                self.show_board()?;
                if outcome.promotion_pending {
                    self.line("promote the pawn: promote <queen|rook|bishop|knight>")?;
                } else {
                    self.show_status()?;
                }
            }
            Command::Promote(kind) => {
                let square = self
                    .game
                    .pending_promotion()
                    .ok_or(SessionError::NoPendingPromotion)?;
                self.game.promote(square, kind)?;
                self.game.post_move_actions();
                self.show_board()?;
                self.show_status()?;
            }
            Command::Board => self.show_board()?,
            Command::Status => self.show_status()?,
            Command::State => {
                let json = serde_json::to_string_pretty(&self.game.to_record())?;
                self.line(&json)?;
            }
            Command::Save(name) => {
                let path = self.store.save(&name, &self.game.to_record())?;
                info!(path = %path.display(), "game saved");
                self.line(&format!("saved to {}", path.display()))?;
            }
            Command::Load(name) => {
                let record = self.store.load(&name)?;
                self.game = Game::from_record(&record)?;
                info!(%name, "game loaded");
                self.show_board()?;
                self.show_status()?;
            }
            Command::List => {
                let names = self.store.list()?;
                if names.is_empty() {
                    self.line("no saved games")?;
                }
                for name in names {
                    self.line(&name)?;
                }
            }
            Command::New => {
                self.game = Game::new();
                self.show_board()?;
            }
            Command::Help => self.line(HELP)?,
            Command::Quit => return Ok(Flow::Quit),
            Command::Empty => {}
        }
        Ok(Flow::Continue)
    }

    fn show_board(&mut self) -> std::io::Result<()> {
        self.write_board(&[])
    }

    fn write_board(&mut self, targets: &[Square]) -> std::io::Result<()> {
        let board = render_board(&self.game, targets, self.unicode);
        self.write_raw(&board)
    }

    fn write_moves(&mut self, moves: &[Square]) -> std::io::Result<()> {
        if moves.is_empty() {
            return self.line("no legal moves");
        }
        let list: Vec<String> = moves.iter().map(ToString::to_string).collect();
        self.line(&format!("moves: {}", list.join(" ")))
    }

    fn show_status(&mut self) -> std::io::Result<()> {
        let status = render_status(&self.game);
        self.line(&status)
    }

    fn line(&mut self, text: &str) -> std::io::Result<()> {
        self.write_raw(&format!("{}\n", text))
    }

    fn write_raw(&mut self, text: &str) -> std::io::Result<()> {
        self.out.write_all(text.as_bytes())
    }
}
