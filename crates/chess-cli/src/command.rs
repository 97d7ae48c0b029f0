//! Parsing of the commands typed at the prompt.

use chess_core::{PieceKind, Square};
use thiserror::Error;

/// Errors for malformed command lines.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command: '{0}' (try 'help')")]
    Unknown(String),

    #[error("missing {0}")]
    MissingArgument(&'static str),

    #[error("unexpected argument: '{0}'")]
    UnexpectedArgument(String),

    #[error("invalid coordinate: '{0}' (expected 0-7)")]
    InvalidCoordinate(String),

    #[error("cannot promote to '{0}' (queen, rook, bishop or knight)")]
    InvalidPromotion(String),

    #[error("invalid save name: '{0}'")]
    InvalidName(String),
}

/// A command entered by the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Select the piece on a square.
    Select(Square),
    Unselect,
    /// List the selected piece's legal moves.
    Moves,
    /// Move the selected piece.
    Move(Square),
    /// Promote the pawn waiting on its last line.
    Promote(PieceKind),
    Board,
    Status,
    /// Print the current game as JSON.
    State,
    Save(String),
    Load(String),
    /// List saved games.
    List,
    /// Start a new game.
    New,
    Help,
    Quit,
    /// Blank line.
    Empty,
}

impl Command {
    /// Parses one input line.
    pub fn parse(input: &str) -> Result<Self, CommandError> {
        let mut parts = input.split_whitespace();
        let Some(cmd) = parts.next() else {
            return Ok(Command::Empty);
        };

        let command = match cmd {
            "select" | "s" => Command::Select(parse_square(&mut parts)?),
            "unselect" => Command::Unselect,
            "moves" => Command::Moves,
            "move" | "m" => Command::Move(parse_square(&mut parts)?),
            "promote" => Command::Promote(parse_promotion(&mut parts)?),
            "board" => Command::Board,
            "status" => Command::Status,
            "state" => Command::State,
            "save" => Command::Save(parse_name(&mut parts)?),
            "load" => Command::Load(parse_name(&mut parts)?),
            "list" => Command::List,
            "new" => Command::New,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            _ => return Err(CommandError::Unknown(input.trim().to_string())),
        };

        match parts.next() {
            Some(extra) => Err(CommandError::UnexpectedArgument(extra.to_string())),
            None => Ok(command),
        }
    }
}

fn parse_square<'a>(parts: &mut impl Iterator<Item = &'a str>) -> Result<Square, CommandError> {
    let column = parse_coordinate(parts.next().ok_or(CommandError::MissingArgument("column"))?)?;
    let line = parse_coordinate(parts.next().ok_or(CommandError::MissingArgument("line"))?)?;
    Square::try_new(column, line).ok_or_else(|| {
        CommandError::InvalidCoordinate(format!("{} {}", column, line))
    })
}

fn parse_coordinate(s: &str) -> Result<i8, CommandError> {
    s.parse::<i8>()
        .ok()
        .filter(|c| (0..8).contains(c))
        .ok_or_else(|| CommandError::InvalidCoordinate(s.to_string()))
}

fn parse_promotion<'a>(
    parts: &mut impl Iterator<Item = &'a str>,
) -> Result<PieceKind, CommandError> {
    let name = parts.next().ok_or(CommandError::MissingArgument("piece kind"))?;
    name.parse::<PieceKind>()
        .ok()
        .filter(|kind| kind.is_promotion_target())
        .ok_or_else(|| CommandError::InvalidPromotion(name.to_string()))
}

fn parse_name<'a>(parts: &mut impl Iterator<Item = &'a str>) -> Result<String, CommandError> {
    let name = parts.next().ok_or(CommandError::MissingArgument("save name"))?;
    let valid = !name.starts_with('.')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if valid {
        Ok(name.to_string())
    } else {
        Err(CommandError::InvalidName(name.to_string()))
    }
}

/// Help text printed by the `help` command.
pub const HELP: &str = "\
commands:
  select <column> <line>   select a piece of the side to move
  unselect                 drop the selection
  moves                    list legal moves of the selected piece
  move <column> <line>     move the selected piece
  promote <kind>           promote a pawn (queen, rook, bishop, knight)
  board                    show the board
  status                   show whose turn it is and how the game stands
  state                    print the game as JSON
  save <name>              save the game
  load <name>              load a saved game
  list                     list saved games
  new                      start a new game
  quit                     leave
columns and lines run 0-7; line 0 is Black's back rank";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_select_and_move() {
        assert_eq!(
            Command::parse("select 4 6"),
            Ok(Command::Select(Square::new(4, 6)))
        );
        assert_eq!(
            Command::parse("  m 4 4 "),
            Ok(Command::Move(Square::new(4, 4)))
        );
    }

    #[test]
    fn parse_simple_commands() {
        assert_eq!(Command::parse("moves"), Ok(Command::Moves));
        assert_eq!(Command::parse("board"), Ok(Command::Board));
        assert_eq!(Command::parse("quit"), Ok(Command::Quit));
        assert_eq!(Command::parse("?"), Ok(Command::Help));
        assert_eq!(Command::parse(""), Ok(Command::Empty));
        assert_eq!(Command::parse("   "), Ok(Command::Empty));
    }

    #[test]
    fn parse_promote() {
        assert_eq!(
            Command::parse("promote knight"),
            Ok(Command::Promote(PieceKind::Knight))
        );
        assert_eq!(
            Command::parse("promote king"),
            Err(CommandError::InvalidPromotion("king".to_string()))
        );
        assert_eq!(
            Command::parse("promote"),
            Err(CommandError::MissingArgument("piece kind"))
        );
    }

    #[test]
    fn parse_save_names() {
        assert_eq!(
            Command::parse("save opening-1"),
            Ok(Command::Save("opening-1".to_string()))
        );
        assert_eq!(
            Command::parse("load ../etc/passwd"),
            Err(CommandError::InvalidName("../etc/passwd".to_string()))
        );
        assert_eq!(
            Command::parse("save .hidden"),
            Err(CommandError::InvalidName(".hidden".to_string()))
        );
    }

    #[test]
    fn parse_errors() {
        assert_eq!(
            Command::parse("castle"),
            Err(CommandError::Unknown("castle".to_string()))
        );
        assert_eq!(
            Command::parse("select 4"),
            Err(CommandError::MissingArgument("line"))
        );
        assert_eq!(
            Command::parse("select 8 0"),
            Err(CommandError::InvalidCoordinate("8".to_string()))
        );
        assert_eq!(
            Command::parse("move -1 3"),
            Err(CommandError::InvalidCoordinate("-1".to_string()))
        );
        assert_eq!(
            Command::parse("board now"),
            Err(CommandError::UnexpectedArgument("now".to_string()))
        );
    }
}
