//! Terminal front end for the chess engine.
//!
//! Commands are read one per line and applied to a [`chess_engine::Game`];
//! games are saved as text files in a configurable directory.

pub mod command;
pub mod config;
pub mod render;
pub mod session;
pub mod storage;

pub use command::{Command, CommandError};
pub use config::{CliConfig, ConfigError};
pub use session::{Flow, Session, SessionError};
pub use storage::{SaveStore, StorageError};
