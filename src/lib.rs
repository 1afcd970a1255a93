//! Conway's Game of Life with players standing on the board.
//!
//! The automaton runs on a fixed, non-wrapping lattice. Players score while
//! the cell under them lives and lose a life when it dies; gliders and a
//! random garden keep the board from settling.

pub mod config;
pub mod enc;
pub mod engine;
pub mod error;
pub mod game;
pub mod grid;
pub mod leaderboard;
pub mod player;
pub mod policy;
pub mod pos;

pub use config::{Cadence, GameConfig};
pub use enc::{PositionEncoder, RunLengthEncoded};
pub use engine::{Generation, next_generation, next_generation_parallel};
pub use error::{ConfigError, Error, PatternError};
pub use game::{Game, Outcome, Paint, Signals, Status, TickReport};
pub use grid::Grid;
pub use leaderboard::Leaderboard;
pub use player::{Color, Decision, Lives, Player, PlayerId};
pub use policy::DecisionPolicy;
pub use pos::Pos2;
