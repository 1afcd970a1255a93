use crate::{Color, Game, Player, error::Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::{fs, io, path::Path};

/// Winners of past games, kept across runs as a JSON list
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaderboard {
    winners: Vec<Player>,
}

impl Leaderboard {
    /// Reads the leaderboard at `path`, an absent file being an empty board
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(text) => {
                let board: Self = serde_json::from_str(&text)?;
                info!("loaded {} winner(s) from {}", board.winners.len(), path.display());
                Ok(board)
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                warn!("no leaderboard at {}, starting fresh", path.display());
                Ok(Self::default())
            }
            Err(err) => Err(err.into()),
        }
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Adds the best player of a finished game
    pub fn record(&mut self, game: &Game) -> &Player {
        let best = *game.best_player();
        self.winners.push(best);
        info!("player {} ({}) recorded with score {}", best.id, best.color(), best.score);
        &self.winners[self.winners.len() - 1]
    }

    /// How many recorded games went to `color`
    pub fn wins(&self, color: Color) -> usize {
        self.winners.iter().filter(|p| p.color() == color).count()
    }

    pub fn winners(&self) -> &[Player] {
        &self.winners
    }
}
