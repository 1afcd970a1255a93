use std::{str::FromStr, time::Duration};

use lifeduel::{
    DecisionPolicy, Error, GameConfig,
    error::Result,
    policy::{Idle, Memory, Uniform, Weighted, Weights},
};

pub const DEFAULT_WINNERS_FILE: &str = "winners.json";

pub struct Args {
    matches: getopts::Matches,
}

impl Args {
    fn new<T: AsRef<str>>(args: &[T]) -> Result<Option<Self>> {
        let mut opts = getopts::Options::new();
        opts.optflag("", "help", "print this help menu");
        opts.optflag("c", "console", "play in the terminal");
        opts.optflag("t", "threads", "split each step across threads");
        opts.optflag("v", "verbose", "ring the bell on damage and points");
        opts.optopt("p", "players", "number of players, 1 or 2", "COUNT");
        opts.optopt("", "size", "cells per side of the field", "CELLS");
        opts.optopt("", "garden", "cells per side of the garden", "CELLS");
        opts.optopt("", "lives", "lives per player", "COUNT");
        opts.optopt(
            "",
            "policy",
            "how players move: uniform, weighted, memory or human",
            "POLICY",
        );
        opts.optopt(
            "",
            "weights",
            "odds of stay,up,down,left,right for weighted and memory",
            "W,W,W,W,W",
        );
        opts.optopt(
            "",
            "boost",
            "how strongly the memory policy repeats a rewarded move",
            "FACTOR",
        );
        opts.optopt("", "seed", "seed for a reproducible run", "SEED");
        opts.optopt("s", "sleep", "time to sleep between ticks", "MILLIS");
        opts.optopt("g", "gens", "max number of ticks per game", "COUNT");
        opts.optopt("n", "games", "number of games to play", "COUNT");
        opts.optopt("i", "input", "RLE pattern stamped at the center", "FILE");
        opts.optopt("o", "output", "write the final field as RLE", "FILE");
        opts.optopt("", "stats", "write stats csv to file", "FILE");
        opts.optopt("", "winners", "leaderboard file", "FILE");

        let matches = opts.parse(args.iter().map(T::as_ref))?;
        if matches.opt_present("help") {
            println!("{}", opts.usage("usage: lifeduel [options]"));
            Ok(None)
        } else {
            Ok(Some(Self { matches }))
        }
    }
    pub fn from_env() -> Result<Option<Self>> {
        let env = std::env::args().collect::<Vec<_>>();
        Self::new(&env[1..])
    }

    fn parsed<T: FromStr>(&self, option: &'static str) -> Result<Option<T>> {
        match self.matches.opt_str(option) {
            Some(value) => match value.parse() {
                Ok(parsed) => Ok(Some(parsed)),
                Err(_) => Err(Error::InvalidOption { option, value }),
            },
            None => Ok(None),
        }
    }

    pub fn console(&self) -> bool {
        self.matches.opt_present("console")
    }
    pub fn multithreading(&self) -> bool {
        self.matches.opt_present("threads")
    }
    pub fn verbose(&self) -> bool {
        self.matches.opt_present("verbose")
    }

    pub fn generations(&self) -> Result<u64> {
        Ok(self.parsed("gens")?.unwrap_or(u64::MAX))
    }
    /// Games to play; the console keeps going until closed, otherwise one
    pub fn games(&self) -> Result<Option<usize>> {
        match self.parsed("games")? {
            Some(n) => Ok(Some(n)),
            None if self.console() => Ok(None),
            None => Ok(Some(1)),
        }
    }
    pub fn sleep(&self) -> Result<Option<Duration>> {
        Ok(match self.parsed("sleep")? {
            Some(millis) => Some(Duration::from_millis(millis)),
            None if self.console() => Some(Duration::from_millis(100)),
            None => None,
        })
    }
    pub fn seed(&self) -> Result<Option<u64>> {
        self.parsed("seed")
    }

    /// The validated game configuration
    pub fn game_config(&self) -> Result<GameConfig> {
        let mut config = GameConfig::default();
        if let Some(players) = self.parsed("players")? {
            config.players = players;
        }
        if let Some(size) = self.parsed("size")? {
            config.field_size = size;
            // keep the default layout proportional to the field
            config.start_positions = [
                lifeduel::Pos2::new(size / 4, size / 4),
                lifeduel::Pos2::new(size - size / 4, size - size / 4),
            ];
        }
        if let Some(garden) = self.parsed("garden")? {
            config.garden_size = garden;
        }
        if let Some(lives) = self.parsed("lives")? {
            config.lives = lives;
        }
        Ok(config.validate()?)
    }

    pub fn policy_kind(&self) -> Result<PolicyKind> {
        let kind = self.matches.opt_str("policy");
        let kind = kind.as_deref().unwrap_or("uniform");
        PolicyKind::new(kind).ok_or_else(|| Error::InvalidOption {
            option: "policy",
            value: kind.to_owned(),
        })
    }

    pub fn weights(&self) -> Result<Weights> {
        let Some(value) = self.matches.opt_str("weights") else {
            return Ok([1.0; 5]);
        };
        let invalid = || Error::InvalidOption {
            option: "weights",
            value: value.clone(),
        };
        let parsed = value
            .split(',')
            .map(|w| w.trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| invalid())?;
        parsed.try_into().map_err(|_| invalid())
    }

    pub fn boost(&self) -> Result<f64> {
        Ok(self.parsed("boost")?.unwrap_or(Memory::DEFAULT_BOOST))
    }

    /// One fresh policy per player
    pub fn policies(&self, players: usize) -> Result<Vec<Box<dyn DecisionPolicy>>> {
        let kind = self.policy_kind()?;
        let weights = self.weights()?;
        let boost = self.boost()?;
        (0..players).map(|_| kind.build(weights, boost)).collect()
    }

    pub fn output_file(&self) -> Option<String> {
        self.matches.opt_str("output")
    }
    pub fn input_file(&self) -> Option<String> {
        self.matches.opt_str("input")
    }
    pub fn stats_file(&self) -> Option<String> {
        self.matches.opt_str("stats")
    }
    pub fn winners_file(&self) -> String {
        self.matches
            .opt_str("winners")
            .unwrap_or_else(|| DEFAULT_WINNERS_FILE.to_owned())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyKind {
    Uniform,
    Weighted,
    Memory,
    Human,
}
impl PolicyKind {
    fn new<S: AsRef<str>>(s: S) -> Option<Self> {
        match s.as_ref() {
            "uniform" => Some(Self::Uniform),
            "weighted" => Some(Self::Weighted),
            "memory" => Some(Self::Memory),
            "human" => Some(Self::Human),
            _ => None,
        }
    }

    fn build(self, weights: Weights, boost: f64) -> Result<Box<dyn DecisionPolicy>> {
        Ok(match self {
            Self::Uniform => Box::new(Uniform),
            Self::Weighted => Box::new(Weighted::new(weights)?),
            Self::Memory => Box::new(Memory::new(weights)?.with_boost(boost)?),
            Self::Human => Box::new(Idle),
        })
    }
}
