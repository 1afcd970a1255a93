use thiserror::Error;

/// Errors raised when validating a [`GameConfig`](crate::GameConfig).
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} cadence must fire every 1 or more ticks")]
    ZeroCadence { name: &'static str },
    #[error("{name} cadence phase {phase} must be below its period {every}")]
    PhaseOutOfRange {
        name: &'static str,
        every: u64,
        phase: u64,
    },
    #[error("field size {0} is too small, need at least {min}", min = crate::config::MIN_FIELD_SIZE)]
    FieldTooSmall(i32),
    #[error("field size {0} is too large, at most {max} fits the display", max = crate::config::MAX_FIELD_SIZE)]
    FieldTooLarge(i32),
    #[error("garden of size {size} at offset {offset} leaves the field interior")]
    GardenOutOfBounds { size: i32, offset: i32 },
    #[error("glider inset {0} puts gliders outside the field interior")]
    GliderOutOfBounds(i32),
    #[error("start position ({x}, {y}) is outside the field interior")]
    StartOutOfBounds { x: i32, y: i32 },
    #[error("{0} players requested, only 1 or 2 are supported")]
    PlayerCount(usize),
    #[error("{players} players need {players} decision policies, got {policies}")]
    PolicyCount { players: usize, policies: usize },
    #[error("players must start with at least one life")]
    NoLives,
    #[error("decision weights must be finite, non-negative and not all zero")]
    InvalidWeights,
    #[error("memory boost {0} must be a finite number above zero")]
    InvalidBoost(f64),
}

/// Errors raised while reading an RLE pattern.
#[derive(Debug, Error, PartialEq)]
pub enum PatternError {
    #[error("line {line}: run length {run:?} is longer than {max} cells", max = crate::enc::MAX_RUN)]
    RunTooLong { line: usize, run: String },
    #[error("line {line}: pattern extends past the coordinate range")]
    OutOfRange { line: usize },
}

/// Everything that can go wrong outside the simulation itself.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Options(#[from] getopts::Fail),
    #[error("invalid value {value:?} for --{option}")]
    InvalidOption { option: &'static str, value: String },
    #[error("malformed pattern: {0}")]
    Pattern(#[from] PatternError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("malformed leaderboard: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
