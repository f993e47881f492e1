//! Error types
//!
//! The sim has no recoverable errors during play. Everything here is fatal:
//! a level that cannot be generated or a config that cannot be used.

/// Level generation failed
#[derive(thiserror::Error, Debug)]
pub enum GenerationError {
    /// Level extents leave no room to place an obstacle of the drawn size
    #[error("level {level} is too small ({width}x{height}) to place obstacles")]
    LevelTooSmall { level: usize, width: i32, height: i32 },

    /// Rejection sampling ran out of retries
    #[error("level {level}: obstacle {obstacle} not placed after {attempts} attempts")]
    PlacementExhausted {
        level: usize,
        obstacle: usize,
        attempts: u32,
    },

    /// Obstacle storage could not be allocated
    #[error("level {level}: obstacle storage allocation failed")]
    Allocation {
        level: usize,
        #[source]
        source: std::collections::TryReserveError,
    },
}

/// Configuration could not be loaded or is unusable
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}
