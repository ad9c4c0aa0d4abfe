//! Engine Error Types

use thiserror::Error;

/// Errors that can occur while configuring or starting the engine
///
/// The running sample loop itself has no failure mode.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Sample period rounds to zero: {target_rate}Hz on a {ticks_per_second} ticks/s clock")]
    SamplePeriodTooShort {
        target_rate: f32,
        ticks_per_second: u64,
    },

    #[error("Scheduler already running")]
    AlreadyRunning,

    #[error("Scheduler not running")]
    NotRunning,

    #[error("DSP error: {0}")]
    DspError(#[from] trieq_dsp::DspError),

    #[error("Platform error: {0}")]
    PlatformError(#[from] trieq_platform::PlatformError),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
