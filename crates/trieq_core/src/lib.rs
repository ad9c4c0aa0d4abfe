//! TriEQ Core - Equalizer Engine
//!
//! This crate provides the real-time loop of the three-band equalizer:
//! - Configuration and sample timing derived from the clock resolution
//! - Mode flags written by switch edge handlers
//! - Periodic control updates from the front-panel knobs
//! - The fixed-period sample scheduler
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Switch edge handlers                     │
//! │        rise/fall ──one atomic store──▶ ModeFlags            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │ relaxed load per sample
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 SampleScheduler (one thread)                │
//! │   ADC ──▶ -offset ──▶ LP/HP/BP ──▶ blend ──▶ +offset ──▶ DAC│
//! │     every N2 ticks: knobs ──▶ ParameterUpdater ──▶ filters  │
//! │     every second:   indicator toggle                        │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod controls;
mod error;
mod modes;
mod process;
mod scheduler;
mod timing;

pub use config::{BandSettings, EngineConfig, FilterSettings, FrequencyRange};
pub use controls::{ControlInputs, ControlReadings, ParameterUpdater};
pub use error::{EngineError, EngineResult};
pub use modes::{ModeController, ModeFlags, ModeSnapshot, ModeSwitch};
pub use process::EqProcessor;
pub use scheduler::{Peripherals, SampleScheduler, SchedulerState, SchedulerStats};
pub use timing::SampleTiming;

// Re-export DSP types for convenience
pub use trieq_dsp::{BandOutputs, BandPass, Filter, FilterBank, HighPass, LowPass};
