//! TriEQ Platform - Board Peripherals
//!
//! This crate defines the capabilities the equalizer loop consumes from
//! the hardware, and hosted simulations of each:
//! - Normalized analog input and output
//! - A monotonic elapsed-time counter
//! - Binary mode switches with rising/falling edge subscriptions
//! - A status indicator
//!
//! # Architecture
//!
//! The core engine is generic over these traits. A board support crate
//! implements them on real converters and GPIO; the [`sim`] module
//! implements them on atomics and ring buffers so the same loop runs on a
//! desktop and in tests.
//!
//! Edge handlers run in interrupt context on hardware. The
//! [`EdgeHandler`] contract (no blocking, no allocation, one atomic word
//! of state) is what lets them skip any locking against the sample loop.

mod error;
mod traits;

pub mod sim;

pub use error::PlatformError;
pub use traits::{AnalogIn, AnalogOut, BinarySwitch, Edge, EdgeHandler, ElapsedClock, Indicator};
