//! Peripheral Capability Traits
//!
//! Defines the interface the equalizer loop needs from the board. Pin
//! assignment, converter details and timer hardware stay behind these traits.

use std::sync::Arc;

use crate::error::PlatformError;

/// Direction of a binary switch transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    /// Low to high
    Rising,
    /// High to low
    Falling,
}

impl Edge {
    /// Level the switch holds after this edge
    pub fn level(self) -> bool {
        matches!(self, Edge::Rising)
    }
}

/// Callback invoked when a subscribed switch edge occurs
///
/// # Interrupt Safety Contract
///
/// `on_edge()` may preempt the sample loop at any point. Implementors MUST:
/// - NOT block (no mutex locks, no I/O)
/// - NOT allocate
/// - touch only state that fits in a single atomic word
pub trait EdgeHandler: Send + Sync {
    fn on_edge(&self);
}

/// Analog input normalized to `[0.0, 1.0]`
pub trait AnalogIn {
    fn read(&mut self) -> f32;
}

/// Analog output normalized to `[0.0, 1.0]`
pub trait AnalogOut {
    fn write(&mut self, value: f32);
}

/// Monotonic elapsed-time source
pub trait ElapsedClock {
    /// Ticks since the clock's start epoch
    fn elapsed(&self) -> u64;

    /// Tick resolution (1_000_000 for a microsecond timer)
    fn ticks_per_second(&self) -> u64;
}

/// Binary switch with edge notifications
pub trait BinarySwitch {
    /// Direct (non-edge) read of the current level
    fn read(&self) -> bool;

    /// Register `handler` to run on every `edge` transition
    fn subscribe(&self, edge: Edge, handler: Arc<dyn EdgeHandler>) -> Result<(), PlatformError>;
}

/// Binary status output (e.g. a "running" LED)
pub trait Indicator {
    fn set(&mut self, on: bool);
}
