//! Mode Flags
//!
//! Two binary flags, one per mode switch, deciding whether the low and
//! high filters contribute to the mix.
//!
//! # Concurrency
//!
//! Each flag is a single `AtomicBool` with exactly one writer role (the
//! edge handlers of its switch) and one reader role (the sample loop).
//! A store of one word cannot be torn, so no lock is needed and the
//! handlers stay interrupt-safe. Edges closer together than one sample
//! period collapse: the loop sees whichever level was stored last.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::debug;
use trieq_platform::{BinarySwitch, Edge, EdgeHandler};

use crate::error::EngineResult;

/// Which of the two mode switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModeSwitch {
    Low,
    High,
}

/// Flags as seen by one sample period
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModeSnapshot {
    /// Low pass contributes to the mix
    pub low: bool,
    /// High pass contributes to the mix
    pub high: bool,
}

/// The shared flag cells
#[derive(Debug, Default)]
pub struct ModeFlags {
    low: AtomicBool,
    high: AtomicBool,
}

impl ModeFlags {
    fn cell(&self, switch: ModeSwitch) -> &AtomicBool {
        match switch {
            ModeSwitch::Low => &self.low,
            ModeSwitch::High => &self.high,
        }
    }

    pub fn get(&self, switch: ModeSwitch) -> bool {
        // Rust pattern: Relaxed ordering is fine for single-value updates
        // that don't need to synchronize with other memory operations
        self.cell(switch).load(Ordering::Relaxed)
    }

    #[inline]
    pub fn snapshot(&self) -> ModeSnapshot {
        ModeSnapshot {
            low: self.low.load(Ordering::Relaxed),
            high: self.high.load(Ordering::Relaxed),
        }
    }

    fn store(&self, switch: ModeSwitch, level: bool) {
        self.cell(switch).store(level, Ordering::Relaxed);
    }
}

/// Edge handler writing a fixed level into one flag
struct FlagWriter {
    flags: Arc<ModeFlags>,
    switch: ModeSwitch,
    level: bool,
}

impl EdgeHandler for FlagWriter {
    #[inline]
    fn on_edge(&self) {
        self.flags.store(self.switch, self.level);
    }
}

/// Owns the mode flags and binds them to the physical switches
#[derive(Debug, Clone, Default)]
pub struct ModeController {
    flags: Arc<ModeFlags>,
}

impl ModeController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handler that drives `switch`'s flag to the level `edge` leaves behind
    ///
    /// Rising sets the flag, falling clears it.
    pub fn handler(&self, switch: ModeSwitch, edge: Edge) -> Arc<dyn EdgeHandler> {
        Arc::new(FlagWriter {
            flags: Arc::clone(&self.flags),
            switch,
            level: edge.level(),
        })
    }

    /// Subscribe both edge handlers to `input`, then seed the flag from a
    /// direct read of its current level
    ///
    /// Subscribing first means an edge racing the seed read is still seen.
    pub fn attach<S: BinarySwitch + ?Sized>(
        &self,
        switch: ModeSwitch,
        input: &S,
    ) -> EngineResult<()> {
        input.subscribe(Edge::Rising, self.handler(switch, Edge::Rising))?;
        input.subscribe(Edge::Falling, self.handler(switch, Edge::Falling))?;

        let level = input.read();
        self.flags.store(switch, level);
        debug!("{:?} mode switch attached, initial level {}", switch, level);
        Ok(())
    }

    /// Shared flags for the sample loop
    pub fn flags(&self) -> Arc<ModeFlags> {
        Arc::clone(&self.flags)
    }

    pub fn snapshot(&self) -> ModeSnapshot {
        self.flags.snapshot()
    }
}
