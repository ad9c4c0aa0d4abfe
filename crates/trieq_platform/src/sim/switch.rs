//! Simulated mode switch with edge interrupts

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::PlatformError;
use crate::traits::{BinarySwitch, Edge, EdgeHandler};

struct SwitchState {
    name: String,
    level: AtomicBool,
    rising: RwLock<Vec<Arc<dyn EdgeHandler>>>,
    falling: RwLock<Vec<Arc<dyn EdgeHandler>>>,
}

/// A two-position switch that fires subscribed handlers on transitions
///
/// `set_level()` plays the role of the interrupt controller: the handlers
/// run synchronously on the calling thread, preempting nothing but that
/// thread, while the sample loop keeps running elsewhere.
#[derive(Clone)]
pub struct SimSwitch {
    state: Arc<SwitchState>,
}

impl SimSwitch {
    pub fn new(name: impl Into<String>, level: bool) -> Self {
        Self {
            state: Arc::new(SwitchState {
                name: name.into(),
                level: AtomicBool::new(level),
                rising: RwLock::new(Vec::new()),
                falling: RwLock::new(Vec::new()),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.state.name
    }

    /// Move the switch; returns the edge fired, if the level changed
    pub fn set_level(&self, level: bool) -> Option<Edge> {
        if self.state.level.swap(level, Ordering::AcqRel) == level {
            return None;
        }

        let edge = if level { Edge::Rising } else { Edge::Falling };
        let handlers = match edge {
            Edge::Rising => self.state.rising.read(),
            Edge::Falling => self.state.falling.read(),
        };
        for handler in handlers.iter() {
            handler.on_edge();
        }
        Some(edge)
    }

    /// Flip the switch
    pub fn toggle(&self) -> Option<Edge> {
        self.set_level(!self.read())
    }

    /// Number of handlers registered for `edge`
    pub fn subscribers(&self, edge: Edge) -> usize {
        match edge {
            Edge::Rising => self.state.rising.read().len(),
            Edge::Falling => self.state.falling.read().len(),
        }
    }
}

impl std::fmt::Debug for SimSwitch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimSwitch")
            .field("name", &self.state.name)
            .field("level", &self.read())
            .finish()
    }
}

impl BinarySwitch for SimSwitch {
    fn read(&self) -> bool {
        self.state.level.load(Ordering::Acquire)
    }

    fn subscribe(&self, edge: Edge, handler: Arc<dyn EdgeHandler>) -> Result<(), PlatformError> {
        let mut handlers = match edge {
            Edge::Rising => self.state.rising.write(),
            Edge::Falling => self.state.falling.write(),
        };
        handlers.push(handler);
        tracing::debug!("{} subscribed to {:?} edge", self.state.name, edge);
        Ok(())
    }
}
