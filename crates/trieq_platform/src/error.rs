//! Platform Error Types

use thiserror::Error;

use crate::traits::Edge;

/// Errors from peripheral operations
#[derive(Error, Debug)]
pub enum PlatformError {
    #[error("Failed to subscribe to {edge:?} edge on {switch}")]
    SubscriptionFailed { switch: String, edge: Edge },

    #[error("Peripheral disconnected: {0}")]
    Disconnected(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
