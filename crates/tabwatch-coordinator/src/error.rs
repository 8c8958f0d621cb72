//! Coordinator errors.

use tabwatch_host::HostError;
use tabwatch_protocols::TabId;
use tabwatch_storage::StorageError;
use thiserror::Error;

/// Coordinator error types.
#[derive(Debug, Error)]
pub enum CoordinatorError {
    /// Browser host failure.
    #[error(transparent)]
    Host(#[from] HostError),

    /// State persistence failure.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// No surface registered for the target tab.
    #[error("No surface registered for {0}")]
    SurfaceNotRegistered(TabId),

    /// The surface stopped listening (channel closed or full).
    #[error("Surface for {0} is not receiving")]
    SurfaceUnavailable(TabId),

    /// The coordinator task is gone.
    #[error("Coordinator is not running")]
    NotRunning,
}
