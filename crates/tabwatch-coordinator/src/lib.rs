//! # tabwatch Coordinator
//!
//! The background coordinator at the heart of tabwatch. One task owns all
//! mutable state (latest-content record, listening-window handle, activity
//! flag) and reacts to:
//!
//! - tab activation and navigation-completion events from the host
//! - a content poll tick and a slower screenshot tick
//! - commands arriving through [`CoordinatorHandle`]
//!
//! State updates are merged field-by-field into the latest-content record
//! and fanned out to the monitor, analysis, and insights surfaces through
//! the [`SurfaceRegistry`]. There are no ambient singletons: everything
//! reaches the coordinator by message passing.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod handle;
pub mod lifecycle;
pub mod monitor;
pub mod registry;
pub mod spawner;

pub use config::CoordinatorConfig;
pub use dispatch::Dispatcher;
pub use error::CoordinatorError;
pub use handle::{Command, CoordinatorHandle};
pub use lifecycle::{ListeningWindow, WindowTracker};
pub use monitor::Coordinator;
pub use registry::SurfaceRegistry;
pub use spawner::{SurfaceKind, SurfaceSpawner};
