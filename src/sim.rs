//! src/sim.rs
//!
//! Top-level `sim` module: router model, registry loading, console log,
//! and the shared action-dispatching state.

pub mod console;
pub mod registry;
pub mod router;
pub mod state;

/// Re-exports
pub use console::Console;
pub use registry::LoadError;
pub use router::{BgpConfig, LinkState, Router, Status};
pub use state::{ActionError, SharedSim, SimState};
