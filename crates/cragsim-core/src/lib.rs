//! CragSim Core - Climbing Simulation Engine
//!
//! The per-tick orchestrator for a single simulated climber on a hold-based
//! route. The physics model itself lives in `cragsim-logic`; this crate owns
//! the mutable state, the tick loop, external placement events, table
//! loading, and save/load.
//!
//! # Architecture
//!
//! - **`engine`**: the `SimulationEngine` tick loop and state machine
//!   (idle → climbing → falling / topped) plus discrete limb events
//! - **`config`**: per-hold-type drain/friction tables loaded from JSON
//! - **`persistence`**: versioned bincode snapshots of the full engine
//!
//! # Example
//!
//! ```rust,no_run
//! use cragsim_core::prelude::*;
//! use cragsim_logic::route::Route;
//!
//! let mut engine = SimulationEngine::new(Route::empty(), default_tables());
//!
//! // Run simulation
//! loop {
//!     engine.update(1.0 / 60.0, &SimConfig::default()); // 60 FPS
//! }
//! ```

pub mod config;
pub mod engine;
pub mod persistence;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::config::default_tables;
    pub use crate::engine::{PlacementTarget, SimConfig, SimulationEngine};
    pub use crate::persistence::{load_simulation, save_simulation};
}
