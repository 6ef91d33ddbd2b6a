//! # Particle Life Simulation Engine
//!
//! Data-parallel CPU simulation: a uniform grid narrows neighbor search, and
//! every tick updates all particles concurrently before rebuilding the grid.

pub mod error;
pub mod params;
pub mod simulation;
pub mod spatial;

pub use error::*;
pub use params::*;
pub use simulation::*;
pub use spatial::*;
