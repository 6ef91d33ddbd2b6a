//! # Particle Life Physics
//!
//! CPU reference kernel for particle life: colored particles attract or repel
//! each other depending on a color-pair affinity matrix.

pub mod affinity;
pub mod constants;
pub mod forces;
pub mod integrator;
pub mod particle;

pub use affinity::*;
pub use constants::*;
pub use forces::*;
pub use integrator::*;
pub use particle::*;
