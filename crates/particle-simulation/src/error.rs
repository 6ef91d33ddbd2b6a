//! Construction errors for the particle simulation

use particle_physics::AffinityError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("invalid affinity matrix: {0}")]
    Affinity(#[from] AffinityError),

    #[error("particle {index} has color {color}, but the affinity matrix only has {colors} colors")]
    ColorOutOfRange {
        index: usize,
        color: u32,
        colors: usize,
    },

    #[error("particle {index} has a non-finite position or velocity")]
    NonFiniteParticle { index: usize },

    #[error("invalid physics parameters: {0}")]
    InvalidParams(String),
}
