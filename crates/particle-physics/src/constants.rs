//! Default constants for the particle life kernel
//!
//! Units are arbitrary: the spawn region is roughly one unit tall, and the
//! interaction radius is a small fraction of it.

/// Fixed time step per tick
pub const DT: f32 = 0.016;

/// Time for a particle's velocity to halve under friction alone
pub const FRICTION_HALF_LIFE: f32 = 0.04;

/// Interaction radius, also the cell size of the spatial grid
pub const R_MAX: f32 = 0.15;

/// Fraction of R_MAX below which the universal short-range repulsion applies.
/// Must stay in (0, 1).
pub const BETA: f32 = 0.3;

/// Global gain applied to the accumulated force
pub const FORCE_FACTOR: f32 = 5.0;

/// Width of the region new particles are spawned in
pub const SPAWN_WIDTH: f32 = 1.9;

/// Height of the region new particles are spawned in
pub const SPAWN_HEIGHT: f32 = 1.0;

/// Per-tick velocity decay for the given step and half-life
/// factor = 0.5^(dt / half_life)
pub fn friction_factor(dt: f32, half_life: f32) -> f32 {
    0.5f32.powf(dt / half_life)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_friction_factor_halves_after_half_life() {
        let per_tick = friction_factor(DT, FRICTION_HALF_LIFE);
        let ticks = FRICTION_HALF_LIFE / DT;
        assert!((per_tick.powf(ticks) - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_friction_factor_in_unit_interval() {
        let f = friction_factor(DT, FRICTION_HALF_LIFE);
        assert!(f > 0.0 && f < 1.0);
    }
}
