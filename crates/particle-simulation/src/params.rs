//! Physics parameters for runtime tuning

use particle_physics::{
    ForceLaw, Integrator, BETA, DT, FORCE_FACTOR, FRICTION_HALF_LIFE, R_MAX, SPAWN_HEIGHT,
    SPAWN_WIDTH,
};

use crate::ConfigError;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhysicsParams {
    // Integration
    pub dt: f32,
    pub friction_half_life: f32,

    // Force law
    pub r_max: f32,
    pub beta: f32,
    pub force_factor: f32,

    // Spawn region, anchored at the origin
    pub spawn_width: f32,
    pub spawn_height: f32,
}

impl Default for PhysicsParams {
    fn default() -> Self {
        Self {
            dt: DT,
            friction_half_life: FRICTION_HALF_LIFE,
            r_max: R_MAX,
            beta: BETA,
            force_factor: FORCE_FACTOR,
            spawn_width: SPAWN_WIDTH,
            spawn_height: SPAWN_HEIGHT,
        }
    }
}

impl PhysicsParams {
    /// Check the invariants the kernel relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("dt", self.dt),
            ("friction_half_life", self.friction_half_life),
            ("r_max", self.r_max),
            ("beta", self.beta),
            ("force_factor", self.force_factor),
            ("spawn_width", self.spawn_width),
            ("spawn_height", self.spawn_height),
        ];
        if let Some((name, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::InvalidParams(format!(
                "{name} must be finite, got {value}"
            )));
        }

        let positive = [
            ("dt", self.dt),
            ("friction_half_life", self.friction_half_life),
            ("r_max", self.r_max),
            ("spawn_width", self.spawn_width),
            ("spawn_height", self.spawn_height),
        ];
        if let Some((name, value)) = positive.iter().find(|(_, v)| *v <= 0.0) {
            return Err(ConfigError::InvalidParams(format!(
                "{name} must be positive, got {value}"
            )));
        }

        // r / beta divides by beta, and the tent profile divides by 1 - beta
        if !(self.beta > 0.0 && self.beta < 1.0) {
            return Err(ConfigError::InvalidParams(format!(
                "beta must lie in (0, 1), got {}",
                self.beta
            )));
        }

        Ok(())
    }

    pub fn force_law(&self) -> ForceLaw {
        ForceLaw {
            r_max: self.r_max,
            beta: self.beta,
            force_factor: self.force_factor,
        }
    }

    pub fn integrator(&self) -> Integrator {
        Integrator::new(self.dt, self.friction_half_life)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(PhysicsParams::default().validate(), Ok(()));
    }

    #[test]
    fn test_rejects_beta_outside_unit_interval() {
        for beta in [0.0, 1.0, 1.5, -0.1] {
            let params = PhysicsParams {
                beta,
                ..Default::default()
            };
            assert!(matches!(
                params.validate(),
                Err(ConfigError::InvalidParams(_))
            ));
        }
    }

    #[test]
    fn test_rejects_non_positive_radius_and_step() {
        let params = PhysicsParams {
            r_max: 0.0,
            ..Default::default()
        };
        assert!(params.validate().is_err());

        let params = PhysicsParams {
            dt: -0.016,
            ..Default::default()
        };
        assert!(params.validate().is_err());

        let params = PhysicsParams {
            friction_half_life: f32::INFINITY,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_derived_components() {
        let params = PhysicsParams::default();
        assert_eq!(params.force_law(), ForceLaw::default());
        assert_eq!(params.integrator(), Integrator::default());
    }
}
