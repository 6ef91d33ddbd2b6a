//! Fixed-step semi-implicit Euler integration with exponential friction

use glam::Vec2;

use crate::constants::{friction_factor, DT, FRICTION_HALF_LIFE};
use crate::particle::Particle;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Integrator {
    /// Time step
    pub dt: f32,
    /// Per-step velocity decay, 0.5^(dt / half_life)
    pub friction_factor: f32,
}

impl Default for Integrator {
    fn default() -> Self {
        Self::new(DT, FRICTION_HALF_LIFE)
    }
}

impl Integrator {
    pub fn new(dt: f32, friction_half_life: f32) -> Self {
        Self {
            dt,
            friction_factor: friction_factor(dt, friction_half_life),
        }
    }

    /// Advance one particle by one step under `force`
    /// Velocity is damped and updated first, then position moves with the new velocity.
    #[inline]
    pub fn step(&self, particle: &mut Particle, force: Vec2) {
        particle.velocity *= self.friction_factor;
        particle.velocity += force * self.dt;
        particle.position += particle.velocity * self.dt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_friction_only_decays_velocity() {
        let integrator = Integrator::default();
        let mut p = Particle::new(Vec2::ZERO, 0);
        p.velocity = Vec2::new(1.0, -2.0);

        integrator.step(&mut p, Vec2::ZERO);

        let expected = Vec2::new(1.0, -2.0) * integrator.friction_factor;
        assert_eq!(p.velocity, expected);
        assert_eq!(p.position, expected * integrator.dt);
    }

    #[test]
    fn test_position_uses_updated_velocity() {
        let integrator = Integrator::new(0.1, 1.0);
        let mut p = Particle::new(Vec2::new(1.0, 1.0), 0);

        integrator.step(&mut p, Vec2::new(10.0, 0.0));

        // v = 10 * 0.1 = 1, x = 1 + 1 * 0.1
        assert!((p.velocity.x - 1.0).abs() < 1e-6);
        assert!((p.position.x - 1.1).abs() < 1e-6);
        assert_eq!(p.position.y, 1.0);
    }

    #[test]
    fn test_no_wrapping() {
        let integrator = Integrator::default();
        let mut p = Particle::new(Vec2::new(-50.0, 1000.0), 0);
        p.velocity = Vec2::new(-1.0, 1.0);

        integrator.step(&mut p, Vec2::ZERO);

        assert!(p.position.x < -50.0);
        assert!(p.position.y > 1000.0);
    }
}
