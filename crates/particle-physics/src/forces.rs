//! Pairwise force law and per-particle force accumulation
//!
//! Particles interact only within the interaction radius `r_max`. Below
//! `beta * r_max` every pair repels regardless of color, which keeps clusters
//! from collapsing into a point. Between `beta * r_max` and `r_max` the force
//! follows a tent profile scaled by the affinity of the two colors.
//!
//! ```text
//!  force
//!    a |              /\
//!      |             /  \
//!    0 +-----+------/----\------ r / r_max
//!      |    /     beta    1
//!   -1 |___/
//! ```

use glam::Vec2;

use crate::constants::{BETA, FORCE_FACTOR, R_MAX};
use crate::particle::Particle;

/// Parameters of the force law
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ForceLaw {
    /// Interaction radius
    pub r_max: f32,
    /// Repulsion fraction of `r_max`, in (0, 1)
    pub beta: f32,
    /// Gain applied to the accumulated force
    pub force_factor: f32,
}

impl Default for ForceLaw {
    fn default() -> Self {
        Self {
            r_max: R_MAX,
            beta: BETA,
            force_factor: FORCE_FACTOR,
        }
    }
}

impl ForceLaw {
    /// Force magnitude at normalized distance `r` (distance / r_max) for affinity `a`
    ///
    /// Negative values repel, positive values attract. Exactly zero at and
    /// beyond `r = 1`.
    #[inline]
    pub fn magnitude(&self, r: f32, a: f32) -> f32 {
        let beta = self.beta;
        if r < beta {
            r / beta - 1.0
        } else if r < 1.0 {
            a * (1.0 - (2.0 * r - 1.0 - beta).abs() / (1.0 - beta))
        } else {
            0.0
        }
    }

    /// Net force on `particle` from `neighbors`
    ///
    /// `affinities` is the particle's row of the affinity matrix, indexed by
    /// neighbor color. Neighbors at zero distance (the particle itself, or an
    /// exact overlap) and neighbors at or beyond `r_max` contribute nothing.
    pub fn accumulate<'a, I>(&self, particle: &Particle, neighbors: I, affinities: &[f32]) -> Vec2
    where
        I: IntoIterator<Item = &'a Particle>,
    {
        let mut total = Vec2::ZERO;

        for other in neighbors {
            let delta = other.position - particle.position;
            let r = delta.length();

            // r > 0 guards the division below
            if r > 0.0 && r < self.r_max {
                let f = self.magnitude(r / self.r_max, affinities[other.color_index()]);
                total += delta / r * f;
            }
        }

        total * self.r_max * self.force_factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-6;

    #[test]
    fn test_repulsion_at_zero_distance() {
        let law = ForceLaw::default();
        assert_eq!(law.magnitude(0.0, 1.0), -1.0);
        assert_eq!(law.magnitude(0.0, -1.0), -1.0);
    }

    #[test]
    fn test_repulsion_range_ignores_affinity() {
        let law = ForceLaw::default();
        for i in 0..30 {
            let r = i as f32 / 100.0;
            for a in [-1.0, -0.3, 0.0, 0.5, 1.0] {
                let f = law.magnitude(r, a);
                assert!((-1.0..=0.0).contains(&f), "r={r} a={a} f={f}");
                assert_eq!(f, law.magnitude(r, 0.0));
            }
        }
    }

    #[test]
    fn test_continuous_at_beta() {
        let law = ForceLaw::default();
        assert!(law.magnitude(law.beta, 1.0).abs() < EPS);
        assert!(law.magnitude(law.beta - EPS, 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_tent_follows_affinity() {
        let law = ForceLaw::default();
        for i in 31..100 {
            let r = i as f32 / 100.0;
            for a in [-1.0f32, -0.25, 0.25, 1.0] {
                let f = law.magnitude(r, a);
                assert!(f.abs() <= a.abs() + EPS);
                assert!(f == 0.0 || f.signum() == a.signum(), "r={r} a={a} f={f}");
            }
        }
    }

    #[test]
    fn test_tent_peaks_at_midpoint() {
        let law = ForceLaw::default();
        let mid = (1.0 + law.beta) / 2.0;
        assert!((law.magnitude(mid, 0.8) - 0.8).abs() < EPS);
    }

    #[test]
    fn test_zero_beyond_radius() {
        let law = ForceLaw::default();
        assert_eq!(law.magnitude(1.0, 1.0), 0.0);
        assert_eq!(law.magnitude(1.5, -1.0), 0.0);
        assert_eq!(law.magnitude(100.0, 1.0), 0.0);
    }

    #[test]
    fn test_accumulate_skips_self_and_overlap() {
        let law = ForceLaw::default();
        let p = Particle::new(Vec2::new(0.5, 0.5), 0);
        let twin = Particle::new(Vec2::new(0.5, 0.5), 0);

        let force = law.accumulate(&p, [&p, &twin], &[0.0]);

        assert_eq!(force, Vec2::ZERO);
        assert!(force.is_finite());
    }

    #[test]
    fn test_accumulate_ignores_far_neighbors() {
        let law = ForceLaw::default();
        let p = Particle::new(Vec2::ZERO, 0);
        let edge = Particle::new(Vec2::new(law.r_max, 0.0), 0);
        let far = Particle::new(Vec2::new(0.0, 2.0 * law.r_max), 0);

        assert_eq!(law.accumulate(&p, [&edge, &far], &[1.0]), Vec2::ZERO);
    }

    #[test]
    fn test_accumulate_attracts_toward_neighbor() {
        let law = ForceLaw::default();
        let p = Particle::new(Vec2::ZERO, 0);
        let other = Particle::new(Vec2::new(0.1, 0.0), 1);

        let force = law.accumulate(&p, [&other], &[0.0, 1.0]);

        assert!(force.x > 0.0);
        assert_eq!(force.y, 0.0);

        let expected = law.magnitude(0.1 / law.r_max, 1.0) * law.r_max * law.force_factor;
        assert!((force.x - expected).abs() < EPS);
    }

    #[test]
    fn test_accumulate_uses_neighbor_color() {
        let law = ForceLaw::default();
        let p = Particle::new(Vec2::ZERO, 0);
        let other = Particle::new(Vec2::new(0.0, 0.1), 1);

        let force = law.accumulate(&p, [&other], &[1.0, -1.0]);

        assert!(force.y < 0.0);
    }
}
