//! Particle state for the particle life simulation

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use rand::Rng;

/// A single colored particle
/// Laid out so a slice of particles can be uploaded to a GPU buffer as-is
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Particle {
    /// Position in simulation space
    pub position: Vec2,
    /// Velocity in units per time
    pub velocity: Vec2,
    /// Color class, an index into the affinity matrix
    pub color: u32,
}

impl Particle {
    /// Create a particle at rest
    pub fn new(position: Vec2, color: u32) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            color,
        }
    }

    /// Create a particle at rest with a uniformly random position inside
    /// `[0, width) x [0, height)` and a uniformly random color in `[0, colors)`
    ///
    /// `colors` must be non-zero.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, width: f32, height: f32, colors: u32) -> Self {
        let x = rng.random::<f32>() * width;
        let y = rng.random::<f32>() * height;
        let color = rng.random_range(0..colors);
        Self::new(Vec2::new(x, y), color)
    }

    /// Color as an index into the affinity matrix
    #[inline]
    pub fn color_index(&self) -> usize {
        self.color as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_particle_within_spawn_region() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let p = Particle::random(&mut rng, 1.9, 1.0, 4);
            assert!((0.0..1.9).contains(&p.position.x));
            assert!((0.0..1.0).contains(&p.position.y));
            assert!(p.color < 4);
            assert_eq!(p.velocity, Vec2::ZERO);
        }
    }

    #[test]
    fn test_particle_is_plain_old_data() {
        let particles = [Particle::new(Vec2::new(1.0, 2.0), 3)];
        let bytes: &[u8] = bytemuck::cast_slice(&particles);
        assert_eq!(bytes.len(), std::mem::size_of::<Particle>());
        assert_eq!(std::mem::size_of::<Particle>(), 20);
    }
}
