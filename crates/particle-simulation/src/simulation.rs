//! CPU particle life simulation manager
//!
//! NOTE: A tick reads neighbor state only from the spatial index, whose buckets
//! are copies taken at the end of the previous tick, and writes only the live
//! particle slice. No particle ever observes another particle's state from the
//! tick in progress, so results do not depend on thread scheduling.

use glam::Vec2;
use particle_physics::{AffinityMatrix, AffinityError, ForceLaw, Integrator, Particle};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

use crate::{ConfigError, PhysicsParams, SpatialIndex};

pub struct ParticleSimulation {
    particles: Vec<Particle>,
    affinities: AffinityMatrix,
    index: SpatialIndex,

    params: PhysicsParams,
    force_law: ForceLaw,
    integrator: Integrator,

    // Drives spawning and matrix randomization, so seeded runs replay exactly
    rng: StdRng,
    tick_count: u64,
}

impl ParticleSimulation {
    /// Spawn `particle_count` random particles with default parameters
    pub fn new(particle_count: usize, affinities: AffinityMatrix) -> Result<Self, ConfigError> {
        Self::from_rng(
            particle_count,
            affinities,
            PhysicsParams::default(),
            StdRng::from_os_rng(),
        )
    }

    /// Spawn `particle_count` random particles from a fixed seed
    pub fn with_seed(
        particle_count: usize,
        affinities: AffinityMatrix,
        params: PhysicsParams,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        Self::from_rng(
            particle_count,
            affinities,
            params,
            StdRng::seed_from_u64(seed),
        )
    }

    /// Build a simulation around explicit particles
    ///
    /// Fails if any particle's color is not a row of `affinities`, or if its
    /// position or velocity is not finite.
    pub fn from_particles(
        particles: Vec<Particle>,
        affinities: AffinityMatrix,
        params: PhysicsParams,
    ) -> Result<Self, ConfigError> {
        params.validate()?;
        Self::build(particles, affinities, params, StdRng::from_os_rng())
    }

    fn from_rng(
        particle_count: usize,
        affinities: AffinityMatrix,
        params: PhysicsParams,
        mut rng: StdRng,
    ) -> Result<Self, ConfigError> {
        params.validate()?;

        let colors = affinities.size() as u32;
        let particles = (0..particle_count)
            .map(|_| Particle::random(&mut rng, params.spawn_width, params.spawn_height, colors))
            .collect();

        Self::build(particles, affinities, params, rng)
    }

    fn build(
        particles: Vec<Particle>,
        affinities: AffinityMatrix,
        params: PhysicsParams,
        rng: StdRng,
    ) -> Result<Self, ConfigError> {
        // params are validated by the callers
        let colors = affinities.size();
        if let Some((index, particle)) = particles
            .iter()
            .enumerate()
            .find(|(_, p)| p.color_index() >= colors)
        {
            return Err(ConfigError::ColorOutOfRange {
                index,
                color: particle.color,
                colors,
            });
        }

        if let Some(index) = particles
            .iter()
            .position(|p| !p.position.is_finite() || !p.velocity.is_finite())
        {
            return Err(ConfigError::NonFiniteParticle { index });
        }

        let mut index = SpatialIndex::new(params.r_max);
        index.rebuild(&particles);

        log::info!(
            "Initialized {} particles with {} colors ({} occupied cells)",
            particles.len(),
            colors,
            index.occupied_cells()
        );

        Ok(Self {
            particles,
            affinities,
            index,
            params,
            force_law: params.force_law(),
            integrator: params.integrator(),
            rng,
            tick_count: 0,
        })
    }

    /// Advance every particle by one fixed time step
    ///
    /// Returns once all particles are updated and the spatial index reflects
    /// their new positions.
    pub fn tick(&mut self) {
        let index = &self.index;
        let affinities = &self.affinities;
        let force_law = self.force_law;
        let integrator = self.integrator;

        self.particles.par_iter_mut().for_each(|particle| {
            let force = force_law.accumulate(
                particle,
                index.neighbors(particle.position),
                affinities.row(particle.color_index()),
            );
            integrator.step(particle, force);
        });

        self.index.rebuild(&self.particles);
        self.tick_count += 1;

        log::trace!(
            "Tick {} done ({} occupied cells)",
            self.tick_count,
            self.index.occupied_cells()
        );
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Particle data as raw bytes, ready for a vertex or storage buffer upload
    pub fn particle_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.particles)
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn color_count(&self) -> usize {
        self.affinities.size()
    }

    pub fn affinities(&self) -> &AffinityMatrix {
        &self.affinities
    }

    pub fn spatial_index(&self) -> &SpatialIndex {
        &self.index
    }

    pub fn params(&self) -> &PhysicsParams {
        &self.params
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Set how strongly color `row` is drawn to color `col`
    pub fn set_affinity(&mut self, row: usize, col: usize, value: f32) -> Result<(), AffinityError> {
        self.affinities.set(row, col, value)
    }

    /// Redraw the whole affinity matrix uniformly from [-1, 1)
    pub fn randomize_affinities(&mut self) {
        self.affinities.randomize(&mut self.rng);
        log::debug!("Randomized {0}x{0} affinity matrix", self.affinities.size());
    }

    /// Zero the whole affinity matrix
    pub fn clear_affinities(&mut self) {
        self.affinities.clear();
        log::debug!("Cleared affinity matrix");
    }

    /// Sum of |v|^2 / 2 over all particles (unit mass)
    pub fn kinetic_energy(&self) -> f32 {
        self.particles
            .iter()
            .map(|p| 0.5 * p.velocity.length_squared())
            .sum()
    }

    pub fn max_speed(&self) -> f32 {
        self.particles
            .iter()
            .map(|p| p.velocity.length())
            .fold(0.0, f32::max)
    }

    /// Mean particle position, or the origin for an empty simulation
    pub fn centroid(&self) -> Vec2 {
        if self.particles.is_empty() {
            return Vec2::ZERO;
        }
        let sum: Vec2 = self.particles.iter().map(|p| p.position).sum();
        sum / self.particles.len() as f32
    }
}
