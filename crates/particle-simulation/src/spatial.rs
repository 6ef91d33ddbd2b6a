//! Uniform grid for neighbor queries
//!
//! The cell size equals the interaction radius, so every particle within
//! `r_max` of a point lies in the 3x3 block of cells around that point's cell.
//! Buckets hold copies of the particles taken at the last rebuild; force
//! computation reads only these copies while the live particles are written.

use std::collections::HashMap;

use glam::{IVec2, Vec2};
use particle_physics::Particle;

static NEIGHBOR_OFFSETS: [IVec2; 9] = [
    IVec2::new(-1, -1),
    IVec2::new(-1, 0),
    IVec2::new(-1, 1),
    IVec2::new(0, -1),
    IVec2::new(0, 0),
    IVec2::new(0, 1),
    IVec2::new(1, -1),
    IVec2::new(1, 0),
    IVec2::new(1, 1),
];

#[derive(Clone, Debug)]
pub struct SpatialIndex {
    cell_size: f32,
    cells: HashMap<IVec2, Vec<Particle>>,
    len: usize,
}

impl SpatialIndex {
    /// Create an empty index. `cell_size` must be positive.
    pub fn new(cell_size: f32) -> Self {
        Self {
            cell_size,
            cells: HashMap::new(),
            len: 0,
        }
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Grid cell containing `position`
    #[inline]
    pub fn cell_of(&self, position: Vec2) -> IVec2 {
        (position / self.cell_size).floor().as_ivec2()
    }

    /// Replace the contents with `particles`
    ///
    /// Buckets that stay occupied keep their allocation between rebuilds.
    pub fn rebuild(&mut self, particles: &[Particle]) {
        for bucket in self.cells.values_mut() {
            bucket.clear();
        }

        for particle in particles {
            let cell = self.cell_of(particle.position);
            self.cells.entry(cell).or_default().push(*particle);
        }

        self.cells.retain(|_, bucket| !bucket.is_empty());
        self.len = particles.len();
    }

    /// Particles in the 3x3 block of cells around the cell containing `position`
    ///
    /// A superset of the particles within one cell size of `position`; callers
    /// filter by distance. Includes a particle at `position` itself.
    /// At the edge of the `i32` cell range, cells past the edge are skipped.
    pub fn neighbors(&self, position: Vec2) -> impl Iterator<Item = &Particle> + '_ {
        let center = self.cell_of(position);
        NEIGHBOR_OFFSETS
            .iter()
            .filter_map(move |offset| {
                let cell = IVec2::new(
                    center.x.checked_add(offset.x)?,
                    center.y.checked_add(offset.y)?,
                );
                self.cells.get(&cell)
            })
            .flatten()
    }

    /// Particles in a single cell
    pub fn cell(&self, cell: IVec2) -> &[Particle] {
        self.cells.get(&cell).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Occupied cells with their particles, in no particular order
    pub fn cells(&self) -> impl Iterator<Item = (IVec2, &[Particle])> + '_ {
        self.cells
            .iter()
            .map(|(cell, bucket)| (*cell, bucket.as_slice()))
    }

    pub fn occupied_cells(&self) -> usize {
        self.cells.len()
    }

    /// Number of indexed particles
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
