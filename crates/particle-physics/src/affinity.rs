//! Color-to-color affinity matrix
//!
//! Entry `(a, b)` is the force coefficient color `a` feels toward color `b`.
//! The matrix is asymmetric: `(a, b)` and `(b, a)` are independent.

use rand::Rng;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AffinityError {
    #[error("affinity matrix is empty")]
    Empty,

    #[error("affinity matrix is not square: row {row} has {len} entries, expected {expected}")]
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("affinity index ({row}, {col}) out of bounds for {size}x{size} matrix")]
    IndexOutOfBounds { row: usize, col: usize, size: usize },

    #[error("affinity value {value} is outside [-1, 1]")]
    ValueOutOfRange { value: f32 },
}

/// Square matrix of affinities in [-1, 1], stored row-major
#[derive(Clone, Debug, PartialEq)]
pub struct AffinityMatrix {
    size: usize,
    values: Vec<f32>,
}

impl AffinityMatrix {
    /// Build a matrix from rows
    ///
    /// Fails if there are no rows, a row length differs from the row count, or
    /// any value lies outside [-1, 1].
    pub fn new(rows: Vec<Vec<f32>>) -> Result<Self, AffinityError> {
        let size = rows.len();
        if size == 0 {
            return Err(AffinityError::Empty);
        }

        let mut values = Vec::with_capacity(size * size);
        for (row, entries) in rows.into_iter().enumerate() {
            if entries.len() != size {
                return Err(AffinityError::NotSquare {
                    row,
                    len: entries.len(),
                    expected: size,
                });
            }
            for value in entries {
                check_value(value)?;
                values.push(value);
            }
        }

        Ok(Self { size, values })
    }

    /// All-zero matrix of the given size
    pub fn zeros(size: usize) -> Result<Self, AffinityError> {
        if size == 0 {
            return Err(AffinityError::Empty);
        }
        Ok(Self {
            size,
            values: vec![0.0; size * size],
        })
    }

    /// Matrix with entries drawn uniformly from [-1, 1)
    pub fn random<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Result<Self, AffinityError> {
        let mut matrix = Self::zeros(size)?;
        matrix.randomize(rng);
        Ok(matrix)
    }

    /// Number of colors
    pub fn size(&self) -> usize {
        self.size
    }

    /// Affinity of color `row` toward color `col`
    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        if row < self.size && col < self.size {
            Some(self.values[row * self.size + col])
        } else {
            None
        }
    }

    /// Affinities of color `row` toward every color, indexed by color
    ///
    /// # Panics
    /// If `row >= self.size()`.
    #[inline]
    pub fn row(&self, row: usize) -> &[f32] {
        let start = row * self.size;
        &self.values[start..start + self.size]
    }

    /// Iterate over rows
    pub fn rows(&self) -> impl Iterator<Item = &[f32]> {
        self.values.chunks_exact(self.size)
    }

    /// Set a single entry. On error the matrix is left untouched.
    pub fn set(&mut self, row: usize, col: usize, value: f32) -> Result<(), AffinityError> {
        if row >= self.size || col >= self.size {
            return Err(AffinityError::IndexOutOfBounds {
                row,
                col,
                size: self.size,
            });
        }
        check_value(value)?;
        self.values[row * self.size + col] = value;
        Ok(())
    }

    /// Redraw every entry uniformly from [-1, 1)
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for value in &mut self.values {
            *value = rng.random_range(-1.0..1.0);
        }
    }

    /// Reset every entry to zero
    pub fn clear(&mut self) {
        self.values.fill(0.0);
    }
}

fn check_value(value: f32) -> Result<(), AffinityError> {
    // NaN fails the range check too
    if (-1.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(AffinityError::ValueOutOfRange { value })
    }
}
