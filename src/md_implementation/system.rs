use crate::md_implementation::error::{MdError, Result};
use crate::md_implementation::particle::Particle;
use ndarray::{Array2, ArrayView2};

/// Particles in a cubic periodic box of side `box_size`.
#[derive(Clone, Debug)]
pub struct ParticleSystem {
    box_size: f64,
    particles: Vec<Particle>,
}

impl ParticleSystem {
    pub fn new(box_size: f64) -> Result<Self> {
        if !(box_size.is_finite() && box_size > 0.0) {
            return Err(MdError::InvalidBoxSize(box_size));
        }
        Ok(Self {
            box_size,
            particles: Vec::new(),
        })
    }

    /// Build from `(3, n)` position and optional `(3, n)` velocity arrays,
    /// numbering particles by column.
    pub fn from_arrays(
        box_size: f64,
        positions: ArrayView2<f64>,
        velocities: Option<ArrayView2<f64>>,
    ) -> Result<Self> {
        let mut system = Self::new(box_size)?;
        if positions.nrows() != 3 {
            return Err(MdError::BadShape {
                rows: positions.nrows(),
            });
        }
        if let Some(v) = &velocities {
            if v.nrows() != 3 {
                return Err(MdError::BadShape { rows: v.nrows() });
            }
            if v.ncols() != positions.ncols() {
                return Err(MdError::LengthMismatch {
                    positions: positions.ncols(),
                    velocities: v.ncols(),
                });
            }
        }

        system.particles.reserve(positions.ncols());
        for (i, r) in positions.columns().into_iter().enumerate() {
            let velocity = match &velocities {
                Some(v) => [v[[0, i]], v[[1, i]], v[[2, i]]],
                None => [0.0; 3],
            };
            system.add_particle(Particle::with_velocity(i, [r[0], r[1], r[2]], velocity));
        }
        Ok(system)
    }

    /// Ids are not checked for uniqueness.
    pub fn add_particle(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    pub fn box_size(&self) -> f64 {
        self.box_size
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn nb_particles(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn positions(&self) -> Array2<f64> {
        Array2::from_shape_fn((3, self.particles.len()), |(dim, i)| {
            self.particles[i].position()[dim]
        })
    }

    pub fn velocities(&self) -> Array2<f64> {
        Array2::from_shape_fn((3, self.particles.len()), |(dim, i)| {
            self.particles[i].velocity()[dim]
        })
    }
}
