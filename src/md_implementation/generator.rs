use crate::md_implementation::error::{MdError, Result};
use crate::md_implementation::system::ParticleSystem;
use ndarray::Array2;
use rand::{Rng, SeedableRng};
use rand_isaac::isaac64::Isaac64Rng;

/// Smallest configuration the generator will produce.
pub const MIN_PARTICLES: usize = 5;

/// Largest configuration the generator will produce.
pub const MAX_PARTICLES: usize = 1 << 26;

/// Maximum displacement from a grid site, as a fraction of the grid spacing.
pub const JITTER_FACTOR: f64 = 0.2;

/// Positions of `round(box_size^3 * density)` particles on a jittered cubic
/// grid, as a `(3, n)` array wrapped into `[0, box_size)`.
///
/// Sites are cell centres of the smallest `k^3` grid holding all particles,
/// filled in x-major order; every coordinate is then displaced uniformly by at
/// most `JITTER_FACTOR` grid spacings. The same seed always yields the same
/// configuration.
pub fn jittered_grid_positions(box_size: f64, density: f64, seed: u64) -> Result<Array2<f64>> {
    if !(box_size.is_finite() && box_size > 0.0) {
        return Err(MdError::InvalidBoxSize(box_size));
    }
    if !(density.is_finite() && density > 0.0) {
        return Err(MdError::InvalidDensity(density));
    }
    let requested = (box_size.powi(3) * density).round();
    if requested > MAX_PARTICLES as f64 {
        return Err(MdError::TooManyParticles {
            requested,
            maximum: MAX_PARTICLES,
        });
    }
    let nb_particles = requested as usize;
    if nb_particles < MIN_PARTICLES {
        return Err(MdError::TooFewParticles {
            requested: nb_particles,
            minimum: MIN_PARTICLES,
        });
    }

    let mut sites_per_axis = (nb_particles as f64).cbrt() as usize;
    while sites_per_axis.pow(3) < nb_particles {
        sites_per_axis += 1;
    }
    let spacing = box_size / sites_per_axis as f64;
    let max_jitter = JITTER_FACTOR * spacing;

    let mut rng = Isaac64Rng::seed_from_u64(seed);
    let mut positions = Array2::<f64>::zeros((3, nb_particles));
    let sites = itertools::iproduct!(0..sites_per_axis, 0..sites_per_axis, 0..sites_per_axis);
    for (n, (i, j, k)) in sites.take(nb_particles).enumerate() {
        for (dim, site) in [i, j, k].into_iter().enumerate() {
            let jitter: f64 = rng.gen_range(-1.0..=1.0);
            let x = (site as f64 + 0.5) * spacing + jitter * max_jitter;
            positions[[dim, n]] = wrap_into_box(x, box_size);
        }
    }
    Ok(positions)
}

/// [`jittered_grid_positions`] loaded into a system at rest.
pub fn generate_jittered_grid(box_size: f64, density: f64, seed: u64) -> Result<ParticleSystem> {
    let positions = jittered_grid_positions(box_size, density, seed)?;
    ParticleSystem::from_arrays(box_size, positions.view(), None)
}

#[inline]
fn wrap_into_box(x: f64, box_size: f64) -> f64 {
    let wrapped = x.rem_euclid(box_size);
    // rem_euclid rounds tiny negative values up to box_size
    if wrapped >= box_size {
        0.0
    } else {
        wrapped
    }
}
