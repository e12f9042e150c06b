use crate::md_implementation::minimum_image::MinimumImage;
use crate::md_implementation::particle::Particle;

/// Cutoff radius in units of sigma.
pub const CUTOFF_FACTOR: f64 = 2.5;

/// Squared separations below this are treated as the same point and contribute nothing.
pub const COINCIDENT_R2: f64 = 1e-12;

/// Truncated and shifted Lennard-Jones 12-6 parameters.
///
/// The pair energy is `4 eps ((sig/r)^12 - (sig/r)^6) - u_cut` for `r < rc`
/// and zero beyond, where `rc = 2.5 sig` and `u_cut` is the unshifted value
/// at `rc`, so the potential is continuous at the cutoff.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LennardJones {
    pub epsilon: f64,
    pub sigma: f64,
}

impl Default for LennardJones {
    fn default() -> Self {
        Self {
            epsilon: 1.0,
            sigma: 1.0,
        }
    }
}

impl LennardJones {
    pub fn new(epsilon_opt: Option<f64>, sigma_opt: Option<f64>) -> Self {
        Self {
            epsilon: epsilon_opt.unwrap_or(1.0),
            sigma: sigma_opt.unwrap_or(1.0),
        }
    }

    pub fn cutoff(&self) -> f64 {
        CUTOFF_FACTOR * self.sigma
    }

    /// Unshifted potential at the cutoff radius.
    pub fn shift(&self) -> f64 {
        let rc = self.cutoff();
        self.unshifted(1.0 / (rc * rc))
    }

    /// Shifted pair energy for a squared separation.
    #[inline]
    pub fn energy_r2(&self, r2: f64) -> f64 {
        let rc = self.cutoff();
        if r2 >= rc * rc || r2 < COINCIDENT_R2 {
            return 0.0;
        }
        self.unshifted(1.0 / r2) - self.shift()
    }

    /// Shifted pair energy between two particles under the minimum-image convention.
    #[inline]
    pub fn pair_energy(&self, a: &Particle, b: &Particle, box_size: f64, image: MinimumImage) -> f64 {
        let d = image.displacement(a.position(), b.position(), box_size);
        self.energy_r2(d[0] * d[0] + d[1] * d[1] + d[2] * d[2])
    }

    #[inline]
    fn unshifted(&self, inv_r2: f64) -> f64 {
        let s2 = self.sigma * self.sigma * inv_r2;
        let s6 = s2 * s2 * s2;
        let s12 = s6 * s6;
        4.0 * self.epsilon * (s12 - s6)
    }
}

#[cfg(test)]
mod tests {
    use super::LennardJones;
    use crate::md_implementation::minimum_image::MinimumImage;
    use crate::md_implementation::particle::Particle;
    use googletest::{matchers::near, verify_that};
    use ndarray::Array;
    use ndarray_rand::rand::SeedableRng;
    use ndarray_rand::{rand_distr::Uniform, RandomExt};
    use rand_isaac::isaac64::Isaac64Rng;

    #[test]
    fn test_shift_value() {
        let lj = LennardJones::default();
        let expected = 4.0 * (0.4f64.powi(12) - 0.4f64.powi(6));
        verify_that!(lj.shift(), near(expected, 1e-15)).unwrap_or_else(|e| panic!("{}", e));
        verify_that!(lj.shift(), near(-0.016316891136, 1e-10)).unwrap_or_else(|e| panic!("{}", e));
    }

    #[test]
    fn test_energy_at_sigma_is_minus_shift() {
        let lj = LennardJones::default();
        let a = Particle::new(0, [0.0, 0.0, 0.0]);
        let b = Particle::new(1, [1.0, 0.0, 0.0]);
        let e = lj.pair_energy(&a, &b, 10.0, MinimumImage::Round);
        verify_that!(e, near(0.016316891136, 1e-10)).unwrap_or_else(|e| panic!("{}", e));
    }

    #[test]
    fn test_cutoff_continuity() {
        let lj = LennardJones::default();
        let rc = lj.cutoff();

        assert_eq!(lj.energy_r2(rc * rc), 0.0);
        let just_inside = rc * (1.0 - 1e-12);
        verify_that!(lj.energy_r2(just_inside * just_inside), near(0.0, 1e-9))
            .unwrap_or_else(|e| panic!("{}", e));

        let lj = LennardJones::new(Some(0.7), Some(0.3));
        let just_inside = lj.cutoff() * (1.0 - 1e-12);
        verify_that!(lj.energy_r2(just_inside * just_inside), near(0.0, 1e-9))
            .unwrap_or_else(|e| panic!("{}", e));
    }

    #[test]
    fn test_coincident_and_beyond_cutoff_are_zero() {
        let lj = LennardJones::default();
        let p = Particle::new(3, [1.5, 2.5, 3.5]);
        assert_eq!(lj.pair_energy(&p, &p, 10.0, MinimumImage::Round), 0.0);
        assert_eq!(lj.energy_r2(0.0), 0.0);
        assert_eq!(lj.energy_r2(9.0), 0.0);
    }

    #[test]
    fn test_well_minimum_is_attractive() {
        let lj = LennardJones::default();
        let r_min = 2f64.powf(1.0 / 6.0);
        let e = lj.energy_r2(r_min * r_min);
        verify_that!(e, near(-1.0 - lj.shift(), 1e-12)).unwrap_or_else(|e| panic!("{}", e));
        assert!(e < 0.0);
    }

    #[test]
    fn test_symmetry_random_pairs() {
        const SEED: u64 = 42;
        const BOX_SIZE: f64 = 6.0;
        let mut rng = Isaac64Rng::seed_from_u64(SEED);
        let positions = Array::random_using((3, 200), Uniform::new(-1.0, BOX_SIZE + 1.0), &mut rng);
        let lj = LennardJones::new(Some(0.7), Some(1.1));

        for i in 0..100 {
            let a = Particle::new(i, [positions[[0, i]], positions[[1, i]], positions[[2, i]]]);
            let j = i + 100;
            let b = Particle::new(j, [positions[[0, j]], positions[[1, j]], positions[[2, j]]]);
            for image in [MinimumImage::Round, MinimumImage::HalfBox] {
                assert_eq!(
                    lj.pair_energy(&a, &b, BOX_SIZE, image),
                    lj.pair_energy(&b, &a, BOX_SIZE, image)
                );
            }
            verify_that!(
                lj.pair_energy(&a, &b, BOX_SIZE, MinimumImage::Round),
                near(lj.pair_energy(&a, &b, BOX_SIZE, MinimumImage::HalfBox), 1e-9)
            )
            .unwrap_or_else(|e| panic!("{}", e));
        }
    }
}
