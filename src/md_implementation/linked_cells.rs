use crate::md_implementation::cells::{half_stencil, CellGrid, MAX_CELLS_PER_AXIS};
use crate::md_implementation::lj_pair::LennardJones;
use crate::md_implementation::minimum_image::MinimumImage;
use crate::md_implementation::particle::Particle;
use crate::md_implementation::system::ParticleSystem;
use log::debug;
use rayon::prelude::*;

/// Below this many particles the direct sum is used instead of cells.
pub const MIN_PARTICLES_FOR_CELLS: usize = 100;

/// Below this many cutoffs per box length the direct sum is used instead of cells.
pub const MIN_BOX_CUTOFFS_FOR_CELLS: f64 = 3.0;

/// When the linked-cell evaluator falls back to direct summation.
///
/// The defaults (100 particles, box of three cutoffs, at most 20 cells per
/// axis) come from timing both evaluators on jittered-grid configurations; see
/// the `heuristic` binary. They affect speed only, never the result beyond
/// rounding.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellHeuristic {
    pub min_particles: usize,
    pub min_box_cutoffs: f64,
    pub max_cells_per_axis: usize,
}

impl Default for CellHeuristic {
    fn default() -> Self {
        Self {
            min_particles: MIN_PARTICLES_FOR_CELLS,
            min_box_cutoffs: MIN_BOX_CUTOFFS_FOR_CELLS,
            max_cells_per_axis: MAX_CELLS_PER_AXIS,
        }
    }
}

impl CellHeuristic {
    /// Never fall back, whatever the system size.
    pub fn always() -> Self {
        Self {
            min_particles: 0,
            min_box_cutoffs: 0.0,
            ..Self::default()
        }
    }

    pub fn use_cells(&self, system: &ParticleSystem, cutoff: f64) -> bool {
        system.nb_particles() >= self.min_particles
            && system.box_size() >= self.min_box_cutoffs * cutoff
    }
}

impl ParticleSystem {
    /// Potential energy via linked cells with the default fallback policy.
    ///
    /// Small or tightly boxed systems are handed to
    /// [`ParticleSystem::total_potential_energy`] unchanged, so the result is
    /// bit-identical there.
    pub fn total_potential_energy_linked_cells(&self) -> f64 {
        self.lj_linked_cells(&LennardJones::default(), &CellHeuristic::default(), false)
    }

    pub fn total_potential_energy_linked_cells_par(&self) -> f64 {
        self.lj_linked_cells(&LennardJones::default(), &CellHeuristic::default(), true)
    }

    pub fn total_potential_energy_linked_cells_with(&self, heuristic: &CellHeuristic) -> f64 {
        self.lj_linked_cells(&LennardJones::default(), heuristic, false)
    }

    pub fn lj_linked_cells(&self, lj: &LennardJones, heuristic: &CellHeuristic, parallel: bool) -> f64 {
        let cutoff = lj.cutoff();
        if !heuristic.use_cells(self, cutoff) {
            debug!(
                "direct summation for {} particles in box {}",
                self.nb_particles(),
                self.box_size()
            );
            return if parallel {
                self.lj_direct_summation_par(lj, MinimumImage::Round)
            } else {
                self.lj_direct_summation(lj, MinimumImage::Round)
            };
        }

        let grid = CellGrid::build(self, cutoff, heuristic.max_cells_per_axis);
        debug!(
            "linked cells: {} particles, {}^3 cells of size {:.4}",
            self.nb_particles(),
            grid.cells_per_axis(),
            grid.cell_size()
        );

        let coords: Vec<[usize; 3]> = grid.coordinates().collect();
        let cell_energy = |coord: &[usize; 3]| self.cell_energy(&grid, *coord, lj);
        if parallel {
            coords.par_iter().map(cell_energy).sum()
        } else {
            coords.iter().map(cell_energy).sum()
        }
    }

    /// Pairs inside `coord` plus pairs between `coord` and the neighbor cells it owns.
    fn cell_energy(&self, grid: &CellGrid, coord: [usize; 3], lj: &LennardJones) -> f64 {
        let particles = self.particles();
        let current = grid.cell(coord);
        if current.is_empty() {
            return 0.0;
        }

        let mut potential_energy = 0f64;
        for (n, &i) in current.iter().enumerate() {
            for &j in &current[n + 1..] {
                potential_energy += lj.pair_energy(&particles[i], &particles[j], self.box_size(), MinimumImage::Round);
            }
        }

        // on grids narrower than 3 cells a shift and its opposite can coincide
        if grid.cells_per_axis() >= 3 {
            for shift in half_stencil() {
                let neighbor = grid.cell(grid.shifted(coord, shift));
                potential_energy += self.cross_energy(current, neighbor, lj);
            }
        } else {
            for other in grid.upper_neighbors(coord) {
                potential_energy += self.cross_energy(current, grid.cell(other), lj);
            }
        }
        potential_energy
    }

    #[inline]
    fn cross_energy(&self, current: &[usize], neighbor: &[usize], lj: &LennardJones) -> f64 {
        let particles = self.particles();
        let mut potential_energy = 0f64;
        for &i in current {
            let pi: &Particle = &particles[i];
            for &j in neighbor {
                potential_energy += lj.pair_energy(pi, &particles[j], self.box_size(), MinimumImage::Round);
            }
        }
        potential_energy
    }
}

#[cfg(test)]
mod tests {
    use super::CellHeuristic;
    use crate::md_implementation::generator::generate_jittered_grid;
    use crate::md_implementation::lj_pair::LennardJones;
    use crate::md_implementation::particle::Particle;
    use crate::md_implementation::system::ParticleSystem;
    use googletest::{matchers::near, verify_that};
    use ndarray::Array;
    use ndarray_rand::rand::SeedableRng;
    use ndarray_rand::{rand_distr::Uniform, RandomExt};
    use rand_isaac::isaac64::Isaac64Rng;

    fn relative_error(should: f64, is: f64) -> f64 {
        (should - is).abs() / should.abs().max(1e-12)
    }

    #[test]
    fn test_linked_cells_equal_direct() {
        for (box_size, density, seed) in [
            (7.5, 0.5, 1),
            (8.0, 0.8, 2),
            (10.0, 0.3, 3),
            (12.0, 1.0, 4),
            (15.0, 0.6, 5),
        ] {
            let system = generate_jittered_grid(box_size, density, seed).unwrap();
            assert!(system.nb_particles() >= 100);

            let direct = system.total_potential_energy();
            let cells = system.total_potential_energy_linked_cells();
            verify_that!(relative_error(direct, cells), near(0.0, 1e-9)).unwrap_or_else(|e| {
                panic!("box {} density {}: direct {} cells {}\n{}", box_size, density, direct, cells, e)
            });
        }
    }

    #[test]
    fn test_linked_cells_capped_grid() {
        // 60 / 2.5 = 24 cells per axis, capped to 20
        let system = generate_jittered_grid(60.0, 0.02, 17).unwrap();
        let direct = system.total_potential_energy();
        let cells = system.total_potential_energy_linked_cells();
        verify_that!(relative_error(direct, cells), near(0.0, 1e-9)).unwrap_or_else(|e| panic!("{}", e));
    }

    #[test]
    fn test_linked_cells_random_unwrapped_positions() {
        const NB_PARTICLES: usize = 400;
        const BOX_SIZE: f64 = 11.0;
        let mut rng = Isaac64Rng::seed_from_u64(42);
        // positions straddle the box so binning has to fold them back
        let positions =
            Array::random_using((3, NB_PARTICLES), Uniform::new(-BOX_SIZE, 2.0 * BOX_SIZE), &mut rng);
        let system = ParticleSystem::from_arrays(BOX_SIZE, positions.view(), None).unwrap();

        let direct = system.total_potential_energy();
        let cells = system.total_potential_energy_linked_cells();
        verify_that!(relative_error(direct, cells), near(0.0, 1e-9)).unwrap_or_else(|e| panic!("{}", e));
    }

    #[test]
    fn test_small_system_falls_back_bit_identical() {
        let system = generate_jittered_grid(8.0, 0.15, 9).unwrap();
        assert!(system.nb_particles() < 100);
        assert_eq!(
            system.total_potential_energy_linked_cells().to_bits(),
            system.total_potential_energy().to_bits()
        );

        // enough particles, but the box is narrower than three cutoffs
        let system = generate_jittered_grid(7.0, 0.5, 9).unwrap();
        assert!(system.nb_particles() >= 100);
        assert_eq!(
            system.total_potential_energy_linked_cells().to_bits(),
            system.total_potential_energy().to_bits()
        );
    }

    #[test]
    fn test_forced_cells_on_coarse_grids() {
        // 2 cells per axis: the half stencil would double count, the grid must not
        for (box_size, density) in [(5.5, 0.6), (6.0, 1.0), (7.0, 0.4)] {
            let system = generate_jittered_grid(box_size, density, 21).unwrap();
            let direct = system.total_potential_energy();
            let cells = system.total_potential_energy_linked_cells_with(&CellHeuristic::always());
            verify_that!(relative_error(direct, cells), near(0.0, 1e-9)).unwrap_or_else(|e| {
                panic!("box {}: direct {} cells {}\n{}", box_size, direct, cells, e)
            });
        }
    }

    #[test]
    fn test_forced_cells_few_particles() {
        let mut system = ParticleSystem::new(10.0).unwrap();
        let heuristic = CellHeuristic::always();
        assert_eq!(system.total_potential_energy_linked_cells_with(&heuristic), 0.0);

        system.add_particle(Particle::new(0, [0.1, 5.0, 5.0]));
        assert_eq!(system.total_potential_energy_linked_cells_with(&heuristic), 0.0);

        // neighbours only through the periodic boundary, in opposite edge cells
        system.add_particle(Particle::new(1, [9.9, 5.0, 5.0]));
        system.add_particle(Particle::new(2, [0.0, 5.0, 8.9]));
        let direct = system.total_potential_energy();
        let cells = system.total_potential_energy_linked_cells_with(&heuristic);
        assert!(direct > 1e8);
        verify_that!(relative_error(direct, cells), near(0.0, 1e-9)).unwrap_or_else(|e| panic!("{}", e));
    }

    #[test]
    fn test_parallel_linked_cells() {
        let system = generate_jittered_grid(14.0, 0.9, 77).unwrap();
        let direct = system.total_potential_energy();
        let cells = system.total_potential_energy_linked_cells_par();
        verify_that!(relative_error(direct, cells), near(0.0, 1e-9)).unwrap_or_else(|e| panic!("{}", e));
    }

    #[test]
    fn test_custom_parameters() {
        // a larger sigma widens the cutoff and therefore the cells
        let system = generate_jittered_grid(12.0, 0.5, 4).unwrap();
        let lj = LennardJones::new(Some(0.7), Some(1.3));
        let direct = system.lj_direct_summation(&lj, Default::default());
        let cells = system.lj_linked_cells(&lj, &CellHeuristic::default(), false);
        verify_that!(relative_error(direct, cells), near(0.0, 1e-9)).unwrap_or_else(|e| panic!("{}", e));
    }

    #[test]
    fn test_heuristic_policy() {
        let heuristic = CellHeuristic::default();
        let big = generate_jittered_grid(8.0, 0.5, 1).unwrap();
        let small = generate_jittered_grid(8.0, 0.1, 1).unwrap();
        let tight = generate_jittered_grid(7.0, 1.0, 1).unwrap();
        assert!(heuristic.use_cells(&big, 2.5));
        assert!(!heuristic.use_cells(&small, 2.5));
        assert!(!heuristic.use_cells(&tight, 2.5));
        assert!(CellHeuristic::always().use_cells(&small, 2.5));
    }

    fn particles_in_box(nb_particles: usize, box_size: f64) -> ParticleSystem {
        let mut system = ParticleSystem::new(box_size).unwrap();
        for i in 0..nb_particles {
            let x = box_size * i as f64 / nb_particles as f64;
            system.add_particle(Particle::new(i, [x, 0.5 * x, 0.25 * x]));
        }
        system
    }

    #[test]
    fn test_heuristic_boundaries_inclusive() {
        let heuristic = CellHeuristic::default();
        // exactly 100 particles in exactly three cutoffs
        assert!(heuristic.use_cells(&particles_in_box(100, 7.5), 2.5));
        assert!(!heuristic.use_cells(&particles_in_box(99, 7.5), 2.5));
        assert!(!heuristic.use_cells(&particles_in_box(100, 7.499), 2.5));
    }
}
