use crate::md_implementation::lj_pair::LennardJones;
use crate::md_implementation::minimum_image::MinimumImage;
use crate::md_implementation::system::ParticleSystem;
use rayon::prelude::*;

impl ParticleSystem {
    /// Direct O(N^2) summation over all pairs `i < j` with unit epsilon and sigma.
    pub fn total_potential_energy(&self) -> f64 {
        self.lj_direct_summation(&LennardJones::default(), MinimumImage::Round)
    }

    /// Same pairs as [`ParticleSystem::total_potential_energy`], with the outer loop spread over
    /// the rayon pool. Only the order of the final reduction differs.
    pub fn total_potential_energy_par(&self) -> f64 {
        self.lj_direct_summation_par(&LennardJones::default(), MinimumImage::Round)
    }

    pub fn lj_direct_summation(&self, lj: &LennardJones, image: MinimumImage) -> f64 {
        let particles = self.particles();
        let mut potential_energy = 0f64;

        for i in 0..particles.len() {
            for j in i + 1..particles.len() {
                potential_energy += lj.pair_energy(&particles[i], &particles[j], self.box_size(), image);
            }
        }
        potential_energy
    }

    pub fn lj_direct_summation_par(&self, lj: &LennardJones, image: MinimumImage) -> f64 {
        let particles = self.particles();
        let box_size = self.box_size();

        (0..particles.len())
            .into_par_iter()
            .map(|i| {
                particles[i + 1..]
                    .iter()
                    .map(|pj| lj.pair_energy(&particles[i], pj, box_size, image))
                    .sum::<f64>()
            })
            .sum()
    }
}
