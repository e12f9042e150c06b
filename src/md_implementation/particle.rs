use crate::md_implementation::lj_pair::LennardJones;
use crate::md_implementation::minimum_image::MinimumImage;

/// A single point mass. Positions are stored as given and only folded into
/// the periodic box when a pair interaction is evaluated.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    id: usize,
    position: [f64; 3],
    velocity: [f64; 3],
}

impl Particle {
    pub fn new(id: usize, position: [f64; 3]) -> Self {
        Self::with_velocity(id, position, [0.0; 3])
    }

    pub fn with_velocity(id: usize, position: [f64; 3], velocity: [f64; 3]) -> Self {
        Self {
            id,
            position,
            velocity,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn position(&self) -> &[f64; 3] {
        &self.position
    }

    pub fn velocity(&self) -> &[f64; 3] {
        &self.velocity
    }

    pub fn kinetic_energy(&self, mass_opt: Option<f64>) -> f64 {
        let mass = mass_opt.unwrap_or(1.0);
        let [vx, vy, vz] = self.velocity;
        0.5 * mass * (vx * vx + vy * vy + vz * vz)
    }

    /// Shifted Lennard-Jones energy with `other`, defaults to unit epsilon and sigma.
    pub fn potential_energy(
        &self,
        other: &Particle,
        box_size: f64,
        epsilon_opt: Option<f64>,
        sigma_opt: Option<f64>,
    ) -> f64 {
        LennardJones::new(epsilon_opt, sigma_opt).pair_energy(self, other, box_size, MinimumImage::Round)
    }
}
