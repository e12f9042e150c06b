use crate::md_implementation::system::ParticleSystem;

impl ParticleSystem {
    pub fn total_kinetic_energy(&self) -> f64 {
        self.total_kinetic_energy_with_mass(None)
    }

    /// Kinetic energy with every particle carrying `mass_opt` (unit mass by default).
    pub fn total_kinetic_energy_with_mass(&self, mass_opt: Option<f64>) -> f64 {
        self.particles()
            .iter()
            .map(|p| p.kinetic_energy(mass_opt))
            .sum()
    }

    /// Kinetic plus direct-summation potential energy.
    pub fn total_energy(&self) -> f64 {
        self.total_kinetic_energy() + self.total_potential_energy()
    }
}
