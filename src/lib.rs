//! Potential and kinetic energy of Lennard-Jones particles in a periodic cubic box.
//!
//! The potential energy is available by direct O(N^2) summation and by linked
//! cells; both give the same total up to floating-point rounding.

pub mod md_implementation;

pub use md_implementation::error::{MdError, Result};
pub use md_implementation::linked_cells::CellHeuristic;
pub use md_implementation::lj_pair::LennardJones;
pub use md_implementation::minimum_image::MinimumImage;
pub use md_implementation::particle::Particle;
pub use md_implementation::system::ParticleSystem;
