pub mod cells;
pub mod error;
pub mod generator;
pub mod linked_cells;
pub mod lj_direct_summation;
pub mod lj_pair;
pub mod minimum_image;
pub mod particle;
pub mod system;
pub mod thermo;
pub mod threshold;
pub mod xyz;
