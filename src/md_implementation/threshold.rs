use crate::md_implementation::error::{MdError, Result};
use crate::md_implementation::generator::jittered_grid_positions;
use crate::md_implementation::linked_cells::CellHeuristic;
use crate::md_implementation::system::ParticleSystem;
use crate::md_implementation::xyz::write_xyz;
use log::{debug, info};
use std::hint::black_box;
use std::path::Path;
use std::time::{Duration, Instant};

pub const DEFAULT_BOX_SIZES: [f64; 8] = [6.0, 8.0, 9.0, 10.0, 11.0, 12.0, 15.0, 20.0];
pub const DEFAULT_DENSITIES: [f64; 8] = [0.2, 0.3, 0.4, 0.5, 0.6, 0.8, 1.0, 1.2];

/// Timings of both evaluators on one generated configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct ThresholdResult {
    pub box_size: f64,
    pub density: f64,
    pub nb_particles: usize,
    pub time_direct: Duration,
    pub time_linked: Duration,
}

impl ThresholdResult {
    pub fn linked_cells_faster(&self) -> bool {
        self.time_linked < self.time_direct
    }

    pub fn speedup(&self) -> f64 {
        self.time_direct.as_secs_f64() / self.time_linked.as_secs_f64().max(f64::MIN_POSITIVE)
    }
}

/// File name used for a generated configuration, e.g. `box8-density0.5-positions.xyz`.
pub fn positions_file_name(box_size: f64, density: f64) -> String {
    format!("box{}-density{}-positions.xyz", box_size, density)
}

/// Wall time of the sequential direct sum and of the linked-cell sum with the
/// fallback disabled.
pub fn time_evaluators(system: &ParticleSystem) -> (Duration, Duration) {
    let start = Instant::now();
    black_box(system.total_potential_energy());
    let time_direct = start.elapsed();

    let start = Instant::now();
    black_box(system.total_potential_energy_linked_cells_with(&CellHeuristic::always()));
    let time_linked = start.elapsed();

    (time_direct, time_linked)
}

/// Time both evaluators on a jittered grid for every (box size, density) pair.
///
/// Pairs that would hold fewer particles than the generator accepts are
/// skipped. When `output_dir` is given each configuration is also written
/// there under [`positions_file_name`].
pub fn measure(
    box_sizes: &[f64],
    densities: &[f64],
    seed: u64,
    output_dir: Option<&Path>,
) -> Result<Vec<ThresholdResult>> {
    let mut results = Vec::with_capacity(box_sizes.len() * densities.len());

    for &box_size in box_sizes {
        for &density in densities {
            let positions = match jittered_grid_positions(box_size, density, seed) {
                Ok(positions) => positions,
                Err(MdError::TooFewParticles { requested, .. }) => {
                    info!(
                        "skipping box {} density {}: only {} particles",
                        box_size, density, requested
                    );
                    continue;
                }
                Err(e) => return Err(e),
            };
            if let Some(dir) = output_dir {
                write_xyz(dir.join(positions_file_name(box_size, density)), positions.view(), "C")?;
            }

            let system = ParticleSystem::from_arrays(box_size, positions.view(), None)?;
            let (time_direct, time_linked) = time_evaluators(&system);
            debug!(
                "box {} density {} ({} particles): direct {:?}, linked cells {:?}",
                box_size,
                density,
                system.nb_particles(),
                time_direct,
                time_linked
            );
            results.push(ThresholdResult {
                box_size,
                density,
                nb_particles: system.nb_particles(),
                time_direct,
                time_linked,
            });
        }
    }
    Ok(results)
}

/// Smallest configuration on which linked cells beat direct summation.
pub fn smallest_winning(results: &[ThresholdResult]) -> Option<&ThresholdResult> {
    results
        .iter()
        .filter(|r| r.linked_cells_faster())
        .min_by_key(|r| r.nb_particles)
}
