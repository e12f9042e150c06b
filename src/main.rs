use clap::Parser;
use lj_cells::md_implementation::{lj_pair::CUTOFF_FACTOR, system::ParticleSystem, xyz};
use log::info;
use std::error::Error;
use std::path::PathBuf;
use std::time::Instant;

use mimalloc::MiMalloc;
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Boxes narrower than two cutoffs make the minimum image ambiguous.
const MIN_BOX_SIZE: f64 = 2.0 * CUTOFF_FACTOR;

/// Kinetic and Lennard-Jones potential energy of a periodic configuration
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Side length of the cubic periodic box
    box_size: f64,

    /// XYZ file with particle positions
    positions: PathBuf,

    /// XYZ file with particle velocities, zero when omitted
    velocities: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    if args.box_size < MIN_BOX_SIZE {
        return Err(format!("box_size must be at least {}", MIN_BOX_SIZE).into());
    }

    let positions = xyz::read_xyz(&args.positions)?;
    println!("Positions read: {}", positions.ncols());

    let velocities = match &args.velocities {
        Some(path) => {
            let velocities = xyz::read_xyz(path)?;
            println!("Velocities read: {}", velocities.ncols());
            Some(velocities)
        }
        None => {
            println!("No velocity file provided. Setting all velocities to (0,0,0).");
            None
        }
    };

    let system = ParticleSystem::from_arrays(
        args.box_size,
        positions.view(),
        velocities.as_ref().map(|v| v.view()),
    )?;
    info!("system of {} particles in box {}", system.nb_particles(), system.box_size());

    let ekin = system.total_kinetic_energy();
    println!("Computed kinetic energy: {}", ekin);

    let start = Instant::now();
    let epot_direct = system.total_potential_energy();
    let elapsed_direct = start.elapsed();

    let start = Instant::now();
    let epot_cells = system.total_potential_energy_linked_cells();
    let elapsed_cells = start.elapsed();

    println!(
        "E_pot = {}. (Using linked-cell data structure, taking {:.3} ms.)",
        epot_cells,
        elapsed_cells.as_secs_f64() * 1e3
    );
    println!(
        "E_pot = {}. (Computed without using linked cells, taking {:.3} ms.)",
        epot_direct,
        elapsed_direct.as_secs_f64() * 1e3
    );
    println!("#");
    if elapsed_cells.as_secs_f64() > 0.0 {
        println!(
            "Speedup factor from linked cells: {}",
            elapsed_direct.as_secs_f64() / elapsed_cells.as_secs_f64()
        );
    }

    println!("E_kin = {}", ekin);
    println!("E_pot = {}", epot_direct);
    println!("E_kin + E_pot = {}", ekin + epot_direct);
    Ok(())
}
