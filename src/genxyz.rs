use clap::Parser;
use lj_cells::md_implementation::{generator::jittered_grid_positions, xyz::write_xyz};
use log::info;
use std::error::Error;
use std::path::PathBuf;

use mimalloc::MiMalloc;
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const LABEL: &str = "C";

/// Write a jittered cubic grid of particles to an XYZ file
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Side length of the cubic periodic box
    box_size: f64,

    /// Number density; the file holds round(box_size^3 * density) particles
    density: f64,

    /// Output XYZ file
    output: PathBuf,

    /// Seed for the jitter, the same seed reproduces the same file
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let positions = jittered_grid_positions(args.box_size, args.density, args.seed)?;
    write_xyz(&args.output, positions.view(), LABEL)?;
    info!(
        "wrote {} particles to {}",
        positions.ncols(),
        args.output.display()
    );
    Ok(())
}
