use clap::Parser;
use lj_cells::md_implementation::threshold::{
    measure, smallest_winning, DEFAULT_BOX_SIZES, DEFAULT_DENSITIES,
};
use std::error::Error;
use std::fs;
use std::path::PathBuf;

use mimalloc::MiMalloc;
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Find the smallest configuration for which linked cells beat direct summation
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Box sizes to try
    #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_BOX_SIZES)]
    box_sizes: Vec<f64>,

    /// Densities to try
    #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_DENSITIES)]
    densities: Vec<f64>,

    /// Seed for the generated configurations
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Also write every generated configuration into this directory
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    if let Some(dir) = &args.output_dir {
        fs::create_dir_all(dir)?;
    }
    let results = measure(
        &args.box_sizes,
        &args.densities,
        args.seed,
        args.output_dir.as_deref(),
    )?;

    println!(
        "{:>10}{:>10}{:>12}{:>16}{:>16}{:>10}",
        "box", "density", "particles", "direct [ms]", "cells [ms]", "speedup"
    );
    for r in &results {
        println!(
            "{:>10}{:>10}{:>12}{:>16.3}{:>16.3}{:>10.2}",
            r.box_size,
            r.density,
            r.nb_particles,
            r.time_direct.as_secs_f64() * 1e3,
            r.time_linked.as_secs_f64() * 1e3,
            r.speedup()
        );
    }

    match smallest_winning(&results) {
        Some(best) => println!(
            "Use linked cells for box_size = {} and density = {} (num molecules = {}).",
            best.box_size, best.density, best.nb_particles
        ),
        None => println!("Linked cells never outperformed direct iteration."),
    }
    Ok(())
}
