use std::io;
use thiserror::Error;

/// Errors surfaced while building or loading a particle system
#[derive(Error, Debug)]
pub enum MdError {
    /// Box length must be positive and finite
    #[error("invalid box size {0}: must be a positive, finite length")]
    InvalidBoxSize(f64),

    /// Position and velocity arrays describe different particle counts
    #[error("got {positions} positions but {velocities} velocities")]
    LengthMismatch { positions: usize, velocities: usize },

    /// Coordinate array does not have three rows
    #[error("expected an array of shape (3, n), got {rows} rows")]
    BadShape { rows: usize },

    /// First line of an XYZ file is not a particle count
    #[error("{origin}: first line is not a particle count")]
    MalformedHeader { origin: String },

    /// Number density must be positive and finite
    #[error("invalid density {0}: must be a positive, finite number")]
    InvalidDensity(f64),

    #[error("generator would place {requested} particles, at most {maximum} are supported")]
    TooManyParticles { requested: f64, maximum: usize },

    #[error("generator would place {requested} particles, need at least {minimum}")]
    TooFewParticles { requested: usize, minimum: usize },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, MdError>;
