use crate::md_implementation::error::{MdError, Result};
use log::warn;
use ndarray::{Array2, ArrayView2};
use std::fs;
use std::io::{self, prelude::*, BufWriter};
use std::path::Path;

/// Read the coordinate columns of an XYZ file into a `(3, n)` array.
///
/// The first line holds the particle count, the second line is ignored, and
/// each following line is `<label> <x> <y> <z>`. Lines that do not parse are
/// skipped; a file with fewer rows than announced yields the rows it has.
/// Velocity files use the same layout.
pub fn read_xyz<P: AsRef<Path>>(file_path: P) -> Result<Array2<f64>> {
    let path = file_path.as_ref();
    let file = fs::File::open(path)?;
    read_xyz_from(io::BufReader::new(file), &path.display().to_string())
}

/// [`read_xyz`] on any buffered reader; `origin` names the input in messages.
pub fn read_xyz_from<R: BufRead>(mut reader: R, origin: &str) -> Result<Array2<f64>> {
    // First line has number of atoms
    let mut line = String::new();
    reader.read_line(&mut line)?;
    let nb_atoms: usize = line
        .split_whitespace()
        .next()
        .and_then(|count| count.parse().ok())
        .ok_or_else(|| MdError::MalformedHeader {
            origin: origin.to_string(),
        })?;

    // Comment line, extended XYZ cell information is ignored
    line.clear();
    reader.read_line(&mut line)?;

    let mut rows: Vec<[f64; 3]> = Vec::with_capacity(nb_atoms.min(1 << 20));
    while rows.len() < nb_atoms {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        if let Some(xyz) = parse_row(&line) {
            rows.push(xyz);
        }
    }

    if rows.len() != nb_atoms {
        warn!("{}: expected {} atoms, but read {}", origin, nb_atoms, rows.len());
    }

    Ok(Array2::from_shape_fn((3, rows.len()), |(dim, i)| rows[i][dim]))
}

fn parse_row(line: &str) -> Option<[f64; 3]> {
    let mut fields = line.split_whitespace();
    let _label = fields.next()?;
    let x = fields.next()?.parse().ok()?;
    let y = fields.next()?.parse().ok()?;
    let z = fields.next()?.parse().ok()?;
    Some([x, y, z])
}

/// Write a `(3, n)` array as an XYZ file with every particle labelled `label`.
pub fn write_xyz<P: AsRef<Path>>(file_path: P, positions: ArrayView2<f64>, label: &str) -> Result<()> {
    let file = fs::File::create(file_path)?;
    let mut file = BufWriter::new(file);
    write_xyz_to(&mut file, positions, label)?;
    file.flush()?;
    Ok(())
}

pub fn write_xyz_to<W: Write>(out: &mut W, positions: ArrayView2<f64>, label: &str) -> Result<()> {
    if positions.nrows() != 3 {
        return Err(MdError::BadShape {
            rows: positions.nrows(),
        });
    }
    writeln!(out, "{}", positions.ncols())?;
    writeln!(out)?;
    for column in positions.columns() {
        writeln!(out, "{} {} {} {}", label, column[0], column[1], column[2])?;
    }
    Ok(())
}
