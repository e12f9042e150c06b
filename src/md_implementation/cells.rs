use crate::md_implementation::system::ParticleSystem;
use itertools::iproduct;
use ndarray::Array3;

/// Upper bound on cells per axis; larger boxes get larger cells.
pub const MAX_CELLS_PER_AXIS: usize = 20;

/// Lower bound on cells per axis.
pub const MIN_CELLS_PER_AXIS: usize = 2;

/// Uniform periodic grid of cells, each holding the indices of the particles
/// whose wrapped position falls inside it. Rebuilt from scratch for every
/// evaluation.
pub struct CellGrid {
    cells_per_axis: usize,
    cell_size: f64,
    cells: Array3<Vec<usize>>,
}

impl CellGrid {
    /// Bin all particles of `system` into cells at least `cutoff` wide.
    ///
    /// `cells_per_axis = max(2, min(max_cells_per_axis, floor(box / cutoff)))`.
    pub fn build(system: &ParticleSystem, cutoff: f64, max_cells_per_axis: usize) -> Self {
        let cells_per_axis = Self::cells_per_axis_for(system.box_size(), cutoff, max_cells_per_axis);
        let cell_size = system.box_size() / cells_per_axis as f64;
        let mut cells = Array3::from_elem((cells_per_axis, cells_per_axis, cells_per_axis), Vec::new());

        for (i, particle) in system.particles().iter().enumerate() {
            let r = particle.position();
            let coord = [
                Self::wrapped_index(r[0], cell_size, cells_per_axis),
                Self::wrapped_index(r[1], cell_size, cells_per_axis),
                Self::wrapped_index(r[2], cell_size, cells_per_axis),
            ];
            cells[coord].push(i);
        }

        Self {
            cells_per_axis,
            cell_size,
            cells,
        }
    }

    pub fn cells_per_axis_for(box_size: f64, cutoff: f64, max_cells_per_axis: usize) -> usize {
        let fitting = (box_size / cutoff).floor();
        let fitting = if fitting.is_finite() && fitting > 0.0 {
            fitting as usize
        } else {
            0
        };
        fitting
            .min(max_cells_per_axis)
            .max(MIN_CELLS_PER_AXIS)
    }

    pub fn cells_per_axis(&self) -> usize {
        self.cells_per_axis
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    pub fn nb_cells(&self) -> usize {
        self.cells.len()
    }

    pub fn cell(&self, coord: [usize; 3]) -> &[usize] {
        &self.cells[coord]
    }

    /// Cell coordinates in x-fastest order, matching [`CellGrid::coordinate_to_index`].
    pub fn coordinates(&self) -> impl Iterator<Item = [usize; 3]> {
        let n = self.cells_per_axis;
        iproduct!(0..n, 0..n, 0..n).map(|(z, y, x)| [x, y, z])
    }

    /// Periodic neighbor of `coord` displaced by `shift` cells.
    #[inline]
    pub fn shifted(&self, coord: [usize; 3], shift: [i32; 3]) -> [usize; 3] {
        let n = self.cells_per_axis as i64;
        let wrap = |c: usize, s: i32| (c as i64 + s as i64).rem_euclid(n) as usize;
        [
            wrap(coord[0], shift[0]),
            wrap(coord[1], shift[1]),
            wrap(coord[2], shift[2]),
        ]
    }

    #[inline]
    pub fn coordinate_to_index(&self, coord: [usize; 3]) -> usize {
        coord[0] + self.cells_per_axis * (coord[1] + self.cells_per_axis * coord[2])
    }

    /// Distinct cells adjacent to `coord` (excluding itself) with a larger linear
    /// index. Used when the grid is too coarse for the half stencil, where a
    /// shift and its opposite can land on the same cell.
    pub fn upper_neighbors(&self, coord: [usize; 3]) -> Vec<[usize; 3]> {
        let own = self.coordinate_to_index(coord);
        let mut neighbors: Vec<[usize; 3]> = full_stencil()
            .map(|shift| self.shifted(coord, shift))
            .filter(|c| self.coordinate_to_index(*c) > own)
            .collect();
        neighbors.sort_by_key(|c| self.coordinate_to_index(*c));
        neighbors.dedup();
        neighbors
    }

    #[inline]
    fn wrapped_index(x: f64, cell_size: f64, cells_per_axis: usize) -> usize {
        ((x / cell_size).floor() as i64).rem_euclid(cells_per_axis as i64) as usize
    }
}

/// All 26 shifts of the 3x3x3 neighborhood, without the origin.
pub fn full_stencil() -> impl Iterator<Item = [i32; 3]> {
    iproduct!(-1..=1, -1..=1, -1..=1)
        .map(|(x, y, z)| [x, y, z])
        .filter(|s| *s != [0, 0, 0])
}

/// The 13 shifts lexicographically greater than the origin. Together with their
/// negations they cover the full stencil, so each unordered pair of adjacent
/// cells is reached from exactly one side.
pub fn half_stencil() -> impl Iterator<Item = [i32; 3]> {
    full_stencil().filter(|s| *s > [0, 0, 0])
}
