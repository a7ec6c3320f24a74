//! Hexagonal lattice addressing.
//!
//! Cells are named by a base-7 "Hexint": each digit selects one cell of a
//! seven-cell hexagonal aggregate, and each further digit position selects an
//! aggregate of the next size up. A lattice of order `n` holds `7^n` cells.
//!
//! Spatial coordinates are integer pairs on two axes 120 degrees apart, so the
//! six neighbours of the origin are `(1,0) (1,1) (0,1) (-1,0) (-1,-1) (0,-1)`.


use anyhow::{Result, bail};
use tracing::debug;

/// Largest lattice order that can be allocated.
pub const MAX_ORDER: u8 = 8;

const SQRT_3_2: f32 = 0.866_025_4;

/// Unit step for each Hexint digit.
const DIGIT_STEPS: [(i32, i32); 7] = [(0, 0), (1, 0), (1, 1), (0, 1), (-1, 0), (-1, -1), (0, -1)];

/// Number of cells in a lattice of the given order.
#[must_use]
pub fn lattice_size(order: u8) -> usize {
    7usize.pow(u32::from(order))
}

/// Scales a spatial coordinate from one aggregate level to the next.
fn next_level((a, b): (i32, i32)) -> (i32, i32) {
    (3 * a - 2 * b, 2 * a + b)
}

/// A single hexagonal cell address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Hexint(pub u32);

impl Hexint {
    /// Base-7 digits, least significant first.
    #[must_use]
    pub fn digits(self) -> Vec<u8> {
        let mut value = self.0;
        let mut digits = Vec::new();
        while value > 0 {
            digits.push((value % 7) as u8);
            value /= 7;
        }
        digits
    }

    /// Integer lattice coordinate of the cell.
    ///
    /// Each digit is a step towards one of the six neighbours (or none for
    /// `0`). Moving up one digit scales the lower digits by the aggregate
    /// generator `(a, b) -> (3a - 2b, 2a + b)`.
    #[must_use]
    pub fn spatial(self) -> (i32, i32) {
        self.digits().iter().rev().fold((0, 0), |acc, &digit| {
            let (a, b) = next_level(acc);
            let (da, db) = DIGIT_STEPS[digit as usize];
            (a + da, b + db)
        })
    }

    /// Position of the cell center in the real plane, one unit between neighbours.
    #[must_use]
    pub fn real(self) -> (f32, f32) {
        spatial_to_real(self.spatial())
    }
}

/// Converts a lattice coordinate to the real plane, where the first axis runs
/// along `x` and the second points 120 degrees from it.
#[must_use]
pub fn spatial_to_real((a, b): (i32, i32)) -> (f32, f32) {
    (a as f32 - b as f32 / 2.0, b as f32 * SQRT_3_2)
}

/// Precomputed coordinate tables for every cell of a lattice.
///
/// Built once and shared read-only by every search and sampler using buffers
/// of this order or smaller.
#[derive(Debug, Clone)]
pub struct Lattice {
    order: u8,
    spatials: Vec<(i32, i32)>,
    reals: Vec<(f32, f32)>,
    /// Dense spatial-to-index table over the bounding box of the lattice.
    /// Holes hold `u32::MAX`.
    table: Vec<u32>,
    min: (i32, i32),
    table_width: usize,
    table_height: usize,
}

impl Lattice {
    pub fn new(order: u8) -> Result<Self> {
        if order > MAX_ORDER {
            bail!("Lattice: order must be at most {MAX_ORDER}, got {order}.");
        }

        let size = lattice_size(order);
        let spatials: Vec<(i32, i32)> = (0..size as u32).map(|i| Hexint(i).spatial()).collect();
        let reals = spatials.iter().copied().map(spatial_to_real).collect();

        let (mut min_x, mut min_y, mut max_x, mut max_y) = (0, 0, 0, 0);
        for &(x, y) in &spatials {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
        let table_width = (max_x - min_x + 1) as usize;
        let table_height = (max_y - min_y + 1) as usize;
        let mut table = vec![u32::MAX; table_width * table_height];
        for (i, &(x, y)) in spatials.iter().enumerate() {
            let col = (x - min_x) as usize;
            let row = (y - min_y) as usize;
            table[row * table_width + col] = i as u32;
        }

        debug!(
            order,
            cells = size,
            table_width, table_height, "built hexagonal lattice tables"
        );

        Ok(Self {
            order,
            spatials,
            reals,
            table,
            min: (min_x, min_y),
            table_width,
            table_height,
        })
    }

    #[must_use]
    pub fn order(&self) -> u8 {
        self.order
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.spatials.len()
    }

    /// Spatial coordinate of a cell. `index` must be below [`Lattice::size`].
    #[must_use]
    pub fn spatial(&self, index: usize) -> (i32, i32) {
        self.spatials[index]
    }

    /// Real-plane coordinate of a cell. `index` must be below [`Lattice::size`].
    #[must_use]
    pub fn real(&self, index: usize) -> (f32, f32) {
        self.reals[index]
    }

    /// Euclidean distance between two cell centers.
    #[must_use]
    pub fn distance(&self, a: usize, b: usize) -> f32 {
        let (ax, ay) = self.reals[a];
        let (bx, by) = self.reals[b];
        ((bx - ax) * (bx - ax) + (by - ay) * (by - ay)).sqrt()
    }

    /// Finds the cell at a spatial coordinate, or `None` when the coordinate
    /// lies outside this lattice.
    #[must_use]
    pub fn resolve(&self, (x, y): (i32, i32)) -> Option<usize> {
        let col = usize::try_from(i64::from(x) - i64::from(self.min.0)).ok()?;
        let row = usize::try_from(i64::from(y) - i64::from(self.min.1)).ok()?;
        if col >= self.table_width || row >= self.table_height {
            return None;
        }
        match self.table[row * self.table_width + col] {
            u32::MAX => None,
            index => Some(index as usize),
        }
    }
}
