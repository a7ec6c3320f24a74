
use anyhow::{Result, bail};
use tracing::debug;

use crate::{
    hexarray::{HexPixelBuffer, Pixel},
    mv::{MotionVector, MotionVectorList},
    params::VectorScan,
};

/// Channel values of a cell that is reconstructed from a motion vector rather
/// than stored.
pub const SENTINEL: Pixel = [-1, -1, -1];

/// Which end of a vector selects the cell to mark.
#[derive(Debug, Clone, Copy)]
enum Endpoint {
    Source,
    Target,
}

impl Endpoint {
    fn of(self, mv: &MotionVector) -> u32 {
        match self {
            Endpoint::Source => mv.source,
            Endpoint::Target => mv.target,
        }
    }
}

/// Overwrites the selected endpoint of each vector with [`SENTINEL`].
///
/// Every index is checked before anything is written, so on error `pixels`
/// is untouched. Returns the number of vectors visited.
fn mark_cells(
    pixels: &mut HexPixelBuffer,
    vectors: &MotionVectorList,
    endpoint: Endpoint,
    scan: VectorScan,
) -> Result<usize> {
    let visited = match scan {
        VectorScan::Full => vectors.len(),
        VectorScan::ZeroTerminated => vectors
            .iter()
            .position(|mv| endpoint.of(mv) == 0)
            .unwrap_or(vectors.len()),
    };

    let size = pixels.size();
    let cells = &vectors.as_slice()[..visited];
    if let Some(mv) = cells.iter().find(|mv| endpoint.of(mv) as usize >= size) {
        bail!(
            "vector ({}, {}) refers to a cell outside a frame of {size} cells",
            mv.source,
            mv.target
        );
    }
    for mv in cells {
        pixels.set(endpoint.of(mv) as usize, SENTINEL)?;
    }
    Ok(visited)
}

/// Predicted frame referencing a single other frame.
///
/// Each vector's source cell is replaced by [`SENTINEL`]; its content is
/// recovered through the vector list and the reference frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PFrame {
    pixels: HexPixelBuffer,
    vectors: MotionVectorList,
}

impl PFrame {
    pub fn new(
        reference: &HexPixelBuffer,
        vectors: &MotionVectorList,
        scan: VectorScan,
    ) -> Result<Self> {
        let mut pixels = reference.clone();
        let marked = mark_cells(&mut pixels, vectors, Endpoint::Source, scan)?;
        debug!(vectors = vectors.len(), marked, ?scan, "built P-frame");

        Ok(Self {
            pixels,
            vectors: vectors.clone(),
        })
    }

    #[must_use]
    pub fn pixels(&self) -> &HexPixelBuffer {
        &self.pixels
    }

    #[must_use]
    pub fn vectors(&self) -> &MotionVectorList {
        &self.vectors
    }

    #[must_use]
    pub fn is_predicted(&self, index: usize) -> bool {
        self.pixels.get(index) == Some(&SENTINEL)
    }

    #[must_use]
    pub fn predicted_count(&self) -> usize {
        self.pixels.iter().filter(|&&pixel| pixel == SENTINEL).count()
    }
}

/// Bi-directionally predicted frame.
///
/// Source cells of the backward vectors and target cells of the forward
/// vectors are replaced by [`SENTINEL`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BFrame {
    pixels: HexPixelBuffer,
    backward: MotionVectorList,
    forward: MotionVectorList,
}

impl BFrame {
    pub fn new(
        reference: &HexPixelBuffer,
        backward: &MotionVectorList,
        forward: &MotionVectorList,
        scan: VectorScan,
    ) -> Result<Self> {
        let mut pixels = reference.clone();
        let marked_backward = mark_cells(&mut pixels, backward, Endpoint::Source, scan)?;
        let marked_forward = mark_cells(&mut pixels, forward, Endpoint::Target, scan)?;
        debug!(
            backward = backward.len(),
            forward = forward.len(),
            marked_backward,
            marked_forward,
            ?scan,
            "built B-frame"
        );

        Ok(Self {
            pixels,
            backward: backward.clone(),
            forward: forward.clone(),
        })
    }

    #[must_use]
    pub fn pixels(&self) -> &HexPixelBuffer {
        &self.pixels
    }

    #[must_use]
    pub fn backward(&self) -> &MotionVectorList {
        &self.backward
    }

    #[must_use]
    pub fn forward(&self) -> &MotionVectorList {
        &self.forward
    }

    #[must_use]
    pub fn is_predicted(&self, index: usize) -> bool {
        self.pixels.get(index) == Some(&SENTINEL)
    }

    #[must_use]
    pub fn predicted_count(&self) -> usize {
        self.pixels.iter().filter(|&&pixel| pixel == SENTINEL).count()
    }
}
