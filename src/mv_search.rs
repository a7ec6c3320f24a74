#[cfg(test)]
mod tests;

use std::num::NonZeroUsize;

use anyhow::{Result, bail};
use rayon::prelude::*;
use tracing::debug;

use crate::{
    hexarray::HexPixelBuffer,
    hexint::Lattice,
    mv::MotionVectorList,
    params::{
        DEFAULT_BLOCK_SIZE,
        DEFAULT_FACTOR,
        DEFAULT_RANGE,
        HEX_NEIGHBORHOOD_SIZE,
        Metric,
        SearchMode,
    },
    sampler::Block,
};

/// Block-matching motion search between two hexagonal frames.
///
/// Every source block is compared against every target block whose center
/// lies within `range` of its own, and *every* pair passing the metric
/// threshold is kept. A source block may therefore produce no vectors or
/// many.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionSearch {
    /// Number of samples per block.
    ///
    /// Default `49`, one full second-order aggregate.
    block_size: NonZeroUsize,
    /// Block layout, which also sets the step between visited cells.
    mode: SearchMode,
    metric: Metric,
    /// Largest real-plane distance between the centers of a matched pair.
    range: f32,
    /// Acceptance threshold, an upper bound for distortion metrics and a lower
    /// bound for similarity metrics.
    factor: f32,
}

impl MotionSearch {
    pub fn new(
        block_size: Option<i64>,
        mode: Option<i64>,
        metric: Option<i64>,
        range: Option<f32>,
        factor: Option<f32>,
    ) -> Result<Self> {
        let block_size = block_size.map_or(Ok(DEFAULT_BLOCK_SIZE), usize::try_from)?;
        let mode = mode.map_or(SearchMode::Linear, SearchMode::from);
        let metric = metric.map_or(Metric::Sad, Metric::from);
        let range = range.unwrap_or(DEFAULT_RANGE);
        let factor = factor.unwrap_or(DEFAULT_FACTOR);

        let Some(block_size) = NonZeroUsize::new(block_size) else {
            bail!("MotionSearch: block size must be at least 1.");
        };
        if mode == SearchMode::HexNeighborhood && block_size.get() > HEX_NEIGHBORHOOD_SIZE {
            bail!(
                "MotionSearch: hex-neighborhood blocks hold at most {HEX_NEIGHBORHOOD_SIZE} \
                 samples, got a block size of {block_size}."
            );
        }
        if range.is_nan() || range < 0.0 {
            bail!("MotionSearch: range must be a non-negative distance, got {range}.");
        }
        if factor.is_nan() {
            bail!("MotionSearch: factor must be a number.");
        }

        Ok(Self {
            block_size,
            mode,
            metric,
            range,
            factor,
        })
    }

    #[must_use]
    pub fn block_size(&self) -> NonZeroUsize {
        self.block_size
    }

    #[must_use]
    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    #[must_use]
    pub fn metric(&self) -> Metric {
        self.metric
    }

    #[must_use]
    pub fn range(&self) -> f32 {
        self.range
    }

    #[must_use]
    pub fn factor(&self) -> f32 {
        self.factor
    }

    /// Finds all accepted `(source, target)` pairs from `src` to `dst`.
    ///
    /// `lattice` must be built for an order at least as large as either
    /// buffer's. The result lists vectors by ascending source, then ascending
    /// target, and is identical from run to run.
    pub fn search(
        &self,
        lattice: &Lattice,
        src: &HexPixelBuffer,
        dst: &HexPixelBuffer,
    ) -> Result<MotionVectorList> {
        for (name, buffer) in [("source", src), ("target", dst)] {
            if buffer.order() > lattice.order() {
                bail!(
                    "MotionSearch: {name} frame has order {}, but the lattice only covers order {}.",
                    buffer.order(),
                    lattice.order()
                );
            }
        }

        let stride = self.mode.stride(self.block_size.get());
        debug!(
            order = src.order(),
            block_size = self.block_size.get(),
            mode = ?self.mode,
            metric = ?self.metric,
            range = self.range,
            factor = self.factor,
            "starting motion search"
        );

        let targets: Vec<Block> = (0..dst.size().div_ceil(stride))
            .into_par_iter()
            .map(|j| self.extract(dst, lattice, j * stride))
            .collect();

        let per_source: Vec<MotionVectorList> = (0..src.size().div_ceil(stride))
            .into_par_iter()
            .map(|i| self.match_source(lattice, src, &targets, i * stride))
            .collect();

        let mut vectors = MotionVectorList::new();
        for mut found in per_source {
            vectors.append(&mut found);
        }

        debug!(vectors = vectors.len(), "motion search finished");
        Ok(vectors)
    }

    fn extract(&self, buffer: &HexPixelBuffer, lattice: &Lattice, base: usize) -> Block {
        Block::extract(buffer, lattice, base, self.mode, self.block_size.get())
    }

    /// Scores the block at source cell `p` against the target blocks, which
    /// are laid out one per stride step.
    fn match_source(
        &self,
        lattice: &Lattice,
        src: &HexPixelBuffer,
        targets: &[Block],
        p: usize,
    ) -> MotionVectorList {
        let stride = self.mode.stride(self.block_size.get());
        let source_block = self.extract(src, lattice, p);
        let mut found = MotionVectorList::new();

        for (j, target_block) in targets.iter().enumerate() {
            let q = j * stride;
            if p == q || lattice.distance(p, q) > self.range {
                continue;
            }
            let Some(score) = source_block.score(target_block, self.metric) else {
                continue;
            };
            if self.metric.accepts(score, self.factor) {
                found.push(p as u32, q as u32);
            }
        }
        found
    }
}
