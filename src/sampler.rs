
use smallvec::SmallVec;
use tracing::trace;

use crate::{
    hexarray::HexPixelBuffer,
    hexint::Lattice,
    metrics,
    params::{HEX_NEIGHBORHOOD_SIZE, Metric, SearchMode},
};

/// Spatial offsets of samples 1..=48 of a hex-neighborhood block, relative to
/// the block center. The first six form the inner ring; the remaining 42 are
/// the six surrounding seven-cell aggregates.
pub const HEX_OFFSETS: [(i32, i32); HEX_NEIGHBORHOOD_SIZE - 1] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (3, 2),
    (4, 2),
    (4, 3),
    (3, 3),
    (2, 2),
    (2, 1),
    (3, 1),
    (1, 3),
    (2, 3),
    (2, 4),
    (1, 4),
    (0, 3),
    (0, 2),
    (1, 2),
    (-2, 1),
    (-1, 1),
    (-1, 2),
    (-2, 2),
    (-3, 1),
    (-3, 0),
    (-2, 0),
    (-3, -2),
    (-2, -2),
    (-2, -1),
    (-3, -1),
    (-4, -2),
    (-4, -3),
    (-3, -3),
    (-1, -3),
    (0, -3),
    (0, -2),
    (-1, -2),
    (-2, -3),
    (-2, -4),
    (-1, -4),
    (2, -1),
    (3, -1),
    (3, 0),
    (2, 0),
    (1, -1),
    (1, -2),
    (2, -2),
];

type Channel = SmallVec<[i32; HEX_NEIGHBORHOOD_SIZE]>;

/// Per-channel samples of one block.
///
/// A block may hold fewer samples than requested when it runs off the edge of
/// the buffer; only the filled samples take part in comparisons.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    channels: [Channel; 3],
}

impl Block {
    /// Samples up to `size` cells around `base`.
    ///
    /// `lattice` must cover the buffer's order. A `base` outside `buffer`
    /// yields an empty block. In [`SearchMode::HexNeighborhood`] at most
    /// [`HEX_NEIGHBORHOOD_SIZE`] samples are taken.
    #[must_use]
    pub fn extract(
        buffer: &HexPixelBuffer,
        lattice: &Lattice,
        base: usize,
        mode: SearchMode,
        size: usize,
    ) -> Self {
        let mut block = Block::default();
        if base >= buffer.size() {
            return block;
        }
        match mode {
            SearchMode::Linear => {
                let end = base.saturating_add(size).min(buffer.size());
                for index in base..end {
                    block.push(buffer, index);
                }
            }
            SearchMode::HexNeighborhood => {
                let size = size.min(HEX_NEIGHBORHOOD_SIZE);
                if size == 0 {
                    return block;
                }
                block.push(buffer, base);

                let (x, y) = lattice.spatial(base);
                for &(dx, dy) in &HEX_OFFSETS[..size - 1] {
                    match lattice.resolve((x + dx, y + dy)) {
                        Some(index) if index < buffer.size() => block.push(buffer, index),
                        _ => {
                            trace!(base, filled = block.len(), "block truncated at lattice edge");
                            break;
                        }
                    }
                }
            }
        }
        block
    }

    fn push(&mut self, buffer: &HexPixelBuffer, index: usize) {
        if let Some(pixel) = buffer.get(index) {
            for (channel, &sample) in self.channels.iter_mut().zip(pixel.iter()) {
                channel.push(sample);
            }
        }
    }

    /// Number of filled samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.channels[0].len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Filled samples of channel `channel`, which must be 0, 1 or 2.
    #[must_use]
    pub fn channel(&self, channel: usize) -> &[i32] {
        &self.channels[channel]
    }

    /// Mean of the per-channel metric scores against `other`, computed over
    /// the samples both blocks have filled. Returns `None` if either block is
    /// empty.
    #[must_use]
    pub fn score(&self, other: &Block, metric: Metric) -> Option<f32> {
        let count = self.len().min(other.len());
        if count == 0 {
            return None;
        }

        let total: f32 = self
            .channels
            .iter()
            .zip(other.channels.iter())
            .map(|(a, b)| metrics::score(metric, &a[..count], &b[..count]))
            .sum();
        Some(total / 3.0)
    }
}
