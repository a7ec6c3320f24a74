
/// Number of cells in a second-order hexagonal aggregate, which is also the
/// largest block the hex-neighborhood sampler can produce.
pub const HEX_NEIGHBORHOOD_SIZE: usize = 49;

pub const DEFAULT_BLOCK_SIZE: usize = HEX_NEIGHBORHOOD_SIZE;
pub const DEFAULT_RANGE: f32 = 16.0;
pub const DEFAULT_FACTOR: f32 = 1.0;

/// 255^2, the squared peak of an 8-bit channel
pub const PSNR_PEAK_SQUARED: f32 = 65025.0;

/// Luminance and contrast stabilizers for 8-bit SSIM, (0.01*255)^2 and (0.03*255)^2.
pub const SSIM_C1: f32 = 6.5025;
pub const SSIM_C2: f32 = 58.5225;

/// Block similarity measure used to score a candidate vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    /// Sum of absolute differences
    Sad = 0,
    /// Mean absolute deviation (SAD divided by the sample count)
    Mad = 1,
    /// Mean squared error
    Mse = 2,
    /// Root-mean-square error
    Rmse = 3,
    /// Peak signal-to-noise ratio, assuming 8-bit samples
    Psnr = 4,
    /// Structural similarity
    Ssim = 5,
    /// Structural dissimilarity
    Dssim = 6,
}

impl From<i64> for Metric {
    fn from(val: i64) -> Self {
        match val {
            0 => Self::Sad,
            1 => Self::Mad,
            2 => Self::Mse,
            3 => Self::Rmse,
            4 => Self::Psnr,
            5 => Self::Ssim,
            // Any other selector falls through to DSSIM.
            _ => Self::Dssim,
        }
    }
}

/// Whether a larger score means "more different" or "more alike".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricPolarity {
    /// Accept when `score <= factor`.
    Distortion,
    /// Accept when `score >= factor`.
    Similarity,
}

impl Metric {
    #[must_use]
    pub fn polarity(self) -> MetricPolarity {
        match self {
            Metric::Psnr | Metric::Ssim => MetricPolarity::Similarity,
            Metric::Sad | Metric::Mad | Metric::Mse | Metric::Rmse | Metric::Dssim => {
                MetricPolarity::Distortion
            }
        }
    }

    /// Applies the acceptance threshold for this metric's polarity.
    ///
    /// Non-finite scores are compared as-is: an infinite PSNR passes any finite
    /// similarity threshold and fails any finite distortion threshold, while NaN
    /// is rejected under both.
    #[must_use]
    pub fn accepts(self, score: f32, factor: f32) -> bool {
        match self.polarity() {
            MetricPolarity::Distortion => score <= factor,
            MetricPolarity::Similarity => score >= factor,
        }
    }
}

/// How blocks are laid out around each candidate cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// `block_size` consecutive indices starting at the cell. The frame is
    /// walked in steps of `block_size`, giving disjoint blocks.
    Linear = 0,
    /// The cell and up to 48 surrounding cells in two hexagonal rings.
    /// Every cell is visited as a block center.
    HexNeighborhood = 1,
}

impl From<i64> for SearchMode {
    fn from(val: i64) -> Self {
        match val {
            0 => Self::Linear,
            _ => Self::HexNeighborhood,
        }
    }
}

impl SearchMode {
    /// Distance between consecutive cells visited by the search.
    #[must_use]
    pub fn stride(self, block_size: usize) -> usize {
        match self {
            SearchMode::Linear => block_size,
            SearchMode::HexNeighborhood => 1,
        }
    }
}

/// How frame reconstruction walks a vector list when marking cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VectorScan {
    /// Every pair in the list is visited.
    #[default]
    Full,
    /// The scan stops at the first pair whose inspected index is 0, matching
    /// output produced by tools that treat index 0 as an end marker.
    ZeroTerminated,
}
