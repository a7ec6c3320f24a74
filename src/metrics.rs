//! Block comparison metrics over equal-length channel samples.
//!
//! All functions expect `a1.len() == a2.len()` and at least one sample.
//! Intermediate precision follows the 8-bit reference encoder: integer
//! accumulation for differences, `f32` for everything else.


use crate::params::{Metric, PSNR_PEAK_SQUARED, SSIM_C1, SSIM_C2};

/// Sum of absolute differences
#[must_use]
pub fn sad(a1: &[i32], a2: &[i32]) -> u64 {
    debug_assert_eq!(a1.len(), a2.len());
    a1.iter()
        .zip(a2.iter())
        .fold(0, |acc, (&s, &r)| acc + s.abs_diff(r) as u64)
}

/// Mean absolute deviation.
///
/// This is the mean, not the median, of the absolute differences.
#[must_use]
pub fn mad(a1: &[i32], a2: &[i32]) -> f32 {
    sad(a1, a2) as f32 / a1.len() as f32
}

/// Mean squared error
#[must_use]
pub fn mse(a1: &[i32], a2: &[i32]) -> f32 {
    debug_assert_eq!(a1.len(), a2.len());
    let sum = a1.iter().zip(a2.iter()).fold(0u64, |acc, (&s, &r)| {
        let diff = s.abs_diff(r) as u64;
        acc + diff * diff
    });
    sum as f32 / a1.len() as f32
}

/// Root-mean-square error
#[must_use]
pub fn rmse(a1: &[i32], a2: &[i32]) -> f32 {
    mse(a1, a2).sqrt()
}

/// Peak signal-to-noise ratio for 8-bit samples.
///
/// Identical inputs have an MSE of zero and yield `f32::INFINITY`.
#[must_use]
pub fn psnr(a1: &[i32], a2: &[i32]) -> f32 {
    10.0 * (PSNR_PEAK_SQUARED / mse(a1, a2)).log10()
}

/// Structural similarity.
///
/// The contrast term sums the *squared* variances of the two inputs rather
/// than the variances themselves, so only inputs with zero or unit variance
/// score exactly 1 against themselves. Acceptance thresholds tuned for this
/// encoder depend on that form.
#[must_use]
pub fn ssim(a1: &[i32], a2: &[i32]) -> f32 {
    debug_assert_eq!(a1.len(), a2.len());
    let size = a1.len() as f32;

    let sum_1: i64 = a1.iter().map(|&v| i64::from(v)).sum();
    let sum_2: i64 = a2.iter().map(|&v| i64::from(v)).sum();
    let avg_1 = sum_1 as f32 / size;
    let avg_2 = sum_2 as f32 / size;

    let mut variance_1 = 0.0f32;
    let mut variance_2 = 0.0f32;
    let mut covariance = 0.0f32;
    for (&s, &r) in a1.iter().zip(a2.iter()) {
        let diff_1 = s as f32 - avg_1;
        let diff_2 = r as f32 - avg_2;
        variance_1 += diff_1 * diff_1;
        variance_2 += diff_2 * diff_2;
        covariance += diff_1 * diff_2;
    }
    variance_1 /= size;
    variance_2 /= size;
    covariance /= size;

    ((2.0 * avg_1 * avg_2 + SSIM_C1) * (2.0 * covariance + SSIM_C2))
        / ((avg_1 * avg_1 + avg_2 * avg_2 + SSIM_C1)
            * (variance_1 * variance_1 + variance_2 * variance_2 + SSIM_C2))
}

/// Structural dissimilarity
#[must_use]
pub fn dssim(a1: &[i32], a2: &[i32]) -> f32 {
    (1.0 - ssim(a1, a2)) / 2.0
}

/// Scores one channel pair with the chosen metric.
#[must_use]
pub fn score(metric: Metric, a1: &[i32], a2: &[i32]) -> f32 {
    match metric {
        Metric::Sad => sad(a1, a2) as f32,
        Metric::Mad => mad(a1, a2),
        Metric::Mse => mse(a1, a2),
        Metric::Rmse => rmse(a1, a2),
        Metric::Psnr => psnr(a1, a2),
        Metric::Ssim => ssim(a1, a2),
        Metric::Dssim => dssim(a1, a2),
    }
}
