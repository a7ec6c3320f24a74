#![allow(clippy::unwrap_used, reason = "allow in test files")]

use quickcheck_macros::quickcheck;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro128StarStar;

use super::*;
use crate::mv::MotionVector;

fn random_buffer(order: u8, rng: &mut Xoshiro128StarStar) -> HexPixelBuffer {
    let size = crate::hexint::lattice_size(order);
    let pixels = (0..size)
        .map(|_| {
            [
                i32::from(rng.random::<u8>()),
                i32::from(rng.random::<u8>()),
                i32::from(rng.random::<u8>()),
            ]
        })
        .collect();
    HexPixelBuffer::from_pixels(order, pixels).unwrap()
}

/// The two frames of the reference scenario: a 64-valued block at cells 0..7
/// in the first frame, and 64 everywhere except cells 0..7 in the second.
fn reference_frames() -> (HexPixelBuffer, HexPixelBuffer) {
    let mut first = HexPixelBuffer::new(2, 0).unwrap();
    let mut second = HexPixelBuffer::new(2, 0).unwrap();
    for i in 0..49 {
        if i < 7 {
            first.set(i, [64; 3]).unwrap();
        } else {
            second.set(i, [64; 3]).unwrap();
        }
    }
    (first, second)
}

fn contains(list: &MotionVectorList, source: u32, target: u32) -> bool {
    list.iter().any(|mv| *mv == MotionVector::new(source, target))
}

#[test]
fn new_with_defaults() {
    let search = MotionSearch::new(None, None, None, None, None).unwrap();
    assert_eq!(search.block_size().get(), 49);
    assert_eq!(search.mode(), SearchMode::Linear);
    assert_eq!(search.metric(), Metric::Sad);
    assert_eq!(search.range(), 16.0);
    assert_eq!(search.factor(), 1.0);
}

#[test]
fn new_with_specified_args() {
    let search = MotionSearch::new(Some(7), Some(1), Some(5), Some(3.5), Some(0.9)).unwrap();
    assert_eq!(search.block_size().get(), 7);
    assert_eq!(search.mode(), SearchMode::HexNeighborhood);
    assert_eq!(search.metric(), Metric::Ssim);
    assert_eq!(search.range(), 3.5);
    assert_eq!(search.factor(), 0.9);

    let search = MotionSearch::new(None, None, Some(42), None, None).unwrap();
    assert_eq!(search.metric(), Metric::Dssim);
}

#[test]
fn new_rejects_invalid_args() {
    assert!(MotionSearch::new(Some(0), None, None, None, None).is_err());
    assert!(MotionSearch::new(Some(-7), None, None, None, None).is_err());
    assert!(MotionSearch::new(Some(50), Some(1), None, None, None).is_err());
    assert!(MotionSearch::new(Some(50), Some(0), None, None, None).is_ok());
    assert!(MotionSearch::new(None, None, None, Some(-1.0), None).is_err());
    assert!(MotionSearch::new(None, None, None, Some(f32::NAN), None).is_err());
    assert!(MotionSearch::new(None, None, None, Some(f32::INFINITY), None).is_ok());
    assert!(MotionSearch::new(None, None, None, None, Some(f32::NAN)).is_err());
}

#[test]
fn reference_scenario_finds_vector() {
    let (first, second) = reference_frames();
    let lattice = Lattice::new(3).unwrap();
    let search = MotionSearch::new(Some(7), Some(0), Some(0), Some(16.0), Some(1.0)).unwrap();

    let vectors = search.search(&lattice, &first, &second).unwrap();

    assert_eq!(vectors.as_slice()[0], MotionVector::new(0, 7));
    assert!(vectors.flat_len() % 2 == 0);
}

#[test]
fn lattice_must_cover_buffers() {
    let (first, second) = reference_frames();
    let lattice = Lattice::new(1).unwrap();
    let search = MotionSearch::new(Some(7), None, None, None, None).unwrap();
    assert!(search.search(&lattice, &first, &second).is_err());
}

#[test]
fn linear_mode_visits_block_starts() {
    let buffer = HexPixelBuffer::new(2, 10).unwrap();
    let lattice = Lattice::new(2).unwrap();
    let search = MotionSearch::new(Some(7), Some(0), Some(0), Some(f32::INFINITY), Some(0.0))
        .unwrap();

    let vectors = search.search(&lattice, &buffer, &buffer).unwrap();

    // 7 blocks, each matching the 6 others
    assert_eq!(vectors.len(), 42);
    assert!(vectors.iter().all(|mv| mv.source % 7 == 0 && mv.target % 7 == 0));
}

#[test]
fn one_source_may_match_many_targets() {
    let buffer = HexPixelBuffer::new(2, 10).unwrap();
    let lattice = Lattice::new(2).unwrap();
    let search = MotionSearch::new(Some(7), Some(1), Some(0), Some(1.01), Some(0.0)).unwrap();

    let vectors = search.search(&lattice, &buffer, &buffer).unwrap();

    let from_origin: Vec<u32> = vectors
        .iter()
        .filter(|mv| mv.source == 0)
        .map(|mv| mv.target)
        .collect();
    assert_eq!(from_origin, vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn zero_range_finds_nothing() {
    let buffer = HexPixelBuffer::new(2, 10).unwrap();
    let lattice = Lattice::new(2).unwrap();
    let search = MotionSearch::new(Some(7), Some(1), Some(0), Some(0.0), Some(1000.0)).unwrap();
    assert!(search.search(&lattice, &buffer, &buffer).unwrap().is_empty());
}

#[test]
fn distortion_boundary_is_inclusive() {
    let first = HexPixelBuffer::new(2, 0).unwrap();
    let mut second = HexPixelBuffer::new(2, 0).unwrap();
    // Block 7 differs from block 0 by exactly 1 per channel: mean SAD = 1
    second.set(9, [1, 1, 1]).unwrap();
    let lattice = Lattice::new(2).unwrap();

    let at = MotionSearch::new(Some(7), Some(0), Some(0), Some(16.0), Some(1.0)).unwrap();
    let below = MotionSearch::new(Some(7), Some(0), Some(0), Some(16.0), Some(0.999)).unwrap();

    assert!(contains(&at.search(&lattice, &first, &second).unwrap(), 0, 7));
    assert!(!contains(&below.search(&lattice, &first, &second).unwrap(), 0, 7));
}

#[test]
fn similarity_boundary_is_inclusive() {
    // Constant blocks have an SSIM of exactly 1 and a DSSIM of exactly 0
    let buffer = HexPixelBuffer::new(2, 64).unwrap();
    let lattice = Lattice::new(2).unwrap();
    let run = |metric: i64, factor: f32| {
        MotionSearch::new(Some(7), Some(0), Some(metric), Some(16.0), Some(factor))
            .unwrap()
            .search(&lattice, &buffer, &buffer)
            .unwrap()
    };

    assert!(contains(&run(5, 1.0), 0, 7));
    assert!(run(5, 1.001).is_empty());
    assert!(contains(&run(6, 0.0), 0, 7));
    assert!(run(6, -0.001).is_empty());
}

#[test]
fn infinite_psnr_is_accepted() {
    let buffer = HexPixelBuffer::new(2, 64).unwrap();
    let lattice = Lattice::new(2).unwrap();
    let search = MotionSearch::new(Some(7), Some(0), Some(4), Some(16.0), Some(1.0e6)).unwrap();
    assert!(contains(&search.search(&lattice, &buffer, &buffer).unwrap(), 0, 7));
}

#[test]
fn search_is_deterministic() {
    let mut rng = Xoshiro128StarStar::from_seed(*b"deadbeeflolcakes");
    let first = random_buffer(3, &mut rng);
    let second = random_buffer(3, &mut rng);
    let lattice = Lattice::new(3).unwrap();
    let search = MotionSearch::new(Some(7), Some(1), Some(1), Some(4.0), Some(70.0)).unwrap();

    let a = search.search(&lattice, &first, &second).unwrap();
    let b = search.search(&lattice, &first, &second).unwrap();
    assert_eq!(a, b);

    let keys: Vec<(u32, u32)> = a.iter().map(|mv| (mv.source, mv.target)).collect();
    let mut sorted = keys.clone();
    sorted.sort_unstable();
    assert_eq!(keys, sorted);
}

#[test]
fn search_matches_pairwise_scoring() {
    let mut rng = Xoshiro128StarStar::from_seed(*b"deadbeeflolcakes");
    let src = random_buffer(2, &mut rng);
    let dst = random_buffer(2, &mut rng);
    let lattice = Lattice::new(3).unwrap();

    for (mode, block_size) in [(0, 7), (1, 19)] {
        let search = MotionSearch::new(Some(block_size), Some(mode), Some(1), Some(3.0), Some(80.0)).unwrap();
        let stride = search.mode().stride(search.block_size().get());

        let mut expected = MotionVectorList::new();
        for p in (0..src.size()).step_by(stride) {
            let a = Block::extract(&src, &lattice, p, search.mode(), block_size as usize);
            for q in (0..dst.size()).step_by(stride) {
                if p == q || lattice.distance(p, q) > search.range() {
                    continue;
                }
                let b = Block::extract(&dst, &lattice, q, search.mode(), block_size as usize);
                if a.score(&b, Metric::Mad).is_some_and(|score| score <= 80.0) {
                    expected.push(p as u32, q as u32);
                }
            }
        }

        assert!(!expected.is_empty(), "mode {}", mode);
        assert_eq!(search.search(&lattice, &src, &dst).unwrap(), expected, "mode {}", mode);
    }
}

#[quickcheck]
fn accepted_pairs_are_distinct_and_in_range(seed: u64, hex: bool, metric: u8, range: u8) -> bool {
    let metric = metric % 7;
    let mut rng = Xoshiro128StarStar::seed_from_u64(seed);
    let first = random_buffer(2, &mut rng);
    let second = random_buffer(2, &mut rng);
    let lattice = Lattice::new(3).unwrap();
    let range = f32::from(range % 8);
    let factor = match Metric::from(i64::from(metric)) {
        Metric::Sad => 4000.0,
        Metric::Mad | Metric::Rmse => 90.0,
        Metric::Mse => 8000.0,
        Metric::Psnr => 8.0,
        Metric::Ssim => 0.0,
        Metric::Dssim => 0.5,
    };
    let search = MotionSearch::new(
        Some(7),
        Some(i64::from(hex)),
        Some(i64::from(metric)),
        Some(range),
        Some(factor),
    )
    .unwrap();

    let vectors = search.search(&lattice, &first, &second).unwrap();

    vectors.flat_len() % 2 == 0
        && vectors.iter().all(|mv| {
            mv.source != mv.target
                && lattice.distance(mv.source as usize, mv.target as usize) <= range
                && (mv.target as usize) < second.size()
        })
}
