//! The row-strip matchers must agree with an argmax over the generic
//! cross-correlation of the same window.
//!
//! Data is strictly positive random floats, so correlation surfaces have no
//! ties and no non-positive maxima where the two argmax conventions differ.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use stereodepth::{
    argmax, argmax_corr, argmax_corr_mat, argmax_corr_vector, cross_correlation,
    cross_correlation_offset, Shape2d, SlideParams,
};

fn random_matrix(rng: &mut StdRng, len: usize) -> Vec<f64> {
    (0..len).map(|_| rng.random_range(0.05..1.0)).collect()
}

/// Best shift of the `k x k` window of `src2` at (`band`, `col`) over the
/// `k`-row band of `src1`, via the generic engine.
fn generic_best_shift(
    src1: &[f64],
    src2: &[f64],
    height: usize,
    width: usize,
    k: usize,
    band: usize,
    col: usize,
) -> usize {
    let mut scores = vec![0.0; width - k + 1];
    let shape = cross_correlation_offset(
        &mut scores,
        &src1[band * width..(band + k) * width],
        Shape2d::new(k, width),
        src2,
        Shape2d::new(height, width),
        Shape2d::square(k),
        Shape2d::new(band, col),
        SlideParams::new(),
    )
    .unwrap();
    assert_eq!(shape, Shape2d::new(1, width - k + 1));
    argmax(&scores).unwrap()
}

#[test]
fn argmax_corr_agrees_with_cross_correlation() {
    let mut rng = StdRng::seed_from_u64(7);
    for (k, width) in [(3, 12), (5, 17), (7, 7)] {
        let src = random_matrix(&mut rng, k * width);
        let kernel = random_matrix(&mut rng, k * k);

        let mut scores = vec![0.0; width - k + 1];
        cross_correlation(
            &mut scores,
            &src,
            Shape2d::new(k, width),
            &kernel,
            Shape2d::square(k),
            SlideParams::new(),
        )
        .unwrap();

        let legacy = argmax_corr(&src, &kernel, k, width).unwrap();
        assert_eq!(legacy, argmax(&scores).unwrap(), "k={k} width={width}");
    }
}

#[test]
fn argmax_corr_vector_agrees_with_offset_kernels() {
    let mut rng = StdRng::seed_from_u64(11);
    let (k, width) = (4, 15);
    let src1 = random_matrix(&mut rng, k * width);
    let src2 = random_matrix(&mut rng, k * width);

    let mut dst = vec![usize::MAX; width - k + 1];
    argmax_corr_vector(&src1, &src2, &mut dst, k, width).unwrap();

    for (col, legacy) in dst.iter().enumerate() {
        let generic = generic_best_shift(&src1, &src2, k, width, k, 0, col);
        assert_eq!(*legacy, generic, "column {col}");
    }
}

#[test]
fn argmax_corr_mat_agrees_band_by_band() {
    let mut rng = StdRng::seed_from_u64(2024);
    for (height, width, k) in [(8, 14, 3), (9, 11, 5)] {
        let src1 = random_matrix(&mut rng, height * width);
        let src2 = random_matrix(&mut rng, height * width);
        let out_w = width - k + 1;
        let mut dst = vec![usize::MAX; (height - k + 1) * out_w];
        argmax_corr_mat(&src1, &src2, &mut dst, width, height, k).unwrap();

        for band in 0..=height - k {
            for col in 0..out_w {
                let generic = generic_best_shift(&src1, &src2, height, width, k, band, col);
                assert_eq!(
                    dst[band * out_w + col],
                    generic,
                    "{height}x{width} k={k} band {band} col {col}"
                );
            }
        }
    }
}
