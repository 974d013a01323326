//! SIMD cross-correlation for `f32` using the `wide` crate.
//!
//! Interior windows are reduced eight elements at a time per kernel row;
//! windows touching the zero-padding border take the scalar path. Sums are
//! reassociated, so results match the scalar operator up to rounding.

use crate::kernel::scalar::CrossCorrelationOp;
use crate::kernel::{CellOp, Footprint, KernelView};
use crate::shape::Shape3d;
use wide::f32x8;

const LANES: usize = 8;

#[inline]
fn load_f32x8(slice: &[f32]) -> f32x8 {
    f32x8::from([
        slice[0], slice[1], slice[2], slice[3], slice[4], slice[5], slice[6], slice[7],
    ])
}

#[inline]
fn hsum(v: f32x8) -> f32 {
    v.to_array().iter().sum()
}

/// Vectorised cross-correlation operator for `f32` buffers.
pub struct CrossCorrelationF32x8;

impl CellOp<f32> for CrossCorrelationF32x8 {
    const NAME: &'static str = "cross_correlation_f32x8";

    fn reduce(
        src: &[f32],
        src_shape: Shape3d,
        kernel: &KernelView<'_, f32>,
        row: i64,
        col: i64,
    ) -> f32 {
        let fp = Footprint::new(src_shape, kernel);
        if !fp.is_interior(row, col) {
            return <CrossCorrelationOp as CellOp<f32>>::reduce(src, src_shape, kernel, row, col);
        }

        let k_data = kernel.data();
        let src_row_len = fp.src_row_len as usize;
        let simd_end = fp.row_len / LANES * LANES;
        let mut acc = f32x8::ZERO;
        let mut tail = 0.0f32;

        for row_k in 0..fp.rows {
            let src_base = (row as usize + row_k) * src_row_len + col as usize;
            let src_row = &src[src_base..src_base + fp.row_len];
            let k_base = fp.kernel_base + row_k * fp.kernel_stride;
            let k_row = &k_data[k_base..k_base + fp.row_len];

            let mut i = 0;
            while i < simd_end {
                acc += load_f32x8(&src_row[i..]) * load_f32x8(&k_row[i..]);
                i += LANES;
            }
            while i < fp.row_len {
                tail += src_row[i] * k_row[i];
                i += 1;
            }
        }

        hsum(acc) + tail
    }
}
