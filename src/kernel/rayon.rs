//! Rayon-parallel traversal (feature-gated).
//!
//! The destination is split into output rows; every row is computed by one
//! task with the same operator code as the sequential driver, so results
//! are identical to [`kernel_slide`](crate::slide::kernel_slide).

use crate::kernel::{CellOp, Element, KernelView};
use crate::shape::{Coord2d, Shape2d, Shape3d};
use crate::slide::{source_col, source_row, validate, SlideParams};
use crate::trace::trace_span;
use crate::util::StereoDepthResult;
use rayon::prelude::*;

/// Row-parallel variant of `kernel_slide`.
pub fn kernel_slide_par<T, Op>(
    dst: &mut [T],
    src: &[T],
    src_shape: Shape3d,
    kernel: KernelView<'_, T>,
    params: SlideParams,
) -> StereoDepthResult<Shape2d>
where
    T: Element + Send + Sync,
    Op: CellOp<T>,
{
    let dst_shape = validate(dst, src, src_shape, &kernel, params)?;
    if dst_shape.size() == 0 {
        return Ok(dst_shape);
    }
    let _guard = trace_span!(
        "kernel_slide_par",
        op = Op::NAME,
        dst_h = dst_shape.height(),
        dst_w = dst_shape.width(),
        parallel = true
    )
    .entered();

    let stride = params.effective_stride();
    let channels = src_shape.channels();
    let row_shape = Shape2d::new(1, dst_shape.width());

    // Each chunk is one output row viewed as a 1-row grid.
    dst[..dst_shape.size()]
        .par_chunks_mut(dst_shape.width())
        .enumerate()
        .for_each(|(row_dst, dst_row)| {
            let row = source_row(row_dst, stride, params.padding);
            for col_dst in 0..dst_shape.width() {
                let col = source_col(col_dst, stride, params.padding, channels);
                Op::apply(
                    dst_row,
                    row_shape,
                    Coord2d::new(0, col_dst),
                    src,
                    src_shape,
                    &kernel,
                    row,
                    col,
                );
            }
        });

    Ok(dst_shape)
}
