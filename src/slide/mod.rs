//! Generic kernel-slide traversal.
//!
//! [`kernel_slide`] computes the output grid from stride and padding, then
//! visits every output cell in row-major order and hands the matching
//! source anchor to a [`CellOp`]. Cross-correlation, squared and absolute
//! differences, with standalone or offset kernels and 2D or multi-channel
//! sources, all go through this one function.
//!
//! Output shape per axis:
//!
//! ```text
//! dst = ((src - kernel + 2 * padding) / stride) + 1      (0 if src == 0)
//! ```

use crate::kernel::{CellOp, Element, KernelView};
use crate::shape::{Coord2d, Shape2d, Shape3d};
use crate::trace::{trace_event, trace_span};
use crate::util::{StereoDepthError, StereoDepthResult};

pub mod ops;

/// Stride and zero-padding of a slide.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlideParams {
    /// Cells the window advances per output step (height: down, width:
    /// right). Each axis is clamped to at least 1.
    pub stride: Shape2d,
    /// Zero rows added top and bottom (height) and zero columns added left
    /// and right (width).
    pub padding: Shape2d,
}

impl Default for SlideParams {
    fn default() -> Self {
        Self {
            stride: Shape2d::new(1, 1),
            padding: Shape2d::new(0, 0),
        }
    }
}

impl SlideParams {
    /// Unit stride, no padding.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stride(mut self, stride: Shape2d) -> Self {
        self.stride = stride;
        self
    }

    pub fn with_padding(mut self, padding: Shape2d) -> Self {
        self.padding = padding;
        self
    }

    /// Stride with each axis clamped to at least 1.
    pub fn effective_stride(&self) -> Shape2d {
        Shape2d::new(self.stride.height().max(1), self.stride.width().max(1))
    }
}

/// Output grid for sliding a `kernel_shape` window over `src_shape`.
///
/// A zero source axis yields an empty output; the other axis is then not
/// checked against the kernel and reads 0 when the kernel does not fit.
/// Otherwise a kernel that does not fit the padded source is rejected.
pub fn output_shape(
    src_shape: Shape3d,
    kernel_shape: Shape2d,
    params: SlideParams,
) -> StereoDepthResult<Shape2d> {
    let stride = params.effective_stride();
    if src_shape.height() == 0 || src_shape.width() == 0 {
        let height = output_dim(
            src_shape.height(),
            kernel_shape.height(),
            params.padding.height(),
            stride.height(),
        )
        .unwrap_or(0);
        let width = output_dim(
            src_shape.width(),
            kernel_shape.width(),
            params.padding.width(),
            stride.width(),
        )
        .unwrap_or(0);
        return Ok(Shape2d::new(height, width));
    }
    let height = output_dim(
        src_shape.height(),
        kernel_shape.height(),
        params.padding.height(),
        stride.height(),
    )?;
    let width = output_dim(
        src_shape.width(),
        kernel_shape.width(),
        params.padding.width(),
        stride.width(),
    )?;
    Ok(Shape2d::new(height, width))
}

fn output_dim(src: usize, kernel: usize, padding: usize, stride: usize) -> StereoDepthResult<usize> {
    if src == 0 {
        return Ok(0);
    }
    let padded = padding
        .checked_mul(2)
        .and_then(|p| p.checked_add(src))
        .ok_or(StereoDepthError::InvalidArgument {
            reason: "padding overflows the source size",
        })?;
    if padded < kernel {
        return Err(StereoDepthError::InvalidShape {
            reason: "kernel larger than the padded source",
        });
    }
    Ok((padded - kernel) / stride + 1)
}

/// Slides `kernel` over `src` and writes one `Op` reduction per output cell
/// into `dst`.
///
/// Returns the output shape. `dst` must hold at least `shape.size()`
/// elements; cells past that are left untouched. Validation runs before any
/// write: kernel window inside its carrier, kernel fits the padded source,
/// non-empty buffers, then buffer lengths.
pub fn kernel_slide<T, Op>(
    dst: &mut [T],
    src: &[T],
    src_shape: Shape3d,
    kernel: KernelView<'_, T>,
    params: SlideParams,
) -> StereoDepthResult<Shape2d>
where
    T: Element,
    Op: CellOp<T>,
{
    let dst_shape = validate(dst, src, src_shape, &kernel, params)?;
    let _guard = trace_span!(
        "kernel_slide",
        op = Op::NAME,
        src_h = src_shape.height(),
        src_w = src_shape.width(),
        channels = src_shape.channels(),
        k_h = kernel.shape().height(),
        k_w = kernel.shape().width()
    )
    .entered();

    let stride = params.effective_stride();
    for row_dst in 0..dst_shape.height() {
        let row = source_row(row_dst, stride, params.padding);
        for col_dst in 0..dst_shape.width() {
            let col = source_col(col_dst, stride, params.padding, src_shape.channels());
            Op::apply(
                dst,
                dst_shape,
                Coord2d::new(row_dst, col_dst),
                src,
                src_shape,
                &kernel,
                row,
                col,
            );
        }
    }

    trace_event!(
        "kernel_slide_done",
        dst_h = dst_shape.height(),
        dst_w = dst_shape.width()
    );
    Ok(dst_shape)
}

/// Signed source row of the window anchored at output row `row_dst`.
#[inline]
pub(crate) fn source_row(row_dst: usize, stride: Shape2d, padding: Shape2d) -> i64 {
    (row_dst * stride.height()) as i64 - padding.height() as i64
}

/// Signed source column (in elements, channel-scaled) of the window
/// anchored at output column `col_dst`.
#[inline]
pub(crate) fn source_col(col_dst: usize, stride: Shape2d, padding: Shape2d, channels: usize) -> i64 {
    ((col_dst * stride.width()) as i64 - padding.width() as i64) * channels as i64
}

/// Shared entry validation for the sequential and parallel drivers.
pub(crate) fn validate<T>(
    dst: &[T],
    src: &[T],
    src_shape: Shape3d,
    kernel: &KernelView<'_, T>,
    params: SlideParams,
) -> StereoDepthResult<Shape2d> {
    let checked = check_inputs(dst, src, src_shape, kernel, params);
    if let Err(err) = &checked {
        let message = err.to_string();
        trace_event!(warn, "kernel_slide_rejected", error = message.as_str());
    }
    checked
}

fn check_inputs<T>(
    dst: &[T],
    src: &[T],
    src_shape: Shape3d,
    kernel: &KernelView<'_, T>,
    params: SlideParams,
) -> StereoDepthResult<Shape2d> {
    kernel.check_window()?;
    let dst_shape = output_shape(src_shape, kernel.shape(), params)?;
    if dst_shape.size() == 0 {
        return Ok(dst_shape);
    }

    let src_needed = src_shape.size();
    if src.is_empty() && src_needed > 0 {
        return Err(StereoDepthError::NullBuffer { name: "src" });
    }
    kernel.check_not_empty()?;
    if dst.is_empty() {
        return Err(StereoDepthError::NullBuffer { name: "dst" });
    }
    if src.len() < src_needed {
        return Err(StereoDepthError::BufferTooSmall {
            name: "src",
            needed: src_needed,
            got: src.len(),
        });
    }
    kernel.check_buffer(src_shape.channels())?;
    if dst.len() < dst_shape.size() {
        return Err(StereoDepthError::BufferTooSmall {
            name: "dst",
            needed: dst_shape.size(),
            got: dst.len(),
        });
    }
    Ok(dst_shape)
}

#[cfg(test)]
mod tests {
    use super::{kernel_slide, output_shape, SlideParams};
    use crate::kernel::scalar::{CrossCorrelationOp, SquaredDiffOp};
    use crate::kernel::KernelView;
    use crate::shape::{Shape2d, Shape3d};
    use crate::StereoDepthError;

    const SRC: [f64; 9] = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.5];
    const KERNEL: [f64; 4] = [0.0, 0.0, 0.0, 1.0];

    #[test]
    fn output_shape_matches_formula() {
        let src = Shape3d::new(4, 5, 1);
        let k = Shape2d::square(3);
        let plain = output_shape(src, k, SlideParams::new()).unwrap();
        assert_eq!(plain, Shape2d::new(2, 3));

        let padded = output_shape(src, k, SlideParams::new().with_padding(Shape2d::new(1, 1))).unwrap();
        assert_eq!(padded, Shape2d::new(4, 5));

        let strided = output_shape(
            src,
            k,
            SlideParams::new()
                .with_stride(Shape2d::new(2, 2))
                .with_padding(Shape2d::new(1, 1)),
        )
        .unwrap();
        assert_eq!(strided, Shape2d::new(2, 3));
    }

    #[test]
    fn zero_stride_is_clamped_to_one() {
        let params = SlideParams::new().with_stride(Shape2d::new(0, 0));
        assert_eq!(params.effective_stride(), Shape2d::new(1, 1));
        let shape = output_shape(Shape3d::new(3, 3, 1), Shape2d::square(2), params).unwrap();
        assert_eq!(shape, Shape2d::new(2, 2));
    }

    #[test]
    fn empty_source_axis_gives_empty_output() {
        let shape = output_shape(Shape3d::new(0, 4, 1), Shape2d::square(2), SlideParams::new()).unwrap();
        assert_eq!(shape, Shape2d::new(0, 3));

        let mut dst: [f64; 0] = [];
        let kernel = KernelView::new(&KERNEL, Shape2d::square(2));
        let shape = kernel_slide::<f64, CrossCorrelationOp>(
            &mut dst,
            &[],
            Shape3d::new(0, 4, 1),
            kernel,
            SlideParams::new(),
        )
        .unwrap();
        assert_eq!(shape.size(), 0);
    }

    #[test]
    fn empty_axis_skips_kernel_fit_on_the_other_axis() {
        let empty = Shape3d::new(0, 1, 1);
        let shape = output_shape(empty, Shape2d::square(2), SlideParams::new()).unwrap();
        assert_eq!(shape, Shape2d::new(0, 0));

        let shape = output_shape(Shape3d::new(3, 0, 2), Shape2d::square(5), SlideParams::new())
            .unwrap();
        assert_eq!(shape.size(), 0);

        let mut dst: [f64; 0] = [];
        let kernel = KernelView::new(&KERNEL, Shape2d::square(2));
        let shape =
            kernel_slide::<f64, CrossCorrelationOp>(&mut dst, &[], empty, kernel, SlideParams::new())
                .unwrap();
        assert_eq!(shape.size(), 0);
    }

    #[test]
    fn kernel_nullity_is_checked_before_lengths() {
        let mut dst = [0.0f64; 1];
        let empty: [f64; 0] = [];
        let kernel = KernelView::new(&empty, Shape2d::square(3));
        let err = kernel_slide::<f64, CrossCorrelationOp>(
            &mut dst,
            &SRC[..5],
            Shape3d::new(3, 3, 1),
            kernel,
            SlideParams::new(),
        )
        .unwrap_err();
        assert_eq!(err, StereoDepthError::NullBuffer { name: "kernel" });
    }

    #[test]
    fn oversized_kernel_is_rejected() {
        let err = output_shape(Shape3d::new(2, 2, 1), Shape2d::square(3), SlideParams::new()).unwrap_err();
        assert!(matches!(err, StereoDepthError::InvalidShape { .. }));
    }

    #[test]
    fn slide_writes_row_major_cells() {
        let mut dst = [0.0f64; 4];
        let kernel = KernelView::new(&KERNEL, Shape2d::square(2));
        let shape = kernel_slide::<f64, CrossCorrelationOp>(
            &mut dst,
            &SRC,
            Shape3d::new(3, 3, 1),
            kernel,
            SlideParams::new(),
        )
        .unwrap();
        assert_eq!(shape, Shape2d::square(2));
        assert_eq!(dst, [4.0, 5.0, 7.0, 8.5]);
    }

    #[test]
    fn short_destination_fails_before_any_write() {
        let mut dst = [-1.0f64; 3];
        let kernel = KernelView::new(&KERNEL, Shape2d::square(2));
        let err = kernel_slide::<f64, SquaredDiffOp>(
            &mut dst,
            &SRC,
            Shape3d::new(3, 3, 1),
            kernel,
            SlideParams::new(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            StereoDepthError::BufferTooSmall {
                name: "dst",
                needed: 4,
                got: 3,
            }
        );
        assert_eq!(dst, [-1.0; 3]);
    }

    #[test]
    fn window_outside_carrier_is_rejected() {
        let mut dst = [0.0f64; 4];
        let kernel = KernelView::with_offset(
            &KERNEL,
            Shape2d::square(2),
            Shape2d::square(2),
            Shape2d::new(0, 1),
        );
        let err = kernel_slide::<f64, CrossCorrelationOp>(
            &mut dst,
            &SRC,
            Shape3d::new(3, 3, 1),
            kernel,
            SlideParams::new(),
        )
        .unwrap_err();
        assert!(matches!(err, StereoDepthError::InvalidShape { .. }));
    }

    #[test]
    fn empty_buffers_are_reported_as_null() {
        let mut dst = [0.0f64; 4];
        let kernel = KernelView::new(&KERNEL, Shape2d::square(2));
        let err = kernel_slide::<f64, CrossCorrelationOp>(
            &mut dst,
            &[],
            Shape3d::new(3, 3, 1),
            kernel,
            SlideParams::new(),
        )
        .unwrap_err();
        assert_eq!(err, StereoDepthError::NullBuffer { name: "src" });

        let empty: [f64; 0] = [];
        let kernel = KernelView::new(&empty, Shape2d::square(2));
        let err = kernel_slide::<f64, CrossCorrelationOp>(
            &mut dst,
            &SRC,
            Shape3d::new(3, 3, 1),
            kernel,
            SlideParams::new(),
        )
        .unwrap_err();
        assert_eq!(err, StereoDepthError::NullBuffer { name: "kernel" });
    }
}
