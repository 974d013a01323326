//! Public slide operations.
//!
//! Each family comes in two forms:
//!
//! - `op(dst, src, src_shape, kernel, kernel_shape, params)`: the kernel is
//!   a standalone buffer.
//! - `op_offset(dst, src1, src1_shape, src2, src2_shape, k_shape, k_offset,
//!   params)`: the kernel is the `k_shape` window at `k_offset` inside
//!   `src2`, read in place.
//!
//! `src_shape` accepts a [`Shape2d`] (single channel) or a [`Shape3d`].
//! A multi-channel source pairs with a kernel of the same channel count;
//! the channels of each pixel are summed into one output value.

use crate::kernel::scalar::{AbsoluteDiffOp, CrossCorrelationOp, SquaredDiffOp};
use crate::kernel::{CellOp, Element, KernelView};
use crate::shape::{Shape2d, Shape3d};
use crate::slide::{kernel_slide, SlideParams};
use crate::util::StereoDepthResult;

/// Comparison metric applied at every window position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Metric {
    /// Sum of products. Higher is a better match.
    #[default]
    CrossCorrelation,
    /// Sum of squared differences. Lower is a better match.
    SquaredDiff,
    /// Sum of absolute differences. Lower is a better match.
    AbsoluteDiff,
}

impl Metric {
    /// Stable snake_case name.
    pub fn name(self) -> &'static str {
        match self {
            Metric::CrossCorrelation => <CrossCorrelationOp as CellOp<f32>>::NAME,
            Metric::SquaredDiff => <SquaredDiffOp as CellOp<f32>>::NAME,
            Metric::AbsoluteDiff => <AbsoluteDiffOp as CellOp<f32>>::NAME,
        }
    }

    /// True when larger scores mean closer matches.
    pub fn higher_is_better(self) -> bool {
        matches!(self, Metric::CrossCorrelation)
    }

    /// Runs the slide for this metric.
    ///
    /// With the `rayon` feature and `parallel == true` the output rows are
    /// computed in parallel; otherwise `parallel` is ignored.
    pub fn apply<T>(
        self,
        dst: &mut [T],
        src: &[T],
        src_shape: Shape3d,
        kernel: KernelView<'_, T>,
        params: SlideParams,
        parallel: bool,
    ) -> StereoDepthResult<Shape2d>
    where
        T: Element + Send + Sync,
    {
        match self {
            Metric::CrossCorrelation => {
                dispatch::<T, CrossCorrelationOp>(dst, src, src_shape, kernel, params, parallel)
            }
            Metric::SquaredDiff => {
                dispatch::<T, SquaredDiffOp>(dst, src, src_shape, kernel, params, parallel)
            }
            Metric::AbsoluteDiff => {
                dispatch::<T, AbsoluteDiffOp>(dst, src, src_shape, kernel, params, parallel)
            }
        }
    }
}

impl Metric {
    /// [`Metric::apply`] for `f32` buffers.
    ///
    /// With the `simd` feature, cross-correlation runs on
    /// [`CrossCorrelationF32x8`](crate::kernel::simd::CrossCorrelationF32x8),
    /// which agrees with the scalar operator up to summation rounding. The
    /// other metrics, and every metric without the feature, behave exactly
    /// like [`Metric::apply`].
    pub fn apply_f32(
        self,
        dst: &mut [f32],
        src: &[f32],
        src_shape: Shape3d,
        kernel: KernelView<'_, f32>,
        params: SlideParams,
        parallel: bool,
    ) -> StereoDepthResult<Shape2d> {
        #[cfg(feature = "simd")]
        if self == Metric::CrossCorrelation {
            return dispatch::<f32, crate::kernel::simd::CrossCorrelationF32x8>(
                dst, src, src_shape, kernel, params, parallel,
            );
        }
        self.apply(dst, src, src_shape, kernel, params, parallel)
    }
}

fn dispatch<T, Op>(
    dst: &mut [T],
    src: &[T],
    src_shape: Shape3d,
    kernel: KernelView<'_, T>,
    params: SlideParams,
    parallel: bool,
) -> StereoDepthResult<Shape2d>
where
    T: Element + Send + Sync,
    Op: CellOp<T>,
{
    #[cfg(feature = "rayon")]
    if parallel {
        return crate::kernel::rayon::kernel_slide_par::<T, Op>(dst, src, src_shape, kernel, params);
    }
    #[cfg(not(feature = "rayon"))]
    let _ = parallel;
    kernel_slide::<T, Op>(dst, src, src_shape, kernel, params)
}

/// Cross-correlation of `src` with a standalone kernel.
pub fn cross_correlation<T: Element>(
    dst: &mut [T],
    src: &[T],
    src_shape: impl Into<Shape3d>,
    kernel: &[T],
    kernel_shape: Shape2d,
    params: SlideParams,
) -> StereoDepthResult<Shape2d> {
    kernel_slide::<T, CrossCorrelationOp>(
        dst,
        src,
        src_shape.into(),
        KernelView::new(kernel, kernel_shape),
        params,
    )
}

/// Sum of squared differences between `src` windows and a standalone
/// kernel.
pub fn squared_diff<T: Element>(
    dst: &mut [T],
    src: &[T],
    src_shape: impl Into<Shape3d>,
    kernel: &[T],
    kernel_shape: Shape2d,
    params: SlideParams,
) -> StereoDepthResult<Shape2d> {
    kernel_slide::<T, SquaredDiffOp>(
        dst,
        src,
        src_shape.into(),
        KernelView::new(kernel, kernel_shape),
        params,
    )
}

/// Sum of absolute differences between `src` windows and a standalone
/// kernel.
pub fn absolute_diff<T: Element>(
    dst: &mut [T],
    src: &[T],
    src_shape: impl Into<Shape3d>,
    kernel: &[T],
    kernel_shape: Shape2d,
    params: SlideParams,
) -> StereoDepthResult<Shape2d> {
    kernel_slide::<T, AbsoluteDiffOp>(
        dst,
        src,
        src_shape.into(),
        KernelView::new(kernel, kernel_shape),
        params,
    )
}

/// Cross-correlation of `src1` with the `k_shape` window of `src2` at
/// `k_offset`.
#[allow(clippy::too_many_arguments)]
pub fn cross_correlation_offset<T: Element>(
    dst: &mut [T],
    src1: &[T],
    src1_shape: impl Into<Shape3d>,
    src2: &[T],
    src2_shape: Shape2d,
    k_shape: Shape2d,
    k_offset: Shape2d,
    params: SlideParams,
) -> StereoDepthResult<Shape2d> {
    kernel_slide::<T, CrossCorrelationOp>(
        dst,
        src1,
        src1_shape.into(),
        KernelView::with_offset(src2, src2_shape, k_shape, k_offset),
        params,
    )
}

/// Sum of squared differences against the `k_shape` window of `src2` at
/// `k_offset`.
#[allow(clippy::too_many_arguments)]
pub fn squared_diff_offset<T: Element>(
    dst: &mut [T],
    src1: &[T],
    src1_shape: impl Into<Shape3d>,
    src2: &[T],
    src2_shape: Shape2d,
    k_shape: Shape2d,
    k_offset: Shape2d,
    params: SlideParams,
) -> StereoDepthResult<Shape2d> {
    kernel_slide::<T, SquaredDiffOp>(
        dst,
        src1,
        src1_shape.into(),
        KernelView::with_offset(src2, src2_shape, k_shape, k_offset),
        params,
    )
}

/// Sum of absolute differences against the `k_shape` window of `src2` at
/// `k_offset`.
#[allow(clippy::too_many_arguments)]
pub fn absolute_diff_offset<T: Element>(
    dst: &mut [T],
    src1: &[T],
    src1_shape: impl Into<Shape3d>,
    src2: &[T],
    src2_shape: Shape2d,
    k_shape: Shape2d,
    k_offset: Shape2d,
    params: SlideParams,
) -> StereoDepthResult<Shape2d> {
    kernel_slide::<T, AbsoluteDiffOp>(
        dst,
        src1,
        src1_shape.into(),
        KernelView::with_offset(src2, src2_shape, k_shape, k_offset),
        params,
    )
}
