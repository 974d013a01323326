//! StereoDepth is a CPU sliding-window matching library for stereo depth.
//!
//! One generic traversal, [`kernel_slide`], slides a kernel over a source
//! with configurable stride and zero-padding and reduces every window with
//! a per-cell operator: cross-correlation, sum of squared differences or
//! sum of absolute differences. Sources may be multi-channel, and the
//! kernel may be a sub-window of a larger carrier buffer read in place.
//! The older row-strip matchers live in [`legacy`].
//!
//! Optional features: `rayon` (row-parallel traversal), `simd` (f32x8
//! cross-correlation, used by [`Metric::apply_f32`] and available as
//! `lowlevel::CrossCorrelationF32x8`), `image-io` (PNG/JPEG loading) and
//! `tracing`.

mod trace;

pub mod image;
pub mod kernel;
pub mod legacy;
pub mod lowlevel;
pub mod shape;
pub mod slide;
pub mod util;

pub use crate::image::{Mat, MatView};
pub use kernel::{CellOp, Element, KernelView};
pub use shape::{Coord2d, Shape, Shape2d, Shape3d};
pub use slide::ops::{
    absolute_diff, absolute_diff_offset, cross_correlation, cross_correlation_offset,
    squared_diff, squared_diff_offset, Metric,
};
pub use slide::{kernel_slide, output_shape, SlideParams};
pub use util::{argmax, StereoDepthError, StereoDepthResult};

pub use legacy::{argmax_corr, argmax_corr_mat, argmax_corr_vector, padding, padding_with_dst};

#[cfg(feature = "rayon")]
pub use kernel::rayon::kernel_slide_par;
