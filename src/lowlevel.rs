//! Low-level building blocks for custom slide pipelines.
//!
//! These expose the per-cell operators and traversal drivers directly, for
//! callers that want to pick an operator at compile time or plug in their
//! own [`CellOp`]. Most users should prefer the functions in
//! [`slide::ops`](crate::slide::ops) or [`Metric`](crate::Metric).

pub use crate::kernel::scalar::{AbsoluteDiffOp, CrossCorrelationOp, SquaredDiffOp};
pub use crate::kernel::{CellOp, Element, KernelView};
pub use crate::slide::{kernel_slide, output_shape, SlideParams};

#[cfg(feature = "rayon")]
pub use crate::kernel::rayon::kernel_slide_par;
#[cfg(feature = "simd")]
pub use crate::kernel::simd::CrossCorrelationF32x8;
