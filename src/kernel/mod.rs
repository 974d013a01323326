//! Kernel views and per-cell reduction operators.
//!
//! A [`KernelView`] describes the kernel as a window inside a carrier buffer:
//! the carrier has its own "real" shape, the window has the logical shape
//! used for sliding and sits at `offset` (rows, cols) inside the carrier.
//! A standalone kernel is simply a window covering its whole carrier.
//!
//! A [`CellOp`] reduces the overlap between the kernel footprint and the
//! source at one anchor into a single value.

use std::ops::{Mul, Sub};

use num_traits::Zero;

use crate::shape::{Coord2d, Shape2d, Shape3d};
use crate::util::{StereoDepthError, StereoDepthResult};

pub mod scalar;

#[cfg(feature = "simd")]
pub mod simd;

#[cfg(feature = "rayon")]
pub mod rayon;

/// Numeric element accepted by the engine.
///
/// Accumulation happens in `T` itself; pick a type wide enough for the sums
/// your data produces (e.g. `u32` or `f32` for 8-bit pixels).
pub trait Element: Copy + PartialOrd + Zero + Sub<Output = Self> + Mul<Output = Self> {}

impl<T> Element for T where T: Copy + PartialOrd + Zero + Sub<Output = T> + Mul<Output = T> {}

/// Borrowed kernel window inside a carrier buffer. Never copies.
#[derive(Clone, Copy, Debug)]
pub struct KernelView<'a, T> {
    data: &'a [T],
    real_shape: Shape2d,
    shape: Shape2d,
    offset: Shape2d,
}

impl<'a, T> KernelView<'a, T> {
    /// Standalone kernel: the carrier is exactly the kernel.
    pub fn new(data: &'a [T], shape: Shape2d) -> Self {
        Self {
            data,
            real_shape: shape,
            shape,
            offset: Shape2d::new(0, 0),
        }
    }

    /// Kernel of `shape` located at `offset` inside a carrier of
    /// `real_shape`.
    pub fn with_offset(
        carrier: &'a [T],
        real_shape: Shape2d,
        shape: Shape2d,
        offset: Shape2d,
    ) -> Self {
        Self {
            data: carrier,
            real_shape,
            shape,
            offset,
        }
    }

    /// The whole carrier buffer.
    pub fn data(&self) -> &'a [T] {
        self.data
    }

    /// Shape of the carrier buffer.
    pub fn real_shape(&self) -> Shape2d {
        self.real_shape
    }

    /// Logical kernel shape used for sliding.
    pub fn shape(&self) -> Shape2d {
        self.shape
    }

    /// Row/column offset of the window inside the carrier.
    pub fn offset(&self) -> Shape2d {
        self.offset
    }

    /// Checks that the window lies inside its carrier.
    pub(crate) fn check_window(&self) -> StereoDepthResult<()> {
        let fits_rows = self
            .offset
            .height()
            .checked_add(self.shape.height())
            .is_some_and(|end| end <= self.real_shape.height());
        let fits_cols = self
            .offset
            .width()
            .checked_add(self.shape.width())
            .is_some_and(|end| end <= self.real_shape.width());
        if fits_rows && fits_cols {
            Ok(())
        } else {
            Err(StereoDepthError::InvalidShape {
                reason: "kernel window exceeds its carrier",
            })
        }
    }

    /// Rejects an empty carrier behind a non-empty window.
    pub(crate) fn check_not_empty(&self) -> StereoDepthResult<()> {
        if self.shape.size() > 0 && self.data.is_empty() {
            return Err(StereoDepthError::NullBuffer { name: "kernel" });
        }
        Ok(())
    }

    /// Checks the carrier length for interleaved `channels`.
    pub(crate) fn check_buffer(&self, channels: usize) -> StereoDepthResult<()> {
        let needed = self.real_shape.size() * channels;
        if self.data.len() < needed {
            return Err(StereoDepthError::BufferTooSmall {
                name: "kernel",
                needed,
                got: self.data.len(),
            });
        }
        Ok(())
    }
}

/// Per-cell reduction between the kernel footprint and the source.
///
/// `row` and `col` are the signed source-space anchor of the window's top
/// left corner; `col` is already scaled by the channel count. Positions
/// outside the source are zero-padding.
pub trait CellOp<T: Element> {
    /// Operator name used in trace output.
    const NAME: &'static str;

    /// Reduces the window anchored at (`row`, `col`) to one value.
    fn reduce(src: &[T], src_shape: Shape3d, kernel: &KernelView<'_, T>, row: i64, col: i64) -> T;

    /// Writes the reduction for `dst_coord` into `dst`.
    #[allow(clippy::too_many_arguments)]
    #[inline]
    fn apply(
        dst: &mut [T],
        dst_shape: Shape2d,
        dst_coord: Coord2d,
        src: &[T],
        src_shape: Shape3d,
        kernel: &KernelView<'_, T>,
        row: i64,
        col: i64,
    ) {
        dst[dst_coord.flat_index(dst_shape)] = Self::reduce(src, src_shape, kernel, row, col);
    }
}

/// Index arithmetic for one kernel footprint over a channel-interleaved
/// source.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Footprint {
    /// Kernel rows.
    pub rows: usize,
    /// Elements per kernel row (`kernel width * channels`).
    pub row_len: usize,
    /// Elements between kernel rows in the carrier.
    pub kernel_stride: usize,
    /// Flat index of the window's first element in the carrier.
    pub kernel_base: usize,
    pub src_rows: i64,
    /// Elements per source row (`source width * channels`).
    pub src_row_len: i64,
}

impl Footprint {
    pub fn new<T>(src_shape: Shape3d, kernel: &KernelView<'_, T>) -> Self {
        let channels = src_shape.channels();
        let kernel_stride = kernel.real_shape().width() * channels;
        Self {
            rows: kernel.shape().height(),
            row_len: kernel.shape().width() * channels,
            kernel_stride,
            kernel_base: kernel.offset().height() * kernel_stride
                + kernel.offset().width() * channels,
            src_rows: src_shape.height() as i64,
            src_row_len: src_shape.row_len() as i64,
        }
    }

    /// True when the whole window anchored at (`row`, `col`) is inside the
    /// source, i.e. no zero-padding is involved.
    pub fn is_interior(&self, row: i64, col: i64) -> bool {
        row >= 0
            && col >= 0
            && row + self.rows as i64 <= self.src_rows
            && col + self.row_len as i64 <= self.src_row_len
    }
}
