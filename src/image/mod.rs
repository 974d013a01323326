//! Row-major matrices handed to and returned by the slide engine.
//!
//! `Mat<T>` owns its buffer, `MatView<'a, T>` borrows one. Both carry a
//! [`Shape3d`]; channels are interleaved per pixel. Views are zero-copy, so
//! a horizontal band of a matrix can be passed to the engine without
//! moving any data.

use crate::shape::{Shape2d, Shape3d};
use crate::util::{StereoDepthError, StereoDepthResult};

#[cfg(feature = "image-io")]
pub mod io;

/// Borrowed row-major matrix.
#[derive(Copy, Clone, Debug)]
pub struct MatView<'a, T> {
    data: &'a [T],
    shape: Shape3d,
}

impl<'a, T> MatView<'a, T> {
    /// Creates a view over `data`, which must hold at least `shape.size()`
    /// elements.
    pub fn new(data: &'a [T], shape: impl Into<Shape3d>) -> StereoDepthResult<Self> {
        let shape = shape.into();
        check_len(data.len(), shape)?;
        Ok(Self {
            data: &data[..shape.size()],
            shape,
        })
    }

    pub fn shape(&self) -> Shape3d {
        self.shape
    }

    pub fn height(&self) -> usize {
        self.shape.height()
    }

    pub fn width(&self) -> usize {
        self.shape.width()
    }

    pub fn channels(&self) -> usize {
        self.shape.channels()
    }

    /// Returns the elements covered by the shape.
    pub fn as_slice(&self) -> &'a [T] {
        self.data
    }

    /// Returns the element at (`row`, `col`, `channel`) if it is within
    /// bounds.
    pub fn get(&self, row: usize, col: usize, channel: usize) -> Option<&'a T> {
        if row >= self.height() || col >= self.width() || channel >= self.channels() {
            return None;
        }
        self.data
            .get(row * self.shape.row_len() + col * self.channels() + channel)
    }

    /// Returns row `row` with all channels.
    pub fn row(&self, row: usize) -> Option<&'a [T]> {
        if row >= self.height() {
            return None;
        }
        let len = self.shape.row_len();
        self.data.get(row * len..(row + 1) * len)
    }

    /// Zero-copy band of `rows` full rows starting at `start`.
    pub fn row_band(&self, start: usize, rows: usize) -> StereoDepthResult<MatView<'a, T>> {
        let end = start
            .checked_add(rows)
            .filter(|end| *end <= self.height())
            .ok_or(StereoDepthError::InvalidShape {
                reason: "row band exceeds the matrix",
            })?;
        let len = self.shape.row_len();
        Ok(MatView {
            data: &self.data[start * len..end * len],
            shape: Shape3d::new(rows, self.width(), self.channels()),
        })
    }
}

/// Owned row-major matrix.
#[derive(Clone, Debug, PartialEq)]
pub struct Mat<T> {
    data: Vec<T>,
    shape: Shape3d,
}

impl<T> Mat<T> {
    /// Wraps `data`; its length must equal `shape.size()`.
    pub fn new(data: Vec<T>, shape: impl Into<Shape3d>) -> StereoDepthResult<Self> {
        let shape = shape.into();
        check_len(data.len(), shape)?;
        if data.len() != shape.size() {
            return Err(StereoDepthError::InvalidShape {
                reason: "buffer longer than its shape",
            });
        }
        Ok(Self { data, shape })
    }

    pub fn shape(&self) -> Shape3d {
        self.shape
    }

    /// Height and width without channels.
    pub fn plane(&self) -> Shape2d {
        self.shape.plane()
    }

    pub fn view(&self) -> MatView<'_, T> {
        MatView {
            data: &self.data,
            shape: self.shape,
        }
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Converts every element, keeping the shape.
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Mat<U> {
        Mat {
            data: self.data.iter().map(f).collect(),
            shape: self.shape,
        }
    }
}

impl<T: Copy + num_traits::Zero> Mat<T> {
    /// Zero-filled matrix of `shape`.
    pub fn zeros(shape: impl Into<Shape3d>) -> Self {
        let shape = shape.into();
        Self {
            data: vec![T::zero(); shape.size()],
            shape,
        }
    }
}

fn check_len(len: usize, shape: Shape3d) -> StereoDepthResult<()> {
    if len < shape.size() {
        return Err(StereoDepthError::BufferTooSmall {
            name: "mat",
            needed: shape.size(),
            got: len,
        });
    }
    Ok(())
}
