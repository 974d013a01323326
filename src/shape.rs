//! Shape and coordinate value types.
//!
//! A shape is an ordered list of dimension sizes. `Shape2d` and `Shape3d`
//! are fixed-rank specializations with axis-named accessors; `Shape3d`
//! can be built from a `Shape2d` with a single channel, which is how every
//! 2D entry point reaches the channel-aware traversal.

use std::ops::{Index, IndexMut};

use crate::util::{StereoDepthError, StereoDepthResult};

/// Dynamic-rank shape.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Shape {
    dims: Vec<usize>,
}

impl Shape {
    /// Creates a shape from its dimension sizes.
    pub fn new(dims: Vec<usize>) -> Self {
        Self { dims }
    }

    /// Number of dimensions.
    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    /// Product of all dimensions (1 for a rank-0 shape).
    pub fn size(&self) -> usize {
        self.dims.iter().product()
    }

    /// Bounds-checked dimension lookup.
    pub fn at(&self, idx: usize) -> StereoDepthResult<usize> {
        checked_dim(&self.dims, idx)
    }

    /// Dimension sizes in order.
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }
}

impl Index<usize> for Shape {
    type Output = usize;

    fn index(&self, idx: usize) -> &usize {
        &self.dims[idx]
    }
}

impl IndexMut<usize> for Shape {
    fn index_mut(&mut self, idx: usize) -> &mut usize {
        &mut self.dims[idx]
    }
}

impl From<Shape> for Vec<usize> {
    fn from(shape: Shape) -> Self {
        shape.dims
    }
}

/// Height and width of a 2D grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Shape2d {
    dims: [usize; 2],
}

impl Shape2d {
    pub const RANK: usize = 2;
    pub const HEIGHT_IDX: usize = 0;
    pub const WIDTH_IDX: usize = 1;

    pub const fn new(height: usize, width: usize) -> Self {
        Self {
            dims: [height, width],
        }
    }

    /// Square shape with both sides equal to `side`.
    pub const fn square(side: usize) -> Self {
        Self::new(side, side)
    }

    pub fn height(&self) -> usize {
        self.dims[Self::HEIGHT_IDX]
    }

    pub fn width(&self) -> usize {
        self.dims[Self::WIDTH_IDX]
    }

    pub fn height_mut(&mut self) -> &mut usize {
        &mut self.dims[Self::HEIGHT_IDX]
    }

    pub fn width_mut(&mut self) -> &mut usize {
        &mut self.dims[Self::WIDTH_IDX]
    }

    /// `height * width`.
    pub fn size(&self) -> usize {
        self.dims.iter().product()
    }

    /// Bounds-checked dimension lookup; index 2 and above fail.
    pub fn at(&self, idx: usize) -> StereoDepthResult<usize> {
        checked_dim(&self.dims, idx)
    }

    pub fn dims(&self) -> &[usize] {
        &self.dims
    }
}

impl Index<usize> for Shape2d {
    type Output = usize;

    fn index(&self, idx: usize) -> &usize {
        &self.dims[idx]
    }
}

impl IndexMut<usize> for Shape2d {
    fn index_mut(&mut self, idx: usize) -> &mut usize {
        &mut self.dims[idx]
    }
}

impl From<(usize, usize)> for Shape2d {
    fn from((height, width): (usize, usize)) -> Self {
        Self::new(height, width)
    }
}

impl From<Shape2d> for Shape {
    fn from(shape: Shape2d) -> Self {
        Shape::new(shape.dims.to_vec())
    }
}

/// Height, width and interleaved channel count of a 2D grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Shape3d {
    dims: [usize; 3],
}

impl Shape3d {
    pub const RANK: usize = 3;
    pub const HEIGHT_IDX: usize = 0;
    pub const WIDTH_IDX: usize = 1;
    pub const CHANNEL_IDX: usize = 2;

    pub const fn new(height: usize, width: usize, channels: usize) -> Self {
        Self {
            dims: [height, width, channels],
        }
    }

    pub fn height(&self) -> usize {
        self.dims[Self::HEIGHT_IDX]
    }

    pub fn width(&self) -> usize {
        self.dims[Self::WIDTH_IDX]
    }

    pub fn channels(&self) -> usize {
        self.dims[Self::CHANNEL_IDX]
    }

    pub fn height_mut(&mut self) -> &mut usize {
        &mut self.dims[Self::HEIGHT_IDX]
    }

    pub fn width_mut(&mut self) -> &mut usize {
        &mut self.dims[Self::WIDTH_IDX]
    }

    pub fn channels_mut(&mut self) -> &mut usize {
        &mut self.dims[Self::CHANNEL_IDX]
    }

    /// `height * width * channels`, the element count of a buffer.
    pub fn size(&self) -> usize {
        self.dims.iter().product()
    }

    /// Elements per row (`width * channels`).
    pub fn row_len(&self) -> usize {
        self.width() * self.channels()
    }

    /// Bounds-checked dimension lookup; index 3 and above fail.
    pub fn at(&self, idx: usize) -> StereoDepthResult<usize> {
        checked_dim(&self.dims, idx)
    }

    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Drops the channel axis.
    pub fn plane(&self) -> Shape2d {
        Shape2d::new(self.height(), self.width())
    }
}

impl Default for Shape3d {
    fn default() -> Self {
        Self::new(0, 0, 1)
    }
}

impl Index<usize> for Shape3d {
    type Output = usize;

    fn index(&self, idx: usize) -> &usize {
        &self.dims[idx]
    }
}

impl IndexMut<usize> for Shape3d {
    fn index_mut(&mut self, idx: usize) -> &mut usize {
        &mut self.dims[idx]
    }
}

impl From<Shape2d> for Shape3d {
    fn from(shape: Shape2d) -> Self {
        Self::new(shape.height(), shape.width(), 1)
    }
}

impl From<(usize, usize, usize)> for Shape3d {
    fn from((height, width, channels): (usize, usize, usize)) -> Self {
        Self::new(height, width, channels)
    }
}

impl From<Shape3d> for Shape {
    fn from(shape: Shape3d) -> Self {
        Shape::new(shape.dims.to_vec())
    }
}

/// Row/column position in an output or source grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Coord2d {
    pub row: usize,
    pub col: usize,
}

impl Coord2d {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Flat row-major index in a grid of the given shape.
    pub fn flat_index(&self, shape: Shape2d) -> usize {
        self.row * shape.width() + self.col
    }
}

fn checked_dim(dims: &[usize], idx: usize) -> StereoDepthResult<usize> {
    dims.get(idx)
        .copied()
        .ok_or(StereoDepthError::IndexOutOfRange {
            index: idx,
            len: dims.len(),
        })
}
