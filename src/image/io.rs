//! Loads images from disk into [`Mat<u8>`] via the `image` crate.
//!
//! Available when the `image-io` feature is enabled.

use crate::image::Mat;
use crate::shape::Shape3d;
use crate::util::{StereoDepthError, StereoDepthResult};
use std::path::Path;

/// Creates an owned single-channel matrix from a grayscale image buffer.
pub fn mat_from_gray_image(img: &image::GrayImage) -> StereoDepthResult<Mat<u8>> {
    let shape = Shape3d::new(img.height() as usize, img.width() as usize, 1);
    Mat::new(img.as_raw().clone(), shape)
}

/// Creates an owned three-channel matrix from an RGB image buffer.
pub fn mat_from_rgb_image(img: &image::RgbImage) -> StereoDepthResult<Mat<u8>> {
    let shape = Shape3d::new(img.height() as usize, img.width() as usize, 3);
    Mat::new(img.as_raw().clone(), shape)
}

/// Loads an image and converts it to 8-bit grayscale.
pub fn load_gray_image<P: AsRef<Path>>(path: P) -> StereoDepthResult<Mat<u8>> {
    let img = open(path.as_ref())?;
    mat_from_gray_image(&img.to_luma8())
}

/// Loads an image and converts it to 8-bit interleaved RGB.
pub fn load_rgb_image<P: AsRef<Path>>(path: P) -> StereoDepthResult<Mat<u8>> {
    let img = open(path.as_ref())?;
    mat_from_rgb_image(&img.to_rgb8())
}

fn open(path: &Path) -> StereoDepthResult<image::DynamicImage> {
    image::open(path).map_err(|err| StereoDepthError::ImageIo {
        reason: err.to_string(),
    })
}
