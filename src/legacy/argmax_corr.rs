use crate::kernel::Element;
use crate::legacy::{check_buffer, check_not_empty, rejected, KERNEL_LIMIT};
use crate::trace::trace_span;
use crate::util::{StereoDepthError, StereoDepthResult};

/// Best horizontal shift of a `kernel_size x kernel_size` kernel over a
/// `kernel_size`-row strip of width `matrix_width`.
///
/// Returns the left column of the window with the largest dot product.
/// The running maximum starts at zero and is replaced on `>=`, so ties go
/// to the last window, an all-zero surface reports the last window and an
/// all-negative surface reports 0.
pub fn argmax_corr<T: Element>(
    src: &[T],
    kernel: &[T],
    kernel_size: usize,
    matrix_width: usize,
) -> StereoDepthResult<usize> {
    let result = check_strip_params(kernel_size, matrix_width).and_then(|()| {
        check_not_empty("src", src)?;
        check_not_empty("kernel", kernel)?;
        check_buffer("src", src, kernel_size * matrix_width)?;
        check_buffer("kernel", kernel, kernel_size * kernel_size)
    });
    rejected("argmax_corr", result)?;

    Ok(best_shift(
        src,
        kernel,
        kernel_size,
        0,
        kernel_size,
        matrix_width,
    ))
}

/// For every window position `i` of `src2`, the best shift of that window
/// over `src1`.
///
/// Both sources are `height x width`; the window is `height x height`, so
/// `dst` receives `width - height + 1` indices. No kernel copy is made; the
/// window is read in place from `src2`.
pub fn argmax_corr_vector<T: Element>(
    src1: &[T],
    src2: &[T],
    dst: &mut [usize],
    height: usize,
    width: usize,
) -> StereoDepthResult<()> {
    let result = check_strip_params(height, width).and_then(|()| {
        check_not_empty("src1", src1)?;
        check_not_empty("src2", src2)?;
        check_not_empty("dst", dst)?;
        check_buffer("src1", src1, height * width)?;
        check_buffer("src2", src2, height * width)?;
        check_buffer("dst", dst, width - height + 1)
    });
    rejected("argmax_corr_vector", result)?;

    let _guard = trace_span!("argmax_corr_vector", height = height, width = width).entered();
    fill_strip(src1, src2, dst, height, width);
    Ok(())
}

/// Best-shift map of two `height x width` matrices.
///
/// A `kernel_size`-row band slides down both matrices; each band produces
/// one row of [`argmax_corr_vector`] output. `dst` is
/// `(height - kernel_size + 1) x (width - kernel_size + 1)`, row-major.
pub fn argmax_corr_mat<T: Element>(
    src1: &[T],
    src2: &[T],
    dst: &mut [usize],
    width: usize,
    height: usize,
    kernel_size: usize,
) -> StereoDepthResult<()> {
    let result = check_strip_params(kernel_size, width).and_then(|()| {
        if height < kernel_size {
            return Err(StereoDepthError::InvalidShape {
                reason: "matrix shorter than kernel",
            });
        }
        check_not_empty("src1", src1)?;
        check_not_empty("src2", src2)?;
        check_not_empty("dst", dst)?;
        check_buffer("src1", src1, height * width)?;
        check_buffer("src2", src2, height * width)?;
        let dst_width = width - kernel_size + 1;
        check_buffer("dst", dst, (height - kernel_size + 1) * dst_width)
    });
    rejected("argmax_corr_mat", result)?;

    let _guard = trace_span!(
        "argmax_corr_mat",
        height = height,
        width = width,
        kernel_size = kernel_size
    )
    .entered();

    let dst_width = width - kernel_size + 1;
    for band in 0..=height - kernel_size {
        let start = band * width;
        fill_strip(
            &src1[start..],
            &src2[start..],
            &mut dst[band * dst_width..(band + 1) * dst_width],
            kernel_size,
            width,
        );
    }
    Ok(())
}

fn check_strip_params(kernel_size: usize, width: usize) -> StereoDepthResult<()> {
    if kernel_size < KERNEL_LIMIT {
        return Err(StereoDepthError::InvalidShape {
            reason: "kernel size must be at least 3",
        });
    }
    if width < KERNEL_LIMIT {
        return Err(StereoDepthError::InvalidShape {
            reason: "matrix width must be at least 3",
        });
    }
    if width < kernel_size {
        return Err(StereoDepthError::InvalidShape {
            reason: "matrix narrower than kernel",
        });
    }
    Ok(())
}

/// One best-shift index per window position of `src2`.
fn fill_strip<T: Element>(
    src1: &[T],
    src2: &[T],
    dst: &mut [usize],
    kernel_size: usize,
    width: usize,
) {
    for (offset, slot) in dst[..width - kernel_size + 1].iter_mut().enumerate() {
        *slot = best_shift(src1, src2, width, offset, kernel_size, width);
    }
}

/// Window start in `0..=width - kernel_size` maximising the dot product
/// between the `src` window and the kernel found at column
/// `kernel_offset` of a buffer with row stride `kernel_stride`.
fn best_shift<T: Element>(
    src: &[T],
    kernel: &[T],
    kernel_stride: usize,
    kernel_offset: usize,
    kernel_size: usize,
    width: usize,
) -> usize {
    let mut max = T::zero();
    let mut max_idx = 0;
    for start in 0..=width - kernel_size {
        let mut sum = T::zero();
        for row in 0..kernel_size {
            let src_row = &src[row * width + start..][..kernel_size];
            let k_row = &kernel[row * kernel_stride + kernel_offset..][..kernel_size];
            for (s, k) in src_row.iter().zip(k_row) {
                sum = sum + *s * *k;
            }
        }
        if sum >= max {
            max = sum;
            max_idx = start;
        }
    }
    max_idx
}
