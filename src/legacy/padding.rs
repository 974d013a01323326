use crate::legacy::{check_buffer, check_not_empty, rejected, KERNEL_LIMIT};
use crate::util::{StereoDepthError, StereoDepthResult};

/// Writes `src` into `dst` surrounded by a zero border of
/// `kernel_rows / 2` rows and `kernel_cols / 2` columns on each side.
///
/// `dst` must hold `(src_rows + 2 * (kernel_rows / 2)) * (src_cols + 2 *
/// (kernel_cols / 2))` elements. The kernel must be square with an odd side
/// of at least [`KERNEL_LIMIT`], and the source at least 3x3.
pub fn padding<T: Copy + num_traits::Zero>(
    src: &[T],
    dst: &mut [T],
    src_rows: usize,
    src_cols: usize,
    kernel_rows: usize,
    kernel_cols: usize,
) -> StereoDepthResult<()> {
    let result = check_geometry(src, dst, src_rows, src_cols, kernel_rows, kernel_cols)
        .and_then(|(dst_rows, dst_cols)| {
            check_buffer("src", src, src_rows * src_cols)?;
            check_buffer("dst", dst, dst_rows * dst_cols)?;
            Ok((dst_rows, dst_cols))
        });
    let (dst_rows, dst_cols) = rejected("padding", result)?;
    fill(src, dst, src_rows, src_cols, dst_rows, dst_cols);
    Ok(())
}

/// [`padding`] with explicit destination dimensions, which must equal the
/// source dimensions plus the border.
#[allow(clippy::too_many_arguments)]
pub fn padding_with_dst<T: Copy + num_traits::Zero>(
    src: &[T],
    dst: &mut [T],
    src_rows: usize,
    src_cols: usize,
    dst_rows: usize,
    dst_cols: usize,
    kernel_rows: usize,
    kernel_cols: usize,
) -> StereoDepthResult<()> {
    let result = check_geometry(src, dst, src_rows, src_cols, kernel_rows, kernel_cols)
        .and_then(|expected| {
            if expected != (dst_rows, dst_cols) {
                return Err(StereoDepthError::InvalidShape {
                    reason: "destination dims do not match source plus padding",
                });
            }
            check_buffer("src", src, src_rows * src_cols)?;
            check_buffer("dst", dst, dst_rows * dst_cols)?;
            Ok(())
        });
    rejected("padding_with_dst", result)?;
    fill(src, dst, src_rows, src_cols, dst_rows, dst_cols);
    Ok(())
}

/// Shape checks shared by both variants; returns the padded dimensions.
fn check_geometry<T>(
    src: &[T],
    dst: &[T],
    src_rows: usize,
    src_cols: usize,
    kernel_rows: usize,
    kernel_cols: usize,
) -> StereoDepthResult<(usize, usize)> {
    if src_rows < KERNEL_LIMIT || src_cols < KERNEL_LIMIT {
        return Err(StereoDepthError::InvalidShape {
            reason: "source must be at least 3x3",
        });
    }
    let kernel_size = kernel_rows * kernel_cols;
    if kernel_size < KERNEL_LIMIT * KERNEL_LIMIT {
        return Err(StereoDepthError::InvalidShape {
            reason: "kernel must be at least 3x3",
        });
    }
    if kernel_rows != kernel_cols || kernel_rows % 2 == 0 {
        return Err(StereoDepthError::InvalidShape {
            reason: "kernel must be square with an odd side",
        });
    }
    if src_rows * src_cols < kernel_size {
        return Err(StereoDepthError::InvalidShape {
            reason: "source smaller than kernel",
        });
    }
    check_not_empty("src", src)?;
    check_not_empty("dst", dst)?;
    Ok((
        src_rows + 2 * (kernel_rows / 2),
        src_cols + 2 * (kernel_cols / 2),
    ))
}

fn fill<T: Copy + num_traits::Zero>(
    src: &[T],
    dst: &mut [T],
    src_rows: usize,
    src_cols: usize,
    dst_rows: usize,
    dst_cols: usize,
) {
    let pad_rows = (dst_rows - src_rows) / 2;
    let pad_cols = (dst_cols - src_cols) / 2;
    for (i, dst_row) in dst[..dst_rows * dst_cols]
        .chunks_exact_mut(dst_cols)
        .enumerate()
    {
        if i < pad_rows || i >= pad_rows + src_rows {
            dst_row.fill(T::zero());
            continue;
        }
        let src_row = &src[(i - pad_rows) * src_cols..][..src_cols];
        dst_row[..pad_cols].fill(T::zero());
        dst_row[pad_cols..pad_cols + src_cols].copy_from_slice(src_row);
        dst_row[pad_cols + src_cols..].fill(T::zero());
    }
}

#[cfg(test)]
mod tests {
    use super::{padding, padding_with_dst};
    use crate::StereoDepthError;

    #[test]
    fn pads_with_a_one_cell_border() {
        let src: Vec<u8> = (1..=12).collect();
        let mut dst = vec![9u8; 5 * 6];
        padding(&src, &mut dst, 3, 4, 3, 3).unwrap();
        #[rustfmt::skip]
        let expected: [u8; 30] = [
            0, 0, 0,  0,  0,  0,
            0, 1, 2,  3,  4,  0,
            0, 5, 6,  7,  8,  0,
            0, 9, 10, 11, 12, 0,
            0, 0, 0,  0,  0,  0,
        ];
        assert_eq!(dst, expected);
    }

    #[test]
    fn five_by_five_kernel_pads_two_cells() {
        let src = [1i32; 25];
        let mut dst = vec![7i32; 9 * 9];
        padding(&src, &mut dst, 5, 5, 5, 5).unwrap();
        let total: i32 = dst.iter().sum();
        assert_eq!(total, 25);
        assert_eq!(dst[2 * 9 + 2], 1);
        assert_eq!(dst[9 + 1], 0);
        assert_eq!(dst[6 * 9 + 6], 1);
        assert_eq!(dst[7 * 9 + 7], 0);
    }

    #[test]
    fn explicit_destination_must_match() {
        let src = [1.0f32; 9];
        let mut dst = vec![0.0f32; 5 * 6];
        let err = padding_with_dst(&src, &mut dst, 3, 3, 5, 6, 3, 3).unwrap_err();
        assert!(matches!(err, StereoDepthError::InvalidShape { .. }));
        assert!(dst.iter().all(|v| *v == 0.0));

        let mut dst = vec![0.0f32; 25];
        padding_with_dst(&src, &mut dst, 3, 3, 5, 5, 3, 3).unwrap();
        assert_eq!(dst[6], 1.0);
    }

    #[test]
    fn validation_follows_fixed_order() {
        let src = [0u8; 4];
        let mut dst = [0u8; 16];
        // Source too small wins over the bad kernel.
        let err = padding(&src, &mut dst, 2, 2, 2, 2).unwrap_err();
        assert_eq!(
            err,
            StereoDepthError::InvalidShape {
                reason: "source must be at least 3x3"
            }
        );

        let src = [0u8; 9];
        let err = padding(&src, &mut dst, 3, 3, 1, 3).unwrap_err();
        assert_eq!(
            err,
            StereoDepthError::InvalidShape {
                reason: "kernel must be at least 3x3"
            }
        );

        let err = padding(&src, &mut dst, 3, 3, 4, 4).unwrap_err();
        assert_eq!(
            err,
            StereoDepthError::InvalidShape {
                reason: "kernel must be square with an odd side"
            }
        );

        let err = padding(&src, &mut [], 3, 3, 3, 3).unwrap_err();
        assert_eq!(err, StereoDepthError::NullBuffer { name: "dst" });

        let err = padding(&src, &mut dst, 3, 3, 3, 3).unwrap_err();
        assert_eq!(
            err,
            StereoDepthError::BufferTooSmall {
                name: "dst",
                needed: 25,
                got: 16
            }
        );
    }
}
