//! Scalar reference operators.

use crate::kernel::{CellOp, Element, Footprint, KernelView};
use crate::shape::Shape3d;
use crate::util::math::abs_diff;

/// Sum of `source * kernel`; out-of-bounds terms are skipped.
pub struct CrossCorrelationOp;

/// Sum of `(source - kernel)^2`; out-of-bounds source samples read as zero.
pub struct SquaredDiffOp;

/// Sum of `|source - kernel|`; out-of-bounds source samples read as zero.
pub struct AbsoluteDiffOp;

/// Folds `f(acc, source, kernel)` over the footprint in row-major order.
///
/// `source` is `None` where the footprint leaves the source.
#[inline]
pub(crate) fn fold_window<T, F>(
    src: &[T],
    src_shape: Shape3d,
    kernel: &KernelView<'_, T>,
    row: i64,
    col: i64,
    mut f: F,
) -> T
where
    T: Element,
    F: FnMut(T, Option<T>, T) -> T,
{
    let fp = Footprint::new(src_shape, kernel);
    let k_data = kernel.data();
    let mut acc = T::zero();
    for row_k in 0..fp.rows {
        let row_src = row + row_k as i64;
        let row_inside = row_src >= 0 && row_src < fp.src_rows;
        let k_row = fp.kernel_base + row_k * fp.kernel_stride;
        for col_k in 0..fp.row_len {
            let col_src = col + col_k as i64;
            let value = if row_inside && col_src >= 0 && col_src < fp.src_row_len {
                Some(src[(row_src * fp.src_row_len + col_src) as usize])
            } else {
                None
            };
            acc = f(acc, value, k_data[k_row + col_k]);
        }
    }
    acc
}

impl<T: Element> CellOp<T> for CrossCorrelationOp {
    const NAME: &'static str = "cross_correlation";

    fn reduce(src: &[T], src_shape: Shape3d, kernel: &KernelView<'_, T>, row: i64, col: i64) -> T {
        fold_window(src, src_shape, kernel, row, col, |acc, value, k| match value {
            Some(value) => acc + value * k,
            None => acc,
        })
    }
}

impl<T: Element> CellOp<T> for SquaredDiffOp {
    const NAME: &'static str = "squared_diff";

    fn reduce(src: &[T], src_shape: Shape3d, kernel: &KernelView<'_, T>, row: i64, col: i64) -> T {
        fold_window(src, src_shape, kernel, row, col, |acc, value, k| {
            let diff = abs_diff(value.unwrap_or_else(T::zero), k);
            acc + diff * diff
        })
    }
}

impl<T: Element> CellOp<T> for AbsoluteDiffOp {
    const NAME: &'static str = "absolute_diff";

    fn reduce(src: &[T], src_shape: Shape3d, kernel: &KernelView<'_, T>, row: i64, col: i64) -> T {
        fold_window(src, src_shape, kernel, row, col, |acc, value, k| {
            acc + abs_diff(value.unwrap_or_else(T::zero), k)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{AbsoluteDiffOp, CrossCorrelationOp, SquaredDiffOp};
    use crate::kernel::{CellOp, KernelView};
    use crate::shape::{Shape2d, Shape3d};

    const SRC: [f64; 9] = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.5];
    const KERNEL: [f64; 4] = [0.0, 0.0, 0.0, 1.0];

    fn view() -> KernelView<'static, f64> {
        KernelView::new(&KERNEL, Shape2d::square(2))
    }

    #[test]
    fn cross_correlation_skips_padding() {
        let shape = Shape3d::new(3, 3, 1);
        // Only the kernel's bottom-right tap lands on src[0][0].
        let value = <CrossCorrelationOp as CellOp<f64>>::reduce(&SRC, shape, &view(), -1, -1);
        assert_eq!(value, 0.0);
        let value = <CrossCorrelationOp as CellOp<f64>>::reduce(&SRC, shape, &view(), 1, 1);
        assert_eq!(value, 8.5);
    }

    #[test]
    fn diffs_treat_padding_as_zero() {
        let shape = Shape3d::new(3, 3, 1);
        // Window covers padding, padding, padding, src[0][0] = 0 against a
        // kernel of 0, 0, 0, 1.
        let ssd = <SquaredDiffOp as CellOp<f64>>::reduce(&SRC, shape, &view(), -1, -1);
        assert_eq!(ssd, 1.0);
        let sad = <AbsoluteDiffOp as CellOp<f64>>::reduce(&SRC, shape, &view(), -1, -1);
        assert_eq!(sad, 1.0);
    }

    #[test]
    fn offset_window_reads_inside_carrier() {
        let carrier = [9i32, 9, 9, 9, 1, 2, 9, 3, 4];
        let kernel = KernelView::with_offset(
            &carrier,
            Shape2d::square(3),
            Shape2d::square(2),
            Shape2d::new(1, 1),
        );
        let src = [1i32, 1, 1, 1];
        let value = <CrossCorrelationOp as CellOp<i32>>::reduce(
            &src,
            Shape3d::new(2, 2, 1),
            &kernel,
            0,
            0,
        );
        assert_eq!(value, 10);
    }

    #[test]
    fn unsigned_differences_do_not_underflow() {
        let src = [1u32, 10];
        let kernel = [4u32, 2];
        let view = KernelView::new(&kernel, Shape2d::new(1, 2));
        let shape = Shape3d::new(1, 2, 1);
        assert_eq!(
            <SquaredDiffOp as CellOp<u32>>::reduce(&src, shape, &view, 0, 0),
            9 + 64
        );
        assert_eq!(
            <AbsoluteDiffOp as CellOp<u32>>::reduce(&src, shape, &view, 0, 0),
            3 + 8
        );
    }
}
