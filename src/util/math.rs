//! Numeric helpers shared by the slide engine and the legacy matchers.

/// Returns the index of the first maximum element, or `None` for an empty
/// slice.
///
/// Elements that do not compare (NaN) never become the maximum unless they
/// sit at index 0.
pub fn argmax<T: PartialOrd>(src: &[T]) -> Option<usize> {
    let mut iter = src.iter().enumerate();
    let (mut best_idx, mut best) = iter.next()?;
    for (idx, value) in iter {
        if value > best {
            best = value;
            best_idx = idx;
        }
    }
    Some(best_idx)
}

/// Absolute difference without requiring `Neg`, so unsigned types work too.
#[inline]
pub(crate) fn abs_diff<T>(a: T, b: T) -> T
where
    T: Copy + PartialOrd + std::ops::Sub<Output = T>,
{
    if a > b {
        a - b
    } else {
        b - a
    }
}
