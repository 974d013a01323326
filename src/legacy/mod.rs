//! Row-strip matching utilities that predate the generic slide engine.
//!
//! These functions solve one narrow problem: for two equal-height row
//! strips, find the horizontal shift at which a square window of one strip
//! has the largest dot product with the other. They only handle single
//! channel, unit stride and no implicit padding; [`padding`] produces an
//! explicitly zero-bordered copy instead.
//!
//! Inputs are checked in a fixed order (kernel size, source size, source
//! against kernel, empty buffers, destination) and the first failing check
//! is returned. Nothing is written on error.

mod argmax_corr;
mod padding;

pub use argmax_corr::{argmax_corr, argmax_corr_mat, argmax_corr_vector};
pub use padding::{padding, padding_with_dst};

use crate::trace::trace_event;
use crate::util::{StereoDepthError, StereoDepthResult};

/// Smallest accepted kernel side.
pub const KERNEL_LIMIT: usize = 3;

/// Rejects a buffer shorter than `needed`.
fn check_buffer<T>(name: &'static str, buf: &[T], needed: usize) -> StereoDepthResult<()> {
    if buf.len() < needed {
        return Err(StereoDepthError::BufferTooSmall {
            name,
            needed,
            got: buf.len(),
        });
    }
    Ok(())
}

fn check_not_empty<T>(name: &'static str, buf: &[T]) -> StereoDepthResult<()> {
    if buf.is_empty() {
        Err(StereoDepthError::NullBuffer { name })
    } else {
        Ok(())
    }
}

/// Logs a validation failure and passes it through.
fn rejected<T>(op: &'static str, result: StereoDepthResult<T>) -> StereoDepthResult<T> {
    if let Err(err) = &result {
        let message = err.to_string();
        trace_event!(warn, "legacy_rejected", op = op, error = message.as_str());
    }
    result
}
