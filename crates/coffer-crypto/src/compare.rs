//! Constant-time byte comparison.

use subtle::{Choice, ConstantTimeEq};

/// Compare two byte strings without data-dependent early exit.
///
/// Every byte of the common prefix is compared and folded into one
/// [`Choice`]; the length check is folded in last, after the loop has run.
/// `Choice` arithmetic is opaque to the optimizer, so the loop cannot be
/// turned back into a short-circuiting comparison.
///
/// Lengths themselves are not hidden. The provider's `timing_safe_equal`
/// compares fixed-size MACs of its inputs, which hides them.
#[must_use]
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    let mut equal = Choice::from(1u8);
    for (x, y) in a.iter().zip(b.iter()) {
        equal &= x.ct_eq(y);
    }
    let a_len = u64::try_from(a.len()).unwrap_or(u64::MAX);
    let b_len = u64::try_from(b.len()).unwrap_or(u64::MAX);
    equal &= a_len.ct_eq(&b_len);
    bool::from(equal)
}
