//! Constant-time comparison.

/// Compares two byte strings without short-circuiting on the first
/// mismatch. Inputs of different length are rejected up front; only the
/// length is observable through timing.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}
