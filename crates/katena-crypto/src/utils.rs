//! Constant-time comparison helpers.
//!
//! Private key equality goes through these so that comparing secrets
//! does not leak the position of the first differing byte.

use constant_time_eq::constant_time_eq;

/// Compare two byte slices in constant time.
///
/// Slices of different length compare unequal.
///
/// ```rust
/// use katena_crypto::utils::constant_time_compare;
///
/// assert!(constant_time_compare(&[0u8; 64], &[0u8; 64]));
/// assert!(!constant_time_compare(&[0u8; 64], &[1u8; 64]));
/// ```
pub fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    constant_time_eq(a, b)
}
