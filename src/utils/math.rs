//! Mathematical utility functions.

/// Checks if a value is a power of two and returns the exponent.
///
/// Returns `Some(n)` if `value == 2^n`, `None` otherwise.
/// Only works for positive values.
///
/// # Examples
///
/// ```rust
/// use memlayout::utils::is_power_of_two;
///
/// assert_eq!(is_power_of_two(1), Some(0));   // 2^0 = 1
/// assert_eq!(is_power_of_two(8), Some(3));   // 2^3 = 8
/// assert_eq!(is_power_of_two(0), None);
/// assert_eq!(is_power_of_two(-8), None);
/// assert_eq!(is_power_of_two(6), None);
/// ```
#[must_use]
#[allow(clippy::cast_sign_loss)] // value > 0 verified above
#[allow(clippy::cast_possible_truncation)] // trailing_zeros <= 63 for u64
pub fn is_power_of_two(value: i64) -> Option<u8> {
    if value <= 0 {
        return None;
    }
    let value = value as u64;
    if value.is_power_of_two() {
        Some(value.trailing_zeros() as u8)
    } else {
        None
    }
}

/// Returns true if `value` is a whole power of two within `[minimum, maximum]`.
///
/// Every size in a layout (block length, field length, string length, array capacity and the
/// derived total length) is restricted to this shape, which is what makes natural alignment and
/// the byte-range arithmetic of the memory map exact.
#[must_use]
pub fn is_power_of_two_in_range(value: i64, minimum: i64, maximum: i64) -> bool {
    value >= minimum && value <= maximum && is_power_of_two(value).is_some()
}

/// Rounds `value` up to the next multiple of `alignment`.
///
/// `alignment` must be positive; layouts only ever align to their own power-of-two length.
#[must_use]
pub fn align_up(value: i64, alignment: i64) -> i64 {
    debug_assert!(alignment > 0);
    let remainder = value.rem_euclid(alignment);
    if remainder == 0 {
        value
    } else {
        value + (alignment - remainder)
    }
}

/// Smallest power of two that is `>= value`, with a floor of 1.
#[must_use]
#[allow(clippy::cast_sign_loss)] // value > 1 verified above
#[allow(clippy::cast_possible_wrap)] // layouts are bounded far below i64::MAX
pub fn next_power_of_two(value: i64) -> i64 {
    if value <= 1 {
        return 1;
    }
    (value as u64).next_power_of_two() as i64
}
