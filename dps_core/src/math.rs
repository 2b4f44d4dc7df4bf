//! Truncating integer helpers matching the game's combat arithmetic

/// A rational multiplier `(numerator, denominator)` applied with truncation
pub type Factor = (i32, i32);

/// Multiply by a factor and truncate toward zero
///
/// Intermediate products are widened to `i64` so large rolls times large
/// numerators never overflow.
pub fn apply_factor(value: i32, factor: Factor) -> i32 {
    let (num, den) = factor;
    ((value as i64 * num as i64) / den as i64) as i32
}

/// Linear interpolation, truncated once at the end
///
/// Maps `cur` in `[in_min, in_max]` onto `[out_min, out_max]`.
pub fn lerp(cur: i32, in_min: i32, in_max: i32, out_min: i32, out_max: i32) -> i32 {
    if in_max == in_min {
        return out_min;
    }
    let norm = (cur - in_min) as f64 * (out_max - out_min) as f64 / (in_max - in_min) as f64;
    (norm + out_min as f64).trunc() as i32
}

/// Truncating integer square root
pub fn isqrt(n: i32) -> i32 {
    if n <= 0 {
        return 0;
    }
    let mut x = (n as f64).sqrt() as i64;
    let n = n as i64;
    while x * x > n {
        x -= 1;
    }
    while (x + 1) * (x + 1) <= n {
        x += 1;
    }
    x as i32
}

/// `value` percent of `base`, truncated
pub fn percent_of(base: i32, value: i32) -> i32 {
    apply_factor(base, (value, 100))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_factor_truncates() {
        assert_eq!(apply_factor(5, (5, 4)), 6);
        assert_eq!(apply_factor(3, (1, 5)), 0);
        assert_eq!(apply_factor(-7, (1, 2)), -3);
    }

    #[test]
    fn test_apply_factor_large_values() {
        assert_eq!(apply_factor(40_000, (250_000, 1_000)), 10_000_000);
    }

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(50, 0, 100, 0, 10), 5);
        assert_eq!(lerp(0, 0, 100, 215, 145), 215);
        assert_eq!(lerp(100, 0, 100, 215, 145), 145);
        // 215 - 46.7 truncates after the offset is added
        assert_eq!(lerp(233, 700, 0, 215, 145), 168);
    }

    #[test]
    fn test_isqrt() {
        assert_eq!(isqrt(0), 0);
        assert_eq!(isqrt(15), 3);
        assert_eq!(isqrt(16), 4);
        assert_eq!(isqrt(126), 11);
    }

    #[test]
    fn test_percent_of() {
        assert_eq!(percent_of(250, 35), 87);
    }
}
