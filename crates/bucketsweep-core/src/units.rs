//! Size unit conversions used throughout the reports.
//!
//! Reports quote sizes in binary megabytes and gigabytes rounded to two
//! decimals. Rounding happens at the edges so intermediate sums keep their
//! precision until the caller decides to round.

/// Bytes per binary megabyte.
pub const BYTES_PER_MB: u64 = 1024 * 1024;

/// Bytes per binary gigabyte.
pub const BYTES_PER_GB: u64 = 1024 * 1024 * 1024;

/// Round a value to two decimal places, exact halves to even.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Convert bytes to megabytes, rounded to two decimals.
pub fn bytes_to_mb(bytes: u64) -> f64 {
    round2(bytes as f64 / BYTES_PER_MB as f64)
}

/// Convert bytes to gigabytes, rounded to two decimals.
pub fn bytes_to_gb(bytes: u64) -> f64 {
    round2(bytes as f64 / BYTES_PER_GB as f64)
}

/// Size in hundredths of a megabyte.
///
/// Integer form of [`bytes_to_mb`], usable as a hash key.
pub fn mb_hundredths(bytes: u64) -> u64 {
    (bytes as f64 * 100.0 / BYTES_PER_MB as f64).round_ties_even() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(1.234), 1.23);
        assert_eq!(round2(1.236), 1.24);
        assert_eq!(round2(0.0), 0.0);
    }

    #[test]
    fn test_bytes_to_mb() {
        assert_eq!(bytes_to_mb(10 * BYTES_PER_MB), 10.0);
        assert_eq!(bytes_to_mb(BYTES_PER_MB / 2), 0.5);
        assert_eq!(bytes_to_mb(0), 0.0);
    }

    #[test]
    fn test_bytes_to_gb() {
        assert_eq!(bytes_to_gb(BYTES_PER_GB), 1.0);
        assert_eq!(bytes_to_gb(3 * BYTES_PER_GB / 2), 1.5);
        assert_eq!(bytes_to_gb(BYTES_PER_MB), 0.0);
    }

    #[test]
    fn test_mb_hundredths_matches_rounded_mb() {
        assert_eq!(mb_hundredths(10 * BYTES_PER_MB), 1000);
        // 1000 bytes and 1001 bytes both round to 0.00 MB
        assert_eq!(mb_hundredths(1000), mb_hundredths(1001));
        assert_ne!(mb_hundredths(BYTES_PER_MB), mb_hundredths(2 * BYTES_PER_MB));
    }

    #[test]
    fn test_exact_halves_round_to_even() {
        // 128 KiB is exactly 0.125 MB, 384 KiB exactly 0.375 MB
        assert_eq!(bytes_to_mb(128 * 1024), 0.12);
        assert_eq!(mb_hundredths(128 * 1024), 12);
        assert_eq!(bytes_to_mb(384 * 1024), 0.38);
        assert_eq!(mb_hundredths(384 * 1024), 38);
        assert_eq!(round2(0.125), 0.12);
    }
}
