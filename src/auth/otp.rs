use rand::rngs::OsRng;
use rand::Rng;

/// Six-digit numeric passcode, zero-padded, drawn uniformly from
/// [100000, 999999] using the OS random source.
pub fn generate_numeric_otp() -> String {
    let code: u32 = OsRng.gen_range(100_000..=999_999);
    format!("{code:06}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn otp_is_six_numeric_digits_in_range() {
        for _ in 0..1000 {
            let otp = generate_numeric_otp();
            assert_eq!(otp.len(), 6);
            assert!(otp.chars().all(|c| c.is_ascii_digit()));
            let n: u32 = otp.parse().expect("otp should parse as a number");
            assert!((100_000..=999_999).contains(&n));
        }
    }

    #[test]
    fn otp_distribution_covers_the_range() {
        // Bucket by leading digit; a uniform draw over [100000, 999999]
        // spreads evenly across the nine buckets.
        let samples = 9_000;
        let mut buckets = [0u32; 9];
        for _ in 0..samples {
            let otp = generate_numeric_otp();
            let lead = otp.as_bytes()[0] - b'1';
            buckets[lead as usize] += 1;
        }
        for count in buckets {
            // Expected ~1000 per bucket.
            assert!(count > 600, "skewed leading-digit distribution: {buckets:?}");
        }
    }
}
