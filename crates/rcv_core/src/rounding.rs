//! Display rounding and weight comparisons for fractional (STV) tallies.
//!
//! - Decisions always use unrounded values; rounding is for reporting only.
//! - A ballot weight at or below `WEIGHT_EPSILON` is treated as spent.
//! - A weighted tally within `QUOTA_TOLERANCE` below a quota reaches it.

/// Ballot weights at or below this are discarded after a surplus transfer.
pub const WEIGHT_EPSILON: f64 = 0.001;

/// Slack for float accumulation when comparing a weighted tally to a quota.
pub const QUOTA_TOLERANCE: f64 = 1e-9;

/// Decimal places kept in displayed weighted tallies.
pub const DISPLAY_DECIMALS: i32 = 2;

/// Round a weighted tally for display (half away from zero, 2 dp).
#[inline]
pub fn round_display(x: f64) -> f64 {
    let scale = 10f64.powi(DISPLAY_DECIMALS);
    (x * scale).round() / scale
}

/// True if a ballot weight still carries value.
#[inline]
pub fn weight_is_live(w: f64) -> bool {
    w > WEIGHT_EPSILON
}

/// True if a weighted tally meets `quota`. Fractional transfers such as
/// 7 x (3/7) sum to just under 3.0, which still counts as 3.
#[inline]
pub fn reaches_quota(tally: f64, quota: u64) -> bool {
    tally + QUOTA_TOLERANCE >= quota as f64
}

/// `floor(x)` as an integer count; negative/NaN inputs clamp to 0.
#[inline]
pub fn floor_to_u64(x: f64) -> u64 {
    if x.is_nan() || x <= 0.0 {
        0
    } else {
        x.floor() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_rounding_two_places() {
        assert_eq!(round_display(3.0000000000000004), 3.0);
        assert_eq!(round_display(1.666_666), 1.67);
        assert_eq!(round_display(0.125), 0.13);
        assert_eq!(round_display(7.0), 7.0);
    }

    #[test]
    fn epsilon_boundary() {
        assert!(weight_is_live(0.6));
        assert!(!weight_is_live(0.001));
        assert!(!weight_is_live(0.0));
    }

    #[test]
    fn quota_allows_accumulation_error() {
        let seven_thirds: f64 = (0..7).map(|_| 3.0 / 7.0).sum();
        assert!(reaches_quota(seven_thirds, 3));
        assert!(reaches_quota(3.0, 3));
        assert!(!reaches_quota(2.99, 3));
    }

    #[test]
    fn floor_clamps() {
        assert_eq!(floor_to_u64(5.0 / 3.0), 1);
        assert_eq!(floor_to_u64(-1.0), 0);
        assert_eq!(floor_to_u64(f64::NAN), 0);
    }
}
