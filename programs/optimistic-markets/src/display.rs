//! Approximate figures for rendering only.
//!
//! Floating point is allowed here and nowhere else; settlement amounts come
//! from [`crate::settlement`] exclusively.

use crate::constants::TOKEN_DECIMALS;
use crate::state::Market;

/// Token base units to whole tokens.
pub fn from_base_units(amount: u64) -> f64 {
    amount as f64 / 10f64.powi(TOKEN_DECIMALS as i32)
}

/// Two-decimal token amount, e.g. `"12.50"`.
pub fn format_amount(amount: u64) -> String {
    format!("{:.2}", from_base_units(amount))
}

/// Compact volume: `"1.2m"`, `"3.4k"`, or `"12.34"`.
pub fn format_volume(amount: u64) -> String {
    let volume = from_base_units(amount);
    if volume >= 1_000_000.0 {
        format!("{:.1}m", volume / 1_000_000.0)
    } else if volume >= 1_000.0 {
        format!("{:.1}k", volume / 1_000.0)
    } else {
        format!("{:.2}", volume)
    }
}

/// Percentage of volume on option A, 50 when nothing is traded.
pub fn option_a_share(market: &Market) -> f64 {
    let total = market.total_option_a_shares as f64 + market.total_option_b_shares as f64;
    if total > 0.0 {
        market.total_option_a_shares as f64 / total * 100.0
    } else {
        50.0
    }
}

/// Whole-percent labels for the progress bar, floored on both sides.
pub fn split_labels(market: &Market) -> (u8, u8) {
    let a = option_a_share(market);
    (a.floor() as u8, (100.0 - a).floor() as u8)
}

/// Rounded chance of option A; 0 when nothing is traded.
pub fn chance_percent(market: &Market) -> u8 {
    if market.total_volume() == 0 {
        return 0;
    }
    option_a_share(market).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pools(a: u64, b: u64) -> Market {
        Market {
            total_option_a_shares: a,
            total_option_b_shares: b,
            ..Default::default()
        }
    }

    #[test]
    fn test_amount_formatting() {
        assert_eq!(format_amount(12_500_000), "12.50");
        assert_eq!(format_amount(0), "0.00");
        assert_eq!(format_volume(999_990_000), "999.99");
        assert_eq!(format_volume(1_500_000_000), "1.5k");
        assert_eq!(format_volume(2_300_000_000_000), "2.3m");
    }

    #[test]
    fn test_percentages() {
        assert_eq!(chance_percent(&pools(0, 0)), 0);
        assert_eq!(split_labels(&pools(0, 0)), (50, 50));

        assert_eq!(chance_percent(&pools(2, 1)), 67);
        assert_eq!(split_labels(&pools(2, 1)), (66, 33));
        assert_eq!(chance_percent(&pools(1, 0)), 100);
    }
}
