//! Display helpers for registry values.

use crate::member::{BlockNumber, MemberIndex, Weight};

const MILLION: u128 = 1_000_000;
const THOUSAND: u128 = 1_000;

/// Render a weight as `1.2M`, `45.0K` or a plain integer.
///
/// Values are rounded half away from zero at one decimal place, in integer
/// arithmetic.
pub fn format_weight(weight: u128) -> String {
    if weight >= MILLION {
        format!("{}M", tenths(weight, MILLION))
    } else if weight >= THOUSAND {
        format!("{}K", tenths(weight, THOUSAND))
    } else {
        weight.to_string()
    }
}

/// `value / unit` rounded to whole tenths.
fn scaled_tenths(value: u128, unit: u128) -> u128 {
    // split first so the scaling cannot overflow
    (value / unit) * 10 + (value % unit * 10 + unit / 2) / unit
}

fn tenths(value: u128, unit: u128) -> String {
    let scaled = scaled_tenths(value, unit);
    format!("{}.{}", scaled / 10, scaled % 10)
}

/// Render a stats total in millions at one decimal, `850000` as `0.9M`.
///
/// Whole values drop the decimal: `1M`, `0M`.
pub fn format_millions(value: u128) -> String {
    let scaled = scaled_tenths(value, MILLION);
    if scaled % 10 == 0 {
        format!("{}M", scaled / 10)
    } else {
        format!("{}.{}M", scaled / 10, scaled % 10)
    }
}

/// Render a stats average as whole thousands, `425000.5` as `425K`.
pub fn format_thousands(value: f64) -> String {
    format!("{}K", (value / THOUSAND as f64).round())
}

/// `Member #0007`
pub fn member_label(index: MemberIndex) -> String {
    format!("Member #{index:04}")
}

/// `Block #18,567,890`
pub fn format_block(block: BlockNumber) -> String {
    let digits = block.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!("Block #{grouped}")
}

/// Width of the voting power bar, as a percentage of one million.
pub fn voting_power_percent(weight: Weight) -> f64 {
    (weight as f64 / MILLION as f64 * 100.0).min(100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_weight() {
        assert_eq!(format_weight(0), "0");
        assert_eq!(format_weight(999), "999");
        assert_eq!(format_weight(1_000), "1.0K");
        assert_eq!(format_weight(45_000), "45.0K");
        assert_eq!(format_weight(95_050), "95.1K");
        assert_eq!(format_weight(850_000), "850.0K");
        assert_eq!(format_weight(1_000_000), "1.0M");
        assert_eq!(format_weight(3_705_000), "3.7M");
    }

    #[test]
    fn test_rounds_half_away_from_zero() {
        assert_eq!(format_weight(1_250_000), "1.3M");
        assert_eq!(format_weight(1_249_999), "1.2M");
        assert_eq!(format_weight(1_050), "1.1K");
        // still below the million threshold
        assert_eq!(format_weight(999_950), "1000.0K");
    }

    #[test]
    fn test_stats_formats() {
        assert_eq!(format_millions(850_000), "0.9M");
        assert_eq!(format_millions(0), "0M");
        assert_eq!(format_millions(1_000_000), "1M");
        assert_eq!(format_millions(2_000_000), "2M");
        assert_eq!(format_millions(1_960_000), "2M");
        assert_eq!(format_millions(3_705_000), "3.7M");
        assert_eq!(format_thousands(850_000.0), "850K");
        assert_eq!(format_thousands(370_500.0), "371K");
        assert_eq!(format_thousands(0.0), "0K");
    }

    #[test]
    fn test_largest_weights_do_not_overflow() {
        // u128::MAX ends in ...211455, which rounds to .2 millions
        let expected = format!("{}.2M", u128::MAX / MILLION);

        assert_eq!(format_weight(u128::MAX), expected);
        assert_eq!(format_millions(u128::MAX), expected);
        assert_eq!(format_weight(u128::MAX / 10 + 1).chars().last(), Some('M'));
    }

    #[test]
    fn test_member_label() {
        assert_eq!(member_label(7), "Member #0007");
        assert_eq!(member_label(12345), "Member #12345");
    }

    #[test]
    fn test_format_block() {
        assert_eq!(format_block(0), "Block #0");
        assert_eq!(format_block(999), "Block #999");
        assert_eq!(format_block(1_000), "Block #1,000");
        assert_eq!(format_block(18_567_890), "Block #18,567,890");
    }

    #[test]
    fn test_voting_power_percent() {
        assert_eq!(voting_power_percent(0), 0.0);
        assert_eq!(voting_power_percent(500_000), 50.0);
        assert_eq!(voting_power_percent(2_000_000), 100.0);
    }
}
