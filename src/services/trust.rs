// src/services/trust.rs
// DOCUMENTATION: Trust level computation
// PURPOSE: Derive a user's trust tier from their approval history and
// bound the amount they may request

use rust_decimal::Decimal;

/// Trust tier bands keyed by approved-application count.
/// Each entry: (minimum approved count, level, max request amount in RUB).
const TRUST_TABLE: &[(i64, u8, i64)] = &[
    (10, 5, 100_000),
    (5, 4, 50_000),
    (3, 3, 25_000),
    (1, 2, 10_000),
    (0, 1, 5_000),
];

/// Trust level for a count of approved applications
pub fn trust_level(approved_count: i64) -> u8 {
    for (min_count, level, _) in TRUST_TABLE {
        if approved_count >= *min_count {
            return *level;
        }
    }
    1
}

/// Maximum amount a user at the given approval count may request
pub fn max_request_amount(approved_count: i64) -> Decimal {
    for (min_count, _, max_amount) in TRUST_TABLE {
        if approved_count >= *min_count {
            return Decimal::from(*max_amount);
        }
    }
    Decimal::from(TRUST_TABLE[TRUST_TABLE.len() - 1].2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trust_level_bands() {
        assert_eq!(trust_level(0), 1);
        assert_eq!(trust_level(1), 2);
        assert_eq!(trust_level(2), 2);
        assert_eq!(trust_level(3), 3);
        assert_eq!(trust_level(4), 3);
        assert_eq!(trust_level(5), 4);
        assert_eq!(trust_level(9), 4);
        assert_eq!(trust_level(10), 5);
        assert_eq!(trust_level(100), 5);
    }

    #[test]
    fn test_max_amount_bands() {
        assert_eq!(max_request_amount(0), Decimal::from(5_000));
        assert_eq!(max_request_amount(2), Decimal::from(10_000));
        assert_eq!(max_request_amount(4), Decimal::from(25_000));
        assert_eq!(max_request_amount(9), Decimal::from(50_000));
        assert_eq!(max_request_amount(10), Decimal::from(100_000));
    }

    #[test]
    fn test_negative_count_clamps_to_lowest_band() {
        assert_eq!(trust_level(-1), 1);
        assert_eq!(max_request_amount(-1), Decimal::from(5_000));
    }
}
