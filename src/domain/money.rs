//! Point to dollar conversion.
//!
//! 1000 points settle for $5. Amounts are rounded to cents with ties going to
//! the even cent, so `1` point (half a cent) settles for `0.00`.

use super::Decimal;

/// Points per settlement unit.
pub const POINTS_PER_UNIT: i64 = 1000;

/// Dollars paid per settlement unit.
pub const DOLLARS_PER_UNIT: i64 = 5;

/// Convert a point value to its dollar amount: `round(points / 1000 * 5, 2)`.
pub fn points_to_dollars(points: i64) -> Decimal {
    // points / 1000 * 5 == points / 200; the quotient terminates, so this is exact before rounding.
    Decimal::ratio(points, POINTS_PER_UNIT / DOLLARS_PER_UNIT).round_half_even(2)
}

/// Whole settlement units earned, floored toward negative infinity.
pub fn pots_earned(points: i64) -> i64 {
    points.div_euclid(POINTS_PER_UNIT)
}
