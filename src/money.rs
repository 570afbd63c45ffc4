//! Prices are kept as `i64` minor units (cents) in the store and in every
//! calculation. They become [`Decimal`] only at the API boundary.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};

use crate::error::{AppError, AppResult};

pub const SCALE: u32 = 2;

pub fn to_decimal(cents: i64) -> Decimal {
    Decimal::new(cents, SCALE)
}

/// Converts a client-supplied price to cents. Rejects negative amounts and
/// anything finer than a cent.
pub fn to_cents(amount: Decimal) -> AppResult<i64> {
    if amount < Decimal::ZERO {
        return Err(AppError::BadRequest("price must not be negative".into()));
    }
    if amount.normalize().scale() > SCALE {
        return Err(AppError::BadRequest(
            "price must have at most 2 decimal places".into(),
        ));
    }
    (amount * Decimal::ONE_HUNDRED)
        .to_i64()
        .ok_or_else(|| AppError::BadRequest("price is out of range".into()))
}

pub fn line_total(unit_cents: i64, quantity: i32) -> AppResult<i64> {
    unit_cents
        .checked_mul(i64::from(quantity))
        .ok_or_else(|| AppError::BadRequest("total price is out of range".into()))
}

/// Mean ticket in currency units, rounded half away from zero. Zero when
/// there is nothing to average.
pub fn average(total_cents: i64, count: i64) -> Decimal {
    if count <= 0 {
        return to_decimal(0);
    }
    let mut avg = (to_decimal(total_cents) / Decimal::from(count))
        .round_dp_with_strategy(SCALE, RoundingStrategy::MidpointAwayFromZero);
    avg.rescale(SCALE);
    avg
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn converts_prices_to_cents() {
        assert_eq!(to_cents(dec("10.00")).unwrap(), 1000);
        assert_eq!(to_cents(dec("0.1")).unwrap(), 10);
        assert_eq!(to_cents(dec("19.990")).unwrap(), 1999);
        assert_eq!(to_cents(Decimal::ZERO).unwrap(), 0);
    }

    #[test]
    fn rejects_negative_and_sub_cent_prices() {
        assert!(matches!(to_cents(dec("-1")), Err(AppError::BadRequest(_))));
        assert!(matches!(to_cents(dec("1.005")), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn cents_render_with_two_places() {
        assert_eq!(to_decimal(3000).to_string(), "30.00");
        assert_eq!(to_decimal(5).to_string(), "0.05");
    }

    #[test]
    fn line_total_detects_overflow() {
        assert_eq!(line_total(1000, 3).unwrap(), 3000);
        assert!(line_total(i64::MAX, 2).is_err());
    }

    #[test]
    fn average_of_nothing_is_zero() {
        assert_eq!(average(0, 0), Decimal::ZERO);
        assert_eq!(average(0, 0).to_string(), "0.00");
    }

    #[test]
    fn average_rounds_half_away_from_zero() {
        // 10.00 / 3 = 3.333...
        assert_eq!(average(1000, 3).to_string(), "3.33");
        // 0.05 / 2 = 0.025
        assert_eq!(average(5, 2).to_string(), "0.03");
        assert_eq!(average(3000, 1).to_string(), "30.00");
    }
}
