//! Money calculation utilities using rust_decimal for precision
//!
//! Prices are stored as `f64`; every sum runs in `Decimal` and is
//! rounded half-up to 2 places on the way out.

use rust_decimal::prelude::*;

use crate::common::{ServiceError, ServiceResult};

/// Rounding for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Maximum allowed price per item
const MAX_PRICE: f64 = 1_000_000.0;
/// Maximum allowed quantity per line
pub const MAX_QUANTITY: i32 = 9999;

#[inline]
fn require_finite(value: f64, field_name: &str) -> ServiceResult<()> {
    if !value.is_finite() {
        return Err(ServiceError::invalid(format!(
            "{field_name} must be a finite number, got {value}"
        )));
    }
    Ok(())
}

/// Validate a price coming from outside the core.
pub fn validate_price(price: f64, field_name: &str) -> ServiceResult<()> {
    require_finite(price, field_name)?;
    if price < 0.0 {
        return Err(ServiceError::invalid(format!(
            "{field_name} must be non-negative, got {price}"
        )));
    }
    if price > MAX_PRICE {
        return Err(ServiceError::invalid(format!(
            "{field_name} exceeds maximum allowed ({MAX_PRICE}), got {price}"
        )));
    }
    Ok(())
}

/// Validate a line quantity (must be 1..=MAX_QUANTITY).
pub fn validate_quantity(quantity: i32) -> ServiceResult<()> {
    if quantity <= 0 {
        return Err(ServiceError::invalid(format!(
            "quantity must be positive, got {quantity}"
        )));
    }
    if quantity > MAX_QUANTITY {
        return Err(ServiceError::invalid(format!(
            "quantity exceeds maximum allowed ({MAX_QUANTITY}), got {quantity}"
        )));
    }
    Ok(())
}

fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or(Decimal::ZERO)
}

fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Per-unit price of a line: item price plus the selected modifier
/// price overrides.
pub fn unit_price(base_price: f64, option_overrides: impl IntoIterator<Item = f64>) -> f64 {
    let total = option_overrides
        .into_iter()
        .fold(to_decimal(base_price), |acc, o| acc + to_decimal(o));
    round_money(total).to_f64().unwrap_or(0.0)
}

/// Order total over (unit_price, quantity) lines.
pub fn order_total(lines: impl IntoIterator<Item = (f64, i32)>) -> f64 {
    let total = lines.into_iter().fold(Decimal::ZERO, |acc, (unit, qty)| {
        acc + to_decimal(unit) * Decimal::from(qty)
    });
    round_money(total).to_f64().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_price_includes_overrides() {
        assert_eq!(unit_price(9.50, [2.00, 0.50]), 12.00);
        assert_eq!(unit_price(9.50, []), 9.50);
    }

    #[test]
    fn totals_avoid_float_drift() {
        // 0.1 + 0.2 style drift must not leak into totals.
        let total = order_total([(0.10, 1), (0.20, 1)]);
        assert_eq!(total, 0.30);

        let total = order_total([(19.99, 3), (2.50, 2)]);
        assert_eq!(total, 64.97);
    }

    #[test]
    fn validation_bounds() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(MAX_QUANTITY).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(MAX_QUANTITY + 1).is_err());

        assert!(validate_price(0.0, "price").is_ok());
        assert!(validate_price(-1.0, "price").is_err());
        assert!(validate_price(f64::NAN, "price").is_err());
        assert!(validate_price(2_000_000.0, "price").is_err());
    }
}
