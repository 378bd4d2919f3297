//! Money calculation utilities using rust_decimal for precision
//!
//! All monetary arithmetic is done with `Decimal` internally; `f64` appears
//! only at the storage/serialization boundary, rounded half-up to two
//! decimal places.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use shared::AppError;
use shared::models::OrderItem;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Maximum allowed price per dish (€1,000,000)
const MAX_PRICE: f64 = 1_000_000.0;
/// Maximum allowed quantity per order line
const MAX_QUANTITY: i32 = 9999;

/// Round a decimal to money precision
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Validate that a f64 value is finite (not NaN, not Infinity)
#[inline]
fn require_finite(value: f64, field_name: &str) -> Result<(), AppError> {
    if !value.is_finite() {
        return Err(AppError::validation(format!(
            "{} must be a finite number, got {}",
            field_name, value
        )));
    }
    Ok(())
}

/// Validate a dish price before persisting
pub fn validate_price(price: f64) -> Result<(), AppError> {
    require_finite(price, "price")?;
    if price <= 0.0 {
        return Err(AppError::validation(format!(
            "price must be positive, got {}",
            price
        )));
    }
    if price > MAX_PRICE {
        return Err(AppError::validation(format!(
            "price exceeds maximum allowed ({}), got {}",
            MAX_PRICE, price
        )));
    }
    Ok(())
}

/// Validate an order line quantity
pub fn validate_quantity(quantity: i32) -> Result<(), AppError> {
    if quantity < 1 {
        return Err(AppError::validation(format!(
            "quantity must be at least 1, got {}",
            quantity
        )));
    }
    if quantity > MAX_QUANTITY {
        return Err(AppError::validation(format!(
            "quantity exceeds maximum allowed ({}), got {}",
            MAX_QUANTITY, quantity
        )));
    }
    Ok(())
}

/// Line total for one snapshot item: unit_price × quantity
pub fn line_total(unit_price: f64, quantity: i32) -> Decimal {
    let price = Decimal::from_f64(unit_price).unwrap_or_default();
    round_money(price * Decimal::from(quantity))
}

/// Order total: sum of item line totals, rounded to money precision
pub fn order_total(items: &[OrderItem]) -> f64 {
    let total: Decimal = items
        .iter()
        .map(|item| line_total(item.unit_price, item.quantity))
        .sum();
    round_money(total).to_f64().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(unit_price: f64, quantity: i32) -> OrderItem {
        OrderItem {
            id: 1,
            order_id: 1,
            dish_id: 1,
            dish_name: "Test".to_string(),
            unit_price,
            quantity,
        }
    }

    #[test]
    fn test_order_total_exact_decimal() {
        // 10.00 × 2 + 6.00 × 1 = 26.00 exactly
        let items = [item(10.00, 2), item(6.00, 1)];
        assert_eq!(order_total(&items), 26.00);
    }

    #[test]
    fn test_order_total_no_float_drift() {
        // 0.1 + 0.2 style inputs must not accumulate binary-float error
        let items = [item(0.10, 3), item(0.20, 1)];
        assert_eq!(order_total(&items), 0.50);
    }

    #[test]
    fn test_line_total_rounds_half_up() {
        // 0.125 is exact in binary; the midpoint rounds away from zero
        assert_eq!(line_total(0.125, 1), Decimal::new(13, 2));
    }

    #[test]
    fn test_price_validation() {
        assert!(validate_price(9.90).is_ok());
        assert!(validate_price(0.0).is_err());
        assert!(validate_price(-1.0).is_err());
        assert!(validate_price(f64::NAN).is_err());
        assert!(validate_price(f64::INFINITY).is_err());
        assert!(validate_price(2_000_000.0).is_err());
    }

    #[test]
    fn test_quantity_validation() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-2).is_err());
        assert!(validate_quantity(10_000).is_err());
    }
}
