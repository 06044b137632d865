//! Money calculation utilities using rust_decimal for precision
//!
//! All fee arithmetic is done in `Decimal` internally, then converted to
//! `f64` for storage/serialization. Fees are stored at full precision;
//! rounding to 2 decimal places is display-only.

use crate::cart::{Cart, CartLine};
use crate::settlement::SettlementError;
use rust_decimal::prelude::*;

/// Rounding for displayed monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Maximum allowed price per item (€1,000,000)
const MAX_PRICE: f64 = 1_000_000.0;
/// Maximum allowed quantity per line
const MAX_QUANTITY: i64 = 9999;

/// The three amounts a settlement moves.
///
/// `original_fee` is the cart subtotal S (the restaurant receives exactly S);
/// `service_fee` is the platform's cut layered on top: S × 15/85, so the
/// service fee is 15% of the grand total the customer pays.
/// `total_fee = original_fee + service_fee`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeeSplit {
    pub original_fee: f64,
    pub service_fee: f64,
    pub total_fee: f64,
}

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 at full precision (fee storage)
#[inline]
pub fn to_f64_exact(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}

/// Convert Decimal back to f64 rounded to 2 decimal places (display)
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Validate a f64 value is finite (not NaN, not Infinity)
#[inline]
fn require_finite(value: f64, field_name: &str) -> Result<(), SettlementError> {
    if !value.is_finite() {
        return Err(SettlementError::InvalidOperation(format!(
            "{} must be a finite number, got {}",
            field_name, value
        )));
    }
    Ok(())
}

/// Validate a cart line before settlement
pub fn validate_cart_line(line: &CartLine) -> Result<(), SettlementError> {
    require_finite(line.price, "price")?;
    if line.price < 0.0 {
        return Err(SettlementError::InvalidOperation(format!(
            "price must be non-negative, got {}",
            line.price
        )));
    }
    if line.price > MAX_PRICE {
        return Err(SettlementError::InvalidOperation(format!(
            "price exceeds maximum allowed ({}), got {}",
            MAX_PRICE, line.price
        )));
    }
    if line.quantity <= 0 {
        return Err(SettlementError::InvalidOperation(format!(
            "quantity must be positive, got {}",
            line.quantity
        )));
    }
    if line.quantity > MAX_QUANTITY {
        return Err(SettlementError::InvalidOperation(format!(
            "quantity exceeds maximum allowed ({}), got {}",
            MAX_QUANTITY, line.quantity
        )));
    }
    Ok(())
}

/// Validate a standalone payment amount (top-up, cashback)
pub fn validate_amount(amount: f64) -> Result<(), SettlementError> {
    require_finite(amount, "amount")?;
    if amount <= 0.0 {
        return Err(SettlementError::InvalidOperation(format!(
            "amount must be positive, got {}",
            amount
        )));
    }
    if amount > MAX_PRICE {
        return Err(SettlementError::InvalidOperation(format!(
            "amount exceeds maximum allowed ({}), got {}",
            MAX_PRICE, amount
        )));
    }
    Ok(())
}

/// Cart subtotal with precise decimal arithmetic: Σ price × quantity
pub fn cart_subtotal(cart: &Cart) -> Decimal {
    cart.lines()
        .map(|l| to_decimal(l.price) * Decimal::from(l.quantity))
        .sum()
}

/// Compute the fee split for a subtotal S.
///
/// service_fee = S × 15/85; total = S × 100/85. The restaurant still
/// receives exactly S after the platform's cut is layered on top rather
/// than deducted from S.
pub fn split_subtotal(subtotal: Decimal) -> FeeSplit {
    let service = subtotal * Decimal::from(15) / Decimal::from(85);
    FeeSplit {
        original_fee: to_f64_exact(subtotal),
        service_fee: to_f64_exact(service),
        total_fee: to_f64_exact(subtotal + service),
    }
}

/// Compare two monetary values for equality (within 0.01 tolerance)
pub fn money_eq(a: f64, b: f64) -> bool {
    let diff = (to_decimal(a) - to_decimal(b)).abs();
    diff < MONEY_TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::Item;

    fn cart_of(lines: &[(i64, f64, i64)]) -> Cart {
        let store = crate::cart::CartStore::new();
        for (id, price, qty) in lines {
            let item = Item {
                id: *id,
                restaurant_id: 1,
                category_id: 1,
                name: format!("Item {id}"),
                description: None,
                price: *price,
                created_at: 0,
            };
            store.add_item(1, &item, *qty).unwrap();
        }
        store.get(1)
    }

    #[test]
    fn decimal_beats_f64_accumulation() {
        // Classic floating point problem: 0.1 + 0.2 != 0.3
        let sum_f64 = 0.1_f64 + 0.2_f64;
        assert_ne!(sum_f64, 0.3);
        let sum_dec = to_decimal(0.1) + to_decimal(0.2);
        assert_eq!(to_f64(sum_dec), 0.3);
    }

    #[test]
    fn subtotal_of_mixed_cart() {
        // {item A: 10.00 × 2, item B: 5.00 × 1} → S = 25.00
        let cart = cart_of(&[(1, 10.0, 2), (2, 5.0, 1)]);
        assert_eq!(cart_subtotal(&cart), Decimal::from(25));
    }

    #[test]
    fn fee_split_of_25_euro_cart() {
        // S = 25.00 → service = 25·15/85 ≈ 4.4118, total ≈ 29.4118
        let split = split_subtotal(Decimal::from(25));
        assert_eq!(split.original_fee, 25.0);
        assert!((split.service_fee - 25.0 * 15.0 / 85.0).abs() < 1e-6);
        assert!((split.total_fee - (25.0 + 25.0 * 15.0 / 85.0)).abs() < 1e-6);
        assert!((split.total_fee - 29.4118).abs() < 1e-4);
    }

    #[test]
    fn fee_split_holds_across_magnitudes() {
        for s in [0.01_f64, 1.0, 8.5, 17.0, 99.99, 1234.56, 100_000.0] {
            let split = split_subtotal(to_decimal(s));
            assert!(
                (split.service_fee - s * 15.0 / 85.0).abs() < 1e-6,
                "service fee drifted for subtotal {s}"
            );
            assert!(
                (split.total_fee - (split.original_fee + split.service_fee)).abs() < 1e-6,
                "total is not the sum of its parts for subtotal {s}"
            );
        }
    }

    #[test]
    fn restaurant_receives_exactly_the_subtotal() {
        // 85% of the grand total is the restaurant's share: total × 0.85 == S
        let split = split_subtotal(Decimal::from(25));
        assert!((split.total_fee * 0.85 - split.original_fee).abs() < 1e-6);
        // and the service fee is 15% of the grand total
        assert!((split.total_fee * 0.15 - split.service_fee).abs() < 1e-6);
    }

    #[test]
    fn zero_subtotal_splits_to_zero() {
        let split = split_subtotal(Decimal::ZERO);
        assert_eq!(split.original_fee, 0.0);
        assert_eq!(split.service_fee, 0.0);
        assert_eq!(split.total_fee, 0.0);
    }

    #[test]
    fn accumulation_precision() {
        // 100 lines at €0.01 each
        let mut total = Decimal::ZERO;
        for _ in 0..100 {
            total += to_decimal(0.01);
        }
        assert_eq!(to_f64(total), 1.0);
    }

    #[test]
    fn validate_rejects_nan_and_infinite_prices() {
        let mut line = CartLine {
            item_id: 1,
            name: "x".into(),
            price: f64::NAN,
            quantity: 1,
            restaurant_id: 1,
        };
        assert!(validate_cart_line(&line).is_err());
        line.price = f64::INFINITY;
        assert!(validate_cart_line(&line).is_err());
        line.price = -1.0;
        assert!(validate_cart_line(&line).is_err());
        line.price = MAX_PRICE + 1.0;
        assert!(validate_cart_line(&line).is_err());
        line.price = 9.5;
        assert!(validate_cart_line(&line).is_ok());
    }

    #[test]
    fn validate_rejects_bad_quantities() {
        let mut line = CartLine {
            item_id: 1,
            name: "x".into(),
            price: 1.0,
            quantity: 0,
            restaurant_id: 1,
        };
        assert!(validate_cart_line(&line).is_err());
        line.quantity = -2;
        assert!(validate_cart_line(&line).is_err());
        line.quantity = 10_000;
        assert!(validate_cart_line(&line).is_err());
    }

    #[test]
    fn validate_amount_bounds() {
        assert!(validate_amount(10.0).is_ok());
        assert!(validate_amount(0.0).is_err());
        assert!(validate_amount(-5.0).is_err());
        assert!(validate_amount(f64::NAN).is_err());
        assert!(validate_amount(MAX_PRICE + 1.0).is_err());
    }

    #[test]
    fn money_eq_tolerance() {
        assert!(money_eq(100.0, 100.0));
        assert!(money_eq(100.004, 100.006));
        assert!(!money_eq(100.0, 100.02));
    }
}
