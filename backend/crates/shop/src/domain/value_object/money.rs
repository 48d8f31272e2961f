//! Money
//!
//! Amounts persist as `NUMERIC(14, 2)`: at most twelve integer digits and
//! two decimals. Arithmetic on them is checked so an oversized value is a
//! validation failure instead of a panic or a failed write.

use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places kept for stored amounts
pub const MONEY_SCALE: u32 = 2;

/// 999999999999.99
pub fn max_amount() -> Decimal {
    Decimal::new(99_999_999_999_999, MONEY_SCALE)
}

/// Round half away from zero to two places, as `NUMERIC(14, 2)` does on
/// insert
pub fn to_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// `value` when it fits the stored range
pub fn within_range(value: Decimal) -> Option<Decimal> {
    (value <= max_amount()).then_some(value)
}

/// `price * quantity`, or `None` past the stored range
pub fn line_total(price: Decimal, quantity: u32) -> Option<Decimal> {
    price
        .checked_mul(Decimal::from(quantity))
        .and_then(within_range)
}

/// Sum that stays inside the stored range
pub fn checked_sum(values: impl IntoIterator<Item = Option<Decimal>>) -> Option<Decimal> {
    values.into_iter().try_fold(Decimal::ZERO, |acc, value| {
        acc.checked_add(value?).and_then(within_range)
    })
}
