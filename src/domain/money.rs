use bigdecimal::{BigDecimal, RoundingMode, Zero};

/// Digits allowed in a price or total column, `NUMERIC(10, 2)`.
pub const PRICE_PRECISION: u32 = 10;
/// Digits allowed in a quantity column, `NUMERIC(8, 2)`.
pub const QUANTITY_PRECISION: u32 = 8;

/// Scale a decimal to two places, rounding half away from zero.
pub fn to_money(value: &BigDecimal) -> BigDecimal {
    let rounded = value.with_scale_round(2, RoundingMode::HalfUp);
    if rounded.is_zero() {
        // with_scale_round drops the scale of zero
        return BigDecimal::new(0.into(), 2);
    }
    rounded
}

/// True when `value` has at most two decimal places and fits a
/// `NUMERIC(precision, 2)` column unchanged.
pub fn fits_numeric(value: &BigDecimal, precision: u32) -> bool {
    let limit = BigDecimal::from(10u64.pow(precision.saturating_sub(2)));
    value.with_scale(2) == *value && value.abs() < limit
}

/// `quantity × unit_price`, rounded to money scale.
pub fn line_total(quantity: &BigDecimal, unit_price: &BigDecimal) -> BigDecimal {
    to_money(&(quantity * unit_price))
}

/// Sum the exact line products first and round once at the end.
pub fn sum_of_lines<'a, I>(lines: I) -> BigDecimal
where
    I: IntoIterator<Item = (&'a BigDecimal, &'a BigDecimal)>,
{
    let exact = lines
        .into_iter()
        .fold(BigDecimal::from(0), |acc, (qty, price)| acc + qty * price);
    to_money(&exact)
}
