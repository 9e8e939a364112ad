pub mod catalog;
pub mod contact;
pub mod orders;
pub mod payments;
pub mod stats;

use std::str::FromStr;

use bigdecimal::BigDecimal;
use serde::{Deserialize, Deserializer};

use crate::errors::AppError;

/// Money and quantities travel as decimal strings, e.g. "9.99".
pub(crate) fn parse_decimal(field: &str, raw: &str) -> Result<BigDecimal, AppError> {
    BigDecimal::from_str(raw.trim())
        .map_err(|_| AppError::BadRequest(format!("{field} must be a decimal string, got '{raw}'")))
}

pub(crate) fn parse_optional_decimal(
    field: &str,
    raw: Option<&str>,
) -> Result<Option<BigDecimal>, AppError> {
    raw.map(|r| parse_decimal(field, r)).transpose()
}

/// Distinguishes an absent field (`None`) from an explicit `null`
/// (`Some(None)`) in partial updates. Use with `#[serde(default)]`.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
