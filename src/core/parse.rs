//! Coercion of raw form input into typed line items.
//!
//! Form fields arrive as text and may be empty or half-typed. Nothing here
//! fails: unparseable numbers fall back to a defined value.

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Deserializer, Serialize};

use super::types::{LineItem, TaxRegime};

/// Largest magnitude a form field may hold. Larger values are treated as
/// unparseable.
pub const MAX_FIELD_MAGNITUDE: Decimal = dec!(1000000000);

/// Parse a decimal, returning `fallback` when the input is not a number or
/// lies outside ±[`MAX_FIELD_MAGNITUDE`].
///
/// Accepts surrounding whitespace, plain notation ("12.50", "-3") and
/// scientific notation ("1e3").
pub fn parse_decimal_or(raw: &str, fallback: Decimal) -> Decimal {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return fallback;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
        .filter(|value| value.abs() <= MAX_FIELD_MAGNITUDE)
        .unwrap_or(fallback)
}

/// Parse a decimal, returning zero when the input is not a number.
pub fn parse_decimal_or_zero(raw: &str) -> Decimal {
    parse_decimal_or(raw, Decimal::ZERO)
}

impl TaxRegime {
    /// Parse a regime code, falling back to intra-state for anything unknown.
    pub fn parse(raw: &str) -> Self {
        Self::from_code(raw.trim()).unwrap_or_default()
    }
}

impl FromStr for TaxRegime {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

/// A row exactly as the form holds it: every field is text.
///
/// Field names follow the saved-draft format (`qty`, `price`, `discount`,
/// `taxType`). Numeric fields are read from JSON strings or numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLineItem {
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "qty", deserialize_with = "text_or_number")]
    pub quantity: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub price: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub discount: String,
    #[serde(default)]
    pub tax_type: String,
}

impl RawLineItem {
    /// Coerce an edited row. Every unparseable number becomes zero.
    pub fn to_line_item(&self) -> LineItem {
        LineItem {
            name: self.name.clone(),
            quantity: parse_decimal_or_zero(&self.quantity),
            unit_price: parse_decimal_or_zero(&self.price),
            discount_percent: parse_decimal_or_zero(&self.discount),
            tax_regime: TaxRegime::parse(&self.tax_type),
        }
    }

    /// Coerce a row that is being created. A blank quantity starts at 1;
    /// anything typed in is treated as an edit.
    pub fn to_new_row(&self) -> LineItem {
        let mut item = self.to_line_item();
        if self.quantity.trim().is_empty() {
            item.quantity = Decimal::ONE;
        }
        item
    }
}

fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct TextOrNumber;

    impl serde::de::Visitor<'_> for TextOrNumber {
        type Value = String;

        fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("a string or a number")
        }

        fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_f64<E: serde::de::Error>(self, v: f64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_unit<E: serde::de::Error>(self) -> Result<String, E> {
            Ok(String::new())
        }
    }

    deserializer.deserialize_any(TextOrNumber)
}

impl From<&LineItem> for RawLineItem {
    fn from(item: &LineItem) -> Self {
        Self {
            name: item.name.clone(),
            quantity: item.quantity.normalize().to_string(),
            price: item.unit_price.normalize().to_string(),
            discount: item.discount_percent.normalize().to_string(),
            tax_type: item.tax_regime.code().to_string(),
        }
    }
}
