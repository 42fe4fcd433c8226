//! Wire encoding for monetary amounts
//!
//! Amounts travel as JSON numbers carrying their exact decimal digits (serde_json
//! `arbitrary_precision`), never through `f64`. Output always shows at least
//! two decimal places, so `60` is written as `60.00`.

use super::helpers::DECIMAL_PLACES;
use rust_decimal::Decimal;
use serde::{Deserializer, Serializer};

pub fn serialize<S>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut value = *value;
    if value.scale() < DECIMAL_PLACES {
        value.rescale(DECIMAL_PLACES);
    }
    rust_decimal::serde::arbitrary_precision::serialize(&value, serializer)
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    rust_decimal::serde::arbitrary_precision::deserialize(deserializer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use std::str::FromStr;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Amount {
        #[serde(with = "super")]
        value: Decimal,
    }

    #[test]
    fn test_output_keeps_exact_digits_and_cents() {
        let json = serde_json::to_string(&Amount {
            value: Decimal::from(60),
        })
        .unwrap();
        assert_eq!(json, r#"{"value":60.00}"#);

        let json = serde_json::to_string(&Amount {
            value: Decimal::from_str("1111111101111111.10").unwrap(),
        })
        .unwrap();
        assert_eq!(json, r#"{"value":1111111101111111.10}"#);

        let json = serde_json::to_string(&Amount {
            value: Decimal::from_str("9.999").unwrap(),
        })
        .unwrap();
        assert_eq!(json, r#"{"value":9.999}"#);
    }

    #[test]
    fn test_input_is_read_without_float_rounding() {
        let amount: Amount = serde_json::from_str(r#"{"value":1234567890123456.78}"#).unwrap();
        assert_eq!(amount.value, Decimal::from_str("1234567890123456.78").unwrap());

        let amount: Amount = serde_json::from_str(r#"{"value":50}"#).unwrap();
        assert_eq!(amount.value, Decimal::from(50));
    }
}
