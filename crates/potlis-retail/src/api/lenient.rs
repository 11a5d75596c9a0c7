//! Tolerant field decoders for upstream JSON
//!
//! Both retail APIs have been seen sending numbers and flags as strings, and
//! nulls where a value is documented. One odd record must not fail the
//! decode of the whole response array.

use serde::Deserialize;
use serde::de::{self, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient<T> {
    Native(T),
    Text(String),
}

pub(crate) fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    match Lenient::<bool>::deserialize(deserializer)? {
        Lenient::Native(flag) => Ok(flag),
        Lenient::Text(text) => match text.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(de::Error::custom(format!("expected a boolean, got {text:?}"))),
        },
    }
}

pub(crate) fn lenient_quantity<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    match Lenient::<i64>::deserialize(deserializer)? {
        Lenient::Native(quantity) => Ok(quantity),
        Lenient::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("expected a quantity, got {text:?}"))),
    }
}

/// Number, numeric string or null; anything unparseable is absent
pub(crate) fn lenient_price<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<f64>, D::Error> {
    Ok(match Option::<Lenient<f64>>::deserialize(deserializer)? {
        Some(Lenient::Native(price)) => Some(price),
        Some(Lenient::Text(text)) => text.trim().trim_start_matches('$').parse().ok(),
        None => None,
    })
}

/// String or null, with null read as empty
pub(crate) fn nullable_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Record {
        #[serde(default, deserialize_with = "lenient_price")]
        price: Option<f64>,
        #[serde(default, deserialize_with = "nullable_string")]
        image: String,
    }

    fn record(value: serde_json::Value) -> Record {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_price_variants() {
        assert_eq!(record(json!({ "price": 12.5 })).price, Some(12.5));
        assert_eq!(record(json!({ "price": "12.50" })).price, Some(12.5));
        assert_eq!(record(json!({ "price": "$7" })).price, Some(7.0));
        assert_eq!(record(json!({ "price": null })).price, None);
        assert_eq!(record(json!({ "price": "call for price" })).price, None);
        assert_eq!(record(json!({})).price, None);
    }

    #[test]
    fn test_nullable_string() {
        assert_eq!(record(json!({ "image": null })).image, "");
        assert_eq!(record(json!({ "image": "https://img.test/a.jpg" })).image, "https://img.test/a.jpg");
        assert_eq!(record(json!({})).image, "");
    }
}
