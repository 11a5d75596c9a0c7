//! Environment-backed configuration helpers

use serde::de::DeserializeOwned;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while reading configuration from the environment
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnvError {
    /// Variable is set but could not be parsed
    #[error("{name} has an invalid value {value:?}: {reason}")]
    Invalid {
        name: String,
        value: String,
        reason: String,
    },
}

/// Load a `.env` file from the working directory or its parents, if any.
///
/// Returns `true` when a file was found and loaded.
pub fn load_dotenv() -> bool {
    match dotenvy::dotenv() {
        Ok(path) => {
            tracing::debug!("Loaded environment from {}", path.display());
            true
        }
        Err(_) => false,
    }
}

/// Read a variable that may be absent; empty values count as absent
pub fn optional_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Read and parse an optional variable with `FromStr`
pub fn parse_var<T>(name: &str) -> Result<Option<T>, EnvError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    optional_var(name)
        .map(|value| {
            value.trim().parse::<T>().map_err(|e| EnvError::Invalid {
                name: name.to_string(),
                reason: e.to_string(),
                value,
            })
        })
        .transpose()
}

/// Read and decode an optional JSON-valued variable
pub fn json_var<T: DeserializeOwned>(name: &str) -> Result<Option<T>, EnvError> {
    optional_var(name)
        .map(|value| {
            serde_json::from_str(&value).map_err(|e| EnvError::Invalid {
                name: name.to_string(),
                reason: e.to_string(),
                value,
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_var() {
        unsafe {
            std::env::set_var("POTLIS_UTILS_TEST_PARSE", " 42 ");
        }
        let value: Option<u64> = parse_var("POTLIS_UTILS_TEST_PARSE").unwrap();
        assert_eq!(value, Some(42));

        unsafe {
            std::env::set_var("POTLIS_UTILS_TEST_PARSE", "forty-two");
        }
        let result: Result<Option<u64>, _> = parse_var("POTLIS_UTILS_TEST_PARSE");
        assert!(matches!(result, Err(EnvError::Invalid { .. })));

        unsafe {
            std::env::remove_var("POTLIS_UTILS_TEST_PARSE");
        }
    }

    #[test]
    fn test_json_var_and_empty_is_absent() {
        unsafe {
            std::env::set_var("POTLIS_UTILS_TEST_JSON", "[1, 2, 3]");
        }
        let value: Option<Vec<u64>> = json_var("POTLIS_UTILS_TEST_JSON").unwrap();
        assert_eq!(value, Some(vec![1, 2, 3]));

        unsafe {
            std::env::set_var("POTLIS_UTILS_TEST_JSON", "  ");
        }
        let value: Option<Vec<u64>> = json_var("POTLIS_UTILS_TEST_JSON").unwrap();
        assert_eq!(value, None);

        unsafe {
            std::env::remove_var("POTLIS_UTILS_TEST_JSON");
        }
    }
}
