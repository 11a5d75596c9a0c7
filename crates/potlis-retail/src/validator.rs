//! Search request validation
//!
//! Turns the raw command options into a [`SearchRequest`], rejecting
//! malformed or over-quota max-count values before any network call.

use crate::error::{Result, RetailError};
use serde::{Deserialize, Serialize};

/// The requester of a command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caller {
    /// Platform user id
    pub id: String,
    /// How the platform addresses the user in a reply
    pub mention: String,
    /// Exempt from the default result cap
    pub privileged: bool,
}

impl Caller {
    /// Create an unprivileged caller whose mention is `@id`
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            mention: format!("@{id}"),
            id,
            privileged: false,
        }
    }

    /// Set the mention text
    pub fn with_mention(mut self, mention: impl Into<String>) -> Self {
        self.mention = mention.into();
        self
    }

    /// Set the privilege flag
    pub fn privileged(mut self, privileged: bool) -> Self {
        self.privileged = privileged;
        self
    }
}

/// A validated product search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    pub category: Option<String>,
    /// Always positive
    pub max_count: u32,
    pub caller_is_privileged: bool,
}

/// Validates raw search options against the result cap
#[derive(Debug, Clone, Copy)]
pub struct QueryValidator {
    default_cap: u32,
}

impl QueryValidator {
    pub fn new(default_cap: u32) -> Self {
        Self { default_cap }
    }

    pub fn default_cap(&self) -> u32 {
        self.default_cap
    }

    /// Validate a search.
    ///
    /// An absent `raw_max` means the default cap. The value must consist only
    /// of ASCII digits and be non-zero; callers without privilege may not
    /// exceed the cap.
    pub fn validate(
        &self,
        raw_query: &str,
        raw_category: Option<&str>,
        raw_max: Option<&str>,
        caller: &Caller,
    ) -> Result<SearchRequest> {
        let default_max = self.default_cap.to_string();
        let raw_max = raw_max.unwrap_or(&default_max);

        let invalid = || RetailError::InvalidMaxValue {
            mention: caller.mention.clone(),
            value: raw_max.to_string(),
        };

        if raw_max.is_empty() || !raw_max.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let max_count: u32 = raw_max.parse().map_err(|_| invalid())?;
        if max_count == 0 {
            return Err(invalid());
        }

        if max_count > self.default_cap && !caller.privileged {
            return Err(RetailError::QuotaExceeded {
                mention: caller.mention.clone(),
                requested: max_count,
                cap: self.default_cap,
            });
        }

        Ok(SearchRequest {
            query: raw_query.to_string(),
            category: raw_category
                .filter(|c| !c.is_empty())
                .map(ToString::to_string),
            max_count,
            caller_is_privileged: caller.privileged,
        })
    }
}

impl Default for QueryValidator {
    fn default() -> Self {
        Self::new(10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> Caller {
        Caller::new("sam")
    }

    fn admin() -> Caller {
        Caller::new("root").privileged(true)
    }

    #[test]
    fn test_within_cap_regardless_of_privilege() {
        let validator = QueryValidator::default();
        for max in 1..=10 {
            let raw = max.to_string();
            for caller in [user(), admin()] {
                let request = validator
                    .validate("ssd", None, Some(&raw), &caller)
                    .unwrap();
                assert_eq!(request.max_count, max);
            }
        }
    }

    #[test]
    fn test_absent_max_defaults_to_cap() {
        let request = QueryValidator::default()
            .validate("monitor", Some("20001"), None, &user())
            .unwrap();
        assert_eq!(request.max_count, 10);
        assert_eq!(request.query, "monitor");
        assert_eq!(request.category.as_deref(), Some("20001"));
        assert!(!request.caller_is_privileged);
    }

    #[test]
    fn test_over_cap_needs_privilege() {
        let validator = QueryValidator::default();

        let err = validator
            .validate("gpu", None, Some("11"), &user())
            .unwrap_err();
        match err {
            RetailError::QuotaExceeded {
                mention,
                requested,
                cap,
            } => {
                assert_eq!(mention, "@sam");
                assert_eq!(requested, 11);
                assert_eq!(cap, 10);
            }
            other => panic!("Expected QuotaExceeded, got {other:?}"),
        }

        let request = validator
            .validate("gpu", None, Some("50"), &admin())
            .unwrap();
        assert_eq!(request.max_count, 50);
        assert!(request.caller_is_privileged);
    }

    #[test]
    fn test_non_digit_max_rejected() {
        let validator = QueryValidator::default();
        for raw in ["abc", "-1", "3.5", "", " 5", "1e3", "٣"] {
            let err = validator
                .validate("tv", None, Some(raw), &admin())
                .unwrap_err();
            match err {
                RetailError::InvalidMaxValue { value, mention } => {
                    assert_eq!(value, raw);
                    assert_eq!(mention, "@root");
                }
                other => panic!("Expected InvalidMaxValue for {raw:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_zero_and_overflow_rejected() {
        let validator = QueryValidator::default();
        assert!(matches!(
            validator.validate("tv", None, Some("0"), &user()),
            Err(RetailError::InvalidMaxValue { .. })
        ));
        assert!(matches!(
            validator.validate("tv", None, Some("99999999999999999999"), &admin()),
            Err(RetailError::InvalidMaxValue { .. })
        ));
    }

    #[test]
    fn test_empty_category_is_absent() {
        let request = QueryValidator::default()
            .validate("laptop", Some(""), Some("3"), &user())
            .unwrap();
        assert_eq!(request.category, None);
    }
}
