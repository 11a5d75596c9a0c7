//! Caller privilege checks

use crate::error::Result;
use potlis_utils::json_var;
use serde_json::Value;
use std::collections::HashSet;

/// Decides whether a caller is exempt from quotas and may run admin commands
pub trait PrivilegeCheck: Send + Sync {
    fn is_privileged(&self, caller_id: &str) -> bool;
}

/// Bot owners, by platform user id
#[derive(Debug, Clone, Default)]
pub struct OwnerList {
    owners: HashSet<String>,
}

impl OwnerList {
    pub fn new<I, S>(owners: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            owners: owners.into_iter().map(Into::into).collect(),
        }
    }

    /// Read `OWNER_ID`, a JSON array of numeric or string ids.
    ///
    /// An unset variable gives an empty list.
    pub fn from_env() -> Result<Self> {
        let ids: Vec<Value> = json_var("OWNER_ID")?.unwrap_or_default();
        Ok(Self::from_json_ids(&ids))
    }

    fn from_json_ids(ids: &[Value]) -> Self {
        Self::new(ids.iter().filter_map(|id| match id {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }))
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}

impl PrivilegeCheck for OwnerList {
    fn is_privileged(&self, caller_id: &str) -> bool {
        self.owners.contains(caller_id)
    }
}
