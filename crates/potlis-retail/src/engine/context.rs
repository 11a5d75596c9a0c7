//! Per-request context

use crate::validator::Caller;
use chrono::{DateTime, SubsecRound, Utc};
use chrono_tz::Tz;
use uuid::Uuid;

/// State captured once when a request arrives
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Correlates log lines of one request
    pub request_id: Uuid,
    pub caller: Caller,
    /// Footer timestamp, whole seconds
    pub requested_at: DateTime<Tz>,
}

impl RequestContext {
    /// Context stamped with the current time in `timezone`
    pub fn new(caller: Caller, timezone: Tz) -> Self {
        Self::at(caller, Utc::now().with_timezone(&timezone))
    }

    /// Context stamped with an explicit time
    pub fn at(caller: Caller, requested_at: DateTime<Tz>) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            caller,
            requested_at: requested_at.trunc_subsecs(0),
        }
    }
}
