use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

pub const DAY_STATUS_TABLE: &str = "day_status";
pub const DAY_STATUS_CONFLICT_KEY: &str = "date";

/// Canonical identity of a calendar day (`YYYY-MM-DD` on the wire).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateKey(NaiveDate);

impl DateKey {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayStatus {
    pub date: DateKey,
    pub is_holiday: bool,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayStatusUpsert {
    pub date: DateKey,
    pub is_holiday: bool,
    pub updated_at: DateTime<Utc>,
}

/// Error body returned by the hosted REST endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct RestErrorBody {
    pub message: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub details: Option<Value>,
    #[serde(default)]
    pub hint: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl std::error::Error for ApiError {}

impl From<RestErrorBody> for ApiError {
    fn from(body: RestErrorBody) -> Self {
        let details = match (body.details, body.hint) {
            (None, None) => None,
            (details, hint) => Some(serde_json::json!({ "details": details, "hint": hint })),
        };
        Self {
            error: body.message,
            code: body.code.unwrap_or_else(|| "UNKNOWN".to_string()),
            details,
        }
    }
}

impl ApiError {
    pub fn unknown(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: "UNKNOWN".to_string(),
            details: None,
        }
    }

    pub fn request_failed(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: "REQUEST_FAILED".to_string(),
            details: None,
        }
    }

    pub fn timeout(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: "TIMEOUT".to_string(),
            details: None,
        }
    }
}
