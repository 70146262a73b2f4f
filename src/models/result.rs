use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::issue::IssueTag;

/// Audit state of a single result row. Transitions are unconstrained:
/// whatever a caller patches is stored verbatim, including moving a
/// completed result back to pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultStatus {
    Pending,
    Completed,
    Error,
}

impl ResultStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Error => "error",
        }
    }

    pub fn from_db(value: &str) -> anyhow::Result<Self> {
        match value {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            "error" => Ok(Self::Error),
            other => anyhow::bail!("unknown result status in store: {other}"),
        }
    }
}

impl fmt::Display for ResultStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One audited website discovered under a session's search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResult {
    pub id: i32,
    pub created_at: DateTime<Utc>,
    pub session_id: i32,
    pub url: String,
    pub domain: String,
    pub page_count: i32,
    pub tier: f64,
    pub issues_detected: Vec<IssueTag>,
    pub lighthouse_json: Option<String>,
    pub contact_email: Option<String>,
    pub status: ResultStatus,
}

/// Fields the crawl worker supplies when it records an audited website.
#[derive(Debug, Clone)]
pub struct ResultInput {
    pub session_id: i32,
    pub url: String,
    pub domain: String,
    pub page_count: i32,
    pub tier: f64,
    pub issues_detected: Vec<IssueTag>,
    pub lighthouse_json: Option<String>,
    pub contact_email: Option<String>,
    pub status: ResultStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in [
            ResultStatus::Pending,
            ResultStatus::Completed,
            ResultStatus::Error,
        ] {
            assert_eq!(ResultStatus::from_db(status.as_str()).unwrap(), status);
        }
    }

    #[test]
    fn test_unknown_status_is_an_error() {
        assert!(ResultStatus::from_db("done").is_err());
    }
}
