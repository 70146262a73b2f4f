use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::issue::IssueTag;
use crate::models::result::{ResultStatus, SessionResult};
use crate::models::session::{Session, SessionSearch};

/// Error body shared by every non-2xx response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SessionDto {
    pub id: i32,
    pub created_at: DateTime<Utc>,
    pub name: String,
    pub is_configured: bool,
    pub is_completed: bool,
}

impl From<Session> for SessionDto {
    fn from(session: Session) -> Self {
        Self {
            id: session.id,
            created_at: session.created_at,
            name: session.name,
            is_configured: session.is_configured,
            is_completed: session.is_completed,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SessionSearchDto {
    pub session_id: i32,
    pub query: String,
    pub issues: Vec<IssueTag>,
    pub max_results_requested: i32,
    pub checked_websites_count: i32,
    pub last_search_cursor: Option<String>,
    pub is_completed: bool,
}

impl From<SessionSearch> for SessionSearchDto {
    fn from(search: SessionSearch) -> Self {
        Self {
            session_id: search.session_id,
            query: search.query,
            issues: search.issues,
            max_results_requested: search.max_results_requested,
            checked_websites_count: search.checked_websites_count,
            last_search_cursor: search.last_search_cursor,
            is_completed: search.is_completed,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SessionResultDto {
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

impl From<SessionResult> for SessionResultDto {
    fn from(result: SessionResult) -> Self {
        Self {
            id: result.id,
            created_at: result.created_at,
            session_id: result.session_id,
            url: result.url,
            domain: result.domain,
            page_count: result.page_count,
            tier: result.tier,
            issues_detected: result.issues_detected,
            lighthouse_json: result.lighthouse_json,
            contact_email: result.contact_email,
            status: result.status,
        }
    }
}

/// Body of `PUT /sessions/{id}/search`. Unknown issue tags fail serde
/// deserialization, so they never reach the store.
#[derive(Debug, Deserialize)]
pub struct UpsertSearchRequest {
    pub query: String,
    pub issues: Vec<IssueTag>,
    pub max_results: i32,
}

/// Body of `PATCH /sessions/{id}/results/{rid}`; both fields optional,
/// an empty body is a read.
#[derive(Debug, Deserialize)]
pub struct UpdateResultRequest {
    #[serde(default)]
    pub tier: Option<f64>,
    #[serde(default)]
    pub status: Option<ResultStatus>,
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub offset: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

const fn default_limit() -> u64 {
    50
}
