use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::issue::IssueTag;

/// Display name assigned to sessions created without one.
pub const DEFAULT_SESSION_NAME: &str = "Untitled session";

/// A top-level unit of work: one website search/audit run.
/// The two flags are derived from the session's search row, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: i32,
    pub created_at: DateTime<Utc>,
    pub name: String,
    pub is_configured: bool,
    pub is_completed: bool,
}

/// The one search configuration attached to a session, plus the progress
/// fields the crawl worker maintains (`checked_websites_count`,
/// `last_search_cursor`, completion).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSearch {
    pub session_id: i32,
    pub query: String,
    pub issues: Vec<IssueTag>,
    pub max_results_requested: i32,
    pub checked_websites_count: i32,
    pub last_search_cursor: Option<String>,
    pub is_completed: bool,
}
