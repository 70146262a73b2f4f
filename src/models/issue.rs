use serde::{Deserialize, Serialize};

/// The closed set of website-defect categories a search can filter on
/// and a result can report. Anything else is rejected at the request
/// boundary by serde before it reaches the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IssueTag {
    #[serde(rename = "seo-issues")]
    SeoIssues,
    #[serde(rename = "missing-title")]
    MissingTitle,
    #[serde(rename = "missing-meta-description")]
    MissingMetaDescription,
    #[serde(rename = "missing-h1")]
    MissingH1,
    #[serde(rename = "slow-performance")]
    SlowPerformance,
}

/// Decodes a JSON-encoded tag column. NULL or empty text decodes as an
/// empty sequence rather than an error; order and duplicates survive.
#[must_use]
pub fn decode_tags(raw: Option<&str>) -> Vec<IssueTag> {
    match raw {
        Some(text) if !text.is_empty() => serde_json::from_str(text).unwrap_or_default(),
        _ => Vec::new(),
    }
}

pub fn encode_tags(tags: &[IssueTag]) -> anyhow::Result<String> {
    Ok(serde_json::to_string(tags)?)
}
