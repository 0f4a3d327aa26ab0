//! Wire shapes returned by the backend.
//!
//! Every field is optional or defaulted and decoded on its own: a value of the
//! wrong type becomes its default, so one bad field never drops a record.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrackNowResponse {
    #[serde(default, deserialize_with = "lenient")]
    pub success: bool,
    #[serde(default, deserialize_with = "lenient_list")]
    pub commits: Option<Vec<RawCommit>>,
    #[serde(default)]
    pub json_data: Option<Value>,
    #[serde(default, deserialize_with = "lenient")]
    pub total_commits: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub source: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub last_updated: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FetchCommitsResponse {
    #[serde(default, deserialize_with = "lenient")]
    pub success: bool,
    #[serde(default, deserialize_with = "lenient")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCommit {
    #[serde(default, deserialize_with = "lenient")]
    pub hash_key: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub commit_sha: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub repository: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub branch: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub committed_at: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub ai_analysis: Option<RawAiAnalysis>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub files: Option<Vec<RawFileChange>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAiAnalysis {
    #[serde(default, deserialize_with = "lenient")]
    pub sentiment_label: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub priority: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub confidence_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub categories: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub insights: Option<Vec<String>>,
}

/// File entry as stored by either the GitHub service (`filename`, `status`)
/// or the database service (`file_path`, `change_type`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFileChange {
    #[serde(default, deserialize_with = "lenient")]
    pub file_path: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub filename: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub change_type: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub additions: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub deletions: Option<u64>,
}

/// Decodes a field, falling back to its default on a type mismatch.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Decodes an array element by element, skipping entries that do not fit.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(Some(
            items
                .into_iter()
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect(),
        )),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_now_response_tolerates_missing_fields() {
        let response: TrackNowResponse = serde_json::from_str(r#"{"success": false}"#).unwrap();
        assert!(!response.success);
        assert!(response.commits.is_none());
        assert!(response.source.is_none());
    }

    #[test]
    fn test_commit_tolerates_nulls() {
        let raw: RawCommit = serde_json::from_str(
            r#"{"hash_key": null, "commit_sha": "abc", "ai_analysis": null, "files": null}"#,
        )
        .unwrap();
        assert!(raw.hash_key.is_none());
        assert_eq!(raw.commit_sha.as_deref(), Some("abc"));
        assert!(raw.ai_analysis.is_none());
    }

    #[test]
    fn test_empty_analysis_object_is_present() {
        let raw: RawCommit = serde_json::from_str(r#"{"ai_analysis": {}}"#).unwrap();
        assert!(raw.ai_analysis.is_some());
    }

    #[test]
    fn test_mistyped_field_keeps_the_rest_of_the_list() {
        let response: TrackNowResponse = serde_json::from_value(serde_json::json!({
            "success": true,
            "commits": [
                {"hash_key": "good", "message": "fix parser"},
                {
                    "hash_key": "odd",
                    "author": 7,
                    "ai_analysis": {
                        "confidence_score": "0.9",
                        "priority": "high",
                        "categories": ["bugfix", 3]
                    },
                    "files": [{"file_path": "a.rs", "additions": "two"}, "junk"]
                }
            ],
            "total_commits": 2
        }))
        .unwrap();

        let commits = response.commits.unwrap();
        assert_eq!(commits.len(), 2);
        assert_eq!(commits[0].message.as_deref(), Some("fix parser"));

        let odd = &commits[1];
        assert_eq!(odd.hash_key.as_deref(), Some("odd"));
        assert!(odd.author.is_none());
        let analysis = odd.ai_analysis.as_ref().unwrap();
        assert!(analysis.confidence_score.is_none());
        assert_eq!(analysis.priority.as_deref(), Some("high"));
        assert_eq!(analysis.categories.as_deref(), Some(&["bugfix".to_string()][..]));
        let files = odd.files.as_ref().unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].file_path.as_deref(), Some("a.rs"));
        assert!(files[0].additions.is_none());
        assert_eq!(response.total_commits, Some(2));
    }

    #[test]
    fn test_non_array_commits_is_treated_as_missing() {
        let response: TrackNowResponse =
            serde_json::from_str(r#"{"success": true, "commits": "none"}"#).unwrap();
        assert!(response.success);
        assert!(response.commits.is_none());
    }
}
