//! Commit records as the dashboard displays them.
//!
//! Wire records are normalized once here, so renderers see a single shape.

use crate::api::types::{RawAiAnalysis, RawCommit, RawFileChange};
use crate::consts::cli_consts::display::SHA_PREFIX_LEN;
use sha3::{Digest, Keccak256};
use std::fmt::{Display, Formatter};

/// Identity used to keep the selection on the same commit across refreshes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CommitKey {
    /// Content-derived key assigned by the backend.
    Hash(String),
    /// Key computed locally from the commit contents when the backend sent none.
    Derived(String),
}

impl CommitKey {
    pub fn as_str(&self) -> &str {
        match self {
            CommitKey::Hash(key) | CommitKey::Derived(key) => key,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
    Other(String),
}

impl Sentiment {
    pub fn as_str(&self) -> &str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
            Sentiment::Other(label) => label,
        }
    }
}

impl From<String> for Sentiment {
    fn from(label: String) -> Self {
        match label.as_str() {
            "positive" => Sentiment::Positive,
            "negative" => Sentiment::Negative,
            "neutral" => Sentiment::Neutral,
            _ => Sentiment::Other(label),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Priority {
    High,
    Medium,
    Low,
    Other(String),
}

impl Priority {
    pub fn as_str(&self) -> &str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
            Priority::Other(level) => level,
        }
    }
}

impl From<String> for Priority {
    fn from(level: String) -> Self {
        match level.as_str() {
            "high" => Priority::High,
            "medium" => Priority::Medium,
            "low" => Priority::Low,
            _ => Priority::Other(level),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AiAnalysis {
    pub sentiment_label: Option<Sentiment>,
    pub priority: Option<Priority>,
    pub confidence_score: Option<f64>,
    pub categories: Vec<String>,
    pub insights: Vec<String>,
}

impl AiAnalysis {
    /// Confidence as a whole percentage, missing scores count as zero.
    pub fn confidence_percent(&self) -> i64 {
        (self.confidence_score.unwrap_or(0.0) * 100.0).round() as i64
    }
}

impl From<RawAiAnalysis> for AiAnalysis {
    fn from(raw: RawAiAnalysis) -> Self {
        Self {
            sentiment_label: raw.sentiment_label.map(Sentiment::from),
            priority: raw.priority.map(Priority::from),
            confidence_score: raw.confidence_score,
            categories: raw.categories.unwrap_or_default(),
            insights: raw.insights.unwrap_or_default(),
        }
    }
}

/// A changed file in canonical form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileChange {
    pub path: String,
    pub change_type: String,
    pub additions: Option<u64>,
    pub deletions: Option<u64>,
}

impl FileChange {
    /// Line counters are only worth showing when one of them is non-zero.
    pub fn has_line_stats(&self) -> bool {
        self.additions.unwrap_or(0) != 0 || self.deletions.unwrap_or(0) != 0
    }
}

impl From<RawFileChange> for FileChange {
    fn from(raw: RawFileChange) -> Self {
        let present = |value: Option<String>| value.filter(|v| !v.is_empty());
        Self {
            path: present(raw.file_path).or(raw.filename).unwrap_or_default(),
            change_type: present(raw.change_type).or(raw.status).unwrap_or_default(),
            additions: raw.additions,
            deletions: raw.deletions,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Commit {
    pub key: CommitKey,
    pub hash_key: Option<String>,
    pub commit_sha: Option<String>,
    pub message: String,
    pub author: String,
    pub repository: String,
    pub branch: Option<String>,
    pub committed_at: Option<String>,
    pub ai_analysis: Option<AiAnalysis>,
    pub files: Vec<FileChange>,
}

impl Commit {
    /// First line of the commit message.
    pub fn summary(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }
}

impl From<RawCommit> for Commit {
    fn from(raw: RawCommit) -> Self {
        let message = raw.message.unwrap_or_default();
        let author = raw.author.unwrap_or_default();
        let repository = raw.repository.unwrap_or_default();

        let key = match raw.hash_key.as_deref().filter(|k| !k.is_empty()) {
            Some(hash_key) => CommitKey::Hash(hash_key.to_string()),
            None => CommitKey::Derived(derive_key(&[
                raw.commit_sha.as_deref().unwrap_or(""),
                &repository,
                &author,
                raw.committed_at.as_deref().unwrap_or(""),
                &message,
            ])),
        };

        Self {
            key,
            hash_key: raw.hash_key,
            commit_sha: raw.commit_sha,
            message,
            author,
            repository,
            branch: raw.branch,
            committed_at: raw.committed_at,
            ai_analysis: raw.ai_analysis.map(AiAnalysis::from),
            files: raw
                .files
                .unwrap_or_default()
                .into_iter()
                .map(FileChange::from)
                .collect(),
        }
    }
}

impl Display for Commit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let sha = self.commit_sha.as_deref().unwrap_or("");
        write!(
            f,
            "{} {} ({})",
            truncate_chars(sha, SHA_PREFIX_LEN),
            self.summary(),
            self.author
        )
    }
}

fn derive_key(parts: &[&str]) -> String {
    let mut hasher = Keccak256::new();
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            hasher.update(b"|");
        }
        hasher.update(part.as_bytes());
    }
    format!("{:x}", hasher.finalize())
}

/// Returns at most `max` characters of `s` without splitting a character.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
