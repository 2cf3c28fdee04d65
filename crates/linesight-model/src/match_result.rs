//! Column match results returned by the backend matching endpoint.
//!
//! Matching runs entirely server-side (hash, fuzzy, and LLM tiers). The
//! client mirrors these records for review; it never recomputes scores or
//! statuses.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// The matching strategy that produced a suggestion, ordered roughly by
/// confidence/cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    /// Exact hash match against a previously confirmed column name.
    Hash,
    /// Fuzzy string similarity match.
    Fuzzy,
    /// LLM-assisted semantic match.
    Llm,
    /// User-supplied mapping.
    Manual,
    /// No strategy produced a candidate.
    Unmatched,
}

impl MatchTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchTier::Hash => "hash",
            MatchTier::Fuzzy => "fuzzy",
            MatchTier::Llm => "llm",
            MatchTier::Manual => "manual",
            MatchTier::Unmatched => "unmatched",
        }
    }
}

impl fmt::Display for MatchTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchTier {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hash" => Ok(MatchTier::Hash),
            "fuzzy" => Ok(MatchTier::Fuzzy),
            "llm" => Ok(MatchTier::Llm),
            "manual" => Ok(MatchTier::Manual),
            "unmatched" => Ok(MatchTier::Unmatched),
            other => Err(ModelError::UnknownTier(other.to_string())),
        }
    }
}

/// Review status of a match result.
///
/// Derived by the backend as a pure function of `confidence`, `ignored`, and
/// `tier`. The client treats the server-supplied value as authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    /// High-confidence match, no review required.
    AutoMapped,
    /// Plausible match that a user should verify.
    NeedsReview,
    /// Weak or missing match that requires a manual decision.
    NeedsAttention,
    /// Column excluded from ingestion.
    Ignored,
}

impl MatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::AutoMapped => "auto_mapped",
            MatchStatus::NeedsReview => "needs_review",
            MatchStatus::NeedsAttention => "needs_attention",
            MatchStatus::Ignored => "ignored",
        }
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One source column's match against the target field vocabulary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnMatchResult {
    /// Column name as it appears in the uploaded file.
    pub source_column: String,
    /// Suggested target field, if any strategy produced one.
    pub target_field: Option<String>,
    /// Confidence score (0.0 to 1.0).
    pub confidence: f64,
    /// Strategy that produced this suggestion.
    pub tier: MatchTier,
    /// Raw similarity score from the fuzzy tier, when that tier ran.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuzzy_score: Option<f64>,
    /// LLM explanation for the suggestion, when the LLM tier ran.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
    /// Sample values drawn from the column, for reviewer context.
    #[serde(default)]
    pub sample_data: Vec<serde_json::Value>,
    /// Whether the backend flagged this result for human review.
    pub needs_review: bool,
    /// Whether this column is excluded from ingestion.
    pub ignored: bool,
    /// Server-derived review status. Mirrored, never recomputed.
    pub status: MatchStatus,
}

impl ColumnMatchResult {
    /// True when this result carries a usable suggestion.
    pub fn has_suggestion(&self) -> bool {
        self.target_field.as_deref().is_some_and(|t| !t.is_empty())
    }
}
