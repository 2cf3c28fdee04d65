//! Review helpers over backend match results.

use linesight_model::{ColumnMatchResult, FieldVocabulary, MatchStatus, MatchTier};

use crate::state::MappingEditSession;

/// Counts used by review summaries and submit gating.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReviewSummary {
    pub total: usize,
    pub auto_mapped: usize,
    pub needs_review: usize,
    pub needs_attention: usize,
    pub ignored: usize,
    /// Suggestions produced by the LLM tier, called out because they are the
    /// costliest to re-run.
    pub llm_suggested: usize,
}

impl ReviewSummary {
    pub fn from_results(results: &[ColumnMatchResult]) -> Self {
        let mut summary = Self {
            total: results.len(),
            ..Self::default()
        };
        for result in results {
            match result.status {
                MatchStatus::AutoMapped => summary.auto_mapped += 1,
                MatchStatus::NeedsReview => summary.needs_review += 1,
                MatchStatus::NeedsAttention => summary.needs_attention += 1,
                MatchStatus::Ignored => summary.ignored += 1,
            }
            if result.tier == MatchTier::Llm {
                summary.llm_suggested += 1;
            }
        }
        summary
    }

    /// Columns a human still has to look at.
    pub fn pending_review(&self) -> usize {
        self.needs_review + self.needs_attention
    }
}

/// Open an edit session seeded from backend match results.
///
/// Row order follows the result order; ignored flags are carried over.
pub fn session_from_matches(
    results: &[ColumnMatchResult],
    vocabulary: FieldVocabulary,
) -> MappingEditSession {
    let pairs: Vec<(String, String)> = results
        .iter()
        .map(|r| {
            (
                r.source_column.clone(),
                r.target_field.clone().unwrap_or_default(),
            )
        })
        .collect();
    let mut session = MappingEditSession::open(pairs, vocabulary);
    for result in results.iter().filter(|r| r.ignored) {
        // Rows were just created from these results, so the lookup cannot miss.
        let _ = session.set_ignored_by_source(&result.source_column, true);
    }
    session
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(
        source: &str,
        target: Option<&str>,
        tier: MatchTier,
        status: MatchStatus,
        ignored: bool,
    ) -> ColumnMatchResult {
        ColumnMatchResult {
            source_column: source.to_string(),
            target_field: target.map(str::to_string),
            confidence: 0.9,
            tier,
            fuzzy_score: None,
            reasoning: None,
            sample_data: vec![],
            needs_review: matches!(status, MatchStatus::NeedsReview),
            ignored,
            status,
        }
    }

    #[test]
    fn summary_counts_by_status_and_tier() {
        let results = vec![
            result(
                "Timestamp",
                Some("timestamp"),
                MatchTier::Hash,
                MatchStatus::AutoMapped,
                false,
            ),
            result(
                "Qty",
                Some("units_produced"),
                MatchTier::Llm,
                MatchStatus::NeedsReview,
                false,
            ),
            result(
                "Remarks",
                None,
                MatchTier::Unmatched,
                MatchStatus::NeedsAttention,
                false,
            ),
            result("Padding", None, MatchTier::Unmatched, MatchStatus::Ignored, true),
        ];
        let summary = ReviewSummary::from_results(&results);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.auto_mapped, 1);
        assert_eq!(summary.pending_review(), 2);
        assert_eq!(summary.ignored, 1);
        assert_eq!(summary.llm_suggested, 1);
    }

    #[test]
    fn session_seeding_preserves_order_and_ignored_flags() {
        let results = vec![
            result(
                "Qty",
                Some("units_produced"),
                MatchTier::Fuzzy,
                MatchStatus::NeedsReview,
                false,
            ),
            result("Padding", None, MatchTier::Unmatched, MatchStatus::Ignored, true),
        ];
        let session = session_from_matches(&results, FieldVocabulary::standard());
        assert_eq!(session.len(), 2);
        assert_eq!(session.rows()[0].source, "Qty");
        assert_eq!(session.rows()[0].target, "units_produced");
        assert!(session.rows()[1].ignored);
        // The ignored unmatched row does not block submission.
        assert!(session.can_submit());
    }
}
