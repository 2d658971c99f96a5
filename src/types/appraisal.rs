use crate::types::config::{ScoringPolicy, SimilarityMode};
use crate::types::roster::{Employee, ScoreSheet};
use chrono::Utc;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Complete,
    Pending,
}

impl Status {
    pub fn from_review_count(count: usize, min_reviews: usize) -> Self {
        if count >= min_reviews {
            Status::Complete
        } else {
            Status::Pending
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Status::Complete => "COMPLETE",
            Status::Pending => "PENDING",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Approved,
    Rejected,
}

impl Verdict {
    pub fn from_score(final_score: f64, threshold: f64) -> Self {
        if final_score >= threshold {
            Verdict::Approved
        } else {
            Verdict::Rejected
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Verdict::Approved => "APPROVED",
            Verdict::Rejected => "REJECTED",
        }
    }
}

/// One reviewer's share of a weighted peer average.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewerContribution {
    pub reviewer: Employee,
    pub ratings: ScoreSheet,
    pub weight: f64,
    pub avg_rating: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppraisalResult {
    pub employee: Employee,
    pub objective_scores: ScoreSheet,
    pub objective_mean: f64,
    pub weighted_peer_avg: f64,
    pub final_score: f64,
    pub status: Status,
    pub verdict: Verdict,
    pub contributions: Vec<ReviewerContribution>,
}

/// Batch of results plus the context needed to render them.
#[derive(Debug, Clone, Serialize)]
pub struct AppraisalReport {
    pub generated_at: String,
    pub similarity_mode: &'static str,
    pub objective_weight: f64,
    pub peer_weight: f64,
    pub scale: f64,
    pub approval_threshold: f64,
    pub categories: Vec<String>,
    pub results: Vec<AppraisalResult>,
}

impl AppraisalReport {
    pub fn new(
        categories: &[String],
        mode: SimilarityMode,
        policy: ScoringPolicy,
        results: Vec<AppraisalResult>,
    ) -> Self {
        Self {
            generated_at: Utc::now().to_rfc3339(),
            similarity_mode: mode.label(),
            objective_weight: policy.objective_weight,
            peer_weight: policy.peer_weight,
            scale: policy.scale,
            approval_threshold: policy.approval_threshold,
            categories: categories.to_vec(),
            results,
        }
    }

    pub fn has_pending(&self) -> bool {
        self.results
            .iter()
            .any(|result| result.status == Status::Pending)
    }

    pub fn has_rejected(&self) -> bool {
        self.results
            .iter()
            .any(|result| result.verdict == Verdict::Rejected)
    }
}
