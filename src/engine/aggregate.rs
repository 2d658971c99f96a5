use crate::engine::similarity::{RatingMatrix, SimilarityEngine, SimilarityMatrix};
use crate::engine::store::ReviewRecord;
use crate::engine::ReviewStore;
use crate::error::Result;
use crate::types::appraisal::{AppraisalResult, ReviewerContribution, Status, Verdict};
use crate::types::config::{ScoringPolicy, SimilarityMode};
use crate::types::roster::EmployeeId;

/// Blends objective scores with similarity-weighted peer ratings.
pub struct ScoreAggregator<'a> {
    store: &'a ReviewStore,
    engine: &'a dyn SimilarityEngine,
    policy: ScoringPolicy,
}

impl<'a> ScoreAggregator<'a> {
    pub fn new(
        store: &'a ReviewStore,
        engine: &'a dyn SimilarityEngine,
        policy: ScoringPolicy,
    ) -> Self {
        Self {
            store,
            engine,
            policy,
        }
    }

    pub fn mode(&self) -> SimilarityMode {
        self.engine.mode()
    }

    pub fn evaluate(&self, employee: &str) -> Result<AppraisalResult> {
        let id = self.store.roster().lookup(employee)?;
        let reviews = self.store.reviews_for(employee)?;
        let similarity = self.similarity_matrix();
        Ok(self.evaluate_with(id, &reviews, &similarity))
    }

    /// Results for every employee holding at least one review, in roster order.
    pub fn evaluate_all(&self) -> Result<Vec<AppraisalResult>> {
        let similarity = self.similarity_matrix();
        let roster = self.store.roster();
        let mut results = Vec::new();
        for id in roster.ids() {
            let reviews = self.store.reviews_for(&roster.employee(id).name)?;
            if reviews.is_empty() {
                continue;
            }
            results.push(self.evaluate_with(id, &reviews, &similarity));
        }
        Ok(results)
    }

    fn similarity_matrix(&self) -> SimilarityMatrix {
        let matrix = self.engine.similarity(&RatingMatrix::build(self.store));
        tracing::debug!(
            mode = self.engine.mode().label(),
            size = matrix.size(),
            "similarity recomputed"
        );
        matrix
    }

    fn evaluate_with(
        &self,
        id: EmployeeId,
        reviews: &[&ReviewRecord],
        similarity: &SimilarityMatrix,
    ) -> AppraisalResult {
        let roster = self.store.roster();
        let objective_scores = roster.objective(id).clone();
        let objective_mean = objective_scores.mean();

        let contributions = reviews
            .iter()
            .map(|record| ReviewerContribution {
                reviewer: roster.employee(record.reviewer).clone(),
                avg_rating: record.ratings.mean(),
                weight: similarity.weight(record.reviewer, id),
                ratings: record.ratings.clone(),
            })
            .collect::<Vec<_>>();

        let weighted_sum: f64 = contributions.iter().map(|c| c.avg_rating * c.weight).sum();
        let total_weight: f64 = contributions.iter().map(|c| c.weight).sum();
        let weighted_peer_avg = if total_weight > 0.0 {
            weighted_sum / total_weight
        } else {
            0.0
        };

        let final_score = (self.policy.objective_weight * objective_mean
            + self.policy.peer_weight * weighted_peer_avg)
            / self.policy.scale;
        let status = Status::from_review_count(contributions.len(), self.policy.min_reviews);
        let verdict = Verdict::from_score(final_score, self.policy.approval_threshold);

        tracing::debug!(
            employee = %roster.employee(id).name,
            reviews = contributions.len(),
            final_score,
            "employee evaluated"
        );

        AppraisalResult {
            employee: roster.employee(id).clone(),
            objective_scores,
            objective_mean,
            weighted_peer_avg,
            final_score,
            status,
            verdict,
            contributions,
        }
    }
}
