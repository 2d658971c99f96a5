use crate::error::{AppraisalError, Result};
use crate::types::roster::{Employee, EmployeeId, Roster, ScoreSheet};
use std::collections::{BTreeMap, HashSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRecord {
    pub reviewer: EmployeeId,
    pub reviewee: EmployeeId,
    pub ratings: ScoreSheet,
}

/// Owns the roster, every submitted review and the consumed reviewer/reviewee pairs.
#[derive(Debug, Clone)]
pub struct ReviewStore {
    roster: Roster,
    reviews: Vec<ReviewRecord>,
    reviewed_pairs: HashSet<(EmployeeId, EmployeeId)>,
}

impl ReviewStore {
    pub fn new(roster: Roster) -> Self {
        Self {
            roster,
            reviews: Vec::new(),
            reviewed_pairs: HashSet::new(),
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn reviews(&self) -> &[ReviewRecord] {
        &self.reviews
    }

    pub fn available_reviewees(&self, reviewer: &str) -> Result<Vec<&Employee>> {
        let reviewer_id = self.roster.lookup(reviewer)?;
        Ok(self
            .roster
            .ids()
            .filter(|&id| id != reviewer_id && !self.reviewed_pairs.contains(&(reviewer_id, id)))
            .map(|id| self.roster.employee(id))
            .collect())
    }

    /// Chooses one of the reviewer's remaining reviewees; `draw` selects the
    /// position, so a random draw gives a uniform pick.
    pub fn pick_reviewee(&self, reviewer: &str, draw: u64) -> Result<Option<&Employee>> {
        let available = self.available_reviewees(reviewer)?;
        if available.is_empty() {
            return Ok(None);
        }
        let position = (draw % available.len() as u64) as usize;
        Ok(Some(available[position]))
    }

    pub fn submit(
        &mut self,
        reviewer: &str,
        reviewee: &str,
        ratings: &BTreeMap<String, i64>,
    ) -> Result<()> {
        let reviewer_id = self.roster.lookup(reviewer)?;
        let reviewee_id = self.roster.lookup(reviewee)?;

        if reviewer_id == reviewee_id {
            return Err(AppraisalError::InvalidPair(format!(
                "{reviewer} cannot review themselves"
            )));
        }
        if self.reviewed_pairs.contains(&(reviewer_id, reviewee_id)) {
            return Err(AppraisalError::InvalidPair(format!(
                "{reviewer} has already reviewed {reviewee}"
            )));
        }

        let ratings = self
            .roster
            .categories()
            .sheet_from_map(ratings)
            .map_err(AppraisalError::InvalidRatings)?;

        self.reviewed_pairs.insert((reviewer_id, reviewee_id));
        self.reviews.push(ReviewRecord {
            reviewer: reviewer_id,
            reviewee: reviewee_id,
            ratings,
        });
        tracing::debug!(reviewer, reviewee, total = self.reviews.len(), "review recorded");
        Ok(())
    }

    pub fn reviews_for(&self, employee: &str) -> Result<Vec<&ReviewRecord>> {
        let id = self.roster.lookup(employee)?;
        Ok(self
            .reviews
            .iter()
            .filter(|record| record.reviewee == id)
            .collect())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::types::roster::tests::{employee, uniform_scores};
    use crate::types::roster::Categories;

    pub(crate) fn store_with(names: &[&str]) -> ReviewStore {
        let categories = Categories::default();
        let scores = uniform_scores(&categories, 3);
        let mut roster = Roster::new(categories);
        for (position, name) in names.iter().enumerate() {
            roster
                .add(employee(name, &format!("EMP{:03}", position + 1)), &scores)
                .expect("employee should be added");
        }
        ReviewStore::new(roster)
    }

    pub(crate) fn ratings(value: i64) -> BTreeMap<String, i64> {
        uniform_scores(&Categories::default(), value)
    }

    #[test]
    fn submit_rejects_self_review() {
        let mut store = store_with(&["Alice", "Bob"]);
        let err = store
            .submit("Alice", "Alice", &ratings(4))
            .expect_err("self review should fail");
        assert!(matches!(err, AppraisalError::InvalidPair(_)));
        assert!(store.reviews().is_empty());
    }

    #[test]
    fn submit_rejects_duplicate_pair_and_keeps_single_record() {
        let mut store = store_with(&["Alice", "Bob"]);
        store
            .submit("Bob", "Alice", &ratings(5))
            .expect("first review succeeds");
        let err = store
            .submit("Bob", "Alice", &ratings(2))
            .expect_err("second review should fail");
        assert!(matches!(err, AppraisalError::InvalidPair(_)));

        let recorded = store.reviews_for("Alice").expect("Alice is on the roster");
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].ratings.values()[0], 5);
    }

    #[test]
    fn submit_rejects_invalid_ratings_without_consuming_pair() {
        let mut store = store_with(&["Alice", "Bob"]);
        let mut bad = ratings(3);
        bad.insert("Productivity".to_string(), 0);
        let err = store
            .submit("Bob", "Alice", &bad)
            .expect_err("out of range rating should fail");
        assert!(matches!(err, AppraisalError::InvalidRatings(_)));

        let mut partial = ratings(3);
        partial.remove("Teamwork");
        assert!(matches!(
            store.submit("Bob", "Alice", &partial),
            Err(AppraisalError::InvalidRatings(_))
        ));

        let mut extra = ratings(3);
        extra.insert("Charisma".to_string(), 3);
        assert!(matches!(
            store.submit("Bob", "Alice", &extra),
            Err(AppraisalError::InvalidRatings(_))
        ));

        store
            .submit("Bob", "Alice", &ratings(3))
            .expect("valid review is still accepted");
    }

    #[test]
    fn submit_rejects_unknown_employees() {
        let mut store = store_with(&["Alice"]);
        assert!(matches!(
            store.submit("Mallory", "Alice", &ratings(3)),
            Err(AppraisalError::UnknownEmployee(_))
        ));
        assert!(matches!(
            store.available_reviewees("Mallory"),
            Err(AppraisalError::UnknownEmployee(_))
        ));
    }

    #[test]
    fn available_reviewees_shrinks_to_empty() {
        let mut store = store_with(&["Alice", "Bob", "Carol"]);
        let names = |store: &ReviewStore| {
            store
                .available_reviewees("Alice")
                .expect("Alice is on the roster")
                .into_iter()
                .map(|employee| employee.name.clone())
                .collect::<Vec<_>>()
        };
        assert_eq!(names(&store), vec!["Bob", "Carol"]);

        store.submit("Alice", "Bob", &ratings(4)).expect("review succeeds");
        assert_eq!(names(&store), vec!["Carol"]);

        store.submit("Alice", "Carol", &ratings(4)).expect("review succeeds");
        assert!(names(&store).is_empty());
    }

    #[test]
    fn pick_reviewee_draws_from_remaining_reviewees() {
        let mut store = store_with(&["Alice", "Bob", "Carol", "Dave"]);
        store.submit("Alice", "Carol", &ratings(4)).expect("review succeeds");

        let picked = (0..6)
            .map(|draw| {
                store
                    .pick_reviewee("Alice", draw)
                    .expect("Alice exists")
                    .map(|employee| employee.name.clone())
                    .expect("reviewees remain")
            })
            .collect::<Vec<_>>();
        assert_eq!(picked, vec!["Bob", "Dave", "Bob", "Dave", "Bob", "Dave"]);
        assert!(store.pick_reviewee("Alice", u64::MAX).expect("Alice exists").is_some());
    }

    #[test]
    fn pick_reviewee_is_none_once_everyone_is_reviewed() {
        let mut store = store_with(&["Alice", "Bob"]);
        store.submit("Alice", "Bob", &ratings(4)).expect("review succeeds");
        assert!(store.pick_reviewee("Alice", 7).expect("Alice exists").is_none());
        assert!(matches!(
            store.pick_reviewee("Mallory", 0),
            Err(AppraisalError::UnknownEmployee(_))
        ));
    }

    #[test]
    fn reviews_for_keeps_submission_order() {
        let mut store = store_with(&["Alice", "Bob", "Carol"]);
        store.submit("Carol", "Alice", &ratings(2)).expect("review succeeds");
        store.submit("Bob", "Alice", &ratings(4)).expect("review succeeds");

        let alice = store.roster().lookup("Alice").expect("Alice exists");
        let recorded = store.reviews_for("Alice").expect("Alice exists");
        let reviewers = recorded
            .iter()
            .map(|record| store.roster().employee(record.reviewer).name.clone())
            .collect::<Vec<_>>();
        assert_eq!(reviewers, vec!["Carol", "Bob"]);
        assert!(recorded.iter().all(|record| record.reviewee == alice));
    }
}
