use crate::engine::ReviewStore;
use crate::types::config::SimilarityMode;
use crate::types::roster::EmployeeId;

/// cell[r][e] is the mean rating reviewer `r` gave reviewee `e`, 0.0 when no review exists.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingMatrix {
    rows: Vec<Vec<f64>>,
}

impl RatingMatrix {
    pub fn build(store: &ReviewStore) -> Self {
        let size = store.roster().len();
        let mut rows = vec![vec![0.0; size]; size];
        for record in store.reviews() {
            rows[record.reviewer.index()][record.reviewee.index()] = record.ratings.mean();
        }
        tracing::debug!(size, reviews = store.reviews().len(), "rating matrix rebuilt");
        Self { rows }
    }

    #[cfg(test)]
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Self {
        Self { rows }
    }

    pub fn size(&self) -> usize {
        self.rows.len()
    }

    pub fn row(&self, index: usize) -> &[f64] {
        &self.rows[index]
    }
}

/// Matrix-like view over reviewer similarity.
#[derive(Debug, Clone, PartialEq)]
pub enum SimilarityMatrix {
    Dense(Vec<Vec<f64>>),
    Uniform { size: usize, value: f64 },
}

impl SimilarityMatrix {
    pub fn size(&self) -> usize {
        match self {
            SimilarityMatrix::Dense(rows) => rows.len(),
            SimilarityMatrix::Uniform { size, .. } => *size,
        }
    }

    pub fn similarity(&self, a: usize, b: usize) -> f64 {
        match self {
            SimilarityMatrix::Dense(rows) => rows[a][b],
            SimilarityMatrix::Uniform { value, .. } => *value,
        }
    }

    /// Credibility of `reviewer` when scoring `reviewee`: the mean of the
    /// reviewer's similarity to every employee except the reviewee.
    pub fn weight(&self, reviewer: EmployeeId, reviewee: EmployeeId) -> f64 {
        let size = self.size();
        if reviewer.index() >= size {
            return self.overall_mean();
        }
        let others = (0..size)
            .filter(|&column| column != reviewee.index())
            .map(|column| self.similarity(reviewer.index(), column))
            .collect::<Vec<_>>();
        if others.is_empty() {
            self.overall_mean()
        } else {
            mean(&others)
        }
    }

    fn overall_mean(&self) -> f64 {
        let size = self.size();
        if size == 0 {
            return match self {
                SimilarityMatrix::Dense(_) => 0.0,
                SimilarityMatrix::Uniform { value, .. } => *value,
            };
        }
        let values = (0..size)
            .flat_map(|a| (0..size).map(move |b| (a, b)))
            .map(|(a, b)| self.similarity(a, b))
            .collect::<Vec<_>>();
        mean(&values)
    }
}

/// Similarity capability injected into the aggregator.
pub trait SimilarityEngine: Send + Sync {
    fn mode(&self) -> SimilarityMode;
    fn similarity(&self, ratings: &RatingMatrix) -> SimilarityMatrix;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CosineSimilarity;

impl SimilarityEngine for CosineSimilarity {
    fn mode(&self) -> SimilarityMode {
        SimilarityMode::Cosine
    }

    fn similarity(&self, ratings: &RatingMatrix) -> SimilarityMatrix {
        let size = ratings.size();
        let mut rows = vec![vec![0.0; size]; size];
        for a in 0..size {
            for b in a..size {
                let value = cosine(ratings.row(a), ratings.row(b));
                rows[a][b] = value;
                rows[b][a] = value;
            }
        }
        SimilarityMatrix::Dense(rows)
    }
}

/// Weights every reviewer equally.
#[derive(Debug, Clone, Copy)]
pub struct UniformSimilarity {
    value: f64,
}

impl UniformSimilarity {
    pub fn new(value: f64) -> Self {
        Self { value }
    }
}

impl SimilarityEngine for UniformSimilarity {
    fn mode(&self) -> SimilarityMode {
        SimilarityMode::Uniform
    }

    fn similarity(&self, ratings: &RatingMatrix) -> SimilarityMatrix {
        SimilarityMatrix::Uniform {
            size: ratings.size(),
            value: self.value,
        }
    }
}

pub fn select_engine(mode: SimilarityMode, uniform_weight: f64) -> Box<dyn SimilarityEngine> {
    match mode {
        SimilarityMode::Cosine => Box::new(CosineSimilarity),
        SimilarityMode::Uniform => Box::new(UniformSimilarity::new(uniform_weight)),
    }
}

pub fn cosine(a: &[f64], b: &[f64]) -> f64 {
    let mut dot = 0.0;
    let mut na2 = 0.0;
    let mut nb2 = 0.0;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        na2 += x * x;
        nb2 += y * y;
    }
    if na2 == 0.0 || nb2 == 0.0 {
        0.0
    } else {
        dot / (na2.sqrt() * nb2.sqrt())
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::store::tests::{ratings, store_with};

    fn id(store: &ReviewStore, name: &str) -> EmployeeId {
        store.roster().lookup(name).expect("employee exists")
    }

    #[test]
    fn cosine_of_identical_rows_is_one() {
        let row = [0.0, 4.5, 3.0, 2.0];
        assert!((cosine(&row, &row) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn cosine_of_orthogonal_rows_is_zero() {
        assert_eq!(cosine(&[0.0, 5.0, 0.0], &[3.0, 0.0, 0.0]), 0.0);
    }

    #[test]
    fn cosine_with_zero_vector_is_zero() {
        assert_eq!(cosine(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
        assert_eq!(cosine(&[0.0, 0.0], &[0.0, 0.0]), 0.0);
    }

    #[test]
    fn rating_matrix_holds_mean_per_pair_and_zero_elsewhere() {
        let mut store = store_with(&["Alice", "Bob", "Carol"]);
        store.submit("Bob", "Alice", &ratings(5)).expect("review succeeds");
        store.submit("Carol", "Bob", &ratings(2)).expect("review succeeds");

        let matrix = RatingMatrix::build(&store);
        assert_eq!(matrix.size(), 3);
        assert_eq!(matrix.row(1), &[5.0, 0.0, 0.0]);
        assert_eq!(matrix.row(2), &[0.0, 2.0, 0.0]);
        assert_eq!(matrix.row(0), &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn cosine_engine_is_symmetric() {
        let ratings = RatingMatrix::from_rows(vec![
            vec![0.0, 4.0, 2.0],
            vec![3.0, 0.0, 5.0],
            vec![1.0, 1.0, 0.0],
        ]);
        let matrix = CosineSimilarity.similarity(&ratings);
        for a in 0..3 {
            for b in 0..3 {
                assert_eq!(matrix.similarity(a, b), matrix.similarity(b, a));
            }
        }
    }

    #[test]
    fn weight_excludes_reviewee_column() {
        let mut store = store_with(&["Alice", "Bob", "Carol"]);
        store.submit("Bob", "Alice", &ratings(5)).expect("review succeeds");
        store.submit("Carol", "Alice", &ratings(3)).expect("review succeeds");
        store.submit("Carol", "Bob", &ratings(4)).expect("review succeeds");

        let matrix = CosineSimilarity.similarity(&RatingMatrix::build(&store));
        let (alice, bob, carol) = (id(&store, "Alice"), id(&store, "Bob"), id(&store, "Carol"));

        let expected = (matrix.similarity(bob.index(), bob.index())
            + matrix.similarity(bob.index(), carol.index()))
            / 2.0;
        assert!((matrix.weight(bob, alice) - expected).abs() < 1e-12);
        assert!((matrix.similarity(bob.index(), bob.index()) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn weight_without_similarity_row_uses_overall_mean() {
        let matrix = SimilarityMatrix::Dense(vec![vec![1.0, 0.5], vec![0.5, 1.0]]);
        let store = store_with(&["Alice", "Bob", "Carol"]);
        let carol = id(&store, "Carol");
        let alice = id(&store, "Alice");
        assert!((matrix.weight(carol, alice) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn weight_reads_reviewer_row_through_similarity() {
        let matrix = SimilarityMatrix::Dense(vec![
            vec![1.0, 0.2, 0.6],
            vec![0.2, 1.0, 0.4],
            vec![0.6, 0.4, 1.0],
        ]);
        let store = store_with(&["Alice", "Bob", "Carol"]);
        let (alice, bob, carol) = (id(&store, "Alice"), id(&store, "Bob"), id(&store, "Carol"));

        let expected = (matrix.similarity(carol.index(), alice.index())
            + matrix.similarity(carol.index(), carol.index()))
            / 2.0;
        assert!((matrix.weight(carol, bob) - expected).abs() < 1e-12);
        assert!((matrix.weight(carol, bob) - 0.8).abs() < 1e-12);
    }

    #[test]
    fn weight_with_only_reviewee_column_uses_overall_mean() {
        let matrix = SimilarityMatrix::Dense(vec![vec![0.5]]);
        let store = store_with(&["Alice"]);
        let alice = id(&store, "Alice");
        assert!((matrix.weight(alice, alice) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn uniform_engine_returns_constant_everywhere() {
        let mut store = store_with(&["Alice", "Bob", "Carol"]);
        store.submit("Bob", "Alice", &ratings(5)).expect("review succeeds");
        store.submit("Alice", "Carol", &ratings(1)).expect("review succeeds");

        let engine = select_engine(SimilarityMode::Uniform, 1.0);
        assert_eq!(engine.mode(), SimilarityMode::Uniform);
        let matrix = engine.similarity(&RatingMatrix::build(&store));
        assert_eq!(matrix.size(), 3);

        let weights = store
            .roster()
            .ids()
            .flat_map(|r| store.roster().ids().map(move |e| (r, e)))
            .map(|(r, e)| matrix.weight(r, e))
            .collect::<Vec<_>>();
        assert!(weights.iter().all(|&weight| weight == 1.0));
        assert_eq!(matrix.similarity(0, 2), 1.0);
    }
}
