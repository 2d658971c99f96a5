pub mod aggregate;
pub mod similarity;
pub mod store;

pub use aggregate::ScoreAggregator;
pub use similarity::{select_engine, SimilarityEngine};
pub use store::ReviewStore;
