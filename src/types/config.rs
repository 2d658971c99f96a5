use crate::error::AppraisalError;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppraisalConfig {
    pub scoring: Option<ScoringConfig>,
    pub similarity: Option<SimilarityConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringConfig {
    pub objective_weight: Option<f64>,
    pub peer_weight: Option<f64>,
    pub scale: Option<f64>,
    pub approval_threshold: Option<f64>,
    pub min_reviews: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimilarityMode {
    Cosine,
    Uniform,
}

impl SimilarityMode {
    pub fn label(self) -> &'static str {
        match self {
            SimilarityMode::Cosine => "cosine",
            SimilarityMode::Uniform => "uniform",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SimilarityConfig {
    pub mode: Option<SimilarityMode>,
    pub uniform_weight: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
}

/// Constants of the final-score blend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringPolicy {
    pub objective_weight: f64,
    pub peer_weight: f64,
    pub scale: f64,
    pub approval_threshold: f64,
    pub min_reviews: usize,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            objective_weight: 0.7,
            peer_weight: 0.3,
            scale: 5.0,
            approval_threshold: 0.70,
            min_reviews: 3,
        }
    }
}

pub const DEFAULT_UNIFORM_WEIGHT: f64 = 1.0;

impl ScoringConfig {
    fn overlay(self, upper: ScoringConfig) -> ScoringConfig {
        ScoringConfig {
            objective_weight: upper.objective_weight.or(self.objective_weight),
            peer_weight: upper.peer_weight.or(self.peer_weight),
            scale: upper.scale.or(self.scale),
            approval_threshold: upper.approval_threshold.or(self.approval_threshold),
            min_reviews: upper.min_reviews.or(self.min_reviews),
        }
    }
}

impl SimilarityConfig {
    fn overlay(self, upper: SimilarityConfig) -> SimilarityConfig {
        SimilarityConfig {
            mode: upper.mode.or(self.mode),
            uniform_weight: upper.uniform_weight.or(self.uniform_weight),
        }
    }
}

impl LoggingConfig {
    fn overlay(self, upper: LoggingConfig) -> LoggingConfig {
        LoggingConfig {
            level: upper.level.or(self.level),
        }
    }
}

fn overlay_table<T>(lower: Option<T>, upper: Option<T>, merge: fn(T, T) -> T) -> Option<T> {
    match (lower, upper) {
        (Some(lower), Some(upper)) => Some(merge(lower, upper)),
        (lower, upper) => upper.or(lower),
    }
}

impl AppraisalConfig {
    /// Field-by-field merge where every key set in `upper` wins.
    pub fn overlay(self, upper: AppraisalConfig) -> AppraisalConfig {
        AppraisalConfig {
            scoring: overlay_table(self.scoring, upper.scoring, ScoringConfig::overlay),
            similarity: overlay_table(self.similarity, upper.similarity, SimilarityConfig::overlay),
            logging: overlay_table(self.logging, upper.logging, LoggingConfig::overlay),
        }
    }

    pub fn scoring_policy(&self) -> ScoringPolicy {
        let defaults = ScoringPolicy::default();
        match &self.scoring {
            Some(scoring) => ScoringPolicy {
                objective_weight: scoring.objective_weight.unwrap_or(defaults.objective_weight),
                peer_weight: scoring.peer_weight.unwrap_or(defaults.peer_weight),
                scale: scoring.scale.unwrap_or(defaults.scale),
                approval_threshold: scoring
                    .approval_threshold
                    .unwrap_or(defaults.approval_threshold),
                min_reviews: scoring.min_reviews.unwrap_or(defaults.min_reviews),
            },
            None => defaults,
        }
    }

    pub fn similarity_mode(&self) -> SimilarityMode {
        self.similarity
            .as_ref()
            .and_then(|similarity| similarity.mode)
            .unwrap_or(SimilarityMode::Cosine)
    }

    pub fn uniform_weight(&self) -> f64 {
        self.similarity
            .as_ref()
            .and_then(|similarity| similarity.uniform_weight)
            .unwrap_or(DEFAULT_UNIFORM_WEIGHT)
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging
            .as_ref()
            .and_then(|logging| logging.level.as_deref())
    }

    pub fn validate(&self) -> Result<(), AppraisalError> {
        let policy = self.scoring_policy();

        for (key, value) in [
            ("objective_weight", policy.objective_weight),
            ("peer_weight", policy.peer_weight),
            ("approval_threshold", policy.approval_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(AppraisalError::ConfigParse(format!(
                    "scoring.{key} must be between 0.0 and 1.0"
                )));
            }
        }

        let weight_sum = policy.objective_weight + policy.peer_weight;
        if (weight_sum - 1.0).abs() > 0.001 {
            return Err(AppraisalError::ConfigParse(format!(
                "scoring weights must sum to 1.0 (found {:.3})",
                weight_sum
            )));
        }

        if policy.scale <= 0.0 || !policy.scale.is_finite() {
            return Err(AppraisalError::ConfigParse(
                "scoring.scale must be a positive number".to_string(),
            ));
        }

        if policy.min_reviews == 0 {
            return Err(AppraisalError::ConfigParse(
                "scoring.min_reviews must be greater than 0".to_string(),
            ));
        }

        let uniform_weight = self.uniform_weight();
        if uniform_weight <= 0.0 || !uniform_weight.is_finite() {
            return Err(AppraisalError::ConfigParse(
                "similarity.uniform_weight must be a positive number".to_string(),
            ));
        }

        if let Some(level) = self.log_level() {
            if !matches!(level, "error" | "warn" | "info" | "debug" | "trace") {
                return Err(AppraisalError::ConfigParse(format!(
                    "unsupported logging.level: {level}"
                )));
            }
        }

        Ok(())
    }
}
