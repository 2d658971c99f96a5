use crate::engine::ReviewStore;
use crate::error::{AppraisalError, Result};
use crate::types::roster::{Categories, Employee, Roster};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// On-disk description of one appraisal cycle.
#[derive(Debug, Clone, Deserialize)]
pub struct CycleFile {
    pub categories: Option<Vec<String>>,
    #[serde(default)]
    pub employees: Vec<EmployeeEntry>,
    #[serde(default)]
    pub reviews: Vec<ReviewEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmployeeEntry {
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub objective: BTreeMap<String, i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReviewEntry {
    pub reviewer: String,
    pub reviewee: String,
    #[serde(default)]
    pub ratings: BTreeMap<String, i64>,
}

pub fn load_cycle(path: &Path) -> Result<ReviewStore> {
    if !path.exists() {
        return Err(AppraisalError::PathNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    let store = parse_cycle(&content).map_err(|e| match e {
        AppraisalError::Toml(inner) => {
            AppraisalError::CycleParse(format!("{}: {}", path.display(), inner))
        }
        other => other,
    })?;
    tracing::info!(
        path = %path.display(),
        employees = store.roster().len(),
        reviews = store.reviews().len(),
        "appraisal cycle loaded"
    );
    Ok(store)
}

pub fn parse_cycle(content: &str) -> Result<ReviewStore> {
    let file: CycleFile = toml::from_str(content)?;
    build_store(file)
}

/// Builds the roster, then replays each review through `ReviewStore::submit` in file order.
pub fn build_store(file: CycleFile) -> Result<ReviewStore> {
    let categories = match file.categories {
        Some(names) => Categories::new(names)?,
        None => Categories::default(),
    };

    let mut roster = Roster::new(categories);
    for entry in file.employees {
        roster.add(
            Employee {
                name: entry.name,
                code: entry.code,
            },
            &entry.objective,
        )?;
    }

    let mut store = ReviewStore::new(roster);
    for (position, review) in file.reviews.iter().enumerate() {
        store
            .submit(&review.reviewer, &review.reviewee, &review.ratings)
            .map_err(|e| with_review_position(e, position + 1))?;
    }
    Ok(store)
}

fn with_review_position(error: AppraisalError, position: usize) -> AppraisalError {
    match error {
        AppraisalError::InvalidPair(msg) => {
            AppraisalError::InvalidPair(format!("review #{position}: {msg}"))
        }
        AppraisalError::InvalidRatings(msg) => {
            AppraisalError::InvalidRatings(format!("review #{position}: {msg}"))
        }
        AppraisalError::UnknownEmployee(msg) => {
            AppraisalError::UnknownEmployee(format!("{msg} (review #{position})"))
        }
        other => other,
    }
}
