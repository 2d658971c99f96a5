use crate::error::{AppraisalError, Result};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

pub const MIN_SCORE: u8 = 1;
pub const MAX_SCORE: u8 = 5;

pub const DEFAULT_CATEGORIES: [&str; 8] = [
    "Productivity",
    "Teamwork",
    "Innovation",
    "Communication",
    "Leadership",
    "Problem Solving",
    "Adaptability",
    "Quality of Work",
];

/// Position of an employee in the roster. Only valid for the roster that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct EmployeeId(usize);

impl EmployeeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Employee {
    pub name: String,
    pub code: String,
}

/// Ordered category list shared by objective scores and peer ratings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Categories(Vec<String>);

impl Default for Categories {
    fn default() -> Self {
        Self(DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect())
    }
}

impl Categories {
    pub fn new(names: Vec<String>) -> Result<Self> {
        if names.is_empty() {
            return Err(AppraisalError::InvalidRoster(
                "category list cannot be empty".to_string(),
            ));
        }
        let mut seen = std::collections::HashSet::new();
        if let Some(dup) = names.iter().find(|name| !seen.insert(name.as_str())) {
            return Err(AppraisalError::InvalidRoster(format!(
                "duplicate category: {dup}"
            )));
        }
        Ok(Self(names))
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Converts a category-keyed map into a sheet aligned with this list.
    /// Missing, unknown and out-of-range entries are reported together.
    pub fn sheet_from_map(
        &self,
        values: &BTreeMap<String, i64>,
    ) -> std::result::Result<ScoreSheet, String> {
        let mut problems = Vec::new();

        let unknown = values
            .keys()
            .filter(|&key| !self.0.contains(key))
            .cloned()
            .collect::<Vec<_>>();
        if !unknown.is_empty() {
            problems.push(format!("unknown category(s): {}", unknown.join(", ")));
        }

        let mut scores = Vec::with_capacity(self.0.len());
        let mut missing = Vec::new();
        for category in &self.0 {
            match values.get(category) {
                Some(&value) if (i64::from(MIN_SCORE)..=i64::from(MAX_SCORE)).contains(&value) => {
                    scores.push(value as u8);
                }
                Some(&value) => problems.push(format!(
                    "{category} = {value} is outside {MIN_SCORE}..={MAX_SCORE}"
                )),
                None => missing.push(category.as_str()),
            }
        }
        if !missing.is_empty() {
            problems.push(format!("missing category(s): {}", missing.join(", ")));
        }

        if problems.is_empty() {
            Ok(ScoreSheet(scores))
        } else {
            Err(problems.join("; "))
        }
    }
}

/// One integer score per category, in category order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ScoreSheet(Vec<u8>);

impl ScoreSheet {
    pub fn values(&self) -> &[u8] {
        &self.0
    }

    pub fn mean(&self) -> f64 {
        if self.0.is_empty() {
            return 0.0;
        }
        let total: u32 = self.0.iter().map(|&v| u32::from(v)).sum();
        f64::from(total) / self.0.len() as f64
    }
}

/// Immutable set of employees and their objective scores.
#[derive(Debug, Clone)]
pub struct Roster {
    categories: Categories,
    employees: Vec<Employee>,
    objective: Vec<ScoreSheet>,
    by_name: HashMap<String, EmployeeId>,
}

impl Roster {
    pub fn new(categories: Categories) -> Self {
        Self {
            categories,
            employees: Vec::new(),
            objective: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    pub fn add(
        &mut self,
        employee: Employee,
        objective: &BTreeMap<String, i64>,
    ) -> Result<EmployeeId> {
        if self.by_name.contains_key(&employee.name) {
            return Err(AppraisalError::InvalidRoster(format!(
                "duplicate employee name: {}",
                employee.name
            )));
        }
        let sheet = self.categories.sheet_from_map(objective).map_err(|reason| {
            AppraisalError::InvalidRoster(format!(
                "objective scores for {}: {reason}",
                employee.name
            ))
        })?;

        let id = EmployeeId(self.employees.len());
        self.by_name.insert(employee.name.clone(), id);
        self.employees.push(employee);
        self.objective.push(sheet);
        Ok(id)
    }

    pub fn categories(&self) -> &Categories {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = EmployeeId> {
        (0..self.employees.len()).map(EmployeeId)
    }

    pub fn lookup(&self, name: &str) -> Result<EmployeeId> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| AppraisalError::UnknownEmployee(name.to_string()))
    }

    pub fn employee(&self, id: EmployeeId) -> &Employee {
        &self.employees[id.0]
    }

    pub fn objective(&self, id: EmployeeId) -> &ScoreSheet {
        &self.objective[id.0]
    }
}
