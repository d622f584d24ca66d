use crate::record::RecordId;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlacementError {
    #[error("{0}")]
    Validation(ValidationErrors),

    #[error("Record not found: {0}")]
    NotFound(RecordId),

    #[error("No free id left for {0}")]
    IdsExhausted(&'static str),

    #[error("The {0} list is no longer open")]
    Unmounted(&'static str),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Config error: {0}")]
    Config(String),
}

impl From<ValidationErrors> for PlacementError {
    fn from(errors: ValidationErrors) -> Self {
        PlacementError::Validation(errors)
    }
}

pub type Result<T> = std::result::Result<T, PlacementError>;

/// What is wrong with a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Problem {
    /// A required field was left blank.
    Missing,
    /// The value could not be accepted (bad format, unknown field, refused transition).
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub field: String,
    pub problem: Problem,
}

impl FieldIssue {
    pub fn missing(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            problem: Problem::Missing,
        }
    }

    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            problem: Problem::Invalid(reason.into()),
        }
    }
}

/// Every field problem found in one validation pass.
///
/// Validation never stops at the first problem: forms show all of them inline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    pub issues: Vec<FieldIssue>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(issue: FieldIssue) -> Self {
        Self {
            issues: vec![issue],
        }
    }

    pub fn push(&mut self, issue: FieldIssue) {
        self.issues.push(issue);
    }

    pub fn extend(&mut self, other: ValidationErrors) {
        self.issues.extend(other.issues);
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Names of the required fields that were left blank.
    pub fn missing_fields(&self) -> Vec<&str> {
        self.issues
            .iter()
            .filter(|issue| issue.problem == Problem::Missing)
            .map(|issue| issue.field.as_str())
            .collect()
    }

    /// Names of the fields whose values were rejected.
    pub fn invalid_fields(&self) -> Vec<&str> {
        self.issues
            .iter()
            .filter(|issue| matches!(issue.problem, Problem::Invalid(_)))
            .map(|issue| issue.field.as_str())
            .collect()
    }

    /// Converts to `Ok(())` when nothing was collected.
    pub fn into_result(self) -> std::result::Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .issues
            .iter()
            .map(|issue| match &issue.problem {
                Problem::Missing => format!("{} is required", issue.field),
                Problem::Invalid(reason) => format!("{}: {}", issue.field, reason),
            })
            .collect();
        write!(f, "Validation failed: {}", parts.join("; "))
    }
}
