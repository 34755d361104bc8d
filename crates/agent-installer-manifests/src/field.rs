//! Field-addressed validation errors.
//!
//! Validation collects every problem it finds into an [`ErrorList`] instead of
//! stopping at the first one. Callers that need a single error convert the
//! list with [`ErrorList::into_result`].

use std::fmt;

use thiserror::Error;

/// A dotted path to a field, e.g. `spec.networking.networkType`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath(Vec<String>);

impl FieldPath {
    /// Create a path from its segments.
    #[must_use]
    pub fn new(segments: &[&str]) -> Self {
        Self(segments.iter().map(|s| (*s).to_string()).collect())
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

/// The category of a field error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorType {
    /// A required value is missing or unusable.
    Required,
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => write!(f, "Required value"),
        }
    }
}

/// A single validation failure at a field path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// The error category.
    pub error_type: ErrorType,
    /// The offending field.
    pub field: FieldPath,
    /// Human-readable detail.
    pub detail: String,
}

impl FieldError {
    /// A `Required` error.
    #[must_use]
    pub fn required(field: &FieldPath, detail: impl Into<String>) -> Self {
        Self {
            error_type: ErrorType::Required,
            field: field.clone(),
            detail: detail.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.field, self.error_type, self.detail)
    }
}

/// An ordered collection of field errors. Empty means valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorList(Vec<FieldError>);

impl ErrorList {
    /// Create an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an error.
    pub fn push(&mut self, error: FieldError) {
        self.0.push(error);
    }

    /// Whether no errors were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of recorded errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over the errors in the order they were recorded.
    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.0.iter()
    }

    /// Number of errors recorded against `field`.
    #[must_use]
    pub fn count_at(&self, field: &FieldPath) -> usize {
        self.0.iter().filter(|e| &e.field == field).count()
    }

    /// Collapse the list into a single result.
    ///
    /// # Errors
    ///
    /// Returns an [`AggregateError`] holding every error if the list is not
    /// empty.
    pub fn into_result(self) -> Result<(), AggregateError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(AggregateError(self.0))
        }
    }
}


/// A non-empty set of field errors reported as one error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", render(.0))]
pub struct AggregateError(Vec<FieldError>);

impl AggregateError {
    /// Every error in the aggregate.
    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// The first error, for callers that report only one.
    #[must_use]
    pub fn first(&self) -> &FieldError {
        // Only constructed from a non-empty list.
        &self.0[0]
    }
}

/// A single error renders as itself, several as `[a, b]`.
fn render(errors: &[FieldError]) -> String {
    match errors {
        [only] => only.to_string(),
        _ => {
            let joined: Vec<String> = errors.iter().map(ToString::to_string).collect();
            format!("[{}]", joined.join(", "))
        }
    }
}
