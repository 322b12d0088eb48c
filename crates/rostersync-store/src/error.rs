//! Error types for calendar store operations.

use std::fmt;
use thiserror::Error;

/// The category of a store error.
///
/// Query failures are fatal for the sync phase that issued them;
/// mutation failures are reported per item and processing continues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreErrorCode {
    /// A range or directory query failed.
    QueryFailed,
    /// A single insert or delete failed.
    MutationFailed,
    /// The backend could not be reached at all.
    BackendUnavailable,
    /// The store returned a row this client cannot interpret.
    InvalidRecord,
    /// The addressed calendar or entry does not exist.
    NotFound,
}

impl StoreErrorCode {
    /// Returns a stable snake_case name for this code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::QueryFailed => "query_failed",
            Self::MutationFailed => "mutation_failed",
            Self::BackendUnavailable => "backend_unavailable",
            Self::InvalidRecord => "invalid_record",
            Self::NotFound => "not_found",
        }
    }

    /// Returns true for errors raised while reading from the store.
    pub fn is_query(&self) -> bool {
        matches!(self, Self::QueryFailed | Self::BackendUnavailable)
    }

    /// Returns true for errors raised while writing to the store.
    pub fn is_mutation(&self) -> bool {
        matches!(self, Self::MutationFailed | Self::NotFound)
    }
}

impl fmt::Display for StoreErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An error raised by a calendar store backend.
#[derive(Debug, Error)]
pub struct StoreError {
    /// The error code categorizing this error.
    code: StoreErrorCode,
    /// A human-readable message describing the error.
    message: String,
    /// The underlying cause, if any.
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StoreError {
    /// Creates a new store error with the given code and message.
    pub fn new(code: StoreErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Creates a query failure.
    pub fn query(message: impl Into<String>) -> Self {
        Self::new(StoreErrorCode::QueryFailed, message)
    }

    /// Creates a mutation failure.
    pub fn mutation(message: impl Into<String>) -> Self {
        Self::new(StoreErrorCode::MutationFailed, message)
    }

    /// Creates a backend-unavailable error.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::new(StoreErrorCode::BackendUnavailable, message)
    }

    /// Creates an invalid-record error.
    pub fn invalid_record(message: impl Into<String>) -> Self {
        Self::new(StoreErrorCode::InvalidRecord, message)
    }

    /// Creates a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StoreErrorCode::NotFound, message)
    }

    /// Sets the source error.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    /// Returns the error code.
    pub fn code(&self) -> StoreErrorCode {
        self.code
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns true for errors raised while reading from the store.
    pub fn is_query(&self) -> bool {
        self.code.is_query()
    }

    /// Returns true for errors raised while writing to the store.
    pub fn is_mutation(&self) -> bool {
        self.code.is_mutation()
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// A specialized Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_classifiers() {
        assert!(StoreErrorCode::QueryFailed.is_query());
        assert!(StoreErrorCode::BackendUnavailable.is_query());
        assert!(!StoreErrorCode::MutationFailed.is_query());

        assert!(StoreErrorCode::MutationFailed.is_mutation());
        assert!(StoreErrorCode::NotFound.is_mutation());
        assert!(!StoreErrorCode::QueryFailed.is_mutation());
    }

    #[test]
    fn constructor_codes() {
        assert_eq!(StoreError::query("q").code(), StoreErrorCode::QueryFailed);
        assert_eq!(
            StoreError::mutation("m").code(),
            StoreErrorCode::MutationFailed
        );
        assert_eq!(
            StoreError::backend("b").code(),
            StoreErrorCode::BackendUnavailable
        );
    }

    #[test]
    fn display_includes_code_and_message() {
        let err = StoreError::query("instance enumeration failed");
        let display = format!("{err}");
        assert!(display.contains("query_failed"));
        assert!(display.contains("instance enumeration failed"));
    }

    #[test]
    fn with_source_is_exposed() {
        use std::error::Error;
        let io_err = std::io::Error::other("socket closed");
        let err = StoreError::backend("provider went away").with_source(io_err);
        assert!(err.source().is_some());
    }
}
