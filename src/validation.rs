//! Field rules applied by the data layer before a write, and the failure
//! classes a write can end in.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoError {
    /// One or more field rules failed; nothing was written.
    #[error("validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),
    /// The store rejected the write because of a unique index.
    #[error("unique constraint violated: {}", .0.join(", "))]
    UniqueConstraint(Vec<String>),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl RepoError {
    /// Classify a failed INSERT/UPDATE, turning unique-index violations
    /// into [`RepoError::UniqueConstraint`] carrying `unique_message`.
    pub fn from_write(err: sqlx::Error, unique_message: &str) -> Self {
        let is_unique = err
            .as_database_error()
            .map(|db_err| db_err.is_unique_violation())
            .unwrap_or(false);
        if is_unique {
            RepoError::UniqueConstraint(vec![unique_message.to_string()])
        } else {
            RepoError::Database(err)
        }
    }
}

/// Collects per-field messages in declaration order.
#[derive(Debug, Default)]
pub struct FieldErrors {
    messages: Vec<String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Required field: must be present and not the empty string.
    pub fn require(&mut self, value: Option<&str>, missing: &str, empty: &str) {
        match value {
            None => self.messages.push(missing.to_string()),
            Some("") => self.messages.push(empty.to_string()),
            Some(_) => {}
        }
    }

    /// Required field on a partial update: absent means unchanged.
    pub fn reject_empty(&mut self, value: Option<&str>, empty: &str) {
        if value == Some("") {
            self.messages.push(empty.to_string());
        }
    }

    pub fn into_result(self) -> Result<(), RepoError> {
        if self.messages.is_empty() {
            Ok(())
        } else {
            Err(RepoError::Validation(self.messages))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_distinguishes_missing_and_empty() {
        let mut errors = FieldErrors::new();
        errors.require(None, "missing", "empty");
        errors.require(Some(""), "missing", "empty");
        errors.require(Some("ok"), "missing", "empty");
        match errors.into_result() {
            Err(RepoError::Validation(msgs)) => assert_eq!(msgs, vec!["missing", "empty"]),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn reject_empty_ignores_absent_fields() {
        let mut errors = FieldErrors::new();
        errors.reject_empty(None, "empty");
        errors.reject_empty(Some("title"), "empty");
        assert!(errors.into_result().is_ok());
    }

    #[test]
    fn non_unique_errors_stay_database_errors() {
        let err = RepoError::from_write(sqlx::Error::RowNotFound, "dup");
        assert!(matches!(err, RepoError::Database(sqlx::Error::RowNotFound)));
    }
}
