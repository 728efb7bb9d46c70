use thiserror::Error;

use crate::schema::FieldViolation;

/// Errors raised by the document store.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PersistenceError {
    /// The fields failed the collection schema.
    #[error("{model} validation failed: {}", join_violations(.violations))]
    Validation {
        model: String,
        violations: Vec<FieldViolation>,
    },

    #[error("collection `{0}` has not been defined")]
    UnknownCollection(String),

    #[error("database connection is closed")]
    Closed,

    #[error("unsupported database endpoint `{0}`")]
    UnsupportedEndpoint(String),
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_lists_every_violation() {
        let error = PersistenceError::Validation {
            model: "Book".to_string(),
            violations: vec![
                FieldViolation::new("title", "Path `title` is required."),
                FieldViolation::new("author", "Path `author` is required."),
            ],
        };

        assert_eq!(
            error.to_string(),
            "Book validation failed: title: Path `title` is required., author: Path `author` is required."
        );
    }
}
