//! Error types for entity API
use std::error::Error as StdError;
use std::fmt;

use serde::Serialize;

use sea_orm::error::{DbErr, SqlErr};

/// Errors while executing operations related to entities.
/// The intent is to categorize errors into two major types:
///  * Errors related to data. Ex DbError::RecordNotFound
///  * Errors related to interactions with the database itself. Ex DbError::Conn
#[derive(Debug, PartialEq)]
pub struct Error {
    // Underlying error emitted from seaORM internals
    pub source: Option<DbErr>,
    // Enum representing which category of error
    pub error_kind: EntityApiErrorKind,
}

#[derive(Debug, PartialEq, Serialize)]
pub enum EntityApiErrorKind {
    // Record not found
    RecordNotFound,
    // Record not updated
    RecordNotUpdated,
    // A unique constraint rejected the write, named when Postgres reports it
    RecordConflict(Option<String>),
    // Errors related to interactions with the database itself. Ex DbError::Conn
    SystemError,
}

impl Error {
    pub fn not_found() -> Self {
        Error {
            source: None,
            error_kind: EntityApiErrorKind::RecordNotFound,
        }
    }

    /// Name of the unique constraint that rejected the write, if the database
    /// error named one.
    pub fn violated_constraint(&self) -> Option<&str> {
        match &self.error_kind {
            EntityApiErrorKind::RecordConflict(constraint) => constraint.as_deref(),
            _ => None,
        }
    }
}

/// Extracts the constraint name from a PostgreSQL unique violation message, e.g.
/// `duplicate key value violates unique constraint "scene_transitions_pair_key"`.
pub(crate) fn constraint_name(message: &str) -> Option<String> {
    let (_, rest) = message.split_once("unique constraint \"")?;
    let (name, _) = rest.split_once('"')?;
    Some(name.to_string())
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Entity API Error: {:?}", self)
    }
}

impl StdError for Error {}

impl From<DbErr> for Error {
    fn from(err: DbErr) -> Self {
        if let Some(SqlErr::UniqueConstraintViolation(message)) = err.sql_err() {
            return Error {
                error_kind: EntityApiErrorKind::RecordConflict(constraint_name(&message)),
                source: Some(err),
            };
        }

        match err {
            DbErr::RecordNotFound(_) => Error {
                source: Some(err),
                error_kind: EntityApiErrorKind::RecordNotFound,
            },
            DbErr::RecordNotUpdated => Error {
                source: Some(err),
                error_kind: EntityApiErrorKind::RecordNotUpdated,
            },
            DbErr::ConnectionAcquire(_) => Error {
                source: Some(err),
                error_kind: EntityApiErrorKind::SystemError,
            },
            DbErr::Conn(_) => Error {
                source: Some(err),
                error_kind: EntityApiErrorKind::SystemError,
            },
            DbErr::Exec(_) => Error {
                source: Some(err),
                error_kind: EntityApiErrorKind::SystemError,
            },
            _ => Error {
                source: Some(err),
                error_kind: EntityApiErrorKind::SystemError,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constraint_name_is_read_from_postgres_message() {
        let message =
            r#"duplicate key value violates unique constraint "scene_transitions_pair_key""#;
        assert_eq!(
            constraint_name(message),
            Some("scene_transitions_pair_key".to_string())
        );
    }

    #[test]
    fn constraint_name_is_none_for_unrelated_messages() {
        assert_eq!(constraint_name("connection reset by peer"), None);
    }

    #[test]
    fn record_not_found_maps_to_record_not_found_kind() {
        let err: Error = DbErr::RecordNotFound("scenes".to_string()).into();
        assert_eq!(err.error_kind, EntityApiErrorKind::RecordNotFound);
        assert_eq!(err.violated_constraint(), None);
    }

    #[test]
    fn conflict_exposes_the_constraint_it_names() {
        let err = Error {
            source: None,
            error_kind: EntityApiErrorKind::RecordConflict(Some(
                "scene_transitions_order_key".to_string(),
            )),
        };
        assert_eq!(err.violated_constraint(), Some("scene_transitions_order_key"));

        let unnamed = Error {
            source: None,
            error_kind: EntityApiErrorKind::RecordConflict(None),
        };
        assert_eq!(unnamed.violated_constraint(), None);
    }

    #[test]
    fn connection_errors_map_to_system_error() {
        let err: Error = DbErr::Custom("pool closed".to_string()).into();
        assert_eq!(err.error_kind, EntityApiErrorKind::SystemError);
    }
}
