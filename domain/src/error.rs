//! Error types for the `domain` layer.
use entity_api::error::{EntityApiErrorKind, Error as EntityApiError};
use sea_orm::DbErr;
use std::error::Error as StdError;
use std::fmt;

/// Top-level domain error type.
/// Errors in the Domain layer are modeled as a tree structure
/// with `domain::error::Error` as the root type holding a tree of `error_kind`
/// enums that represent the kinds of errors that can occur in the domain layer or
/// in lower layers. The `source` field holds the original error that caused
/// the domain error. `web` depends on `domain` and maps the kinds to HTTP responses,
/// but never depends on `entity_api` directly.
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: DomainErrorKind,
}

/// Enum representing the major categories of errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum DomainErrorKind {
    /// Input rejected before any write, with a message meant for the client
    Validation(String),
    Internal(InternalErrorKind),
}

/// Enum representing the various kinds of internal errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum InternalErrorKind {
    Entity(EntityErrorKind),
}

/// Errors bubbling up from the "Entity" layer (`entity_api` and `entity`), reduced to
/// the subset of kinds that matter to the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum EntityErrorKind {
    NotFound,
    Conflict,
    DbTransaction,
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Error {
            source: None,
            error_kind: DomainErrorKind::Validation(message.into()),
        }
    }

    pub fn not_found() -> Self {
        Error {
            source: None,
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Entity(
                EntityErrorKind::NotFound,
            )),
        }
    }

    pub fn conflict() -> Self {
        Error {
            source: None,
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Entity(
                EntityErrorKind::Conflict,
            )),
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.error_kind
            == DomainErrorKind::Internal(InternalErrorKind::Entity(EntityErrorKind::NotFound))
    }

    /// Name of the unique constraint a failed write ran into, when the entity
    /// layer could identify one.
    pub fn violated_constraint(&self) -> Option<&str> {
        self.source
            .as_ref()?
            .downcast_ref::<EntityApiError>()?
            .violated_constraint()
    }

    /// Client facing description of the error. Internal failures stay opaque.
    pub fn message(&self) -> String {
        match &self.error_kind {
            DomainErrorKind::Validation(message) => message.clone(),
            DomainErrorKind::Internal(InternalErrorKind::Entity(EntityErrorKind::NotFound)) => {
                "Resource not found".to_string()
            }
            DomainErrorKind::Internal(InternalErrorKind::Entity(EntityErrorKind::Conflict)) => {
                "Resource already exists".to_string()
            }
            DomainErrorKind::Internal(_) => "Internal server error".to_string(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Domain Error: {self:?}")
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

// This is where we translate errors from the `entity_api` layer to the `domain` layer.
impl From<EntityApiError> for Error {
    fn from(err: EntityApiError) -> Self {
        let entity_error_kind = match err.error_kind {
            // A row that vanished between read and write counts as missing.
            EntityApiErrorKind::RecordNotFound | EntityApiErrorKind::RecordNotUpdated => {
                EntityErrorKind::NotFound
            }
            EntityApiErrorKind::RecordConflict(_) => EntityErrorKind::Conflict,
            EntityApiErrorKind::SystemError => EntityErrorKind::DbTransaction,
        };

        Error {
            source: Some(Box::new(err)),
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Entity(entity_error_kind)),
        }
    }
}

// Raised when opening or committing a transaction.
impl From<DbErr> for Error {
    fn from(err: DbErr) -> Self {
        Error {
            source: Some(Box::new(err)),
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Entity(
                EntityErrorKind::DbTransaction,
            )),
        }
    }
}
