//! Request extractors whose rejections answer with the usual error envelope
//! instead of axum's plain-text bodies.

pub(crate) mod id_path;
pub(crate) mod json_body;
pub(crate) mod query_params;

use crate::Error;
use domain::error::Error as DomainError;
use log::*;

fn rejected(what: &str, reason: String) -> Error {
    warn!("Rejected {what}: {reason}");
    DomainError::validation(reason).into()
}
