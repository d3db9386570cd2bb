//! Typed query parameters for endpoint inputs.

pub(crate) mod chapter;
