//! Error types for the admin editor
//!
//! Everything here maps to a blocking notice in the embedding UI. None
//! of it is fatal: the page keeps its prior visible state when an
//! operation is refused. Malformed *persisted* state is deliberately not
//! represented — the snapshot codec treats it as absent.

use backstage_common::CommonError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Not authenticated: open the settings page and log in first")]
    NotAuthenticated,

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("This page has no gallery for category '{0}'")]
    GalleryNotFound(String),

    #[error("Store error: {0}")]
    Store(#[from] CommonError),
}
