//! # Backstage Common
//!
//! External-collaborator seams shared across the workspace.
//!
//! The admin layer runs against two ambient capabilities a browser would
//! normally provide: a string key-value store (local storage) and a file
//! reader that turns an upload into an embeddable data URL. Both are
//! traits here so the core logic tests without a browser.

mod error;
mod file;
mod store;

pub use error::CommonError;
pub use file::{DataUrlReader, FileReader, FileUpload};
pub use store::{JsonFileStore, KeyValueStore, MemoryStore};
