//! # Backstage Editor
//!
//! Admin edit-state engine for a static site: lets a site owner flip a
//! page into edit mode, change text, images, lists, and galleries in
//! place, and persist the result to a local key-value store.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ registry: scan page, mark + key editables   │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ session: mode state machine                 │
//! │  - auth-gated view ⇄ edit toggle            │
//! │  - active image target + handler binding    │
//! │  - save: collect → store (whole snapshot)   │
//! └─────────────────────────────────────────────┘
//!            ↓                      ↓
//! ┌──────────────────────┐ ┌──────────────────────┐
//! │ snapshot: collect /  │ │ mutators: add card,  │
//! │ apply / decode       │ │ add image, replace   │
//! └──────────────────────┘ └──────────────────────┘
//! ```
//!
//! ## Core rules
//!
//! 1. **Queries are live**: role accessors re-read the page; mutator
//!    insertions are first-class registry members immediately.
//! 2. **Persistence is wholesale**: one snapshot under one key,
//!    overwritten atomically from the caller's perspective.
//! 3. **Bad persisted data is absent data**: decode failures never
//!    surface, stale keys are skipped per-key.
//! 4. **Nothing here is fatal**: every failure is a local, recoverable
//!    notice and the page keeps its prior state.
//!
//! ## Usage
//!
//! ```rust
//! use backstage_common::MemoryStore;
//! use backstage_dom::Document;
//! use backstage_editor::{auth, AdminSession};
//!
//! let page = r#"<body><h1 data-admin-key="hero">Hello</h1></body>"#;
//! let mut session = AdminSession::new(Document::parse(page), MemoryStore::new());
//! session.boot("");
//!
//! auth::login(session.store_mut()).unwrap();
//! session.enter_edit().unwrap();
//! // ...edit the document in place...
//! session.save_and_exit().unwrap();
//! ```

mod errors;
mod session;

pub mod auth;
pub mod launch;
pub mod mutators;
pub mod registry;
pub mod snapshot;

pub use errors::EditorError;
pub use launch::LaunchOptions;
pub use registry::Role;
pub use session::{AdminSession, KeyEvent, KeyOutcome, Mode, ADMIN_BODY_CLASS, PANEL_ID, STORAGE_KEY};
pub use snapshot::AdminSnapshot;
