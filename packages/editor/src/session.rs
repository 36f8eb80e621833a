//! # Admin session
//!
//! The mode controller. An [`AdminSession`] owns the page, the backing
//! store, and every piece of state the original kept in module globals:
//! the current mode, the single active image target, and the set of
//! image keys with a click handler bound.
//!
//! The two-state machine is the heart of it:
//!
//! ```text
//!          enter_edit (auth-gated)
//!   View ───────────────────────────▶ Edit
//!     ◀─────────────────────────────
//!          exit_edit / save_and_exit
//! ```
//!
//! Entering edit makes every registered text node content-editable,
//! marks the body, and reveals the control panel; leaving reverses all
//! three. Saving serializes a full snapshot and overwrites the stored
//! one — there is no partial write.

use std::collections::HashSet;

use backstage_common::{FileReader, FileUpload, KeyValueStore};
use backstage_dom::Document;

use crate::launch::LaunchOptions;
use crate::registry::{self, Role, EDITABLE_ATTR};
use crate::{auth, mutators, snapshot, EditorError};

/// Storage key for the persisted snapshot
pub const STORAGE_KEY: &str = "community-drafting-admin";
/// Body class set while edit mode is active
pub const ADMIN_BODY_CLASS: &str = "admin-active";
/// Id of the control panel element
pub const PANEL_ID: &str = "admin-panel";

/// Admin mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    View,
    Edit,
}

/// A keyboard event as reported by the embedding page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyEvent {
    pub ctrl: bool,
    pub key: char,
}

impl KeyEvent {
    /// The reserved shortcut: Control + backtick
    pub fn is_admin_shortcut(&self) -> bool {
        self.ctrl && self.key == '`'
    }
}

/// Outcome of feeding a key event to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Not the admin shortcut; let the browser have it
    Ignored,
    EnteredEdit,
    ExitedEdit,
    /// Shortcut pressed while unauthenticated; show a notice
    Refused,
}

impl KeyOutcome {
    /// Whether the embedder should suppress default key handling
    pub fn consumed(&self) -> bool {
        *self != KeyOutcome::Ignored
    }
}

/// One admin's editing session over a page
pub struct AdminSession<S: KeyValueStore> {
    /// Page being edited
    pub document: Document,

    store: S,
    mode: Mode,

    /// The image awaiting a file-replacement result, if any
    active_image_target: Option<String>,

    /// Image keys with a click handler bound (each bound exactly once)
    bound_images: HashSet<String>,
}

impl<S: KeyValueStore> AdminSession<S> {
    pub fn new(document: Document, store: S) -> Self {
        Self {
            document,
            store,
            mode: Mode::View,
            active_image_target: None,
            bound_images: HashSet::new(),
        }
    }

    /// Page-load sequence: scan, restore the saved snapshot, bind image
    /// handlers, and auto-enter edit mode when `admin=1` and the auth
    /// flag agree.
    pub fn boot(&mut self, query: &str) {
        registry::scan(&mut self.document);
        if let Some(saved) = snapshot::decode(self.store.get(STORAGE_KEY).as_deref()) {
            snapshot::apply(&mut self.document, &saved);
        }
        self.bind_image_handlers();

        let options = LaunchOptions::from_query(query);
        if options.admin && auth::is_authenticated(&self.store) {
            self.set_mode(true);
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_edit(&self) -> bool {
        self.mode == Mode::Edit
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Tear down the session, handing the store back (page reloads in
    /// the embedder keep storage while the document is rebuilt).
    pub fn into_store(self) -> S {
        self.store
    }

    /// Request edit mode. Refused without the authenticated flag, with
    /// no change to the page.
    pub fn enter_edit(&mut self) -> Result<(), EditorError> {
        if !auth::is_authenticated(&self.store) {
            return Err(EditorError::NotAuthenticated);
        }
        self.set_mode(true);
        Ok(())
    }

    /// Leave edit mode. Always permitted; unsaved edits stay on the
    /// live page but are not persisted.
    pub fn exit_edit(&mut self) {
        self.set_mode(false);
    }

    /// Persist the current page state wholesale.
    pub fn save(&mut self) -> Result<(), EditorError> {
        let state = snapshot::collect(&self.document);
        let json = serde_json::to_string(&state)
            .map_err(|e| backstage_common::CommonError::Store(e.to_string()))?;
        self.store.set(STORAGE_KEY, &json)?;
        tracing::info!(
            text = state.text.len(),
            images = state.images.len(),
            "saved admin snapshot"
        );
        Ok(())
    }

    pub fn save_and_exit(&mut self) -> Result<(), EditorError> {
        self.save()?;
        self.exit_edit();
        Ok(())
    }

    /// Feed a keyboard event. Ctrl+` toggles edit mode, with the same
    /// auth check as [`AdminSession::enter_edit`] on the way in.
    pub fn handle_key(&mut self, event: &KeyEvent) -> KeyOutcome {
        if !event.is_admin_shortcut() {
            return KeyOutcome::Ignored;
        }
        if self.is_edit() {
            self.exit_edit();
            KeyOutcome::ExitedEdit
        } else {
            match self.enter_edit() {
                Ok(()) => KeyOutcome::EnteredEdit,
                Err(_) => KeyOutcome::Refused,
            }
        }
    }

    fn set_mode(&mut self, enabled: bool) {
        self.mode = if enabled { Mode::Edit } else { Mode::View };

        if enabled {
            self.document.body.add_class(ADMIN_BODY_CLASS);
        } else {
            self.document.body.remove_class(ADMIN_BODY_CLASS);
        }

        if let Some(panel) = self.document.query_first_mut("id", PANEL_ID) {
            panel.set_attr("aria-hidden", if enabled { "false" } else { "true" });
        }

        let flag = if enabled { "true" } else { "false" };
        self.document.walk_elements_mut(&mut |el| {
            if el.attr(EDITABLE_ATTR) == Some("true") {
                el.set_attr("contenteditable", flag);
            }
        });

        tracing::info!(mode = ?self.mode, "admin mode changed");
    }

    // ----- image replace interaction -----

    /// Bind click handlers for all current image nodes. Safe to re-run
    /// after mutator insertions: already-bound keys are left alone.
    pub fn bind_image_handlers(&mut self) {
        for (key, _) in registry::list_by_role(&self.document, Role::Image) {
            self.bound_images.insert(key);
        }
    }

    /// Number of images currently wired for click-to-replace
    pub fn bound_image_count(&self) -> usize {
        self.bound_images.len()
    }

    /// An image was clicked. In edit mode this makes it the active
    /// target and asks the embedder to open file selection (`true`);
    /// otherwise nothing happens. A second click before the previous
    /// read completes simply retargets the pending replacement.
    pub fn click_image(&mut self, key: &str) -> bool {
        if !self.is_edit() || !self.bound_images.contains(key) {
            return false;
        }
        self.active_image_target = Some(key.to_string());
        true
    }

    pub fn active_image_target(&self) -> Option<&str> {
        self.active_image_target.as_deref()
    }

    /// File selection finished. `None` (dialog dismissed) leaves
    /// everything as-is; a file is read and written to the active
    /// target only, after which the target is cleared and the input
    /// considered reset.
    pub fn complete_image_selection(
        &mut self,
        file: Option<&FileUpload>,
        reader: &dyn FileReader,
    ) -> Result<bool, EditorError> {
        let (Some(file), Some(target)) = (file, self.active_image_target.clone()) else {
            return Ok(false);
        };

        let data_url = reader.read_data_url(file)?;
        let replaced = mutators::replace_image_source(&mut self.document, &target, &data_url);
        self.active_image_target = None;
        Ok(replaced)
    }

    // ----- content mutators -----

    pub fn add_update_card(&mut self, title: &str, body: &str) -> Result<(), EditorError> {
        mutators::add_update_card(&mut self.document, title, body)
    }

    /// Add a gallery image and wire the new image into click-to-replace.
    pub fn add_gallery_image(
        &mut self,
        file: &FileUpload,
        category: Option<&str>,
        title: Option<&str>,
        stamp: u64,
        reader: &dyn FileReader,
    ) -> Result<String, EditorError> {
        let key = mutators::add_gallery_image(&mut self.document, file, category, title, stamp, reader)?;
        self.bind_image_handlers();
        Ok(key)
    }
}
