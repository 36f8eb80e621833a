//! Authentication gate.
//!
//! A stored flag, nothing more: login performs no credential check and
//! the flag has no security value. The interface is the trust boundary
//! the mode controller depends on — only [`is_authenticated`].

use backstage_common::{CommonError, KeyValueStore};

/// Storage key for the authenticated flag
pub const AUTH_KEY: &str = "community-drafting-admin-auth";

pub fn is_authenticated(store: &dyn KeyValueStore) -> bool {
    store.get(AUTH_KEY).as_deref() == Some("true")
}

pub fn login(store: &mut dyn KeyValueStore) -> Result<(), CommonError> {
    store.set(AUTH_KEY, "true")
}

pub fn logout(store: &mut dyn KeyValueStore) -> Result<(), CommonError> {
    store.remove(AUTH_KEY)
}
