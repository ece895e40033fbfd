//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. The session lives
//! here and in session storage; the helpers below are the only writers and
//! always update both.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::cache::ReferenceCache;
use crate::session::{Role, Session, UserInfo};
use crate::storage::KeyValueStore;

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Signed-in user, mirrored to session storage
    pub session: Session,
    /// Sidebar expanded (false = icon rail)
    pub sidebar_open: bool,
}

impl AppState {
    /// State restored from storage at start-up
    pub fn restore(storage: &impl KeyValueStore) -> Self {
        Self {
            session: Session::load(storage),
            sidebar_open: true,
        }
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Persist a fresh session and publish it
pub fn store_login(store: &AppStore, storage: &impl KeyValueStore, session: Session) {
    session.persist(storage);
    store.session().set(session);
}

/// Drop the session everywhere, along with every cached list
pub fn store_logout(store: &AppStore, storage: &impl KeyValueStore, cache: &ReferenceCache) {
    Session::clear(storage);
    cache.clear();
    store.session().set(Session::default());
    tracing::info!("logged out");
}

/// Current role, tracked
pub fn store_role(store: &AppStore) -> Option<Role> {
    store.session().with(Session::active_role)
}

/// Current user info, tracked
pub fn store_user(store: &AppStore) -> Option<UserInfo> {
    store.session().with(|s| s.user.clone())
}

pub fn store_is_authenticated(store: &AppStore) -> bool {
    store.session().with(Session::is_authenticated)
}

pub fn store_toggle_sidebar(store: &AppStore) {
    store.sidebar_open().update(|open| *open = !*open);
}
