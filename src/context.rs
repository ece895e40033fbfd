//! Application Context
//!
//! Shared services provided via Leptos Context API.

use leptos::prelude::*;

use crate::api::HttpClient;
use crate::cache::ReferenceCache;
use crate::config::AppConfig;
use crate::storage::BrowserSessionStorage;
use crate::session::Session;
use crate::store::{store_login, store_logout, AppStore};

/// App-wide services provided via context
#[derive(Clone)]
pub struct AppContext {
    /// Authenticated REST client
    pub api: HttpClient,
    /// Memo of the reference lists
    pub cache: ReferenceCache,
    pub store: AppStore,
}

impl AppContext {
    pub fn new(config: &AppConfig, store: AppStore) -> Self {
        Self {
            api: HttpClient::for_browser(&config.api_base_url),
            cache: ReferenceCache::new(),
            store,
        }
    }

    /// Publish a fresh session from the login form
    pub fn login(&self, session: Session) {
        store_login(&self.store, &BrowserSessionStorage, session);
    }

    /// Sign out; the caller routes back to the login screen
    pub fn logout(&self) {
        store_logout(&self.store, &BrowserSessionStorage, &self.cache);
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
