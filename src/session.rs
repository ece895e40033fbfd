//! Session State
//!
//! Token, role and user info, persisted under three flat session-storage keys.

use serde::{Deserialize, Serialize};

use crate::config::{ROLE_KEY, TOKEN_KEY, USER_INFO_KEY};
use crate::models::User;
use crate::storage::KeyValueStore;

/// Role classes that may sign in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Moderator,
    Company,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Moderator, Role::Company];

    /// Parse a backend role string; anything unknown is no role at all
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "admin" => Some(Role::Admin),
            "moderator" => Some(Role::Moderator),
            "company" => Some(Role::Company),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Moderator => "moderator",
            Role::Company => "company",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::Admin => "Администратор",
            Role::Moderator => "Модератор",
            Role::Company => "Компания",
        }
    }
}

/// Subset of the signed-in user kept for role-scoped requests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub role: String,
    #[serde(default)]
    pub bin_company: Option<String>,
    #[serde(default)]
    pub moderator_id: Option<u64>,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
            bin_company: user.bin_company.clone(),
            moderator_id: user.moderator_id,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    pub role: Option<Role>,
    pub user: Option<UserInfo>,
}

impl Session {
    pub fn new(token: String, role: Role, user: UserInfo) -> Self {
        Self {
            token: Some(token),
            role: Some(role),
            user: Some(user),
        }
    }

    /// Read the session written by a previous login
    pub fn load(storage: &impl KeyValueStore) -> Self {
        let token = storage.get(TOKEN_KEY).filter(|t| !t.is_empty());
        let role = storage.get(ROLE_KEY).as_deref().and_then(Role::parse);
        let user = storage
            .get(USER_INFO_KEY)
            .and_then(|raw| match serde_json::from_str::<UserInfo>(&raw) {
                Ok(user) => Some(user),
                Err(e) => {
                    tracing::warn!("discarding unreadable user_info: {}", e);
                    None
                }
            });

        Self { token, role, user }
    }

    pub fn persist(&self, storage: &impl KeyValueStore) {
        match &self.token {
            Some(token) => storage.set(TOKEN_KEY, token),
            None => storage.remove(TOKEN_KEY),
        }
        match self.role {
            Some(role) => storage.set(ROLE_KEY, role.as_str()),
            None => storage.remove(ROLE_KEY),
        }
        match self.user.as_ref().and_then(|u| serde_json::to_string(u).ok()) {
            Some(json) => storage.set(USER_INFO_KEY, &json),
            None => storage.remove(USER_INFO_KEY),
        }
    }

    /// Remove every session key
    pub fn clear(storage: &impl KeyValueStore) {
        storage.remove(TOKEN_KEY);
        storage.remove(ROLE_KEY);
        storage.remove(USER_INFO_KEY);
    }

    /// Current bearer token straight from storage
    pub fn stored_token(storage: &impl KeyValueStore) -> Option<String> {
        storage.get(TOKEN_KEY).filter(|t| !t.is_empty())
    }

    /// Both a token and a known role are required
    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty()) && self.role.is_some()
    }

    /// Role, only when authenticated
    pub fn active_role(&self) -> Option<Role> {
        if self.is_authenticated() {
            self.role
        } else {
            None
        }
    }

    pub fn user_id(&self) -> Option<u64> {
        self.user.as_ref().map(|u| u.id)
    }

    pub fn display_name(&self) -> String {
        self.user.as_ref().map(|u| u.name.clone()).unwrap_or_default()
    }
}
