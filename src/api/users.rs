//! User accounts

use serde::Deserialize;
use serde_json::Value;

use super::client::{ApiClient, Navigator, Transport};
use crate::error::ApiResult;
use crate::filters::UserQuery;
use crate::models::{Envelope, NewUser, PageMeta, User, UserEnvelope, UserUpdate};
use crate::storage::KeyValueStore;

/// `{data, meta, filters}` body of the users list
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UserPage {
    #[serde(default)]
    pub data: Vec<User>,
    #[serde(default)]
    pub meta: PageMeta,
    #[serde(default)]
    pub filters: Option<Value>,
}

impl<T, S, N> ApiClient<T, S, N>
where
    T: Transport + Clone,
    S: KeyValueStore + Clone,
    N: Navigator + Clone,
{
    pub async fn list_users(&self, query: &UserQuery) -> ApiResult<UserPage> {
        self.get_json("/api/v1/users", query.to_query()).await
    }

    /// POST /api/register
    pub async fn create_user(&self, user: &NewUser) -> ApiResult<User> {
        let body: Envelope<UserEnvelope> = self.post_json("/api/register", user).await?;
        Ok(body.into_inner().user)
    }

    pub async fn update_user(&self, id: u64, update: &UserUpdate) -> ApiResult<User> {
        let body: Envelope<UserEnvelope> = self.put_json(&format!("/api/v1/users/{}", id), update).await?;
        Ok(body.into_inner().user)
    }

    pub async fn delete_user(&self, id: u64) -> ApiResult<()> {
        self.delete(&format!("/api/v1/users/{}", id)).await
    }
}
