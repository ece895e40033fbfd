//! Login
//!
//! The only call made through the anonymous client.

use serde::{Deserialize, Serialize};

use super::client::{ApiClient, Navigator, Transport};
use crate::error::{ApiError, ApiResult};
use crate::models::User;
use crate::session::{Role, Session, UserInfo};
use crate::storage::KeyValueStore;

const MALFORMED_LOGIN: &str = "Некорректный ответ от сервера авторизации";

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    user: Option<User>,
    #[serde(default)]
    role: Option<String>,
}

impl<T, S, N> ApiClient<T, S, N>
where
    T: Transport + Clone,
    S: KeyValueStore + Clone,
    N: Navigator + Clone,
{
    /// POST /api/login; the returned session is not persisted yet
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<Session> {
        let response: LoginResponse = self
            .anonymous()
            .post_json("/api/login", &Credentials { email, password })
            .await
            .map_err(login_error)?;

        let session = session_from_response(response)?;
        tracing::info!(role = session.role.map(Role::as_str), "login succeeded");
        Ok(session)
    }
}

fn session_from_response(response: LoginResponse) -> ApiResult<Session> {
    let token = response.token.filter(|t| !t.is_empty());
    let (Some(token), Some(user)) = (token, response.user) else {
        return Err(ApiError::MalformedResponse(MALFORMED_LOGIN.into()));
    };

    let role = response
        .role
        .as_deref()
        .and_then(Role::parse)
        .or_else(|| Role::parse(&user.role))
        .ok_or_else(|| ApiError::MalformedResponse(MALFORMED_LOGIN.into()))?;

    Ok(Session::new(token, role, UserInfo::from(&user)))
}

fn login_error(err: ApiError) -> ApiError {
    match err {
        ApiError::Http { status, message: None } => ApiError::Http {
            status,
            message: Some(format!("Ошибка авторизации ({})", status)),
        },
        ApiError::MalformedResponse(_) => ApiError::MalformedResponse(MALFORMED_LOGIN.into()),
        ApiError::Network(_) => ApiError::Network("нет ответа от сервера".into()),
        other => other,
    }
}
