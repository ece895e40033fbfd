//! HTTP Client Wrapper
//!
//! Base URL, JSON handling, bearer token from session storage, and central
//! 401 handling. The anonymous variant is used for the login call only.

use std::sync::Arc;

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::transport::GlooTransport;
use crate::error::{ApiError, ApiResult};
use crate::session::Session;
use crate::storage::{BrowserSessionStorage, KeyValueStore};

const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

/// Query parameters in send order
pub type Query = Vec<(String, String)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

/// Expected response payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    Json,
    Binary,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub query: Query,
    pub body: Option<Value>,
    pub bearer: Option<String>,
    pub response: ResponseKind,
}

impl ApiRequest {
    /// `Authorization` header value, if a token was attached
    pub fn authorization(&self) -> Option<String> {
        self.bearer.as_ref().map(|token| format!("Bearer {}", token))
    }

    pub fn accept(&self) -> &'static str {
        match self.response {
            ResponseKind::Json => "application/json",
            ResponseKind::Binary => "application/octet-stream",
        }
    }

    /// URL with the percent-encoded query string appended
    pub fn full_url(&self) -> String {
        if self.query.is_empty() {
            return self.url.clone();
        }
        let encoded: Vec<String> = self
            .query
            .iter()
            .map(|(k, v)| {
                format!(
                    "{}={}",
                    utf8_percent_encode(k, QUERY_VALUE),
                    utf8_percent_encode(v, QUERY_VALUE)
                )
            })
            .collect();
        let separator = if self.url.contains('?') { '&' } else { '?' };
        format!("{}{}{}", self.url, separator, encoded.join("&"))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Sends one request; `Err` only when no response was received
#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: ApiRequest) -> ApiResult<RawResponse>;
}

/// Forced navigation outside the router
pub trait Navigator {
    fn redirect(&self, path: &str);
}

/// Assigns `window.location`, reloading the app from the new path
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn redirect(&self, path: &str) {
        if let Some(window) = web_sys::window() {
            if window.location().set_href(path).is_err() {
                tracing::error!(path, "failed to redirect");
            }
        }
    }
}

/// REST client for the management backend
#[derive(Debug, Clone)]
pub struct ApiClient<T = GlooTransport, S = BrowserSessionStorage, N = BrowserNavigator> {
    base_url: Arc<str>,
    transport: T,
    storage: S,
    navigator: N,
    authenticated: bool,
}

/// Client used by the running app
pub type HttpClient = ApiClient;

impl HttpClient {
    pub fn for_browser(base_url: &str) -> Self {
        ApiClient::authenticated(base_url, GlooTransport, BrowserSessionStorage, BrowserNavigator)
    }
}

impl<T, S, N> ApiClient<T, S, N>
where
    T: Transport + Clone,
    S: KeyValueStore + Clone,
    N: Navigator + Clone,
{
    /// Client that attaches the stored token and handles 401
    pub fn authenticated(base_url: &str, transport: T, storage: S, navigator: N) -> Self {
        Self {
            base_url: Arc::from(base_url.trim_end_matches('/')),
            transport,
            storage,
            navigator,
            authenticated: true,
        }
    }

    /// Token-less sibling for the login request
    pub fn anonymous(&self) -> Self {
        Self {
            authenticated: false,
            ..self.clone()
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub async fn get_json<R: DeserializeOwned>(&self, path: &str, query: Query) -> ApiResult<R> {
        let bytes = self.execute(Method::Get, path, query, None, ResponseKind::Json).await?;
        decode(&bytes)
    }

    pub async fn post_json<B, R>(&self, path: &str, body: &B) -> ApiResult<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = encode(body)?;
        let bytes = self.execute(Method::Post, path, Vec::new(), Some(body), ResponseKind::Json).await?;
        decode(&bytes)
    }

    pub async fn put_json<B, R>(&self, path: &str, body: &B) -> ApiResult<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = encode(body)?;
        let bytes = self.execute(Method::Put, path, Vec::new(), Some(body), ResponseKind::Json).await?;
        decode(&bytes)
    }

    /// DELETE, ignoring whatever body comes back
    pub async fn delete(&self, path: &str) -> ApiResult<()> {
        self.execute(Method::Delete, path, Vec::new(), None, ResponseKind::Json).await?;
        Ok(())
    }

    /// GET a binary payload (spreadsheet export)
    pub async fn get_binary(&self, path: &str, query: Query) -> ApiResult<Vec<u8>> {
        self.execute(Method::Get, path, query, None, ResponseKind::Binary).await
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        query: Query,
        body: Option<Value>,
        response: ResponseKind,
    ) -> ApiResult<Vec<u8>> {
        let bearer = if self.authenticated {
            Session::stored_token(&self.storage)
        } else {
            None
        };

        let request = ApiRequest {
            method,
            url: format!("{}{}", self.base_url, path),
            query,
            body,
            bearer,
            response,
        };

        tracing::debug!(method = method.as_str(), path, "request");

        let raw = match self.transport.send(request).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(method = method.as_str(), path, "transport failure: {}", e);
                return Err(e);
            }
        };

        if raw.status == 401 && self.authenticated {
            tracing::warn!(path, "401 received, clearing session");
            self.handle_unauthorized();
            return Err(ApiError::Unauthorized);
        }

        if !(200..300).contains(&raw.status) {
            let err = ApiError::from_error_body(raw.status, &raw.body);
            tracing::warn!(method = method.as_str(), path, status = raw.status, "request failed");
            return Err(err);
        }

        Ok(raw.body)
    }

    fn handle_unauthorized(&self) {
        Session::clear(&self.storage);
        self.navigator.redirect("/");
    }
}

fn encode<B: Serialize + ?Sized>(body: &B) -> ApiResult<Value> {
    serde_json::to_value(body).map_err(|e| ApiError::validation(format!("Не удалось сформировать запрос: {}", e)))
}

fn decode<R: DeserializeOwned>(bytes: &[u8]) -> ApiResult<R> {
    let bytes: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) { b"null" } else { bytes };
    serde_json::from_slice(bytes)
        .map_err(|e| ApiError::MalformedResponse(format!("Некорректный ответ сервера: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::test_client;
    use futures::executor::block_on;
    use serde_json::json;

    #[test]
    fn test_bearer_attached_when_token_stored() {
        let (client, transport, storage, _) = test_client();
        storage.set("token", "abc");
        transport.reply_json(200, json!([]));

        let _: Vec<Value> = block_on(client.get_json("/api/wastes", Vec::new())).unwrap();

        let sent = transport.last_request();
        assert_eq!(sent.authorization().as_deref(), Some("Bearer abc"));
        assert_eq!(sent.url, "http://api.test/api/wastes");
    }

    #[test]
    fn test_no_bearer_without_token() {
        let (client, transport, _, _) = test_client();
        transport.reply_json(200, json!([]));

        let _: Vec<Value> = block_on(client.get_json("/api/wastes", Vec::new())).unwrap();

        assert_eq!(transport.last_request().authorization(), None);
    }

    #[test]
    fn test_token_read_at_call_time() {
        let (client, transport, storage, _) = test_client();
        transport.reply_json(200, json!(null));
        transport.reply_json(200, json!(null));

        let _: Value = block_on(client.get_json("/a", Vec::new())).unwrap();
        storage.set("token", "late");
        let _: Value = block_on(client.get_json("/b", Vec::new())).unwrap();

        let sent = transport.requests();
        assert_eq!(sent[0].bearer, None);
        assert_eq!(sent[1].bearer.as_deref(), Some("late"));
    }

    #[test]
    fn test_401_clears_session_and_redirects() {
        let (client, transport, storage, navigator) = test_client();
        storage.set("token", "abc");
        storage.set("role", "admin");
        storage.set("user_info", "{}");
        transport.reply_json(401, json!({"message": "Unauthenticated."}));

        let result: ApiResult<Value> = block_on(client.get_json("/api/v1/users", Vec::new()));

        assert_eq!(result, Err(ApiError::Unauthorized));
        assert!(storage.is_empty());
        assert_eq!(navigator.visited(), vec!["/".to_string()]);
    }

    #[test]
    fn test_anonymous_client_skips_token_and_401_handling() {
        let (client, transport, storage, navigator) = test_client();
        storage.set("token", "abc");
        transport.reply_json(401, json!({"message": "Неверные учетные данные"}));

        let login = client.anonymous();
        let result: ApiResult<Value> = block_on(login.post_json("/api/login", &json!({"email": "a"})));

        assert_eq!(transport.last_request().bearer, None);
        assert_eq!(
            result,
            Err(ApiError::Http { status: 401, message: Some("Неверные учетные данные".into()) })
        );
        assert_eq!(storage.get("token").as_deref(), Some("abc"));
        assert!(navigator.visited().is_empty());
    }

    #[test]
    fn test_server_error_propagates_untouched() {
        let (client, transport, storage, navigator) = test_client();
        storage.set("token", "abc");
        transport.reply_json(500, json!({"message": "boom"}));

        let result: ApiResult<Value> = block_on(client.get_json("/x", Vec::new()));

        assert_eq!(result, Err(ApiError::Http { status: 500, message: Some("boom".into()) }));
        assert_eq!(storage.get("token").as_deref(), Some("abc"));
        assert!(navigator.visited().is_empty());
    }

    #[test]
    fn test_network_failure() {
        let (client, transport, _, _) = test_client();
        transport.fail_network("offline");

        let result: ApiResult<Value> = block_on(client.get_json("/x", Vec::new()));
        assert_eq!(result, Err(ApiError::Network("offline".into())));
    }

    #[test]
    fn test_malformed_json() {
        let (client, transport, _, _) = test_client();
        transport.reply_bytes(200, b"<html>".to_vec());

        let result: ApiResult<Vec<Value>> = block_on(client.get_json("/x", Vec::new()));
        assert!(matches!(result, Err(ApiError::MalformedResponse(_))));
    }

    #[test]
    fn test_empty_body_decodes_as_null() {
        let (client, transport, _, _) = test_client();
        transport.reply_bytes(204, Vec::new());

        let result: ApiResult<Option<Value>> = block_on(client.put_json("/x", &json!({})));
        assert_eq!(result, Ok(None));
    }

    #[test]
    fn test_query_string_encoding() {
        let request = ApiRequest {
            method: Method::Get,
            url: "/api/reports".into(),
            query: vec![
                ("start_date".into(), "2024-01-01".into()),
                ("company_ids[]".into(), "1".into()),
                ("driv_name".into(), "Иван Петров".into()),
            ],
            body: None,
            bearer: None,
            response: ResponseKind::Json,
        };
        assert_eq!(
            request.full_url(),
            "/api/reports?start_date=2024-01-01&company_ids%5B%5D=1&driv_name=%D0%98%D0%B2%D0%B0%D0%BD%20%D0%9F%D0%B5%D1%82%D1%80%D0%BE%D0%B2"
        );
    }

    #[test]
    fn test_binary_request_kind() {
        let (client, transport, _, _) = test_client();
        transport.reply_bytes(200, vec![0x50, 0x4b, 0x03, 0x04]);

        let bytes = block_on(client.get_binary("/api/v1/management/reports/excel", Vec::new())).unwrap();

        assert_eq!(bytes, vec![0x50, 0x4b, 0x03, 0x04]);
        assert_eq!(transport.last_request().response, ResponseKind::Binary);
        assert_eq!(transport.last_request().accept(), "application/octet-stream");
    }
}
