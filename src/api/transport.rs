//! gloo-net Transport
//!
//! Browser `fetch` implementation of [`Transport`].

use async_trait::async_trait;
use gloo_net::http::Request;

use super::client::{ApiRequest, Method, RawResponse, Transport};
use crate::error::{ApiError, ApiResult};

#[derive(Debug, Clone, Copy, Default)]
pub struct GlooTransport;

#[async_trait(?Send)]
impl Transport for GlooTransport {
    async fn send(&self, request: ApiRequest) -> ApiResult<RawResponse> {
        let url = request.full_url();
        let mut builder = match request.method {
            Method::Get => Request::get(&url),
            Method::Post => Request::post(&url),
            Method::Put => Request::put(&url),
            Method::Delete => Request::delete(&url),
        };

        builder = builder.header("Accept", request.accept());
        if let Some(authorization) = request.authorization() {
            builder = builder.header("Authorization", &authorization);
        }

        let prepared = match &request.body {
            Some(body) => builder.json(body),
            None => builder.build(),
        }
        .map_err(|e| ApiError::Network(format!("Failed to build request: {}", e)))?;

        let response = prepared
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .binary()
            .await
            .map_err(|e| ApiError::Network(format!("Failed to read response: {}", e)))?;

        Ok(RawResponse { status, body })
    }
}
