//! REST API
//!
//! HTTP client plus one service module per backend resource. Every service
//! method issues exactly one call and returns the unwrapped payload.

mod client;
mod transport;

pub mod auth;
pub mod categories;
pub mod companies;
pub mod final_types;
pub mod records;
pub mod reports;
pub mod users;
pub mod wastes;

pub use client::{
    ApiClient, ApiRequest, BrowserNavigator, HttpClient, Method, Navigator, Query, RawResponse,
    ResponseKind, Transport,
};
pub use transport::GlooTransport;
