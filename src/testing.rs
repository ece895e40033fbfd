//! Test doubles for the browser seams (transport, storage, navigation).

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use async_trait::async_trait;
use serde_json::Value;

use crate::api::{ApiClient, ApiRequest, Navigator, RawResponse, Transport};
use crate::error::{ApiError, ApiResult};
use crate::storage::KeyValueStore;

pub type TestClient = ApiClient<MockTransport, MemoryStorage, RecordingNavigator>;

/// Client wired to fresh doubles; the doubles share state with the client
pub fn test_client() -> (TestClient, MockTransport, MemoryStorage, RecordingNavigator) {
    let transport = MockTransport::default();
    let storage = MemoryStorage::default();
    let navigator = RecordingNavigator::default();
    let client = ApiClient::authenticated(
        "http://api.test",
        transport.clone(),
        storage.clone(),
        navigator.clone(),
    );
    (client, transport, storage, navigator)
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecordingNavigator {
    visited: Rc<RefCell<Vec<String>>>,
}

impl RecordingNavigator {
    pub fn visited(&self) -> Vec<String> {
        self.visited.borrow().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn redirect(&self, path: &str) {
        self.visited.borrow_mut().push(path.to_string());
    }
}

/// Records requests and answers from a queue of canned responses
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    requests: Rc<RefCell<Vec<ApiRequest>>>,
    replies: Rc<RefCell<VecDeque<ApiResult<RawResponse>>>>,
}

impl MockTransport {
    pub fn reply_json(&self, status: u16, body: Value) {
        let bytes = serde_json::to_vec(&body).unwrap();
        self.reply_bytes(status, bytes);
    }

    pub fn reply_bytes(&self, status: u16, body: Vec<u8>) {
        self.replies.borrow_mut().push_back(Ok(RawResponse { status, body }));
    }

    pub fn fail_network(&self, message: &str) {
        self.replies
            .borrow_mut()
            .push_back(Err(ApiError::Network(message.to_string())));
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn last_request(&self) -> ApiRequest {
        self.requests.borrow().last().cloned().expect("no request was sent")
    }
}

#[async_trait(?Send)]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> ApiResult<RawResponse> {
        self.requests.borrow_mut().push(request);
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Network("no canned response".into())))
    }
}
