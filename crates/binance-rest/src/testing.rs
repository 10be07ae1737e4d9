//! Recording transport for tests.

use async_trait::async_trait;
use rest_client::{HttpRequest, HttpResponse, HttpTransport, RestError};
use std::sync::{Arc, Mutex};

/// Answers every request with the same canned response and keeps a copy of
/// each request it saw.
pub(crate) struct MockTransport {
    status: u16,
    body: String,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub(crate) fn ok(body: &str) -> Arc<Self> {
        Self::with_status(200, body)
    }

    pub(crate) fn with_status(status: u16, body: &str) -> Arc<Self> {
        Arc::new(Self {
            status,
            body: body.to_string(),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn only_request(&self) -> HttpRequest {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request");
        requests.into_iter().next().unwrap()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, RestError> {
        self.requests.lock().unwrap().push(request);
        Ok(HttpResponse {
            status: self.status,
            body: self.body.clone(),
        })
    }
}
