//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::core::state::App;
use crate::transport::{ChatRequest, ChatResponse, ChatTransport, TransportError};

/// A transport that answers every request with the same canned result and
/// records the questions it was asked.
#[derive(Clone)]
pub struct StubTransport {
    reply: Result<ChatResponse, TransportError>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl StubTransport {
    pub fn replying(reply: Result<ChatResponse, TransportError>) -> Self {
        Self {
            reply,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatTransport for StubTransport {
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, TransportError> {
        self.requests.lock().unwrap().push(request.question.clone());
        self.reply.clone()
    }
}

/// Creates an App around the given transport.
pub fn app_with(transport: StubTransport) -> App {
    App::new(Arc::new(transport), "http://test.invalid".to_string())
}

/// Creates a test App whose transport always answers "ok".
pub fn test_app() -> App {
    app_with(StubTransport::replying(Ok(ChatResponse::ok("stub answer"))))
}
