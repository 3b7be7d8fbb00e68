//! Test doubles shared by the service and route tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::llm_client::{CompletionProvider, CompletionRequest, KeyRotator, LlmError};

/// Detail carried by `StubProvider::failing`. Must never reach a user.
pub const INTERNAL_FAILURE_DETAIL: &str = "connection reset by peer (10.0.0.7:443)";

enum StubReply {
    Text(String),
    Fail,
}

/// Records every call and answers with a canned reply.
pub struct StubProvider {
    reply: StubReply,
    calls: AtomicUsize,
    keys: Mutex<Vec<String>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl StubProvider {
    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self::with(StubReply::Text(text.to_string())))
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self::with(StubReply::Fail))
    }

    fn with(reply: StubReply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            keys: Mutex::new(Vec::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn keys(&self) -> Vec<String> {
        self.keys.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl CompletionProvider for StubProvider {
    async fn complete(
        &self,
        api_key: &str,
        request: &CompletionRequest,
    ) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.keys.lock().unwrap().push(api_key.to_string());
        self.requests.lock().unwrap().push(request.clone());

        match &self.reply {
            StubReply::Text(text) => Ok(text.clone()),
            StubReply::Fail => Err(LlmError::Api {
                status: 502,
                message: INTERNAL_FAILURE_DETAIL.to_string(),
            }),
        }
    }
}

pub fn rotator(keys: &[&str]) -> Arc<KeyRotator> {
    Arc::new(KeyRotator::new(keys.iter().map(|k| k.to_string()).collect()))
}
