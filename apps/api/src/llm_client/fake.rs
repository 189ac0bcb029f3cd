//! In-memory `GenerationClient` for tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::{GenerationClient, GenerationError};

/// Replies with a fixed text (or a fixed failure) and records every call.
#[derive(Clone, Default)]
pub struct FakeGenerator {
    reply: Option<String>,
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl FakeGenerator {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Some(text.to_string()),
            ..Self::default()
        }
    }

    /// Every call fails with a 503 from the service.
    pub fn failing() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerationClient for FakeGenerator {
    async fn generate(&self, prompt: &str, follow_up: &str) -> Result<String, GenerationError> {
        self.calls
            .lock()
            .unwrap()
            .push((prompt.to_string(), follow_up.to_string()));
        self.reply.clone().ok_or_else(|| GenerationError::Api {
            status: 503,
            message: "service unavailable".to_string(),
        })
    }

    fn model(&self) -> &str {
        "fake"
    }
}
