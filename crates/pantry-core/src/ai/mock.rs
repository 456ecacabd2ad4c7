//! Mock backend for testing
//!
//! Returns canned completions without a network call. Useful for unit tests
//! and for running the relay locally without an API key (`AI_BACKEND=mock`).

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{Error, Result};

use super::CompletionBackend;

/// Default canned recipe
const MOCK_RECIPE: &str = "Mock Recipe\n\nIngredients:\n- 1 cup rice (200 kcal raw, 205 kcal cooked)\n\nSteps:\n1. Rinse the rice.\n2. Simmer for 15 minutes.\n";

#[derive(Clone, Debug)]
enum MockResponse {
    Content(Option<String>),
    Fail { status: u16, message: String },
}

/// Mock completion backend
///
/// Clones share one call counter, so a test can hand a clone to the code
/// under test and check afterwards how many completions were requested.
#[derive(Clone, Debug)]
pub struct MockBackend {
    response: MockResponse,
    calls: Arc<AtomicUsize>,
    /// Whether health_check should return true
    pub healthy: bool,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBackend {
    /// Create a new mock backend returning a short canned recipe
    pub fn new() -> Self {
        Self::with_content(MOCK_RECIPE)
    }

    /// Return specific content for every prompt
    pub fn with_content(content: &str) -> Self {
        Self {
            response: MockResponse::Content(Some(content.to_string())),
            calls: Arc::new(AtomicUsize::new(0)),
            healthy: true,
        }
    }

    /// Return a completion whose first choice has no content
    pub fn empty() -> Self {
        Self {
            response: MockResponse::Content(None),
            calls: Arc::new(AtomicUsize::new(0)),
            healthy: true,
        }
    }

    /// Fail every prompt as if the upstream returned an error status
    pub fn failing(status: u16, message: &str) -> Self {
        Self {
            response: MockResponse::Fail {
                status,
                message: message.to_string(),
            },
            calls: Arc::new(AtomicUsize::new(0)),
            healthy: true,
        }
    }

    /// Create an unhealthy mock backend
    pub fn unhealthy() -> Self {
        Self {
            healthy: false,
            ..Self::new()
        }
    }

    /// Number of completions requested so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionBackend for MockBackend {
    async fn complete(&self, _prompt: &str) -> Result<Option<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match &self.response {
            MockResponse::Content(content) => Ok(content.clone()),
            MockResponse::Fail { status, message } => Err(Error::Upstream {
                status: *status,
                message: message.clone(),
            }),
        }
    }

    async fn health_check(&self) -> bool {
        self.healthy
    }

    fn model(&self) -> &str {
        "mock"
    }

    fn host(&self) -> &str {
        "mock://localhost"
    }
}
