//! Pantry Core Library
//!
//! Shared functionality for the Pantry recipe finder:
//! - Recipe search client (Edamam recipe search v2)
//! - Prompt construction for AI recipe generation
//! - AI recipe relay over pluggable completion backends
//! - Session state driving both flows
//! - Layered configuration (embedded defaults, user file, environment)

pub mod ai;
pub mod config;
pub mod error;
pub mod models;
pub mod prompts;
pub mod relay;
pub mod search;
pub mod session;

/// Test utilities including mock upstream servers
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use ai::{AIClient, CompletionBackend, MockBackend, OpenAICompatibleBackend, MAX_TOKENS};
pub use config::{AppConfig, CompletionConfig, SearchConfig};
pub use error::{Error, Result};
pub use models::{AiRecipe, Hit, IngredientList, RecipeSummary, SearchQuery};
pub use prompts::{build_prompt, PromptTemplate};
pub use relay::{complete_recipe, AskRequest, AskResponse, RelayClient, RelayError, RELAY_PATH};
pub use search::RecipeSearchClient;
pub use session::{DisplayMode, RecipeGenerator, RecipeSource, Session, View};
