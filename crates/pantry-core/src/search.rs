//! Recipe search client (Edamam recipe search v2)
//!
//! Any failure (transport error, non-success status, malformed JSON) is logged
//! and collapses to an empty result list. `try_search` keeps the reason for
//! callers that want it, but an empty list from `search_recipes` can mean
//! either "no results" or "request failed".
//!
//! # Configuration
//!
//! Environment variables:
//! - `EDAMAM_APP_ID`: Application identifier (required)
//! - `EDAMAM_APP_KEY`: Application key (required)

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::SearchConfig;
use crate::error::{Error, Result};
use crate::models::Hit;
use crate::session::RecipeSource;

/// Recipe search API client
#[derive(Clone)]
pub struct RecipeSearchClient {
    http_client: Client,
    base_url: String,
    app_id: String,
    app_key: String,
}

impl RecipeSearchClient {
    /// Create a new client
    pub fn new(base_url: &str, app_id: &str, app_key: &str) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            app_id: app_id.to_string(),
            app_key: app_key.to_string(),
        }
    }

    /// Create from config plus credentials from the environment
    ///
    /// Required: `EDAMAM_APP_ID`, `EDAMAM_APP_KEY`
    pub fn from_config(config: &SearchConfig) -> Result<Self> {
        let app_id = credential("EDAMAM_APP_ID")?;
        let app_key = credential("EDAMAM_APP_KEY")?;
        Ok(Self::new(&config.base_url, &app_id, &app_key))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Search for recipes, keeping the failure reason
    pub async fn try_search(&self, query: &str) -> Result<Vec<Hit>> {
        let response = self
            .http_client
            .get(format!("{}/api/recipes/v2", self.base_url))
            .query(&[
                ("type", "public"),
                ("q", query),
                ("app_id", self.app_id.as_str()),
                ("app_key", self.app_key.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Upstream {
                status: status.as_u16(),
                message: body,
            });
        }

        let body: SearchResponse = response.json().await?;
        debug!(query = %query, hits = body.hits.len(), "Recipe search complete");
        Ok(body.hits)
    }

    /// Search for recipes; failures degrade to an empty list
    ///
    /// A blank query returns an empty list without issuing a request.
    pub async fn search_recipes(&self, query: &str) -> Vec<Hit> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        match self.try_search(query).await {
            Ok(hits) => hits,
            Err(e) => {
                warn!(query = %query, error = %e, "Failed to fetch recipes");
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl RecipeSource for RecipeSearchClient {
    async fn fetch_recipes(&self, query: &str) -> Result<Vec<Hit>> {
        Ok(self.search_recipes(query).await)
    }
}

fn credential(key: &str) -> Result<String> {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| Error::NotConfigured(format!("{} not set", key)))
}

/// Recipe search response
#[derive(Debug, Deserialize)]
struct SearchResponse {
    hits: Vec<Hit>,
}
