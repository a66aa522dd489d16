use super::traits::CategoryStore;
use super::types::{Category, CategoryPayload, TokenResponse};
use crate::config::Config;
use crate::error::{Result, SyncError};
use crate::normalize::EntrySet;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use tokio::sync::Mutex;
use tracing::info;

/// Audience claim the gateway expects on client-credentials tokens.
const TOKEN_AUDIENCE: &str = "https://api.zscaler.com";

/// Authenticated client for the gateway's category API. The bearer token is
/// fetched lazily on the first call and cached for the rest of the run; a
/// rejected token triggers exactly one re-authentication.
pub struct GatewayClient {
    http: Client,
    config: Config,
    token: Mutex<Option<String>>,
}

impl GatewayClient {
    pub fn new(http: Client, config: Config) -> Self {
        Self {
            http,
            config,
            token: Mutex::new(None),
        }
    }

    /// Exchanges the client credentials for a bearer token.
    async fn authenticate(&self) -> Result<String> {
        let params = [
            ("grant_type", "client_credentials"),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("audience", TOKEN_AUDIENCE),
        ];
        let response = self
            .http
            .post(&self.config.token_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| SyncError::Auth(format!("token request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SyncError::Auth(format!(
                "token endpoint returned {status}: {body}"
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| SyncError::Auth(format!("malformed token response: {e}")))?;
        info!("Access token retrieved");
        Ok(token.access_token)
    }

    async fn cached_token(&self) -> Result<String> {
        let mut guard = self.token.lock().await;
        if let Some(token) = guard.as_ref() {
            return Ok(token.clone());
        }
        let token = self.authenticate().await?;
        *guard = Some(token.clone());
        Ok(token)
    }

    async fn refresh_token(&self) -> Result<String> {
        let mut guard = self.token.lock().await;
        let token = self.authenticate().await?;
        *guard = Some(token.clone());
        Ok(token)
    }

    /// Sends the request with the cached bearer token. A 401 triggers one
    /// re-authentication and one replay before surfacing `Auth`.
    async fn send_authorized(
        &self,
        build: impl Fn(&Client) -> RequestBuilder,
    ) -> Result<Response> {
        let token = self.cached_token().await?;
        let response = build(&self.http)
            .bearer_auth(&token)
            .send()
            .await
            .map_err(SyncError::api_request)?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        info!("Gateway rejected the cached token; re-authenticating");
        let token = self.refresh_token().await?;
        let response = build(&self.http)
            .bearer_auth(&token)
            .send()
            .await
            .map_err(SyncError::api_request)?;
        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(SyncError::Auth(
                "token rejected again after re-authentication".into(),
            ));
        }
        Ok(response)
    }

    fn categories_url(&self) -> String {
        format!("{}/urlCategories", self.config.gateway_base_url)
    }
}

/// Converts a non-success gateway response into an `Api` error carrying the
/// status and body.
async fn api_error(response: Response) -> SyncError {
    let status = response.status().as_u16();
    let message = response.text().await.unwrap_or_default();
    SyncError::Api { status, message }
}

#[async_trait::async_trait]
impl CategoryStore for GatewayClient {
    async fn find_by_name(&self, name: &str) -> Result<Option<Category>> {
        info!("Searching for URL category '{}'", name);
        let url = self.categories_url();
        let response = self
            .send_authorized(|http| http.get(&url).query(&[("search", name)]))
            .await?;
        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let categories: Vec<Category> = response.json().await.map_err(|e| SyncError::Api {
            status: 0,
            message: format!("malformed category list: {e}"),
        })?;
        // The search parameter matches loosely; require the exact name.
        Ok(categories.into_iter().find(|c| c.configured_name == name))
    }

    async fn create(&self, name: &str, description: &str) -> Result<Category> {
        if let Some(existing) = self.find_by_name(name).await? {
            info!(
                "Category '{}' already exists (id {}), reusing it",
                name, existing.id
            );
            return Ok(existing);
        }

        let url = self.categories_url();
        let payload = CategoryPayload {
            configured_name: name,
            super_category: &self.config.super_category,
            urls: Vec::new(),
            custom_category: true,
            description: Some(description),
        };
        let response = self
            .send_authorized(|http| http.post(&url).json(&payload))
            .await?;
        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let category: Category = response.json().await.map_err(|e| SyncError::Api {
            status: 0,
            message: format!("malformed create response: {e}"),
        })?;
        info!("Created category '{}' (id {})", name, category.id);
        Ok(category)
    }

    async fn replace_entries(&self, category: &Category, entries: &EntrySet) -> Result<()> {
        let url = format!("{}/{}", self.categories_url(), category.id);
        let payload = CategoryPayload {
            configured_name: &category.configured_name,
            super_category: &self.config.super_category,
            urls: entries.iter().map(String::as_str).collect(),
            custom_category: true,
            description: category.description.as_deref(),
        };
        let response = self
            .send_authorized(|http| http.put(&url).json(&payload))
            .await?;
        if !response.status().is_success() {
            return Err(api_error(response).await);
        }
        info!(
            "Category '{}' updated with {} entries",
            category.configured_name,
            entries.len()
        );
        Ok(())
    }

    async fn activate(&self) -> Result<()> {
        let url = format!("{}/status/activate", self.config.gateway_base_url);
        let response = self.send_authorized(|http| http.post(&url)).await?;
        if !response.status().is_success() {
            return Err(api_error(response).await);
        }
        info!("Configuration changes activated");
        Ok(())
    }
}
