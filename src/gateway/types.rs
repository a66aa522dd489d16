use serde::{Deserialize, Serialize};

/// A custom URL category as the gateway reports it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Gateway-assigned identifier (e.g. `CUSTOM_01`).
    pub id: String,
    pub configured_name: String,
    /// Current entry set as perceived by the gateway.
    #[serde(default)]
    pub urls: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Body for category create/update calls. The gateway models entries as an
/// atomic set, so `urls` always carries the full membership.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CategoryPayload<'a> {
    pub configured_name: &'a str,
    pub super_category: &'a str,
    pub urls: Vec<&'a str>,
    pub custom_category: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
pub(super) struct TokenResponse {
    pub access_token: String,
}
