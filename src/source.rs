use crate::config::{Config, FormatSelector, SourceFormat};
use crate::error::{Result, SyncError};
use reqwest::Client;
use tracing::info;

/// Raw payload as fetched, tagged with the resolved format. Built once per
/// run and consumed immediately by the normalizer.
#[derive(Debug)]
pub struct RawSource {
    pub body: String,
    pub format: SourceFormat,
}

/// Retrieves the published list. One attempt, bounded by the client's
/// timeout; no retries.
pub async fn fetch(client: &Client, config: &Config) -> Result<RawSource> {
    let response = client
        .get(&config.url_list_source)
        .send()
        .await
        .map_err(|e| SyncError::Fetch(format!("{}: {e}", config.url_list_source)))?;

    let status = response.status();
    if !status.is_success() {
        return Err(SyncError::Fetch(format!(
            "{} returned status {status}",
            config.url_list_source
        )));
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_ascii_lowercase();
    let format = resolve_format(config.source_format, &content_type, &config.url_list_source);
    info!("Fetched source list, resolved format: {format}");

    let body = response
        .text()
        .await
        .map_err(|e| SyncError::Fetch(format!("reading response body: {e}")))?;

    Ok(RawSource { body, format })
}

/// An explicit selector wins; otherwise the content-type, then the URL
/// extension, then plain text.
fn resolve_format(selector: FormatSelector, content_type: &str, source_url: &str) -> SourceFormat {
    if let FormatSelector::Fixed(format) = selector {
        return format;
    }
    if content_type.contains("json") {
        return SourceFormat::Structured;
    }
    let lower = source_url.to_ascii_lowercase();
    let path = lower.split(['?', '#']).next().unwrap_or("");
    if content_type.contains("csv") || path.ends_with(".csv") {
        return SourceFormat::Table;
    }
    if path.ends_with(".json") {
        return SourceFormat::Structured;
    }
    SourceFormat::Text
}
