use anyhow::{bail, Context, Result};
use std::env;
use std::fmt;
use std::time::Duration;

/// Layout of the source payload once resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// One candidate entry per line, `#` comments.
    Text,
    /// Delimited table with a header row.
    Table,
    /// Nested JSON document of unknown shape.
    Structured,
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SourceFormat::Text => "text",
            SourceFormat::Table => "table",
            SourceFormat::Structured => "structured",
        };
        f.write_str(name)
    }
}

/// Format selector as configured; `Auto` defers to the response
/// content-type and the source URL extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatSelector {
    Auto,
    Fixed(SourceFormat),
}

impl FormatSelector {
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "auto" => Ok(Self::Auto),
            "text" | "txt" => Ok(Self::Fixed(SourceFormat::Text)),
            "table" | "csv" => Ok(Self::Fixed(SourceFormat::Table)),
            "structured" | "json" => Ok(Self::Fixed(SourceFormat::Structured)),
            other => bail!(
                "unsupported SOURCE_FORMAT '{other}' (expected auto, text, table or structured)"
            ),
        }
    }
}

/// Environment-supplied configuration, built once at startup and passed to
/// each component.
#[derive(Debug, Clone)]
pub struct Config {
    pub client_id: String,
    pub client_secret: String,
    pub vanity_domain: String,
    pub category_name: String,
    pub url_list_source: String,
    pub gateway_base_url: String,
    /// OAuth2 token endpoint; derived from the vanity domain unless
    /// `TOKEN_URL` overrides it (private clouds, tests).
    pub token_url: String,
    pub super_category: String,
    pub source_format: FormatSelector,
    /// Header name of the URL/IP column for `table` sources; inferred from
    /// well-known header names when unset.
    pub table_url_column: Option<String>,
    pub fetch_timeout: Duration,
    /// Commit staged gateway changes after a successful write.
    pub activate_changes: bool,
    pub log_level: String,
}

const REQUIRED_VARS: [&str; 5] = [
    "CLIENT_ID",
    "CLIENT_SECRET",
    "VANITY_DOMAIN",
    "CATEGORY_NAME",
    "URL_LIST_SOURCE",
];

fn default_gateway_base_url() -> String {
    "https://api.zsapi.net/zia/api/v1".to_string()
}

fn default_super_category() -> String {
    "USER_DEFINED".to_string()
}

fn env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

impl Config {
    /// Loads the configuration from the process environment. All required
    /// variables are checked in one pass so a single diagnostic lists every
    /// missing name.
    pub fn from_env() -> Result<Self> {
        let missing: Vec<&str> = REQUIRED_VARS
            .iter()
            .copied()
            .filter(|name| env::var(name).map_or(true, |v| v.trim().is_empty()))
            .collect();
        if !missing.is_empty() {
            bail!(
                "missing critical environment variables: {}",
                missing.join(", ")
            );
        }

        let vanity_domain = env::var("VANITY_DOMAIN")?;
        let token_url = env::var("TOKEN_URL").unwrap_or_else(|_| {
            format!("https://{vanity_domain}.zslogin.net/oauth2/v1/token")
        });

        let source_format = FormatSelector::parse(&env_or("SOURCE_FORMAT", "auto"))?;

        let fetch_timeout_secs: u64 = env_or("FETCH_TIMEOUT_SECS", "30")
            .parse()
            .context("FETCH_TIMEOUT_SECS must be a number of seconds")?;

        let activate_changes = !matches!(
            env_or("ACTIVATE_CHANGES", "true").to_ascii_lowercase().as_str(),
            "false" | "0" | "no" | "off"
        );

        Ok(Self {
            client_id: env::var("CLIENT_ID")?,
            client_secret: env::var("CLIENT_SECRET")?,
            vanity_domain,
            category_name: env::var("CATEGORY_NAME")?,
            url_list_source: env::var("URL_LIST_SOURCE")?,
            gateway_base_url: env_or("GATEWAY_BASE_URL", &default_gateway_base_url()),
            token_url,
            super_category: env_or("SUPER_CATEGORY", &default_super_category()),
            source_format,
            table_url_column: env::var("TABLE_URL_COLUMN").ok().filter(|v| !v.is_empty()),
            fetch_timeout: Duration::from_secs(fetch_timeout_secs),
            activate_changes,
            log_level: env_or("LOG_LEVEL", "info"),
        })
    }
}
