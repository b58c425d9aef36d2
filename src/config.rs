//! Application configuration
//!
//! Native builds read the process environment (after `.env` is loaded);
//! web builds take the values baked in at compile time.

use std::sync::OnceLock;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Missing required setting: {0}")]
    Missing(&'static str),
    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Backend and identity provider settings
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Supabase project URL (e.g., "https://xyzcompany.supabase.co")
    pub supabase_url: String,

    /// Supabase anon key, sent as `apikey` and default bearer
    pub supabase_key: String,

    /// Forward the user's access token as the insert's bearer instead of the anon key
    pub forward_auth: bool,

    /// Auth0 tenant domain (e.g., "acme.eu.auth0.com")
    pub auth0_domain: String,

    pub auth0_client_id: String,

    pub auth0_audience: Option<String>,

    /// Refresh token used to bootstrap a session without interactive login
    pub auth0_refresh_token: Option<String>,
}

impl AppConfig {
    /// Build a config from any key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let required = |name: &'static str| optional(name).ok_or(ConfigError::Missing(name));

        let forward_auth = match optional("SUPABASE_FORWARD_AUTH") {
            None => false,
            Some(value) => parse_flag(&value).ok_or(ConfigError::Invalid {
                name: "SUPABASE_FORWARD_AUTH",
                value,
            })?,
        };

        Ok(AppConfig {
            supabase_url: required("SUPABASE_URL")?.trim_end_matches('/').to_string(),
            supabase_key: required("SUPABASE_KEY")?,
            forward_auth,
            auth0_domain: normalize_domain(&required("AUTH0_DOMAIN")?),
            auth0_client_id: required("AUTH0_CLIENT_ID")?,
            auth0_audience: optional("AUTH0_AUDIENCE"),
            auth0_refresh_token: optional("AUTH0_REFRESH_TOKEN"),
        })
    }

    /// Read from the process environment
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read values injected at build time
    #[cfg(target_arch = "wasm32")]
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| {
            let value = match name {
                "SUPABASE_URL" => option_env!("SUPABASE_URL"),
                "SUPABASE_KEY" => option_env!("SUPABASE_KEY"),
                "SUPABASE_FORWARD_AUTH" => option_env!("SUPABASE_FORWARD_AUTH"),
                "AUTH0_DOMAIN" => option_env!("AUTH0_DOMAIN"),
                "AUTH0_CLIENT_ID" => option_env!("AUTH0_CLIENT_ID"),
                "AUTH0_AUDIENCE" => option_env!("AUTH0_AUDIENCE"),
                "AUTH0_REFRESH_TOKEN" => option_env!("AUTH0_REFRESH_TOKEN"),
                _ => None,
            };
            value.map(str::to_string)
        })
    }

    pub fn rest_url(&self) -> String {
        format!("{}/rest/v1", self.supabase_url)
    }

    pub fn auth0_base_url(&self) -> String {
        format!("https://{}", self.auth0_domain)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Accept "tenant.auth0.com" as well as "https://tenant.auth0.com/"
fn normalize_domain(domain: &str) -> String {
    domain
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_end_matches('/')
        .to_string()
}

// Global configuration, set once at startup
static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

pub fn init_config(config: AppConfig) {
    let _ = APP_CONFIG.set(config);
}

/// `None` until [`init_config`] has run with a valid configuration
pub fn app_config() -> Option<&'static AppConfig> {
    APP_CONFIG.get()
}
