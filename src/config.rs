use std::time::Duration;

use anyhow::{Context, Result, anyhow};

// ==================== DEFAULTS ====================
pub struct Defaults;
impl Defaults {
    pub const PORT: u16 = 3000;
    pub const API_BASE_URL: &'static str = "https://api.mercadolibre.com";
    pub const SITE_ID: &'static str = "MLB";
    pub const UPSTREAM_TIMEOUT_SECS: u64 = 10;
    /// Value shipped in `.env.example`; treated as "no token".
    pub const PLACEHOLDER_TOKEN: &'static str = "your_access_token_here";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeMode {
    Development,
    Production,
}

impl RuntimeMode {
    fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("production") {
            RuntimeMode::Production
        } else {
            RuntimeMode::Development
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RuntimeMode::Development => "development",
            RuntimeMode::Production => "production",
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, RuntimeMode::Production)
    }
}

// ==================== APP CONFIG ====================
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub mode: RuntimeMode,
    pub access_token: Option<String>,
    /// Attach `access_token` as a bearer header when it is a real token.
    pub attach_token: bool,
    /// Answer upstream 401s with deterministic mock data instead of an error.
    pub tolerant_auth: bool,
    pub api_base_url: String,
    pub site_id: String,
    pub upstream_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: Defaults::PORT,
            mode: RuntimeMode::Development,
            access_token: None,
            attach_token: true,
            tolerant_auth: true,
            api_base_url: Defaults::API_BASE_URL.to_string(),
            site_id: Defaults::SITE_ID.to_string(),
            upstream_timeout: Duration::from_secs(Defaults::UPSTREAM_TIMEOUT_SECS),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("PORT must be a port number, got {:?}", raw))?,
            None => defaults.port,
        };

        let mode = lookup("NODE_ENV")
            .or_else(|| lookup("APP_ENV"))
            .map(|raw| RuntimeMode::parse(&raw))
            .unwrap_or(defaults.mode);

        let access_token = lookup("MERCADO_LIVRE_ACCESS_TOKEN")
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        let attach_token = match lookup("MERCADO_LIVRE_ATTACH_TOKEN") {
            Some(raw) => parse_flag("MERCADO_LIVRE_ATTACH_TOKEN", &raw)?,
            None => defaults.attach_token,
        };
        let tolerant_auth = match lookup("MERCADO_LIVRE_TOLERANT_AUTH") {
            Some(raw) => parse_flag("MERCADO_LIVRE_TOLERANT_AUTH", &raw)?,
            None => defaults.tolerant_auth,
        };

        let api_base_url = lookup("MERCADO_LIVRE_API_URL")
            .map(|u| u.trim().trim_end_matches('/').to_string())
            .filter(|u| !u.is_empty())
            .unwrap_or(defaults.api_base_url);
        let site_id = lookup("MERCADO_LIVRE_SITE_ID")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.site_id);

        let upstream_timeout = match lookup("UPSTREAM_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw.trim().parse::<u64>().with_context(|| {
                    format!("UPSTREAM_TIMEOUT_SECS must be whole seconds, got {:?}", raw)
                })?;
                if secs == 0 {
                    return Err(anyhow!("UPSTREAM_TIMEOUT_SECS must be greater than zero"));
                }
                Duration::from_secs(secs)
            }
            None => defaults.upstream_timeout,
        };

        Ok(Self {
            port,
            mode,
            access_token,
            attach_token,
            tolerant_auth,
            api_base_url,
            site_id,
            upstream_timeout,
        })
    }

    pub fn has_real_token(&self) -> bool {
        matches!(&self.access_token, Some(t) if t != Defaults::PLACEHOLDER_TOKEN)
    }

    /// Token to send upstream, if any.
    pub fn bearer_token(&self) -> Option<&str> {
        if self.attach_token && self.has_real_token() {
            self.access_token.as_deref()
        } else {
            None
        }
    }

    pub fn search_endpoint(&self) -> String {
        format!("{}/sites/{}/search", self.api_base_url, self.site_id)
    }
}

fn parse_flag(key: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(anyhow!("{} must be a boolean, got {:?}", key, other)),
    }
}
