use std::time::Duration;

const DEFAULT_PORT: u16 = 3123;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Process configuration, read once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct Config {
    pub discord_webhook: String,
    pub port: u16,
    pub include_collections: Vec<String>,
    pub outline_url: String,
    pub outline_api_key: String,
    pub timezone: chrono_tz::Tz,
    pub http_timeout: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        // blank values count as unset
        let optional = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let required = |key: &str| optional(key).ok_or_else(|| anyhow::anyhow!("{key} not set"));

        let port = match optional("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|e| anyhow::anyhow!("invalid PORT `{raw}`: {e}"))?,
            None => DEFAULT_PORT,
        };

        let timezone = match optional("NOTIFY_TIMEZONE") {
            Some(raw) => raw
                .parse::<chrono_tz::Tz>()
                .map_err(|_| anyhow::anyhow!("invalid NOTIFY_TIMEZONE `{raw}`"))?,
            None => chrono_tz::UTC,
        };

        let timeout_secs = match optional("HTTP_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .map_err(|e| anyhow::anyhow!("invalid HTTP_TIMEOUT_SECS `{raw}`: {e}"))?,
            None => DEFAULT_HTTP_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            anyhow::bail!("HTTP_TIMEOUT_SECS must be at least 1");
        }

        Ok(Self {
            discord_webhook: required("DISCORD_WEBHOOK")?,
            port,
            include_collections: parse_collections(
                optional("INCLUDE_COLLECTIONS").as_deref().unwrap_or(""),
            ),
            outline_url: required("OUTLINE_URL")?.trim_end_matches('/').to_string(),
            outline_api_key: required("OUTLINE_API_KEY")?,
            timezone,
            http_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn parse_collections(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(ToString::to_string)
        .collect()
}

#[cfg(test)]
pub(crate) fn test_config(outline_url: &str, include_collections: &str) -> Config {
    Config::from_lookup(|key| match key {
        "DISCORD_WEBHOOK" => Some("http://127.0.0.1:9/webhook".to_string()),
        "OUTLINE_URL" => Some(outline_url.to_string()),
        "OUTLINE_API_KEY" => Some("ol_api_test".to_string()),
        "INCLUDE_COLLECTIONS" => Some(include_collections.to_string()),
        "HTTP_TIMEOUT_SECS" => Some("2".to_string()),
        _ => None,
    })
    .unwrap()
}
