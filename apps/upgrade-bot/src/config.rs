use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    pub bot_token: String,
    #[serde(default)]
    pub provider_token: String,
    #[serde(default)]
    pub admin_chat_ids: Vec<i64>,
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,
}

fn default_listen_port() -> u16 {
    8080
}

impl BotConfig {
    pub fn load() -> Result<Self> {
        let config_paths = vec!["/etc/upgrade-bot/bot.toml", "./bot.toml"];

        for path in config_paths {
            if let Ok(contents) = fs::read_to_string(path) {
                tracing::info!("Loading config from {}", path);
                return Self::from_toml(&contents)
                    .with_context(|| format!("invalid config file {}", path));
            }
        }

        tracing::info!("Loading config from environment");
        Ok(Self {
            bot_token: std::env::var("BOT_TOKEN").context("BOT_TOKEN is not set")?,
            provider_token: std::env::var("PROVIDER_TOKEN").unwrap_or_default(),
            admin_chat_ids: parse_admin_ids(&std::env::var("ADMIN_CHAT_IDS").unwrap_or_default()),
            listen_port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or_else(default_listen_port),
        })
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Stars invoices are issued without a provider token.
    pub fn provider_token(&self) -> Option<&str> {
        let token = self.provider_token.trim();
        (!token.is_empty()).then_some(token)
    }
}

/// Parses a comma-separated id list, silently skipping anything that is not a plain number.
pub fn parse_admin_ids(raw: &str) -> Vec<i64> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty() && id.chars().all(|c| c.is_ascii_digit()))
        .filter_map(|id| id.parse().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_admin_ids() {
        assert_eq!(parse_admin_ids("1, 22,333"), vec![1, 22, 333]);
        assert_eq!(parse_admin_ids("12,abc,,-5, 7 "), vec![12, 7]);
        assert!(parse_admin_ids("").is_empty());
    }

    #[test]
    fn test_from_toml_defaults() {
        let config = BotConfig::from_toml("bot_token = \"123:abc\"").unwrap();
        assert_eq!(config.bot_token, "123:abc");
        assert!(config.admin_chat_ids.is_empty());
        assert_eq!(config.listen_port, 8080);
        assert_eq!(config.provider_token(), None);
    }

    #[test]
    fn test_from_toml_full() {
        let config = BotConfig::from_toml(
            r#"
            bot_token = "123:abc"
            provider_token = "prov"
            admin_chat_ids = [10, 20]
            listen_port = 9000
            "#,
        )
        .unwrap();
        assert_eq!(config.admin_chat_ids, vec![10, 20]);
        assert_eq!(config.listen_port, 9000);
        assert_eq!(config.provider_token(), Some("prov"));
    }

    #[test]
    fn test_from_toml_requires_token() {
        assert!(BotConfig::from_toml("listen_port = 1").is_err());
    }
}
