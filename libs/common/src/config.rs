//! Configuration for the stats widget
//!
//! Values are read with the `config` crate from `LEETSTATS_*` environment
//! variables layered over built-in defaults.

use ::config::{Config, Environment};
use serde::Deserialize;

use crate::error::{ConfigError, ConfigResult};

/// Default site the statistics are queried from
pub const DEFAULT_SITE_URL: &str = "https://leetcode.com";

/// Default number of recent accepted submissions requested
pub const DEFAULT_RECENT_LIMIT: u32 = 10;

const ENV_PREFIX: &str = "LEETSTATS";

/// Stats widget configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StatsConfig {
    /// Base site URL, without trailing slash
    pub site_url: String,
    /// Optional relay prefix placed in front of the GraphQL endpoint
    #[serde(default)]
    pub relay_url: Option<String>,
    /// `limit` passed to the recent submissions query
    pub recent_limit: u32,
    /// User-Agent sent with every request
    pub user_agent: String,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            site_url: DEFAULT_SITE_URL.to_string(),
            relay_url: None,
            recent_limit: DEFAULT_RECENT_LIMIT,
            user_agent: default_user_agent(),
        }
    }
}

impl StatsConfig {
    /// Create a new StatsConfig from environment variables
    ///
    /// # Environment Variables
    /// - `LEETSTATS_SITE_URL`: Base site URL (default: "https://leetcode.com")
    /// - `LEETSTATS_RELAY_URL`: Relay prefix, e.g. "https://cors-anywhere.herokuapp.com/" (default: unset)
    /// - `LEETSTATS_RECENT_LIMIT`: Recent submissions to request (default: 10)
    /// - `LEETSTATS_USER_AGENT`: User-Agent header (default: "leetstats/<version>")
    pub fn from_env() -> ConfigResult<Self> {
        let settings = Config::builder()
            .set_default("site_url", DEFAULT_SITE_URL)?
            .set_default("recent_limit", i64::from(DEFAULT_RECENT_LIMIT))?
            .set_default("user_agent", default_user_agent())?
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?;

        let config: StatsConfig = settings.try_deserialize()?;
        config.normalized()
    }

    /// Trim trailing slashes from the site and drop an empty relay
    fn normalized(mut self) -> ConfigResult<Self> {
        self.site_url = self.site_url.trim().trim_end_matches('/').to_string();
        if self.site_url.is_empty() {
            return Err(ConfigError::Invalid {
                key: "site_url",
                reason: "must not be empty".to_string(),
            });
        }

        self.relay_url = self
            .relay_url
            .map(|relay| relay.trim().to_string())
            .filter(|relay| !relay.is_empty());

        if self.recent_limit == 0 {
            return Err(ConfigError::Invalid {
                key: "recent_limit",
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(self)
    }

    /// GraphQL endpoint, prefixed by the relay when one is configured
    pub fn graphql_endpoint(&self) -> String {
        let target = format!("{}/graphql/", self.site_url);
        match &self.relay_url {
            Some(relay) => format!("{}{}", relay, target),
            None => target,
        }
    }

    /// Base URL problem slugs are appended to
    pub fn problem_base_url(&self) -> String {
        format!("{}/problems", self.site_url)
    }

    /// Page where the relay lets a visitor opt in, if a relay is used
    pub fn relay_opt_in_url(&self) -> Option<String> {
        self.relay_url.as_ref().map(|relay| {
            if relay.ends_with('/') {
                format!("{}corsdemo", relay)
            } else {
                format!("{}/corsdemo", relay)
            }
        })
    }
}

fn default_user_agent() -> String {
    format!("leetstats/{}", env!("CARGO_PKG_VERSION"))
}
