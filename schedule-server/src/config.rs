//! Server configuration.

use std::net::SocketAddr;

use crate::aggregate::{AggregatorConfig, InvalidModePolicy, ModePolicy};
use crate::labels::{InvalidLocale, LabelLocale};

/// Environment variable holding the listen address.
pub const BIND_ADDR_VAR: &str = "SCHEDULE_BIND_ADDR";
/// Environment variable selecting the mode policy.
pub const MODE_POLICY_VAR: &str = "SCHEDULE_MODE_POLICY";
/// Environment variable selecting the day label locale.
pub const DAY_LABELS_VAR: &str = "SCHEDULE_DAY_LABELS";

/// Errors from reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("SCHEDULE_BIND_ADDR: invalid socket address {0:?}")]
    BindAddr(String),

    #[error("SCHEDULE_MODE_POLICY: {0}")]
    ModePolicy(#[from] InvalidModePolicy),

    #[error("SCHEDULE_DAY_LABELS: {0}")]
    DayLabels(#[from] InvalidLocale),
}

/// Configuration for the schedule server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on.
    pub bind_addr: SocketAddr,

    /// How mixed regular/flexible schedules are handled.
    pub mode_policy: ModePolicy,

    /// Language of day headings in flexible schedules.
    pub day_labels: LabelLocale,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    ///
    /// Unset variables take their defaults; set but invalid variables are
    /// an error.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(addr) = lookup(BIND_ADDR_VAR) {
            config.bind_addr = addr
                .trim()
                .parse()
                .map_err(|_| ConfigError::BindAddr(addr.clone()))?;
        }
        if let Some(policy) = lookup(MODE_POLICY_VAR) {
            config.mode_policy = policy.parse()?;
        }
        if let Some(locale) = lookup(DAY_LABELS_VAR) {
            config.day_labels = locale.parse()?;
        }

        Ok(config)
    }

    /// The aggregator settings carried by this configuration.
    pub fn aggregator(&self) -> AggregatorConfig {
        AggregatorConfig {
            mode_policy: self.mode_policy,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            mode_policy: ModePolicy::LastSeen,
            day_labels: LabelLocale::ZhTw,
        }
    }
}
