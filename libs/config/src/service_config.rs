//! Transmitter Configuration Module
//!
//! Loads `{host, port, account_id, key}` plus pacing and transport tuning
//! from a JSON or TOML file, with `SIA_`-prefixed environment variables
//! overriding file values. Validation happens here so a bad config never
//! reaches the network.

use codec::{CipherKey, MAX_ACCOUNT_LEN};
use config_crate::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{ConfigError, ConfigResult};
use crate::service::{pacing, transport, ENV_PREFIX};

/// Source shape before validation
#[derive(Debug, Deserialize, Default)]
struct RawConfig {
    host: Option<String>,
    port: Option<u16>,
    account_id: Option<String>,
    key: Option<String>,
    delay_ms: Option<u64>,
    connect_timeout_ms: Option<u64>,
    response_limit: Option<usize>,
}

/// Validated, immutable configuration for one run
#[derive(Debug, Clone)]
pub struct TransmitterConfig {
    pub host: String,
    pub port: u16,
    pub account_id: String,
    /// Present means every message is encrypted
    pub key: Option<CipherKey>,
    /// Pause after each message
    pub delay: Duration,
    pub connect_timeout: Duration,
    /// Maximum response bytes read per message
    pub response_limit: usize,
}

impl TransmitterConfig {
    /// Build a config in code with default pacing and transport settings
    ///
    /// An empty key string means plaintext, as in config files.
    pub fn new(
        host: impl Into<String>,
        port: u16,
        account_id: impl Into<String>,
        key: Option<&str>,
    ) -> ConfigResult<Self> {
        RawConfig {
            host: Some(host.into()),
            port: Some(port),
            account_id: Some(account_id.into()),
            key: key.map(str::to_string),
            ..Default::default()
        }
        .validate()
    }

    /// Load from `path`, overlaid with `SIA_*` environment variables
    ///
    /// Environment values are kept as strings; only fields typed as numbers
    /// convert them, so digit-only account ids and keys arrive unchanged.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        Self::load_with_env(path, Environment::with_prefix(ENV_PREFIX))
    }

    fn load_with_env(path: &Path, env: Environment) -> ConfigResult<Self> {
        info!("Loading transmitter config: {:?}", path);

        let raw: RawConfig = Config::builder()
            .add_source(File::from(path).required(true))
            .add_source(env)
            .build()?
            .try_deserialize()?;

        let config = raw.validate()?;
        debug!(
            host = %config.host,
            port = config.port,
            account = %config.account_id,
            encrypted = config.is_encrypted(),
            delay_ms = config.delay.as_millis() as u64,
            "Transmitter config loaded"
        );
        Ok(config)
    }

    /// `host:port` for the transport
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn is_encrypted(&self) -> bool {
        self.key.is_some()
    }
}

impl RawConfig {
    fn validate(self) -> ConfigResult<TransmitterConfig> {
        let host = self.host.ok_or(ConfigError::Missing { field: "host" })?;
        if host.trim().is_empty() {
            return Err(ConfigError::invalid("host", "must not be empty"));
        }

        let port = self.port.ok_or(ConfigError::Missing { field: "port" })?;
        if port == 0 {
            return Err(ConfigError::invalid("port", "must be non-zero"));
        }

        let account_id = self
            .account_id
            .ok_or(ConfigError::Missing { field: "account_id" })?;
        if account_id.is_empty() {
            return Err(ConfigError::invalid("account_id", "must not be empty"));
        }
        let account_len = account_id.chars().count();
        if account_len > MAX_ACCOUNT_LEN {
            return Err(ConfigError::invalid(
                "account_id",
                format!("{account_len} characters exceeds the maximum of {MAX_ACCOUNT_LEN}"),
            ));
        }

        let key = match self.key.as_deref() {
            None | Some("") => None,
            Some(key) => Some(CipherKey::new(key)?),
        };

        let response_limit = self
            .response_limit
            .unwrap_or(transport::RESPONSE_LIMIT_BYTES);
        if response_limit == 0 {
            return Err(ConfigError::invalid("response_limit", "must be non-zero"));
        }

        Ok(TransmitterConfig {
            host,
            port,
            account_id,
            key,
            delay: Duration::from_millis(self.delay_ms.unwrap_or(pacing::INTER_MESSAGE_DELAY_MS)),
            connect_timeout: Duration::from_millis(
                self.connect_timeout_ms
                    .unwrap_or(transport::CONNECT_TIMEOUT_MS),
            ),
            response_limit,
        })
    }
}
