// ============================================================================
// File: packages/ecr-cleanup/src/config.rs
// ----------------------------------------------------------------------------
// Handler configuration, built in code or loaded from the environment
// ============================================================================

use std::str::FromStr;
use std::time::Duration;

use uuid::Uuid;

use crate::error::ConfigError;

/// Physical id reported for every custom resource this handler answers
pub const DEFAULT_PHYSICAL_RESOURCE_ID: Uuid = uuid::uuid!("f7d0f730-4e01-1108-9c0d-fa7ae010b0bc");

pub const ENV_PHYSICAL_RESOURCE_ID: &str = "ECR_CLEANUP_PHYSICAL_RESOURCE_ID";
pub const ENV_ENVELOPE_POLICY: &str = "ECR_CLEANUP_ENVELOPE_POLICY";
pub const ENV_TREAT_MISSING_AS_DELETED: &str = "ECR_CLEANUP_TREAT_MISSING_AS_DELETED";
pub const ENV_CALLBACK_TIMEOUT_SECS: &str = "ECR_CLEANUP_CALLBACK_TIMEOUT_SECS";

/// How caught failures are reflected in the response envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnvelopePolicy {
    /// Envelope is always SUCCESS; only the payload text carries failures
    #[default]
    AlwaysSuccess,

    /// Caught errors and unrecognized phases produce a FAILED envelope
    Propagate,
}

impl FromStr for EnvelopePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "always-success" | "always_success" => Ok(EnvelopePolicy::AlwaysSuccess),
            "propagate" => Ok(EnvelopePolicy::Propagate),
            other => Err(ConfigError::new(
                ENV_ENVELOPE_POLICY,
                format!("expected 'always-success' or 'propagate', got '{other}'"),
            )),
        }
    }
}

/// Cleanup handler configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerConfig {
    /// Physical resource id sent back with every response
    pub physical_resource_id: Uuid,

    /// Envelope status policy for caught failures
    pub envelope_policy: EnvelopePolicy,

    /// Report a Delete of an absent repository as SUCCESS
    pub treat_missing_as_deleted: bool,

    /// Upper bound on the response callback request
    pub callback_timeout: Duration,
}

impl HandlerConfig {
    pub fn new() -> Self {
        Self {
            physical_resource_id: DEFAULT_PHYSICAL_RESOURCE_ID,
            envelope_policy: EnvelopePolicy::default(),
            treat_missing_as_deleted: false,
            callback_timeout: Duration::from_secs(30),
        }
    }

    pub fn with_physical_resource_id(mut self, id: Uuid) -> Self {
        self.physical_resource_id = id;
        self
    }

    pub fn with_envelope_policy(mut self, policy: EnvelopePolicy) -> Self {
        self.envelope_policy = policy;
        self
    }

    pub fn with_treat_missing_as_deleted(mut self, enabled: bool) -> Self {
        self.treat_missing_as_deleted = enabled;
        self
    }

    pub fn with_callback_timeout(mut self, timeout: Duration) -> Self {
        self.callback_timeout = timeout;
        self
    }

    /// Load configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    ///
    /// Unset keys keep their defaults. Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::new();

        if let Some(raw) = get(ENV_PHYSICAL_RESOURCE_ID) {
            config.physical_resource_id = Uuid::parse_str(raw.trim())
                .map_err(|e| ConfigError::new(ENV_PHYSICAL_RESOURCE_ID, e.to_string()))?;
        }

        if let Some(raw) = get(ENV_ENVELOPE_POLICY) {
            config.envelope_policy = raw.parse()?;
        }

        if let Some(raw) = get(ENV_TREAT_MISSING_AS_DELETED) {
            config.treat_missing_as_deleted = parse_bool(ENV_TREAT_MISSING_AS_DELETED, &raw)?;
        }

        if let Some(raw) = get(ENV_CALLBACK_TIMEOUT_SECS) {
            let seconds: u64 = raw.trim().parse().map_err(|e| {
                ConfigError::new(ENV_CALLBACK_TIMEOUT_SECS, format!("{e}: '{raw}'"))
            })?;
            if seconds == 0 {
                return Err(ConfigError::new(
                    ENV_CALLBACK_TIMEOUT_SECS,
                    "timeout must be at least one second",
                ));
            }
            config.callback_timeout = Duration::from_secs(seconds);
        }

        Ok(config)
    }
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_bool(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::new(key, format!("expected a boolean, got '{other}'"))),
    }
}
