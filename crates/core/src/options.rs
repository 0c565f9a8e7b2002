//! Validator configuration.

use serde::Deserialize;

/// What the walker does after recording a configuration error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigErrorPolicy {
    /// Record it with the ordinary failures and keep walking.
    #[default]
    Merge,
    /// Stop at the first configuration error.
    Abort,
}

/// Options fixed for the lifetime of a [`crate::Validator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct ValidatorOptions {
    /// Treat every field not marked `optional` as `required`.
    #[serde(default)]
    pub fields_required_by_default: bool,
    #[serde(default)]
    pub config_error_policy: ConfigErrorPolicy,
}

impl ValidatorOptions {
    pub fn required_by_default(mut self, required: bool) -> Self {
        self.fields_required_by_default = required;
        self
    }

    pub fn config_error_policy(mut self, policy: ConfigErrorPolicy) -> Self {
        self.config_error_policy = policy;
        self
    }

    pub fn aborts_on_config_error(&self) -> bool {
        self.config_error_policy == ConfigErrorPolicy::Abort
    }
}
