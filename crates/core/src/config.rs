//! Toolkit configuration via `fixturekit.toml`
//!
//! Holds the default comparator modes used when a comparison does not set
//! a flag explicitly, and the policy of mocks for invocations without a
//! matching behavior. Every field has a default, so an empty file is valid.

use crate::error::{Error, Result};
use crate::mode::{ComparatorMode, ComparatorModes};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Conventional config file name.
pub const CONFIG_FILE_NAME: &str = "fixturekit.toml";

/// What a mock does when no recorded behavior matches an invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockPolicy {
    /// Return the default value of the declared return type
    Lenient,
    /// Fail the invocation with `Error::UnexpectedInvocation`
    Strict,
}

/// Reflection comparison settings (`[reflect]` section).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ReflectConfig {
    /// Modes enabled when a flag is left at its default setting.
    #[serde(default)]
    pub default_modes: Vec<ComparatorMode>,
}

impl ReflectConfig {
    /// Default modes as a mode set.
    pub fn modes(&self) -> ComparatorModes {
        ComparatorModes::of(&self.default_modes)
    }
}

/// Mock settings (`[mock]` section).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MockConfig {
    /// Policy for invocations without behavior: `"lenient"` or `"strict"`.
    #[serde(default = "default_policy_str")]
    pub policy: String,
}

fn default_policy_str() -> String {
    "lenient".to_string()
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            policy: default_policy_str(),
        }
    }
}

impl MockConfig {
    /// Parse the policy string into a `MockPolicy`.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not `"lenient"` or `"strict"`.
    pub fn policy(&self) -> Result<MockPolicy> {
        match self.policy.as_str() {
            "lenient" => Ok(MockPolicy::Lenient),
            "strict" => Ok(MockPolicy::Strict),
            other => Err(Error::config(format!(
                "Invalid mock policy '{}' in {}. Expected \"lenient\" or \"strict\".",
                other, CONFIG_FILE_NAME
            ))),
        }
    }
}

/// Toolkit configuration loaded from `fixturekit.toml`.
///
/// # Example
///
/// ```toml
/// [reflect]
/// default_modes = ["lenient_order", "ignore_defaults"]
///
/// [mock]
/// policy = "strict"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FixtureConfig {
    /// Reflection comparison settings.
    #[serde(default)]
    pub reflect: ReflectConfig,
    /// Mock settings.
    #[serde(default)]
    pub mock: MockConfig,
}

impl FixtureConfig {
    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# fixturekit configuration

[reflect]
# Comparator modes applied when a comparison leaves a flag at its default.
# Any of: "ignore_defaults", "lenient_dates", "lenient_order"
default_modes = []

[mock]
# Behavior of mocks for invocations without a recorded behavior:
#   "lenient" = return the default value of the return type (default)
#   "strict"  = fail with an unexpected invocation error
policy = "lenient"
"#
    }

    /// Parse config from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content cannot be parsed or holds an
    /// invalid value.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: FixtureConfig = toml::from_str(content).map_err(|e| {
            Error::config(format!("Failed to parse configuration: {}", e))
        })?;
        // Validate the policy value eagerly
        config.mock.policy()?;
        Ok(config)
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content).map_err(|e| match e {
            Error::Config(msg) => Error::config(format!("{} ({})", msg, path.display())),
            other => other,
        })
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `Ok(())` whether the file was created or already existed.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|e| {
                Error::config(format!(
                    "Failed to write default config file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| {
            Error::internal(format!("Failed to serialize config: {}", e))
        })?;
        std::fs::write(path, content).map_err(|e| {
            Error::config(format!(
                "Failed to write config file '{}': {}",
                path.display(),
                e
            ))
        })
    }
}
