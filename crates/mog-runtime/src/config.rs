#![forbid(unsafe_code)]

//! Sync configuration.
//!
//! [`SyncConfig`] controls how markers are found and how values are
//! marshalled. With the `policy-config` feature it can also be loaded from
//! a TOML document:
//!
//! ```toml
//! attribute_prefix = "data-bind"
//! list_separator = "; "
//! focus_guard = false
//! ```

use crate::error::ConfigurationError;

/// Default marker attribute prefix; markers are `data-mog-<role>`.
pub const DEFAULT_ATTRIBUTE_PREFIX: &str = "data-mog";

/// Default separator for multi-select values.
pub const DEFAULT_LIST_SEPARATOR: &str = ", ";

/// How a model discovers and marshals its bindings.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "policy-config",
    derive(serde::Deserialize),
    serde(default, deny_unknown_fields)
)]
pub struct SyncConfig {
    /// Marker attribute names are `<attribute_prefix>-<role>`.
    pub attribute_prefix: String,
    /// Joins selected option texts of a multi-select, and splits values
    /// written back to one.
    pub list_separator: String,
    /// When set, text controls holding input focus are not overwritten.
    pub focus_guard: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            attribute_prefix: DEFAULT_ATTRIBUTE_PREFIX.to_owned(),
            list_separator: DEFAULT_LIST_SEPARATOR.to_owned(),
            focus_guard: true,
        }
    }
}

impl SyncConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the marker attribute prefix.
    #[must_use]
    pub fn with_attribute_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.attribute_prefix = prefix.into();
        self
    }

    /// Set the multi-select separator.
    #[must_use]
    pub fn with_list_separator(mut self, separator: impl Into<String>) -> Self {
        self.list_separator = separator.into();
        self
    }

    /// Enable or disable the focus guard.
    #[must_use]
    pub fn with_focus_guard(mut self, enabled: bool) -> Self {
        self.focus_guard = enabled;
        self
    }

    /// The attribute-name prefix shared by every role, e.g. `data-mog-`.
    #[must_use]
    pub fn marker_prefix(&self) -> String {
        format!("{}-", self.attribute_prefix)
    }

    /// Check the configuration is usable.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError::InvalidPolicy`] when the prefix or the
    /// separator is empty.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.attribute_prefix.trim().is_empty() {
            return Err(ConfigurationError::InvalidPolicy(
                "attribute_prefix must not be empty".into(),
            ));
        }
        if self.list_separator.is_empty() {
            return Err(ConfigurationError::InvalidPolicy(
                "list_separator must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a TOML policy. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError::InvalidPolicy`] for unparsable TOML, unknown
    /// keys, or a configuration rejected by [`SyncConfig::validate`].
    #[cfg(feature = "policy-config")]
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigurationError> {
        let config: Self = toml::from_str(source)
            .map_err(|err| ConfigurationError::InvalidPolicy(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
