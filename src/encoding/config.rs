// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Decoder configuration.
//!
//! The `DecoderConfigBuilder` provides a fluent API for tuning how strictly
//! incoming packets are validated. Configurations can also be loaded from
//! TOML:
//!
//! ```toml
//! max_bundle_depth = 4
//! strict_padding = true
//! allow_missing_type_tags = false
//! allow_trailing_bytes = true
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{OscError, Result};

/// Default limit for nested bundles.
pub const DEFAULT_MAX_BUNDLE_DEPTH: usize = 8;

/// Highest `max_bundle_depth` a configuration may set. Decoding recurses once
/// per bundle level, so the limit also bounds stack use on hostile input.
pub const BUNDLE_DEPTH_CEILING: usize = 64;

/// Settings that control decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DecoderConfig {
    /// Deepest bundle nesting accepted; the outermost bundle is depth 1
    pub max_bundle_depth: usize,
    /// Require padding bytes to be zero
    pub strict_padding: bool,
    /// Accept a message that ends right after its address
    pub allow_missing_type_tags: bool,
    /// Ignore bytes left over after the last argument of a message
    pub allow_trailing_bytes: bool,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            max_bundle_depth: DEFAULT_MAX_BUNDLE_DEPTH,
            strict_padding: true,
            allow_missing_type_tags: false,
            allow_trailing_bytes: true,
        }
    }
}

impl DecoderConfig {
    /// Start building a configuration from the defaults.
    pub fn builder() -> DecoderConfigBuilder {
        DecoderConfigBuilder::new()
    }

    /// Parse a configuration from TOML text.
    ///
    /// Missing keys keep their default value; unknown keys are rejected.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: DecoderConfig =
            toml::from_str(text).map_err(|e| OscError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| OscError::config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Render this configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| OscError::config(e.to_string()))
    }

    /// Check that every setting is within its allowed range.
    ///
    /// `max_bundle_depth` must lie in `1..=BUNDLE_DEPTH_CEILING`.
    pub fn validate(&self) -> Result<()> {
        if self.max_bundle_depth == 0 {
            return Err(OscError::config("max_bundle_depth must be at least 1"));
        }
        if self.max_bundle_depth > BUNDLE_DEPTH_CEILING {
            return Err(OscError::config(format!(
                "max_bundle_depth {} exceeds the ceiling of {BUNDLE_DEPTH_CEILING}",
                self.max_bundle_depth
            )));
        }
        Ok(())
    }
}

/// Builder for [`DecoderConfig`].
///
/// # Example
///
/// ```
/// use osctree::encoding::DecoderConfig;
///
/// let config = DecoderConfig::builder()
///     .max_bundle_depth(2)
///     .strict_padding(false)
///     .build()?;
/// assert_eq!(config.max_bundle_depth, 2);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct DecoderConfigBuilder {
    config: DecoderConfig,
}

impl DecoderConfigBuilder {
    /// Create a new builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the deepest accepted bundle nesting.
    pub fn max_bundle_depth(mut self, depth: usize) -> Self {
        self.config.max_bundle_depth = depth;
        self
    }

    /// Require zero padding bytes.
    pub fn strict_padding(mut self, strict: bool) -> Self {
        self.config.strict_padding = strict;
        self
    }

    /// Accept messages without a type tag string.
    pub fn allow_missing_type_tags(mut self, allow: bool) -> Self {
        self.config.allow_missing_type_tags = allow;
        self
    }

    /// Ignore bytes after the last argument.
    pub fn allow_trailing_bytes(mut self, allow: bool) -> Self {
        self.config.allow_trailing_bytes = allow;
        self
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_bundle_depth` is zero.
    pub fn build(self) -> Result<DecoderConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
