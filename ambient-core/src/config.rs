//! Selector configuration, loadable from TOML.
//!
//! Values may be replaced between ticks by an external settings system.
//! The selector reads a fresh copy every tick and never resets its own
//! state when the configuration changes.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{AmbientError, Result};

/// Pacing and display settings for the ambient text selector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectorConfig {
    /// Percent chance (0–100) that a due tick attempts a selection.
    #[serde(default = "default_chance")]
    pub trigger_chance_percent: u8,
    /// Minimum silence between trigger attempts, in seconds.
    #[serde(default = "default_base_interval")]
    pub base_interval_secs: f32,
    /// Cooldown applied right after a successful display, in seconds.
    #[serde(default = "default_post_trigger_interval")]
    pub post_trigger_interval_secs: f32,
    /// How long a displayed line stays on screen, in seconds.
    #[serde(default = "default_display_duration")]
    pub display_duration_secs: u32,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            trigger_chance_percent: default_chance(),
            base_interval_secs: default_base_interval(),
            post_trigger_interval_secs: default_post_trigger_interval(),
            display_duration_secs: default_display_duration(),
        }
    }
}

impl SelectorConfig {
    /// Load configuration from a TOML string. The result is sanitized.
    ///
    /// # Errors
    /// Returns `AmbientError::Config` if the TOML is invalid.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(toml_str).map_err(|e| AmbientError::Config(e.to_string()))?;
        Ok(config.sanitized())
    }

    /// Load configuration from a TOML file. The result is sanitized.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Clamp every field into its valid range, logging each adjustment.
    ///
    /// Call this once where configuration enters the system; per-frame
    /// paths use [`SelectorConfig::clamped`].
    #[must_use]
    pub fn sanitized(self) -> Self {
        self.clamp_fields(true)
    }

    /// Same result as [`SelectorConfig::sanitized`], without logging.
    #[must_use]
    pub fn clamped(self) -> Self {
        self.clamp_fields(false)
    }

    fn clamp_fields(mut self, report: bool) -> Self {
        if self.trigger_chance_percent > 100 {
            if report {
                warn!(value = self.trigger_chance_percent, "trigger chance clamped to 100");
            }
            self.trigger_chance_percent = 100;
        }
        self.base_interval_secs = sanitize_interval(
            "base_interval_secs",
            self.base_interval_secs,
            default_base_interval(),
            report,
        );
        self.post_trigger_interval_secs = sanitize_interval(
            "post_trigger_interval_secs",
            self.post_trigger_interval_secs,
            default_post_trigger_interval(),
            report,
        );
        self
    }

    /// Reject out-of-range values instead of clamping them.
    ///
    /// # Errors
    /// Returns `AmbientError::Config` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.trigger_chance_percent > 100 {
            return Err(AmbientError::Config(format!(
                "trigger_chance_percent must be 0..=100, got {}",
                self.trigger_chance_percent
            )));
        }
        for (field, value) in [
            ("base_interval_secs", self.base_interval_secs),
            ("post_trigger_interval_secs", self.post_trigger_interval_secs),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(AmbientError::Config(format!(
                    "{field} must be a non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

fn sanitize_interval(field: &str, value: f32, fallback: f32, report: bool) -> f32 {
    if !value.is_finite() {
        if report {
            warn!(field, value, fallback, "non-finite interval replaced with default");
        }
        fallback
    } else if value < 0.0 {
        if report {
            warn!(field, value, "negative interval clamped to 0");
        }
        0.0
    } else {
        value
    }
}

/// Anything that can hand the selector its current configuration.
pub trait ConfigSource {
    /// The configuration to use for this tick.
    fn current(&self) -> SelectorConfig;

    /// Master switch. A disabled source suppresses every tick.
    fn enabled(&self) -> bool {
        true
    }

    /// Switch and configuration read together as one consistent view.
    ///
    /// Sources that can change between calls override this so a
    /// concurrent update never yields the old switch with the new values.
    fn read(&self) -> (bool, SelectorConfig) {
        (self.enabled(), self.current())
    }
}

impl ConfigSource for SelectorConfig {
    fn current(&self) -> SelectorConfig {
        *self
    }
}

// ---------------------------------------------------------------------------
// Serde default helpers
// ---------------------------------------------------------------------------

fn default_chance() -> u8 { 95 }
fn default_base_interval() -> f32 { 2.0 }
fn default_post_trigger_interval() -> f32 { 4.0 }
fn default_display_duration() -> u32 { 3 }
