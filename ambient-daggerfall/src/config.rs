//! Mod settings for the ambient text module.
//!
//! Mirrors the host's mod-settings file: a `[modules]` section with the
//! master switch and an `[ambient_text]` section with the pacing values.
//! Out-of-range values are clamped here, at the boundary, so the selector
//! only ever sees sanitized configuration.
//!
//! ```toml
//! [modules]
//! ambient_text = true
//!
//! [ambient_text]
//! text_chance = 95
//! interval = 2
//! post_text_interval = 4
//! text_display_time = 3
//! ```

use std::path::Path;
use std::sync::Arc;

use ambient_core::config::{ConfigSource, SelectorConfig};
use ambient_core::error::{AmbientError, Result};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Top-level mod settings, loadable from TOML.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ModSettings {
    /// Which modules are switched on.
    #[serde(default)]
    pub modules: ModulesSection,
    /// Ambient text pacing.
    #[serde(default)]
    pub ambient_text: AmbientTextSection,
}

/// `[modules]` section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModulesSection {
    /// Master switch for ambient text.
    #[serde(default = "default_true")]
    pub ambient_text: bool,
}

impl Default for ModulesSection {
    fn default() -> Self {
        Self { ambient_text: true }
    }
}

/// `[ambient_text]` section, in the host's own units and names.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmbientTextSection {
    /// Percent chance per due tick.
    #[serde(default = "default_text_chance")]
    pub text_chance: i32,
    /// Base interval, seconds.
    #[serde(default = "default_interval")]
    pub interval: f32,
    /// Interval after a line was shown, seconds.
    #[serde(default = "default_post_text_interval")]
    pub post_text_interval: f32,
    /// On-screen time per line, seconds.
    #[serde(default = "default_text_display_time")]
    pub text_display_time: i32,
}

impl Default for AmbientTextSection {
    fn default() -> Self {
        Self {
            text_chance: default_text_chance(),
            interval: default_interval(),
            post_text_interval: default_post_text_interval(),
            text_display_time: default_text_display_time(),
        }
    }
}

impl ModSettings {
    /// Load settings from a TOML string.
    ///
    /// # Errors
    /// Returns `AmbientError::Config` if the TOML is invalid.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str).map_err(|e| AmbientError::Config(e.to_string()))
    }

    /// Load settings from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Whether the ambient text module is switched on.
    #[must_use]
    pub fn enabled(&self) -> bool {
        self.modules.ambient_text
    }

    /// Selector configuration, clamped into valid ranges.
    ///
    /// Silent; out-of-range values are reported once, when the settings
    /// enter a [`SettingsHandle`].
    #[must_use]
    pub fn selector_config(&self) -> SelectorConfig {
        self.raw_selector_config().clamped()
    }

    fn raw_selector_config(&self) -> SelectorConfig {
        let section = &self.ambient_text;
        SelectorConfig {
            trigger_chance_percent: u8::try_from(section.text_chance.clamp(0, 100)).unwrap_or(100),
            base_interval_secs: section.interval,
            post_trigger_interval_secs: section.post_text_interval,
            display_duration_secs: u32::try_from(section.text_display_time).unwrap_or(0),
        }
    }
}

// ---------------------------------------------------------------------------
// Hot-swappable handle
// ---------------------------------------------------------------------------

/// Shared, hot-reloadable settings.
///
/// Clone it to hand one copy to the frame system and keep another for the
/// settings UI. Updates swap the whole value under a write lock; readers
/// always see either the old or the new settings, never a mix.
///
/// Settings are sanitized once on the way in and the resulting
/// [`SelectorConfig`] is stored beside them, so per-frame reads are a copy.
#[derive(Debug, Clone, Default)]
pub struct SettingsHandle {
    inner: Arc<RwLock<ActiveSettings>>,
}

#[derive(Debug, Clone, Copy)]
struct ActiveSettings {
    settings: ModSettings,
    config: SelectorConfig,
}

impl ActiveSettings {
    fn new(settings: ModSettings) -> Self {
        Self {
            config: settings.raw_selector_config().sanitized(),
            settings,
        }
    }
}

impl Default for ActiveSettings {
    fn default() -> Self {
        Self::new(ModSettings::default())
    }
}

impl SettingsHandle {
    /// Wrap initial settings.
    #[must_use]
    pub fn new(settings: ModSettings) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ActiveSettings::new(settings))),
        }
    }

    /// Copy of the current settings.
    #[must_use]
    pub fn get(&self) -> ModSettings {
        self.inner.read().settings
    }

    /// Swap in new settings.
    pub fn replace(&self, settings: ModSettings) {
        let active = ActiveSettings::new(settings);
        *self.inner.write() = active;
        info!(
            enabled = settings.enabled(),
            config = ?active.config,
            "ambient text settings updated"
        );
    }

    /// Re-read settings from `path` and swap them in.
    ///
    /// On error the current settings stay in force.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn reload_from_file(&self, path: &Path) -> Result<()> {
        let settings = ModSettings::from_file(path)?;
        self.replace(settings);
        Ok(())
    }
}

impl ConfigSource for SettingsHandle {
    fn current(&self) -> SelectorConfig {
        self.inner.read().config
    }

    fn enabled(&self) -> bool {
        self.inner.read().settings.enabled()
    }

    fn read(&self) -> (bool, SelectorConfig) {
        let active = *self.inner.read();
        (active.settings.enabled(), active.config)
    }
}

impl ConfigSource for ModSettings {
    fn current(&self) -> SelectorConfig {
        self.selector_config()
    }

    fn enabled(&self) -> bool {
        ModSettings::enabled(self)
    }
}

// ---------------------------------------------------------------------------
// Serde default helpers
// ---------------------------------------------------------------------------

fn default_true() -> bool { true }
fn default_text_chance() -> i32 { 95 }
fn default_interval() -> f32 { 2.0 }
fn default_post_text_interval() -> f32 { 4.0 }
fn default_text_display_time() -> i32 { 3 }
