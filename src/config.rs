//! Detector configuration

use std::time::Duration;

/// Configuration for a keystroke trigger detector.
///
/// The only required value is the trigger phrase. Everything else has a
/// default: editable targets are ignored, and the single-character key
/// filter defaults per mode (on in bounded-FIFO mode, off in idle-timeout
/// mode) unless explicitly overridden.
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    /// The phrase whose completion fires the callback (case-insensitive)
    pub trigger: String,

    /// Clear the buffer when no key arrives within this window.
    /// `None` selects bounded-FIFO mode.
    pub idle_timeout: Option<Duration>,

    /// Discard events originating from editable elements
    pub ignore_editable_targets: bool,

    /// Discard keys whose textual form is longer than one character.
    /// `None` applies the mode default.
    pub single_char_keys_only: Option<bool>,
}

impl DetectorConfig {
    /// Create a configuration for the given trigger phrase with defaults
    pub fn new(trigger: impl Into<String>) -> Self {
        Self {
            trigger: trigger.into(),
            idle_timeout: None,
            ignore_editable_targets: true,
            single_char_keys_only: None,
        }
    }

    /// Enable idle-timeout mode with the given inactivity window
    pub fn with_idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = Some(timeout);
        self
    }

    /// Set whether events from editable elements are discarded
    pub fn ignore_editable_targets(mut self, ignore: bool) -> Self {
        self.ignore_editable_targets = ignore;
        self
    }

    /// Override the single-character key filter for either mode
    pub fn single_char_keys_only(mut self, only: bool) -> Self {
        self.single_char_keys_only = Some(only);
        self
    }

    /// Check that the configuration is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.trigger.is_empty() {
            return Err(ConfigError::EmptyTrigger);
        }
        Ok(())
    }

    /// Resolve the single-character filter, applying the mode default:
    /// bounded-FIFO mode filters multi-character key names, idle-timeout
    /// mode appends them as literal tokens.
    pub(crate) fn single_char_keys_effective(&self) -> bool {
        self.single_char_keys_only
            .unwrap_or(self.idle_timeout.is_none())
    }
}

/// Errors produced by configuration validation
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("trigger phrase must not be empty")]
    EmptyTrigger,
}
