//! Library configuration.
//!
//! [`Config`] is read from TOML. Every key is optional:
//!
//! ```toml
//! # Open this path instead of the first enumerated device.
//! device_path = "/dev/hidraw4"
//! # Read LED and blink state from the device when opening it.
//! sync_on_open = true
//! # Timeout used by polling loops such as the `monitor` demo.
//! read_timeout_ms = 100
//! ```
//!
//! Enumeration always uses [`VENDOR_ID`]/[`PRODUCT_ID`]; only the one device
//! model is supported.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Microsoft.
pub const VENDOR_ID: u16 = 0x045e;
/// SideWinder Strategic Commander.
pub const PRODUCT_ID: u16 = 0x0033;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Open this path instead of the first enumerated device.
    pub device_path: Option<String>,
    /// Load LED and blink state when a device is opened.
    pub sync_on_open: bool,
    /// Suggested timeout for callers polling with
    /// [`Device::read_input_with_timeout`](crate::device::Device::read_input_with_timeout).
    /// The library itself never reads it; see [`Config::read_timeout`].
    pub read_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            device_path: None,
            sync_on_open: true,
            read_timeout_ms: 100,
        }
    }
}

impl Config {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    #[inline]
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StratcomError;

    #[test]
    fn empty_document_gives_defaults() {
        assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
    }

    #[test]
    fn partial_document_overrides_only_given_keys() {
        let cfg = Config::from_toml_str(
            r#"
            device_path = "/dev/hidraw4"
            read_timeout_ms = 250
            "#,
        )
        .unwrap();
        assert_eq!(cfg.device_path.as_deref(), Some("/dev/hidraw4"));
        assert_eq!(cfg.read_timeout(), Duration::from_millis(250));
        assert!(cfg.sync_on_open);
    }

    #[test]
    fn device_ids_cannot_be_overridden() {
        let doc = "vendor_id = 0x1234\nproduct_id = 0x00ff";
        let err = Config::from_toml_str(doc).unwrap_err();
        assert!(matches!(err, StratcomError::Config(_)));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = Config::from_toml_str("blink_rate = 3").unwrap_err();
        assert!(matches!(err, StratcomError::Config(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = Config::load("/nonexistent/stratcom.toml").unwrap_err();
        assert!(matches!(err, StratcomError::Io(_)));
    }
}
