//! Error types.
//!
//! Every fallible operation returns [`Result`]. Nothing in this crate retries or
//! reconnects on its own; the caller decides whether to retry, re-enumerate or
//! give up.

use thiserror::Error;

/// Errors produced by the codec, the device handle and the transports.
#[derive(Error, Debug)]
pub enum StratcomError {
    /// The HID transport reported a failure.
    #[error("HID error: {0}")]
    Hid(String),

    /// A transfer moved the wrong number of bytes.
    #[error("unexpected transfer length: expected {expected} bytes, got {actual}")]
    UnexpectedLength { expected: usize, actual: usize },

    /// A report carried a different report id than the one requested.
    #[error("invalid report id: expected 0x{expected:02x}, got 0x{actual:02x}")]
    InvalidReportId { expected: u8, actual: u8 },

    /// A feature report carried an id the codec does not know.
    #[error("unknown feature report id 0x{0:02x}")]
    UnknownReportId(u8),

    /// No device matching the vendor/product pair was enumerated.
    #[error("no device found (vid=0x{vendor_id:04x} pid=0x{product_id:04x})")]
    DeviceNotFound { vendor_id: u16, product_id: u16 },

    /// The device path could not be handed to the transport.
    #[error("invalid device path: {0}")]
    InvalidPath(String),

    /// Storage for an event list could not be reserved.
    #[error("failed to allocate input event list")]
    AllocationFailed,

    #[error("config error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl StratcomError {
    /// `true` for errors that stem from talking to the device: transport failures,
    /// short transfers and malformed reports.
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            StratcomError::Hid(_)
                | StratcomError::UnexpectedLength { .. }
                | StratcomError::InvalidReportId { .. }
                | StratcomError::UnknownReportId(_)
                | StratcomError::Io(_)
        )
    }
}

#[cfg(feature = "hid")]
impl From<hidapi::HidError> for StratcomError {
    fn from(e: hidapi::HidError) -> Self {
        StratcomError::Hid(e.to_string())
    }
}

impl From<toml::de::Error> for StratcomError {
    fn from(e: toml::de::Error) -> Self {
        StratcomError::Config(e.to_string())
    }
}

impl From<std::collections::TryReserveError> for StratcomError {
    fn from(_: std::collections::TryReserveError) -> Self {
        StratcomError::AllocationFailed
    }
}

pub type Result<T> = std::result::Result<T, StratcomError>;
