//! Device metadata snapshot.
//!
//! [`DeviceMeta`] is a lightweight, cloneable description of an enumerated device,
//! suitable for logging and for picking a path to open. Backends populate what they
//! know; unknown fields remain `None`.
//!
//! ## Persistence notes
//! - `serial_number` (when present) is generally stable and useful for re-identification.
//! - `path` is platform-specific and may change across ports, drivers, and reconnects; treat it as
//!   an opaque handle for [`Context::open_device_on_path`](crate::context::Context::open_device_on_path).
//!
//! # Example
//! ```no_run
//! # #[cfg(feature = "hid")]
//! # fn main() -> stratcom::Result<()> {
//! use stratcom::Context;
//!
//! let mut ctx = Context::init()?;
//! for meta in ctx.enumerate()? {
//!     println!("{meta}");
//! }
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "hid"))]
//! # fn main() {}
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Snapshot of metadata describing a single enumerated device.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceMeta {
    /// OS path to the device. Pass this to `open_device_on_path`.
    pub path: String,

    /// USB Vendor ID (VID).
    pub vid: u16,

    /// USB Product ID (PID).
    pub pid: u16,

    /// Human-readable product name from the driver/firmware.
    pub product_string: Option<String>,

    pub manufacturer_string: Option<String>,

    /// Device serial number supplied by firmware/OS, if present.
    pub serial_number: Option<String>,

    /// HID interface index (platform-reported).
    ///
    /// Some stacks use `-1` to mean “not applicable”.
    pub interface_number: Option<i32>,
}

impl DeviceMeta {
    pub fn new(path: impl Into<String>, vid: u16, pid: u16) -> Self {
        Self {
            path: path.into(),
            vid,
            pid,
            ..Default::default()
        }
    }
}

impl fmt::Display for DeviceMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04x}:{:04x} {} ({})",
            self.vid,
            self.pid,
            self.product_string.as_deref().unwrap_or("Unknown"),
            self.path
        )
    }
}
