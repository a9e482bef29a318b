//! Transport seam.
//!
//! [`Device`](crate::device::Device) never talks to hidapi directly. It drives a
//! [`Transport`], and [`Context`](crate::context::Context) gets transports from a
//! [`Backend`]. Two implementations ship with the crate:
//!
//! - [`backends::hid`](crate::backends::hid): real hardware through `hidapi`
//!   (feature **`hid`**, on by default)
//! - [`backends::virtual_device`](crate::backends::virtual_device): scripted,
//!   in-memory device for tests and demos
//!
//! Transports are blocking and single-threaded; a connection is closed by
//! dropping it.

use crate::error::Result;
use crate::metadata::DeviceMeta;

/// An open connection to one HID device.
pub trait Transport {
    /// Write a feature report. `data[0]` is the report id. Returns bytes written.
    fn send_feature_report(&mut self, data: &[u8]) -> Result<usize>;

    /// Read a feature report. The caller puts the report id in `buf[0]`.
    /// Returns bytes read, id byte included.
    fn get_feature_report(&mut self, buf: &mut [u8]) -> Result<usize>;

    /// Read one input report. In non-blocking mode `Ok(0)` means nothing was queued.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize>;

    /// Read one input report, waiting at most `timeout_ms`. `Ok(0)` means the
    /// timeout expired.
    fn read_timeout(&mut self, buf: &mut [u8], timeout_ms: i32) -> Result<usize>;

    /// Switch [`Transport::read`] between blocking and non-blocking mode.
    fn set_blocking_mode(&mut self, blocking: bool) -> Result<()>;
}

/// Process-wide access to a family of transports: enumeration and open-by-path.
pub trait Backend {
    type Transport: Transport;

    /// Devices matching `vendor_id`/`product_id`, in enumeration order.
    fn enumerate(&mut self, vendor_id: u16, product_id: u16) -> Result<Vec<DeviceMeta>>;

    /// Open the device at `path`.
    fn open_path(&self, path: &str) -> Result<Self::Transport>;
}
