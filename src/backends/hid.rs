//! `hidapi` transport.
//!
//! [`HidBackend`] owns the process-wide `HidApi` instance; [`HidTransport`] wraps one
//! open `hidapi::HidDevice`. hidapi closes the OS handle when the device is
//! dropped, so a transport is released exactly once with its owner.

use crate::error::{Result, StratcomError};
use crate::metadata::DeviceMeta;
use crate::transport::{Backend, Transport};
use hidapi::{DeviceInfo, HidApi, HidDevice};
use std::ffi::CString;
use tracing::{debug, trace};

pub struct HidBackend {
    api: HidApi,
}

impl HidBackend {
    /// Initialise hidapi. Only one instance should exist per process.
    pub fn new() -> Result<Self> {
        let api = HidApi::new()?;
        Ok(Self { api })
    }

    /// The underlying `HidApi`, for callers that need hidapi features this crate
    /// does not wrap.
    pub fn api(&self) -> &HidApi {
        &self.api
    }
}

fn meta_from_info(info: &DeviceInfo) -> DeviceMeta {
    DeviceMeta {
        path: info.path().to_string_lossy().into_owned(),
        vid: info.vendor_id(),
        pid: info.product_id(),
        product_string: info.product_string().map(str::to_owned),
        manufacturer_string: info.manufacturer_string().map(str::to_owned),
        serial_number: info.serial_number().map(str::to_owned),
        interface_number: Some(info.interface_number()),
    }
}

impl Backend for HidBackend {
    type Transport = HidTransport;

    fn enumerate(&mut self, vendor_id: u16, product_id: u16) -> Result<Vec<DeviceMeta>> {
        self.api.refresh_devices()?;
        let found: Vec<DeviceMeta> = self
            .api
            .device_list()
            .filter(|info| info.vendor_id() == vendor_id && info.product_id() == product_id)
            .map(meta_from_info)
            .collect();
        debug!(
            "enumerated {} device(s) for {:04x}:{:04x}",
            found.len(),
            vendor_id,
            product_id
        );
        Ok(found)
    }

    fn open_path(&self, path: &str) -> Result<HidTransport> {
        let c_path = CString::new(path).map_err(|_| StratcomError::InvalidPath(path.to_owned()))?;
        let device = self.api.open_path(&c_path)?;
        debug!(path, "opened HID device");
        Ok(HidTransport {
            path: path.to_owned(),
            raw: device,
        })
    }
}

/// One open hidapi connection.
pub struct HidTransport {
    path: String,
    raw: HidDevice,
}

impl HidTransport {
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl Transport for HidTransport {
    fn send_feature_report(&mut self, data: &[u8]) -> Result<usize> {
        // hidapi only reports success or failure; success means the whole report went out.
        self.raw.send_feature_report(data)?;
        trace!(path = %self.path, "feature report out: {:02x?}", data);
        Ok(data.len())
    }

    fn get_feature_report(&mut self, buf: &mut [u8]) -> Result<usize> {
        let n = self.raw.get_feature_report(buf)?;
        trace!(path = %self.path, "feature report in: {:02x?}", &buf[..n.min(buf.len())]);
        Ok(n)
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        Ok(self.raw.read(buf)?)
    }

    fn read_timeout(&mut self, buf: &mut [u8], timeout_ms: i32) -> Result<usize> {
        Ok(self.raw.read_timeout(buf, timeout_ms)?)
    }

    fn set_blocking_mode(&mut self, blocking: bool) -> Result<()> {
        Ok(self.raw.set_blocking_mode(blocking)?)
    }
}

impl Drop for HidTransport {
    fn drop(&mut self) {
        debug!(path = %self.path, "closing HID device");
    }
}
