//! In-memory device.
//!
//! [`VirtualTransport`] behaves like a Strategic Commander on the other end of a
//! [`Transport`]: it stores the feature reports written to it, answers feature
//! reads from that store, and hands out queued input reports. Every call is
//! recorded so tests can assert on exact device traffic.
//!
//! A blocking [`Transport::read`] with nothing queued fails instead of hanging.

use crate::error::{Result, StratcomError};
use crate::led::{BlinkInterval, LedMask};
use crate::metadata::DeviceMeta;
use crate::report::{encode_blink_report, encode_input_report, encode_led_report};
use crate::snapshot::InputState;
use crate::transport::{Backend, Transport};
use std::collections::{HashMap, VecDeque};

/// Scripted device connection.
#[derive(Clone, Debug, Default)]
pub struct VirtualTransport {
    feature_reports: HashMap<u8, Vec<u8>>,
    input: VecDeque<Vec<u8>>,
    sent: Vec<Vec<u8>>,
    read_calls: usize,
    last_timeout_ms: Option<i32>,
    blocking: bool,
    fail_writes: bool,
    fail_reads: bool,
    short_writes: bool,
}

impl VirtualTransport {
    /// A device with all LEDs off, a zero blink interval and no queued input.
    pub fn new() -> Self {
        let mut dev = Self {
            blocking: true,
            ..Default::default()
        };
        dev.set_led_mask(LedMask::default());
        dev.set_blink_interval(BlinkInterval::default());
        dev
    }

    /// Device-side LED word, as a feature read would return it.
    pub fn set_led_mask(&mut self, mask: LedMask) {
        let report = encode_led_report(mask);
        self.feature_reports.insert(report[0], report.to_vec());
    }

    pub fn set_blink_interval(&mut self, interval: BlinkInterval) {
        let report = encode_blink_report(interval);
        self.feature_reports.insert(report[0], report.to_vec());
    }

    /// Store an arbitrary feature report answer under `report_id`.
    pub fn set_feature_report(&mut self, report_id: u8, bytes: Vec<u8>) {
        self.feature_reports.insert(report_id, bytes);
    }

    /// Queue raw input report bytes.
    pub fn feed(&mut self, report: impl Into<Vec<u8>>) {
        self.input.push_back(report.into());
    }

    /// Queue the input report encoding `state`.
    pub fn feed_state(&mut self, state: &InputState) {
        self.feed(encode_input_report(state));
    }

    /// Feature reports written so far, oldest first.
    pub fn sent_feature_reports(&self) -> &[Vec<u8>] {
        &self.sent
    }

    /// Number of `read`/`read_timeout` calls made.
    pub fn read_calls(&self) -> usize {
        self.read_calls
    }

    /// Timeout passed to the most recent `read_timeout` call.
    pub fn last_read_timeout_ms(&self) -> Option<i32> {
        self.last_timeout_ms
    }

    pub fn is_blocking(&self) -> bool {
        self.blocking
    }

    pub fn pending_input(&self) -> usize {
        self.input.len()
    }

    /// Make every feature write fail.
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Make every read (feature and input) fail.
    pub fn set_fail_reads(&mut self, fail: bool) {
        self.fail_reads = fail;
    }

    /// Make feature writes report one byte fewer than requested.
    pub fn set_short_writes(&mut self, short: bool) {
        self.short_writes = short;
    }

    fn pop_input(&mut self, buf: &mut [u8]) -> usize {
        match self.input.pop_front() {
            Some(report) => {
                let n = report.len().min(buf.len());
                buf[..n].copy_from_slice(&report[..n]);
                n
            }
            None => 0,
        }
    }
}

impl Transport for VirtualTransport {
    fn send_feature_report(&mut self, data: &[u8]) -> Result<usize> {
        if self.fail_writes {
            return Err(StratcomError::Hid("virtual device rejected write".into()));
        }
        self.sent.push(data.to_vec());
        if let Some(&id) = data.first() {
            self.feature_reports.insert(id, data.to_vec());
        }
        if self.short_writes {
            Ok(data.len().saturating_sub(1))
        } else {
            Ok(data.len())
        }
    }

    fn get_feature_report(&mut self, buf: &mut [u8]) -> Result<usize> {
        if self.fail_reads {
            return Err(StratcomError::Hid("virtual device read failed".into()));
        }
        let id = buf.first().copied().unwrap_or_default();
        let report = self
            .feature_reports
            .get(&id)
            .ok_or_else(|| StratcomError::Hid(format!("no feature report 0x{id:02x}")))?;
        let n = report.len().min(buf.len());
        buf[..n].copy_from_slice(&report[..n]);
        Ok(n)
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        self.read_calls += 1;
        if self.fail_reads {
            return Err(StratcomError::Hid("virtual device read failed".into()));
        }
        if self.blocking && self.input.is_empty() {
            return Err(StratcomError::Hid(
                "blocking read on virtual device with no queued input".into(),
            ));
        }
        Ok(self.pop_input(buf))
    }

    fn read_timeout(&mut self, buf: &mut [u8], timeout_ms: i32) -> Result<usize> {
        self.read_calls += 1;
        self.last_timeout_ms = Some(timeout_ms);
        if self.fail_reads {
            return Err(StratcomError::Hid("virtual device read failed".into()));
        }
        Ok(self.pop_input(buf))
    }

    fn set_blocking_mode(&mut self, blocking: bool) -> Result<()> {
        self.blocking = blocking;
        Ok(())
    }
}

/// Backend handing out clones of registered [`VirtualTransport`]s.
#[derive(Clone, Debug, Default)]
pub struct VirtualBackend {
    devices: Vec<(DeviceMeta, VirtualTransport)>,
}

impl VirtualBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `transport` under `meta.path`.
    pub fn add_device(&mut self, meta: DeviceMeta, transport: VirtualTransport) {
        self.devices.push((meta, transport));
    }
}

impl Backend for VirtualBackend {
    type Transport = VirtualTransport;

    fn enumerate(&mut self, vendor_id: u16, product_id: u16) -> Result<Vec<DeviceMeta>> {
        Ok(self
            .devices
            .iter()
            .filter(|(meta, _)| meta.vid == vendor_id && meta.pid == product_id)
            .map(|(meta, _)| meta.clone())
            .collect())
    }

    fn open_path(&self, path: &str) -> Result<VirtualTransport> {
        self.devices
            .iter()
            .find(|(meta, _)| meta.path == path)
            .map(|(_, transport)| transport.clone())
            .ok_or_else(|| StratcomError::Hid(format!("no virtual device at {path}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feature_write_is_read_back() {
        let mut dev = VirtualTransport::new();
        dev.send_feature_report(&[0x01, 0x04, 0x10]).unwrap();
        let mut buf = [0x01, 0, 0];
        assert_eq!(dev.get_feature_report(&mut buf).unwrap(), 3);
        assert_eq!(buf, [0x01, 0x04, 0x10]);
        assert_eq!(dev.sent_feature_reports(), &[vec![0x01, 0x04, 0x10]]);
    }

    #[test]
    fn non_blocking_read_with_empty_queue_returns_zero() {
        let mut dev = VirtualTransport::new();
        dev.set_blocking_mode(false).unwrap();
        let mut buf = [0u8; 7];
        assert_eq!(dev.read(&mut buf).unwrap(), 0);
        assert_eq!(dev.read_calls(), 1);
    }

    #[test]
    fn blocking_read_with_empty_queue_fails() {
        let mut dev = VirtualTransport::new();
        let mut buf = [0u8; 7];
        assert!(dev.read(&mut buf).is_err());
    }

    #[test]
    fn backend_filters_by_ids() {
        let mut backend = VirtualBackend::new();
        backend.add_device(
            DeviceMeta::new("a", 0x045e, 0x0033),
            VirtualTransport::new(),
        );
        backend.add_device(
            DeviceMeta::new("b", 0x1234, 0x0033),
            VirtualTransport::new(),
        );
        let found = backend.enumerate(0x045e, 0x0033).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].path, "a");
        assert!(backend.open_path("b").is_ok());
        assert!(backend.open_path("c").is_err());
    }
}
