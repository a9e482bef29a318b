//! Device handle.
//!
//! [`Device`] owns one [`Transport`] connection plus a cache of everything the
//! device has told us:
//!
//! - the LED word and a dirty flag for changes not yet written
//! - the blink interval
//! - the last decoded [`InputState`]
//!
//! LED setters only touch the cache, so several changes can be batched into a
//! single [`Device::flush_button_led_state`] round trip. Input reads decode into
//! the cached snapshot; the query methods never do I/O.
//!
//! Every I/O method performs exactly one transfer (feature write, feature read or
//! input read) and never retries. The handle is not synchronized: share it across
//! threads only behind your own lock.
//!
//! # Example
//! ```
//! use stratcom::backends::virtual_device::VirtualTransport;
//! use stratcom::{Button, ButtonLed, Device, InputEvents, InputState, LedState, ReadStatus};
//!
//! # fn main() -> stratcom::Result<()> {
//! let mut transport = VirtualTransport::new();
//! let mut pressed = InputState::default();
//! pressed.set_pressed(Button::Button2, true);
//! transport.feed_state(&pressed);
//!
//! let mut device = Device::open(transport);
//! let before = device.input_state();
//! assert_eq!(device.read_input_non_blocking()?, ReadStatus::Updated);
//!
//! for event in &InputEvents::from_states(&before, &device.input_state())? {
//!     println!("{event:?}");
//! }
//! device.set_button_led_state(ButtonLed::Button2, LedState::On)?;
//! device.close();
//! # Ok(())
//! # }
//! ```

use crate::button::{Axis, Button, Slider};
use crate::error::{Result, StratcomError};
use crate::led::{BlinkInterval, ButtonLed, LedMask, LedState};
use crate::report::{
    decode_input_report, FeatureReport, BLINK_REPORT_ID, FEATURE_REPORT_LEN, INPUT_REPORT_LEN,
    LED_REPORT_ID,
};
use crate::snapshot::InputState;
use crate::transport::Transport;
use std::time::Duration;
use tracing::{debug, trace, warn};

/// Outcome of a successful input read.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadStatus {
    /// A report was read and the cached snapshot replaced.
    Updated,
    /// Nothing was available (non-blocking and timed reads only).
    NoData,
}

/// Open Strategic Commander.
pub struct Device<T: Transport> {
    transport: T,
    led_mask: LedMask,
    blink: BlinkInterval,
    led_dirty: bool,
    input: InputState,
}

impl<T: Transport> Device<T> {
    /// Wrap an open transport without talking to the device.
    ///
    /// The LED cache starts out dirty: nothing has been confirmed with the device yet.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            led_mask: LedMask::default(),
            blink: BlinkInterval::default(),
            led_dirty: true,
            input: InputState::default(),
        }
    }

    /// Wrap an open transport and load the LED word and blink interval from the
    /// device. Failures are logged and leave the defaults in place.
    pub fn open(transport: T) -> Self {
        let mut device = Self::new(transport);
        device.sync();
        device
    }

    /// Re-read LED and blink state from the device, logging failures.
    pub fn sync(&mut self) {
        if let Err(e) = self.read_button_led_state() {
            warn!("could not read LED state: {e}");
        }
        if let Err(e) = self.read_blink_interval() {
            warn!("could not read blink interval: {e}");
        }
    }

    /// Close the connection. Dropping the handle does the same.
    pub fn close(self) {
        drop(self);
    }

    #[inline]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    #[inline]
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    // --- LEDs -----------------------------------------------------------------

    /// Cached state of one LED. `All`/`None` always read as [`LedState::Off`].
    #[inline]
    pub fn button_led_state(&self, led: ButtonLed) -> LedState {
        self.led_mask.state(led)
    }

    /// Cached LED word.
    #[inline]
    pub fn led_mask(&self) -> LedMask {
        self.led_mask
    }

    /// Change an LED and write the result to the device.
    pub fn set_button_led_state(&mut self, led: ButtonLed, state: LedState) -> Result<()> {
        self.set_button_led_state_without_flushing(led, state);
        self.flush_button_led_state()
    }

    /// Change an LED in the cache only. Call [`Device::flush_button_led_state`] to
    /// send it.
    pub fn set_button_led_state_without_flushing(&mut self, led: ButtonLed, state: LedState) {
        self.led_mask.set(led, state);
        self.led_dirty = true;
    }

    /// Write the cached LED word to the device.
    pub fn flush_button_led_state(&mut self) -> Result<()> {
        self.send_feature(FeatureReport::Led(self.led_mask))?;
        self.led_dirty = false;
        debug!("flushed LED word 0x{:04x}", self.led_mask.bits());
        Ok(())
    }

    /// `true` if the cache holds LED changes the device has not seen.
    #[inline]
    pub fn has_unflushed_led_changes(&self) -> bool {
        self.led_dirty
    }

    /// Load the LED word from the device, discarding unflushed changes.
    pub fn read_button_led_state(&mut self) -> Result<()> {
        match self.get_feature(LED_REPORT_ID)? {
            FeatureReport::Led(mask) => {
                self.led_mask = mask;
                self.led_dirty = false;
                Ok(())
            }
            other => Err(StratcomError::InvalidReportId {
                expected: LED_REPORT_ID,
                actual: other.report_id(),
            }),
        }
    }

    // --- Blink interval -------------------------------------------------------

    #[inline]
    pub fn blink_interval(&self) -> BlinkInterval {
        self.blink
    }

    /// Write a new blink interval. The cache is updated once the device accepted it.
    pub fn set_blink_interval(&mut self, on_time: u8, off_time: u8) -> Result<()> {
        let interval = BlinkInterval::new(on_time, off_time);
        self.send_feature(FeatureReport::BlinkInterval(interval))?;
        self.blink = interval;
        Ok(())
    }

    /// Load the blink interval from the device.
    pub fn read_blink_interval(&mut self) -> Result<()> {
        match self.get_feature(BLINK_REPORT_ID)? {
            FeatureReport::BlinkInterval(interval) => {
                self.blink = interval;
                Ok(())
            }
            other => Err(StratcomError::InvalidReportId {
                expected: BLINK_REPORT_ID,
                actual: other.report_id(),
            }),
        }
    }

    // --- Input ----------------------------------------------------------------

    /// Block until an input report arrives.
    pub fn read_input(&mut self) -> Result<ReadStatus> {
        self.transport.set_blocking_mode(true)?;
        let mut buf = [0u8; INPUT_REPORT_LEN];
        let n = self.transport.read(&mut buf)?;
        self.accept_input(&buf, n, false)
    }

    /// Wait at most `timeout` for an input report.
    pub fn read_input_with_timeout(&mut self, timeout: Duration) -> Result<ReadStatus> {
        self.transport.set_blocking_mode(true)?;
        // Round up: a sub-millisecond wait must not turn into a zero-timeout poll.
        let timeout_ms = timeout.as_micros().div_ceil(1000);
        let timeout_ms = i32::try_from(timeout_ms).unwrap_or(i32::MAX);
        let mut buf = [0u8; INPUT_REPORT_LEN];
        let n = self.transport.read_timeout(&mut buf, timeout_ms)?;
        self.accept_input(&buf, n, true)
    }

    /// Read an input report if one is queued; never waits.
    pub fn read_input_non_blocking(&mut self) -> Result<ReadStatus> {
        self.transport.set_blocking_mode(false)?;
        let mut buf = [0u8; INPUT_REPORT_LEN];
        let n = self.transport.read(&mut buf)?;
        self.accept_input(&buf, n, true)
    }

    /// Last decoded input state.
    #[inline]
    pub fn input_state(&self) -> InputState {
        self.input
    }

    #[inline]
    pub fn is_button_pressed(&self, button: Button) -> bool {
        self.input.is_pressed(button)
    }

    #[inline]
    pub fn axis_value(&self, axis: Axis) -> i16 {
        self.input.axis(axis)
    }

    #[inline]
    pub fn slider_state(&self) -> Slider {
        self.input.slider
    }

    // --- Transfers ------------------------------------------------------------

    fn send_feature(&mut self, report: FeatureReport) -> Result<()> {
        let bytes = report.encode();
        let written = self.transport.send_feature_report(&bytes)?;
        if written != bytes.len() {
            return Err(StratcomError::UnexpectedLength {
                expected: bytes.len(),
                actual: written,
            });
        }
        Ok(())
    }

    fn get_feature(&mut self, report_id: u8) -> Result<FeatureReport> {
        let mut buf = [0u8; FEATURE_REPORT_LEN];
        buf[0] = report_id;
        let n = self.transport.get_feature_report(&mut buf)?;
        if n != FEATURE_REPORT_LEN {
            return Err(StratcomError::UnexpectedLength {
                expected: FEATURE_REPORT_LEN,
                actual: n,
            });
        }
        FeatureReport::decode(&buf)
    }

    /// Decode `n` bytes read into `buf`. The cached snapshot only changes on success.
    fn accept_input(&mut self, buf: &[u8], n: usize, may_be_empty: bool) -> Result<ReadStatus> {
        if n == 0 && may_be_empty {
            return Ok(ReadStatus::NoData);
        }
        if n != INPUT_REPORT_LEN {
            return Err(StratcomError::UnexpectedLength {
                expected: INPUT_REPORT_LEN,
                actual: n,
            });
        }
        self.input = decode_input_report(&buf[..n])?;
        trace!(state = ?self.input, "input report");
        Ok(ReadStatus::Updated)
    }
}

impl<T: Transport> Drop for Device<T> {
    fn drop(&mut self) {
        debug!(unflushed_led_changes = self.led_dirty, "closing device");
    }
}
