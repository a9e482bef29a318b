//! HID report codec.
//!
//! The device speaks two kinds of report:
//!
//! - **Feature reports** (3 bytes) configure the LEDs. Byte 0 is the report id and
//!   selects the meaning of the remaining two bytes:
//!   - `0x01` LED word: `[0x01, word & 0xff, word >> 8]`
//!   - `0x02` blink interval: `[0x02, on_time, off_time]`
//! - **Input reports** (7 bytes, id `0x01`) carry buttons, slider and axes:
//!
//! ```text
//!   b1         b2         b3         b4         b5         b6
//!   XXXX XXXX  YYYY YYXX  ZZZZ YYYY  00ZZ ZZZZ  BBBB BBBB  SSSS BBBB
//! ```
//!
//! Bits in a higher byte are higher-order bits of the axis value. Axes are 10-bit
//! two's complement; the slider lives in the top nibble of b6.

use crate::button::Slider;
use crate::error::{Result, StratcomError};
use crate::led::{BlinkInterval, LedMask};
use crate::snapshot::InputState;

/// Length of every feature report, id byte included.
pub const FEATURE_REPORT_LEN: usize = 3;
/// Length of an input report, id byte included.
pub const INPUT_REPORT_LEN: usize = 7;

pub const LED_REPORT_ID: u8 = 0x01;
pub const BLINK_REPORT_ID: u8 = 0x02;
pub const INPUT_REPORT_ID: u8 = 0x01;

const SLIDER_MASK: u8 = 0x30;
const SLIDER_1: u8 = 0x30;
const SLIDER_2: u8 = 0x20;
const SLIDER_3: u8 = 0x10;

const AXIS_RAW_MASK: u16 = 0x3FF;
const AXIS_SIGN_BIT: u16 = 0x200;

/// A decoded feature report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureReport {
    Led(LedMask),
    BlinkInterval(BlinkInterval),
}

impl FeatureReport {
    #[inline]
    pub fn report_id(&self) -> u8 {
        match self {
            FeatureReport::Led(_) => LED_REPORT_ID,
            FeatureReport::BlinkInterval(_) => BLINK_REPORT_ID,
        }
    }

    pub fn encode(&self) -> [u8; FEATURE_REPORT_LEN] {
        match self {
            FeatureReport::Led(mask) => encode_led_report(*mask),
            FeatureReport::BlinkInterval(interval) => encode_blink_report(*interval),
        }
    }

    /// Decode a feature report, dispatching on the id in byte 0.
    pub fn decode(data: &[u8]) -> Result<Self> {
        let report: &[u8; FEATURE_REPORT_LEN] =
            data.try_into()
                .map_err(|_| StratcomError::UnexpectedLength {
                    expected: FEATURE_REPORT_LEN,
                    actual: data.len(),
                })?;
        match report[0] {
            LED_REPORT_ID => Ok(FeatureReport::Led(decode_led_report(report))),
            BLINK_REPORT_ID => Ok(FeatureReport::BlinkInterval(decode_blink_report(report))),
            other => Err(StratcomError::UnknownReportId(other)),
        }
    }
}

pub fn encode_led_report(mask: LedMask) -> [u8; FEATURE_REPORT_LEN] {
    let [lo, hi] = mask.bits().to_le_bytes();
    [LED_REPORT_ID, lo, hi]
}

/// Inverse of [`encode_led_report`]. Byte 0 is not inspected.
pub fn decode_led_report(report: &[u8; FEATURE_REPORT_LEN]) -> LedMask {
    LedMask(u16::from_le_bytes([report[1], report[2]]))
}

pub fn encode_blink_report(interval: BlinkInterval) -> [u8; FEATURE_REPORT_LEN] {
    [BLINK_REPORT_ID, interval.on_time, interval.off_time]
}

/// Inverse of [`encode_blink_report`]. Byte 0 is not inspected.
pub fn decode_blink_report(report: &[u8; FEATURE_REPORT_LEN]) -> BlinkInterval {
    BlinkInterval::new(report[1], report[2])
}

/// Sign-extend a 10-bit two's complement value.
#[inline]
fn sign_extend_axis(raw: u16) -> i16 {
    let raw = raw & AXIS_RAW_MASK;
    if raw & AXIS_SIGN_BIT != 0 {
        -(((raw ^ AXIS_RAW_MASK) + 1) as i16)
    } else {
        raw as i16
    }
}

/// Decode a 7-byte input report.
///
/// Fails if the length is not [`INPUT_REPORT_LEN`] or byte 0 is not
/// [`INPUT_REPORT_ID`].
pub fn decode_input_report(data: &[u8]) -> Result<InputState> {
    let r: &[u8; INPUT_REPORT_LEN] =
        data.try_into()
            .map_err(|_| StratcomError::UnexpectedLength {
                expected: INPUT_REPORT_LEN,
                actual: data.len(),
            })?;
    if r[0] != INPUT_REPORT_ID {
        return Err(StratcomError::InvalidReportId {
            expected: INPUT_REPORT_ID,
            actual: r[0],
        });
    }

    // Low nibble of b6 holds buttons 9-12; the high nibble is the slider.
    let buttons = (u16::from(r[6] & 0x0F) << 8) | u16::from(r[5]);

    let slider = if r[6] & SLIDER_MASK == SLIDER_1 {
        Slider::Slider1
    } else if r[6] & SLIDER_2 != 0 {
        Slider::Slider2
    } else {
        Slider::Slider3
    };

    let x = (u16::from(r[2] & 0x03) << 8) | u16::from(r[1]);
    let y = (u16::from(r[3] & 0x0F) << 6) | (u16::from(r[2] & 0xFC) >> 2);
    let z = (u16::from(r[4] & 0x3F) << 4) | (u16::from(r[3] & 0xF0) >> 4);

    Ok(InputState {
        buttons,
        slider,
        axis_x: sign_extend_axis(x),
        axis_y: sign_extend_axis(y),
        axis_z: sign_extend_axis(z),
    })
}

/// Build the input report the device would send for `state`.
///
/// Axis values are truncated to 10 bits and button bits above the 12-bit word are
/// dropped, so only states within the device range survive a decode unchanged.
pub fn encode_input_report(state: &InputState) -> [u8; INPUT_REPORT_LEN] {
    let x = (state.axis_x as u16) & AXIS_RAW_MASK;
    let y = (state.axis_y as u16) & AXIS_RAW_MASK;
    let z = (state.axis_z as u16) & AXIS_RAW_MASK;
    let slider = match state.slider {
        Slider::Slider1 => SLIDER_1,
        Slider::Slider2 => SLIDER_2,
        Slider::Slider3 => SLIDER_3,
    };

    [
        INPUT_REPORT_ID,
        (x & 0xFF) as u8,
        ((x >> 8) as u8 & 0x03) | (((y & 0x3F) as u8) << 2),
        ((y >> 6) as u8 & 0x0F) | (((z & 0x0F) as u8) << 4),
        (z >> 4) as u8 & 0x3F,
        (state.buttons & 0xFF) as u8,
        ((state.buttons >> 8) as u8 & 0x0F) | slider,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::button::{Axis, Button};
    use crate::snapshot::{AXIS_MAX, AXIS_MIN};

    fn report(b: [u8; 6]) -> [u8; INPUT_REPORT_LEN] {
        [0x01, b[0], b[1], b[2], b[3], b[4], b[5]]
    }

    #[test]
    fn led_report_layout() {
        assert_eq!(encode_led_report(LedMask(0x1402)), [0x01, 0x02, 0x14]);
        assert_eq!(decode_led_report(&[0x01, 0x02, 0x14]), LedMask(0x1402));
    }

    #[test]
    fn decode_led_ignores_id_byte() {
        assert_eq!(decode_led_report(&[0xEE, 0x55, 0x15]), LedMask(0x1555));
    }

    #[test]
    fn blink_report_layout() {
        let interval = BlinkInterval::new(10, 200);
        assert_eq!(encode_blink_report(interval), [0x02, 10, 200]);
        assert_eq!(decode_blink_report(&[0x02, 10, 200]), interval);
    }

    #[test]
    fn feature_decode_dispatches_on_id() {
        assert_eq!(
            FeatureReport::decode(&[0x01, 0x05, 0x00]).ok(),
            Some(FeatureReport::Led(LedMask(0x0005)))
        );
        assert_eq!(
            FeatureReport::decode(&[0x02, 0x05, 0x00]).ok(),
            Some(FeatureReport::BlinkInterval(BlinkInterval::new(5, 0)))
        );
        assert!(matches!(
            FeatureReport::decode(&[0x03, 0x05, 0x00]),
            Err(StratcomError::UnknownReportId(0x03))
        ));
        assert!(matches!(
            FeatureReport::decode(&[0x01, 0x05]),
            Err(StratcomError::UnexpectedLength {
                expected: 3,
                actual: 2
            })
        ));
    }

    #[test]
    fn feature_encode_tags_with_its_own_id() {
        let led = FeatureReport::Led(LedMask(0x0102));
        let blink = FeatureReport::BlinkInterval(BlinkInterval::new(1, 2));
        assert_eq!(led.encode()[0], led.report_id());
        assert_eq!(blink.encode()[0], blink.report_id());
        assert_ne!(led.report_id(), blink.report_id());
    }

    #[test]
    fn zero_report_is_neutral() {
        let s = decode_input_report(&report([0; 6])).unwrap();
        assert_eq!(s.buttons, 0);
        assert_eq!(s.slider, Slider::Slider3);
        assert_eq!((s.axis_x, s.axis_y, s.axis_z), (0, 0, 0));
    }

    #[test]
    fn slider_patterns() {
        for low in 0..=0x0F {
            let s = decode_input_report(&report([0, 0, 0, 0, 0, 0x30 | low])).unwrap();
            assert_eq!(s.slider, Slider::Slider1);
            assert_eq!(s.buttons, u16::from(low) << 8);
        }
        let s = decode_input_report(&report([0, 0, 0, 0, 0, 0x20])).unwrap();
        assert_eq!(s.slider, Slider::Slider2);
        let s = decode_input_report(&report([0, 0, 0, 0, 0, 0x10])).unwrap();
        assert_eq!(s.slider, Slider::Slider3);
        // Bit 0x20 together with 0x40 but without 0x10 is still Slider2.
        let s = decode_input_report(&report([0, 0, 0, 0, 0, 0x60])).unwrap();
        assert_eq!(s.slider, Slider::Slider2);
    }

    #[test]
    fn button_word_spans_b5_and_b6() {
        let s = decode_input_report(&report([0, 0, 0, 0, 0xA5, 0x3C])).unwrap();
        assert_eq!(s.buttons, 0x0CA5);
        assert!(s.is_pressed(Button::Button1));
        assert!(s.is_pressed(Button::Button3));
        assert!(s.is_pressed(Button::Shift3));
        assert!(s.is_pressed(Button::Rec));
        assert!(!s.is_pressed(Button::Shift1));
    }

    #[test]
    fn axis_x_sign_extension() {
        let s = decode_input_report(&report([0xFF, 0x01, 0, 0, 0, 0])).unwrap();
        assert_eq!(s.axis_x, 511);
        let s = decode_input_report(&report([0x00, 0x02, 0, 0, 0, 0])).unwrap();
        assert_eq!(s.axis_x, -512);
        let s = decode_input_report(&report([0xFF, 0x03, 0, 0, 0, 0])).unwrap();
        assert_eq!(s.axis_x, -1);
    }

    #[test]
    fn axis_y_and_z_bit_positions() {
        // Y raw = 0x1FF: low six bits in b2[7:2], high four in b3[3:0].
        let s = decode_input_report(&report([0, 0xFC, 0x07, 0, 0, 0])).unwrap();
        assert_eq!((s.axis_x, s.axis_y, s.axis_z), (0, 511, 0));
        // Z raw = 0x200: low four bits in b3[7:4], high six in b4[5:0].
        let s = decode_input_report(&report([0, 0, 0x00, 0x20, 0, 0])).unwrap();
        assert_eq!((s.axis_x, s.axis_y, s.axis_z), (0, 0, -512));
        // b4's two unused top bits do not leak into Z.
        let s = decode_input_report(&report([0, 0, 0x10, 0xC0, 0, 0])).unwrap();
        assert_eq!(s.axis_z, 1);
    }

    #[test]
    fn wrong_id_or_length_is_rejected() {
        let mut bad = report([0; 6]);
        bad[0] = 0x02;
        assert!(matches!(
            decode_input_report(&bad),
            Err(StratcomError::InvalidReportId {
                expected: 0x01,
                actual: 0x02
            })
        ));
        assert!(matches!(
            decode_input_report(&[0x01, 0, 0]),
            Err(StratcomError::UnexpectedLength { expected: 7, .. })
        ));
    }

    #[test]
    fn encode_input_report_matches_decoder() {
        let mut state = InputState {
            buttons: 0x0A5A,
            slider: Slider::Slider2,
            ..Default::default()
        };
        state.set_axis(Axis::X, AXIS_MIN);
        state.set_axis(Axis::Y, -37);
        state.set_axis(Axis::Z, AXIS_MAX);
        let bytes = encode_input_report(&state);
        assert_eq!(bytes[4] & 0xC0, 0);
        assert_eq!(decode_input_report(&bytes).unwrap(), state);
    }
}
