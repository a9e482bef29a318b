//! Button LED state.
//!
//! The device keeps all LED state in one 16-bit word with two bits per lit button:
//! the low bit turns the LED on, the bit above it makes it blink. The device rejects
//! a word with both bits set for the same button, so [`LedMask::set`] always clears
//! the opposite bit first.
//!
//! ```
//! use stratcom::{ButtonLed, LedMask, LedState};
//!
//! let mut mask = LedMask::default();
//! mask.set(ButtonLed::Button3, LedState::On);
//! mask.set(ButtonLed::Button3, LedState::Blink);
//! assert_eq!(mask.state(ButtonLed::Button3), LedState::Blink);
//! assert_eq!(mask.bits(), 0x0020);
//! ```

use serde::{Deserialize, Serialize};

/// Selects which LED(s) an operation applies to.
///
/// Each value is the mask of the "on" bit(s) in the LED word; the "blink" bit is the
/// next bit up. [`ButtonLed::All`] is a write target only and [`ButtonLed::None`]
/// selects nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u16)]
pub enum ButtonLed {
    Button1 = 0x0001,
    Button2 = 0x0004,
    Button3 = 0x0010,
    Button4 = 0x0040,
    Button5 = 0x0100,
    Button6 = 0x0400,
    Rec = 0x1000,
    All = 0x1555,
    None = 0x0000,
}

impl ButtonLed {
    /// The seven physical LEDs.
    pub const PHYSICAL: [ButtonLed; 7] = [
        ButtonLed::Button1,
        ButtonLed::Button2,
        ButtonLed::Button3,
        ButtonLed::Button4,
        ButtonLed::Button5,
        ButtonLed::Button6,
        ButtonLed::Rec,
    ];

    #[inline]
    pub const fn on_mask(self) -> u16 {
        self as u16
    }

    #[inline]
    pub const fn blink_mask(self) -> u16 {
        (self as u16) << 1
    }
}

/// Tri-state of a single LED.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LedState {
    #[default]
    Off,
    On,
    Blink,
}

/// Mirror of the device's LED word.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LedMask(pub u16);

impl LedMask {
    #[inline]
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// State of one LED. The `All` and `None` selectors always read as `Off`.
    pub fn state(self, led: ButtonLed) -> LedState {
        match led {
            ButtonLed::All | ButtonLed::None => LedState::Off,
            _ if self.0 & led.on_mask() != 0 => LedState::On,
            _ if self.0 & led.blink_mask() != 0 => LedState::Blink,
            _ => LedState::Off,
        }
    }

    /// Change the selected LED(s) to `state`. Pure mask update; no I/O.
    pub fn set(&mut self, led: ButtonLed, state: LedState) {
        match state {
            LedState::Blink => {
                self.0 &= !led.on_mask();
                self.0 |= led.blink_mask();
            }
            LedState::On => {
                self.0 &= !led.blink_mask();
                self.0 |= led.on_mask();
            }
            LedState::Off => {
                self.0 &= !led.on_mask();
                self.0 &= !led.blink_mask();
            }
        }
    }

    /// Builder-style variant of [`LedMask::set`].
    #[must_use]
    pub fn with(mut self, led: ButtonLed, state: LedState) -> Self {
        self.set(led, state);
        self
    }
}

/// LED blink timing, shared by every blinking LED.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlinkInterval {
    pub on_time: u8,
    pub off_time: u8,
}

impl BlinkInterval {
    pub const fn new(on_time: u8, off_time: u8) -> Self {
        Self { on_time, off_time }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_selector_is_every_physical_on_bit() {
        let combined = ButtonLed::PHYSICAL
            .iter()
            .fold(0u16, |acc, led| acc | led.on_mask());
        assert_eq!(combined, ButtonLed::All.on_mask());
    }

    #[test]
    fn on_then_blink_clears_on_bit() {
        let mut mask = LedMask::default();
        mask.set(ButtonLed::Button1, LedState::On);
        assert_eq!(mask.bits(), 0x0001);
        mask.set(ButtonLed::Button1, LedState::Blink);
        assert_eq!(mask.bits(), 0x0002);
        mask.set(ButtonLed::Button1, LedState::Off);
        assert_eq!(mask.bits(), 0x0000);
    }

    #[test]
    fn setting_one_led_leaves_others_alone() {
        let mut mask = LedMask::default()
            .with(ButtonLed::Button2, LedState::Blink)
            .with(ButtonLed::Rec, LedState::On);
        mask.set(ButtonLed::Button6, LedState::On);
        assert_eq!(mask.state(ButtonLed::Button2), LedState::Blink);
        assert_eq!(mask.state(ButtonLed::Rec), LedState::On);
        assert_eq!(mask.state(ButtonLed::Button6), LedState::On);
        assert_eq!(mask.state(ButtonLed::Button1), LedState::Off);
    }

    #[test]
    fn all_and_none_read_as_off() {
        let mask = LedMask::default().with(ButtonLed::All, LedState::On);
        assert_eq!(mask.bits(), 0x1555);
        assert_eq!(mask.state(ButtonLed::All), LedState::Off);
        assert_eq!(mask.state(ButtonLed::None), LedState::Off);
        for led in ButtonLed::PHYSICAL {
            assert_eq!(mask.state(led), LedState::On);
        }
    }

    #[test]
    fn all_blink_replaces_every_on_bit() {
        let mask = LedMask::default()
            .with(ButtonLed::All, LedState::On)
            .with(ButtonLed::All, LedState::Blink);
        assert_eq!(mask.bits(), 0x2AAA);
    }

    #[test]
    fn none_selector_never_changes_the_mask() {
        let before = LedMask(0x1234);
        for state in [LedState::On, LedState::Blink, LedState::Off] {
            assert_eq!(before.with(ButtonLed::None, state), before);
        }
    }
}
