//! Input state snapshot.
//!
//! [`InputState`] is an **owned**, `Copy` view of the device controls as decoded from
//! one input report. [`Device`](crate::device::Device) keeps the last one it read;
//! every query hands out a copy, so holding on to an old snapshot and diffing it
//! against a newer one with [`InputEvents::from_states`](crate::event::InputEvents::from_states)
//! is the intended way to turn polling into events.
//!
//! # Value conventions
//! - `buttons`: bit per [`Button`], see [`Button::mask`].
//! - `axis_*`: signed 10-bit values in `[AXIS_MIN, AXIS_MAX]`.

use crate::button::{Axis, Button, Slider};
use serde::{Deserialize, Serialize};

/// Smallest value an axis reports.
pub const AXIS_MIN: i16 = -512;
/// Largest value an axis reports.
pub const AXIS_MAX: i16 = 511;

/// Decoded state of every input control.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InputState {
    /// Pressed buttons, one bit per [`Button`].
    pub buttons: u16,
    pub slider: Slider,
    pub axis_x: i16,
    pub axis_y: i16,
    pub axis_z: i16,
}

impl InputState {
    #[inline]
    pub fn is_pressed(&self, button: Button) -> bool {
        button.is_set_in(self.buttons)
    }

    #[inline]
    pub fn axis(&self, axis: Axis) -> i16 {
        match axis {
            Axis::X => self.axis_x,
            Axis::Y => self.axis_y,
            Axis::Z => self.axis_z,
        }
    }

    /// Iterate the buttons currently held, in canonical order.
    pub fn pressed(&self) -> impl Iterator<Item = Button> + '_ {
        Button::iter().filter(move |b| self.is_pressed(*b))
    }

    /// Set or clear one button. Mostly useful for building test traffic.
    pub fn set_pressed(&mut self, button: Button, pressed: bool) {
        if pressed {
            self.buttons |= button.mask();
        } else {
            self.buttons &= !button.mask();
        }
    }

    /// Set one axis, clamping to the device range.
    pub fn set_axis(&mut self, axis: Axis, value: i16) {
        let value = value.clamp(AXIS_MIN, AXIS_MAX);
        match axis {
            Axis::X => self.axis_x = value,
            Axis::Y => self.axis_y = value,
            Axis::Z => self.axis_z = value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_centered_with_slider3() {
        let s = InputState::default();
        assert_eq!(s.buttons, 0);
        assert_eq!(s.slider, Slider::Slider3);
        for axis in Axis::ALL {
            assert_eq!(s.axis(axis), 0);
        }
    }

    #[test]
    fn pressed_lists_held_buttons_in_order() {
        let mut s = InputState::default();
        s.set_pressed(Button::Rec, true);
        s.set_pressed(Button::Button2, true);
        s.set_pressed(Button::Shift1, true);
        assert_eq!(
            s.pressed().collect::<Vec<_>>(),
            vec![Button::Button2, Button::Shift1, Button::Rec]
        );
        s.set_pressed(Button::Shift1, false);
        assert!(!s.is_pressed(Button::Shift1));
    }

    #[test]
    fn set_axis_clamps() {
        let mut s = InputState::default();
        s.set_axis(Axis::Y, 1000);
        s.set_axis(Axis::Z, -1000);
        assert_eq!(s.axis_y, AXIS_MAX);
        assert_eq!(s.axis_z, AXIS_MIN);
    }
}
