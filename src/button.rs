//! Controls exposed by the Strategic Commander.
//!
//! [`Button`] values are bitmasks over the 12-bit button word of an input report.
//! The canonical iteration order ([`Button::ALL`]) is the order in which the event
//! generator reports button changes.

use crate::led::ButtonLed;
use serde::{Deserialize, Serialize};

/// A logical button, valued as its mask in the input report's button word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u16)]
pub enum Button {
    Button1 = 0x001,
    Button2 = 0x002,
    Button3 = 0x004,
    Button4 = 0x008,
    Button5 = 0x010,
    Button6 = 0x020,
    Plus = 0x040,
    Minus = 0x080,
    Shift1 = 0x100,
    Shift2 = 0x200,
    Shift3 = 0x400,
    Rec = 0x800,
}

/// Mask of every bit in the button word that maps to a [`Button`].
pub const BUTTON_WORD_MASK: u16 = 0x0FFF;

impl Button {
    /// Every button, in canonical order.
    pub const ALL: [Button; 12] = [
        Button::Button1,
        Button::Button2,
        Button::Button3,
        Button::Button4,
        Button::Button5,
        Button::Button6,
        Button::Plus,
        Button::Minus,
        Button::Shift1,
        Button::Shift2,
        Button::Shift3,
        Button::Rec,
    ];

    /// Bitmask of this button in the button word.
    #[inline]
    pub const fn mask(self) -> u16 {
        self as u16
    }

    /// Iterate all buttons in canonical order.
    #[inline]
    pub fn iter() -> impl Iterator<Item = Button> {
        Self::ALL.into_iter()
    }

    /// The button after `self` in canonical order, `None` after [`Button::Rec`].
    pub fn next(self) -> Option<Button> {
        match self {
            Button::Button1 => Some(Button::Button2),
            Button::Button2 => Some(Button::Button3),
            Button::Button3 => Some(Button::Button4),
            Button::Button4 => Some(Button::Button5),
            Button::Button5 => Some(Button::Button6),
            Button::Button6 => Some(Button::Plus),
            Button::Plus => Some(Button::Minus),
            Button::Minus => Some(Button::Shift1),
            Button::Shift1 => Some(Button::Shift2),
            Button::Shift2 => Some(Button::Shift3),
            Button::Shift3 => Some(Button::Rec),
            Button::Rec => None,
        }
    }

    /// LED belonging to this button. Only buttons 1-6 and REC are lit.
    pub fn led(self) -> Option<ButtonLed> {
        match self {
            Button::Button1 => Some(ButtonLed::Button1),
            Button::Button2 => Some(ButtonLed::Button2),
            Button::Button3 => Some(ButtonLed::Button3),
            Button::Button4 => Some(ButtonLed::Button4),
            Button::Button5 => Some(ButtonLed::Button5),
            Button::Button6 => Some(ButtonLed::Button6),
            Button::Rec => Some(ButtonLed::Rec),
            _ => None,
        }
    }

    /// `true` if this button's bit is set in `word`.
    #[inline]
    pub fn is_set_in(self, word: u16) -> bool {
        word & self.mask() != 0
    }
}

/// Position of the three-way slider switch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slider {
    Slider1,
    Slider2,
    /// Also what an all-zero report decodes to.
    #[default]
    Slider3,
}

/// One of the three analog axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_walks_canonical_order() {
        let mut walked = vec![Button::Button1];
        while let Some(b) = walked.last().and_then(|b| b.next()) {
            walked.push(b);
        }
        assert_eq!(walked, Button::ALL.to_vec());
        assert_eq!(Button::iter().count(), 12);
    }

    #[test]
    fn masks_cover_the_button_word_exactly_once() {
        let combined = Button::iter().fold(0u16, |acc, b| {
            assert_eq!(acc & b.mask(), 0, "{b:?} overlaps another button");
            acc | b.mask()
        });
        assert_eq!(combined, BUTTON_WORD_MASK);
    }

    #[test]
    fn only_numbered_buttons_and_rec_have_leds() {
        let lit: Vec<Button> = Button::iter().filter(|b| b.led().is_some()).collect();
        assert_eq!(
            lit,
            vec![
                Button::Button1,
                Button::Button2,
                Button::Button3,
                Button::Button4,
                Button::Button5,
                Button::Button6,
                Button::Rec
            ]
        );
        assert_eq!(Button::Shift2.led(), None);
    }
}
