//! Input events.
//!
//! The device only ever reports its full state. [`InputEvents::from_states`] turns
//! two consecutive [`InputState`] snapshots into small deltas ([`InputEvent`]).
//!
//! ## Ordering
//! Events for one pair of snapshots always come out in the same order, whatever
//! changed first on the hardware:
//! 1. slider
//! 2. axis X, axis Y, axis Z
//! 3. buttons, in canonical order (see [`Button::ALL`])
//!
//! Only fields that changed produce an event.
//!
//! ## Allocation
//! Building a list reserves its storage up front with `try_reserve`. If that fails
//! the call returns [`StratcomError::AllocationFailed`](crate::StratcomError::AllocationFailed)
//! and nothing is added; there is never a half-built list.

use crate::button::{Axis, Button, Slider};
use crate::error::Result;
use crate::snapshot::InputState;
use serde::{Deserialize, Serialize};

/// Largest number of events one diff can produce: slider, three axes, every button.
pub const MAX_EVENTS_PER_DIFF: usize = 1 + Axis::ALL.len() + Button::ALL.len();

/// A single input change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputEvent {
    /// The slider moved to `status`.
    Slider { status: Slider },

    /// `axis` now reads `value`.
    Axis { axis: Axis, value: i16 },

    /// `button` was pressed (`pressed == true`) or released.
    Button { button: Button, pressed: bool },
}

/// Owned, ordered list of [`InputEvent`]s.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputEvents(pub Vec<InputEvent>);

impl InputEvents {
    #[inline]
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Events describing the transition from `old` to `new`.
    pub fn from_states(old: &InputState, new: &InputState) -> Result<Self> {
        let mut events = Self::new();
        events.append_from_states(old, new)?;
        Ok(events)
    }

    /// Append the events for `old` → `new` after the current tail and return the
    /// newly added events.
    ///
    /// An empty list is a valid starting point. On error the list is unchanged.
    pub fn append_from_states(
        &mut self,
        old: &InputState,
        new: &InputState,
    ) -> Result<&[InputEvent]> {
        let start = self.0.len();
        self.0.try_reserve(MAX_EVENTS_PER_DIFF)?;

        if old.slider != new.slider {
            self.0.push(InputEvent::Slider { status: new.slider });
        }

        for axis in Axis::ALL {
            let value = new.axis(axis);
            if old.axis(axis) != value {
                self.0.push(InputEvent::Axis { axis, value });
            }
        }

        if old.buttons != new.buttons {
            for button in Button::iter() {
                let pressed = new.is_pressed(button);
                if old.is_pressed(button) != pressed {
                    self.0.push(InputEvent::Button { button, pressed });
                }
            }
        }

        Ok(&self.0[start..])
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, InputEvent> {
        self.0.iter()
    }

    #[inline]
    pub fn as_slice(&self) -> &[InputEvent] {
        &self.0
    }

    /// Consume the list and return the inner vector.
    #[inline]
    pub fn into_inner(self) -> Vec<InputEvent> {
        self.0
    }
}

impl IntoIterator for InputEvents {
    type Item = InputEvent;
    type IntoIter = std::vec::IntoIter<InputEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a InputEvents {
    type Item = &'a InputEvent;
    type IntoIter = std::slice::Iter<'a, InputEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
