//! stratcom — driver for the Microsoft SideWinder Strategic Commander.
//!
//! Decodes the device's HID input reports into [`InputState`] snapshots, turns
//! snapshot pairs into [`InputEvents`], and drives the button LEDs through feature
//! reports. Device access goes through a small [`Transport`] seam with a `hidapi`
//! implementation and an in-memory one for tests.
//!
//! Start with [`Context`] to find and open a device, then use [`Device`].

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod backends;
pub mod button;
pub mod config;
pub mod context;
pub mod device;
pub mod error;
pub mod event;
pub mod led;
pub mod metadata;
pub mod report;
pub mod snapshot;
pub mod transport;

pub use button::*;
pub use config::*;
pub use context::*;
pub use device::*;
pub use error::*;
pub use event::*;
pub use led::*;
pub use metadata::*;
pub use snapshot::*;
pub use transport::*;
