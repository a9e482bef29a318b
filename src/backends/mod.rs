//! Transport backends for `stratcom`.
//!
//! Implementations of [`Transport`](crate::transport::Transport) and
//! [`Backend`](crate::transport::Backend).
//!
//! # Feature flags
//! - **`hid`** — enables the `hidapi` backend (default in this build).
//!
//! The virtual backend is always available.

#[cfg(feature = "hid")]
#[cfg_attr(docsrs, doc(cfg(feature = "hid")))]
pub mod hid;

pub mod virtual_device;
