//! Process-wide entry point.
//!
//! [`Context`] owns the transport [`Backend`] (for hidapi: the library's global
//! state) and opens [`Device`]s. Create one per process before opening devices and
//! drop it (or call [`Context::shutdown`]) after the last device is closed. It is not
//! reference-counted; if several parts of a program need devices, share one
//! `Context` between them.
//!
//! ```no_run
//! # #[cfg(feature = "hid")]
//! # fn main() -> stratcom::Result<()> {
//! use stratcom::{ButtonLed, Context, LedState};
//!
//! let mut ctx = Context::init()?;
//! let mut device = ctx.open_device()?;
//! device.set_button_led_state(ButtonLed::All, LedState::Blink)?;
//! device.close();
//! ctx.shutdown();
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "hid"))]
//! # fn main() {}
//! ```

use crate::config::{Config, PRODUCT_ID, VENDOR_ID};
use crate::device::Device;
use crate::error::{Result, StratcomError};
use crate::metadata::DeviceMeta;
use crate::transport::Backend;
use tracing::debug;

#[cfg(feature = "hid")]
use crate::backends::hid::HidBackend;

pub struct Context<B: Backend> {
    backend: B,
    config: Config,
}

#[cfg(feature = "hid")]
#[cfg_attr(docsrs, doc(cfg(feature = "hid")))]
impl Context<HidBackend> {
    /// Initialise hidapi with the default [`Config`].
    pub fn init() -> Result<Self> {
        Self::init_with_config(Config::default())
    }

    pub fn init_with_config(config: Config) -> Result<Self> {
        Ok(Self::with_backend(HidBackend::new()?, config))
    }
}

impl<B: Backend> Context<B> {
    pub fn with_backend(backend: B, config: Config) -> Self {
        debug!("context up for {:04x}:{:04x}", VENDOR_ID, PRODUCT_ID);
        Self { backend, config }
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[inline]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// All connected Strategic Commanders.
    pub fn enumerate(&mut self) -> Result<Vec<DeviceMeta>> {
        self.backend.enumerate(VENDOR_ID, PRODUCT_ID)
    }

    /// Open the configured `device_path`, or else the first enumerated device.
    pub fn open_device(&mut self) -> Result<Device<B::Transport>> {
        if let Some(path) = self.config.device_path.clone() {
            return self.open_device_on_path(&path);
        }
        let first = self
            .enumerate()?
            .into_iter()
            .next()
            .ok_or(StratcomError::DeviceNotFound {
                vendor_id: VENDOR_ID,
                product_id: PRODUCT_ID,
            })?;
        self.open_device_on_path(&first.path)
    }

    /// Open the device at `path`, syncing LED state if the config asks for it.
    pub fn open_device_on_path(&self, path: &str) -> Result<Device<B::Transport>> {
        let transport = self.backend.open_path(path)?;
        debug!(path, "device opened");
        Ok(if self.config.sync_on_open {
            Device::open(transport)
        } else {
            Device::new(transport)
        })
    }

    /// Release the backend. Devices should be closed first.
    pub fn shutdown(self) {
        debug!("context shut down");
    }
}
