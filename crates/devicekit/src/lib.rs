//! # Devicekit
//!
//! Finding and talking to remote devices.
//!
//! - [`DeviceConfig`] parses `device.conf` and resolves `--target` names
//! - [`backend::connect`] opens a [`Device`] for a resolved entry
//! - A [`Device`] is the `StateFetcher` and `Applier` the reconciler uses
//!
//! ```ignore
//! use devicekit::{DeviceConfig, connect};
//!
//! let config = DeviceConfig::load(Path::new("/etc/rigging/device.conf"))?;
//! let entry = config.resolve("the_node")?;
//! let device = connect(entry)?;
//! println!("{:?}", device.facts()?);
//! ```

pub mod backend;
pub mod config;
pub mod error;
pub mod types;

pub use backend::{Device, Facts, JsonFileDevice, MemoryDevice, connect};
pub use config::DeviceConfig;
pub use error::{Error, Result};
pub use types::{DeviceEntry, Endpoint, JSON_FILE, TEST_DEVICE};
