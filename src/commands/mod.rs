//! Command implementations

pub mod device;
pub mod facts;
pub mod resource;
pub mod types;

use crate::cli::{RunArgs, TargetArgs};
use crate::config::Settings;
use crate::paths;
use anyhow::{Context, Result};
use declarative::{ExecuteOptions, StrictnessLevel};
use devicekit::{Device, DeviceConfig, DeviceEntry};

/// Some resources failed; their errors have already been reported
#[derive(Debug, thiserror::Error)]
#[error("{0} resource(s) failed")]
pub struct RunFailed(pub usize);

/// Device config named by `--deviceconfig`, else the settings default
pub fn device_config(settings: &Settings, args: &TargetArgs) -> Result<DeviceConfig> {
    let path = match &args.deviceconfig {
        Some(path) => paths::expand(path),
        None => settings.device_config_path()?,
    };
    DeviceConfig::load(&path).with_context(|| format!("Could not load {}", path.display()))
}

/// Entry for `--target`, or the local simulated device without one
pub fn device_entry(settings: &Settings, args: &TargetArgs) -> Result<DeviceEntry> {
    match &args.target {
        None => Ok(DeviceEntry::local()),
        Some(target) => {
            let config = device_config(settings, args)?;
            Ok(config.resolve(target)?.clone())
        }
    }
}

/// Resolve and connect to the device the command should talk to
pub fn open_device(settings: &Settings, args: &TargetArgs) -> Result<Box<dyn Device>> {
    let entry = device_entry(settings, args)?;
    let device = devicekit::connect(&entry)
        .with_context(|| format!("Could not connect to {}", entry.name))?;
    Ok(device)
}

/// Strictness from the flag or environment, else the settings file
pub fn strictness(run: &RunArgs, settings: &Settings) -> StrictnessLevel {
    run.strict.map_or_else(|| settings.strict(), StrictnessLevel::from)
}

/// Options for one run; flags win over settings
pub fn execute_options(run: &RunArgs, jobs: Option<usize>, settings: &Settings) -> ExecuteOptions {
    ExecuteOptions {
        strict: strictness(run, settings),
        noop: run.noop || settings.noop,
        jobs: jobs.map_or_else(|| settings.jobs(), |j| j.max(1)),
    }
}
