//! Built-in resource types

mod device_provider;
mod notify;

pub use device_provider::DeviceProvider;
pub use notify::Notify;

use declarative::ProviderRegistry;

/// Registry with every built-in type
pub fn registry() -> ProviderRegistry {
    let mut registry = ProviderRegistry::new();
    registry.register(Box::new(DeviceProvider::new()));
    registry.register(Box::new(Notify::new()));
    registry
}
