mod config_content_provider;
mod config_manager;
mod config_serializer;

pub use config_content_provider::{ConfigContentProvider, FileContentConfigProvider};
pub use config_manager::ConfigManager;
pub use config_serializer::{ConfigSerializer, YamlConfigSerializer};

/// Checked before a config is used or stored. The error is shown to the user as is.
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}
