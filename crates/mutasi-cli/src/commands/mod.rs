//! CLI command implementations.

pub mod banks;
pub mod batch;
pub mod config;
pub mod convert;

use std::path::Path;

use mutasi_core::ConvertConfig;

/// Load the conversion config from an explicit path, or defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<ConvertConfig> {
    match config_path {
        Some(path) => Ok(ConvertConfig::from_file(Path::new(path))?),
        None => Ok(ConvertConfig::default()),
    }
}
