pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, toml_config::TomlConfig};
pub use core::{
    pipeline::PersonalityPipeline,
    reading::{ReadingEngine, ReadingOutcome},
    resonance_pipeline::ResonancePipeline,
};
pub use utils::error::{Result, SpiralError};
