pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "signal-spiral")]
#[command(about = "Derives signal spiral parameters, Big Five traits and spiral geometry from a date of birth")]
pub struct CliConfig {
    /// Date of birth as YYYY-MM-DD
    #[arg(long)]
    pub date: String,

    /// Partner date of birth; switches to a resonance reading
    #[arg(long)]
    pub partner_date: Option<String>,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    /// Golden angle constant: "radians" (pi*(3-sqrt(5))) or "degrees" (137.5)
    #[arg(long, default_value = "radians")]
    pub angle_convention: String,

    /// Point count sizing: "self-plus-buffer" or "fixed"
    #[arg(long, default_value = "self-plus-buffer")]
    pub sizing_policy: String,

    /// Points generated past the self index under self-plus-buffer sizing
    #[arg(long, default_value = "500")]
    pub spiral_buffer: usize,

    /// Point count under fixed sizing (resonance readings always use this)
    #[arg(long, default_value = "2000")]
    pub point_count: usize,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Enable system monitoring")]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn birth_date(&self) -> &str {
        &self.date
    }

    fn partner_date(&self) -> Option<&str> {
        self.partner_date.as_deref()
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn angle_convention(&self) -> &str {
        &self.angle_convention
    }

    fn sizing_policy(&self) -> &str {
        &self.sizing_policy
    }

    fn spiral_buffer(&self) -> usize {
        self.spiral_buffer
    }

    fn point_count(&self) -> usize {
        self.point_count
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_date_string("date", &self.date)?;
        if let Some(partner) = &self.partner_date {
            validation::validate_date_string("partner_date", partner)?;
        }
        validation::validate_non_empty_string("output_path", &self.output_path)?;
        validation::validate_one_of(
            "angle_convention",
            &self.angle_convention,
            &["radians", "degrees"],
        )?;
        validation::validate_one_of(
            "sizing_policy",
            &self.sizing_policy,
            &["self-plus-buffer", "fixed"],
        )?;
        validation::validate_positive_number("spiral_buffer", self.spiral_buffer, 1)?;
        validation::validate_range("point_count", self.point_count, 1000, 5000)?;
        Ok(())
    }
}
