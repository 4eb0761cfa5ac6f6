use crate::core::ConfigProvider;
use crate::utils::error::{Result, SpiralError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Reading profile loaded from a TOML file. Optional sections fall back to
/// the personality defaults (radians, self-plus-buffer with 500 points of
/// headroom, fixed count 2000).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub reading: ReadingConfig,
    pub input: InputConfig,
    pub spiral: Option<SpiralConfig>,
    pub load: LoadConfig,
    pub monitoring: Option<MonitoringConfig>,
    pub environment: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadingConfig {
    pub name: String,
    pub description: Option<String>,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub date: String,
    pub partner_date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpiralConfig {
    pub angle_convention: Option<String>,
    pub sizing_policy: Option<String>,
    pub buffer: Option<usize>,
    pub point_count: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    pub output_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub log_level: Option<String>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SpiralError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SpiralError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR_NAME}` with the environment value; unknown variables
    /// are left in place so validation reports them in context.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    pub fn is_resonance(&self) -> bool {
        self.input.partner_date.is_some()
    }
}

impl ConfigProvider for TomlConfig {
    fn birth_date(&self) -> &str {
        &self.input.date
    }

    fn partner_date(&self) -> Option<&str> {
        self.input.partner_date.as_deref()
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn angle_convention(&self) -> &str {
        self.spiral
            .as_ref()
            .and_then(|s| s.angle_convention.as_deref())
            .unwrap_or("radians")
    }

    fn sizing_policy(&self) -> &str {
        self.spiral
            .as_ref()
            .and_then(|s| s.sizing_policy.as_deref())
            .unwrap_or("self-plus-buffer")
    }

    fn spiral_buffer(&self) -> usize {
        self.spiral
            .as_ref()
            .and_then(|s| s.buffer)
            .unwrap_or(500)
    }

    fn point_count(&self) -> usize {
        self.spiral
            .as_ref()
            .and_then(|s| s.point_count)
            .unwrap_or(2000)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("reading.name", &self.reading.name)?;
        validation::validate_date_string("input.date", &self.input.date)?;
        if let Some(partner) = &self.input.partner_date {
            validation::validate_date_string("input.partner_date", partner)?;
        }
        validation::validate_non_empty_string("load.output_path", &self.load.output_path)?;
        validation::validate_one_of(
            "spiral.angle_convention",
            self.angle_convention(),
            &["radians", "degrees"],
        )?;
        validation::validate_one_of(
            "spiral.sizing_policy",
            self.sizing_policy(),
            &["self-plus-buffer", "fixed"],
        )?;
        validation::validate_positive_number("spiral.buffer", self.spiral_buffer(), 1)?;
        validation::validate_range("spiral.point_count", self.point_count(), 1000, 5000)?;
        Ok(())
    }
}
