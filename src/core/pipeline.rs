use crate::core::big5::compute_trait_scores;
use crate::core::signal::derive_from_str;
use crate::core::spiral::{generate_personality_spiral, AngleConvention, SizingPolicy};
use crate::core::{ConfigProvider, Pipeline, ReadingResult, SignalParameters, Storage};
use crate::domain::model::SpiralPoint;
use crate::utils::error::{Result, SpiralError};
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

/// Single-date reading: trait scores plus the linear-radius spiral with
/// residue-class highlighting and the self point at index n.
pub struct PersonalityPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> PersonalityPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

pub(crate) fn spiral_to_csv(points: &[SpiralPoint]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for point in points {
        writer.serialize(point)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| SpiralError::ProcessingError {
            message: format!("CSV buffer error: {}", e),
        })?;
    String::from_utf8(bytes).map_err(|e| SpiralError::ProcessingError {
        message: format!("CSV output is not UTF-8: {}", e),
    })
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for PersonalityPipeline<S, C> {
    async fn derive(&self) -> Result<Vec<SignalParameters>> {
        tracing::debug!(
            "Deriving signal parameters for {}",
            self.config.birth_date()
        );
        let params = derive_from_str(self.config.birth_date())?;
        tracing::debug!(
            "n={}, modulus={}, arm={}",
            params.n,
            params.modulus,
            params.arm
        );
        Ok(vec![params])
    }

    async fn compute(&self, params: Vec<SignalParameters>) -> Result<ReadingResult> {
        let own = params
            .first()
            .copied()
            .ok_or_else(|| SpiralError::ProcessingError {
                message: "Personality reading requires one parameter set".to_string(),
            })?;

        let convention = AngleConvention::parse(self.config.angle_convention())?;
        let sizing = SizingPolicy::from_config(
            self.config.sizing_policy(),
            self.config.spiral_buffer(),
            self.config.point_count(),
        )?;
        let point_count = sizing.resolve(own.n)?;

        tracing::debug!(
            "Generating {} spiral points ({} convention)",
            point_count,
            convention.as_str()
        );
        let spiral = generate_personality_spiral(&own, point_count, convention)?;
        let traits = compute_trait_scores(&own)?;

        let spiral_csv = spiral_to_csv(&spiral)?;
        let highlighted = spiral.iter().filter(|p| p.highlighted).count();
        let summary_json = serde_json::to_string_pretty(&serde_json::json!({
            "reading": "personality",
            "date": self.config.birth_date(),
            "signal": own,
            "traits": traits,
            "spiral": {
                "point_count": point_count,
                "angle_convention": convention.as_str(),
                "highlighted_points": highlighted,
                "self_index": own.n,
            },
        }))?;

        Ok(ReadingResult {
            params,
            traits: Some(traits),
            resonance: None,
            spiral,
            spiral_csv,
            summary_json,
        })
    }

    async fn export(&self, result: ReadingResult) -> Result<String> {
        let output_path = format!("{}/personality_reading.zip", self.config.output_path());

        let zip_data = {
            let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

            zip.start_file::<_, ()>("spiral.csv", FileOptions::default())?;
            zip.write_all(result.spiral_csv.as_bytes())?;

            zip.start_file::<_, ()>("reading.json", FileOptions::default())?;
            zip.write_all(result.summary_json.as_bytes())?;

            let cursor = zip.finish()?;
            cursor.into_inner()
        };

        tracing::debug!("Writing bundle ({} bytes) to storage", zip_data.len());
        self.storage
            .write_file("personality_reading.zip", &zip_data)
            .await?;

        Ok(output_path)
    }
}
