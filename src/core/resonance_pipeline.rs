use crate::core::pipeline::spiral_to_csv;
use crate::core::resonance::compare_resonance;
use crate::core::signal::derive_from_str;
use crate::core::spiral::{generate_resonance_spiral, AngleConvention, SizingPolicy};
use crate::core::{ConfigProvider, Pipeline, ReadingResult, SignalParameters, Storage};
use crate::utils::error::{Result, SpiralError};
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

/// Two-date reading: harmonic comparison plus the square-root-radius spiral
/// with a single marked harmonic point. Always sized with a fixed count.
pub struct ResonancePipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> ResonancePipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for ResonancePipeline<S, C> {
    async fn derive(&self) -> Result<Vec<SignalParameters>> {
        let partner_date =
            self.config
                .partner_date()
                .ok_or_else(|| SpiralError::MissingConfigError {
                    field: "partner_date".to_string(),
                })?;

        tracing::debug!(
            "Deriving signal parameters for {} and {}",
            self.config.birth_date(),
            partner_date
        );
        let own = derive_from_str(self.config.birth_date())?;
        let partner = derive_from_str(partner_date)?;
        Ok(vec![own, partner])
    }

    async fn compute(&self, params: Vec<SignalParameters>) -> Result<ReadingResult> {
        if params.len() != 2 {
            return Err(SpiralError::ProcessingError {
                message: format!(
                    "Resonance reading requires two parameter sets, got {}",
                    params.len()
                ),
            });
        }
        let own = params[0];
        let partner = params[1];

        let resonance = compare_resonance(&own, &partner);
        tracing::debug!(
            "Harmonics {} vs {}: difference {}, score {}",
            resonance.self_harmonic,
            resonance.partner_harmonic,
            resonance.difference,
            resonance.score
        );

        let convention = AngleConvention::parse(self.config.angle_convention())?;
        let sizing = SizingPolicy::Fixed {
            count: self.config.point_count(),
        };
        let point_count = sizing.resolve(own.arm)?;
        let spiral = generate_resonance_spiral(&own, point_count, convention)?;

        let spiral_csv = spiral_to_csv(&spiral)?;
        let summary_json = serde_json::to_string_pretty(&serde_json::json!({
            "reading": "resonance",
            "date": self.config.birth_date(),
            "partner_date": self.config.partner_date(),
            "signal": own,
            "partner_signal": partner,
            "resonance": resonance,
            "spiral": {
                "point_count": point_count,
                "angle_convention": convention.as_str(),
                "harmonic_index": own.arm,
            },
        }))?;

        Ok(ReadingResult {
            params,
            traits: None,
            resonance: Some(resonance),
            spiral,
            spiral_csv,
            summary_json,
        })
    }

    async fn export(&self, result: ReadingResult) -> Result<String> {
        let output_path = format!("{}/resonance_reading.zip", self.config.output_path());

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
            .write_file("resonance_reading.zip", &zip_data)
            .await?;

        Ok(output_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                SpiralError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        birth_date: String,
        partner_date: Option<String>,
        point_count: usize,
    }

    impl MockConfig {
        fn new(birth_date: &str, partner_date: &str) -> Self {
            Self {
                birth_date: birth_date.to_string(),
                partner_date: Some(partner_date.to_string()),
                point_count: 2000,
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn birth_date(&self) -> &str {
            &self.birth_date
        }

        fn partner_date(&self) -> Option<&str> {
            self.partner_date.as_deref()
        }

        fn output_path(&self) -> &str {
            "test_output"
        }

        fn angle_convention(&self) -> &str {
            "radians"
        }

        fn sizing_policy(&self) -> &str {
            "fixed"
        }

        fn spiral_buffer(&self) -> usize {
            500
        }

        fn point_count(&self) -> usize {
            self.point_count
        }
    }

    #[tokio::test]
    async fn test_derive_both_dates() {
        let pipeline = ResonancePipeline::new(
            MockStorage::new(),
            MockConfig::new("1990-01-01", "1992-03-04"),
        );
        let params = pipeline.derive().await.unwrap();
        assert_eq!(params.len(), 2);
        assert_eq!(params[0].n, 1990);
        assert_eq!(params[1].n, 1992 * 3);
        assert_eq!(params[1].modulus, 4);
    }

    #[tokio::test]
    async fn test_derive_requires_partner_date() {
        let mut config = MockConfig::new("1990-01-01", "1992-03-04");
        config.partner_date = None;
        let pipeline = ResonancePipeline::new(MockStorage::new(), config);
        let err = pipeline.derive().await.unwrap_err();
        assert!(matches!(err, SpiralError::MissingConfigError { .. }));
    }

    #[tokio::test]
    async fn test_compute_builds_resonance_reading() {
        let pipeline = ResonancePipeline::new(
            MockStorage::new(),
            MockConfig::new("1990-01-01", "1992-03-04"),
        );
        let params = pipeline.derive().await.unwrap();
        let result = pipeline.compute(params.clone()).await.unwrap();

        let resonance = result.resonance.unwrap();
        assert_eq!(resonance.self_harmonic, params[0].arm);
        assert_eq!(resonance.partner_harmonic, params[1].arm);
        assert_eq!(
            resonance.difference,
            (params[0].arm - params[1].arm).abs()
        );
        assert_eq!(
            resonance.score,
            (100 - resonance.difference * 5).max(0)
        );

        assert!(result.traits.is_none());
        assert_eq!(result.spiral.len(), 2000);
        assert!(result.spiral.iter().all(|p| !p.highlighted));
        assert_eq!(result.spiral.iter().filter(|p| p.is_self).count(), 1);

        let summary: serde_json::Value = serde_json::from_str(&result.summary_json).unwrap();
        assert_eq!(summary["reading"], "resonance");
        assert_eq!(summary["resonance"]["score"], resonance.score);
    }

    #[tokio::test]
    async fn test_compute_rejects_wrong_arity() {
        let pipeline = ResonancePipeline::new(
            MockStorage::new(),
            MockConfig::new("1990-01-01", "1992-03-04"),
        );
        let one = vec![SignalParameters {
            n: 1990,
            modulus: 1,
            arm: 0,
        }];
        let err = pipeline.compute(one).await.unwrap_err();
        assert!(matches!(err, SpiralError::ProcessingError { .. }));
    }

    #[tokio::test]
    async fn test_export_writes_zip_bundle() {
        let storage = MockStorage::new();
        let pipeline = ResonancePipeline::new(
            storage.clone(),
            MockConfig::new("1990-01-01", "1992-03-04"),
        );
        let params = pipeline.derive().await.unwrap();
        let result = pipeline.compute(params).await.unwrap();

        let output_path = pipeline.export(result).await.unwrap();
        assert_eq!(output_path, "test_output/resonance_reading.zip");

        let zip_bytes = storage.get_file("resonance_reading.zip").await.unwrap();
        let cursor = std::io::Cursor::new(zip_bytes);
        let mut archive = zip::ZipArchive::new(cursor).unwrap();

        let mut file_names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        file_names.sort();
        assert_eq!(file_names, vec!["reading.json", "spiral.csv"]);
    }
}
