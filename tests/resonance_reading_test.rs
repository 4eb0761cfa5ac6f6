use signal_spiral::utils::validation::Validate;
use signal_spiral::{CliConfig, LocalStorage, ReadingEngine, ResonancePipeline};
use tempfile::TempDir;

fn test_config(date: &str, partner_date: &str, output_path: &str) -> CliConfig {
    CliConfig {
        date: date.to_string(),
        partner_date: Some(partner_date.to_string()),
        output_path: output_path.to_string(),
        angle_convention: "radians".to_string(),
        sizing_policy: "fixed".to_string(),
        spiral_buffer: 500,
        point_count: 2000,
        verbose: false,
        monitor: false,
    }
}

#[tokio::test]
async fn test_end_to_end_resonance_reading() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let config = test_config("1990-01-01", "1992-03-04", &output_path);
    config.validate().unwrap();

    let storage = LocalStorage::new(output_path.clone());
    let pipeline = ResonancePipeline::new(storage, config);
    let outcome = ReadingEngine::new(pipeline).run().await.unwrap();

    assert!(outcome.output_path.contains("resonance_reading.zip"));

    let result = &outcome.result;
    assert_eq!(result.params.len(), 2);
    assert!(result.traits.is_none());

    // 1990-01-01: arm = 1990 mod 1 = 0; 1992-03-04: arm = 5976 mod 4 = 0
    let resonance = result.resonance.unwrap();
    assert_eq!(resonance.self_harmonic, 0);
    assert_eq!(resonance.partner_harmonic, 0);
    assert_eq!(resonance.difference, 0);
    assert_eq!(resonance.score, 100);

    // Fixed sizing: exactly the configured count
    assert_eq!(result.spiral.len(), 2000);
    assert!(result.spiral.iter().all(|p| !p.highlighted));
    assert_eq!(result.spiral.iter().filter(|p| p.is_self).count(), 1);

    let full_path = std::path::Path::new(&output_path).join("resonance_reading.zip");
    assert!(full_path.exists());

    let zip_data = std::fs::read(&full_path).unwrap();
    let cursor = std::io::Cursor::new(zip_data);
    let mut archive = zip::ZipArchive::new(cursor).unwrap();

    let summary: serde_json::Value = {
        let mut file = archive.by_name("reading.json").unwrap();
        let mut content = String::new();
        std::io::Read::read_to_string(&mut file, &mut content).unwrap();
        serde_json::from_str(&content).unwrap()
    };
    assert_eq!(summary["reading"], "resonance");
    assert_eq!(summary["resonance"]["score"], 100);
    assert_eq!(summary["spiral"]["point_count"], 2000);
}

#[tokio::test]
async fn test_resonance_score_is_symmetric() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let forward = test_config("1985-07-13", "1991-11-27", &output_path);
    let backward = test_config("1991-11-27", "1985-07-13", &output_path);

    let storage = LocalStorage::new(output_path.clone());
    let a = ReadingEngine::new(ResonancePipeline::new(storage.clone(), forward))
        .run()
        .await
        .unwrap();
    let b = ReadingEngine::new(ResonancePipeline::new(storage, backward))
        .run()
        .await
        .unwrap();

    let ra = a.result.resonance.unwrap();
    let rb = b.result.resonance.unwrap();
    assert_eq!(ra.difference, rb.difference);
    assert_eq!(ra.score, rb.score);
    assert_eq!(ra.self_harmonic, rb.partner_harmonic);
    assert_eq!(ra.partner_harmonic, rb.self_harmonic);
}

#[tokio::test]
async fn test_resonance_requires_partner_date() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let mut config = test_config("1990-01-01", "1992-03-04", &output_path);
    config.partner_date = None;

    let storage = LocalStorage::new(output_path.clone());
    let pipeline = ResonancePipeline::new(storage, config);
    assert!(ReadingEngine::new(pipeline).run().await.is_err());
}
