use clap::Parser;
use signal_spiral::utils::{logger, validation::Validate};
use signal_spiral::{
    CliConfig, LocalStorage, PersonalityPipeline, ReadingEngine, ReadingOutcome, ResonancePipeline,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting signal-spiral CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let monitor_enabled = config.monitor;
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let storage = LocalStorage::new(config.output_path.clone());
    let is_resonance = config.partner_date.is_some();

    let run_result = if is_resonance {
        let pipeline = ResonancePipeline::new(storage, config);
        ReadingEngine::new_with_monitoring(pipeline, monitor_enabled)
            .run()
            .await
    } else {
        let pipeline = PersonalityPipeline::new(storage, config);
        ReadingEngine::new_with_monitoring(pipeline, monitor_enabled)
            .run()
            .await
    };

    match run_result {
        Ok(outcome) => {
            tracing::info!("✅ Reading completed successfully!");
            tracing::info!("📁 Output saved to: {}", outcome.output_path);
            println!("✅ Reading completed successfully!");
            print_summary(&outcome);
            println!("📁 Output saved to: {}", outcome.output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Reading failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                signal_spiral::utils::error::ErrorSeverity::Low => 0,
                signal_spiral::utils::error::ErrorSeverity::Medium => 2,
                signal_spiral::utils::error::ErrorSeverity::High => 1,
                signal_spiral::utils::error::ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn print_summary(outcome: &ReadingOutcome) {
    let result = &outcome.result;

    if let Some(params) = result.params.first() {
        println!(
            "Signal Params: n={}, mod={}, arm={}",
            params.n, params.modulus, params.arm
        );
    }

    if let Some(traits) = &result.traits {
        println!("Big Five Traits:");
        for (label, value) in traits.entries() {
            println!("  {}: {}", label, value);
        }
    }

    if let Some(resonance) = &result.resonance {
        println!(
            "Resonance: harmonics {} vs {}, difference {}, score {}",
            resonance.self_harmonic,
            resonance.partner_harmonic,
            resonance.difference,
            resonance.score
        );
    }

    println!("Spiral points: {}", result.spiral.len());
}
