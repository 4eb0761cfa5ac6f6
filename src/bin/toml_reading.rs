use anyhow::Context;
use clap::Parser;
use signal_spiral::config::toml_config::TomlConfig;
use signal_spiral::core::resonance::compare_resonance;
use signal_spiral::core::signal::derive_from_str;
use signal_spiral::core::spiral::{AngleConvention, SizingPolicy};
use signal_spiral::core::ConfigProvider;
use signal_spiral::utils::{logger, validation::Validate};
use signal_spiral::{LocalStorage, PersonalityPipeline, ReadingEngine, ResonancePipeline};

#[derive(Parser)]
#[command(name = "toml-reading")]
#[command(about = "Signal spiral reading tool driven by a TOML profile")]
struct Args {
    /// Path to TOML profile file
    #[arg(short, long, default_value = "reading.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from the profile
    #[arg(long)]
    monitor: Option<bool>,

    /// Dry run - show what would be computed without exporting
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Starting TOML-based reading tool");
    tracing::info!("📁 Loading profile from: {}", args.config);

    let config = TomlConfig::from_file(&args.config)
        .with_context(|| format!("Failed to load profile '{}'", args.config))?;

    if let Err(e) = config.validate() {
        tracing::error!("❌ Profile validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("✅ Profile loaded and validated successfully");

    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - Nothing will be exported");
        perform_dry_run(&config)?;
        return Ok(());
    }

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());

    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let storage = LocalStorage::new(config.output_path().to_string());
    let is_resonance = config.is_resonance();

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

fn display_config_summary(config: &TomlConfig, args: &Args) {
    println!("📋 Profile Summary:");
    println!(
        "  Reading: {} v{}",
        config.reading.name, config.reading.version
    );
    println!("  Date: {}", config.birth_date());

    if let Some(partner) = config.partner_date() {
        println!("  Partner Date: {}", partner);
        println!("  Mode: resonance");
    } else {
        println!("  Mode: personality");
    }

    println!("  Angle Convention: {}", config.angle_convention());
    println!("  Sizing Policy: {}", config.sizing_policy());
    println!("  Output: {}", config.output_path());

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

fn perform_dry_run(config: &TomlConfig) -> signal_spiral::Result<()> {
    println!("🔍 Dry Run Analysis:");
    println!();

    let convention = AngleConvention::parse(config.angle_convention())?;
    let own = derive_from_str(config.birth_date())?;

    println!("📡 Signal Parameters:");
    println!("  n={}, mod={}, arm={}", own.n, own.modulus, own.arm);

    println!();
    println!("⚙️ Spiral Geometry:");
    if let Some(partner_date) = config.partner_date() {
        let partner = derive_from_str(partner_date)?;
        println!(
            "  Partner: n={}, mod={}, arm={}",
            partner.n, partner.modulus, partner.arm
        );

        let resonance = compare_resonance(&own, &partner);
        println!(
            "  Resonance: difference {}, score {}",
            resonance.difference, resonance.score
        );

        let point_count = SizingPolicy::Fixed {
            count: config.point_count(),
        }
        .resolve(own.arm)?;
        println!(
            "  📊 {} points ({}), harmonic at index {}",
            point_count,
            convention.as_str(),
            own.arm
        );
    } else {
        let sizing = SizingPolicy::from_config(
            config.sizing_policy(),
            config.spiral_buffer(),
            config.point_count(),
        )?;
        let point_count = sizing.resolve(own.n)?;
        println!(
            "  📊 {} points ({}), self at index {}",
            point_count,
            convention.as_str(),
            own.n
        );
    }

    println!();
    println!("💾 Would export spiral.csv + reading.json to: {}", config.output_path());
    println!();
    println!("✅ Dry run analysis complete. Use --verbose for more details during actual run.");

    Ok(())
}
