use crate::core::Pipeline;
use crate::domain::model::ReadingResult;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

/// A completed run: where the bundle landed plus the computed reading for
/// display by the caller.
#[derive(Debug, Clone)]
pub struct ReadingOutcome {
    pub output_path: String,
    pub result: ReadingResult,
}

/// Drives a pipeline through derive, compute and export, with optional
/// per-phase system stats.
pub struct ReadingEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> ReadingEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(mut self) -> Result<ReadingOutcome> {
        tracing::info!("Deriving signal parameters...");
        let params = self.pipeline.derive().await?;
        tracing::info!("Derived {} parameter set(s)", params.len());
        self.monitor.phase_done("Derive");

        tracing::info!("Computing reading...");
        let result = self.pipeline.compute(params).await?;
        tracing::info!("Generated {} spiral points", result.spiral.len());
        self.monitor.phase_done("Compute");

        tracing::info!("Exporting reading...");
        let output_path = self.pipeline.export(result.clone()).await?;
        tracing::info!("Output saved to: {}", output_path);
        self.monitor.phase_done("Export");

        self.monitor.log_summary();
        Ok(ReadingOutcome {
            output_path,
            result,
        })
    }
}
