#[cfg(feature = "cli")]
use std::time::Instant;
#[cfg(feature = "cli")]
use sysinfo::{Pid, System};

#[cfg(feature = "cli")]
#[derive(Debug, Clone)]
pub struct PhaseStats {
    pub cpu_usage: f32,
    pub memory_usage_mb: u64,
    pub elapsed_ms: u128,
}

/// Per-phase process stats for `--monitor` runs. Refreshes sysinfo on each
/// call, so it is meant for the handful of pipeline stages, not tight loops.
#[cfg(feature = "cli")]
pub struct SystemMonitor {
    system: System,
    pid: Option<Pid>,
    started: Instant,
    phase_started: Instant,
    enabled: bool,
}

#[cfg(feature = "cli")]
impl SystemMonitor {
    pub fn new(enabled: bool) -> Self {
        let now = Instant::now();
        if !enabled {
            return Self {
                system: System::new(),
                pid: None,
                started: now,
                phase_started: now,
                enabled: false,
            };
        }

        let mut system = System::new();
        system.refresh_all();

        Self {
            system,
            pid: sysinfo::get_current_pid().ok(),
            started: now,
            phase_started: now,
            enabled: true,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn sample(&mut self) -> Option<PhaseStats> {
        if !self.enabled {
            return None;
        }
        self.system.refresh_all();
        let process = self.system.process(self.pid?)?;

        Some(PhaseStats {
            cpu_usage: process.cpu_usage(),
            memory_usage_mb: process.memory() / 1024 / 1024,
            elapsed_ms: self.phase_started.elapsed().as_millis(),
        })
    }

    /// Logs stats for the phase that just finished and starts timing the next.
    pub fn phase_done(&mut self, phase: &str) {
        if let Some(stats) = self.sample() {
            tracing::info!(
                "📊 {} - {}ms, CPU: {:.1}%, Memory: {}MB",
                phase,
                stats.elapsed_ms,
                stats.cpu_usage,
                stats.memory_usage_mb
            );
        }
        self.phase_started = Instant::now();
    }

    pub fn log_summary(&mut self) {
        if !self.enabled {
            return;
        }
        let total_ms = self.started.elapsed().as_millis();
        let memory = self
            .sample()
            .map(|s| s.memory_usage_mb)
            .unwrap_or_default();
        tracing::info!("📊 Total: {}ms, Memory: {}MB", total_ms, memory);
    }
}

// No-op stand-in when built without the CLI feature.
#[cfg(not(feature = "cli"))]
pub struct SystemMonitor;

#[cfg(not(feature = "cli"))]
impl SystemMonitor {
    pub fn new(_enabled: bool) -> Self {
        Self
    }

    pub fn is_enabled(&self) -> bool {
        false
    }

    pub fn phase_done(&mut self, _phase: &str) {}

    pub fn log_summary(&mut self) {}
}
