use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::system::error::SampleResult;
use crate::system::platform::MetricSource;
use crate::system::snapshot::{CpuSnapshot, TickReport};
use crate::system::usage::compute_usage;

/// Refresh-loop state: the injected metric source and the one CPU snapshot
/// carried from tick to tick.
pub struct App {
    pub running: bool,
    source: Box<dyn MetricSource>,
    previous: CpuSnapshot,
    report: Option<TickReport>,
}

impl App {
    /// Takes the baseline CPU sample. Failing here is fatal for the caller.
    pub fn new(source: Box<dyn MetricSource>) -> SampleResult<Self> {
        let previous = source.sample_cpu()?;
        tracing::info!(source = source.name(), "baseline cpu sample taken");
        Ok(App {
            running: true,
            source,
            previous,
            report: None,
        })
    }

    /// Run one tick. A CPU sampling error is returned to the caller and is
    /// fatal; the other metrics carry their own `valid` flag.
    pub fn refresh(&mut self) -> SampleResult<&TickReport> {
        let _refresh_span = tracing::debug_span!("app.refresh").entered();

        let current = self.source.sample_cpu()?;
        let cpu_usage_percent = compute_usage(&self.previous, &current);
        self.previous = current;

        let report = TickReport {
            cpu_usage_percent,
            memory: self.source.sample_memory(),
            tasks: self.source.sample_tasks(),
            load: self.source.sample_load_averages(),
            uptime_seconds: self.source.uptime_seconds(),
        };
        self.log_degradation(&report);
        tracing::debug!(cpu_usage_percent, uptime = report.uptime_seconds, "tick");

        Ok(&*self.report.insert(report))
    }

    /// Latest tick, or `None` before the first one completes.
    pub fn report(&self) -> Option<&TickReport> {
        self.report.as_ref()
    }

    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        let ctrl_c =
            key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl_c || matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
            self.quit();
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    // Warn on the tick a metric goes from valid to invalid, not on every tick.
    fn log_degradation(&self, report: &TickReport) {
        let Some(last) = &self.report else {
            return;
        };
        if last.memory.valid && !report.memory.valid {
            tracing::warn!("memory status became unavailable");
        }
        if last.tasks.valid && !report.tasks.valid {
            tracing::warn!("process enumeration became unavailable");
        }
        if last.load.valid && !report.load.valid {
            tracing::warn!("load averages became unavailable");
        }
    }
}
