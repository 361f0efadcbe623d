use std::path::PathBuf;
use std::time::SystemTime;

use crate::system::boot_time::HelperCommand;
use crate::system::error::SampleResult;
use crate::system::snapshot::{CpuSnapshot, LoadAverages, MemoryStatus, TaskSummary};

pub mod procfs;
#[cfg(target_os = "windows")]
mod windows;

/// The capability set every platform variant provides.
///
/// Each call produces a fresh snapshot; implementations keep no history.
/// Only CPU sampling can fail outright, everything else degrades through
/// its `valid` flag.
pub trait MetricSource {
    fn name(&self) -> &'static str;
    fn sample_cpu(&self) -> SampleResult<CpuSnapshot>;
    fn sample_memory(&self) -> MemoryStatus;
    fn sample_tasks(&self) -> TaskSummary;
    fn sample_load_averages(&self) -> LoadAverages;
    fn uptime_seconds(&self) -> u64;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UptimeClock {
    /// Monotonic tick counter maintained by the OS.
    #[default]
    Tick,
    /// Wall clock minus a boot timestamp discovered once at startup.
    BootTime,
}

/// Everything a source needs, resolved once at startup.
#[derive(Clone, Debug)]
pub struct SourceContext {
    pub proc_root: PathBuf,
    pub uptime_clock: UptimeClock,
    pub boot_time: Option<SystemTime>,
}

impl Default for SourceContext {
    fn default() -> Self {
        Self {
            proc_root: PathBuf::from("/proc"),
            uptime_clock: UptimeClock::Tick,
            boot_time: None,
        }
    }
}

/// Pick the variant for the host this binary was built for.
#[cfg(target_os = "windows")]
pub fn native_source(ctx: &SourceContext) -> Box<dyn MetricSource> {
    Box::new(windows::CounterApi::new(ctx.uptime_clock, ctx.boot_time))
}

#[cfg(not(target_os = "windows"))]
pub fn native_source(ctx: &SourceContext) -> Box<dyn MetricSource> {
    Box::new(procfs::ProcFs::new(ctx.proc_root.clone()))
}

/// Helper process that prints the boot instant, where the platform needs one.
#[cfg(target_os = "windows")]
pub fn boot_time_query() -> Option<HelperCommand> {
    Some(windows::boot_time_query())
}

#[cfg(not(target_os = "windows"))]
pub fn boot_time_query() -> Option<HelperCommand> {
    None
}

/// Make sure escape sequences are interpreted by the console. Returns false
/// if the console refused.
#[cfg(target_os = "windows")]
pub fn prepare_console() -> bool {
    windows::enable_virtual_terminal()
}

#[cfg(not(target_os = "windows"))]
pub fn prepare_console() -> bool {
    true
}

/// Fill a pid buffer, doubling it while the call fills it completely, since
/// a full buffer may have been truncated. `fill` returns how many slots it
/// wrote, or `None` if the underlying call failed.
pub fn enumerate_growing<F>(initial: usize, mut fill: F) -> Option<usize>
where
    F: FnMut(&mut [u32]) -> Option<usize>,
{
    let mut buffer = vec![0u32; initial.max(1)];
    loop {
        let written = fill(&mut buffer)?;
        if written < buffer.len() {
            return Some(written);
        }
        let grown = buffer.len().checked_mul(2)?;
        buffer.resize(grown, 0);
    }
}
