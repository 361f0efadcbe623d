//! Metric source backed by the `/proc` pseudo-file tree.
//!
//! Parsers are kept free of I/O so they can be exercised against captured
//! file contents.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::MetricSource;
use crate::system::error::{SampleError, SampleResult};
use crate::system::snapshot::{CpuSnapshot, LoadAverages, MemoryStatus, TaskStates, TaskSummary};

/// Counters past this index (guest, guest_nice, and anything newer kernels
/// add) are ignored.
const MAX_CPU_FIELDS: usize = 10;
const MIN_CPU_FIELDS: usize = 5;

pub struct ProcFs {
    root: PathBuf,
}

impl ProcFs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn read(&self, name: &str) -> SampleResult<String> {
        let path = self.root.join(name);
        fs::read_to_string(&path).map_err(|e| SampleError::unreadable(path, e))
    }
}

impl MetricSource for ProcFs {
    fn name(&self) -> &'static str {
        "procfs"
    }

    fn sample_cpu(&self) -> SampleResult<CpuSnapshot> {
        let contents = self.read("stat")?;
        let first_line = contents.lines().next().unwrap_or_default();
        parse_cpu_line(first_line)
    }

    fn sample_memory(&self) -> MemoryStatus {
        match self.read("meminfo") {
            Ok(contents) => parse_meminfo(&contents),
            Err(_) => MemoryStatus::unavailable(),
        }
    }

    fn sample_tasks(&self) -> TaskSummary {
        match fs::read_dir(&self.root) {
            Ok(entries) => tally_tasks(entries.map(|entry| entry.map(|e| e.path()))),
            Err(_) => TaskSummary::unavailable(),
        }
    }

    fn sample_load_averages(&self) -> LoadAverages {
        match self.read("loadavg") {
            Ok(contents) => parse_loadavg(&contents),
            Err(_) => LoadAverages::unavailable(),
        }
    }

    fn uptime_seconds(&self) -> u64 {
        self.read("uptime")
            .ok()
            .and_then(|contents| parse_uptime(&contents))
            .unwrap_or(0)
    }
}

/// Parse the aggregate first line of `/proc/stat`:
/// `cpu  user nice system idle iowait irq softirq steal guest guest_nice`.
///
/// Idle time is `idle + iowait`; total is the sum of every counter read.
pub fn parse_cpu_line(line: &str) -> SampleResult<CpuSnapshot> {
    let mut tokens = line.split_whitespace();
    match tokens.next() {
        Some("cpu") => {}
        other => {
            return Err(SampleError::UnexpectedLabel(
                other.unwrap_or_default().to_string(),
            ));
        }
    }

    // Reading stops at the first token that is not a counter; whatever was
    // read before it still counts.
    let mut values = [0u64; MAX_CPU_FIELDS];
    let mut count = 0;
    for value in tokens
        .take(MAX_CPU_FIELDS)
        .map_while(|token| token.parse::<u64>().ok())
    {
        values[count] = value;
        count += 1;
    }
    if count < MIN_CPU_FIELDS {
        return Err(SampleError::TooFewCounters(count));
    }

    let total_ticks = values[..count]
        .iter()
        .fold(0u64, |acc, v| acc.saturating_add(*v));
    let idle_ticks = values[3].saturating_add(values[4]);
    Ok(CpuSnapshot::new(idle_ticks, total_ticks))
}

/// `MemTotal` and `MemAvailable` are reported in kB. Kernels older than 3.14
/// lack `MemAvailable`, in which case `MemFree` stands in.
pub fn parse_meminfo(contents: &str) -> MemoryStatus {
    let mut total = None;
    let mut available = None;
    let mut free = None;

    for line in contents.lines() {
        let mut parts = line.split_whitespace();
        let (Some(key), Some(value)) = (parts.next(), parts.next()) else {
            continue;
        };
        let Ok(kib) = value.parse::<u64>() else {
            continue;
        };
        let bytes = kib.saturating_mul(1024);
        match key {
            "MemTotal:" => total = Some(bytes),
            "MemAvailable:" => available = Some(bytes),
            "MemFree:" => free = Some(bytes),
            _ => {}
        }
        if total.is_some() && available.is_some() {
            break;
        }
    }

    match total {
        Some(total) => MemoryStatus::new(total, available.or(free).unwrap_or(0)),
        None => MemoryStatus::unavailable(),
    }
}

pub fn parse_loadavg(contents: &str) -> LoadAverages {
    let mut values = contents.split_whitespace().map(str::parse::<f64>);
    match (values.next(), values.next(), values.next()) {
        (Some(Ok(one)), Some(Ok(five)), Some(Ok(fifteen))) => LoadAverages::new(one, five, fifteen),
        _ => LoadAverages::unavailable(),
    }
}

/// First field of `/proc/uptime`, truncated to whole seconds.
pub fn parse_uptime(contents: &str) -> Option<u64> {
    let seconds: f64 = contents.split_whitespace().next()?.parse().ok()?;
    if !seconds.is_finite() || seconds < 0.0 {
        return None;
    }
    Some(seconds as u64)
}

/// State letter from `/proc/<pid>/stat`. The command name may itself contain
/// spaces and parentheses, so the state is read after the last `)`.
pub fn parse_process_state(stat: &str) -> Option<char> {
    let after_comm = stat.rfind(')')? + 1;
    stat[after_comm..].split_whitespace().next()?.chars().next()
}

/// Count pid directories and bucket them by state. A listing that fails
/// partway through makes the whole summary unavailable.
fn tally_tasks<I>(entries: I) -> TaskSummary
where
    I: IntoIterator<Item = io::Result<PathBuf>>,
{
    let mut total = 0;
    let mut states = TaskStates::default();
    for entry in entries {
        let Ok(path) = entry else {
            return TaskSummary::unavailable();
        };
        let is_pid = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(is_pid_dir_name);
        if !is_pid || !path.is_dir() {
            continue;
        }
        total += 1;

        // The process may exit between listing and reading; it still
        // counts towards the total.
        let state = fs::read_to_string(path.join("stat"))
            .ok()
            .and_then(|stat| parse_process_state(&stat));
        match state {
            Some('R') => states.running += 1,
            Some('S' | 'D' | 'I') => states.sleeping += 1,
            Some('T' | 't') => states.stopped += 1,
            Some('Z') => states.zombie += 1,
            _ => {}
        }
    }

    TaskSummary::new(total, Some(states))
}

fn is_pid_dir_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_digit())
}
