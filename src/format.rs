use crate::system::snapshot::{LoadAverages, MemoryStatus, TaskSummary, TickReport};

const UNAVAILABLE: &str = "N/A";
/// Stand-in for a per-state task count nobody measured.
const UNKNOWN_COUNT: &str = "?";

/// One row of the summary block: a fixed label followed by the values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SummaryLine {
    pub label: &'static str,
    pub body: String,
}

impl std::fmt::Display for SummaryLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.label, self.body)
    }
}

pub fn summary_lines(report: &TickReport, clock: &str) -> [SummaryLine; 4] {
    [
        SummaryLine {
            label: "top - ",
            body: format!(
                "{clock} up {},  load average: {}",
                format_uptime(report.uptime_seconds),
                format_load(&report.load)
            ),
        },
        SummaryLine {
            label: "Tasks: ",
            body: format_tasks(&report.tasks),
        },
        SummaryLine {
            label: "%Cpu(s): ",
            body: format!(
                "{:.1} us, {:.1} id",
                report.cpu_usage_percent,
                100.0 - report.cpu_usage_percent
            ),
        },
        SummaryLine {
            label: "MiB Mem : ",
            body: format_memory(&report.memory),
        },
    ]
}

/// `42s` under a minute, otherwise `[N day[s], ]HH:MM`.
pub fn format_uptime(seconds: u64) -> String {
    if seconds < 60 {
        return format!("{seconds}s");
    }
    let days = seconds / 86_400;
    let hours = (seconds % 86_400) / 3_600;
    let minutes = (seconds % 3_600) / 60;

    let mut out = String::new();
    if days > 0 {
        let plural = if days > 1 { "s" } else { "" };
        out.push_str(&format!("{days} day{plural}, "));
    }
    out.push_str(&format!("{hours:02}:{minutes:02}"));
    out
}

pub fn format_mib(bytes: u64) -> String {
    format!("{:.1}", bytes as f64 / (1024.0 * 1024.0))
}

pub fn clock_now() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

fn format_load(load: &LoadAverages) -> String {
    if !load.valid {
        return format!("{UNAVAILABLE}, {UNAVAILABLE}, {UNAVAILABLE}");
    }
    format!("{:.2}, {:.2}, {:.2}", load.one, load.five, load.fifteen)
}

fn format_tasks(tasks: &TaskSummary) -> String {
    if !tasks.valid {
        return UNAVAILABLE.to_string();
    }
    let [running, sleeping, stopped, zombie] = match tasks.states {
        Some(states) => [
            states.running,
            states.sleeping,
            states.stopped,
            states.zombie,
        ]
        .map(|n| n.to_string()),
        None => [(); 4].map(|_| UNKNOWN_COUNT.to_string()),
    };
    format!(
        "{} total, {running} running, {sleeping} sleeping, {stopped} stopped, {zombie} zombie",
        tasks.total
    )
}

fn format_memory(memory: &MemoryStatus) -> String {
    if !memory.valid {
        return UNAVAILABLE.to_string();
    }
    format!(
        "{} total, {} used, {} free",
        format_mib(memory.total_bytes),
        format_mib(memory.used_bytes()),
        format_mib(memory.available_bytes)
    )
}
