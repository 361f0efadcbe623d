/// Cumulative CPU time since an arbitrary fixed epoch (usually boot).
///
/// Built fresh on every sample; only meaningful when compared with another
/// snapshot taken from the same running system.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CpuSnapshot {
    pub idle_ticks: u64,
    pub total_ticks: u64,
}

impl CpuSnapshot {
    pub fn new(idle_ticks: u64, total_ticks: u64) -> Self {
        Self {
            idle_ticks,
            total_ticks,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MemoryStatus {
    pub total_bytes: u64,
    pub available_bytes: u64,
    /// When false every other field must be ignored.
    pub valid: bool,
}

impl MemoryStatus {
    /// A reported total of zero means the platform could not size memory, so
    /// the status is invalid whatever `available_bytes` says.
    pub fn new(total_bytes: u64, available_bytes: u64) -> Self {
        if total_bytes == 0 {
            return Self::unavailable();
        }
        Self {
            total_bytes,
            available_bytes,
            valid: true,
        }
    }

    pub fn unavailable() -> Self {
        Self::default()
    }

    pub fn used_bytes(&self) -> u64 {
        self.total_bytes.saturating_sub(self.available_bytes)
    }
}

/// Per-state process counts. Only produced where states are actually read.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TaskStates {
    pub running: usize,
    pub sleeping: usize,
    pub stopped: usize,
    pub zombie: usize,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TaskSummary {
    pub total: usize,
    /// `None` means the breakdown is unknown, not zero.
    pub states: Option<TaskStates>,
    pub valid: bool,
}

impl TaskSummary {
    pub fn new(total: usize, states: Option<TaskStates>) -> Self {
        Self {
            total,
            states,
            valid: true,
        }
    }

    pub fn unavailable() -> Self {
        Self::default()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LoadAverages {
    pub one: f64,
    pub five: f64,
    pub fifteen: f64,
    pub valid: bool,
}

impl LoadAverages {
    pub fn new(one: f64, five: f64, fifteen: f64) -> Self {
        Self {
            one,
            five,
            fifteen,
            valid: true,
        }
    }

    /// Covers both a failed read and a platform with no load average at all.
    pub fn unavailable() -> Self {
        Self::default()
    }
}

/// Everything one refresh tick hands to the renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickReport {
    pub cpu_usage_percent: f64,
    pub memory: MemoryStatus,
    pub tasks: TaskSummary,
    pub load: LoadAverages,
    pub uptime_seconds: u64,
}
