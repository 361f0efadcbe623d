use super::snapshot::CpuSnapshot;

/// Percentage of non-idle time between two ordered snapshots.
///
/// Purely a ratio of deltas, so any positive spacing between the samples
/// works. A total delta of zero or less (identical snapshots, or a counter
/// that went backwards) yields `0.0` instead of NaN or a negative value.
pub fn compute_usage(previous: &CpuSnapshot, current: &CpuSnapshot) -> f64 {
    let total_delta = i128::from(current.total_ticks) - i128::from(previous.total_ticks);
    if total_delta <= 0 {
        return 0.0;
    }
    let idle_delta = i128::from(current.idle_ticks) - i128::from(previous.idle_ticks);
    let active_delta = total_delta - idle_delta;
    active_delta as f64 * 100.0 / total_delta as f64
}
