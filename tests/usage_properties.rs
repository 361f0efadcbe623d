use proptest::prelude::*;
use toptick::system::snapshot::CpuSnapshot;
use toptick::system::usage::compute_usage;

fn snapshot() -> impl Strategy<Value = CpuSnapshot> {
    (any::<u64>(), any::<u64>()).prop_map(|(idle, total)| CpuSnapshot::new(idle, total))
}

proptest! {
    #[test]
    fn bounded_for_well_formed_intervals(
        base_idle in 0u64..1 << 48,
        base_total in 0u64..1 << 48,
        total_delta in 1u64..1 << 32,
        idle_fraction in 0.0f64..=1.0,
    ) {
        let idle_delta = ((total_delta as f64) * idle_fraction) as u64;
        let previous = CpuSnapshot::new(base_idle, base_total);
        let current = CpuSnapshot::new(base_idle + idle_delta, base_total + total_delta);

        let usage = compute_usage(&previous, &current);
        prop_assert!((0.0..=100.0).contains(&usage), "usage out of range: {}", usage);
    }

    #[test]
    fn same_snapshot_is_zero(s in snapshot()) {
        prop_assert_eq!(compute_usage(&s, &s), 0.0);
    }

    #[test]
    fn non_increasing_total_is_zero(
        previous in snapshot(),
        idle in any::<u64>(),
        back in 0u64..=u64::MAX,
    ) {
        let current = CpuSnapshot::new(idle, previous.total_ticks.saturating_sub(back));
        let usage = compute_usage(&previous, &current);
        prop_assert_eq!(usage, 0.0);
    }

    #[test]
    fn never_nan(previous in snapshot(), current in snapshot()) {
        prop_assert!(!compute_usage(&previous, &current).is_nan());
    }

    #[test]
    fn independent_of_interval_scale(
        total_delta in 1u64..1_000_000,
        idle_fraction in 0.0f64..=1.0,
        scale in 1u64..1_000,
    ) {
        let idle_delta = ((total_delta as f64) * idle_fraction) as u64;
        let origin = CpuSnapshot::new(0, 0);
        let short = compute_usage(&origin, &CpuSnapshot::new(idle_delta, total_delta));
        let long = compute_usage(
            &origin,
            &CpuSnapshot::new(idle_delta * scale, total_delta * scale),
        );
        prop_assert!((short - long).abs() < 1e-9, "{} vs {}", short, long);
    }
}

#[test]
fn worked_examples() {
    let previous = CpuSnapshot::new(100, 200);
    assert_eq!(compute_usage(&previous, &CpuSnapshot::new(150, 300)), 50.0);
    assert_eq!(compute_usage(&previous, &CpuSnapshot::new(100, 200)), 0.0);
}
