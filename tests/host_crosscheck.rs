//! Compare the live procfs source against `sysinfo` on a real Linux host.
#![cfg(target_os = "linux")]

use std::thread;
use std::time::Duration;

use sysinfo::{ProcessesToUpdate, System, ThreadKind};
use toptick::system::platform::MetricSource;
use toptick::system::platform::procfs::ProcFs;
use toptick::system::usage::compute_usage;

fn host() -> ProcFs {
    ProcFs::new("/proc")
}

#[test]
fn memory_total_matches_sysinfo() {
    let mut sys = System::new();
    sys.refresh_memory();

    let memory = host().sample_memory();
    assert!(memory.valid);
    assert_eq!(memory.total_bytes, sys.total_memory());
    assert!(memory.available_bytes <= memory.total_bytes);
}

#[test]
fn process_count_is_close_to_sysinfo() {
    let mut sys = System::new();
    sys.refresh_processes(ProcessesToUpdate::All, true);
    let theirs = sys
        .processes()
        .values()
        // Kernel threads have their own /proc entry; userland threads do not.
        .filter(|p| !matches!(p.thread_kind(), Some(ThreadKind::Userland)))
        .count();

    let tasks = host().sample_tasks();
    assert!(tasks.valid);
    assert!(tasks.total > 0);
    let slack = (theirs / 4).max(20);
    assert!(
        tasks.total.abs_diff(theirs) <= slack,
        "procfs saw {} processes, sysinfo saw {theirs}",
        tasks.total
    );
}

#[test]
fn uptime_and_load_match_sysinfo() {
    let ours = host().uptime_seconds();
    let theirs = System::uptime();
    assert!(ours.abs_diff(theirs) <= 2, "{ours} vs {theirs}");

    let load = host().sample_load_averages();
    let sys_load = System::load_average();
    assert!(load.valid);
    assert!((load.fifteen - sys_load.fifteen).abs() < 1.0);
}

#[test]
fn live_usage_is_a_percentage() {
    let source = host();
    let previous = source.sample_cpu().unwrap();
    thread::sleep(Duration::from_millis(250));
    let current = source.sample_cpu().unwrap();

    assert!(current.total_ticks >= previous.total_ticks);
    let usage = compute_usage(&previous, &current);
    assert!((0.0..=100.0).contains(&usage), "usage {usage}");
}
