#![cfg(unix)]

use std::time::{Duration, Instant, UNIX_EPOCH};

use toptick::system::boot_time::{HelperCommand, discover, first_output_line};
use toptick::system::error::SampleError;

fn sh(script: &str) -> HelperCommand {
    HelperCommand::new("sh", ["-c", script])
}

#[tokio::test]
async fn reads_boot_instant_from_helper() {
    let helper = sh("echo; echo '2024-03-01T08:15:30.1234567Z'");
    let boot = discover(&helper, Duration::from_secs(3)).await.unwrap();
    assert_eq!(boot.duration_since(UNIX_EPOCH).unwrap().as_secs(), 1_709_280_930);
}

#[tokio::test]
async fn stalled_helper_is_cut_off() {
    let helper = sh("sleep 30");
    let started = Instant::now();
    let result = first_output_line(&helper, Duration::from_millis(300)).await;

    assert!(matches!(result, Err(SampleError::HelperTimeout { .. })));
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn stalled_helper_means_unknown_boot_time() {
    let helper = sh("sleep 30");
    assert!(discover(&helper, Duration::from_millis(200)).await.is_none());
}

#[tokio::test]
async fn failing_helper_means_unknown_boot_time() {
    assert!(discover(&sh("exit 3"), Duration::from_secs(2)).await.is_none());
    assert!(discover(&sh("echo not-a-date"), Duration::from_secs(2)).await.is_none());
    assert!(discover(&sh("true"), Duration::from_secs(2)).await.is_none());
}

#[tokio::test]
async fn missing_program_is_a_helper_error() {
    let helper = HelperCommand::new("/definitely/not/a/program", Vec::<String>::new());
    let result = first_output_line(&helper, Duration::from_secs(2)).await;
    assert!(matches!(result, Err(SampleError::Helper { .. })));
}
