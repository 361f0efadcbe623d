//! Boot timestamp discovery through an external helper process.
//!
//! The helper is started once at startup, given a hard deadline and killed
//! if it overruns. Any failure simply means the boot time is unknown.

use std::process::Stdio;
use std::time::{Duration, SystemTime};

use chrono::DateTime;
use tokio::process::Command;

use crate::system::error::{SampleError, SampleResult};

/// Program plus arguments for a helper that prints one instant on stdout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HelperCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl HelperCommand {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

/// Run `helper` and parse its first output line as the boot instant.
pub async fn discover(helper: &HelperCommand, timeout: Duration) -> Option<SystemTime> {
    let line = match first_output_line(helper, timeout).await {
        Ok(line) => line,
        Err(err) => {
            tracing::warn!("boot time unavailable: {err}");
            return None;
        }
    };
    let parsed = parse_boot_timestamp(&line);
    if parsed.is_none() {
        tracing::warn!("boot time helper printed an unparsable instant: {line:?}");
    }
    parsed
}

/// Spawn the helper and return the first non-blank stdout line.
///
/// The child is killed when the deadline passes, so a stalled helper can
/// never hold the caller longer than `timeout`.
pub async fn first_output_line(helper: &HelperCommand, timeout: Duration) -> SampleResult<String> {
    let child = Command::new(&helper.program)
        .args(&helper.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| SampleError::helper(&helper.program, e.to_string()))?;

    // Dropping the future on timeout drops the child, which kills it.
    let output = tokio::time::timeout(timeout, child.wait_with_output())
        .await
        .map_err(|_| SampleError::HelperTimeout {
            program: helper.program.clone(),
            timeout,
        })?
        .map_err(|e| SampleError::helper(&helper.program, e.to_string()))?;

    if !output.status.success() {
        return Err(SampleError::helper(
            &helper.program,
            format!("exited with {}", output.status),
        ));
    }

    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_string)
        .ok_or_else(|| SampleError::helper(&helper.program, "printed nothing"))
}

/// Parse an ISO-8601 / RFC 3339 instant such as `2024-03-01T08:15:30.1234567Z`.
pub fn parse_boot_timestamp(raw: &str) -> Option<SystemTime> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(SystemTime::from)
}
