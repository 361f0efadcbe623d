use std::time::SystemTime;

use windows_sys::Win32::{
    Foundation::{FILETIME, INVALID_HANDLE_VALUE},
    System::{
        Console::{
            CONSOLE_MODE, ENABLE_VIRTUAL_TERMINAL_PROCESSING, GetConsoleMode, GetStdHandle,
            STD_OUTPUT_HANDLE, SetConsoleMode,
        },
        ProcessStatus::EnumProcesses,
        SystemInformation::{GetTickCount64, GlobalMemoryStatusEx, MEMORYSTATUSEX},
        Threading::GetSystemTimes,
    },
};

use super::{MetricSource, UptimeClock, enumerate_growing};
use crate::system::boot_time::HelperCommand;
use crate::system::error::{SampleError, SampleResult};
use crate::system::snapshot::{CpuSnapshot, LoadAverages, MemoryStatus, TaskSummary};

const INITIAL_PID_CAPACITY: usize = 1024;

/// Metric source over the Win32 cumulative counter APIs.
pub struct CounterApi {
    uptime_clock: UptimeClock,
    boot_time: Option<SystemTime>,
}

impl CounterApi {
    pub fn new(uptime_clock: UptimeClock, boot_time: Option<SystemTime>) -> Self {
        Self {
            uptime_clock,
            boot_time,
        }
    }
}

impl MetricSource for CounterApi {
    fn name(&self) -> &'static str {
        "win32"
    }

    fn sample_cpu(&self) -> SampleResult<CpuSnapshot> {
        let mut idle = empty_filetime();
        let mut kernel = empty_filetime();
        let mut user = empty_filetime();
        // All three counters come from one call, so the snapshot is never
        // stitched together from different instants.
        let ok = unsafe { GetSystemTimes(&mut idle, &mut kernel, &mut user) };
        if ok == 0 {
            return Err(SampleError::Os {
                call: "GetSystemTimes",
                source: std::io::Error::last_os_error(),
            });
        }
        // Kernel time already includes idle time.
        let total = filetime_to_u64(kernel).saturating_add(filetime_to_u64(user));
        Ok(CpuSnapshot::new(filetime_to_u64(idle), total))
    }

    fn sample_memory(&self) -> MemoryStatus {
        let mut info = unsafe { std::mem::zeroed::<MEMORYSTATUSEX>() };
        info.dwLength = std::mem::size_of::<MEMORYSTATUSEX>() as u32;
        if unsafe { GlobalMemoryStatusEx(&mut info) } == 0 {
            return MemoryStatus::unavailable();
        }
        MemoryStatus::new(info.ullTotalPhys, info.ullAvailPhys)
    }

    fn sample_tasks(&self) -> TaskSummary {
        let count = enumerate_growing(INITIAL_PID_CAPACITY, |pids| {
            let capacity_bytes = std::mem::size_of_val(pids) as u32;
            let mut returned_bytes = 0u32;
            let ok =
                unsafe { EnumProcesses(pids.as_mut_ptr(), capacity_bytes, &mut returned_bytes) };
            (ok != 0).then(|| returned_bytes as usize / std::mem::size_of::<u32>())
        });
        match count {
            Some(count) => TaskSummary::new(count, None),
            None => TaskSummary::unavailable(),
        }
    }

    fn sample_load_averages(&self) -> LoadAverages {
        // Windows keeps no load average.
        LoadAverages::unavailable()
    }

    fn uptime_seconds(&self) -> u64 {
        match self.uptime_clock {
            UptimeClock::Tick => unsafe { GetTickCount64() } / 1000,
            UptimeClock::BootTime => self
                .boot_time
                .and_then(|boot| SystemTime::now().duration_since(boot).ok())
                .map(|elapsed| elapsed.as_secs())
                .unwrap_or(0),
        }
    }
}

pub fn boot_time_query() -> HelperCommand {
    HelperCommand::new(
        "powershell.exe",
        [
            "-NoProfile",
            "-NonInteractive",
            "-Command",
            "(Get-CimInstance -ClassName Win32_OperatingSystem).LastBootUpTime.ToUniversalTime().ToString('o')",
        ],
    )
}

pub fn enable_virtual_terminal() -> bool {
    unsafe {
        let handle = GetStdHandle(STD_OUTPUT_HANDLE);
        if handle.is_null() || handle == INVALID_HANDLE_VALUE {
            return false;
        }
        let mut mode: CONSOLE_MODE = 0;
        if GetConsoleMode(handle, &mut mode) == 0 {
            return false;
        }
        if mode & ENABLE_VIRTUAL_TERMINAL_PROCESSING != 0 {
            return true;
        }
        SetConsoleMode(handle, mode | ENABLE_VIRTUAL_TERMINAL_PROCESSING) != 0
    }
}

fn empty_filetime() -> FILETIME {
    FILETIME {
        dwLowDateTime: 0,
        dwHighDateTime: 0,
    }
}

fn filetime_to_u64(ft: FILETIME) -> u64 {
    u64::from(ft.dwLowDateTime) | (u64::from(ft.dwHighDateTime) << 32)
}
