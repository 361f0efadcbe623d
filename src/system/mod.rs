pub mod boot_time;
pub mod error;
pub mod platform;
pub mod snapshot;
pub mod usage;
