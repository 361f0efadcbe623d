//! A `top`-style terminal resource monitor.
//!
//! Platform metric sources live under [`system::platform`]; the usage
//! calculator in [`system::usage`] turns two cumulative CPU snapshots into a
//! percentage, and [`app::App`] carries the previous snapshot between ticks.

pub mod app;
pub mod config;
pub mod event;
pub mod format;
pub mod logging;
pub mod system;
pub mod ui;
