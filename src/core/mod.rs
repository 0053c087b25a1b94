pub mod attendance;
pub mod calculator;
pub mod clock;
pub mod config;
pub mod log;
pub mod status;
pub mod workers;
