pub mod batch;
pub mod config;
pub mod output;
pub mod report;
pub mod telemetry;
