pub mod auction;
pub mod config;
pub mod error;
pub mod portraits;
pub mod store;
pub mod telemetry;
