pub mod config;
pub mod errors;
pub mod job;
pub mod orchestrator;
pub mod review;
pub mod transport;
pub mod ui;
pub mod validate;
