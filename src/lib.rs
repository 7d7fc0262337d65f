pub mod api;
pub mod config;
pub mod flow;
pub mod geometry;
pub mod poller;
pub mod render;
pub mod source;
pub mod telemetry;
