// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod app_dirs;
pub mod capture;
pub mod catalog;
pub mod config;
pub mod export;
pub mod logging;
pub mod practice;
pub mod progress;
pub mod quiz;
pub mod runtime;
pub mod scoring;
pub mod stories;
pub mod storage;
pub mod stroke;
pub mod surface;
