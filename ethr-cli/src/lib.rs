pub mod config;
pub mod logging;
pub mod presentation;
pub mod report;
