//! Key, token and manifest operations behind the `ethr-cli` command tree.

pub mod application_service;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::SystemError;
