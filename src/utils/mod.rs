//! Ambient support: configuration, error type, logging and shared utility
//! types.

pub mod app_config;
pub mod error;
pub mod logger;
pub mod types;
