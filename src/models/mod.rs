//! Models loaded from outside the service: configuration.

pub mod config;
