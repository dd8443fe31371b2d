//! Configuration loading, runtime wiring and health checks.

pub mod bootstrap;
pub mod config;
pub mod health;
