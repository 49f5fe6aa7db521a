//! Embeddable core library for wfguard.
//!
//! Provides a clap-free entry point for deploy-time config analysis, suitable
//! for linking into a CLI or another host process.
//!
//! # Port traits
//!
//! Config loading is abstracted behind [`ConfigSource`](ports::ConfigSource).
//! The [`adapters`] module provides filesystem and in-memory implementations.
//!
//! # Entry points
//!
//! - [`run_diff`](pipeline::run_diff): diff two configs
//! - [`run_contract`](pipeline::run_contract): generate and compare API contracts
//! - [`run_compat`](pipeline::run_compat): check types against an engine registry
//! - [`run_snapshot`](pipeline::run_snapshot): write a deployment-state snapshot

pub mod adapters;
pub mod config;
pub mod logging;
pub mod pipeline;
pub mod ports;
pub mod settings;

pub use pipeline::{Outcome, ToolError};

// Re-export the registry so embedders don't need wfguard-registry directly.
pub use wfguard_registry::TypeRegistry;
