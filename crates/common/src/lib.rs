//! Common utilities for pegscope crates.
//!
//! This crate provides shared infrastructure used across the pegscope workspace:
//!
//! - [`debug`] - Per-module logging controlled via `PEGSCOPE_DEBUG` environment variable
//! - [`text`] - Padding, centering and escaping helpers for listings and traces

pub mod debug;
pub mod text;

pub use debug::{create_logger, Logger};
pub use text::{centered, escape, excerpt, lpad, rpad, zpad};
