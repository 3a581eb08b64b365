//! CLI command implementations.

pub mod common;
pub mod config;
pub mod distance;
pub mod inside;
pub mod polygon;
pub mod replay;
