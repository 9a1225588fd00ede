//! Edgecount - node degree query reproduction harness
//!
//! This library crate exposes the harness for the binary and integration tests.

pub mod config;
pub mod scenario;
