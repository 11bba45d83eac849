//! Shared utilities for the LinkUp server.

pub mod logger;
pub mod time;
