//! Infrastructure layer: persistence, wire formats and real-time delivery.

pub mod dto;
pub mod realtime;
pub mod repository;
