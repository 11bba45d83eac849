//! Real-time delivery: room registry and event fan-out.

pub mod fanout;
pub mod registry;

pub use fanout::RoomFanout;
pub use registry::{RoomMember, RoomRegistry};
