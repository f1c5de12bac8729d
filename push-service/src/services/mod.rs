pub mod delivery;
pub mod dispatch;
pub mod push_service;
pub mod stats;

pub use delivery::*;
pub use dispatch::*;
pub use push_service::*;
pub use stats::*;
