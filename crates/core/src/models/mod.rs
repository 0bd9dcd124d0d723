//! Data models for CleanSweep

mod housekeeper;
mod ids;
mod message;
mod room;
mod session;

pub use housekeeper::*;
pub use ids::*;
pub use message::*;
pub use room::*;
pub use session::*;
