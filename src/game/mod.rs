pub mod config;
pub mod error;
pub mod grid;
pub mod hex;
pub mod interaction;
pub mod pathfinding;
pub mod priority_queue;
pub mod range;
pub mod units;

pub use config::*;
pub use error::GridError;
pub use grid::*;
pub use hex::*;
pub use interaction::*;
pub use pathfinding::*;
pub use priority_queue::*;
pub use range::*;
pub use units::*;
