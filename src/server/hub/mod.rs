//! Hub module: client registries, periodic snapshots, room directory and
//! the broadcast backpressure policy.

pub mod server;
pub mod messages;
pub mod protocol;
pub mod types;
mod broadcast;
mod rooms;


pub use server::Hub;
