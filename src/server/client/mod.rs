//! Client module: one WebSocket session actor per connection.

pub mod liveness;
pub mod session;
