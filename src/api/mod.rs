//! HTTP API: server, routes and wire types.

pub mod server;
pub mod types;
