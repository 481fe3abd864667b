//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, it separates command handlers (write) from query handlers (read).
//! `AccessGateway` bundles the handlers into the crate's library surface.

mod gateway;
pub mod handlers;
pub mod services;

pub use gateway::{AccessGateway, GatewaySettings};
