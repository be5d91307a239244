//! HTTP handlers for the event gateway
//!
//! The chat transport adapter POSTs one request per inbound chat event
//! and relays the returned reply payload to the user.

pub mod events;
pub mod health;

pub use events::event_routes;
pub use health::health_routes;
