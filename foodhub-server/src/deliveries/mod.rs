//! Delivery domain
//!
//! [`engine`] owns rider assignment and delivery status transitions, and is
//! the only writer of the append-only `delivery_event` audit trail.

pub mod engine;

pub use engine::DeliveryEngine;
