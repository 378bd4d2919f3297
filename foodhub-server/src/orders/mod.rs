//! Order domain
//!
//! [`engine`] owns every order mutation: checkout creation (snapshot items)
//! and the forward-only status transitions. [`money`] keeps monetary
//! arithmetic in `rust_decimal`.

pub mod engine;
pub mod money;

pub use engine::OrderEngine;
