//! Browser platform layer
//!
//! DOM access lives here so `sim` stays testable natively.

pub mod view;

pub use view::View;
