//! Capability-indirection scaffold shared by the pattern modules.
//!
//! - [`Context`]: replace discipline, exactly one active variant
//! - [`Chain`]: chain discipline, ordered links and an explicit unhandled terminal
//! - [`Registry`]: selector that maps a discriminator to a constructed variant

pub mod chain;
pub mod context;
pub mod registry;

pub use chain::{Chain, Dispatch, Flow, Handler};
pub use context::Context;
pub use registry::Registry;
