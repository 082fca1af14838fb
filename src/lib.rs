//! # Pattern Catalog
//!
//! Classic object-oriented design patterns expressed as small, tested Rust modules.
//!
//! ## Scaffold
//! - `Context` - replace-and-delegate holder for exactly one active variant
//! - `Chain` - ordered handlers with an explicit `Unhandled` terminal
//! - `Registry` - discriminator string to constructed variant
//!
//! ## Creational
//! Singleton, Factory Method, Abstract Factory, Builder, Prototype
//!
//! ## Structural
//! Adapter, Bridge, Composite, Decorator, Facade, Flyweight, Proxy
//!
//! ## Behavioral
//! Chain of Responsibility, Command, Iterator, Mediator, Memento, Observer,
//! State, Strategy, Template Method, Visitor
//!
//! Run the catalogue with: `cargo run --bin catalog -- list`

pub mod behavioral;
pub mod catalog;
pub mod config;
pub mod creational;
pub mod error;
pub mod logging;
pub mod scaffold;
pub mod showcase;
pub mod structural;

pub use catalog::{Category, PatternId};
pub use config::CatalogConfig;
pub use error::{CatalogError, Result};
pub use scaffold::{Chain, Context, Dispatch, Flow, Handler, Registry};
