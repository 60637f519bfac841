//! # Gazette Core
//!
//! The domain layer of the Gazette publishing backend.
//! This crate contains pure business logic with zero infrastructure
//! dependencies: entities, store ports, and the visibility/access engine.

pub mod domain;
pub mod engine;
pub mod error;
pub mod ports;

pub use engine::Engine;
pub use error::EngineError;
