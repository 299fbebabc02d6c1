//! # Taskboard Core
//!
//! Core types, entities, and error definitions shared by the Taskboard
//! data-access crates: typed identifiers, the `User` and `Task` domain
//! records, the unified error type, and tracing setup.

pub mod domain;
pub mod error;
pub mod id;
pub mod result;
pub mod telemetry;
pub mod validation;

pub use domain::*;
pub use error::*;
pub use id::*;
pub use result::*;
pub use telemetry::*;
pub use validation::*;

// Re-export shaku for dependency injection
pub use shaku::Interface;
