//! Domain entities persisted by the repositories.

pub mod entities;

pub use entities::*;
