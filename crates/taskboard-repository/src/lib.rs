//! # Taskboard Repository
//!
//! Data access for users and tasks:
//!
//! ```text
//! Caller
//!   ↓  Arc<dyn UserRepository> / Arc<dyn TaskRepository>
//! PgUserRepository, PgTaskRepository   (statements + row mapping)
//!   ↓  Arc<dyn SqlStore>
//! DatabasePool                         (PostgreSQL / SQLx)
//!   ↓
//! PostgreSQL
//! ```
//!
//! Every operation is a single statement. Failures are classified as
//! `Validation` (input rejected before the store is touched), `NotFound`
//! (zero matching rows) or `Storage` (everything else).
//!
//! [`InMemoryUserRepository`] and [`InMemoryTaskRepository`] implement the
//! same contracts without a database.

pub mod di;
pub mod memory;
pub mod pool;
pub mod postgres;
pub mod store;
pub mod traits;

pub use di::*;
pub use memory::*;
pub use pool::*;
pub use postgres::*;
pub use store::*;
pub use traits::*;
