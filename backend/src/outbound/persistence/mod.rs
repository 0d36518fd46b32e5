//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the driven repository ports backed by
//! PostgreSQL through `diesel-async` and `bb8` connection pooling.
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types. Validation and not-found policy live in the services.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Strongly typed errors**: Diesel and pool failures map onto each port's
//!   error enum; database text is logged, not forwarded.
//!
//! # Example
//!
//! ```ignore
//! use riverwq::outbound::persistence::{DbPool, DieselRiverRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/rivers")).await?;
//! let rivers = DieselRiverRepository::new(pool);
//! ```

mod diesel_collection_repository;
mod diesel_error_mapping;
mod diesel_parameter_repository;
mod diesel_river_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_collection_repository::DieselCollectionRepository;
pub use diesel_parameter_repository::DieselParameterRepository;
pub use diesel_river_repository::DieselRiverRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
