//! Core service: customer and order CRUD over PostgreSQL.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod response;
pub mod routes;
pub mod state;
pub mod store;

pub use config::ServiceConfig;
pub use error::{AppError, ConfigError};
pub use models::{Customer, NewCustomer, NewOrder, Order, Resource};
pub use repository::{PgRepository, Repository};
pub use routes::{app, common_routes, resource_routes};
pub use state::AppState;
pub use store::{connect, ensure_database_exists, ensure_tables};
