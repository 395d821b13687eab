//! Shared application state: the persistence context injected into every handler.

use crate::models::{Customer, Order};
use crate::repository::{PgRepository, Repository};
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub customers: Arc<dyn Repository<Customer>>,
    pub orders: Arc<dyn Repository<Order>>,
}

impl AppState {
    /// Both repositories share one pool.
    pub fn postgres(pool: PgPool) -> Self {
        AppState {
            customers: Arc::new(PgRepository::<Customer>::new(pool.clone())),
            orders: Arc::new(PgRepository::<Order>::new(pool)),
        }
    }
}
