//! Record shapes and the per-resource metadata used by the generic handlers and repository.

mod customer;
mod order;

pub use customer::{Customer, NewCustomer};
pub use order::{NewOrder, Order};

use crate::repository::Repository;
use crate::state::AppState;
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::Postgres;
use std::sync::Arc;

/// Parameterized statement returning `R` rows.
pub type PgQueryAs<'q, R> = sqlx::query::QueryAs<'q, Postgres, R, PgArguments>;

/// A non-key column: name and PostgreSQL type used for table creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: &'static str,
    pub pg_type: &'static str,
}

/// A managed entity type. The primary key is always a `BIGSERIAL` column named `id`.
pub trait Resource:
    Serialize + DeserializeOwned + for<'r> sqlx::FromRow<'r, PgRow> + Clone + Send + Sync + Unpin + 'static
{
    /// Request body shape for create and update: every column except `id`.
    type Input: Serialize + DeserializeOwned + Send + Sync + 'static;

    /// Display name used in response messages ("Customer not found").
    const NAME: &'static str;
    /// Route segment, e.g. `customers` for `/customers/:id`.
    const PATH: &'static str;
    const TABLE: &'static str;
    /// Non-key columns, in bind order.
    const COLUMNS: &'static [ColumnDef];

    fn id(&self) -> i64;

    fn from_input(id: i64, input: Self::Input) -> Self;

    /// Bind `input` fields onto `query` in `COLUMNS` order.
    fn bind_input<'q>(input: &Self::Input, query: PgQueryAs<'q, Self>) -> PgQueryAs<'q, Self>;

    fn repository(state: &AppState) -> &Arc<dyn Repository<Self>>;
}

/// Field deserializer for input shapes: an explicit `null` binds like an absent field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
