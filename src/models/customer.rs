use super::{null_as_default, ColumnDef, PgQueryAs, Resource};
use crate::repository::Repository;
use crate::state::AppState;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub age: i64,
}

/// Body of `POST /customers` and `PUT /customers/:id`. Missing or `null` fields bind to zero values.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCustomer {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub age: i64,
}

impl Resource for Customer {
    type Input = NewCustomer;

    const NAME: &'static str = "Customer";
    const PATH: &'static str = "customers";
    const TABLE: &'static str = "customers";
    const COLUMNS: &'static [ColumnDef] = &[
        ColumnDef { name: "name", pg_type: "TEXT" },
        ColumnDef { name: "age", pg_type: "BIGINT" },
    ];

    fn id(&self) -> i64 {
        self.id
    }

    fn from_input(id: i64, input: NewCustomer) -> Self {
        Customer {
            id,
            name: input.name,
            age: input.age,
        }
    }

    fn bind_input<'q>(input: &NewCustomer, query: PgQueryAs<'q, Self>) -> PgQueryAs<'q, Self> {
        query.bind(input.name.clone()).bind(input.age)
    }

    fn repository(state: &AppState) -> &Arc<dyn Repository<Self>> {
        &state.customers
    }
}
