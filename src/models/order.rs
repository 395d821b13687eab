use super::{null_as_default, ColumnDef, PgQueryAs, Resource};
use crate::repository::Repository;
use crate::state::AppState;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::Arc;

/// Not linked to [`super::Customer`]; the two tables are independent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Order {
    pub id: i64,
    pub name: String,
    pub timestamp: DateTime<Utc>,
}

/// Body of `POST /orders` and `PUT /orders/:id`. Missing or `null` fields bind to zero values;
/// the zero timestamp is `0001-01-01T00:00:00Z`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrder {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default = "zero_time", deserialize_with = "timestamp_or_zero")]
    pub timestamp: DateTime<Utc>,
}

pub(crate) fn zero_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(1, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

fn timestamp_or_zero<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<DateTime<Utc>>::deserialize(deserializer).map(|t| t.unwrap_or_else(zero_time))
}

impl Resource for Order {
    type Input = NewOrder;

    const NAME: &'static str = "Order";
    const PATH: &'static str = "orders";
    const TABLE: &'static str = "orders";
    const COLUMNS: &'static [ColumnDef] = &[
        ColumnDef { name: "name", pg_type: "TEXT" },
        ColumnDef { name: "timestamp", pg_type: "TIMESTAMPTZ" },
    ];

    fn id(&self) -> i64 {
        self.id
    }

    fn from_input(id: i64, input: NewOrder) -> Self {
        Order {
            id,
            name: input.name,
            timestamp: input.timestamp,
        }
    }

    fn bind_input<'q>(input: &NewOrder, query: PgQueryAs<'q, Self>) -> PgQueryAs<'q, Self> {
        query.bind(input.name.clone()).bind(input.timestamp)
    }

    fn repository(state: &AppState) -> &Arc<dyn Repository<Self>> {
        &state.orders
    }
}
