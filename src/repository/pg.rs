//! `Repository` over PostgreSQL. Statements are parameterized and built once per repository.

use super::Repository;
use crate::error::AppError;
use crate::models::Resource;
use crate::store::quote_ident;
use async_trait::async_trait;
use sqlx::PgPool;
use std::marker::PhantomData;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Statements {
    pub list: String,
    pub find: String,
    pub insert: String,
    pub update: String,
    pub delete: String,
}

impl Statements {
    pub(crate) fn for_resource<R: Resource>() -> Self {
        let table = quote_ident(R::TABLE);
        let id = quote_ident("id");
        let columns: Vec<String> = R::COLUMNS.iter().map(|c| quote_ident(c.name)).collect();
        let returning = std::iter::once(id.clone())
            .chain(columns.iter().cloned())
            .collect::<Vec<_>>()
            .join(", ");
        let placeholders = (1..=columns.len())
            .map(|n| format!("${}", n))
            .collect::<Vec<_>>()
            .join(", ");
        let assignments = columns
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{} = ${}", c, i + 1))
            .collect::<Vec<_>>()
            .join(", ");
        let id_param = columns.len() + 1;

        Statements {
            list: format!("SELECT {} FROM {} ORDER BY {}", returning, table, id),
            find: format!("SELECT {} FROM {} WHERE {} = $1", returning, table, id),
            insert: format!(
                "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
                table,
                columns.join(", "),
                placeholders,
                returning
            ),
            update: format!(
                "UPDATE {} SET {} WHERE {} = ${} RETURNING {}",
                table, assignments, id, id_param, returning
            ),
            delete: format!("DELETE FROM {} WHERE {} = $1 RETURNING {}", table, id, id),
        }
    }
}

pub struct PgRepository<R> {
    pool: PgPool,
    sql: Statements,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> PgRepository<R> {
    pub fn new(pool: PgPool) -> Self {
        PgRepository {
            pool,
            sql: Statements::for_resource::<R>(),
            _resource: PhantomData,
        }
    }
}

#[async_trait]
impl<R: Resource> Repository<R> for PgRepository<R> {
    async fn list(&self) -> Result<Vec<R>, AppError> {
        tracing::debug!(sql = %self.sql.list, "query");
        let rows = sqlx::query_as::<_, R>(&self.sql.list)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find(&self, id: i64) -> Result<Option<R>, AppError> {
        tracing::debug!(sql = %self.sql.find, id, "query");
        let row = sqlx::query_as::<_, R>(&self.sql.find)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert(&self, input: &R::Input) -> Result<R, AppError> {
        tracing::debug!(sql = %self.sql.insert, "query");
        let query = R::bind_input(input, sqlx::query_as::<_, R>(&self.sql.insert));
        let row = query.fetch_one(&self.pool).await?;
        Ok(row)
    }

    async fn update(&self, id: i64, input: &R::Input) -> Result<Option<R>, AppError> {
        tracing::debug!(sql = %self.sql.update, id, "query");
        let query = R::bind_input(input, sqlx::query_as::<_, R>(&self.sql.update)).bind(id);
        let row = query.fetch_optional(&self.pool).await?;
        Ok(row)
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        tracing::debug!(sql = %self.sql.delete, id, "query");
        let deleted: Option<(i64,)> = sqlx::query_as(&self.sql.delete)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(deleted.is_some())
    }
}
