#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use core_service::{app, AppError, AppState, Customer, Order, Repository, Resource};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// In-memory stand-in for the Postgres repository, with serial ids starting at 1.
pub struct MemoryRepository<R> {
    rows: Mutex<(i64, BTreeMap<i64, R>)>,
}

impl<R> Default for MemoryRepository<R> {
    fn default() -> Self {
        MemoryRepository {
            rows: Mutex::new((0, BTreeMap::new())),
        }
    }
}

impl<R: Resource> MemoryRepository<R> {
    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().1.len()
    }
}

#[async_trait]
impl<R: Resource> Repository<R> for MemoryRepository<R> {
    async fn list(&self) -> Result<Vec<R>, AppError> {
        Ok(self.rows.lock().unwrap().1.values().cloned().collect())
    }

    async fn find(&self, id: i64) -> Result<Option<R>, AppError> {
        Ok(self.rows.lock().unwrap().1.get(&id).cloned())
    }

    async fn insert(&self, input: &R::Input) -> Result<R, AppError> {
        let input = clone_input::<R>(input);
        let mut guard = self.rows.lock().unwrap();
        guard.0 += 1;
        let row = R::from_input(guard.0, input);
        guard.1.insert(row.id(), row.clone());
        Ok(row)
    }

    async fn update(&self, id: i64, input: &R::Input) -> Result<Option<R>, AppError> {
        let input = clone_input::<R>(input);
        let mut guard = self.rows.lock().unwrap();
        match guard.1.get_mut(&id) {
            Some(slot) => {
                *slot = R::from_input(id, input);
                Ok(Some(slot.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.rows.lock().unwrap().1.remove(&id).is_some())
    }
}

fn clone_input<R: Resource>(input: &R::Input) -> R::Input {
    serde_json::from_value(serde_json::to_value(input).unwrap()).unwrap()
}

/// Repository whose every call fails, for checking that write errors become 500s.
pub struct FailingRepository;

#[async_trait]
impl<R: Resource> Repository<R> for FailingRepository {
    async fn list(&self) -> Result<Vec<R>, AppError> {
        Err(AppError::Db(sqlx::Error::PoolTimedOut))
    }

    async fn find(&self, _id: i64) -> Result<Option<R>, AppError> {
        Err(AppError::Db(sqlx::Error::PoolTimedOut))
    }

    async fn insert(&self, _input: &R::Input) -> Result<R, AppError> {
        Err(AppError::Db(sqlx::Error::PoolTimedOut))
    }

    async fn update(&self, _id: i64, _input: &R::Input) -> Result<Option<R>, AppError> {
        Err(AppError::Db(sqlx::Error::PoolTimedOut))
    }

    async fn delete(&self, _id: i64) -> Result<bool, AppError> {
        Err(AppError::Db(sqlx::Error::PoolTimedOut))
    }
}

pub struct TestApp {
    pub router: Router,
    pub customers: Arc<MemoryRepository<Customer>>,
    pub orders: Arc<MemoryRepository<Order>>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_body_limit(1024 * 1024)
    }

    pub fn with_body_limit(body_limit_bytes: usize) -> Self {
        let customers = Arc::new(MemoryRepository::<Customer>::default());
        let orders = Arc::new(MemoryRepository::<Order>::default());
        let state = AppState {
            customers: customers.clone(),
            orders: orders.clone(),
        };
        TestApp {
            router: app(state, body_limit_bytes),
            customers,
            orders,
        }
    }

    pub async fn send(&self, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
        send(&self.router, method, uri, body).await
    }
}

pub fn failing_app() -> Router {
    let state = AppState {
        customers: Arc::new(FailingRepository),
        orders: Arc::new(FailingRepository),
    };
    app(state, 1024 * 1024)
}

pub async fn send(router: &Router, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(b) => {
            builder = builder.header("content-type", "application/json");
            Body::from(b.to_owned())
        }
        None => Body::empty(),
    };
    let response = router
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}
