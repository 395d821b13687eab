//! CRUD routes for one resource: `/{path}` and `/{path}/:id`.

use crate::handlers::{create, delete, list, read, update};
use crate::models::Resource;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn resource_routes<R: Resource>() -> Router<AppState> {
    let collection = format!("/{}", R::PATH);
    let item = format!("/{}/:id", R::PATH);
    Router::new()
        .route(&collection, get(list::<R>).post(create::<R>))
        .route(&item, get(read::<R>).put(update::<R>).delete(delete::<R>))
}
