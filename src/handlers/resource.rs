//! Resource CRUD handlers: list, read, create, update, delete.
//! Each is generic over [`Resource`] and routed as e.g. `list::<Customer>`.

use crate::error::AppError;
use crate::extractors::{parse_body, BodyBytes, JsonBody};
use crate::models::Resource;
use crate::response;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use serde_json::Value;

/// Path ids that are not integers cannot match a row, so they are reported as not found.
fn parse_id<R: Resource>(id_str: &str) -> Result<i64, AppError> {
    id_str.trim().parse().map_err(|_| AppError::NotFound(R::NAME))
}

/// Overlay the keys of `body` onto the stored record and bind the result to the input shape.
/// `id` in the body is ignored; the path id is authoritative. `null` values keep the stored value.
fn merge_into_input<R: Resource>(current: &R, body: Value) -> Result<R::Input, AppError> {
    let Value::Object(patch) = body else {
        return Err(AppError::BadRequest("body must be a JSON object".into()));
    };
    let mut merged = match serde_json::to_value(current) {
        Ok(Value::Object(m)) => m,
        Ok(_) => serde_json::Map::new(),
        Err(e) => return Err(AppError::BadRequest(e.to_string())),
    };
    for (k, v) in patch {
        if k != "id" && !v.is_null() {
            merged.insert(k, v);
        }
    }
    serde_json::from_value(Value::Object(merged)).map_err(|e| AppError::BadRequest(e.to_string()))
}

pub async fn list<R: Resource>(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let rows = R::repository(&state).list().await?;
    Ok(response::ok(rows))
}

pub async fn read<R: Resource>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id::<R>(&id)?;
    let row = R::repository(&state)
        .find(id)
        .await?
        .ok_or(AppError::NotFound(R::NAME))?;
    Ok(response::ok(row))
}

pub async fn create<R: Resource>(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<R::Input>,
) -> Result<impl IntoResponse, AppError> {
    let row = R::repository(&state).insert(&input).await?;
    tracing::info!(resource = R::NAME, id = row.id(), "created");
    Ok(response::created(row))
}

/// The body is only decoded after the record is found, so a missing id wins over a bad body.
pub async fn update<R: Resource>(
    State(state): State<AppState>,
    Path(id): Path<String>,
    BodyBytes(body): BodyBytes,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id::<R>(&id)?;
    let repo = R::repository(&state);
    let current = repo.find(id).await?.ok_or(AppError::NotFound(R::NAME))?;
    let patch: Value = parse_body(&body)?;
    let input = merge_into_input(&current, patch)?;
    // Row may have been deleted between the lookup and the write.
    let row = repo
        .update(id, &input)
        .await?
        .ok_or(AppError::NotFound(R::NAME))?;
    tracing::info!(resource = R::NAME, id, "updated");
    Ok(response::ok(row))
}

pub async fn delete<R: Resource>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id::<R>(&id)?;
    if !R::repository(&state).delete(id).await? {
        return Err(AppError::NotFound(R::NAME));
    }
    tracing::info!(resource = R::NAME, id, "deleted");
    Ok(response::message(format!("{} deleted", R::NAME)))
}
