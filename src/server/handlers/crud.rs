//! Generic CRUD handlers shared by every resource.
//!
//! Routes are registered per resource, e.g. `get(crud::list::<RegionResource>)`.
//! Every failure leaves through [`ApiError`], so both resources answer with the
//! same status codes: 400 for payloads failing validation, 404 for unknown or
//! unparsable keys and 500 for store faults.
//!
//! Mutations hold [`AppState::write_lock`] until their transaction ends.

use axum::{
    body::Bytes,
    extract::{Path, State},
    response::Json,
};
use sea_orm::TransactionTrait;
use tracing::info;

use super::Message;
use crate::errors::{ApiError, ApiResult};
use crate::resources::{CrudResource, ModelOf};
use crate::schemas::RecordSchema;
use crate::server::app::AppState;

fn parse_key<R: CrudResource>(raw: &str) -> ApiResult<R::Key> {
    raw.parse()
        .map_err(|_| ApiError::not_found(R::not_found_message(raw)))
}

pub async fn list<R: CrudResource>(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<ModelOf<R>>>> {
    let records = R::find_all(&state.db).await?;
    Ok(Json(records))
}

pub async fn get_one<R: CrudResource>(
    State(state): State<AppState>,
    Path(raw_key): Path<String>,
) -> ApiResult<Json<ModelOf<R>>> {
    let key = parse_key::<R>(&raw_key)?;
    let record = R::find_one(&state.db, &key)
        .await?
        .ok_or_else(|| ApiError::not_found(R::not_found_message(&raw_key)))?;

    Ok(Json(record))
}

pub async fn create<R: CrudResource>(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<Message>> {
    let record = <R::Schema as RecordSchema>::load_json(&body)
        .map_err(|err| ApiError::validation(R::NAME, err))?;

    let _guard = state.write_lock.lock().await;
    let txn = state.db.begin().await?;
    let created = R::insert(&txn, record).await?;
    txn.commit().await?;

    let message = R::created_message(&created);
    info!("{}", message);
    Ok(Json(Message::new(message)))
}

/// Fetches the current row, merges the supplied fields and writes the result
/// in the same transaction. Concurrent updates of one row are applied in
/// turn, so the last one to take the write lock wins.
pub async fn update<R: CrudResource>(
    State(state): State<AppState>,
    Path(raw_key): Path<String>,
    body: Bytes,
) -> ApiResult<Json<Message>> {
    let key = parse_key::<R>(&raw_key)?;

    let _guard = state.write_lock.lock().await;
    let txn = state.db.begin().await?;
    let existing = R::find_one(&txn, &key)
        .await?
        .ok_or_else(|| ApiError::not_found(R::not_found_message(&raw_key)))?;

    let merged = <R::Schema as RecordSchema>::load_partial_json(existing, &body)
        .map_err(|err| ApiError::validation(R::NAME, err))?;
    R::save(&txn, merged).await?;
    txn.commit().await?;

    let message = R::updated_message(&key);
    info!("{}", message);
    Ok(Json(Message::new(message)))
}

pub async fn delete<R: CrudResource>(
    State(state): State<AppState>,
    Path(raw_key): Path<String>,
) -> ApiResult<Json<Message>> {
    let key = parse_key::<R>(&raw_key)?;

    let _guard = state.write_lock.lock().await;
    let txn = state.db.begin().await?;
    let existing = R::find_one(&txn, &key)
        .await?
        .ok_or_else(|| ApiError::not_found(R::not_found_message(&raw_key)))?;
    R::remove(&txn, existing).await?;
    txn.commit().await?;

    let message = R::deleted_message(&key);
    info!("{}", message);
    Ok(Json(Message::new(message)))
}
