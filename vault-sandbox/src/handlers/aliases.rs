//! Aliases endpoints backed by the in-memory vault.

use axum::{extract::State, http::StatusCode};
use serde::Deserialize;
use std::collections::HashMap;
use vault_core::aliases::{
    AliasRecord, AliasRequest, AliasUpdate, AliasesApi, DataEnvelope,
};
use vault_core::VaultError;

use crate::error::ApiError;
use crate::extract::{Json, Path, Query};
use crate::startup::AppState;

#[derive(Debug, Deserialize)]
pub struct RevealManyQuery {
    /// Comma-separated aliases.
    pub q: String,
}

/// `POST /aliases`: store a batch of values.
pub async fn redact(
    State(state): State<AppState>,
    Json(payload): Json<DataEnvelope<Vec<AliasRequest>>>,
) -> Result<Json<DataEnvelope<Vec<AliasRecord>>>, ApiError> {
    let records = state.vault.redact(&payload.data).await?;

    tracing::info!(count = records.len(), "Redacted values");
    Ok(Json(DataEnvelope::new(records)))
}

/// `GET /aliases/:alias`
pub async fn reveal(
    State(state): State<AppState>,
    Path(alias): Path<String>,
) -> Result<Json<DataEnvelope<Vec<AliasRecord>>>, ApiError> {
    let record = state.vault.reveal(&alias).await?;

    tracing::info!(alias = %alias, "Revealed alias");
    Ok(Json(DataEnvelope::new(vec![record])))
}

/// `GET /aliases?q=a,b`
pub async fn reveal_many(
    State(state): State<AppState>,
    Query(query): Query<RevealManyQuery>,
) -> Result<Json<DataEnvelope<HashMap<String, AliasRecord>>>, ApiError> {
    let aliases: Vec<String> = query
        .q
        .split(',')
        .map(str::trim)
        .filter(|alias| !alias.is_empty())
        .map(str::to_string)
        .collect();

    if aliases.is_empty() {
        return Err(ApiError(VaultError::InvalidRequest(
            "query parameter q must list at least one alias".to_string(),
        )));
    }

    let records = state.vault.reveal_many(&aliases).await?;

    tracing::info!(count = records.len(), "Revealed aliases");
    Ok(Json(DataEnvelope::new(records)))
}

/// `PUT /aliases/:alias`: replace classifiers.
pub async fn update(
    State(state): State<AppState>,
    Path(alias): Path<String>,
    Json(payload): Json<DataEnvelope<AliasUpdate>>,
) -> Result<StatusCode, ApiError> {
    state.vault.update(&alias, &payload.data).await?;

    tracing::info!(alias = %alias, classifiers = ?payload.data.classifiers, "Updated alias");
    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /aliases/:alias`
pub async fn delete(
    State(state): State<AppState>,
    Path(alias): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.vault.delete(&alias).await?;

    tracing::info!(alias = %alias, "Deleted alias");
    Ok(StatusCode::NO_CONTENT)
}
