//! HTTP handlers for the read reports and the guarded asset insert.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value as JsonValue};

use tally_core::{document_from_json, is_canonical, FieldValue};
use tally_report::{AssetPage, PageRequest, SummaryReport};

use crate::{ApiError, AppState};

/// Liveness probe.
pub async fn health_check() -> Json<JsonValue> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Inventory-wide summary counts and per-category spend.
///
/// # Returns
/// - 200 OK with the summary report
/// - 500 Internal Server Error if any collection's store call fails
pub async fn get_summary(State(state): State<AppState>) -> Result<Json<SummaryReport>, ApiError> {
    Ok(Json(state.summary.collect().await?))
}

/// Paginated asset listing across the discovered inventory collections.
///
/// # Query Parameters
/// - `page`: page number, >= 1 (default 1)
/// - `limit`: page size, 1..=500 (default 50)
/// - `collection`: `"all"` or one inventory collection name (default `"all"`)
///
/// # Returns
/// - 200 OK with `{assets, total_pages, current_page, total_assets}`
/// - 400 Bad Request for out-of-range page/limit or an unknown collection
/// - 500 Internal Server Error if a store call fails
pub async fn get_all_assets(
    State(state): State<AppState>,
    Query(req): Query<PageRequest>,
) -> Result<Json<AssetPage>, ApiError> {
    Ok(Json(state.assets.fetch(&req).await?))
}

/// All records with no assignment target, across every inventory-marked
/// collection. Unpaginated.
pub async fn unassigned_assets(
    State(state): State<AppState>,
) -> Result<Json<JsonValue>, ApiError> {
    let assets = state.unassigned.collect().await?;
    Ok(Json(json!({ "unassigned_assets": assets })))
}

/// Assigned-asset summaries grouped by employee name.
///
/// # Returns
/// - 200 OK with `{employees: {name: [summary...]}}`
/// - 404 Not Found when no record anywhere has an assignment
pub async fn employees_with_assets(
    State(state): State<AppState>,
) -> Result<Json<JsonValue>, ApiError> {
    let employees = state.employees.index().await?;
    Ok(Json(json!({ "employees": employees })))
}

/// Request body for inserting one asset record.
#[derive(Debug, Deserialize)]
pub struct AddAssetRequest {
    /// Target collection; must be one of the canonical five.
    pub collection: String,
    /// The asset's fields (dynamic schema).
    pub data: JsonValue,
    /// Admin's email or name, stamped onto the record.
    pub added_by: String,
}

/// Insert a single asset record into a canonical collection.
///
/// The only write path in this service; everything else is bulk ingestion
/// handled elsewhere. Stamps `timestamp` and `added_by` before inserting.
///
/// # Returns
/// - 201 Created with `{message, inserted_id}`
/// - 400 Bad Request for a non-canonical collection or non-object data
pub async fn add_asset(
    State(state): State<AppState>,
    Json(req): Json<AddAssetRequest>,
) -> Result<(StatusCode, Json<JsonValue>), ApiError> {
    if !is_canonical(&req.collection) {
        return Err(ApiError::BadRequest(format!(
            "invalid collection name: {}",
            req.collection
        )));
    }
    let mut doc = document_from_json(req.data)
        .ok_or_else(|| ApiError::BadRequest("asset data must be a JSON object".to_string()))?;

    doc.insert(
        "timestamp".to_string(),
        FieldValue::String(chrono::Utc::now().to_rfc3339()),
    );
    doc.insert("added_by".to_string(), FieldValue::String(req.added_by));

    let inserted_id = state.store.insert_one(&req.collection, doc).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Asset added successfully",
            "inserted_id": inserted_id,
        })),
    ))
}
