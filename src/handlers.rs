use crate::dashboard::{DashboardAction, DashboardState};
use crate::errors::AppError;
use crate::filter::ReportFilter;
use crate::models::{
    FilterQuery, DashboardView, DeleteQuery, MessageResponse, ReportPayload, ShiftReport,
};
use crate::state::AppState;
use crate::storage::persist_table;
use crate::table::ReportTable;
use crate::ui::render_index;
use crate::validation::{self, ValidationError};
use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::Html,
    Json,
};
use tracing::{info, warn};

pub async fn index() -> Html<String> {
    Html(render_index())
}

pub async fn list_reports(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<Vec<ShiftReport>>, AppError> {
    let filter = ReportFilter::parse(query.date.as_deref(), query.shift.as_deref())?;
    let table = state.table.lock().await;
    Ok(Json(filter.apply(table.rows())))
}

pub async fn create_report(
    State(state): State<AppState>,
    payload: Result<Json<ReportPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<ShiftReport>), AppError> {
    let Json(payload) = payload?;
    let report = validation::for_create(payload)?;

    let mut table = state.table.lock().await;
    validation::ensure_unique_slot(table.rows(), &report)?;

    let mut next = table.clone();
    let stored = next.insert(report)?;
    commit(&state, &mut table, next).await?;

    info!(id = %stored.id, date = %stored.date, shift = %stored.shift, "report created");
    Ok((StatusCode::CREATED, Json(stored)))
}

pub async fn update_report(
    State(state): State<AppState>,
    payload: Result<Json<ReportPayload>, JsonRejection>,
) -> Result<Json<Option<ShiftReport>>, AppError> {
    let Json(payload) = payload?;
    let report = validation::for_update(payload)?;

    let mut table = state.table.lock().await;
    if !table.contains(&report.id) {
        warn!(id = %report.id, "update matched no report");
        return Ok(Json(None));
    }
    validation::ensure_unique_slot(table.rows(), &report)?;

    let mut next = table.clone();
    let Some(updated) = next.update(report) else {
        return Ok(Json(None));
    };
    commit(&state, &mut table, next).await?;

    info!(id = %updated.id, date = %updated.date, shift = %updated.shift, "report updated");
    Ok(Json(Some(updated)))
}

pub async fn delete_report(
    State(state): State<AppState>,
    Query(query): Query<DeleteQuery>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = query
        .id
        .filter(|id| !id.trim().is_empty())
        .ok_or(ValidationError::MissingField("id"))?;

    let mut table = state.table.lock().await;
    let mut next = table.clone();
    let removed = next.delete(&id);
    if removed > 0 {
        commit(&state, &mut table, next).await?;
    }

    info!(%id, removed, "report delete");
    Ok(Json(MessageResponse {
        message: "Report deleted successfully.".to_string(),
    }))
}

pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<DashboardView>, AppError> {
    let filter = ReportFilter::parse(query.date.as_deref(), query.shift.as_deref())?;
    let records = state.table.lock().await.select_all();
    let view = DashboardState::default()
        .apply(DashboardAction::RecordsLoaded(records))
        .apply(DashboardAction::SetDateFilter(filter.date))
        .apply(DashboardAction::SetShiftFilter(filter.shift))
        .into_view();
    Ok(Json(view))
}

/// Persists `next` and only then swaps it in, so a failed write keeps the
/// previous table.
async fn commit(
    state: &AppState,
    table: &mut ReportTable,
    next: ReportTable,
) -> Result<(), AppError> {
    persist_table(&state.data_path, &next).await?;
    *table = next;
    Ok(())
}
