//! Appointment book endpoints

use apptbook_core::{Appointment, OutputStyle};
use axum::{
    Form, Router,
    extract::{Query, State},
    routing::get,
};
use serde::Deserialize;
use tracing::info;

use crate::routes::{AppError, MissingParameter};
use crate::state::AppState;

pub const ALL_BOOKS_DELETED: &str = "All appointment books have been deleted";

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/apptbook/appointments",
        get(report).post(create).delete(clear_all),
    )
}

/// Form body for creating an appointment
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateParams {
    pub owner: Option<String>,
    pub description: Option<String>,
    pub begin_time: Option<String>,
    pub end_time: Option<String>,
}

/// Query string for reading a book
#[derive(Deserialize)]
pub struct ReportParams {
    pub owner: Option<String>,
    pub style: Option<OutputStyle>,
}

/// Empty values count as missing.
fn required(value: Option<String>, name: &'static str) -> Result<String, MissingParameter> {
    value.filter(|v| !v.is_empty()).ok_or(MissingParameter(name))
}

/// POST /apptbook/appointments - Add an appointment to an owner's book
async fn create(
    State(state): State<AppState>,
    Form(params): Form<CreateParams>,
) -> Result<String, AppError> {
    let owner = required(params.owner, "owner")?;
    let description = required(params.description, "description")?;
    let begin_time = required(params.begin_time, "beginTime")?;
    let end_time = required(params.end_time, "endTime")?;

    let appointment = Appointment::new(&state.codec, description, &begin_time, &end_time)?;
    let line = appointment.display_with(&state.codec).to_string();
    state.store.add(&owner, appointment);
    info!(%owner, appointment = %line, "appointment added");

    Ok(line)
}

/// GET /apptbook/appointments - Render an owner's book
async fn report(
    State(state): State<AppState>,
    Query(params): Query<ReportParams>,
) -> Result<String, AppError> {
    let owner = required(params.owner, "owner")?;
    let book = state.store.find(&owner)?;

    let text = state.renderer.render_to_string(
        book.owner(),
        &book.sorted(),
        params.style.unwrap_or_default(),
    )?;

    Ok(text)
}

/// DELETE /apptbook/appointments - Remove every book
async fn clear_all(State(state): State<AppState>) -> &'static str {
    let owners = state.store.owners();
    state.store.clear_all();
    info!(count = owners.len(), ?owners, "all appointment books deleted");
    ALL_BOOKS_DELETED
}
