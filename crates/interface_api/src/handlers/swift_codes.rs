//! SWIFT code handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use tracing::instrument;

use core_kernel::{CountryCode, SwiftCode};

use crate::dto::swift_codes::*;
use crate::{error::ApiError, AppState};

/// Gets one code with its branches (for a headquarters)
#[instrument(skip(state))]
pub async fn get_swift_code(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<BankDetailsResponse>, ApiError> {
    let code = SwiftCode::parse(&code)?;
    let details = state.registry.get_by_code(&code).await?;
    Ok(Json(details.into()))
}

/// Lists every code registered in a country
#[instrument(skip(state))]
pub async fn get_swift_codes_by_country(
    State(state): State<AppState>,
    Path(iso2): Path<String>,
) -> Result<Json<CountryBanksResponse>, ApiError> {
    let country = CountryCode::parse(&iso2)?;
    let view = state.registry.get_by_country(&country).await?;
    Ok(Json(view.into()))
}

/// Registers a new headquarters or branch
#[instrument(skip(state, payload))]
pub async fn create_swift_code(
    State(state): State<AppState>,
    payload: Result<Json<CreateBankRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(request) = payload?;
    let submission = request.into_submission()?;
    let code = submission.swift_code.clone();

    state.registry.register(submission).await?;
    Ok(Json(MessageResponse::saved(&code)))
}

/// Removes a code
#[instrument(skip(state))]
pub async fn delete_swift_code(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let code = SwiftCode::parse(&code)?;
    state.registry.delete(&code).await?;
    Ok(Json(MessageResponse::deleted(&code)))
}
