use actix_web::{web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    entities::board::{FormState, GroupBy},
    errors::AppError,
    use_cases::extractors::ActingIdentity,
    AppState,
};

#[derive(Debug, Deserialize)]
pub struct ViewRequest {
    #[serde(default)]
    pub state: FormState,
    #[serde(default)]
    pub group_by: GroupBy,
}

/// The render step: client sends its current UI state, gets it back
/// together with the full (optionally grouped) listing.
pub async fn view(
    state: web::Data<AppState>,
    body: web::Json<ViewRequest>,
    identity: ActingIdentity,
) -> Result<HttpResponse, AppError> {
    let request = body.into_inner();
    let board = state
        .board()?
        .view(request.state, request.group_by, &identity.0)
        .await?;
    Ok(HttpResponse::Ok().json(board))
}

pub async fn begin_edit(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    identity: ActingIdentity,
) -> Result<HttpResponse, AppError> {
    let next = state
        .board()?
        .begin_edit(path.into_inner(), &identity.0)
        .await?;
    Ok(HttpResponse::Ok().json(next))
}

/// Cancel is a pure state transition; it works even when the store is down.
pub async fn cancel() -> HttpResponse {
    HttpResponse::Ok().json(FormState::composing())
}

#[derive(Debug, Deserialize)]
pub struct StateRequest {
    #[serde(default)]
    pub state: FormState,
}

/// Appends one blank additional-info slot without submitting. Pure state
/// transition as well.
pub async fn add_info_block(body: web::Json<StateRequest>) -> HttpResponse {
    HttpResponse::Ok().json(body.into_inner().state.add_info_block())
}

pub async fn submit(
    state: web::Data<AppState>,
    body: web::Json<StateRequest>,
    identity: ActingIdentity,
) -> Result<HttpResponse, AppError> {
    let request = body.into_inner();

    match state.board()?.submit(&request.state, &identity.0).await {
        Ok(outcome) => Ok(HttpResponse::Ok().json(outcome)),
        // A rejected submission keeps the entered values: the unchanged
        // state rides along with the warning.
        Err(AppError::ValidationError(details)) => {
            Ok(HttpResponse::BadRequest().json(serde_json::json!({
                "error": "Validation failed",
                "details": details,
                "state": request.state,
            })))
        }
        Err(e) => Err(e),
    }
}
