use actix_web::{web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    entities::board::GroupBy,
    entities::profile::ProfileForm,
    errors::AppError,
    use_cases::board::build_listing,
    use_cases::extractors::ActingIdentity,
    AppState,
};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub group_by: GroupBy,
}

pub async fn list_profiles(
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
    identity: ActingIdentity,
) -> Result<HttpResponse, AppError> {
    let records = state.profiles()?.list().await?;
    let listing = build_listing(records, query.group_by, &identity.0);
    Ok(HttpResponse::Ok().json(listing))
}

pub async fn publish_profile(
    state: web::Data<AppState>,
    form: web::Json<ProfileForm>,
    identity: ActingIdentity,
) -> Result<HttpResponse, AppError> {
    let created = state.profiles()?.publish(&form, &identity.0).await?;
    Ok(HttpResponse::Created().json(created))
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(flatten)]
    pub form: ProfileForm,
    /// Revision the client based its edit on; a mismatch is a 409.
    #[serde(default)]
    pub expected_revision: Option<i64>,
}

pub async fn update_profile(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateProfileRequest>,
    identity: ActingIdentity,
) -> Result<HttpResponse, AppError> {
    let request = body.into_inner();
    let updated = state
        .profiles()?
        .update(
            path.into_inner(),
            &request.form,
            request.expected_revision,
            &identity.0,
        )
        .await?;
    Ok(HttpResponse::Ok().json(updated))
}
