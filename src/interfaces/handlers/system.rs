use actix_web::{web, HttpResponse, Responder};
use humantime::format_duration;
use serde::Serialize;
use std::time::Duration;

use crate::{
    constants::START_TIME,
    repositories::profile::ProfileRepository,
    use_cases::extractors::AdminIdentity,
    AppState,
};

#[derive(Serialize)]
struct HealthCheckResponse {
    status: String,
    uptime: String,
    timestamp: String,
    start_at: String,
    database: String,
    profile_count: Option<u64>,
    version: String,
}

pub async fn health_check(state: web::Data<AppState>, _admin: AdminIdentity) -> impl Responder {
    let now_utc = chrono::Utc::now();
    let uptime_duration = now_utc.signed_duration_since(*START_TIME);
    let human_uptime =
        format_duration(Duration::from_secs(uptime_duration.num_seconds().max(0) as u64));

    let (database, profile_count) = match &state.profile_handler {
        Some(handler) => match handler.profile_repo.check_connection().await {
            Ok(_) => ("OK", handler.profile_repo.count_profiles().await.ok()),
            Err(_) => ("Unavailable", None),
        },
        None => ("Not configured", None),
    };

    let status = if database == "OK" { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthCheckResponse {
        status: status.to_string(),
        uptime: human_uptime.to_string(),
        timestamp: now_utc.to_rfc3339(),
        start_at: START_TIME.to_rfc3339(),
        database: database.to_string(),
        profile_count,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
