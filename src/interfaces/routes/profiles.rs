use actix_web::web;

use crate::handlers::profiles;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/profiles")
            .service(
                web::resource("")
                    .route(web::get().to(profiles::list_profiles))
                    .route(web::post().to(profiles::publish_profile))
            )
            .service(
                web::resource("/{profile_id}")
                    .route(web::put().to(profiles::update_profile))
            )
    );
}
