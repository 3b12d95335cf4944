use actix_web::web;

use crate::handlers::board;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/board")
            .service(
                web::resource("/view")
                    .route(web::post().to(board::view))
            )
            .service(
                web::resource("/edit/{profile_id}")
                    .route(web::post().to(board::begin_edit))
            )
            .service(
                web::resource("/cancel")
                    .route(web::post().to(board::cancel))
            )
            .service(
                web::resource("/add-block")
                    .route(web::post().to(board::add_info_block))
            )
            .service(
                web::resource("/submit")
                    .route(web::post().to(board::submit))
            )
    );
}
