use actix_web::web;

use crate::handlers::home::home;

mod admin;
mod board;
mod json_error;
mod profiles;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(home);

    cfg.service(
        web::scope("/api/v1")
            .configure(profiles::config_routes)
            .configure(board::config_routes)
            .configure(admin::config_routes)
    );

    cfg.configure(json_error::config_routes);
}
