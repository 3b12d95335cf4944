use actix_cors::Cors;
use actix_web::{middleware::NormalizePath, web, App, HttpServer};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

use cvbank_backend::{
    db::postgres::create_pool,
    graceful_shutdown::shutdown_signal,
    middlewares::identity::IdentityMiddleware,
    routes::configure_routes,
    settings::AppConfig,
    AppState,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match AppConfig::new() {
        Ok(cfg) => {
            tracing::info!("Loaded configuration: {:?}", cfg);
            cfg
        }
        Err(e) => {
            tracing::error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!(
        "Store credentials resolved from: {}",
        config.credentials_source
    );

    // Missing or broken store credentials degrade the service instead of
    // killing it: the shell keeps serving, data operations answer 503.
    let pool = match config.store_credentials() {
        Some(url) => match create_pool(url).await {
            Ok(pool) => Some(pool),
            Err(e) => {
                tracing::error!("Profile store unavailable, data operations disabled: {e:#}");
                None
            }
        },
        None => {
            tracing::error!(
                "Store credentials missing. Cannot connect to the database; data operations disabled."
            );
            None
        }
    };

    let app_state = web::Data::new(AppState::new(&config, pool));

    let server_addr = format!("{}:{}", config.host, config.port);

    tracing::info!(
        "Starting CV Bank API v{} on {}",
        env!("CARGO_PKG_VERSION"),
        server_addr
    );

    let cors_config = config.clone();

    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(NormalizePath::trim())
            .wrap(TracingLogger::default())
            .wrap(IdentityMiddleware)
            .wrap(build_cors(&cors_config))
            .configure(configure_routes)
    })
    .workers(config.worker_count)
    .bind(server_addr)?
    .run();

    tokio::select! {
        res = server => res,
        _ = shutdown_signal() => Ok(()),
    }
}

fn build_cors(config: &AppConfig) -> Cors {
    let origins = config.cors_origins();

    if origins.iter().any(|origin| origin == "*") {
        return Cors::permissive();
    }

    origins.iter().fold(
        Cors::default()
            .allowed_methods(vec!["GET", "POST", "PUT", "OPTIONS"])
            .allow_any_header()
            .max_age(3600),
        |cors, origin| cors.allowed_origin(origin),
    )
}
