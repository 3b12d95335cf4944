mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;

pub use domain::{entities, use_cases};
pub use interfaces::{handlers, repositories, middlewares, routes};
pub use infrastructure::db;

use errors::AppError;
use repositories::sqlx_repo::SqlxProfileRepo;
use settings::{AppConfig, IdentitySettings};
use use_cases::{board::BoardHandler, profiles::ProfileHandler};

pub type AppProfileHandler = ProfileHandler<SqlxProfileRepo>;
pub type AppBoardHandler = BoardHandler<SqlxProfileRepo>;

/// Shared application state. The handlers are `None` when the store
/// credentials were missing or the connection could not be established;
/// the shell endpoints keep working and every data operation reports
/// `AppError::StoreUnavailable`.
pub struct AppState {
    pub identity: IdentitySettings,
    pub profile_handler: Option<AppProfileHandler>,
    pub board_handler: Option<AppBoardHandler>,
}

impl AppState {
    pub fn new(config: &AppConfig, pool: Option<sqlx::PgPool>) -> Self {
        let identity = config.identity_settings();

        match pool {
            Some(pool) => {
                let profile_handler = ProfileHandler::new(SqlxProfileRepo::new(pool.clone()));
                let board_handler =
                    BoardHandler::new(ProfileHandler::new(SqlxProfileRepo::new(pool)));

                AppState {
                    identity,
                    profile_handler: Some(profile_handler),
                    board_handler: Some(board_handler),
                }
            }
            None => AppState {
                identity,
                profile_handler: None,
                board_handler: None,
            },
        }
    }

    pub fn profiles(&self) -> Result<&AppProfileHandler, AppError> {
        self.profile_handler.as_ref().ok_or(AppError::StoreUnavailable)
    }

    pub fn board(&self) -> Result<&AppBoardHandler, AppError> {
        self.board_handler.as_ref().ok_or(AppError::StoreUnavailable)
    }
}
