use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::{entities::identity::Identity, errors::AppError};

/// Extractor for the acting identity resolved by the identity middleware.
/// Usage: add `identity: ActingIdentity` as a handler parameter.
#[derive(Debug)]
pub struct ActingIdentity(pub Identity);

impl FromRequest for ActingIdentity {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<Identity>() {
            Some(identity) => ready(Ok(ActingIdentity(identity.clone()))),
            None => ready(Err(AppError::InternalError(
                "identity middleware not mounted".to_string(),
            )
            .into())),
        }
    }
}

/// Extractor requiring the admin identity. Returns 403 for anyone else.
#[derive(Debug)]
pub struct AdminIdentity(pub Identity);

impl FromRequest for AdminIdentity {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<Identity>() {
            Some(identity) if identity.is_admin => ready(Ok(AdminIdentity(identity.clone()))),
            Some(_) => ready(Err(AppError::ForbiddenAccess.into())),
            None => ready(Err(AppError::InternalError(
                "identity middleware not mounted".to_string(),
            )
            .into())),
        }
    }
}
