use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage,
};
use futures_util::future::{ok, LocalBoxFuture, Ready};
use std::rc::Rc;
use std::task::{Context, Poll};

use crate::{entities::identity::Identity, settings::IdentitySettings, AppState};

/// Resolves the acting identity for every request and stores it in the
/// request extensions. This is the single seam where real authentication
/// (a token-verifying middleware) would plug in; today it reads the
/// `X-User-Id` header and falls back to the configured placeholder.
pub struct IdentityMiddleware;

impl<S, B> Transform<S, ServiceRequest> for IdentityMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = IdentityMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(IdentityMiddlewareService {
            service: Rc::new(service),
        })
    }
}

pub struct IdentityMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for IdentityMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let identity = resolve_identity(&req);
            req.extensions_mut().insert(identity);
            service.call(req).await
        })
    }
}

fn resolve_identity(req: &ServiceRequest) -> Identity {
    let settings = match req.app_data::<web::Data<AppState>>() {
        Some(state) => state.identity.clone(),
        None => {
            tracing::warn!("AppState missing in identity middleware, using defaults");
            IdentitySettings::default()
        }
    };

    let user_id = req
        .headers()
        .get("X-User-Id")
        .and_then(|header| header.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(String::from)
        .unwrap_or(settings.default_user_id);

    Identity {
        is_admin: user_id == settings.admin_user_id,
        user_id,
    }
}
