use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage, ResponseError,
};
use engine::types::store_types::StoreError;
use futures_util::future::LocalBoxFuture;
use log::debug;
use std::{
    future::{ready, Ready},
    rc::Rc,
};

use crate::error::ApiError;
use crate::state::AppState;
use crate::utils::jwt::{verify_jwt, Claims};

/// Verifies the bearer token and stores its [`Claims`] in the request
/// extensions for handlers and [`super::admin::AdminMiddleware`].
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

/// Resolves the bearer token to the account it was issued for. The role is
/// taken from the store, so demotions and deletions apply immediately.
async fn authenticate(req: &ServiceRequest) -> Result<Claims, ApiError> {
    let header = req
        .headers()
        .get("Authorization")
        .ok_or(ApiError::Unauthorized("Missing Authorization header"))?;

    let token_str = header
        .to_str()
        .map_err(|_| ApiError::Unauthorized("Invalid Authorization header"))?;

    let token = token_str
        .strip_prefix("Bearer ")
        .ok_or(ApiError::Unauthorized("Invalid token format"))?;

    let state = req
        .app_data::<web::Data<AppState>>()
        .cloned()
        .ok_or_else(|| ApiError::Internal("application state not configured".into()))?;

    let mut claims = verify_jwt(token, &state.jwt).map_err(|e| {
        debug!("Rejected token: {}", e);
        ApiError::Unauthorized("Invalid or expired token")
    })?;

    if state.revoked.is_revoked(&claims.jti)? {
        return Err(ApiError::Unauthorized("Token has been revoked"));
    }

    let user = match state.store.get_user(claims.sub).await {
        Ok(user) => user,
        Err(StoreError::UserNotFound) => {
            return Err(ApiError::Unauthorized("Account no longer exists"))
        }
        Err(e) => return Err(e.into()),
    };

    if (claims.iat as i64) < user.created_at.timestamp() {
        debug!("Token for user {} predates the account", user.id);
        return Err(ApiError::Unauthorized("Account no longer exists"));
    }

    claims.role = user.role;
    Ok(claims)
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        Box::pin(async move {
            match authenticate(&req).await {
                Ok(claims) => {
                    req.extensions_mut().insert(claims);
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                Err(err) => Ok(req.into_response(err.error_response()).map_into_right_body()),
            }
        })
    }
}
