//! Bearer token authentication middleware for protecting API endpoints.
//!
//! This middleware extracts the token from the `Authorization: Bearer`
//! header, authenticates it with the application's [`Authenticator`], and
//! injects the resulting [`AuthContext`] into the request extensions.
//!
//! [`Authenticator`]: jwsauth_core::Authenticator

use actix_web::{
    body::EitherBody,
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    web, Error, FromRequest, HttpMessage, HttpRequest, ResponseError,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    task::{Context, Poll},
};

use jwsauth_core::{AuthFailure, DomainError, SimpleIdentity};

use crate::app::AppState;
use crate::handlers::ApiError;

/// Authenticated principal injected into requests
#[derive(Debug, Clone)]
pub struct AuthContext {
    identity: SimpleIdentity,
}

impl AuthContext {
    pub fn new(identity: SimpleIdentity) -> Self {
        Self { identity }
    }

    pub fn identity(&self) -> &SimpleIdentity {
        &self.identity
    }
}

/// Bearer authentication middleware factory
#[derive(Debug, Clone, Copy, Default)]
pub struct JwsAuth;

impl JwsAuth {
    pub fn new() -> Self {
        Self
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwsAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwsAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwsAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

/// Bearer authentication middleware service
pub struct JwsAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for JwsAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let Some(state) = req.app_data::<web::Data<AppState>>().cloned() else {
                tracing::error!("JwsAuth used without application state");
                let error = ApiError::from(DomainError::Internal {
                    message: "authentication is not configured".to_string(),
                });
                return Ok(reject(req, error));
            };

            let credential = bearer_credential(req.request());
            let identity = match state.authenticator.authenticate(credential.as_deref()) {
                Ok(identity) => identity,
                Err(error) => return Ok(reject(req, ApiError::from(error))),
            };

            tracing::debug!(user_id = identity.id, "Authenticated request");
            req.extensions_mut().insert(AuthContext::new(identity));

            service.call(req).await.map(ServiceResponse::map_into_left_body)
        })
    }
}

/// Short-circuits the request with the error's JSON response
fn reject<B>(req: ServiceRequest, error: ApiError) -> ServiceResponse<EitherBody<B>> {
    let (request, _) = req.into_parts();
    ServiceResponse::new(request, error.error_response()).map_into_right_body()
}

/// Extracts the credential from an `Authorization: Bearer` header.
///
/// A missing header, another scheme, or an empty token all count as no
/// credential.
pub fn bearer_credential(req: &HttpRequest) -> Option<String> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then(|| token.to_string())
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result: Result<Self, Self::Error> = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| ApiError::from(AuthFailure::Missing).into());

        ready(result)
    }
}
