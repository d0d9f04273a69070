use axum::{extract::Request, middleware::Next, response::Response};
use club_core::Role;
use std::{future::Future, pin::Pin};

use crate::{error::ApiError, middleware::AuthUser};

type GuardFuture = Pin<Box<dyn Future<Output = Result<Response, ApiError>> + Send>>;

/// Require a specific role to access the route.
///
/// Must run after [`crate::middleware::auth_middleware`], which inserts the
/// [`AuthUser`] this guard reads.
pub fn require_role(role: Role) -> impl Fn(Request, Next) -> GuardFuture + Clone {
    move |request: Request, next: Next| -> GuardFuture {
        Box::pin(async move {
            let user = request
                .extensions()
                .get::<AuthUser>()
                .ok_or(ApiError::Unauthorized)?;

            if user.role != role {
                tracing::warn!(email = %user.email, required = role.as_str(), "role check failed");
                return Err(ApiError::Forbidden);
            }

            Ok(next.run(request).await)
        })
    }
}
