//! Bearer token authentication middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;
use serde_json::json;

use crate::{error::AppError, state::AppState};

/// Authenticates requests using Bearer tokens from the Authorization header.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <jwt>
/// ```
///
/// # Authentication Flow
///
/// 1. Extract the token from the `Authorization` header
/// 2. Verify signature and expiry via [`crate::application::services::AuthService`]
/// 3. Insert the caller's [`crate::application::services::AuthenticatedUser`]
///    into request extensions
/// 4. Continue to the next middleware/handler
///
/// # Errors
///
/// Returns `401 Unauthorized` when the header is missing or the token does
/// not verify.
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let AuthBearer(token) = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "request does not contain an authorization header",
                json!({}),
            )
        })?;

    let user = st.auth_service.authenticate(&token)?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}
