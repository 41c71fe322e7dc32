use axum::extract::Request;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::Authorization;
use axum_extra::headers::HeaderMapExt;

use crate::domain::auth::models::Session;
use crate::domain::user::models::User;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Account resolved from a valid access token
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Refresh token that matched the one on record
#[derive(Debug, Clone)]
pub struct AuthorizedSession(pub Session);

/// Middleware that resolves the access token owner into request extensions
pub async fn require_access_token(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(req.headers())?;

    let user = state
        .auth_service
        .current_user(&token)
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "Access token rejected");
            ApiError::from(e)
        })?;

    req.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(req).await)
}

/// Middleware that authorizes a refresh token against the stored one.
///
/// A mismatching token revokes the stored one before the request is
/// rejected.
pub async fn require_refresh_token(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(req.headers())?;

    let session = state.auth_service.authorize(&token).await.map_err(|e| {
        tracing::warn!(error = %e, "Refresh token rejected");
        ApiError::from(e)
    })?;

    req.extensions_mut().insert(AuthorizedSession(session));

    Ok(next.run(req).await)
}

fn bearer_token(headers: &HeaderMap) -> Result<String, ApiError> {
    headers
        .typed_get::<Authorization<Bearer>>()
        .map(|header| header.token().to_string())
        .ok_or_else(|| ApiError::Unauthorized("Not authenticated".to_string()))
}
