use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::login::TokenPairData;
use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::AuthorizedSession;
use crate::inbound::http::router::AppState;

pub async fn refresh_token(
    State(state): State<AppState>,
    Extension(AuthorizedSession(session)): Extension<AuthorizedSession>,
) -> Result<ApiSuccess<TokenPairData>, ApiError> {
    state
        .auth_service
        .refresh(&session)
        .await
        .map_err(ApiError::from)
        .map(|pair| ApiSuccess::new(StatusCode::OK, pair.into()))
}
