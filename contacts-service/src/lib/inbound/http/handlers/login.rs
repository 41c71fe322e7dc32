use axum::extract::State;
use axum::http::StatusCode;
use axum::Form;
use axum_extra::extract::WithRejection;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::auth::models::TokenPair;
use crate::inbound::http::router::AppState;

/// Password-form login; `username` carries the account email.
pub async fn login(
    State(state): State<AppState>,
    WithRejection(Form(body), _): WithRejection<Form<LoginRequest>, ApiError>,
) -> Result<ApiSuccess<TokenPairData>, ApiError> {
    state
        .auth_service
        .login(&body.username, &body.password)
        .await
        .map_err(ApiError::from)
        .map(|pair| ApiSuccess::new(StatusCode::OK, pair.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    username: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenPairData {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
}

impl From<TokenPair> for TokenPairData {
    fn from(pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            token_type: pair.token_type.to_string(),
        }
    }
}
