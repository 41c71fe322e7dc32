use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::WithRejection;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::auth::models::SignupCommand;
use crate::inbound::http::router::AppState;
use crate::user::errors::EmailError;
use crate::user::models::EmailAddress;

const SIGNUP_DETAIL: &str = "User successfully created. Check your email for confirmation.";

pub async fn signup(
    State(state): State<AppState>,
    WithRejection(Json(body), _): WithRejection<Json<SignupRequest>, ApiError>,
) -> Result<ApiSuccess<SignupResponseData>, ApiError> {
    state
        .auth_service
        .signup(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref user| {
            ApiSuccess::new(
                StatusCode::CREATED,
                SignupResponseData {
                    user: user.into(),
                    detail: SIGNUP_DETAIL.to_string(),
                },
            )
        })
}

/// HTTP request body for registering an account (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SignupRequest {
    email: String,
    password: String,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Clone, Error)]
enum ParseSignupRequestError {
    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),
}

impl SignupRequest {
    fn try_into_command(self) -> Result<SignupCommand, ParseSignupRequestError> {
        let email = EmailAddress::new(self.email)?;
        Ok(SignupCommand::new(email, self.password, self.name))
    }
}

impl From<ParseSignupRequestError> for ApiError {
    fn from(err: ParseSignupRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignupResponseData {
    pub user: UserData,
    pub detail: String,
}
