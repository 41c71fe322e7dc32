use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::WithRejection;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::MessageData;
use crate::domain::auth::models::EmailRequest;
use crate::inbound::http::router::AppState;
use crate::user::models::EmailAddress;

pub async fn request_email(
    State(state): State<AppState>,
    WithRejection(Json(body), _): WithRejection<Json<RequestEmailBody>, ApiError>,
) -> Result<ApiSuccess<MessageData>, ApiError> {
    let email = EmailAddress::new(body.email)
        .map_err(|e| ApiError::UnprocessableEntity(format!("Invalid email: {}", e)))?;

    let message = match state.auth_service.request_email(&email).await? {
        EmailRequest::Sent => "Check your email for confirmation.",
        EmailRequest::AlreadyConfirmed => "Your email is already confirmed.",
    };

    Ok(ApiSuccess::new(StatusCode::OK, MessageData::new(message)))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RequestEmailBody {
    email: String,
}
