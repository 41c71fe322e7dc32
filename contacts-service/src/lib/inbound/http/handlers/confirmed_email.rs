use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use super::MessageData;
use crate::domain::auth::models::EmailConfirmation;
use crate::inbound::http::router::AppState;

pub async fn confirmed_email(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<ApiSuccess<MessageData>, ApiError> {
    let message = match state.auth_service.confirm_email(&token).await? {
        EmailConfirmation::Confirmed => "Email confirmed",
        EmailConfirmation::AlreadyConfirmed => "Your email is already confirmed.",
    };

    Ok(ApiSuccess::new(StatusCode::OK, MessageData::new(message)))
}
