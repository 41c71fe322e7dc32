use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum_extra::extract::WithRejection;

use crate::contact::models::ContactId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::MessageData;
use crate::inbound::http::middleware::AuthorizedSession;
use crate::inbound::http::router::AppState;

pub async fn delete_contact(
    State(state): State<AppState>,
    Extension(AuthorizedSession(session)): Extension<AuthorizedSession>,
    WithRejection(Path(contact_id), _): WithRejection<Path<i64>, ApiError>,
) -> Result<ApiSuccess<MessageData>, ApiError> {
    state
        .contact_service
        .delete_contact(session.user.id, ContactId(contact_id))
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        MessageData::new("Contact was deleted"),
    ))
}
