use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use axum_extra::extract::WithRejection;

use super::ContactRequest;
use crate::contact::models::ContactId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::ContactData;
use crate::inbound::http::middleware::AuthorizedSession;
use crate::inbound::http::router::AppState;

pub async fn update_contact(
    State(state): State<AppState>,
    Extension(AuthorizedSession(session)): Extension<AuthorizedSession>,
    WithRejection(Path(contact_id), _): WithRejection<Path<i64>, ApiError>,
    WithRejection(Json(body), _): WithRejection<Json<ContactRequest>, ApiError>,
) -> Result<ApiSuccess<ContactData>, ApiError> {
    state
        .contact_service
        .replace_contact(
            session.user.id,
            ContactId(contact_id),
            body.try_into_details()?,
        )
        .await
        .map_err(ApiError::from)
        .map(|ref contact| ApiSuccess::new(StatusCode::OK, contact.into()))
}
