use axum::extract::Path;
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum_extra::extract::WithRejection;
use serde::Deserialize;

use crate::contact::errors::ContactError;
use crate::contact::models::ContactField;
use crate::contact::models::ContactId;
use crate::contact::models::ContactPatch;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::ContactData;
use crate::inbound::http::middleware::AuthorizedSession;
use crate::inbound::http::router::AppState;

/// Update one field, e.g. `PATCH /auth/3?field=phone&new_data=555`.
pub async fn patch_contact(
    State(state): State<AppState>,
    Extension(AuthorizedSession(session)): Extension<AuthorizedSession>,
    WithRejection(Path(contact_id), _): WithRejection<Path<i64>, ApiError>,
    WithRejection(Query(params), _): WithRejection<Query<PatchContactParams>, ApiError>,
) -> Result<ApiSuccess<ContactData>, ApiError> {
    state
        .contact_service
        .patch_contact(
            session.user.id,
            ContactId(contact_id),
            params.try_into_patch()?,
        )
        .await
        .map_err(ApiError::from)
        .map(|ref contact| ApiSuccess::new(StatusCode::OK, contact.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PatchContactParams {
    field: String,
    #[serde(default)]
    new_data: String,
}

impl PatchContactParams {
    fn try_into_patch(self) -> Result<ContactPatch, ContactError> {
        let field: ContactField = self.field.parse()?;
        ContactPatch::new(field, self.new_data)
    }
}
