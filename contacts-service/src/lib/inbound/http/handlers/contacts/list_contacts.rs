use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use crate::inbound::http::handlers::contact_list;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::ContactData;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;

pub async fn list_contacts(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<ApiSuccess<Vec<ContactData>>, ApiError> {
    let contacts = state.contact_service.list_contacts(user.id).await?;

    Ok(ApiSuccess::new(StatusCode::OK, contact_list(&contacts)))
}
