use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use crate::inbound::http::handlers::contact_list;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::ContactData;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;

/// Contacts with exactly this name
pub async fn search_by_name(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(name): Path<String>,
) -> Result<ApiSuccess<Vec<ContactData>>, ApiError> {
    let contacts = state.contact_service.search_by_name(user.id, &name).await?;

    Ok(ApiSuccess::new(StatusCode::OK, contact_list(&contacts)))
}

/// Contacts with this exact name, surname or email
pub async fn search_contacts(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(term): Path<String>,
) -> Result<ApiSuccess<Vec<ContactData>>, ApiError> {
    let contacts = state.contact_service.search(user.id, &term).await?;

    Ok(ApiSuccess::new(StatusCode::OK, contact_list(&contacts)))
}
