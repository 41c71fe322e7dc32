use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use chrono::Utc;

use crate::inbound::http::handlers::contact_list;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::ContactData;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;

pub async fn upcoming_birthdays(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<ApiSuccess<Vec<ContactData>>, ApiError> {
    let today = Utc::now().date_naive();
    let contacts = state
        .contact_service
        .upcoming_birthdays(user.id, today)
        .await?;

    Ok(ApiSuccess::new(StatusCode::OK, contact_list(&contacts)))
}
