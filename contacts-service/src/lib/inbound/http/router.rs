use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::extract::MatchedPath;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::confirmed_email::confirmed_email;
use super::handlers::contacts::create_contact::create_contact;
use super::handlers::contacts::delete_contact::delete_contact;
use super::handlers::contacts::get_contact::get_contact;
use super::handlers::contacts::list_contacts::list_contacts;
use super::handlers::contacts::patch_contact::patch_contact;
use super::handlers::contacts::search_contacts::search_by_name;
use super::handlers::contacts::search_contacts::search_contacts;
use super::handlers::contacts::update_contact::update_contact;
use super::handlers::contacts::upcoming_birthdays::upcoming_birthdays;
use super::handlers::current_user::current_user;
use super::handlers::login::login;
use super::handlers::refresh_token::refresh_token;
use super::handlers::request_email::request_email;
use super::handlers::signup::signup;
use super::middleware::require_access_token;
use super::middleware::require_refresh_token;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::contact::ports::ContactServicePort;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthServicePort>,
    pub contact_service: Arc<dyn ContactServicePort>,
}

pub fn create_router(
    auth_service: Arc<dyn AuthServicePort>,
    contact_service: Arc<dyn ContactServicePort>,
) -> Router {
    let state = AppState {
        auth_service,
        contact_service,
    };

    let public_routes = Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/auth/confirmed_email/:token", get(confirmed_email))
        .route("/auth/request_email", post(request_email));

    // Guarded by the refresh token currently on record
    let session_routes = Router::new()
        .route("/auth/refresh_token", get(refresh_token))
        .route(
            "/auth/:contact_id",
            put(update_contact)
                .patch(patch_contact)
                .delete(delete_contact),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_refresh_token,
        ));

    let protected_routes = Router::new()
        .route("/users/me", get(current_user))
        .route("/contacts", get(list_contacts).post(create_contact))
        .route("/contacts/birthdays", get(upcoming_birthdays))
        .route("/contacts/search_by_name/:name", get(search_by_name))
        .route("/contacts/search/:term", get(search_contacts))
        .route("/contacts/:contact_id", get(get_contact))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_access_token,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                path = %trace_path(request),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                path = %trace_path(request),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(session_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .with_state(state)
}

/// Route template of the request, so path parameters such as verification
/// tokens and query strings stay out of the logs.
fn trace_path(request: &Request<Body>) -> String {
    match request.extensions().get::<MatchedPath>() {
        Some(matched) => matched.as_str().to_string(),
        None => redact_token(request.uri().path()),
    }
}

fn redact_token(path: &str) -> String {
    const CONFIRM_PREFIX: &str = "/auth/confirmed_email/";

    match path.strip_prefix(CONFIRM_PREFIX) {
        Some(_) => format!("{}:token", CONFIRM_PREFIX),
        None => path.to_string(),
    }
}
