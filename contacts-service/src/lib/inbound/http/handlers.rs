use axum::extract::rejection::FormRejection;
use axum::extract::rejection::JsonRejection;
use axum::extract::rejection::PathRejection;
use axum::extract::rejection::QueryRejection;
use axum::http::header;
use axum::http::HeaderValue;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use serde::Serialize;

use crate::contact::errors::ContactError;
use crate::contact::models::Contact;
use crate::domain::auth::errors::AuthError;
use crate::user::models::User;

pub mod confirmed_email;
pub mod contacts;
pub mod current_user;
pub mod login;
pub mod refresh_token;
pub mod request_email;
pub mod signup;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self::InternalServerError(e.to_string())
    }
}

impl ApiError {
    /// Malformed request input: syntax errors are 400, the rest 422.
    fn rejected(status: StatusCode, detail: String) -> Self {
        if status == StatusCode::BAD_REQUEST {
            ApiError::BadRequest(detail)
        } else {
            ApiError::UnprocessableEntity(detail)
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::rejected(rejection.status(), rejection.body_text())
    }
}

impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        Self::rejected(rejection.status(), rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::rejected(rejection.status(), rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::rejected(rejection.status(), rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::InternalServerError(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        };

        let mut response = (status, Json(ApiErrorData { detail })).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AccountAlreadyExists => ApiError::Conflict(err.to_string()),
            AuthError::InvalidEmail
            | AuthError::EmailNotConfirmed
            | AuthError::InvalidPassword
            | AuthError::InvalidRefreshToken
            | AuthError::InvalidScope
            | AuthError::InvalidCredentials => ApiError::Unauthorized(err.to_string()),
            AuthError::InvalidVerificationToken => ApiError::UnprocessableEntity(err.to_string()),
            AuthError::VerificationFailed => ApiError::BadRequest(err.to_string()),
            AuthError::Password(_) | AuthError::Token(_) | AuthError::User(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<ContactError> for ApiError {
    fn from(err: ContactError) -> Self {
        match err {
            ContactError::NotFound(_) => ApiError::NotFound(err.to_string()),
            ContactError::InvalidName(_)
            | ContactError::InvalidEmail(_)
            | ContactError::InvalidField(_)
            | ContactError::InvalidBirthday(_) => ApiError::UnprocessableEntity(err.to_string()),
            ContactError::DatabaseError(_) | ContactError::Unknown(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageData {
    pub message: String,
}

impl MessageData {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: i64,
    pub email: String,
    pub name: Option<String>,
    pub email_confirmed: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.0,
            email: user.email.to_string(),
            name: user.name.clone(),
            email_confirmed: user.email_confirmed,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactData {
    pub id: i64,
    pub name: String,
    pub surname: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub other: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&Contact> for ContactData {
    fn from(contact: &Contact) -> Self {
        let details = &contact.details;
        Self {
            id: contact.id.0,
            name: details.name.to_string(),
            surname: details.surname.clone(),
            email: details.email.as_ref().map(|e| e.to_string()),
            phone: details.phone.clone(),
            birthday: details.birthday,
            other: details.other.clone(),
            created_at: contact.created_at,
        }
    }
}

pub fn contact_list(contacts: &[Contact]) -> Vec<ContactData> {
    contacts.iter().map(ContactData::from).collect()
}
