use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    response::{IntoResponse, Response},
};
use http::StatusCode;

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0}")]
    Store(#[from] formdesk_db::Error),
    #[error("password could not be hashed: {0}")]
    PasswordHash(argon2::password_hash::Error),
}

impl ApiError {
    /// Maps a store error, naming `noun` when the record does not exist.
    pub fn lookup(noun: &'static str) -> impl FnOnce(formdesk_db::Error) -> ApiError {
        move |err| match err {
            formdesk_db::Error::NotFound => ApiError::NotFound(noun),
            err => ApiError::Store(err),
        }
    }

    pub fn status(&self) -> StatusCode {
        use formdesk_db::Error as Db;
        match self {
            ApiError::BadRequest(_) | ApiError::Store(Db::Validation(_)) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) | ApiError::Store(Db::NotFound) => StatusCode::NOT_FOUND,
            ApiError::Store(Db::Constraint(_)) => StatusCode::CONFLICT,
            ApiError::Store(_) | ApiError::PasswordHash(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("request failed: {self}");
        } else {
            tracing::debug!("request rejected: {self}");
        }
        crate::response::failure(status, self.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}
