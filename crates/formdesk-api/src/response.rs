//! JSON envelopes wrapped around every response body.

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use http::StatusCode;

#[derive(serde::Serialize, Debug)]
pub struct Success<T> {
    status: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
}

#[derive(serde::Serialize, Debug)]
pub struct Failure {
    status: bool,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<u16>,
}

/// Creation and modification times carried by every stored record.
#[derive(serde::Serialize, Debug)]
pub struct Stamps {
    pub created: jiff::Timestamp,
    pub updated: jiff::Timestamp,
}

impl Stamps {
    pub fn new(created: jiff_diesel::Timestamp, updated: jiff_diesel::Timestamp) -> Self {
        Self {
            created: created.to_jiff(),
            updated: updated.to_jiff(),
        }
    }
}

fn success<T: serde::Serialize>(
    status: StatusCode,
    data: Option<T>,
    message: &'static str,
) -> Response {
    let body = Success {
        status: true,
        message: (!message.is_empty()).then_some(message),
        data,
    };
    (status, Json(body)).into_response()
}

pub fn ok<T: serde::Serialize>(data: T, message: &'static str) -> Response {
    success(StatusCode::OK, Some(data), message)
}

pub fn created<T: serde::Serialize>(data: T, message: &'static str) -> Response {
    success(StatusCode::CREATED, Some(data), message)
}

/// 200 with a message and no `data`.
pub fn done(message: &'static str) -> Response {
    success::<()>(StatusCode::OK, None, message)
}

pub fn failure(status: StatusCode, error: String) -> Response {
    let body = Failure {
        status: false,
        error,
        code: Some(status.as_u16()),
    };
    (status, Json(body)).into_response()
}
