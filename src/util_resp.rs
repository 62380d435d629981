use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::tournaments::ballots::export::ExportError;

pub type StandardResponse = Result<Response, FailureResponse>;

pub fn bad_request(message: impl Into<String>) -> StandardResponse {
    Err(FailureResponse::BadRequest(message.into()))
}

pub fn csv(body: String) -> StandardResponse {
    Ok((
        [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
        body,
    )
        .into_response())
}

#[derive(Debug)]
pub enum FailureResponse {
    BadRequest(String),
    ServerError(String),
}

impl IntoResponse for FailureResponse {
    fn into_response(self) -> Response {
        match self {
            FailureResponse::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, message).into_response()
            }
            FailureResponse::ServerError(message) => {
                tracing::error!("{message}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
                    .into_response()
            }
        }
    }
}

impl From<ExportError> for FailureResponse {
    fn from(e: ExportError) -> Self {
        FailureResponse::ServerError(e.to_string())
    }
}
