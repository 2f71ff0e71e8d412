use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use taskgate_core::error::{ClientCode, TaskGateError};

/// `TaskGateError` rendered as a plain-text HTTP response.
#[derive(Debug)]
pub struct HttpError(pub TaskGateError);

impl From<TaskGateError> for HttpError {
    fn from(e: TaskGateError) -> Self {
        Self(e)
    }
}

impl HttpError {
    pub fn status(&self) -> StatusCode {
        match self.0.client_code() {
            ClientCode::BadRequest => StatusCode::BAD_REQUEST,
            ClientCode::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            ClientCode::InvalidConfig | ClientCode::UnsupportedVersion | ClientCode::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(code = self.0.client_code().as_str(), error = %self.0, "request failed");
        }
        (status, self.0.to_string()).into_response()
    }
}
