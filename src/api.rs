//! Client side of the students REST API. The server behind it is someone else's; this module
//! only speaks its contract.

use crate::data::student::{NewStudent, Student};
use async_trait::async_trait;
use snafu::Snafu;

pub mod client;
#[cfg(test)]
pub mod fake;

/// Error bodies get logged, so keep them short.
const MAX_ERROR_BODY_LENGTH: usize = 500;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ApiError {
    #[snafu(display("Student not found: {}", id))]
    NotFound { id: String },
    #[snafu(display("Network error talking to {}", url))]
    Network { source: reqwest::Error, url: String },
    #[snafu(display("Server error ({}): {}", status, body))]
    Server { status: u16, body: String },
    #[snafu(display("Invalid response: {}", reason))]
    InvalidResponse { reason: String },
}

impl ApiError {
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            return body.to_string();
        }

        let mut end = MAX_ERROR_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
    }

    pub fn from_status(status: reqwest::StatusCode, id: Option<&str>, body: &str) -> Self {
        let body = Self::truncate_body(body);
        match status.as_u16() {
            404 => Self::NotFound {
                id: id.unwrap_or_default().to_string(),
            },
            500..=599 => Self::Server {
                status: status.as_u16(),
                body,
            },
            other => Self::InvalidResponse {
                reason: format!("Status {other}: {body}"),
            },
        }
    }

    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[async_trait]
pub trait StudentsApi: Send + Sync {
    /// `GET /api/students`
    async fn list(&self) -> ApiResult<Vec<Student>>;
    /// `GET /api/students/{id}`
    async fn get(&self, id: &str) -> ApiResult<Student>;
    /// `DELETE /api/students/{id}`
    async fn delete(&self, id: &str) -> ApiResult<()>;
    /// `POST /api/students`
    async fn create(&self, student: &NewStudent) -> ApiResult<Student>;
}
