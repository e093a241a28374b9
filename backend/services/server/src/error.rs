use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use engine::types::store_types::StoreError;
use engine::types::ticket_types::TicketError;
use serde_json::json;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    #[error("{0}")]
    InvalidTicket(#[from] TicketError),

    #[error("{0}")]
    Unauthorized(&'static str),

    #[error("{0}")]
    Forbidden(&'static str),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("{0}")]
    Internal(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidTicket(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::Store(e) => match e {
                StoreError::UserNotFound | StoreError::CouponNotFound | StoreError::DrawNotFound(_) => {
                    StatusCode::NOT_FOUND
                }
                StoreError::EmailTaken | StoreError::DrawCompleted(_) => StatusCode::CONFLICT,
                StoreError::NoDraws => StatusCode::UNPROCESSABLE_ENTITY,
                StoreError::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            },
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut body = json!({
            "status": "error",
            "message": self.to_string(),
        });
        if let ApiError::InvalidTicket(e) = self {
            body["reason"] = json!(e.kind());
        }
        HttpResponse::build(self.status_code()).json(body)
    }
}
