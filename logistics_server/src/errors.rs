use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use logistics_engine::{CommentApiError, OrderApiError, TicketApiError};
use thiserror::Error;

use crate::integrations::OrderConversionError;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("An error occurred on the backend of the server. {0}")]
    BackendError(String),
    #[error("Could not read request body: {0}")]
    InvalidRequestBody(String),
    #[error("Invalid query parameter. {0}")]
    InvalidQueryParameter(String),
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("Order conversion error. {0}")]
    OrderConversionError(#[from] OrderConversionError),
    #[error("UnspecifiedError. {0}")]
    Unspecified(String),
    #[error("The data was not found. {0}")]
    NoRecordFound(String),
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequestBody(_) => StatusCode::BAD_REQUEST,
            Self::InvalidQueryParameter(_) => StatusCode::BAD_REQUEST,
            Self::InitializeError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BackendError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::IOError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::OrderConversionError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unspecified(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NoRecordFound(_) => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .body(serde_json::json!({ "error": self.to_string() }).to_string())
    }
}

impl From<OrderApiError> for ServerError {
    fn from(e: OrderApiError) -> Self {
        match e {
            OrderApiError::QueryError(s) => Self::InvalidQueryParameter(s),
            OrderApiError::DatabaseError(s) => Self::BackendError(format!("Database error: {s}")),
        }
    }
}

impl From<TicketApiError> for ServerError {
    fn from(e: TicketApiError) -> Self {
        match e {
            TicketApiError::TicketNotFound(_) => Self::NoRecordFound(e.to_string()),
            TicketApiError::DatabaseError(_) => Self::BackendError(e.to_string()),
            TicketApiError::OrderNotFound(_) | TicketApiError::EmptyUpdate | TicketApiError::InvalidTicket(_) => {
                Self::InvalidRequestBody(e.to_string())
            },
        }
    }
}

impl From<CommentApiError> for ServerError {
    fn from(e: CommentApiError) -> Self {
        match e {
            CommentApiError::DatabaseError(_) => Self::BackendError(e.to_string()),
            CommentApiError::OrderNotFound(_) | CommentApiError::InvalidComment(_) => {
                Self::InvalidRequestBody(e.to_string())
            },
        }
    }
}
