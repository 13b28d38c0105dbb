use std::error::Error as StdError;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use domain::error::{DomainErrorKind, EntityErrorKind, Error as DomainError, InternalErrorKind};

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    /// Failures bubbling up through the domain layer.
    Domain(DomainError),
    /// Malformed client input, rejected before any storage access.
    BadRequest(String),
}

impl StdError for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> core::result::Result<(), std::fmt::Error> {
        write!(fmt, "{self:?}")
    }
}

// List of possible StatusCode variants https://docs.rs/http/latest/http/status/struct.StatusCode.html#associatedconstant.UNPROCESSABLE_ENTITY
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::BadRequest(message) => (StatusCode::BAD_REQUEST, message).into_response(),
            Error::Domain(domain_error) => match domain_error.error_kind {
                DomainErrorKind::Internal(InternalErrorKind::Entity(entity_error_kind)) => {
                    match entity_error_kind {
                        EntityErrorKind::NotFound => {
                            (StatusCode::NOT_FOUND, "NOT FOUND").into_response()
                        }
                        EntityErrorKind::Invalid => {
                            (StatusCode::UNPROCESSABLE_ENTITY, "UNPROCESSABLE ENTITY")
                                .into_response()
                        }
                        EntityErrorKind::Other(_) => {
                            (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL SERVER ERROR")
                                .into_response()
                        }
                    }
                }
            },
        }
    }
}

impl<E> From<E> for Error
where
    E: Into<DomainError>,
{
    fn from(err: E) -> Self {
        Self::Domain(err.into())
    }
}
