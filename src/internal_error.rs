use rocket::figment;
use rocket::http::Status;
use rocket::response::{self, Responder};
use rocket::serde::json::Json;
use rocket::Request;
use serde::Serialize;

use std::error::Error;
use std::fmt;

use crate::backend::BackendError;

#[derive(Debug)]
pub struct InternalError {
    what: String,
}

impl Error for InternalError {}
impl fmt::Display for InternalError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Generic internal error: {}", self.what)
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

impl<'r> Responder<'r, 'static> for InternalError {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        tracing::error!(uri = %request.uri(), error = %self, "request failed");
        (
            Status::InternalServerError,
            Json(ErrorBody {
                error: "internal error",
            }),
        )
            .respond_to(request)
    }
}

impl From<BackendError> for InternalError {
    fn from(e: BackendError) -> InternalError {
        InternalError {
            what: e.to_string(),
        }
    }
}

impl From<figment::Error> for InternalError {
    fn from(e: figment::Error) -> InternalError {
        InternalError {
            what: e.to_string(),
        }
    }
}

impl From<String> for InternalError {
    fn from(what: String) -> InternalError {
        InternalError { what }
    }
}

pub type InternalResult<T> = Result<T, InternalError>;
