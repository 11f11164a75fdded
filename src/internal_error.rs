use rocket::http::Status;
use rocket::response::{self, Responder};
use rocket::Request;
use thiserror::Error;
use tracing::error;

use std::sync::PoisonError;

use crate::habits::data::HabitID;

#[derive(Debug, Error)]
pub enum InternalError {
    #[error("habit {habit_id} does not exist")]
    NotFound { habit_id: HabitID },
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("sqlite: {0}")]
    Storage(#[from] rusqlite::Error),
    #[error("database connection poisoned: {0}")]
    Poisoned(String),
}

impl InternalError {
    pub fn invalid(what: impl Into<String>) -> InternalError {
        InternalError::InvalidArgument(what.into())
    }

    pub fn status(&self) -> Status {
        match self {
            InternalError::NotFound { .. } => Status::NotFound,
            InternalError::InvalidArgument(_) => Status::BadRequest,
            InternalError::Storage(_) | InternalError::Poisoned(_) => Status::InternalServerError,
        }
    }
}

impl<T> From<PoisonError<T>> for InternalError {
    fn from(e: PoisonError<T>) -> InternalError {
        InternalError::Poisoned(e.to_string())
    }
}

impl<'r> Responder<'r, 'static> for InternalError {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        let status = self.status();
        if status.code >= 500 {
            error!(uri = %request.uri(), error = %self, "request failed");
        }

        (status, self.to_string()).respond_to(request)
    }
}

pub type InternalResult<T> = Result<T, InternalError>;
