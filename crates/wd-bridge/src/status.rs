use axum::http::StatusCode;
use serde::{Serialize, Serializer};

/// Legacy JSON wire protocol status codes carried in every response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WdStatus {
    Success,
    NoSuchDriver,
    NoSuchElement,
    UnknownCommand,
    UnknownError,
    SessionNotCreated,
    JsonDecoderError,
}

impl WdStatus {
    pub fn code(&self) -> u32 {
        match self {
            WdStatus::Success => 0,
            WdStatus::NoSuchDriver => 6,
            WdStatus::NoSuchElement => 7,
            WdStatus::UnknownCommand => 9,
            WdStatus::UnknownError => 13,
            WdStatus::SessionNotCreated => 33,
            WdStatus::JsonDecoderError => 35,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            WdStatus::Success => "The command executed successfully.",
            WdStatus::NoSuchDriver => "A session is either terminated or not started",
            WdStatus::NoSuchElement => {
                "An element could not be located on the page using the given search parameters."
            }
            WdStatus::UnknownCommand => {
                "The requested resource could not be found, or a request was received using an HTTP method that is not supported by the mapped resource."
            }
            WdStatus::UnknownError => {
                "An unknown server-side error occurred while processing the command."
            }
            WdStatus::SessionNotCreated => "A new session could not be created.",
            WdStatus::JsonDecoderError => "Unable to decode the request body as JSON.",
        }
    }

    pub fn http_status(&self) -> StatusCode {
        match self {
            WdStatus::Success => StatusCode::OK,
            WdStatus::NoSuchDriver | WdStatus::NoSuchElement | WdStatus::UnknownCommand => {
                StatusCode::NOT_FOUND
            }
            WdStatus::JsonDecoderError => StatusCode::BAD_REQUEST,
            WdStatus::UnknownError | WdStatus::SessionNotCreated => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl Serialize for WdStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.code())
    }
}
