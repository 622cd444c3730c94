use crate::{api::Operation, data::RecordId};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::html;
use snafu::Snafu;
use std::{num::ParseIntError, str::ParseBoolError};

pub type DashboardResult<T> = Result<T, DashboardError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum DashboardError {
    #[snafu(display("Unable to retrieve env var `{}`", name))]
    BadEnvVar {
        source: dotenvy::Error,
        name: &'static str,
    },
    #[snafu(display("Unable to parse `{}` as a boolean", name))]
    ParseFlag {
        source: ParseBoolError,
        name: &'static str,
    },
    #[snafu(display("Unable to parse `{}` as a byte count", name))]
    ParseByteCount {
        source: ParseIntError,
        name: &'static str,
    },
    #[snafu(display("Error building HTTP client"))]
    BuildHttpClient { source: reqwest::Error },
    #[snafu(display("Error sending request to {}", operation))]
    ApiRequest {
        source: reqwest::Error,
        operation: Operation,
    },
    #[snafu(display("Got HTTP {} trying to {}", status, operation))]
    ApiStatus {
        status: reqwest::StatusCode,
        operation: Operation,
    },
    #[snafu(display("Error decoding response to {}", operation))]
    ApiDecode {
        source: reqwest::Error,
        operation: Operation,
    },
    #[snafu(display("Error with multipart form input"))]
    Multipart {
        source: axum::extract::multipart::MultipartError,
    },
    #[snafu(display("{:?} doesn't look like an image", file_name))]
    NotAnImage { file_name: String },
    #[snafu(display("Please fill in: {}", missing))]
    MissingFields { missing: String },
    #[snafu(display("Please enter a valid email address"))]
    Email { source: email_address::Error },
    #[snafu(display("Unable to find student with ID: {}", id))]
    MissingStudent { id: RecordId },
    #[snafu(display("There is no {:?} section", name))]
    UnknownSection { name: String },
}

impl IntoResponse for DashboardError {
    #[allow(clippy::match_same_arms)]
    fn into_response(self) -> Response {
        const ISE: StatusCode = StatusCode::INTERNAL_SERVER_ERROR; //internal server error
        const NF: StatusCode = StatusCode::NOT_FOUND; //not found
        const BI: StatusCode = StatusCode::BAD_REQUEST; //bad input
        const BG: StatusCode = StatusCode::BAD_GATEWAY; //remote api misbehaved

        let basic_error = |desc| {
            html! {
                div class="bg-red-100 border border-red-400 text-red-700 px-4 py-3 rounded relative mb-4" role="alert" {
                    strong class="font-bold" {"Dashboard Error "}
                    span {(desc)}
                }
            }
        };

        let status_code = match &self {
            Self::BadEnvVar { .. } | Self::ParseFlag { .. } | Self::ParseByteCount { .. } => ISE,
            Self::BuildHttpClient { .. } => ISE,
            Self::ApiRequest { .. } | Self::ApiStatus { .. } | Self::ApiDecode { .. } => BG,
            Self::Multipart { source } => source.status(),
            Self::NotAnImage { .. } => BI,
            Self::MissingFields { .. } | Self::Email { .. } => BI,
            Self::MissingStudent { .. } => NF,
            Self::UnknownSection { .. } => NF,
        };

        error!(?self, "Error!");
        (status_code, basic_error(self.to_string())).into_response()
    }
}
