//! JSON response envelopes.
//!
//! Bodies are pretty-printed with a tab indent and keys in declaration order,
//! so identical values always render to identical bytes.

use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use devreg_domain::device::Device;

/// `status` value of the add-device success envelope.
pub const INSERTED: &str = "requested item inserted";

/// Message of every 500 envelope. Internal detail is never sent.
pub const INTERNAL_ERROR: &str = "Internal Server's Error occured";

#[derive(Serialize)]
struct Inserted<'a> {
    status: &'static str,
    data: &'a Device,
}

#[derive(Serialize)]
struct Found<'a> {
    data: &'a Device,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: ErrorMessage<'a>,
}

#[derive(Serialize)]
struct ErrorMessage<'a> {
    code: i32,
    message: &'a str,
}

/// A rendered envelope and the status it goes out with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    status: StatusCode,
    body: String,
}

impl Envelope {
    /// `201` with `{"status": ..., "data": device}`.
    #[must_use]
    pub fn created(device: &Device) -> Self {
        Self::render(
            StatusCode::CREATED,
            &Inserted {
                status: INSERTED,
                data: device,
            },
        )
    }

    /// `200` with `{"data": device}`.
    #[must_use]
    pub fn found(device: &Device) -> Self {
        Self::render(StatusCode::OK, &Found { data: device })
    }

    /// `{"error": {"code", "message"}}` sent with `status`.
    ///
    /// `code` is written as given; it is not checked against `status`.
    #[must_use]
    pub fn error(status: StatusCode, code: i32, message: &str) -> Self {
        Self::render(
            status,
            &ErrorBody {
                error: ErrorMessage { code, message },
            },
        )
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    fn render<T: Serialize>(status: StatusCode, value: &T) -> Self {
        let mut buf = Vec::with_capacity(256);
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"\t"));
        match value.serialize(&mut serializer) {
            Ok(()) => Self {
                status,
                body: String::from_utf8_lossy(&buf).into_owned(),
            },
            Err(err) => {
                tracing::error!(error = %err, "failed to render response envelope");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    body: String::new(),
                }
            }
        }
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        (self.status, [(CONTENT_TYPE, "application/json")], self.body).into_response()
    }
}
