//! The page to display when the server cannot handle a request.
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::html::error_view;

/// Renders the 500 page with a description of the problem and a suggested fix.
#[derive(Debug)]
pub struct InternalServerError {
    description: String,
    fix: String,
}

impl InternalServerError {
    pub fn new(description: &str, fix: &str) -> Self {
        Self {
            description: description.to_owned(),
            fix: fix.to_owned(),
        }
    }

    /// The page for a server configured with an unknown timezone.
    pub fn invalid_timezone(timezone: &str) -> Self {
        Self::new("Invalid Timezone Settings", &invalid_timezone_fix(timezone))
    }
}

impl Default for InternalServerError {
    fn default() -> Self {
        Self::new(
            "Sorry, something went wrong.",
            "Try again later or check the server logs",
        )
    }
}

impl IntoResponse for InternalServerError {
    fn into_response(self) -> Response {
        let page = error_view("Internal Server Error", "500", &self.description, &self.fix);

        (StatusCode::INTERNAL_SERVER_ERROR, Html(page.into_string())).into_response()
    }
}

/// How to fix a timezone setting that is not a canonical timezone name.
pub fn invalid_timezone_fix(timezone: &str) -> String {
    format!(
        "Could not get local timezone \"{timezone}\". Check your server settings and \
        ensure the timezone has been set to valid, canonical timezone string"
    )
}
