//! Error alerts for htmx requests.
//!
//! Alerts are rendered as HTML fragments that htmx swaps into the
//! `#alert-container` element defined in [crate::html::base].

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

const TEXT_STYLE: &str = "text-red-800 dark:text-red-400";

/// An error message with a short summary and optional details.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub message: String,
    pub details: String,
}

impl Alert {
    pub fn into_html(self) -> Markup {
        html! {
            div
                id="alert-container"
                hx-swap-oob="true"
                class="w-full max-w-md px-4"
                style="position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
            {
                div
                    role="alert"
                    class="p-4 mb-4 border rounded-lg border-red-300 bg-red-50 dark:bg-gray-800 dark:border-red-800"
                {
                    div class="flex items-center justify-between"
                    {
                        h3 class={ "text-lg font-medium " (TEXT_STYLE) } { (self.message) }

                        button
                            type="button"
                            class={ "ms-auto bg-transparent " (TEXT_STYLE) }
                            onclick="document.getElementById('alert-container').classList.add('hidden')"
                            aria-label="Close"
                        {
                            "✕"
                        }
                    }

                    @if !self.details.is_empty() {
                        div class={ "mt-2 mb-4 text-sm " (TEXT_STYLE) } { (self.details) }
                    }
                }
            }
        }
    }

    /// Render the alert with the given status code.
    pub fn into_response(self, status_code: StatusCode) -> Response {
        (status_code, self.into_html()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::{
        alert::Alert,
        test_utils::{
            assert_content_type, assert_valid_html, must_select, parse_html_fragment,
        },
    };

    #[tokio::test]
    async fn renders_alert_with_details() {
        let alert = Alert {
            message: "Invalid transaction".to_owned(),
            details: "description cannot be empty".to_owned(),
        };

        let response = alert.into_response(StatusCode::BAD_REQUEST);

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_content_type(&response, "text/html; charset=utf-8");
        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        let text = must_select(&html, "div[role=alert]")
            .text()
            .collect::<String>();
        assert!(text.contains("Invalid transaction"), "got {text:?}");
        assert!(text.contains("description cannot be empty"), "got {text:?}");
        assert_eq!(
            must_select(&html, "#alert-container")
                .value()
                .attr("hx-swap-oob"),
            Some("true")
        );
    }
}
