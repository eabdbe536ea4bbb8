//! Alert system for displaying success and error messages to users.
//!
//! Alerts are rendered either into the page-level `#alert-container` via
//! htmx's `hx-target-error`, or inline next to the form that produced them.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

/// A dismissible message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Alert {
    Success { message: String, details: String },
    Error { message: String, details: String },
}

impl Alert {
    pub fn success(message: impl Into<String>, details: impl Into<String>) -> Self {
        Self::Success {
            message: message.into(),
            details: details.into(),
        }
    }

    pub fn error(message: impl Into<String>, details: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
            details: details.into(),
        }
    }

    pub fn into_html(self) -> Markup {
        let (container_style, message, details) = match self {
            Alert::Success { message, details } => (
                "flex items-start gap-3 p-4 text-sm rounded-lg border \
                text-green-800 bg-green-50 border-green-300 \
                dark:bg-gray-800 dark:text-green-400 dark:border-green-800",
                message,
                details,
            ),
            Alert::Error { message, details } => (
                "flex items-start gap-3 p-4 text-sm rounded-lg border \
                text-red-800 bg-red-50 border-red-300 \
                dark:bg-gray-800 dark:text-red-400 dark:border-red-800",
                message,
                details,
            ),
        };

        html!(
            div role="alert" class=(container_style)
            {
                div class="flex-1"
                {
                    p class="font-semibold" { (message) }

                    @if !details.is_empty() {
                        span class="block mt-1" { (details) }
                    }
                }

                button
                    type="button"
                    aria-label="Fechar"
                    data-dismiss-alert="true"
                    class="font-bold leading-none"
                {
                    "×"
                }
            }
        )
    }

    pub fn into_response_with_status(self, status: StatusCode) -> Response {
        (status, self.into_html()).into_response()
    }
}
