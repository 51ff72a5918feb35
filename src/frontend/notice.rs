use crate::{api::ApiError, maud_conveniences::toggle_element};
use maud::{Markup, Render, html};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Failure(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Self::Success(m) | Self::Failure(m) => m,
        }
    }

    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }
}

impl Render for Notice {
    fn render(&self) -> Markup {
        let (class, heading) = match self {
            Self::Success(_) => (
                "bg-green-100 border border-green-400 text-green-700 px-4 py-3 rounded relative mb-4",
                "Done",
            ),
            Self::Failure(_) => (
                "bg-red-100 border border-red-400 text-red-700 px-4 py-3 rounded relative mb-4",
                "Something went wrong",
            ),
        };

        toggle_element(
            html! {
                div class=(class) role="alert" {
                    strong class="font-bold mr-2" {(heading)}
                    span {(self.message())}
                }
            },
            true,
        )
    }
}

/// Turns a failed API call into something to show the user. Swap the implementation to change
/// how failures surface without touching any caller.
pub trait ErrorReporter: Send + Sync {
    fn report(&self, context: &str, error: &ApiError) -> Notice;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl ErrorReporter for LogReporter {
    fn report(&self, context: &str, error: &ApiError) -> Notice {
        handle_api_error(context, error)
    }
}

pub fn handle_api_error(context: &str, error: &ApiError) -> Notice {
    if error.is_not_found() {
        warn!(?error, context, "API Error");
    } else {
        error!(?error, context, "API Error");
    }

    Notice::Failure(match error {
        ApiError::NotFound { id } => format!("{context}: no student with id {id:?} was found"),
        _ => format!("{context}: {error}"),
    })
}
