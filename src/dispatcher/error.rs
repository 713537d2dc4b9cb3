use http::StatusCode;
use std::fmt;

use crate::action::strip_post_suffix;
use crate::controller::ArgMismatch;

/// Reported dispatch failure.
///
/// All variants are recovered at the dispatch boundary: the message is
/// written to the response and the host keeps serving other requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// The controller registers no action under the resolved name.
    ActionNotFound {
        action: String,
        controller: &'static str,
    },
    /// Fewer extra arguments than the action declares.
    ArgumentCountMismatch {
        action: String,
        controller: &'static str,
        required: usize,
        supplied: usize,
    },
    /// An extra argument of the wrong kind for its parameter slot.
    ArgumentTypeMismatch {
        action: String,
        controller: &'static str,
        mismatch: ArgMismatch,
    },
    /// The action panicked and panic recovery is enabled.
    ActionPanicked {
        action: String,
        controller: &'static str,
        message: String,
    },
}

impl DispatchError {
    /// HTTP status written for this error.
    ///
    /// Not-found and bad-argument failures share one status class and
    /// differ only in their message.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    #[must_use]
    pub fn action(&self) -> &str {
        match self {
            DispatchError::ActionNotFound { action, .. }
            | DispatchError::ArgumentCountMismatch { action, .. }
            | DispatchError::ArgumentTypeMismatch { action, .. }
            | DispatchError::ActionPanicked { action, .. } => action,
        }
    }

    #[must_use]
    pub fn controller(&self) -> &'static str {
        match self {
            DispatchError::ActionNotFound { controller, .. }
            | DispatchError::ArgumentCountMismatch { controller, .. }
            | DispatchError::ArgumentTypeMismatch { controller, .. }
            | DispatchError::ActionPanicked { controller, .. } => controller,
        }
    }
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::ActionNotFound { action, controller } => {
                write!(
                    f,
                    "No action named \"{}\" in {}.",
                    strip_post_suffix(action),
                    controller
                )
            }
            DispatchError::ArgumentCountMismatch {
                action,
                controller,
                required,
                supplied,
            } => {
                write!(
                    f,
                    "Can't inject into action, missing parameter ({} required, {} supplied). \
                    controller: {}, action: {}",
                    required, supplied, controller, action
                )
            }
            DispatchError::ArgumentTypeMismatch {
                action,
                controller,
                mismatch,
            } => {
                write!(
                    f,
                    "Can't inject into action, {}. controller: {}, action: {}",
                    mismatch, controller, action
                )
            }
            DispatchError::ActionPanicked {
                action,
                controller,
                message,
            } => {
                write!(
                    f,
                    "Action panicked: {}. controller: {}, action: {}",
                    message, controller, action
                )
            }
        }
    }
}

impl std::error::Error for DispatchError {}
