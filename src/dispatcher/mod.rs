//! # Dispatcher Module
//!
//! Resolves an action on a controller, validates the caller's extra
//! arguments against it, invokes it, and runs the controller's filter hooks
//! around the call.
//!
//! ## Entry Points
//!
//! - [`dispatch`] - path dispatch: the action name is resolved from the
//!   context's path and method
//! - [`dispatch_action`] - named dispatch: the caller already knows the action
//! - [`Dispatcher`] - the same two operations driven by a [`RuntimeConfig`],
//!   with an optional cache of per-type action tables and optional panic
//!   recovery
//!
//! The free functions hold no state at all; every call rebuilds the
//! controller's [`ActionTable`](crate::controller::ActionTable).
//!
//! ## Request Flow
//!
//! 1. Filter gate (`Filter::requesting`); `false` ends the dispatch as [`Dispatched::Halted`]
//! 2. Exact-name lookup; a miss is [`DispatchError::ActionNotFound`]
//! 3. Arity check; too few extra arguments is [`DispatchError::ArgumentCountMismatch`],
//!    surplus arguments are ignored
//! 4. Argument conversion; a wrong kind is [`DispatchError::ArgumentTypeMismatch`]
//!    and the action is not called
//! 5. Invocation with the context first, then the selected arguments
//! 6. Filter post hook (`Filter::request_end`)
//!
//! ## Error Handling
//!
//! Every [`DispatchError`] is logged and written to the response as a
//! `500 Internal Server Error` before it is returned, so a host that ignores
//! the result still answers the client. Failures never skip into the post
//! hook.
//!
//! [`RuntimeConfig`]: crate::runtime_config::RuntimeConfig

mod cache;
mod core;
mod error;

pub use cache::ActionCache;
pub use core::{dispatch, dispatch_action, Dispatched, Dispatcher};
pub use error::DispatchError;
