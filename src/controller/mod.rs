//! # Controller Module
//!
//! Defines what a controller is and how its actions are found and called.
//!
//! ## Overview
//!
//! A controller is any type implementing [`Controller`]. Instead of looking
//! members up by name at runtime, each controller type registers its actions
//! into an [`ActionTable`]: a map from the exact action name to a handler
//! function. An action the resolver produces but the table lacks is simply a
//! miss.
//!
//! Handlers are plain functions or methods whose first two parameters are
//! the controller and the request [`Context`](crate::context::Context);
//! every further parameter is filled from the caller's extra arguments:
//!
//! ```rust
//! use gof::context::Context;
//! use gof::controller::{ActionTable, Controller};
//!
//! struct Orders;
//!
//! impl Orders {
//!     fn index(&self, ctx: &mut Context) {
//!         ctx.response_mut().write_str("all orders");
//!     }
//!
//!     fn cancel_post(&self, ctx: &mut Context, order_id: i64, reason: String) {
//!         ctx.response_mut().write_str(&format!("cancelled {order_id}: {reason}"));
//!     }
//! }
//!
//! impl Controller for Orders {
//!     fn actions(table: &mut ActionTable<Self>) {
//!         table
//!             .action("Index", Orders::index)
//!             .action("Cancel_post", Orders::cancel_post);
//!     }
//! }
//!
//! let table = ActionTable::<Orders>::build();
//! assert_eq!(table.get("Cancel_post").unwrap().required_args(), 2);
//! ```
//!
//! ## Extra Arguments
//!
//! Extra arguments travel as tagged [`Arg`] values and are converted into
//! handler parameters with [`FromArg`]. A value of the wrong kind is caught
//! before the handler runs and reported as an [`ArgMismatch`].
//!
//! ## Filters
//!
//! A controller opts into pre/post hooks by implementing [`Filter`] and
//! returning itself from [`Controller::as_filter`].

mod args;
mod core;
mod table;

pub use args::{Arg, ArgMismatch, ArgVec, FromArg, MAX_INLINE_ARGS};
pub use core::{Controller, Filter};
pub use table::{Action, ActionTable, IntoAction};

/// Build an [`ArgVec`] from values convertible into [`Arg`].
///
/// ```rust
/// let args = gof::args![42i64, "alice", true];
/// assert_eq!(args.len(), 3);
/// ```
#[macro_export]
macro_rules! args {
    () => {
        $crate::controller::ArgVec::new()
    };
    ($($value:expr),+ $(,)?) => {
        [$($crate::controller::Arg::from($value)),+]
            .into_iter()
            .collect::<$crate::controller::ArgVec>()
    };
}
