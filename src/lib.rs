//! # gof
//!
//! **gof** maps an inbound request path to a named action on a controller,
//! injects the request context plus caller-supplied arguments into that
//! action, and wraps the call in optional filter hooks.
//!
//! ## Architecture
//!
//! - **[`action`]** - Action name resolution from a URL path and HTTP method
//! - **[`context`]** - Per-request context: inbound request plus buffered response sink
//! - **[`controller`]** - The `Controller`/`Filter` traits, action tables and typed arguments
//! - **[`dispatcher`]** - Lookup, arity and type validation, invocation, filter hooks
//! - **[`runtime_config`]** - Environment-driven dispatch configuration
//! - **[`logging`]** - `tracing` subscriber setup (levels, colour, JSON, file output)
//! - **[`storage`]** - Key-value storage abstraction with an in-memory backend
//!
//! ### Request Handling Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Host as Host HTTP layer
//!     participant Resolver as action::resolve_action
//!     participant Dispatcher
//!     participant Filter
//!     participant Action as Controller action
//!
//!     Host->>Dispatcher: handle(controller, ctx, args)
//!     Dispatcher->>Resolver: path + method
//!     Resolver-->>Dispatcher: "Login_post"
//!     Dispatcher->>Filter: requesting(ctx)
//!     alt gate returns false
//!         Filter-->>Host: Halted
//!     end
//!     Dispatcher->>Dispatcher: table lookup, arity + type checks
//!     alt lookup or validation fails
//!         Dispatcher-->>Host: 500 written to ctx.response
//!     end
//!     Dispatcher->>Action: invoke(ctx, args..)
//!     Dispatcher->>Filter: request_end(ctx)
//!     Dispatcher-->>Host: Completed
//! ```
//!
//! ## Example
//!
//! ```rust
//! use gof::context::Context;
//! use gof::controller::{ActionTable, Controller};
//! use gof::dispatcher::{dispatch, Dispatched};
//!
//! struct Users;
//!
//! impl Users {
//!     fn show(&self, ctx: &mut Context, id: i64) {
//!         ctx.response_mut().write_str(&format!("user {id}"));
//!     }
//! }
//!
//! impl Controller for Users {
//!     fn actions(table: &mut ActionTable<Self>) {
//!         table.action("Show", Users::show);
//!     }
//! }
//!
//! let request = http::Request::get("/users/show").body(Vec::new()).unwrap();
//! let mut ctx = Context::new(request);
//! let outcome = dispatch(&Users, &mut ctx, true, &[7i64.into()]);
//! assert_eq!(outcome.unwrap(), Dispatched::Completed);
//! assert_eq!(ctx.response().body(), b"user 7");
//! ```

pub mod action;
pub mod context;
pub mod controller;
pub mod dispatcher;
pub mod ids;
pub mod logging;
pub mod runtime_config;
pub mod storage;

pub use action::resolve_action;
pub use context::{Context, ResponseWriter};
pub use controller::{Action, ActionTable, Arg, ArgVec, Controller, Filter, FromArg};
pub use dispatcher::{dispatch, dispatch_action, DispatchError, Dispatched, Dispatcher};
pub use gof_macros::controller;
pub use runtime_config::RuntimeConfig;
