//! # Context Module
//!
//! The per-request bundle handed to every action: the inbound
//! [`http::Request`] and a buffered [`ResponseWriter`]. The host HTTP layer
//! builds a [`Context`] for each request, dispatches, then turns it into an
//! [`http::Response`] with [`Context::into_response`].
//!
//! ```rust
//! use gof::context::Context;
//! use http::StatusCode;
//!
//! let request = http::Request::post("/login").body(b"user=ann".to_vec()).unwrap();
//! let mut ctx = Context::new(request);
//! assert_eq!(ctx.path(), "/login");
//!
//! ctx.response_mut().error(StatusCode::FORBIDDEN, "denied");
//! let response = ctx.into_response();
//! assert_eq!(response.status(), StatusCode::FORBIDDEN);
//! assert_eq!(response.body(), b"denied\n");
//! ```

mod core;
mod response;

pub use core::Context;
pub use response::ResponseWriter;
