//! # Action Module
//!
//! Derives the logical action name for a request from its URL path and HTTP
//! method. The resolved name is matched exactly (case-sensitive) against the
//! names a [`Controller`](crate::controller::Controller) registers.
//!
//! ## Resolution Rules
//!
//! 1. A single trailing `/` is ignored
//! 2. The last non-empty path segment is the candidate name; none means `Index`
//! 3. Anything from the first `.` onwards (a file extension) is dropped
//! 4. Only the first character is uppercased
//! 5. With the POST suffix convention enabled, POST requests get `_post` appended
//!
//! | Path             | Method | Suffix mode | Action        |
//! |------------------|--------|-------------|---------------|
//! | `/`              | GET    | on          | `Index`       |
//! | `/users.json`    | GET    | on          | `Users`       |
//! | `/mySettings`    | GET    | off         | `MySettings`  |
//! | `/login`         | POST   | on          | `Login_post`  |
//! | `/login`         | POST   | off         | `Login`       |
//!
//! Segments are used as-is: no percent-decoding and no sanitising happen
//! here, so a controller only ever sees names it explicitly registered.

mod resolver;

pub use resolver::{resolve_action, strip_post_suffix, DEFAULT_ACTION, POST_SUFFIX};
