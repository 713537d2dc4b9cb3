//! Request correlation ids.
//!
//! Each [`Context`](crate::context::Context) gets one [`RequestId`]. A host
//! that already assigned an id upstream passes it in the `x-request-id`
//! header; the same header is echoed on the outbound response so both sides
//! log the same value.

use http::{HeaderMap, HeaderValue};
use std::fmt;
use ulid::Ulid;

/// Header carrying the request id in both directions.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// ULID identifying one request lifecycle in dispatch logs.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct RequestId(Ulid);

impl RequestId {
    #[must_use]
    pub fn generate() -> Self {
        Self(Ulid::new())
    }

    /// Id propagated in `headers`, or a fresh one when the header is absent
    /// or not a ULID.
    #[must_use]
    pub fn propagated_or_new(headers: &HeaderMap) -> Self {
        headers
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| Ulid::from_string(s.trim()).ok())
            .map_or_else(Self::generate, Self)
    }

    #[must_use]
    pub fn as_ulid(&self) -> Ulid {
        self.0
    }

    /// The id as a header value for the outbound response.
    #[must_use]
    pub fn header_value(&self) -> Option<HeaderValue> {
        HeaderValue::from_str(&self.0.to_string()).ok()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(value: &str) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(REQUEST_ID_HEADER, HeaderValue::from_str(value).unwrap());
        map
    }

    #[test]
    fn test_propagated_id_is_kept() {
        let id = RequestId::generate();
        let padded = format!(" {id} ");
        assert_eq!(RequestId::propagated_or_new(&headers(&padded)), id);
    }

    #[test]
    fn test_garbage_or_missing_header_generates() {
        let a = RequestId::propagated_or_new(&headers("not-a-ulid"));
        let b = RequestId::propagated_or_new(&HeaderMap::new());
        assert_ne!(a, b);
    }

    #[test]
    fn test_header_value_matches_display() {
        let id = RequestId::generate();
        let value = id.header_value().unwrap();
        assert_eq!(value.to_str().unwrap(), id.to_string());
        assert_eq!(id.as_ulid().to_string(), id.to_string());
    }
}
