use http::header::{HeaderName, HeaderValue, CONTENT_TYPE, X_CONTENT_TYPE_OPTIONS};
use http::{HeaderMap, Response, StatusCode};
use serde_json::Value;

/// Buffered response sink.
///
/// Nothing is sent while the request is being dispatched; the host turns the
/// buffered status, headers and body into an [`http::Response`] afterwards.
#[derive(Debug, Clone)]
pub struct ResponseWriter {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl Default for ResponseWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseWriter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: Vec::new(),
        }
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn set_status(&mut self, status: StatusCode) {
        self.status = status;
    }

    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// Add or replace a header.
    pub fn set_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers.insert(name, value);
    }

    /// Get a header as text, if present and valid UTF-8.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Body as text, lossily decoded.
    #[must_use]
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Append raw bytes to the body.
    pub fn write(&mut self, bytes: &[u8]) {
        self.body.extend_from_slice(bytes);
    }

    pub fn write_str(&mut self, text: &str) {
        self.write(text.as_bytes());
    }

    /// Replace the body with a JSON document.
    pub fn json(&mut self, status: StatusCode, body: &Value) {
        self.status = status;
        self.set_header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        self.body = body.to_string().into_bytes();
    }

    /// Replace the body with a plain-text error message.
    ///
    /// Anything buffered so far is discarded; the message is terminated with
    /// a newline.
    pub fn error(&mut self, status: StatusCode, message: &str) {
        self.status = status;
        self.set_header(
            CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        );
        self.set_header(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
        self.body.clear();
        self.body.extend_from_slice(message.as_bytes());
        self.body.push(b'\n');
    }

    #[must_use]
    pub fn into_response(self) -> Response<Vec<u8>> {
        let mut response = Response::new(self.body);
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        response
    }
}
