use http::{Method, Request, Response};

use super::ResponseWriter;
use crate::ids::{RequestId, REQUEST_ID_HEADER};

/// Inbound request plus outbound response sink for one request lifecycle.
///
/// Actions and filters receive `&mut Context`; they read the request and
/// communicate results only by writing to [`Context::response_mut`].
#[derive(Debug)]
pub struct Context {
    request_id: RequestId,
    request: Request<Vec<u8>>,
    response: ResponseWriter,
}

impl Context {
    /// Wrap an inbound request.
    ///
    /// The request id is taken from the `x-request-id` header when it holds
    /// a valid ULID, otherwise a fresh one is generated.
    #[must_use]
    pub fn new(request: Request<Vec<u8>>) -> Self {
        Self {
            request_id: RequestId::propagated_or_new(request.headers()),
            request,
            response: ResponseWriter::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn request_id(&self) -> RequestId {
        self.request_id
    }

    #[inline]
    #[must_use]
    pub fn request(&self) -> &Request<Vec<u8>> {
        &self.request
    }

    /// Path component of the request URI, without the query string.
    #[inline]
    #[must_use]
    pub fn path(&self) -> &str {
        self.request.uri().path()
    }

    #[inline]
    #[must_use]
    pub fn method(&self) -> &Method {
        self.request.method()
    }

    /// Decoded value of the named query parameter. Last occurrence wins.
    ///
    /// Names and values are form-decoded (`+` is a space, `%XX` escapes are
    /// expanded); a parameter without `=` has an empty value.
    #[must_use]
    pub fn query_param(&self, name: &str) -> Option<String> {
        let query = self.request.uri().query()?;
        url::form_urlencoded::parse(query.as_bytes())
            .filter(|(k, _)| k == name)
            .map(|(_, v)| v.into_owned())
            .last()
    }

    #[inline]
    #[must_use]
    pub fn response(&self) -> &ResponseWriter {
        &self.response
    }

    #[inline]
    pub fn response_mut(&mut self) -> &mut ResponseWriter {
        &mut self.response
    }

    /// Finish the request lifecycle and produce the outbound response.
    ///
    /// The request id is echoed in `x-request-id` unless an action already
    /// set that header.
    #[must_use]
    pub fn into_response(self) -> Response<Vec<u8>> {
        let mut response = self.response.into_response();
        if !response.headers().contains_key(REQUEST_ID_HEADER) {
            if let Some(value) = self.request_id.header_value() {
                response.headers_mut().insert(REQUEST_ID_HEADER, value);
            }
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(uri: &str) -> Context {
        Context::new(Request::get(uri).body(Vec::new()).unwrap())
    }

    #[test]
    fn test_path_excludes_query() {
        let c = ctx("/users/list?page=2");
        assert_eq!(c.path(), "/users/list");
        assert_eq!(c.method(), &Method::GET);
    }

    #[test]
    fn test_query_param_last_wins() {
        let c = ctx("/search?q=a&flag&q=b");
        assert_eq!(c.query_param("q").as_deref(), Some("b"));
        assert_eq!(c.query_param("flag").as_deref(), Some(""));
        assert_eq!(c.query_param("missing"), None);
    }

    #[test]
    fn test_query_param_is_form_decoded() {
        let c = ctx("/s?q=a+b&r=caf%C3%A9&na%6De=x");
        assert_eq!(c.query_param("q").as_deref(), Some("a b"));
        assert_eq!(c.query_param("r").as_deref(), Some("café"));
        assert_eq!(c.query_param("name").as_deref(), Some("x"));
        assert_eq!(ctx("/s").query_param("q"), None);
    }

    #[test]
    fn test_request_id_taken_from_header() {
        let id = RequestId::generate();
        let request = Request::get("/")
            .header(REQUEST_ID_HEADER, id.to_string())
            .body(Vec::new())
            .unwrap();
        assert_eq!(Context::new(request).request_id(), id);
    }

    #[test]
    fn test_response_echoes_request_id() {
        let c = ctx("/");
        let id = c.request_id().to_string();
        let response = c.into_response();
        assert_eq!(response.headers()[REQUEST_ID_HEADER], id.as_str());

        let mut c = ctx("/");
        c.response_mut()
            .headers_mut()
            .insert(REQUEST_ID_HEADER, http::HeaderValue::from_static("upstream"));
        assert_eq!(c.into_response().headers()[REQUEST_ID_HEADER], "upstream");
    }
}
