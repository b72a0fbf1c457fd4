use std::collections::HashMap;

/// The only method that is served; every other token gets 405.
pub const GET: &str = "GET";

/// A request as read off the wire.
///
/// `method` and `path` keep the raw tokens from the request line, so a
/// malformed or empty request line shows up as empty strings rather than
/// an error. The query string, if any, stays part of `path`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Request {
    /// Method token, e.g. "GET"
    pub method: String,
    /// Request target including the leading slash, e.g. "/index.html"
    pub path: String,
    /// Header names are case-sensitive; the last duplicate wins
    pub headers: HashMap<String, String>,
    /// The single line following the blank separator line
    pub body: String,
}

impl Request {
    /// Whether the method token is exactly `GET` (case-sensitive).
    ///
    /// ```
    /// # use basic_server::http::request::Request;
    /// let req = Request { method: "get".to_string(), ..Request::default() };
    /// assert!(!req.is_get());
    /// ```
    pub fn is_get(&self) -> bool {
        self.method == GET
    }

    /// Retrieves a header value by its exact name.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(|v| v.as_str())
    }
}
