//! Request specification type

use std::collections::BTreeMap;

use super::HttpMethod;

/// HTTP headers keyed by name.
pub type Headers = BTreeMap<String, String>;

/// Fields of a form-encoded body.
pub type FormFields = BTreeMap<String, String>;

/// Body attached to an outgoing request.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestPayload {
    /// No body
    #[default]
    None,
    /// `application/x-www-form-urlencoded` fields
    Form(FormFields),
    /// JSON document
    Json(serde_json::Value),
    /// Raw bytes sent with an explicit content type
    Raw {
        /// Body bytes
        content: Vec<u8>,
        /// Content type sent with the body
        content_type: String,
    },
}

impl RequestPayload {
    /// Returns the content type implied by this payload, if any.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        match self {
            Self::None => None,
            Self::Form(_) => Some("application/x-www-form-urlencoded"),
            Self::Json(_) => Some("application/json"),
            Self::Raw { content_type, .. } => Some(content_type),
        }
    }

    /// Returns true when there is no body.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// A single HTTP call to be performed by a request sender.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP method
    pub method: HttpMethod,
    /// Absolute target URL
    pub url: String,
    /// Request headers
    pub headers: Headers,
    /// Request body
    pub payload: RequestPayload,
}

impl ApiRequest {
    /// Creates a request without headers or body.
    #[must_use]
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Headers::new(),
            payload: RequestPayload::None,
        }
    }

    /// Creates a GET request with the given URL.
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    /// Creates a POST request with the given URL.
    #[must_use]
    pub fn post(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, url)
    }

    /// Creates a PUT request with the given URL.
    #[must_use]
    pub fn put(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, url)
    }

    /// Replaces the headers.
    #[must_use]
    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = headers;
        self
    }

    /// Adds or replaces one header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Replaces the body.
    #[must_use]
    pub fn with_payload(mut self, payload: RequestPayload) -> Self {
        self.payload = payload;
        self
    }

    /// Returns true if a header with this name is set, ignoring case.
    #[must_use]
    pub fn has_header(&self, name: &str) -> bool {
        self.headers.keys().any(|k| k.eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_get_request() {
        let req = ApiRequest::get("https://api.example.com/workspaces");
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "https://api.example.com/workspaces");
        assert!(req.payload.is_none());
    }

    #[test]
    fn test_has_header_ignores_case() {
        let req =
            ApiRequest::get("https://api.example.com").with_header("Content-Type", "text/plain");
        assert!(req.has_header("content-type"));
        assert!(!req.has_header("accept"));
    }

    #[test]
    fn test_payload_content_types() {
        assert_eq!(RequestPayload::None.content_type(), None);
        assert_eq!(
            RequestPayload::Form(FormFields::new()).content_type(),
            Some("application/x-www-form-urlencoded")
        );
        assert_eq!(
            RequestPayload::Json(json!({"a": 1})).content_type(),
            Some("application/json")
        );
        let raw = RequestPayload::Raw {
            content: b"<a/>".to_vec(),
            content_type: "application/xml".to_string(),
        };
        assert_eq!(raw.content_type(), Some("application/xml"));
    }
}
