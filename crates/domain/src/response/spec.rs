//! Response specification type
//!
//! Contains types for representing HTTP responses including
//! status codes, headers, the decoded body, and timing information.

use std::time::Duration;

use crate::error::{DomainError, DomainResult};
use crate::request::Headers;

/// HTTP status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusCode(pub u16);

impl StatusCode {
    /// Creates a new `StatusCode`.
    #[must_use]
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Returns the numeric status code.
    #[must_use]
    pub const fn as_u16(&self) -> u16 {
        self.0
    }

    /// Returns true if this is a 2xx success status.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.0 >= 200 && self.0 < 300
    }
}

impl From<u16> for StatusCode {
    fn from(code: u16) -> Self {
        Self(code)
    }
}

/// Response body, decoded according to its content type.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// Parsed JSON document (JSON content types)
    Json(serde_json::Value),
    /// UTF-8 text (textual content types)
    Text(String),
    /// Anything else, untouched
    Bytes(Vec<u8>),
}

impl ResponseBody {
    /// Returns the parsed document for JSON bodies.
    #[must_use]
    pub const fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }
}

/// A successful HTTP response.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Response headers, names lowercased.
    pub headers: Headers,
    /// Decoded body.
    pub body: ResponseBody,
    /// Time between sending the request and reading the full body.
    pub duration: Duration,
}

impl ApiResponse {
    /// Creates a new `ApiResponse`.
    #[must_use]
    pub fn new(
        status: impl Into<StatusCode>,
        headers: Headers,
        body: ResponseBody,
        duration: Duration,
    ) -> Self {
        Self {
            status: status.into(),
            headers,
            body,
            duration,
        }
    }

    /// Returns the Content-Type header value, if present.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("content-type"))
            .map(|(_, v)| v.as_str())
    }

    /// Consumes the response and returns its body as a JSON document.
    ///
    /// Text and byte bodies are parsed, so a server that omits the JSON
    /// content type still yields a document.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotJson` if the body does not parse.
    pub fn into_json(self) -> DomainResult<serde_json::Value> {
        match self.body {
            ResponseBody::Json(value) => Ok(value),
            ResponseBody::Text(text) => {
                serde_json::from_str(&text).map_err(|e| DomainError::NotJson(e.to_string()))
            }
            ResponseBody::Bytes(bytes) => {
                serde_json::from_slice(&bytes).map_err(|e| DomainError::NotJson(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn response(body: ResponseBody) -> ApiResponse {
        ApiResponse::new(200, Headers::new(), body, Duration::from_millis(5))
    }

    #[test]
    fn test_status_code_success_range() {
        assert!(StatusCode::new(200).is_success());
        assert!(StatusCode::new(299).is_success());
        assert!(!StatusCode::new(199).is_success());
        assert!(!StatusCode::new(302).is_success());
        assert!(!StatusCode::new(401).is_success());
    }

    #[test]
    fn test_into_json_passes_parsed_document_through() {
        let doc = json!({"collection": {"info": {"name": "API Tests"}}});
        let result = response(ResponseBody::Json(doc.clone())).into_json().unwrap();
        assert_eq!(result, doc);
    }

    #[test]
    fn test_into_json_parses_text_body() {
        let result = response(ResponseBody::Text(r#"{"ok":true}"#.to_string()))
            .into_json()
            .unwrap();
        assert_eq!(result, json!({"ok": true}));
    }

    #[test]
    fn test_into_json_rejects_non_json() {
        let result = response(ResponseBody::Bytes(vec![0xff, 0x00])).into_json();
        assert!(matches!(result, Err(DomainError::NotJson(_))));
    }

    #[test]
    fn test_content_type_lookup_ignores_case() {
        let mut headers = Headers::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        let response =
            ApiResponse::new(200, headers, ResponseBody::Text(String::new()), Duration::ZERO);
        assert_eq!(response.content_type(), Some("application/json"));
    }
}
