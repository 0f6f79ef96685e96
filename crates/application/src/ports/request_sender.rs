//! Request sender port
//!
//! Every outbound HTTP call goes through a `RequestSender`. Implementations
//! log each request and classify every failure into a `RequestError`, so
//! callers only ever match on a small, closed set of kinds.

use std::future::Future;

use porter_domain::{ApiRequest, ApiResponse, FormFields, Headers, RequestPayload};
use serde::Serialize;
use thiserror::Error;

/// Why a request could not complete at the network level.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportFailure {
    /// The request exceeded the transport timeout.
    #[error("request timed out")]
    Timeout,

    /// The host name could not be resolved.
    #[error("DNS resolution failed for {host}: {message}")]
    Dns {
        /// Host that failed to resolve.
        host: String,
        /// Underlying error message.
        message: String,
    },

    /// The server refused the connection.
    #[error("connection refused by {host}:{port}")]
    ConnectionRefused {
        /// Target host.
        host: String,
        /// Target port.
        port: u16,
    },

    /// The connection failed or was reset.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The redirect limit was exceeded.
    #[error("too many redirects (max {max})")]
    TooManyRedirects {
        /// Redirect limit.
        max: usize,
    },

    /// Any other transport problem.
    #[error("{0}")]
    Other(String),
}

/// Failure of a single request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// The request was rejected before anything was sent.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The server answered with a non-2xx status.
    #[error("{url} returned HTTP {status}")]
    Status {
        /// Request URL.
        url: String,
        /// Status code.
        status: u16,
        /// Response body, lossily decoded.
        body: String,
    },

    /// The request could not complete.
    #[error("request to {url} failed: {cause}")]
    Transport {
        /// Request URL.
        url: String,
        /// Classified cause.
        cause: TransportFailure,
    },

    /// Anything that is neither a status nor a transport failure.
    #[error("unexpected error for {url}: {message}")]
    Unexpected {
        /// Request URL.
        url: String,
        /// Error description.
        message: String,
    },
}

impl RequestError {
    /// Short machine-friendly name of the error kind, used as a log field.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidRequest(_) => "invalid_request",
            Self::Status { .. } => "http_status",
            Self::Transport { .. } => "transport",
            Self::Unexpected { .. } => "unexpected",
        }
    }

    /// Returns the HTTP status for status errors.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type alias for request operations.
pub type RequestResult<T> = Result<T, RequestError>;

/// Port for sending HTTP requests.
///
/// Implementors provide `send`; the verb helpers are thin specializations
/// that fix the method and the payload encoding.
pub trait RequestSender: Send + Sync {
    /// Sends a request and returns the decoded response.
    ///
    /// # Errors
    ///
    /// Returns a `RequestError` for invalid input, non-2xx statuses,
    /// transport failures, and anything unexpected.
    fn send(&self, request: ApiRequest) -> impl Future<Output = RequestResult<ApiResponse>> + Send;

    /// Sends a GET request.
    fn get(
        &self,
        url: &str,
        headers: Headers,
    ) -> impl Future<Output = RequestResult<ApiResponse>> + Send {
        self.send(ApiRequest::get(url).with_headers(headers))
    }

    /// Sends a POST request with a form-encoded body.
    fn post(
        &self,
        url: &str,
        headers: Headers,
        form: FormFields,
    ) -> impl Future<Output = RequestResult<ApiResponse>> + Send {
        self.send(
            ApiRequest::post(url)
                .with_headers(headers)
                .with_payload(RequestPayload::Form(form)),
        )
    }

    /// Sends a POST request with a JSON body.
    fn post_json<T: Serialize + ?Sized>(
        &self,
        url: &str,
        headers: Headers,
        body: &T,
    ) -> impl Future<Output = RequestResult<ApiResponse>> + Send {
        let request =
            json_payload(body).map(|p| ApiRequest::post(url).with_headers(headers).with_payload(p));
        async move { self.send(request?).await }
    }

    /// Sends a PUT request with a form-encoded body.
    fn put(
        &self,
        url: &str,
        headers: Headers,
        form: FormFields,
    ) -> impl Future<Output = RequestResult<ApiResponse>> + Send {
        self.send(
            ApiRequest::put(url)
                .with_headers(headers)
                .with_payload(RequestPayload::Form(form)),
        )
    }

    /// Sends a PUT request with a JSON body.
    fn put_json<T: Serialize + ?Sized>(
        &self,
        url: &str,
        headers: Headers,
        body: &T,
    ) -> impl Future<Output = RequestResult<ApiResponse>> + Send {
        let request =
            json_payload(body).map(|p| ApiRequest::put(url).with_headers(headers).with_payload(p));
        async move { self.send(request?).await }
    }
}

fn json_payload<T: Serialize + ?Sized>(body: &T) -> RequestResult<RequestPayload> {
    serde_json::to_value(body)
        .map(RequestPayload::Json)
        .map_err(|e| RequestError::InvalidRequest(format!("body is not serializable: {e}")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use porter_domain::{HttpMethod, ResponseBody};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::collections::BTreeMap;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Records every request and answers 200 with an empty JSON object.
    #[derive(Default)]
    struct RecordingSender {
        requests: Mutex<Vec<ApiRequest>>,
    }

    impl RecordingSender {
        fn last(&self) -> ApiRequest {
            self.requests.lock().unwrap().last().cloned().unwrap()
        }
    }

    impl RequestSender for RecordingSender {
        async fn send(&self, request: ApiRequest) -> RequestResult<ApiResponse> {
            self.requests.lock().unwrap().push(request);
            Ok(ApiResponse::new(
                200,
                Headers::new(),
                ResponseBody::Json(json!({})),
                Duration::from_millis(1),
            ))
        }
    }

    fn headers() -> Headers {
        BTreeMap::from([("X-Api-Key".to_string(), "secret".to_string())])
    }

    #[tokio::test]
    async fn test_get_fixes_method_and_headers() {
        let sender = RecordingSender::default();
        sender.get("https://api.example.com/workspaces", headers()).await.unwrap();

        let request = sender.last();
        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(request.headers, headers());
        assert!(request.payload.is_none());
    }

    #[tokio::test]
    async fn test_post_sends_form_fields() {
        let sender = RecordingSender::default();
        let form = FormFields::from([("name".to_string(), "QA".to_string())]);
        sender.post("https://api.example.com/items", Headers::new(), form.clone()).await.unwrap();

        let request = sender.last();
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.payload, RequestPayload::Form(form));
    }

    #[tokio::test]
    async fn test_put_json_serializes_body() {
        #[derive(Serialize)]
        struct Rename<'a> {
            name: &'a str,
        }

        let sender = RecordingSender::default();
        sender
            .put_json("https://api.example.com/items/1", Headers::new(), &Rename { name: "QA" })
            .await
            .unwrap();

        let request = sender.last();
        assert_eq!(request.method, HttpMethod::Put);
        assert_eq!(request.payload, RequestPayload::Json(json!({"name": "QA"})));
    }

    #[tokio::test]
    async fn test_unserializable_json_body_is_rejected_before_sending() {
        let sender = RecordingSender::default();
        let key_is_not_a_string = BTreeMap::from([((1, 2), "value")]);

        let result = sender
            .post_json("https://api.example.com/items", Headers::new(), &key_is_not_a_string)
            .await;

        assert!(matches!(result, Err(RequestError::InvalidRequest(_))));
        assert!(sender.requests.lock().unwrap().is_empty());
    }

    #[test]
    fn test_error_kind_and_status() {
        let error = RequestError::Status {
            url: "https://api.example.com/workspaces".to_string(),
            status: 401,
            body: "{}".to_string(),
        };
        assert_eq!(error.kind(), "http_status");
        assert_eq!(error.status(), Some(401));

        let error = RequestError::Transport {
            url: "https://api.example.com".to_string(),
            cause: TransportFailure::Timeout,
        };
        assert_eq!(error.kind(), "transport");
        assert_eq!(error.status(), None);
    }
}
