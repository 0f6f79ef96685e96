//! Request sender implementation using reqwest.
//!
//! This adapter implements the `RequestSender` port. It is the single place
//! where HTTP failures are classified and logged.

use std::error::Error as StdError;
use std::io;
use std::time::Instant;

use porter_application::ports::{RequestError, RequestResult, RequestSender, TransportFailure};
use porter_domain::{
    ApiRequest, ApiResponse, Headers, HttpMethod, RequestPayload, ResponseBody, StatusCode,
};
use reqwest::{Client, Method, RequestBuilder, Url};
use tracing::{error, info};

/// Redirects followed before giving up.
const MAX_REDIRECTS: usize = 10;

const USER_AGENT: &str = concat!("porter/", env!("CARGO_PKG_VERSION"));

/// Request sender backed by `reqwest::Client`.
pub struct ReqwestRequestSender {
    client: Client,
}

impl ReqwestRequestSender {
    /// Creates a sender with default settings.
    ///
    /// Default configuration:
    /// - Follow redirects: up to 10
    /// - TLS verification: enabled
    /// - User-Agent: "porter/<version>"
    /// - No request deadline beyond the transport defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new() -> RequestResult<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| RequestError::Unexpected {
                url: String::new(),
                message: format!("failed to build HTTP client: {}", error_chain(&e)),
            })?;

        Ok(Self { client })
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
        }
    }

    /// Attaches the encoded payload to the builder.
    fn apply_payload(
        builder: RequestBuilder,
        payload: &RequestPayload,
    ) -> RequestResult<RequestBuilder> {
        match payload {
            RequestPayload::None => Ok(builder),
            RequestPayload::Form(fields) => {
                let encoded = serde_urlencoded::to_string(fields)
                    .map_err(|e| RequestError::InvalidRequest(format!("invalid form body: {e}")))?;
                Ok(builder.body(encoded))
            }
            RequestPayload::Json(value) => {
                let encoded = serde_json::to_vec(value)
                    .map_err(|e| RequestError::InvalidRequest(format!("invalid JSON body: {e}")))?;
                Ok(builder.body(encoded))
            }
            RequestPayload::Raw { content, .. } => Ok(builder.body(content.clone())),
        }
    }

    /// Classifies a reqwest failure into a request error.
    fn map_error(error: &reqwest::Error, url: &str) -> RequestError {
        if error.is_builder() {
            return RequestError::InvalidRequest(error_chain(error));
        }

        if error.is_decode() {
            return RequestError::Unexpected {
                url: url.to_string(),
                message: error_chain(error),
            };
        }

        RequestError::Transport {
            url: url.to_string(),
            cause: Self::transport_failure(error),
        }
    }

    fn transport_failure(error: &reqwest::Error) -> TransportFailure {
        if error.is_timeout() {
            return TransportFailure::Timeout;
        }

        if error.is_redirect() {
            return TransportFailure::TooManyRedirects { max: MAX_REDIRECTS };
        }

        let message = error_chain(error);
        if error.is_connect() {
            let host = error
                .url()
                .and_then(Url::host_str)
                .unwrap_or("unknown")
                .to_string();
            let lower = message.to_lowercase();
            if lower.contains("dns") || lower.contains("resolve") {
                return TransportFailure::Dns { host, message };
            }
            if io_error_kind(error) == Some(io::ErrorKind::ConnectionRefused)
                || lower.contains("refused")
            {
                return TransportFailure::ConnectionRefused {
                    host,
                    port: error
                        .url()
                        .and_then(Url::port_or_known_default)
                        .unwrap_or(80),
                };
            }
            return TransportFailure::ConnectionFailed(message);
        }

        TransportFailure::Other(message)
    }

    /// Decodes a body according to its content type.
    ///
    /// JSON types (`application/json`, `*+json`) are parsed, `text/*` that
    /// is valid UTF-8 becomes text, everything else stays as bytes.
    fn decode_body(content_type: Option<&str>, bytes: Vec<u8>) -> Result<ResponseBody, String> {
        if bytes.is_empty() {
            return Ok(ResponseBody::Bytes(bytes));
        }

        let mime = content_type.and_then(|ct| ct.parse::<mime::Mime>().ok());
        match mime {
            Some(m) if m.subtype() == mime::JSON || m.suffix() == Some(mime::JSON) => {
                serde_json::from_slice(&bytes)
                    .map(ResponseBody::Json)
                    .map_err(|e| format!("invalid JSON body: {e}"))
            }
            Some(m) if m.type_() == mime::TEXT => Ok(String::from_utf8(bytes)
                .map_or_else(|e| ResponseBody::Bytes(e.into_bytes()), ResponseBody::Text)),
            _ => Ok(ResponseBody::Bytes(bytes)),
        }
    }

    /// Performs the call without logging.
    async fn dispatch(&self, request: &ApiRequest) -> RequestResult<ApiResponse> {
        if request.url.trim().is_empty() {
            return Err(RequestError::InvalidRequest("URL is required".to_string()));
        }
        let parsed_url = Url::parse(&request.url)
            .map_err(|e| RequestError::InvalidRequest(format!("{e}: {}", request.url)))?;

        let start = Instant::now();

        let mut builder = self
            .client
            .request(Self::to_reqwest_method(request.method), parsed_url);

        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        if let Some(content_type) = request.payload.content_type()
            && !request.has_header("content-type")
        {
            builder = builder.header("Content-Type", content_type);
        }

        builder = Self::apply_payload(builder, &request.payload)?;

        let response = builder
            .send()
            .await
            .map_err(|e| Self::map_error(&e, &request.url))?;

        let status = StatusCode::new(response.status().as_u16());
        let headers: Headers = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("<binary>").to_string()))
            .collect();

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Self::map_error(&e, &request.url))?
            .to_vec();
        let duration = start.elapsed();

        if !status.is_success() {
            return Err(RequestError::Status {
                url: request.url.clone(),
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        let content_type = headers.get("content-type").map(String::as_str);
        let body = Self::decode_body(content_type, bytes).map_err(|message| {
            RequestError::Unexpected {
                url: request.url.clone(),
                message,
            }
        })?;

        Ok(ApiResponse::new(status, headers, body, duration))
    }
}

impl RequestSender for ReqwestRequestSender {
    async fn send(&self, request: ApiRequest) -> RequestResult<ApiResponse> {
        info!(method = %request.method, url = %request.url, "sending request");

        let result = self.dispatch(&request).await;
        match &result {
            Ok(response) => info!(
                method = %request.method,
                url = %request.url,
                status = response.status.as_u16(),
                elapsed = ?response.duration,
                "request succeeded"
            ),
            Err(failure) => log_failure(&request, failure),
        }
        result
    }
}

fn log_failure(request: &ApiRequest, failure: &RequestError) {
    let kind = failure.kind();
    match failure {
        RequestError::Status { status, body, .. } => error!(
            method = %request.method,
            url = %request.url,
            kind,
            status,
            body = %body,
            "request failed with HTTP status"
        ),
        RequestError::Transport { cause, .. } => error!(
            method = %request.method,
            url = %request.url,
            kind,
            cause = %cause,
            "request could not complete"
        ),
        RequestError::InvalidRequest(reason) => error!(
            method = %request.method,
            url = %request.url,
            kind,
            reason = %reason,
            "request rejected before sending"
        ),
        RequestError::Unexpected { message, .. } => error!(
            method = %request.method,
            url = %request.url,
            kind,
            message = %message,
            "request failed unexpectedly"
        ),
    }
}

/// Renders an error with all of its sources.
fn error_chain(error: &dyn StdError) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Finds the first I/O error in a source chain.
fn io_error_kind(error: &(dyn StdError + 'static)) -> Option<io::ErrorKind> {
    let mut current = Some(error);
    while let Some(err) = current {
        if let Some(io_error) = err.downcast_ref::<io::Error>() {
            return Some(io_error.kind());
        }
        current = err.source();
    }
    None
}
