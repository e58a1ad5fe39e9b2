//! HTTP transport port and the owned request/response values passed through it.

use async_trait::async_trait;
use bytes::Bytes;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::errors::ApiError;

/// HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    /// Returns the method name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One part of a multipart form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MultipartPart {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        mime: Option<String>,
        bytes: Bytes,
    },
}

/// Multipart form held in memory so a request can be sent more than once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartForm {
    parts: Vec<MultipartPart>,
}

impl MultipartForm {
    /// Creates an empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a text field.
    #[must_use]
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(MultipartPart::Text {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Adds a file field.
    #[must_use]
    pub fn file(
        mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        mime: Option<&str>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        self.parts.push(MultipartPart::File {
            name: name.into(),
            file_name: file_name.into(),
            mime: mime.map(ToString::to_string),
            bytes: bytes.into(),
        });
        self
    }

    /// Returns the parts in insertion order.
    #[must_use]
    pub fn parts(&self) -> &[MultipartPart] {
        &self.parts
    }
}

/// Request body.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(Value),
    Multipart(MultipartForm),
}

/// An outgoing API call.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl ApiRequest {
    /// Creates a request without query, headers or body.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Serializes `payload` as the JSON body.
    ///
    /// # Errors
    /// Returns error if the payload cannot be represented as JSON.
    pub fn with_json<T: Serialize + ?Sized>(mut self, payload: &T) -> Result<Self, ApiError> {
        let value = serde_json::to_value(payload)
            .map_err(|e| ApiError::invalid_request(format!("failed to encode payload: {e}")))?;
        self.body = RequestBody::Json(value);
        Ok(self)
    }

    #[must_use]
    pub fn with_multipart(mut self, form: MultipartForm) -> Self {
        self.body = RequestBody::Multipart(form);
        self
    }

    #[must_use]
    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    /// Sets a header, replacing any existing value with the same case-insensitive name.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.headers.retain(|(n, _)| !n.eq_ignore_ascii_case(&name));
        self.headers.push((name, value.into()));
        self
    }

    /// Returns a header value by case-insensitive name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// A received HTTP response of any status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Bytes,
}

impl ApiResponse {
    /// Creates new response.
    #[must_use]
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Creates a response with a JSON body.
    #[must_use]
    pub fn json_body(status: u16, body: &Value) -> Self {
        Self::new(status, body.to_string())
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Converts a non-success status into its [`ApiError`].
    ///
    /// # Errors
    /// Returns the classified error for any non-2xx status.
    pub fn error_for_status(self) -> Result<Self, ApiError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ApiError::from_response(self.status, &self.body))
        }
    }

    /// Decodes the JSON body.
    ///
    /// # Errors
    /// Returns error if the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_slice(&self.body).map_err(|e| ApiError::decode(e.to_string()))
    }
}

/// Port for sending HTTP requests.
///
/// Implementations return `Ok` for every received response regardless of status;
/// `Err` means no response arrived.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Sends one request.
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use parking_lot::Mutex;
    use std::collections::VecDeque;

    type Handler = Box<dyn Fn(&ApiRequest) -> Result<ApiResponse, ApiError> + Send + Sync>;

    /// Mock transport answering from a script or a handler function.
    pub struct MockTransport {
        script: Mutex<VecDeque<Result<ApiResponse, ApiError>>>,
        handler: Option<Handler>,
        sent: Mutex<Vec<ApiRequest>>,
    }

    impl MockTransport {
        /// Answers requests with the given results in order.
        pub fn scripted(responses: Vec<Result<ApiResponse, ApiError>>) -> Self {
            Self {
                script: Mutex::new(responses.into()),
                handler: None,
                sent: Mutex::new(Vec::new()),
            }
        }

        /// Answers every request through `handler`.
        pub fn from_fn(
            handler: impl Fn(&ApiRequest) -> Result<ApiResponse, ApiError> + Send + Sync + 'static,
        ) -> Self {
            Self {
                script: Mutex::new(VecDeque::new()),
                handler: Some(Box::new(handler)),
                sent: Mutex::new(Vec::new()),
            }
        }

        /// Requests received so far, as they went on the wire.
        pub fn sent(&self) -> Vec<ApiRequest> {
            self.sent.lock().clone()
        }
    }

    #[async_trait]
    impl HttpTransport for MockTransport {
        async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
            self.sent.lock().push(request.clone());
            tokio::task::yield_now().await;
            if let Some(handler) = &self.handler {
                return handler(request);
            }
            self.script
                .lock()
                .pop_front()
                .unwrap_or_else(|| Err(ApiError::transport("no scripted response")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_header_replaced_case_insensitively() {
        let request = ApiRequest::get("/x")
            .with_header("authorization", "Bearer old")
            .with_header("Authorization", "Bearer new");

        assert_eq!(request.headers.len(), 1);
        assert_eq!(request.header("AUTHORIZATION"), Some("Bearer new"));
    }

    #[test]
    fn test_error_for_status_passes_success() {
        let response = ApiResponse::json_body(201, &json!({"id": 1}));
        assert!(response.error_for_status().is_ok());
    }

    #[test]
    fn test_error_for_status_classifies_failure() {
        let response = ApiResponse::new(401, "");
        assert!(response.error_for_status().unwrap_err().is_unauthorized());
    }

    #[test]
    fn test_multipart_builder_keeps_order() {
        let form = MultipartForm::new()
            .text("visit", "4")
            .file("file", "shelf.jpg", Some("image/jpeg"), vec![1_u8, 2, 3]);

        assert_eq!(form.parts().len(), 2);
        assert!(matches!(&form.parts()[0], MultipartPart::Text { name, .. } if name == "visit"));
    }
}
