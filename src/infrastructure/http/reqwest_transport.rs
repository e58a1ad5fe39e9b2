//! HTTP transport over reqwest.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use std::time::Duration;
use tracing::{debug, warn};

use crate::domain::errors::ApiError;
use crate::domain::ports::{
    ApiRequest, ApiResponse, HttpTransport, Method, MultipartForm, MultipartPart, RequestBody,
};

const USER_AGENT: &str = concat!("datum-client/", env!("CARGO_PKG_VERSION"));

/// Sends [`ApiRequest`]s to one backend origin.
pub struct ReqwestTransport {
    client: Client,
    base_url: String,
}

impl ReqwestTransport {
    /// Creates a transport for `base_url` with a whole-request timeout.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }

    fn build(&self, request: &ApiRequest) -> Result<reqwest::RequestBuilder, ApiError> {
        let mut builder = self
            .client
            .request(to_reqwest_method(request.method), self.url(&request.path));

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        Ok(match &request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Multipart(form) => builder.multipart(to_reqwest_form(form)?),
        })
    }

    fn map_send_error(&self, e: &reqwest::Error) -> ApiError {
        warn!(error = %e, base_url = %self.base_url, "Request did not complete");
        if e.is_timeout() {
            ApiError::transport("request timed out")
        } else if e.is_connect() {
            ApiError::transport(format!("failed to connect to {}", self.base_url))
        } else {
            ApiError::transport(e.to_string())
        }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        let response = self
            .build(request)?
            .send()
            .await
            .map_err(|e| self.map_send_error(&e))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| self.map_send_error(&e))?;

        debug!(
            method = %request.method,
            path = %request.path,
            status,
            bytes = body.len(),
            "Received response"
        );

        Ok(ApiResponse::new(status, body))
    }
}

const fn to_reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
    }
}

fn to_reqwest_form(form: &MultipartForm) -> Result<Form, ApiError> {
    form.parts()
        .iter()
        .try_fold(Form::new(), |acc, part| match part {
            MultipartPart::Text { name, value } => Ok(acc.text(name.clone(), value.clone())),
            MultipartPart::File {
                name,
                file_name,
                mime,
                bytes,
            } => {
                let mut file = Part::bytes(bytes.to_vec()).file_name(file_name.clone());
                if let Some(mime) = mime {
                    file = file.mime_str(mime).map_err(|e| {
                        ApiError::invalid_request(format!("invalid content type `{mime}`: {e}"))
                    })?;
                }
                Ok(acc.part(name.clone(), file))
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_without_double_slash() {
        let transport =
            ReqwestTransport::new("http://127.0.0.1:8000/", Duration::from_secs(1)).unwrap();

        assert_eq!(transport.base_url(), "http://127.0.0.1:8000");
        assert_eq!(
            transport.url("/api/v1/geo/countries/"),
            "http://127.0.0.1:8000/api/v1/geo/countries/"
        );
        assert_eq!(transport.url("health/"), "http://127.0.0.1:8000/health/");
    }

    #[test]
    fn test_invalid_mime_is_rejected_before_sending() {
        let form = MultipartForm::new().file("file", "a.bin", Some("not a mime"), vec![1_u8]);

        let err = to_reqwest_form(&form).unwrap_err();

        assert!(matches!(err, ApiError::InvalidRequest { .. }));
    }
}
