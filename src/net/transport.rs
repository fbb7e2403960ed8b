//! HTTP transports behind the API client.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR) and plain native builds: the browser transport reports
//! `NoResponse`, and `ReqwestTransport` is available for native callers.
//!
//! ERROR HANDLING
//! ==============
//! A transport only distinguishes "no response" from "anything else went
//! wrong". HTTP status codes are returned as data and interpreted by
//! `ApiClient`.

#![allow(clippy::unused_async)]

use std::future::Future;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// An outbound request, already resolved to an absolute URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    #[must_use]
    pub fn post(url: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            method: Method::Post,
            url: url.into(),
            headers: Vec::new(),
            body: Some(body),
        }
    }

    /// Set `name` to `value`, replacing any header with the same
    /// case-insensitive name.
    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        self.headers.retain(|(n, _)| !n.eq_ignore_ascii_case(name));
        self.headers.push((name.to_owned(), value.into()));
    }

    /// Look up a header by case-insensitive name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// A response as received, before status interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub use super::error::TransportError;

/// Sends one request and returns the raw response.
pub trait Transport: Send + Sync + 'static {
    fn send(&self, request: ApiRequest) -> impl Future<Output = Result<ApiResponse, TransportError>>;
}

/// `fetch`-based transport for the browser.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserTransport;

impl Transport for BrowserTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        #[cfg(feature = "hydrate")]
        {
            let builder = match request.method {
                Method::Get => gloo_net::http::RequestBuilder::new(&request.url)
                    .method(gloo_net::http::Method::GET),
                Method::Post => gloo_net::http::RequestBuilder::new(&request.url)
                    .method(gloo_net::http::Method::POST),
            };
            let builder = request
                .headers
                .iter()
                .fold(builder, |b, (name, value)| b.header(name, value));
            let req = match &request.body {
                Some(body) => builder
                    .body(body.to_string())
                    .map_err(|e| TransportError::Other(e.to_string()))?,
                None => builder.build().map_err(|e| TransportError::Other(e.to_string()))?,
            };
            let resp = req.send().await.map_err(|e| match e {
                gloo_net::Error::JsError(js) => TransportError::NoResponse(js.to_string()),
                other => TransportError::Other(other.to_string()),
            })?;
            let status = resp.status();
            let body = resp
                .text()
                .await
                .map_err(|e| TransportError::Other(e.to_string()))?;
            Ok(ApiResponse { status, body })
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = request;
            Err(TransportError::NoResponse("not available on server".to_owned()))
        }
    }
}

/// `reqwest`-based transport for native builds.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

#[cfg(not(target_arch = "wasm32"))]
impl ReqwestTransport {
    #[must_use]
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Transport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        };
        let mut builder = self.client.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body.to_string());
        }

        let resp = builder.send().await.map_err(|e| {
            if e.is_connect() || e.is_timeout() || e.is_request() {
                TransportError::NoResponse(e.to_string())
            } else {
                TransportError::Other(e.to_string())
            }
        })?;
        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| TransportError::Other(e.to_string()))?;
        Ok(ApiResponse { status, body })
    }
}
