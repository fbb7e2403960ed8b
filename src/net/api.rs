//! REST API client for the storefront backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every outbound call goes through `ApiClient::send`, which decorates the
//! request with the JSON content type and, when a session token exists, the
//! bearer credential. The client doubles as the fetcher behind
//! `ResourceCache`: a cache key is simply the endpoint path.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Result` outputs instead of panics. Non-2xx responses become
//! `FetchError::Server` carrying the body's `message` field when present;
//! undecodable bodies become `FetchError::Unexpected`.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::de::DeserializeOwned;

use super::cache::Fetcher;
use super::error::{FetchError, LoginError};
use super::transport::{ApiRequest, ApiResponse, Transport};
use super::types::{LoginRequest, LoginResponse, Product, UserProfile};
use crate::config::ApiConfig;
use crate::state::session::TokenSource;

pub const LOGIN_PATH: &str = "/innova-dinamica/login/acessar";
pub const PRODUCTS_PATH: &str = "/innova-dinamica/produtos/listar";

const CONTENT_TYPE: &str = "Content-Type";
const AUTHORIZATION: &str = "Authorization";
const JSON_CONTENT_TYPE: &str = "application/json";

/// Credentials accepted by a successful login.
#[derive(Clone, Debug, PartialEq)]
pub struct LoginSuccess {
    pub token: String,
    pub user: UserProfile,
}

/// Typed access to the remote API.
#[derive(Clone, Debug)]
pub struct ApiClient<T, S> {
    config: ApiConfig,
    transport: T,
    tokens: S,
}

impl<T: Transport, S: TokenSource> ApiClient<T, S> {
    pub fn new(config: ApiConfig, transport: T, tokens: S) -> Self {
        Self {
            config,
            transport,
            tokens,
        }
    }

    /// Apply the outbound decoration rule to `request`.
    #[must_use]
    pub fn decorate(&self, mut request: ApiRequest) -> ApiRequest {
        request.set_header(CONTENT_TYPE, JSON_CONTENT_TYPE);
        match self.tokens.token().filter(|t| !t.is_empty()) {
            Some(token) => request.set_header(AUTHORIZATION, format!("Bearer {token}")),
            None => request.headers.retain(|(n, _)| !n.eq_ignore_ascii_case(AUTHORIZATION)),
        }
        request
    }

    /// Decorate and send, mapping transport failures into `FetchError`.
    ///
    /// # Errors
    ///
    /// `FetchError::Unavailable` when no response arrived,
    /// `FetchError::Unexpected` for any other transport failure.
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse, FetchError> {
        let request = self.decorate(request);
        Ok(self.transport.send(request).await?)
    }

    /// `GET path` and decode the JSON body.
    ///
    /// # Errors
    ///
    /// Returns a `FetchError` for transport failures, non-2xx statuses, or
    /// bodies that do not decode as `R`.
    pub async fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R, FetchError> {
        let url = self.config.url(path);
        let resp = self.send(ApiRequest::get(url.clone())).await?;
        if !resp.is_success() {
            leptos::logging::warn!("GET {url} returned {}", resp.status);
            return Err(server_error(&resp));
        }
        decode(&resp)
    }

    /// Exchange email + password for an access token.
    ///
    /// # Errors
    ///
    /// `LoginError::Rejected` when the API answers with `status != 1` (or
    /// without a token); `LoginError::Request` for transport and HTTP failures.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<LoginSuccess, LoginError> {
        let body = serde_json::to_value(credentials).map_err(|e| FetchError::Unexpected { detail: e.to_string() })?;
        let resp = self.send(ApiRequest::post(self.config.url(LOGIN_PATH), body)).await?;
        if !resp.is_success() {
            return Err(server_error(&resp).into());
        }

        let login: LoginResponse = decode(&resp)?;
        match (login.is_success(), login.token_de_acesso) {
            (true, Some(token)) if !token.is_empty() => Ok(LoginSuccess {
                token,
                user: login.dados_usuario.unwrap_or_default(),
            }),
            _ => Err(LoginError::Rejected { message: login.message }),
        }
    }

    /// The full product catalog, in server order.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::get_json`].
    pub async fn list_products(&self) -> Result<Vec<Product>, FetchError> {
        self.get_json(PRODUCTS_PATH).await
    }
}

impl<R, T, S> Fetcher<R> for ApiClient<T, S>
where
    R: DeserializeOwned,
    T: Transport,
    S: TokenSource,
{
    async fn fetch(&self, key: &str) -> Result<R, FetchError> {
        self.get_json(key).await
    }
}

fn decode<R: DeserializeOwned>(resp: &ApiResponse) -> Result<R, FetchError> {
    serde_json::from_str(&resp.body).map_err(|e| FetchError::Unexpected { detail: e.to_string() })
}

fn server_error(resp: &ApiResponse) -> FetchError {
    FetchError::Server {
        status: resp.status,
        message: extract_message(&resp.body),
    }
}

/// The `message` field of a JSON error body, if any.
fn extract_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(serde_json::Value::as_str)
        .filter(|m| !m.is_empty())
        .map(ToOwned::to_owned)
}
