//! Wire DTOs for the remote storefront API.
//!
//! DESIGN
//! ======
//! Field names follow the remote API verbatim (`token_de_acesso`, `preco`, ...)
//! so serde derives stay trivial. Fields the API is loose about (numeric codes,
//! prices sent as numbers) are normalised to strings on the way in.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Identity payload returned by the login endpoint.
///
/// Only `name` and `email` are read by the UI; everything else is kept as-is so
/// the profile round-trips through storage without loss. A `name` or `email`
/// that is not a string stays in `extra` untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "serde_json::Map<String, serde_json::Value>")]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl From<serde_json::Map<String, serde_json::Value>> for UserProfile {
    fn from(mut extra: serde_json::Map<String, serde_json::Value>) -> Self {
        let name = take_string(&mut extra, "name");
        let email = take_string(&mut extra, "email");
        Self { name, email, extra }
    }
}

fn take_string(map: &mut serde_json::Map<String, serde_json::Value>, key: &str) -> Option<String> {
    if !map.get(key).is_some_and(serde_json::Value::is_string) {
        return None;
    }
    match map.remove(key) {
        Some(serde_json::Value::String(s)) => Some(s),
        _ => None,
    }
}

impl UserProfile {
    /// Name to greet the user with, falling back to the email address.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .or(self.email.as_deref())
            .filter(|s| !s.trim().is_empty())
    }
}

/// A catalog product as listed by `/innova-dinamica/produtos/listar`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product code.
    #[serde(deserialize_with = "deserialize_code")]
    pub codigo: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub nome: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub referencia: String,
    /// Image URL.
    #[serde(default, deserialize_with = "deserialize_text")]
    pub imagem: String,
    /// Decimal price as text, e.g. `"12.50"`; empty when the API sends none.
    #[serde(default, deserialize_with = "deserialize_text")]
    pub preco: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub descricao: String,
}

/// Body of `POST /innova-dinamica/login/acessar`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub senha: String,
}

/// Login endpoint response; `status == 1` means success.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub status: i64,
    #[serde(default)]
    pub token_de_acesso: Option<String>,
    #[serde(default)]
    pub dados_usuario: Option<UserProfile>,
    #[serde(default)]
    pub message: Option<String>,
}

impl LoginResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == 1
    }
}

fn scalar_text(value: serde_json::Value) -> Result<Option<String>, &'static str> {
    match value {
        serde_json::Value::String(s) => Ok(Some(s)),
        serde_json::Value::Number(number) => Ok(Some(number.to_string())),
        serde_json::Value::Null => Ok(None),
        _ => Err("expected string or number"),
    }
}

/// Product code: a JSON string or number, kept as text. Required.
fn deserialize_code<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    scalar_text(value)
        .map_err(D::Error::custom)?
        .ok_or_else(|| D::Error::custom("product code must not be null"))
}

/// Display text: a JSON string or number kept as text, `null` read as empty.
fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    scalar_text(value)
        .map(Option::unwrap_or_default)
        .map_err(D::Error::custom)
}
