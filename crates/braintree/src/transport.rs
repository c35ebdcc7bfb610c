//! Backend token exchange and its HTTP transport.

use async_trait::async_trait;
use http::Method;
use paybridge_config::ApiConfig;
use paybridge_types::{BackendError, BackendToken, BackendTransport, TokenizePayload};
use serde_json::{Value, json};

/// Route the Braintree payload is posted to.
pub const TOKEN_ROUTE: &str = "/paypal/token";

/// Exchange a Braintree payload for a backend-issued token.
///
/// # Errors
///
/// Returns the transport's error, or [`BackendError::Api`] /
/// [`BackendError::InvalidResponse`] if the response is not a token.
pub async fn exchange_token(
    transport: &dyn BackendTransport,
    payload: &TokenizePayload,
) -> Result<BackendToken, BackendError> {
    let body = json!({ "payload": payload });
    let response = transport.request(Method::POST, TOKEN_ROUTE, body).await?;
    parse_token_response(&response)
}

/// Parse the token endpoint JSON response into a [`BackendToken`].
///
/// # Errors
///
/// Returns an error if the response carries an `error` object or has no `id`.
pub fn parse_token_response(json: &Value) -> Result<BackendToken, BackendError> {
    if let Some(err) = api_error(json) {
        return Err(err);
    }
    serde_json::from_value(json.clone())
        .map_err(|e| BackendError::InvalidResponse(format!("not a token: {e}")))
}

/// Extract `{"error": {"code": ..., "message": ...}}` from a response body.
fn api_error(json: &Value) -> Option<BackendError> {
    let err = json.get("error")?;
    let code = err
        .get("code")
        .and_then(Value::as_str)
        .unwrap_or("api-error")
        .to_string();
    let message = err
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    Some(BackendError::Api { code, message })
}

/// [`BackendTransport`] speaking JSON over HTTP to the backend API.
pub struct HttpTransport {
    http: rquest::Client,
    api_url: String,
    public_key: Option<String>,
}

impl HttpTransport {
    pub fn new(http: rquest::Client, api: &ApiConfig) -> Self {
        Self {
            http,
            api_url: api.url.trim_end_matches('/').to_string(),
            public_key: api.public_key.clone(),
        }
    }

    fn url(&self, route: &str) -> String {
        format!("{}/{}", self.api_url, route.trim_start_matches('/'))
    }

    /// Add the public key to a request body or query.
    fn with_key(&self, body: Value) -> Value {
        match (body, &self.public_key) {
            (Value::Object(mut map), Some(key)) => {
                map.insert("key".into(), Value::String(key.clone()));
                Value::Object(map)
            }
            (Value::Null, Some(key)) => json!({ "key": key }),
            (body, _) => body,
        }
    }
}

/// Query parameters for a GET body; `null` sends none.
fn query(body: &Value) -> Option<&Value> {
    (!body.is_null()).then_some(body)
}

#[async_trait]
impl BackendTransport for HttpTransport {
    async fn request(
        &self,
        method: Method,
        route: &str,
        body: Value,
    ) -> Result<Value, BackendError> {
        let url = self.url(route);
        let body = self.with_key(body);
        tracing::debug!(%method, url = %url, "backend request");

        let req = match method {
            Method::GET => match query(&body) {
                Some(params) => self.http.get(&url).query(params),
                None => self.http.get(&url),
            },
            Method::POST => self
                .http
                .post(&url)
                .header("Content-Type", "application/json")
                .json(&body),
            other => {
                return Err(BackendError::Http(format!("unsupported method: {other}")));
            }
        };

        let resp = req.send().await?;
        let status = resp.status();
        let text = resp.text().await?;
        let json: Value = serde_json::from_str(&text)
            .map_err(|e| BackendError::InvalidResponse(format!("status {status}: {e}")))?;

        if let Some(err) = api_error(&json) {
            tracing::warn!(status = %status, error = %err, "backend returned an error");
            return Err(err);
        }
        Ok(json)
    }
}
