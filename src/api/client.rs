//
//  mandrill-cli
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Mandrill Request Dispatcher
//!
//! [`MandrillClient`] turns an operation path and a parameter map into exactly
//! one POST against the Mandrill API and classifies the outcome.
//!
//! ## Features
//!
//! - API key resolved once, at construction
//! - Key injected into every request body, overriding any caller value
//! - Typed classification of the server's error envelope
//! - Pluggable [`Transport`] for tests and alternative HTTP stacks
//!
//! ## Wire Format
//!
//! ```text
//! POST {host}{path}{operation}.json
//! Content-Type: application/json
//!
//! {"key": "<api key>", ...params}
//! ```

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use super::error::{ErrorEnvelope, MandrillError};
use super::transport::{ReqwestTransport, Transport};
use crate::auth::{resolve_api_key, CredentialEnv, KeySource, ResolvedKey, SystemEnv};
use crate::config::ApiConfig;

/// Name of the request field carrying the API key.
pub const KEY_FIELD: &str = "key";

/// Request parameters for a single call.
pub type Params = Map<String, Value>;

const JSON_HEADERS: &[(&str, &str)] = &[("Content-Type", "application/json")];

/// Client for the Mandrill JSON API.
///
/// Holds the endpoint, the resolved API key and one transport session. The
/// client is immutable after construction and cheap to clone; clones share
/// the transport.
///
/// # Creating a Client
///
/// ```rust,no_run
/// use mandrill_cli::api::MandrillClient;
///
/// // Key from MANDRILL_APIKEY, ~/.mandrill.key or /etc/mandrill.key
/// let client = MandrillClient::new(None)?;
///
/// // Explicit key
/// let client = MandrillClient::new(Some("my-api-key"))?;
/// # Ok::<(), mandrill_cli::api::MandrillError>(())
/// ```
///
/// # Making Calls
///
/// ```rust,no_run
/// use mandrill_cli::api::{MandrillClient, Params};
///
/// # async fn example() -> Result<(), mandrill_cli::api::MandrillError> {
/// let client = MandrillClient::new(None)?;
/// let pong = client.call("users/ping2", Params::new()).await?;
/// println!("{pong}");
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct MandrillClient {
    /// The underlying HTTP transport
    transport: Arc<dyn Transport>,
    /// Scheme and authority, e.g. "https://mandrillapp.com"
    host: String,
    /// Base path, e.g. "/api/1.0/"
    path: String,
    /// The key injected into every request
    api_key: ResolvedKey,
    /// Log response bodies
    debug: bool,
}

impl std::fmt::Debug for MandrillClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MandrillClient")
            .field("host", &self.host)
            .field("path", &self.path)
            .field("api_key", &self.api_key)
            .field("debug", &self.debug)
            .finish_non_exhaustive()
    }
}

impl MandrillClient {
    /// Creates a client for the public Mandrill endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`MandrillError::Configuration`] if no API key can be resolved,
    /// or [`MandrillError::Transport`] if the HTTP client cannot be built.
    pub fn new(api_key: Option<&str>) -> Result<Self, MandrillError> {
        Self::from_config(&ApiConfig::default(), api_key, &SystemEnv)
    }

    /// Creates a client from endpoint settings, resolving the key through `env`.
    ///
    /// # Errors
    ///
    /// Returns [`MandrillError::Configuration`] if the settings are invalid or
    /// no API key can be resolved.
    pub fn from_config(
        config: &ApiConfig,
        api_key: Option<&str>,
        env: &impl CredentialEnv,
    ) -> Result<Self, MandrillError> {
        config
            .validate()
            .map_err(|e| MandrillError::Configuration(format!("{e:#}")))?;
        let api_key = resolve_api_key(api_key, env)?;
        let transport = ReqwestTransport::new()?;

        Ok(Self::with_transport(config, api_key, Arc::new(transport)))
    }

    /// Creates a client over a caller-supplied transport.
    ///
    /// The settings are used as given; call [`ApiConfig::validate`] first if
    /// they come from user input.
    pub fn with_transport(config: &ApiConfig, api_key: ResolvedKey, transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            host: config.host.clone(),
            path: config.path.clone(),
            api_key,
            debug: config.debug,
        }
    }

    /// Returns where the API key came from.
    pub fn key_source(&self) -> &KeySource {
        &self.api_key.source
    }

    /// Returns the full URL for an operation.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use mandrill_cli::api::MandrillClient;
    ///
    /// let client = MandrillClient::new(Some("k"))?;
    /// assert_eq!(
    ///     client.endpoint_url("messages/send"),
    ///     "https://mandrillapp.com/api/1.0/messages/send.json"
    /// );
    /// # Ok::<(), mandrill_cli::api::MandrillError>(())
    /// ```
    pub fn endpoint_url(&self, operation: &str) -> String {
        format!("{}{}{}.json", self.host, self.path, operation)
    }

    /// Calls an operation and returns the parsed JSON response.
    ///
    /// The `key` field of `params` is always replaced with the client's key.
    /// The transport is invoked exactly once; nothing is retried.
    ///
    /// # Errors
    ///
    /// - [`MandrillError::Serialization`] if the request cannot be encoded
    /// - [`MandrillError::Transport`] if the request never got an HTTP response
    /// - [`MandrillError::Protocol`] if a 200 body is not JSON, or a non-200
    ///   body is not a well-formed error envelope
    /// - [`MandrillError::Api`] for a well-formed error envelope
    pub async fn call(&self, operation: &str, mut params: Params) -> Result<Value, MandrillError> {
        params.insert(KEY_FIELD.to_string(), Value::String(self.api_key.key.clone()));
        let body = serde_json::to_vec(&params).map_err(|e| MandrillError::Serialization(e.to_string()))?;

        let url = self.endpoint_url(operation);
        debug!(operation, "sending request");

        let response = self.transport.post(&url, JSON_HEADERS, body).await?;
        debug!(operation, status = response.status, "received response");
        if self.debug {
            debug!(operation, body = %response.text(), "response body");
        }

        if response.status != 200 {
            return Err(ErrorEnvelope::classify(&response.text()));
        }

        serde_json::from_slice(&response.body).map_err(|_| MandrillError::protocol(response.text()))
    }

    /// Calls an operation with any serializable parameter value.
    ///
    /// # Errors
    ///
    /// Returns [`MandrillError::Serialization`] if `params` fails to serialize
    /// or does not serialize to a JSON object; otherwise as [`Self::call`].
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use mandrill_cli::api::MandrillClient;
    /// use serde::Serialize;
    ///
    /// #[derive(Serialize)]
    /// struct TagInfo<'a> { tag: &'a str }
    ///
    /// # async fn example(client: MandrillClient) -> Result<(), mandrill_cli::api::MandrillError> {
    /// let info = client.call_with("tags/info", &TagInfo { tag: "welcome" }).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn call_with<P>(&self, operation: &str, params: &P) -> Result<Value, MandrillError>
    where
        P: Serialize + ?Sized,
    {
        match serde_json::to_value(params) {
            Ok(Value::Object(map)) => self.call(operation, map).await,
            Ok(other) => Err(MandrillError::Serialization(format!(
                "parameters must be a JSON object, got {}",
                json_type_name(&other)
            ))),
            Err(e) => Err(MandrillError::Serialization(e.to_string())),
        }
    }

    /// Calls an operation and decodes the response into `T`.
    ///
    /// # Errors
    ///
    /// As [`Self::call`]; a response that does not match `T` is a
    /// [`MandrillError::Protocol`] carrying the response JSON.
    pub async fn call_as<T>(&self, operation: &str, params: Params) -> Result<T, MandrillError>
    where
        T: DeserializeOwned,
    {
        let value = self.call(operation, params).await?;
        let raw = value.to_string();
        serde_json::from_value(value).map_err(|_| MandrillError::protocol(raw))
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde::Deserialize;
    use serde_json::json;
    use tokio_test::{assert_err, assert_ok};

    use crate::api::error::ApiErrorKind;
    use crate::api::transport::TransportResponse;

    #[derive(Debug, Clone)]
    struct Recorded {
        url: String,
        headers: Vec<(String, String)>,
        body: Value,
    }

    /// Returns a fixed response and records every request.
    struct StubTransport {
        response: Result<TransportResponse, String>,
        requests: Mutex<Vec<Recorded>>,
    }

    impl StubTransport {
        fn replying(status: u16, body: &str) -> Arc<Self> {
            Arc::new(Self {
                response: Ok(TransportResponse::new(status, body)),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn failing(message: &str) -> Arc<Self> {
            Arc::new(Self {
                response: Err(message.to_string()),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn requests(&self) -> Vec<Recorded> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for StubTransport {
        async fn post(
            &self,
            url: &str,
            headers: &[(&str, &str)],
            body: Vec<u8>,
        ) -> Result<TransportResponse, MandrillError> {
            self.requests.lock().unwrap().push(Recorded {
                url: url.to_string(),
                headers: headers
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
                body: serde_json::from_slice(&body).unwrap(),
            });
            self.response.clone().map_err(MandrillError::Transport)
        }
    }

    fn client(transport: Arc<StubTransport>) -> MandrillClient {
        let key = ResolvedKey {
            key: "test-key".to_string(),
            source: KeySource::Explicit,
        };
        MandrillClient::with_transport(&ApiConfig::default(), key, transport)
    }

    #[tokio::test]
    async fn test_success_returns_body_and_injects_key() {
        let transport = StubTransport::replying(200, r#"{"foo":"bar"}"#);
        let result = assert_ok!(client(transport.clone()).call("x/y", Params::new()).await);

        assert_eq!(result, json!({"foo": "bar"}));

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url, "https://mandrillapp.com/api/1.0/x/y.json");
        assert_eq!(requests[0].body, json!({"key": "test-key"}));
        assert_eq!(
            requests[0].headers,
            vec![("Content-Type".to_string(), "application/json".to_string())]
        );
    }

    #[tokio::test]
    async fn test_caller_key_is_overridden() {
        let transport = StubTransport::replying(200, "[]");
        let mut params = Params::new();
        params.insert("key".to_string(), json!("attacker"));
        params.insert("email".to_string(), json!("a@example.com"));
        params.insert("nested".to_string(), json!({"list": [1, null, true]}));

        assert_ok!(client(transport.clone()).call("rejects/list", params).await);

        assert_eq!(
            transport.requests()[0].body,
            json!({"key": "test-key", "email": "a@example.com", "nested": {"list": [1, null, true]}})
        );
    }

    #[tokio::test]
    async fn test_success_array_payload() {
        let transport = StubTransport::replying(200, r#"[{"tag":"a"},{"tag":"b"}]"#);
        let result = assert_ok!(client(transport).call("tags/list", Params::new()).await);
        assert_eq!(result.as_array().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn test_success_non_json_is_protocol_error() {
        let transport = StubTransport::replying(200, "<html>oops</html>");
        let err = assert_err!(client(transport).call("x/y", Params::new()).await);
        assert!(matches!(err, MandrillError::Protocol { ref body } if body == "<html>oops</html>"));
    }

    #[tokio::test]
    async fn test_known_error_name() {
        let transport = StubTransport::replying(
            500,
            r#"{"status":"error","name":"Invalid_Key","message":"bad key"}"#,
        );
        let err = assert_err!(client(transport).call("x/y", Params::new()).await);
        match err {
            MandrillError::Api { kind, message } => {
                assert_eq!(kind, ApiErrorKind::InvalidKey);
                assert_eq!(message, "bad key");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unmapped_error_name() {
        let transport = StubTransport::replying(
            500,
            r#"{"status":"error","name":"Something_Unmapped","message":"x"}"#,
        );
        let err = assert_err!(client(transport).call("x/y", Params::new()).await);
        assert_eq!(err.api_kind(), Some(ApiErrorKind::Generic));
        assert_eq!(err.message(), "x");
    }

    #[tokio::test]
    async fn test_non_json_error_body() {
        let transport = StubTransport::replying(500, "oops");
        let err = assert_err!(client(transport).call("x/y", Params::new()).await);
        assert!(matches!(err, MandrillError::Protocol { .. }));
        assert!(err.to_string().contains("oops"));
    }

    #[tokio::test]
    async fn test_non_200_success_status_is_still_an_error() {
        let transport = StubTransport::replying(201, r#"{"foo":"bar"}"#);
        let err = assert_err!(client(transport).call("x/y", Params::new()).await);
        assert!(matches!(err, MandrillError::Protocol { .. }));
    }

    #[tokio::test]
    async fn test_transport_failure_is_not_retried() {
        let transport = StubTransport::failing("connection refused");
        let err = assert_err!(client(transport.clone()).call("x/y", Params::new()).await);
        assert!(matches!(err, MandrillError::Transport(ref m) if m == "connection refused"));
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_call_with_struct() {
        #[derive(Serialize)]
        struct Info<'a> {
            tag: &'a str,
        }

        let transport = StubTransport::replying(200, "{}");
        assert_ok!(client(transport.clone()).call_with("tags/info", &Info { tag: "welcome" }).await);
        assert_eq!(transport.requests()[0].body, json!({"tag": "welcome", "key": "test-key"}));
    }

    #[tokio::test]
    async fn test_call_with_non_object_is_serialization_error() {
        let transport = StubTransport::replying(200, "{}");
        let err = assert_err!(client(transport.clone()).call_with("x/y", &vec![1, 2]).await);
        assert!(matches!(err, MandrillError::Serialization(ref m) if m.contains("an array")));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_call_with_unserializable_value() {
        use std::collections::HashMap;

        // JSON object keys must be strings.
        let mut params = HashMap::new();
        params.insert(vec![1u8], "value");

        let transport = StubTransport::replying(200, "{}");
        let err = assert_err!(client(transport.clone()).call_with("x/y", &params).await);
        assert!(matches!(err, MandrillError::Serialization(_)));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_call_as_decodes_and_rejects_mismatch() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct Pong {
            #[serde(rename = "PING")]
            ping: String,
        }

        let transport = StubTransport::replying(200, r#"{"PING":"PONG!"}"#);
        let pong: Pong = assert_ok!(client(transport).call_as("users/ping2", Params::new()).await);
        assert_eq!(pong.ping, "PONG!");

        let transport = StubTransport::replying(200, r#"{"unexpected":1}"#);
        let err = assert_err!(client(transport).call_as::<Pong>("users/ping2", Params::new()).await);
        assert!(matches!(err, MandrillError::Protocol { ref body } if body.contains("unexpected")));
    }

    #[tokio::test]
    async fn test_concurrent_calls_share_transport() {
        let transport = StubTransport::replying(200, r#"{"ok":true}"#);
        let client = client(transport.clone());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let client = client.clone();
                tokio::spawn(async move {
                    let mut params = Params::new();
                    params.insert("n".to_string(), json!(i));
                    client.call("users/info", params).await
                })
            })
            .collect();

        for handle in handles {
            assert_ok!(handle.await.unwrap());
        }
        assert_eq!(transport.requests().len(), 8);
    }

    #[test]
    fn test_debug_output_masks_key() {
        let transport = StubTransport::replying(200, "{}");
        let rendered = format!("{:?}", client(transport));
        assert!(!rendered.contains("test-key"));
    }

    #[test]
    fn test_endpoint_url_uses_config() {
        let config = ApiConfig {
            host: "http://127.0.0.1:9000".to_string(),
            path: "/api/2.0/".to_string(),
            debug: true,
        };
        let key = ResolvedKey {
            key: "k".to_string(),
            source: KeySource::Environment,
        };
        let client = MandrillClient::with_transport(&config, key, StubTransport::replying(200, "{}"));
        assert_eq!(client.endpoint_url("senders/list"), "http://127.0.0.1:9000/api/2.0/senders/list.json");
        assert_eq!(client.key_source(), &KeySource::Environment);
    }
}
