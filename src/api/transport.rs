//
//  mandrill-cli
//  api/transport.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Transport
//!
//! The [`Transport`] trait is the only network boundary of the client: a
//! single POST of a byte body, returning the status code and raw response
//! bytes. [`ReqwestTransport`] is the production implementation; tests
//! substitute their own.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;

use super::error::MandrillError;

/// Raw response returned by a [`Transport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// The HTTP status code.
    pub status: u16,
    /// The undecoded response body.
    pub body: Vec<u8>,
}

impl TransportResponse {
    /// Creates a response from a status code and body bytes.
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns the body as text, replacing invalid UTF-8 sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// A one-shot HTTP POST capability.
///
/// Implementations must not retry. Connection and I/O failures are reported
/// as [`MandrillError::Transport`]; any HTTP status, including error
/// statuses, is a successful transport result.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: Vec<u8>,
    ) -> Result<TransportResponse, MandrillError>;
}

/// [`Transport`] backed by a shared [`reqwest::Client`].
///
/// The inner client keeps its own connection pool, so one
/// `ReqwestTransport` can serve concurrent calls.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    /// Builds a transport with the default `mandrill/<version>` user agent.
    pub fn new() -> Result<Self, MandrillError> {
        let http = Client::builder()
            .user_agent(format!("{}/{}", crate::APP_NAME, crate::VERSION))
            .build()?;
        Ok(Self { http })
    }

    /// Wraps an already configured [`reqwest::Client`].
    pub fn with_client(http: Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn post(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: Vec<u8>,
    ) -> Result<TransportResponse, MandrillError> {
        let mut header_map = HeaderMap::new();
        for (name, value) in headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| MandrillError::Transport(format!("invalid header name: {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| MandrillError::Transport(format!("invalid header value: {e}")))?;
            header_map.insert(name, value);
        }

        let response = self.http.post(url).headers(header_map).body(body).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;

        Ok(TransportResponse::new(status, body.to_vec()))
    }
}
