//
//  mandrill-cli
//  api/error.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Error Taxonomy
//!
//! Every failure a Mandrill call can produce is a variant of [`MandrillError`].
//! Errors reported by the server are further classified by [`ApiErrorKind`],
//! which is derived from the `name` field of the error envelope:
//!
//! ```json
//! {"status": "error", "code": -1, "name": "Invalid_Key", "message": "Invalid API key"}
//! ```
//!
//! ## Example
//!
//! ```rust
//! use mandrill_cli::api::{ApiErrorKind, MandrillError};
//!
//! fn describe(err: &MandrillError) -> &'static str {
//!     match err {
//!         MandrillError::Api { kind: ApiErrorKind::InvalidKey, .. } => "check your API key",
//!         MandrillError::Api { .. } => "the server rejected the request",
//!         MandrillError::Configuration(_) => "no API key configured",
//!         _ => "request failed",
//!     }
//! }
//! ```

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Unified error type for all Mandrill client operations.
///
/// | Variant | Raised when |
/// |---------|-------------|
/// | `Configuration` | No usable API key, or an invalid endpoint |
/// | `Serialization` | Request parameters cannot be encoded as a JSON object |
/// | `Transport` | The HTTP request failed below the HTTP layer |
/// | `Protocol` | A response body did not have the expected JSON shape |
/// | `Api` | The server returned a well-formed error envelope |
#[derive(Error, Debug)]
pub enum MandrillError {
    /// No usable credential was found, or the client configuration is invalid.
    #[error("{0}")]
    Configuration(String),

    /// Caller-supplied parameters could not be encoded as JSON.
    #[error("Failed to serialize request: {0}")]
    Serialization(String),

    /// A network or connection failure occurred.
    #[error("Network error: {0}")]
    Transport(String),

    /// The response did not conform to the expected JSON envelope.
    ///
    /// `body` holds the raw response text for diagnostics.
    #[error("We received an unexpected error: {body}")]
    Protocol {
        /// The raw response body.
        body: String,
    },

    /// The server reported an error.
    ///
    /// `kind` is [`ApiErrorKind::Generic`] when the server's error name has no
    /// dedicated variant.
    #[error("{kind}: {message}")]
    Api {
        /// Classification derived from the envelope's `name`.
        kind: ApiErrorKind,
        /// The envelope's human-readable message.
        message: String,
    },
}

impl MandrillError {
    /// Returns the API error classification, if this is a server-reported error.
    pub fn api_kind(&self) -> Option<ApiErrorKind> {
        match self {
            Self::Api { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Returns the message carried by this error, without any prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::Configuration(msg) | Self::Serialization(msg) | Self::Transport(msg) => msg,
            Self::Protocol { body } => body,
            Self::Api { message, .. } => message,
        }
    }

    pub(crate) fn protocol(body: impl Into<String>) -> Self {
        Self::Protocol { body: body.into() }
    }
}

impl From<reqwest::Error> for MandrillError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

/// Classification of a server-reported error.
///
/// One variant exists per error name the Mandrill API documents; any other
/// name maps to [`ApiErrorKind::Generic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    /// An error name with no dedicated variant.
    Generic,
    ValidationError,
    InvalidKey,
    PaymentRequired,
    UnknownSubaccount,
    UnknownTemplate,
    ServiceUnavailable,
    UnknownMessage,
    InvalidTagName,
    InvalidReject,
    UnknownSender,
    UnknownUrl,
    UnknownTrackingDomain,
    InvalidTemplate,
    UnknownWebhook,
    UnknownInboundDomain,
    UnknownInboundRoute,
    UnknownExport,
    IpProvisionLimit,
    UnknownPool,
    NoSendingHistory,
    PoorReputation,
    UnknownIp,
    InvalidEmptyDefaultPool,
    InvalidDeleteDefaultPool,
    InvalidDeleteNonEmptyPool,
    InvalidCustomDns,
    InvalidCustomDnsPending,
    MetadataFieldLimit,
    UnknownMetadataField,
}

/// Server error names and the kind each one maps to.
///
/// New server error names are added here and nowhere else.
const ERROR_NAMES: &[(&str, ApiErrorKind)] = &[
    ("ValidationError", ApiErrorKind::ValidationError),
    ("Invalid_Key", ApiErrorKind::InvalidKey),
    ("PaymentRequired", ApiErrorKind::PaymentRequired),
    ("Unknown_Subaccount", ApiErrorKind::UnknownSubaccount),
    ("Unknown_Template", ApiErrorKind::UnknownTemplate),
    ("ServiceUnavailable", ApiErrorKind::ServiceUnavailable),
    ("Unknown_Message", ApiErrorKind::UnknownMessage),
    ("Invalid_Tag_Name", ApiErrorKind::InvalidTagName),
    ("Invalid_Reject", ApiErrorKind::InvalidReject),
    ("Unknown_Sender", ApiErrorKind::UnknownSender),
    ("Unknown_Url", ApiErrorKind::UnknownUrl),
    ("Unknown_TrackingDomain", ApiErrorKind::UnknownTrackingDomain),
    ("Invalid_Template", ApiErrorKind::InvalidTemplate),
    ("Unknown_Webhook", ApiErrorKind::UnknownWebhook),
    ("Unknown_InboundDomain", ApiErrorKind::UnknownInboundDomain),
    ("Unknown_InboundRoute", ApiErrorKind::UnknownInboundRoute),
    ("Unknown_Export", ApiErrorKind::UnknownExport),
    ("IP_ProvisionLimit", ApiErrorKind::IpProvisionLimit),
    ("Unknown_Pool", ApiErrorKind::UnknownPool),
    ("NoSendingHistory", ApiErrorKind::NoSendingHistory),
    ("PoorReputation", ApiErrorKind::PoorReputation),
    ("Unknown_IP", ApiErrorKind::UnknownIp),
    ("Invalid_EmptyDefaultPool", ApiErrorKind::InvalidEmptyDefaultPool),
    ("Invalid_DeleteDefaultPool", ApiErrorKind::InvalidDeleteDefaultPool),
    ("Invalid_DeleteNonEmptyPool", ApiErrorKind::InvalidDeleteNonEmptyPool),
    ("Invalid_CustomDNS", ApiErrorKind::InvalidCustomDns),
    ("Invalid_CustomDNSPending", ApiErrorKind::InvalidCustomDnsPending),
    ("Metadata_FieldLimit", ApiErrorKind::MetadataFieldLimit),
    ("Unknown_MetadataField", ApiErrorKind::UnknownMetadataField),
];

static KIND_BY_NAME: Lazy<HashMap<&'static str, ApiErrorKind>> =
    Lazy::new(|| ERROR_NAMES.iter().copied().collect());

impl ApiErrorKind {
    /// Maps a server error name to its kind.
    ///
    /// Lookup is exact and case-sensitive. Unrecognised names yield
    /// [`ApiErrorKind::Generic`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use mandrill_cli::api::ApiErrorKind;
    ///
    /// assert_eq!(ApiErrorKind::from_name("Invalid_Key"), ApiErrorKind::InvalidKey);
    /// assert_eq!(ApiErrorKind::from_name("invalid_key"), ApiErrorKind::Generic);
    /// ```
    pub fn from_name(name: &str) -> Self {
        KIND_BY_NAME.get(name).copied().unwrap_or(Self::Generic)
    }

    /// Returns the server error name for this kind.
    ///
    /// `Generic` has no single wire name and returns `None`.
    pub fn name(self) -> Option<&'static str> {
        ERROR_NAMES
            .iter()
            .find(|(_, kind)| *kind == self)
            .map(|(name, _)| *name)
    }

    /// Returns every kind that has a dedicated server error name.
    pub fn known() -> impl Iterator<Item = ApiErrorKind> {
        ERROR_NAMES.iter().map(|(_, kind)| *kind)
    }
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name().unwrap_or("Error"))
    }
}

/// Body of a non-success Mandrill response.
///
/// Every field is optional on the wire; [`ErrorEnvelope::classify`]
/// decides whether the envelope is well formed.
///
/// `code` and `message` are kept as raw JSON and may hold any
/// JSON type.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorEnvelope {
    /// `"error"` for a well-formed envelope.
    #[serde(default)]
    pub status: Option<String>,
    /// Numeric error code. Not used for classification.
    #[serde(default)]
    pub code: Option<Value>,
    /// Server error name, looked up in the name table.
    #[serde(default)]
    pub name: Option<String>,
    /// Human-readable description.
    #[serde(default)]
    pub message: Option<Value>,
}

impl ErrorEnvelope {
    /// Classifies a non-success response body.
    ///
    /// A body that is not JSON, whose `status` is not `"error"`, or that has
    /// no `name` becomes [`MandrillError::Protocol`] carrying the raw body.
    /// Otherwise the `name` is looked up through [`ApiErrorKind::from_name`].
    pub fn classify(body: &str) -> MandrillError {
        let envelope = match serde_json::from_str::<Value>(body) {
            Ok(value @ Value::Object(_)) => serde_json::from_value::<ErrorEnvelope>(value),
            _ => return MandrillError::protocol(body),
        };

        match envelope {
            Ok(envelope) => envelope.into_error(body),
            Err(_) => MandrillError::protocol(body),
        }
    }

    fn into_error(self, raw: &str) -> MandrillError {
        if self.status.as_deref() != Some("error") {
            return MandrillError::protocol(raw);
        }
        let Some(name) = self.name else {
            return MandrillError::protocol(raw);
        };

        let message = match self.message {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(message)) => message,
            Some(other) => other.to_string(),
        };

        MandrillError::Api {
            kind: ApiErrorKind::from_name(&name),
            message,
        }
    }
}
