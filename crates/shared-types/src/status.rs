// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Uniform response envelope
//!
//! Every endpoint of the service answers with a [`StatusEnvelope`]: an `ok`
//! flag plus a flat map of named fields. Construction always stamps the host
//! name, the construction time and the build version into the map, so clients
//! can tell which replica and which build produced a given answer.
//!
//! Failed envelopes always carry an `error` message and may carry a
//! `status_code` hint that the request wrapper turns into the HTTP status.

use std::fmt;

use chrono::Utc;
use serde::{Serialize, Serializer, de::DeserializeOwned, ser::SerializeMap};
use serde_json::{Map, Value};

use crate::identity::ServiceIdentity;

/// Field holding the failure message
pub const ERROR_FIELD: &str = "error";
/// Field holding the optional HTTP status hint of a failure
pub const STATUS_CODE_FIELD: &str = "status_code";
/// Field holding the echoed session token
pub const SESSION_FIELD: &str = "session";
/// Field holding the echoed caller identity
pub const USERNAME_FIELD: &str = "username";

const OK_FIELD: &str = "ok";
const HOSTNAME_FIELD: &str = "hostname";
const TIME_FIELD: &str = "time";
const VERSION_FIELD: &str = "version";

/// Keys that only the envelope itself may write
const RESERVED_FIELDS: [&str; 5] = [
    OK_FIELD,
    ERROR_FIELD,
    HOSTNAME_FIELD,
    TIME_FIELD,
    VERSION_FIELD,
];

/// Self-describing result of a request
#[derive(Debug, Clone, PartialEq)]
pub struct StatusEnvelope {
    ok: bool,
    info: Map<String, Value>,
}

impl StatusEnvelope {
    /// Create a successful envelope
    pub fn success(identity: &ServiceIdentity) -> Self {
        Self::stamped(true, identity)
    }

    /// Create a failed envelope carrying `message` as its `error` field
    pub fn failure(identity: &ServiceIdentity, message: impl Into<String>) -> Self {
        let mut envelope = Self::stamped(false, identity);
        envelope
            .info
            .insert(ERROR_FIELD.to_string(), Value::String(message.into()));
        envelope
    }

    fn stamped(ok: bool, identity: &ServiceIdentity) -> Self {
        let mut info = Map::new();
        info.insert(
            HOSTNAME_FIELD.to_string(),
            identity
                .hostname()
                .map_or(Value::Null, |name| Value::String(name.to_string())),
        );
        info.insert(
            TIME_FIELD.to_string(),
            Value::String(Utc::now().to_rfc3339()),
        );
        info.insert(
            VERSION_FIELD.to_string(),
            Value::String(identity.version().to_string()),
        );

        Self { ok, info }
    }

    /// Merge a named field into the envelope
    ///
    /// Reserved keys (`ok`, `error`, `hostname`, `time`, `version`) are left
    /// untouched, so a successful envelope can never gain an `error` field.
    #[must_use]
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        if !RESERVED_FIELDS.contains(&key) {
            self.info.insert(key.to_string(), value.into());
        }
        self
    }

    /// Attach an HTTP status hint
    #[must_use]
    pub fn with_status_code(self, status_code: u16) -> Self {
        self.with(STATUS_CODE_FIELD, status_code)
    }

    /// Attach the caller's session token
    pub fn attach_session(&mut self, session: &str) {
        self.info
            .insert(SESSION_FIELD.to_string(), Value::String(session.to_string()));
    }

    /// Attach the caller's asserted identity
    pub fn attach_username(&mut self, username: &str) {
        self.info.insert(
            USERNAME_FIELD.to_string(),
            Value::String(username.to_string()),
        );
    }

    /// Whether this envelope reports success
    pub fn is_ok(&self) -> bool {
        self.ok
    }

    /// Whether the envelope carries a field named `key`
    pub fn contains(&self, key: &str) -> bool {
        self.info.contains_key(key)
    }

    /// Raw value of a field
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.info.get(key)
    }

    /// Typed value of a field, or `default` when absent or of another type
    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.info
            .get(key)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
            .unwrap_or(default)
    }

    /// Failure message, if this is a failed envelope
    pub fn error(&self) -> Option<&str> {
        self.info.get(ERROR_FIELD).and_then(Value::as_str)
    }

    /// HTTP status hint, if present and representable
    pub fn status_code(&self) -> Option<u16> {
        self.info
            .get(STATUS_CODE_FIELD)
            .and_then(Value::as_u64)
            .and_then(|code| u16::try_from(code).ok())
    }

    /// Flatten `ok` and every field into a single map
    pub fn to_plain_mapping(&self) -> Map<String, Value> {
        let mut mapping = self.info.clone();
        mapping.insert(OK_FIELD.to_string(), Value::Bool(self.ok));
        mapping
    }
}

impl Serialize for StatusEnvelope {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.info.len() + 1))?;
        map.serialize_entry(OK_FIELD, &self.ok)?;
        for (key, value) in &self.info {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl fmt::Display for StatusEnvelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<StatusEnvelope {}", if self.ok { "OK" } else { "BAD" })?;

        let mut keys: Vec<&String> = self.info.keys().collect();
        keys.sort();
        for key in keys {
            match &self.info[key] {
                Value::String(text) => write!(f, " {key}={text}")?,
                other => write!(f, " {key}={other}")?,
            }
        }

        write!(f, ">")
    }
}
