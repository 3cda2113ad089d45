//! The telemetry record model.
//!
//! A [`TelemetryRecord`] carries the fields common to every variant (the
//! [`TelemetryContext`] and a string property bag) plus a [`RecordKind`]
//! holding the variant-specific payload. Empty strings mean "unset" for every
//! context field.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Unordered string → string property bag.
pub type Properties = HashMap<String, String>;

// ---------------------------------------------------------------------------
// Context
// ---------------------------------------------------------------------------

/// Contextual metadata attached to every telemetry record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryContext {
    /// Logical service name (cloud role).
    pub cloud_role_name: String,
    /// The running replica emitting this record.
    pub cloud_role_instance: String,
    /// Host node name.
    pub node_name: String,
    /// Source (client) IP address.
    pub location_ip: String,
    /// Name of the logical operation this record belongs to.
    pub operation_name: String,
    /// Version marker of the component that last enriched the record.
    pub sdk_version: String,
}

// ---------------------------------------------------------------------------
// Variants
// ---------------------------------------------------------------------------

/// Trace severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeverityLevel {
    Verbose,
    #[default]
    Information,
    Warning,
    Error,
    Critical,
}

/// A free-form log line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceData {
    pub message: String,
    pub severity: SeverityLevel,
}

/// An inbound invocation, HTTP-originated or not.
///
/// Non-HTTP triggers (queues, timers) are modelled as requests too; they are
/// told apart by the absence of [`RequestData::url`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestData {
    /// Display name, conventionally `"VERB /path"` for HTTP requests.
    pub name: String,
    pub response_code: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub duration_ms: u64,
}

/// An outbound call made by the function.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DependencyData {
    pub name: String,
    pub target: String,
    pub dependency_type: String,
    pub result_code: String,
    pub success: bool,
    pub duration_ms: u64,
}

/// A captured error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExceptionData {
    pub type_name: String,
    pub message: String,
}

/// Variant-specific payload of a [`TelemetryRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RecordKind {
    Trace(TraceData),
    Request(RequestData),
    Dependency(DependencyData),
    Exception(ExceptionData),
}

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// One diagnostic event about to be handed to the transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryRecord {
    #[serde(default)]
    pub context: TelemetryContext,
    #[serde(default)]
    pub properties: Properties,
    #[serde(flatten)]
    pub kind: RecordKind,
}

impl TelemetryRecord {
    /// Wrap a variant payload with an empty context and property bag.
    pub fn new(kind: RecordKind) -> Self {
        Self {
            context: TelemetryContext::default(),
            properties: Properties::new(),
            kind,
        }
    }

    /// Construct a trace record.
    pub fn trace(message: impl Into<String>) -> Self {
        Self::new(RecordKind::Trace(TraceData {
            message: message.into(),
            severity: SeverityLevel::Information,
        }))
    }

    /// Construct a request record with the given display name and optional URL.
    pub fn request(name: impl Into<String>, url: Option<&str>) -> Self {
        Self::new(RecordKind::Request(RequestData {
            name: name.into(),
            url: url.map(str::to_owned),
            ..RequestData::default()
        }))
    }

    /// Construct a dependency record.
    pub fn dependency(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self::new(RecordKind::Dependency(DependencyData {
            name: name.into(),
            target: target.into(),
            ..DependencyData::default()
        }))
    }

    /// Returns `true` if this record represents an inbound request.
    pub fn is_request(&self) -> bool {
        matches!(self.kind, RecordKind::Request(_))
    }

    /// Borrow the request payload, if this is a request record.
    pub fn as_request(&self) -> Option<&RequestData> {
        match &self.kind {
            RecordKind::Request(r) => Some(r),
            _ => None,
        }
    }

    /// Mutably borrow the request payload, if this is a request record.
    pub fn as_request_mut(&mut self) -> Option<&mut RequestData> {
        match &mut self.kind {
            RecordKind::Request(r) => Some(r),
            _ => None,
        }
    }

    /// Returns `true` if `key` is present with a non-empty value.
    pub fn has_property(&self, key: &str) -> bool {
        self.properties.get(key).is_some_and(|v| !v.is_empty())
    }
}

/// Assign `value` to `slot` only when `slot` is empty.
///
/// Returns `true` if the slot was filled.
pub fn fill_if_empty(slot: &mut String, value: &str) -> bool {
    if slot.is_empty() && !value.is_empty() {
        value.clone_into(slot);
        true
    } else {
        false
    }
}
