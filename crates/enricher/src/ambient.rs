//! Per-record ambient context handed to every initializer.

use common::{ActivityTags, AmbientScope};
use opentelemetry::KeyValue;

/// Ambient state of the invocation that emitted a record.
///
/// Either part may be absent: records emitted outside a function invocation
/// have no scope, and records emitted outside a span have no activity.
#[derive(Debug, Default, Clone, Copy)]
pub struct Ambient<'a> {
    /// Logged scope of the running invocation.
    pub scope: Option<&'a AmbientScope>,
    /// Tags of the currently active span.
    pub activity: Option<&'a ActivityTags>,
}

impl<'a> Ambient<'a> {
    pub fn new(scope: Option<&'a AmbientScope>, activity: Option<&'a ActivityTags>) -> Self {
        Self { scope, activity }
    }

    /// No scope and no active span.
    pub fn none() -> Self {
        Self::default()
    }
}

/// Build [`ActivityTags`] from OpenTelemetry span attributes, keeping order.
///
/// Non-string values are rendered with their display form.
pub fn activity_tags_from_attributes(attributes: &[KeyValue]) -> ActivityTags {
    attributes
        .iter()
        .map(|kv| (kv.key.as_str().to_owned(), kv.value.as_str().into_owned()))
        .collect()
}
