//! Projects the ambient invocation scope and active span tags onto a record.
//!
//! Scope entries (function name, invocation id, category, log level, event id
//! and name) apply to every record. Span tags apply to request records only:
//! `Name`, `Succeeded` and `ClientIp` map onto typed fields, `ai_*` tags are
//! dropped, and everything else is copied into the property bag.

use common::keys::{property, scope, tag};
use common::record::Properties;
use common::{AmbientScope, EnrichError, RecordKind, TelemetryRecord};
use tracing::debug;

use super::TelemetryInitializer;
use crate::ambient::Ambient;

/// Scope entries copied verbatim into the property bag.
const COPIED_SCOPE_ENTRIES: [(&str, &str); 4] = [
    (scope::INVOCATION_ID, property::INVOCATION_ID),
    (scope::CATEGORY, property::CATEGORY),
    (scope::LOG_LEVEL, property::LOG_LEVEL),
    (scope::EVENT_NAME, property::EVENT_NAME),
];

#[derive(Debug, Default)]
pub struct ScopeProjector;

impl ScopeProjector {
    pub fn new() -> Self {
        Self
    }
}

impl TelemetryInitializer for ScopeProjector {
    fn name(&self) -> &'static str {
        "scope"
    }

    fn initialize(
        &self,
        record: &mut TelemetryRecord,
        ambient: &Ambient<'_>,
    ) -> Result<(), EnrichError> {
        if let Some(scope) = ambient.scope.filter(|s| !s.is_empty()) {
            project_scope(record, scope);
        }

        match ambient.activity {
            Some(tags) => project_tags(record, tags.iter()),
            None => Ok(()),
        }
    }
}

fn project_scope(record: &mut TelemetryRecord, ambient: &AmbientScope) {
    if let Some(function_name) = ambient.get_str(scope::FUNCTION_NAME) {
        record.context.operation_name = function_name;
    }

    for (scope_key, property_key) in COPIED_SCOPE_ENTRIES {
        if let Some(value) = ambient.get_str(scope_key) {
            record.properties.insert(property_key.to_owned(), value);
        }
    }

    // Event id 0 means "not set"; negative ids are never assigned.
    match ambient.get_i64(scope::EVENT_ID) {
        Some(id) if id > 0 => {
            record
                .properties
                .insert(property::EVENT_ID.to_owned(), id.to_string());
        }
        Some(id) => debug!(event_id = id, "skipping unset event id"),
        None => {}
    }
}

fn project_tags<'t>(
    record: &mut TelemetryRecord,
    tags: impl Iterator<Item = (&'t str, &'t str)>,
) -> Result<(), EnrichError> {
    let TelemetryRecord {
        context,
        properties,
        kind,
    } = record;
    let RecordKind::Request(request) = kind else {
        return Ok(());
    };

    let mut result = Ok(());
    for (key, value) in tags {
        match key {
            tag::NAME => {
                value.clone_into(&mut context.operation_name);
                value.clone_into(&mut request.name);
            }
            tag::SUCCEEDED => match parse_bool(value) {
                Some(succeeded) => {
                    request.success = succeeded;
                    properties.remove(property::SUCCEEDED);
                }
                None => {
                    debug!(value, "ignoring unparsable Succeeded tag");
                    if result.is_ok() {
                        result = Err(EnrichError::InvalidSuccessFlag(value.to_owned()));
                    }
                }
            },
            tag::CLIENT_IP => value.clone_into(&mut context.location_ip),
            _ if key.starts_with(tag::RESERVED_PREFIX) => {}
            _ => copy_tag(properties, key, value),
        }
    }
    result
}

fn copy_tag(properties: &mut Properties, key: &str, value: &str) {
    properties.insert(key.to_owned(), value.to_owned());
}

/// Case-insensitive `true`/`false`, surrounding whitespace ignored.
fn parse_bool(value: &str) -> Option<bool> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}
