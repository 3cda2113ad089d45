//! Normalises request records so HTTP and non-HTTP invocations share a shape.
//!
//! For a request carrying a URL:
//! - the host is replaced with a fixed placeholder,
//! - `HttpMethod` is taken from the `"VERB /path"` display name,
//! - `HttpPath` is taken from the URL path, percent-decoded,
//! - the query string, fragment and userinfo are removed from the stored URL.
//!
//! Query strings may carry secrets. They are never copied anywhere, and are
//! removed even when the URL cannot be parsed.
//!
//! `HttpMethod` is read from the display name as this stage sees it. The
//! scope stage runs later and may rename the request from a `Name` span tag,
//! so a record whose original name has no verb can gain `HttpMethod` on a
//! second pass through the chain when the tag name has one.

use common::keys::property;
use common::{EnrichError, RecordKind, TelemetryRecord};
use percent_encoding::percent_decode_str;
use url::Url;

use super::TelemetryInitializer;
use crate::ambient::Ambient;

/// Response code given to requests that have none (non-HTTP triggers).
pub const NO_RESPONSE_CODE: &str = "0";

/// Version marker written into every request record.
pub fn sdk_version() -> String {
    format!("fnenrich: {}", env!("CARGO_PKG_VERSION"))
}

pub struct RequestNormalizer {
    placeholder_host: String,
    sdk_version: String,
}

impl RequestNormalizer {
    pub fn new(placeholder_host: impl Into<String>) -> Self {
        Self {
            placeholder_host: placeholder_host.into(),
            sdk_version: sdk_version(),
        }
    }
}

impl TelemetryInitializer for RequestNormalizer {
    fn name(&self) -> &'static str {
        "request"
    }

    fn initialize(
        &self,
        record: &mut TelemetryRecord,
        _ambient: &Ambient<'_>,
    ) -> Result<(), EnrichError> {
        let has_method = record.has_property(property::HTTP_METHOD);
        let has_path = record.has_property(property::HTTP_PATH);

        let TelemetryRecord {
            context,
            properties,
            kind,
        } = record;
        let RecordKind::Request(request) = kind else {
            return Ok(());
        };

        context.sdk_version.clone_from(&self.sdk_version);

        if request.response_code.is_empty() {
            request.response_code = NO_RESPONSE_CODE.to_owned();
        }

        let Some(raw) = request.url.as_deref() else {
            return Ok(());
        };

        if !has_method {
            if let Some(verb) = verb_from_display_name(&request.name) {
                properties.insert(property::HTTP_METHOD.to_owned(), verb.to_owned());
            }
        }

        let mut url = match Url::parse(raw) {
            Ok(url) => url,
            Err(_) => {
                let stripped = strip_query(raw).to_owned();
                request.url = Some(stripped.clone());
                return Err(EnrichError::MalformedUrl(stripped));
            }
        };

        let mut result = Ok(());
        if url.set_host(Some(&self.placeholder_host)).is_err() {
            result = Err(EnrichError::InvalidHost(self.placeholder_host.clone()));
        }

        if !has_path {
            let path = percent_decode_str(url.path()).decode_utf8_lossy();
            properties.insert(property::HTTP_PATH.to_owned(), path.into_owned());
        }

        url.set_query(None);
        url.set_fragment(None);
        // Both only fail for URLs without a host, which cannot carry userinfo.
        let _ = url.set_username("");
        let _ = url.set_password(None);
        request.url = Some(url.into());

        result
    }
}

/// `"GET /orders/5"` → `Some("GET")`. `None` if there is no space past the
/// first character.
fn verb_from_display_name(name: &str) -> Option<&str> {
    match name.find(' ') {
        Some(idx) if idx > 0 => Some(&name[..idx]),
        _ => None,
    }
}

/// Drop the query string and fragment of an unparsable URL.
fn strip_query(raw: &str) -> &str {
    let end = raw.find(|c: char| c == '?' || c == '#').unwrap_or(raw.len());
    &raw[..end]
}
