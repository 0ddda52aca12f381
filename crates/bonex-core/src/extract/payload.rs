//! Recovery of the structured payload from a free-form engine response.

use serde_json::Value;

use super::patterns::PAYLOAD_SPAN;
use super::Result;
use crate::error::ExtractError;

/// Decode the JSON object embedded in an engine response.
///
/// The span from the first `{` to the last `}` is taken as the payload
/// and the surrounding text is ignored. Two failures are kept distinct:
/// no span at all versus a span that is not valid JSON.
pub fn decode_payload(response: &str) -> Result<Value> {
    let span = PAYLOAD_SPAN
        .find(response)
        .ok_or(ExtractError::NoPayloadFound)?;

    serde_json::from_str(span.as_str()).map_err(|e| ExtractError::MalformedPayload(e.to_string()))
}
