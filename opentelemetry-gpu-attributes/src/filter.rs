//! # Attribute filter engine
//!
//! Rewrites the attributes of a single data point so only the keys allowed by
//! a [`SchemaDefinition`] remain. Blob attributes, whose value is a string
//! holding a JSON object, are filtered a second time at the level of the
//! object's keys.
//!
//! Filtering is idempotent and fail-open: a blob that cannot be decoded is
//! left exactly as it was, and every other attribute is still filtered.
use std::collections::{BTreeMap, HashSet};

use opentelemetry::otel_warn;
use opentelemetry_proto::tonic::common::v1::{any_value, AnyValue, KeyValue};
use serde_json::value::RawValue;

use crate::error::BlobError;
use crate::schema::SchemaDefinition;

/// Decoded blob. Values are kept as raw JSON so they are copied verbatim, and
/// the ordered map makes the encoded output independent of the input order.
/// Raw values are not compacted: whitespace inside a kept value survives.
type Blob = BTreeMap<String, Box<RawValue>>;

/// Filters `attributes` in place against `schema`.
///
/// Attributes whose key is not allowed are removed. For every allowed blob
/// attribute, the JSON object it holds is reduced to the allowed sub-keys and
/// encoded back into the attribute. Failures on a blob are reported as
/// warnings and leave that attribute untouched.
///
/// A schema with an empty flat allow-list leaves the attributes unchanged.
pub fn filter_attributes(attributes: &mut Vec<KeyValue>, schema: &SchemaDefinition) {
    if schema.is_empty() {
        return;
    }

    attributes.retain(|kv| schema.allows(&kv.key));

    for blob_key in schema.blob_keys() {
        let Some(allowed) = schema.blob_allow_list(blob_key) else {
            continue;
        };
        let Some(attribute) = attributes.iter_mut().find(|kv| kv.key == blob_key) else {
            continue;
        };

        match filter_blob(attribute, allowed) {
            Ok(filtered) => {
                attribute.value = Some(AnyValue {
                    value: Some(any_value::Value::StringValue(filtered)),
                });
            }
            Err(err @ BlobError::Encode { .. }) => {
                otel_warn!(
                    name: "GpuAttributesProcessor.BlobEncodeFailed",
                    attribute = blob_key,
                    error = err.to_string()
                );
            }
            Err(err) => {
                otel_warn!(
                    name: "GpuAttributesProcessor.BlobDecodeFailed",
                    attribute = blob_key,
                    error = err.to_string()
                );
            }
        }
    }
}

/// Decodes the JSON object held by `attribute`, keeps the `allowed` keys and
/// returns the re-encoded object.
pub(crate) fn filter_blob(
    attribute: &KeyValue,
    allowed: &HashSet<String>,
) -> Result<String, BlobError> {
    let encoded = match attribute.value.as_ref().and_then(|v| v.value.as_ref()) {
        Some(any_value::Value::StringValue(s)) => s,
        _ => {
            return Err(BlobError::NotAString {
                key: attribute.key.clone(),
            })
        }
    };

    let blob: Blob = serde_json::from_str(encoded).map_err(|source| BlobError::Decode {
        key: attribute.key.clone(),
        source,
    })?;

    let filtered: Blob = blob
        .into_iter()
        .filter(|(key, _)| allowed.contains(key))
        .collect();

    serde_json::to_string(&filtered).map_err(|source| BlobError::Encode {
        key: attribute.key.clone(),
        source,
    })
}
