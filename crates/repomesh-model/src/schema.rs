//! # Event Schema Validation
//!
//! Validates a deserialized [`Event`](crate::event::Event) against an
//! embedded JSON Schema (Draft 2020-12), using the `jsonschema` crate —
//! the same validator the teacher's `msez-schema` crate chose. Unlike the
//! teacher's placeholder `SchemaValidator` (which only held a schema
//! directory path), this one is fully wired: the schema is compiled once
//! from an embedded string constant and validation failures are reported
//! with the violating instance path.

use std::sync::OnceLock;

use jsonschema::Validator;
use thiserror::Error;

// jsonschema API note: grounded on the teacher's nested `msez-schema`
// validator, which builds via `jsonschema::options().with_draft(...).build()`
// rather than the older `JSONSchema::compile` free function.

const EVENT_SCHEMA: &str = r#"{
  "$schema": "https://json-schema.org/draft/2020-12/schema",
  "title": "RepomeshEvent",
  "type": "object",
  "required": ["type", "repo", "version", "commit", "timestamp"],
  "properties": {
    "type": {
      "type": "string",
      "enum": [
        "ReleasePublished",
        "AttestationPublished",
        "PolicyViolation",
        "BreakingChangeDetected",
        "HealthCheckFailed",
        "DependencyVulnFound",
        "InterfaceUpdated"
      ]
    },
    "repo": { "type": "string", "minLength": 3 },
    "version": { "type": "string", "minLength": 1 },
    "commit": { "type": "string", "minLength": 1 },
    "timestamp": { "type": "string", "minLength": 1 },
    "artifacts": {
      "type": "array",
      "items": {
        "type": "object",
        "required": ["name", "sha256", "uri"],
        "properties": {
          "name": { "type": "string" },
          "sha256": { "type": "string", "pattern": "^[0-9a-fA-F]{64}$" },
          "uri": { "type": "string" }
        }
      }
    },
    "attestations": {
      "type": "array",
      "items": {
        "type": "object",
        "required": ["type", "uri"],
        "properties": {
          "type": { "type": "string" },
          "uri": { "type": "string" }
        }
      }
    },
    "notes": { "type": "string" },
    "signature": {
      "type": ["object", "null"],
      "properties": {
        "alg": { "type": "string" },
        "keyId": { "type": "string" },
        "value": { "type": "string" },
        "canonicalHash": { "type": "string", "pattern": "^[0-9a-fA-F]{64}$" }
      }
    }
  }
}"#;

static COMPILED: OnceLock<Validator> = OnceLock::new();

fn compiled_schema() -> &'static Validator {
    COMPILED.get_or_init(|| {
        let schema: serde_json::Value =
            serde_json::from_str(EVENT_SCHEMA).expect("embedded schema is valid JSON");
        jsonschema::options()
            .with_draft(jsonschema::Draft::Draft202012)
            .build(&schema)
            .expect("embedded schema is a valid JSON Schema")
    })
}

/// A schema conformance failure, carrying the `jsonschema` instance path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("schema violation at {instance_path}: {message}")]
pub struct SchemaViolation {
    /// JSON Pointer to the offending value.
    pub instance_path: String,
    /// Human-readable description of the violation.
    pub message: String,
}

/// Validate a raw JSON value against the embedded event schema.
///
/// This runs before `serde` deserialization in the admission pipeline
/// conceptually (`spec.md` §4.2 item 3), but is exposed here as a
/// standalone function so callers can validate either a parsed `Value` or
/// one produced from an already-deserialized `Event`.
pub fn validate_event_json(value: &serde_json::Value) -> Result<(), SchemaViolation> {
    let validator = compiled_schema();
    if let Some(error) = validator.iter_errors(value).next() {
        return Err(SchemaViolation {
            instance_path: error.instance_path.to_string(),
            message: error.to_string(),
        });
    }
    Ok(())
}
