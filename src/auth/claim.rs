// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Auth Gateway Authors

//! Claim wire type and codec.
//!
//! Claims cross two serialization boundaries: the directory's login response
//! and the session token payload. Both use the same PascalCase JSON object
//! with `Type` and `Value` always present and the provenance fields written
//! only when non-empty.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Generic string value-type marker (XML schema URI, as used on the wire).
pub const VALUE_TYPE_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";

/// 64-bit integer value-type marker, used for the issued-at claim.
pub const VALUE_TYPE_INTEGER64: &str = "http://www.w3.org/2001/XMLSchema#integer64";

/// Issuer recorded for claims minted locally or received without provenance.
pub const DEFAULT_ISSUER: &str = "LOCAL AUTHORITY";

/// A typed assertion about an authenticated subject, with provenance.
///
/// Decoding is tolerant: a minimal `{"Type":...,"Value":...}` object is
/// valid, and the absent optional fields take the documented defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Claim {
    /// Claim type, e.g. `"role"` or `"fullName"`.
    #[serde(rename = "Type", default)]
    pub claim_type: String,

    /// Claim value.
    #[serde(rename = "Value", default)]
    pub value: String,

    /// Value type marker; defaults to the generic string marker.
    #[serde(
        rename = "ValueType",
        default = "default_value_type",
        skip_serializing_if = "String::is_empty"
    )]
    pub value_type: String,

    /// Authority that issued this claim.
    #[serde(
        rename = "Issuer",
        default = "default_issuer",
        skip_serializing_if = "String::is_empty"
    )]
    pub issuer: String,

    /// Authority the claim originated from, before any re-issuing.
    #[serde(
        rename = "OriginalIssuer",
        default = "default_issuer",
        skip_serializing_if = "String::is_empty"
    )]
    pub original_issuer: String,
}

fn default_value_type() -> String {
    VALUE_TYPE_STRING.to_string()
}

fn default_issuer() -> String {
    DEFAULT_ISSUER.to_string()
}

impl Claim {
    /// Create a string-typed claim with local provenance.
    pub fn new(claim_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self::with_value_type(claim_type, value, VALUE_TYPE_STRING)
    }

    /// Create a claim with an explicit value type and local provenance.
    pub fn with_value_type(
        claim_type: impl Into<String>,
        value: impl Into<String>,
        value_type: impl Into<String>,
    ) -> Self {
        Self {
            claim_type: claim_type.into(),
            value: value.into(),
            value_type: value_type.into(),
            issuer: DEFAULT_ISSUER.to_string(),
            original_issuer: DEFAULT_ISSUER.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_writes_all_non_empty_fields() {
        let claim = Claim {
            claim_type: "role".to_string(),
            value: "Admin".to_string(),
            value_type: VALUE_TYPE_STRING.to_string(),
            issuer: "directory".to_string(),
            original_issuer: "directory".to_string(),
        };

        let json = serde_json::to_value(&claim).unwrap();
        assert_eq!(json["Type"], "role");
        assert_eq!(json["Value"], "Admin");
        assert_eq!(json["ValueType"], VALUE_TYPE_STRING);
        assert_eq!(json["Issuer"], "directory");
        assert_eq!(json["OriginalIssuer"], "directory");
    }

    #[test]
    fn encode_skips_empty_optional_fields() {
        let claim = Claim {
            claim_type: "role".to_string(),
            value: "Admin".to_string(),
            value_type: String::new(),
            issuer: String::new(),
            original_issuer: String::new(),
        };

        let json = serde_json::to_value(&claim).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert!(object.contains_key("Type"));
        assert!(object.contains_key("Value"));
    }

    #[test]
    fn decode_defaults_absent_optional_fields() {
        let claim: Claim =
            serde_json::from_str(r#"{"Type":"fullName","Value":"Ada Lovelace"}"#).unwrap();

        assert_eq!(claim.claim_type, "fullName");
        assert_eq!(claim.value, "Ada Lovelace");
        assert_eq!(claim.value_type, VALUE_TYPE_STRING);
        assert_eq!(claim.issuer, DEFAULT_ISSUER);
        assert_eq!(claim.original_issuer, DEFAULT_ISSUER);
    }

    #[test]
    fn decode_tolerates_missing_type_and_value() {
        let claim: Claim = serde_json::from_str("{}").unwrap();
        assert_eq!(claim.claim_type, "");
        assert_eq!(claim.value, "");
    }

    #[test]
    fn round_trip_preserves_full_claims() {
        let original = Claim {
            claim_type: "email".to_string(),
            value: "ada@example.com".to_string(),
            value_type: VALUE_TYPE_STRING.to_string(),
            issuer: "directory".to_string(),
            original_issuer: "upstream-idp".to_string(),
        };

        let encoded = serde_json::to_string(&original).unwrap();
        let decoded: Claim = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn new_fills_local_defaults() {
        let claim = Claim::new("role", "User");
        assert_eq!(claim.value_type, VALUE_TYPE_STRING);
        assert_eq!(claim.issuer, DEFAULT_ISSUER);
        assert_eq!(claim.original_issuer, DEFAULT_ISSUER);
    }
}
