//! Core type definitions: datatype identifiers and column constraints.

use std::cmp::Ordering;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

/// Namespace prefix of XML Schema datatype URIs.
pub const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema#";

// A bare leading zero selects octal, so `010` is eight and `08` is rejected.
static INTEGER_LITERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[+-]?(0[xX][0-9a-fA-F]+(_[0-9a-fA-F]+)*|0[bB][01]+(_[01]+)*|0[dD][0-9]+(_[0-9]+)*|0[oO]?[0-7]+(_[0-7]+)*|0|[1-9][0-9]*(_[0-9]+)*)$",
    )
    .unwrap()
});

static FLOAT_LITERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?[0-9]+(_[0-9]+)*(\.[0-9]+(_[0-9]+)*)?([eE][+-]?[0-9]+(_[0-9]+)*)?$").unwrap()
});

/// Datatype a column's values must convert to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldType {
    Int,
    Float,
    Double,
    #[serde(rename = "anyURI")]
    AnyUri,
    Boolean,
    NonPositiveInteger,
    NegativeInteger,
    NonNegativeInteger,
    PositiveInteger,
}

/// Outcome of checking one value against a [`FieldType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeCheck {
    /// Converted and satisfies the type's policy.
    Valid,
    /// Converted, but violates the sign, range or scheme policy.
    Violation,
    /// Not a literal of this type.
    ConversionFailed,
}

impl TypeCheck {
    pub fn is_valid(&self) -> bool {
        matches!(self, TypeCheck::Valid)
    }
}

impl FieldType {
    pub const ALL: [FieldType; 9] = [
        FieldType::Int,
        FieldType::Float,
        FieldType::Double,
        FieldType::AnyUri,
        FieldType::Boolean,
        FieldType::NonPositiveInteger,
        FieldType::NegativeInteger,
        FieldType::NonNegativeInteger,
        FieldType::PositiveInteger,
    ];

    /// Local name within the XML Schema namespace.
    pub fn local_name(&self) -> &'static str {
        match self {
            FieldType::Int => "int",
            FieldType::Float => "float",
            FieldType::Double => "double",
            FieldType::AnyUri => "anyURI",
            FieldType::Boolean => "boolean",
            FieldType::NonPositiveInteger => "nonPositiveInteger",
            FieldType::NegativeInteger => "negativeInteger",
            FieldType::NonNegativeInteger => "nonNegativeInteger",
            FieldType::PositiveInteger => "positiveInteger",
        }
    }

    /// Canonical identifier, e.g. `http://www.w3.org/2001/XMLSchema#int`.
    pub fn uri(&self) -> String {
        format!("{}{}", XSD_NAMESPACE, self.local_name())
    }

    /// Resolve a type identifier.
    ///
    /// Accepts the full XML Schema URI, the `xsd:` prefixed form, or the
    /// bare local name. Unrecognized identifiers return `None`.
    pub fn from_uri(identifier: &str) -> Option<Self> {
        let identifier = identifier.trim();
        let local = identifier
            .strip_prefix(XSD_NAMESPACE)
            .or_else(|| identifier.strip_prefix("xsd:"))
            .unwrap_or(identifier);
        Self::ALL.into_iter().find(|t| t.local_name() == local)
    }

    /// Check a raw value against this type.
    pub fn check(&self, value: &str) -> TypeCheck {
        match self {
            FieldType::Int => match integer_sign(value) {
                Some(_) => TypeCheck::Valid,
                None => TypeCheck::ConversionFailed,
            },
            FieldType::Float | FieldType::Double => match parse_float(value) {
                Some(_) => TypeCheck::Valid,
                None => TypeCheck::ConversionFailed,
            },
            FieldType::AnyUri => match Url::parse(value) {
                Ok(url) if matches!(url.scheme(), "http" | "https") => TypeCheck::Valid,
                Ok(_) => TypeCheck::Violation,
                Err(_) => TypeCheck::ConversionFailed,
            },
            FieldType::Boolean => match parse_boolean(value) {
                Some(_) => TypeCheck::Valid,
                None => TypeCheck::ConversionFailed,
            },
            FieldType::NonPositiveInteger => check_integer(value, Ordering::is_le),
            FieldType::NegativeInteger => check_integer(value, Ordering::is_lt),
            FieldType::NonNegativeInteger => check_integer(value, Ordering::is_ge),
            FieldType::PositiveInteger => check_integer(value, Ordering::is_gt),
        }
    }
}

fn check_integer(value: &str, policy: impl Fn(Ordering) -> bool) -> TypeCheck {
    match integer_sign(value) {
        Some(sign) if policy(sign) => TypeCheck::Valid,
        Some(_) => TypeCheck::Violation,
        None => TypeCheck::ConversionFailed,
    }
}

/// Recognize an integer literal and report its sign relative to zero.
///
/// Accepts an optional sign, `0x`/`0b`/`0o`/`0d` radix prefixes, a bare
/// leading `0` for octal, and single underscores between digits.
/// Surrounding whitespace is ignored. Literals are unbounded: only the
/// digits are inspected, never converted to a machine integer.
pub fn integer_sign(value: &str) -> Option<Ordering> {
    let trimmed = value.trim();
    if !INTEGER_LITERAL.is_match(trimmed) {
        return None;
    }

    let (negative, unsigned) = match trimmed.as_bytes()[0] {
        b'-' => (true, &trimmed[1..]),
        b'+' => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits = match unsigned.get(..2).map(|p| p.to_ascii_lowercase()) {
        Some(p) if matches!(p.as_str(), "0x" | "0b" | "0o" | "0d") => &unsigned[2..],
        _ => unsigned,
    };

    if digits.bytes().all(|b| b == b'0' || b == b'_') {
        Some(Ordering::Equal)
    } else if negative {
        Some(Ordering::Less)
    } else {
        Some(Ordering::Greater)
    }
}

/// Parse a decimal floating-point literal. `NaN` and `Infinity` are rejected.
pub fn parse_float(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if !FLOAT_LITERAL.is_match(trimmed) {
        return None;
    }
    let cleaned: String = trimmed.chars().filter(|c| *c != '_').collect();
    cleaned.parse::<f64>().ok().filter(|f| f.is_finite())
}

/// `true`/`1` and `false`/`0`, exact match.
pub fn parse_boolean(value: &str) -> Option<bool> {
    match value {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

/// Constraint set attached to a column in a schema document.
///
/// Missing keys take their defaults; unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Constraints {
    /// Value must be present and non-empty.
    pub required: bool,
    /// Minimum length in characters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    /// Maximum length in characters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    /// Regular expression the value must match (unanchored).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// No value may repeat within one validation session.
    pub unique: bool,
    /// Datatype identifier, see [`FieldType::from_uri`].
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_uri: Option<String>,
}

impl Constraints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn with_min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    pub fn with_max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn with_type(mut self, field_type: FieldType) -> Self {
        self.type_uri = Some(field_type.uri());
        self
    }

    /// Set the raw type identifier, recognized or not.
    pub fn with_type_uri(mut self, uri: impl Into<String>) -> Self {
        self.type_uri = Some(uri.into());
        self
    }

    /// True if no constraint is configured.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_uri_forms() {
        assert_eq!(
            FieldType::from_uri("http://www.w3.org/2001/XMLSchema#int"),
            Some(FieldType::Int)
        );
        assert_eq!(FieldType::from_uri("xsd:anyURI"), Some(FieldType::AnyUri));
        assert_eq!(
            FieldType::from_uri("positiveInteger"),
            Some(FieldType::PositiveInteger)
        );
        assert_eq!(FieldType::from_uri("http://www.w3.org/2001/XMLSchema#date"), None);
        assert_eq!(FieldType::from_uri("string"), None);
    }

    #[test]
    fn test_uri_round_trips_through_lookup() {
        for field_type in FieldType::ALL {
            assert_eq!(FieldType::from_uri(&field_type.uri()), Some(field_type));
        }
    }

    #[test]
    fn test_integer_literals() {
        assert_eq!(integer_sign("42"), Some(Ordering::Greater));
        assert_eq!(integer_sign(" -7 "), Some(Ordering::Less));
        assert_eq!(integer_sign("+3"), Some(Ordering::Greater));
        assert_eq!(integer_sign("1_000"), Some(Ordering::Greater));
        assert_eq!(integer_sign("0x1A"), Some(Ordering::Greater));
        assert_eq!(integer_sign("0b101"), Some(Ordering::Greater));
        assert_eq!(integer_sign("-0o17"), Some(Ordering::Less));
        assert_eq!(integer_sign("0d19"), Some(Ordering::Greater));
        assert_eq!(integer_sign("0"), Some(Ordering::Equal));
        assert_eq!(integer_sign("-0x00"), Some(Ordering::Equal));
        assert_eq!(integer_sign(""), None);
        assert_eq!(integer_sign("-"), None);
        assert_eq!(integer_sign("1.5"), None);
        assert_eq!(integer_sign("1__0"), None);
        assert_eq!(integer_sign("_1"), None);
        assert_eq!(integer_sign("abc"), None);
        assert_eq!(integer_sign("0x"), None);
    }

    #[test]
    fn test_leading_zero_is_octal() {
        assert_eq!(integer_sign("010"), Some(Ordering::Greater));
        assert_eq!(integer_sign("-007"), Some(Ordering::Less));
        assert_eq!(integer_sign("00"), Some(Ordering::Equal));
        assert_eq!(integer_sign("08"), None);
        assert_eq!(integer_sign("019"), None);
        assert_eq!(FieldType::Int.check("08"), TypeCheck::ConversionFailed);
        assert_eq!(FieldType::Int.check("010"), TypeCheck::Valid);
    }

    #[test]
    fn test_integers_are_unbounded() {
        let big = "12345678901234567890";
        assert_eq!(integer_sign(big), Some(Ordering::Greater));
        assert_eq!(integer_sign("99999999999999999999"), Some(Ordering::Greater));
        assert_eq!(FieldType::Int.check(big), TypeCheck::Valid);
        assert_eq!(FieldType::PositiveInteger.check(big), TypeCheck::Valid);
        assert_eq!(FieldType::NonNegativeInteger.check(big), TypeCheck::Valid);

        let negative = format!("-{}", big);
        assert_eq!(FieldType::Int.check(&negative), TypeCheck::Valid);
        assert_eq!(FieldType::PositiveInteger.check(&negative), TypeCheck::Violation);
        assert_eq!(FieldType::NegativeInteger.check(&negative), TypeCheck::Valid);
    }

    #[test]
    fn test_float_literals() {
        assert_eq!(parse_float("1.5"), Some(1.5));
        assert_eq!(parse_float("-2"), Some(-2.0));
        assert_eq!(parse_float("1e3"), Some(1000.0));
        assert_eq!(parse_float("1_000.25"), Some(1000.25));
        assert_eq!(parse_float("NaN"), None);
        assert_eq!(parse_float("Infinity"), None);
        assert_eq!(parse_float("1."), None);
        assert_eq!(parse_float("x"), None);
    }

    #[test]
    fn test_boolean() {
        assert_eq!(FieldType::Boolean.check("true"), TypeCheck::Valid);
        assert_eq!(FieldType::Boolean.check("0"), TypeCheck::Valid);
        assert_eq!(FieldType::Boolean.check("yes"), TypeCheck::ConversionFailed);
        assert_eq!(FieldType::Boolean.check("TRUE"), TypeCheck::ConversionFailed);
    }

    #[test]
    fn test_any_uri() {
        assert_eq!(FieldType::AnyUri.check("http://example.org/x"), TypeCheck::Valid);
        assert_eq!(FieldType::AnyUri.check("https://example.org"), TypeCheck::Valid);
        assert_eq!(FieldType::AnyUri.check("ftp://example.org"), TypeCheck::Violation);
        assert_eq!(FieldType::AnyUri.check("not a uri"), TypeCheck::ConversionFailed);
    }

    #[test]
    fn test_sign_policies() {
        assert_eq!(FieldType::NonPositiveInteger.check("0"), TypeCheck::Valid);
        assert_eq!(FieldType::NonPositiveInteger.check("1"), TypeCheck::Violation);
        assert_eq!(FieldType::NegativeInteger.check("0"), TypeCheck::Violation);
        assert_eq!(FieldType::NegativeInteger.check("-1"), TypeCheck::Valid);
        assert_eq!(FieldType::NonNegativeInteger.check("0"), TypeCheck::Valid);
        assert_eq!(FieldType::NonNegativeInteger.check("-1"), TypeCheck::Violation);
        assert_eq!(FieldType::PositiveInteger.check("0"), TypeCheck::Violation);
        assert_eq!(FieldType::PositiveInteger.check("5"), TypeCheck::Valid);
        assert_eq!(FieldType::PositiveInteger.check("five"), TypeCheck::ConversionFailed);
    }

    #[test]
    fn test_constraints_deserialize() {
        let constraints: Constraints = serde_json::from_str(
            r#"{"required": true, "minLength": 1, "maxLength": 5, "pattern": "^a", "unique": true,
                "type": "http://www.w3.org/2001/XMLSchema#int", "somethingElse": 3}"#,
        )
        .unwrap();
        assert!(constraints.required);
        assert_eq!(constraints.min_length, Some(1));
        assert_eq!(constraints.max_length, Some(5));
        assert_eq!(constraints.pattern.as_deref(), Some("^a"));
        assert!(constraints.unique);
        assert_eq!(
            constraints.type_uri.as_deref().and_then(FieldType::from_uri),
            Some(FieldType::Int)
        );
    }

    #[test]
    fn test_constraints_empty_object() {
        let constraints: Constraints = serde_json::from_str("{}").unwrap();
        assert!(constraints.is_empty());
        assert_eq!(constraints, Constraints::default());
    }
}
