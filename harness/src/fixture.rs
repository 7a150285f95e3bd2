//! Search-vector fixtures: named (sequence, target, expectation) cases in JSON.
//!
//! # Format (`search_vectors.v1`)
//!
//! ```json
//! {"schema_version": "search_vectors.v1",
//!  "vectors": [
//!    {"name": "found_first", "sequence": [3, 7, 9], "target": 3, "expect": 0},
//!    {"name": "absent", "sequence": [3, 7], "target": 5, "expect": "not_found"},
//!    {"name": "dup", "sequence": [4, 4], "target": 4, "expect": "found"},
//!    {"name": "bad", "sequence": [3], "target": "hi", "expect": "type_mismatch"}
//!  ]}
//! ```
//!
//! Sequence elements and targets are JSON integers, floats, or strings.
//!
//! # Validation
//!
//! The search itself never checks its precondition. The loader does, because
//! an unsorted or mixed-kind vector would make every variant's result
//! meaningless:
//!
//! - vector names are unique
//! - each sequence holds a single [`ValueKind`] and is non-decreasing
//! - an index expectation is in bounds and points at an element equal to the target

use std::cmp::Ordering;
use std::path::Path;

use probe_kernel::value::{Value, ValueKind};

use crate::canon::canonical_json_bytes;
use crate::hash::{canonical_hash, ContentHash, HashDomain};

/// Schema identifier every fixture must declare.
pub const FIXTURE_SCHEMA_VERSION: &str = "search_vectors.v1";

/// The built-in course vectors.
pub const COURSE_VECTORS_JSON: &str = include_str!("../fixtures/course_vectors.json");

/// What a correct search must produce for a vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expectation {
    /// Exactly this index.
    Index(usize),
    /// Any index holding an element equal to the target.
    Found,
    NotFound,
    TypeMismatch,
}

impl Expectation {
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Index(i) => serde_json::Value::from(*i),
            Self::Found => serde_json::Value::from("found"),
            Self::NotFound => serde_json::Value::from("not_found"),
            Self::TypeMismatch => serde_json::Value::from("type_mismatch"),
        }
    }
}

/// One named search case.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchVector {
    pub name: String,
    pub sequence: Vec<Value>,
    pub target: Value,
    pub expect: Expectation,
}

impl SearchVector {
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "name": self.name,
            "sequence": self.sequence.iter().map(value_to_json).collect::<Vec<_>>(),
            "target": value_to_json(&self.target),
            "expect": self.expect.to_json(),
        })
    }
}

/// A parsed, validated fixture.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorFixtureV1 {
    pub vectors: Vec<SearchVector>,
    /// `canonical_hash(VectorFixture, canonical_json(fixture))` of the parsed
    /// content, so formatting of the source file does not affect it.
    pub digest: ContentHash,
}

impl VectorFixtureV1 {
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        fixture_json(&self.vectors)
    }

    /// Look up a vector by name.
    #[must_use]
    pub fn vector(&self, name: &str) -> Option<&SearchVector> {
        self.vectors.iter().find(|v| v.name == name)
    }
}

/// Error loading or validating a fixture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixtureError {
    /// The fixture file could not be read.
    Io { detail: String },
    /// The bytes are not valid JSON.
    Parse { detail: String },
    /// `schema_version` is missing or not [`FIXTURE_SCHEMA_VERSION`].
    SchemaVersionMismatch { found: String },
    /// A required field is absent. Unnamed vectors are identified as `#<position>`.
    MissingField { vector: String, field: &'static str },
    /// A field has the wrong shape.
    InvalidField {
        vector: String,
        field: &'static str,
        detail: String,
    },
    /// Two vectors share a name.
    DuplicateName { name: String },
    /// The sequence mixes numbers and text.
    MixedKinds { vector: String, index: usize },
    /// `sequence[index - 1] > sequence[index]`.
    Unsorted { vector: String, index: usize },
}

impl std::fmt::Display for FixtureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { detail } => write!(f, "I/O error: {detail}"),
            Self::Parse { detail } => write!(f, "fixture is not valid JSON: {detail}"),
            Self::SchemaVersionMismatch { found } => write!(
                f,
                "fixture schema_version {found:?}, expected {FIXTURE_SCHEMA_VERSION:?}"
            ),
            Self::MissingField { vector, field } => {
                write!(f, "vector {vector}: missing field {field:?}")
            }
            Self::InvalidField {
                vector,
                field,
                detail,
            } => write!(f, "vector {vector}: invalid {field:?}: {detail}"),
            Self::DuplicateName { name } => write!(f, "duplicate vector name {name:?}"),
            Self::MixedKinds { vector, index } => {
                write!(f, "vector {vector}: element {index} differs in kind from element 0")
            }
            Self::Unsorted { vector, index } => {
                write!(f, "vector {vector}: element {index} is less than its predecessor")
            }
        }
    }
}

impl std::error::Error for FixtureError {}

/// Read and parse a fixture from a caller-supplied path.
///
/// The path is used only to read bytes; it never enters the digest.
///
/// # Errors
///
/// Returns [`FixtureError::Io`] if the file cannot be read, otherwise any
/// error from [`parse_fixture`].
pub fn load_fixture(path: &Path) -> Result<VectorFixtureV1, FixtureError> {
    let bytes = std::fs::read(path).map_err(|e| FixtureError::Io {
        detail: format!("{}: {e}", path.display()),
    })?;
    let fixture = parse_fixture(&bytes)?;
    log::debug!(
        "loaded {} vectors from {} ({})",
        fixture.vectors.len(),
        path.display(),
        fixture.digest
    );
    Ok(fixture)
}

/// The built-in course vectors ([`COURSE_VECTORS_JSON`]).
///
/// # Errors
///
/// Only if the embedded fixture is itself invalid.
pub fn course_vectors() -> Result<VectorFixtureV1, FixtureError> {
    parse_fixture(COURSE_VECTORS_JSON.as_bytes())
}

/// Parse and validate fixture bytes.
///
/// # Errors
///
/// Returns a [`FixtureError`] describing the first problem found.
pub fn parse_fixture(bytes: &[u8]) -> Result<VectorFixtureV1, FixtureError> {
    let root: serde_json::Value =
        serde_json::from_slice(bytes).map_err(|e| FixtureError::Parse {
            detail: e.to_string(),
        })?;

    let version = root
        .get("schema_version")
        .and_then(serde_json::Value::as_str)
        .unwrap_or_default();
    if version != FIXTURE_SCHEMA_VERSION {
        return Err(FixtureError::SchemaVersionMismatch {
            found: version.to_string(),
        });
    }

    let entries = root
        .get("vectors")
        .and_then(serde_json::Value::as_array)
        .ok_or_else(|| FixtureError::MissingField {
            vector: "<fixture>".into(),
            field: "vectors",
        })?;

    let mut vectors: Vec<SearchVector> = Vec::with_capacity(entries.len());
    for (position, entry) in entries.iter().enumerate() {
        let vector = parse_vector(position, entry)?;
        if vectors.iter().any(|v| v.name == vector.name) {
            return Err(FixtureError::DuplicateName { name: vector.name });
        }
        validate_vector(&vector)?;
        vectors.push(vector);
    }

    let digest = canonical_hash(
        HashDomain::VectorFixture,
        &canonical_json_bytes(&fixture_json(&vectors)),
    );
    Ok(VectorFixtureV1 { vectors, digest })
}

fn fixture_json(vectors: &[SearchVector]) -> serde_json::Value {
    serde_json::json!({
        "schema_version": FIXTURE_SCHEMA_VERSION,
        "vectors": vectors.iter().map(SearchVector::to_json).collect::<Vec<_>>(),
    })
}

fn parse_vector(position: usize, entry: &serde_json::Value) -> Result<SearchVector, FixtureError> {
    let name = match entry.get("name") {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(other) => {
            return Err(FixtureError::InvalidField {
                vector: format!("#{position}"),
                field: "name",
                detail: format!("expected string, found {other}"),
            })
        }
        None => {
            return Err(FixtureError::MissingField {
                vector: format!("#{position}"),
                field: "name",
            })
        }
    };

    let field = |key: &'static str| {
        entry.get(key).ok_or_else(|| FixtureError::MissingField {
            vector: name.clone(),
            field: key,
        })
    };

    let sequence = field("sequence")?
        .as_array()
        .ok_or_else(|| FixtureError::InvalidField {
            vector: name.clone(),
            field: "sequence",
            detail: "expected array".into(),
        })?
        .iter()
        .map(|v| value_from_json(v).map_err(|detail| invalid(&name, "sequence", detail)))
        .collect::<Result<Vec<_>, _>>()?;
    let target = value_from_json(field("target")?).map_err(|d| invalid(&name, "target", d))?;
    let expect = expectation_from_json(field("expect")?).map_err(|d| invalid(&name, "expect", d))?;

    Ok(SearchVector {
        name,
        sequence,
        target,
        expect,
    })
}

fn invalid(vector: &str, field: &'static str, detail: String) -> FixtureError {
    FixtureError::InvalidField {
        vector: vector.to_string(),
        field,
        detail,
    }
}

fn validate_vector(vector: &SearchVector) -> Result<(), FixtureError> {
    let seq = &vector.sequence;
    if let Some(first) = seq.first() {
        let kind: ValueKind = first.kind();
        if let Some(index) = seq.iter().position(|v| v.kind() != kind) {
            return Err(FixtureError::MixedKinds {
                vector: vector.name.clone(),
                index,
            });
        }
    }

    for (i, pair) in seq.windows(2).enumerate() {
        if !matches!(pair[0].try_cmp(&pair[1]), Ok(Ordering::Less | Ordering::Equal)) {
            return Err(FixtureError::Unsorted {
                vector: vector.name.clone(),
                index: i + 1,
            });
        }
    }

    if let Expectation::Index(index) = vector.expect {
        let Some(element) = seq.get(index) else {
            return Err(invalid(
                &vector.name,
                "expect",
                format!("index {index} out of bounds for length {}", seq.len()),
            ));
        };
        if element.try_cmp(&vector.target) != Ok(Ordering::Equal) {
            return Err(invalid(
                &vector.name,
                "expect",
                format!("element {index} ({element}) does not equal target"),
            ));
        }
    }
    Ok(())
}

/// Decode a JSON scalar into a [`Value`].
///
/// # Errors
///
/// Returns a description of the value if it is not an `i64`, a float, or a string.
pub fn value_from_json(value: &serde_json::Value) -> Result<Value, String> {
    match value {
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Integer(i))
            } else if n.is_f64() {
                n.as_f64()
                    .map(Value::Float)
                    .ok_or_else(|| format!("unrepresentable number {n}"))
            } else {
                Err(format!("integer {n} exceeds i64"))
            }
        }
        serde_json::Value::String(s) => Ok(Value::Text(s.clone())),
        other => Err(format!("unsupported value {other}")),
    }
}

/// Encode a [`Value`] as JSON.
#[must_use]
pub fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Integer(i) => serde_json::Value::from(*i),
        Value::Float(x) => serde_json::Number::from_f64(*x)
            .map_or(serde_json::Value::Null, serde_json::Value::Number),
        Value::Text(s) => serde_json::Value::from(s.as_str()),
    }
}

fn expectation_from_json(value: &serde_json::Value) -> Result<Expectation, String> {
    match value {
        serde_json::Value::Number(n) => n
            .as_u64()
            .and_then(|i| usize::try_from(i).ok())
            .map(Expectation::Index)
            .ok_or_else(|| format!("index {n} is not a non-negative integer")),
        serde_json::Value::String(s) => match s.as_str() {
            "found" => Ok(Expectation::Found),
            "not_found" => Ok(Expectation::NotFound),
            "type_mismatch" => Ok(Expectation::TypeMismatch),
            other => Err(format!("unknown expectation {other:?}")),
        },
        other => Err(format!("unsupported expectation {other}")),
    }
}
