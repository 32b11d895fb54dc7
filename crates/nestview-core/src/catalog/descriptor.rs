//! Composite-type descriptor parsing.
//!
//! A descriptor is a single string encoding a possibly-nested array/struct
//! type, e.g. `ARRAY<STRUCT<a INT64, b ARRAY<STRUCT<c STRING>>>>`. Parsing
//! flattens it into `(dotted.path, type)` leaves. Parsing never fails hard:
//! malformed input yields an empty list, which callers treat as "no
//! additional structure to flatten".

use tracing::debug;

/// One flattened entry of a composite-type descriptor.
///
/// Path segments preserve the casing captured from the descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeLeaf {
    pub path: String,
    pub ty: LeafType,
}

/// The type tag carried by a [`TypeLeaf`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeafType {
    /// A bare base type, normalized: `NUMERIC(10,2)` becomes `NUMERIC`.
    Scalar(String),

    /// An array directly over a primitive, e.g. `ARRAY<STRING>`. Never
    /// flattened into a child path; the element type is kept as-is.
    ScalarArray(String),

    /// A struct with fields. The fields follow as separate leaves prefixed
    /// with this leaf's path.
    Struct,

    /// An array of structs, one join level. Opaque marker; the struct fields
    /// follow as separate leaves.
    StructArray,

    /// An array of arrays of structs. Reported as a single opaque two-level
    /// marker because further flattening would not correspond to a single
    /// join level.
    DoubleArray,
}

impl LeafType {
    pub fn is_struct(&self) -> bool {
        matches!(self, Self::Struct | Self::StructArray | Self::DoubleArray)
    }

    pub fn is_array(&self) -> bool {
        matches!(
            self,
            Self::ScalarArray(_) | Self::StructArray | Self::DoubleArray
        )
    }
}

impl core::fmt::Display for LeafType {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            Self::Scalar(base) => f.write_str(base),
            Self::ScalarArray(element) => write!(f, "ARRAY<{element}>"),
            Self::Struct => f.write_str("STRUCT"),
            Self::StructArray => f.write_str("ARRAY<STRUCT>"),
            Self::DoubleArray => f.write_str("ARRAY<ARRAY<STRUCT>>"),
        }
    }
}

/// Base types a parenthesized precision suffix may be attached to.
const BASE_TYPES: &[&str] = &[
    "INT64",
    "INTEGER",
    "FLOAT64",
    "FLOAT",
    "NUMERIC",
    "BIGNUMERIC",
    "DECIMAL",
    "BIGDECIMAL",
    "BOOL",
    "BOOLEAN",
    "STRING",
    "BYTES",
    "DATE",
    "DATETIME",
    "TIME",
    "TIMESTAMP",
    "GEOGRAPHY",
    "INTERVAL",
    "JSON",
];

/// Parses a composite-type descriptor into a flat list of leaves, sorted
/// lexicographically by path.
///
/// Returns an empty list on any parse failure.
pub fn parse(descriptor: &str) -> Vec<TypeLeaf> {
    let mut body = descriptor.trim();
    let mut flatten_arrays = true;

    if starts_with_ci(body, "ARRAY<") {
        if !body.ends_with('>') {
            debug!(descriptor, "unterminated array wrapper");
            return vec![];
        }
        body = body[6..body.len() - 1].trim();

        // Only one wrapper level is unwrapped. A second array wrapper
        // directly inside the top-level one disables flattening below
        // double-nested array fields; the wrapper itself stays in place, so
        // a bare `ARRAY<ARRAY<...>>` descriptor has no fields to flatten.
        if starts_with_ci(body, "ARRAY<") {
            flatten_arrays = false;
        }
    }

    let mut leaves = match parse_struct(body, "", flatten_arrays) {
        Some(leaves) => leaves,
        None => {
            debug!(descriptor, "malformed composite-type descriptor");
            return vec![];
        }
    };

    leaves.sort_by(|a, b| a.path.cmp(&b.path));
    leaves
}

/// Returns the normalized element type when the descriptor is an array
/// directly over a primitive, e.g. `ARRAY<STRING>` yields `STRING`.
pub fn array_element(descriptor: &str) -> Option<String> {
    let trimmed = descriptor.trim();
    if !starts_with_ci(trimmed, "ARRAY<") || !trimmed.ends_with('>') {
        return None;
    }
    let inner = trimmed[6..trimmed.len() - 1].trim();
    if contains_ci(inner, "STRUCT<") || inner.contains(char::is_whitespace) {
        return None;
    }
    match normalize_scalar(inner) {
        LeafType::Scalar(base) => Some(base),
        other => Some(other.to_string()),
    }
}

fn parse_struct(body: &str, prefix: &str, flatten_arrays: bool) -> Option<Vec<TypeLeaf>> {
    let mut body = body.trim();
    if body.is_empty() {
        return Some(vec![]);
    }

    if starts_with_ci(body, "STRUCT<") {
        if !body.ends_with('>') {
            return None;
        }
        body = &body[7..body.len() - 1];
    }

    let mut leaves = vec![];

    for field in split_fields(body)? {
        let field = field.trim();
        if field.is_empty() {
            continue;
        }

        // `name type_def`; a token with no type definition is skipped.
        let Some((name, type_def)) = split_field(field) else {
            continue;
        };

        let path = join_path(prefix, name);

        if contains_ci(type_def, "STRUCT<") {
            // Unwrap array wrappers around the struct body, counting levels.
            let mut array_depth = 0;
            let mut inner = type_def;
            while starts_with_ci(inner, "ARRAY<") {
                if !inner.ends_with('>') {
                    return None;
                }
                inner = inner[6..inner.len() - 1].trim();
                array_depth += 1;
            }

            let marker = match array_depth {
                0 => LeafType::Struct,
                1 => LeafType::StructArray,
                _ => LeafType::DoubleArray,
            };
            let opaque = array_depth > 1 && !flatten_arrays;
            leaves.push(TypeLeaf { path: path.clone(), ty: marker });

            if !opaque {
                leaves.extend(parse_struct(inner, &path, flatten_arrays)?);
            }
        } else {
            leaves.push(TypeLeaf {
                path,
                ty: normalize_scalar(type_def),
            });
        }
    }

    Some(leaves)
}

/// Splits a struct body into top-level `name type` fields.
///
/// A comma separates fields only at angle-bracket depth zero and outside a
/// parenthesized precision argument, so `NUMERIC(10, 2)` never splits.
/// Returns `None` when bracket or paren nesting is unbalanced.
fn split_fields(body: &str) -> Option<Vec<&str>> {
    let mut fields = vec![];
    let mut depth = 0i32;
    let mut in_parens = false;
    let mut start = 0;

    for (i, ch) in body.char_indices() {
        match ch {
            '<' if !in_parens => depth += 1,
            '>' if !in_parens => {
                depth -= 1;
                if depth < 0 {
                    return None;
                }
            }
            '(' => {
                if in_parens {
                    return None;
                }
                in_parens = true;
            }
            ')' => {
                if !in_parens {
                    return None;
                }
                in_parens = false;
            }
            ',' if depth == 0 && !in_parens => {
                fields.push(&body[start..i]);
                start = i + ch.len_utf8();
            }
            _ => {}
        }
    }

    if depth != 0 || in_parens {
        return None;
    }
    fields.push(&body[start..]);
    Some(fields)
}

/// Splits one field into its name and type definition.
fn split_field(field: &str) -> Option<(&str, &str)> {
    let at = field.find(char::is_whitespace)?;
    let name = &field[..at];
    if name.is_empty() || !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return None;
    }
    let type_def = field[at..].trim();
    if type_def.is_empty() {
        return None;
    }
    Some((name, type_def))
}

fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}

/// Normalizes a bare (non-struct) type token.
///
/// Strips a parenthesized precision suffix for known base types and keeps
/// `ARRAY<primitive>` as a single array tag over the normalized element.
fn normalize_scalar(type_def: &str) -> LeafType {
    let trimmed = type_def.trim();

    if let Some(at) = trimmed.find('(') {
        let base = trimmed[..at].trim().to_uppercase();
        if BASE_TYPES.contains(&base.as_str()) {
            return LeafType::Scalar(base);
        }
    }

    if starts_with_ci(trimmed, "ARRAY<") && trimmed.ends_with('>') {
        let element = match normalize_scalar(&trimmed[6..trimmed.len() - 1]) {
            LeafType::Scalar(base) => base,
            other => other.to_string(),
        };
        return LeafType::ScalarArray(element);
    }

    LeafType::Scalar(trimmed.to_uppercase())
}

fn starts_with_ci(s: &str, prefix: &str) -> bool {
    s.len() >= prefix.len() && s.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}

fn contains_ci(s: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    s.as_bytes()
        .windows(needle.len())
        .any(|w| w.eq_ignore_ascii_case(needle.as_bytes()))
}
