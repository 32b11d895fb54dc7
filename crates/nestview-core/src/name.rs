//! Identifier derivation.
//!
//! Raw path segments arrive in CamelCase, snake_case, or anything a source
//! system allowed. Everything emitted downstream goes through
//! [`canonicalize`], and per-view uniqueness goes through
//! [`resolve_collision`].

use heck::ToSnakeCase;
use indexmap::IndexSet;

/// Suffix appended by the single rename attempt of collision resolution.
pub const CONFLICT_SUFFIX: &str = "_conflict";

/// Separator between path segments in emitted identifiers.
pub const SEGMENT_SEPARATOR: &str = "__";

/// Converts a single raw path segment to lower-snake form.
///
/// CamelCase boundaries split with an inserted `_`; runs of `_`, `-`, space,
/// and `@` collapse to a single `_`; leading and trailing `_` are trimmed.
/// An input that becomes empty after cleaning maps to a deterministic
/// fallback derived from a content hash of the original input, so distinct
/// invalid inputs stay distinct and stable.
///
/// Canonicalization is idempotent: applying it to its own output is a no-op.
pub fn canonicalize(raw: &str) -> String {
    let separated: String = raw
        .chars()
        .map(|c| match c {
            '-' | '@' | ' ' => '_',
            c => c,
        })
        .collect();

    let snake = separated.to_snake_case();
    if snake.is_empty() {
        return format!("unnamed_{:08x}", fnv1a(raw) as u32);
    }
    snake
}

/// Canonicalizes every segment of a dotted path and joins them with the
/// emitted-identifier separator.
pub fn canonical_path(path: &str) -> String {
    path.split('.')
        .map(canonicalize)
        .collect::<Vec<_>>()
        .join(SEGMENT_SEPARATOR)
}

/// Outcome of a collision check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub name: String,
    pub renamed: bool,
}

/// Resolves a candidate identifier against the set already assigned within a
/// view.
///
/// A free candidate is returned unchanged. A taken candidate gets exactly
/// one rename attempt with the conflict suffix. `None` means the suffixed
/// name is also taken: the collision is unrecoverable, and the caller must
/// surface it as a fatal naming error rather than dropping or merging the
/// fields.
pub fn resolve_collision(candidate: &str, taken: &IndexSet<String>) -> Option<Resolved> {
    if !taken.contains(candidate) {
        return Some(Resolved {
            name: candidate.to_string(),
            renamed: false,
        });
    }

    let renamed = format!("{candidate}{CONFLICT_SUFFIX}");
    if taken.contains(&renamed) {
        return None;
    }
    Some(Resolved {
        name: renamed,
        renamed: true,
    })
}

/// Derives the base name of a generated time-bucket group from a dotted
/// path.
///
/// Segments are canonicalized and joined; a trailing date marker is stripped
/// from the last segment only, case-insensitively. A segment that *is* the
/// marker keeps its name.
pub fn time_group_base(path: &str) -> String {
    let mut segments: Vec<String> = path.split('.').map(canonicalize).collect();
    if let Some(last) = segments.last_mut() {
        *last = strip_date_marker(last);
    }
    segments.join(SEGMENT_SEPARATOR)
}

/// Strips leading path segments that exactly match the repeated-group path,
/// case-insensitively, so nested-view fields are named relative to their
/// group. Paths outside the group are returned whole.
pub fn strip_group_prefix<'a>(path: &'a str, group_path: &str) -> &'a str {
    if group_path.is_empty() {
        return path;
    }
    let group_len = group_path.len();
    let bytes = path.as_bytes();
    if bytes.len() > group_len + 1
        && bytes[..group_len].eq_ignore_ascii_case(group_path.as_bytes())
        && bytes[group_len] == b'.'
    {
        return &path[group_len + 1..];
    }
    path
}

/// Title-cases the words of a canonical identifier: `delivery_start` becomes
/// `Delivery Start`.
pub fn title_case(canonical: &str) -> String {
    canonical
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn strip_date_marker(segment: &str) -> String {
    if segment == "date" {
        return segment.to_string();
    }
    if let Some(stripped) = segment.strip_suffix("_date") {
        return stripped.to_string();
    }
    if let Some(stripped) = segment.strip_suffix("date") {
        let trimmed = stripped.trim_end_matches('_');
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }
    segment.to_string()
}

fn fnv1a(input: &str) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x100_0000_01b3;

    let mut hash = OFFSET;
    for byte in input.as_bytes() {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(PRIME);
    }
    hash
}
