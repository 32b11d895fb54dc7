/// A single named, typed column as the decomposition engine consumes it.
///
/// Columns are constructed once per document pass and never mutated in
/// place; transformations produce new values so the hierarchy and views can
/// share column data without aliasing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Column {
    /// Dotted path, lowercased. Doubles as the column's identity within a
    /// [`ColumnSet`](super::ColumnSet).
    pub path: String,

    /// The path in its source casing, when it differs from `path`.
    pub original_path: Option<String>,

    /// Raw declared type, e.g. `STRING` or `ARRAY<STRUCT<a INT64>>`.
    pub declared_type: Option<String>,

    /// Raw nested-type fragments. Used only to detect the
    /// "array of exactly one primitive" shape.
    pub inner_types: Vec<String>,

    pub is_primary_key: bool,

    pub description: Option<String>,

    /// Per-column metadata overrides passed through to emitted fields.
    pub meta: ColumnMeta,
}

/// Simple scalar metadata carried through to the output field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnMeta {
    pub label: Option<String>,
    pub group_label: Option<String>,
    pub value_format: Option<String>,
    pub hidden: Option<bool>,
}

impl Column {
    /// Creates a column at the given path. The stored path is lowercased;
    /// when the input carries other casing it is preserved in
    /// `original_path`.
    pub fn new(path: impl Into<String>) -> Self {
        let raw = path.into();
        let lower = raw.to_lowercase();
        Self {
            original_path: (raw != lower).then_some(raw),
            path: lower,
            ..Self::default()
        }
    }

    /// The path in source casing when known, lowercased otherwise.
    pub fn display_path(&self) -> &str {
        self.original_path.as_deref().unwrap_or(&self.path)
    }

    /// The last dot-segment of the display path.
    pub fn last_segment(&self) -> &str {
        let path = self.display_path();
        path.rsplit('.').next().unwrap_or(path)
    }

    /// True if the declared type is array-shaped.
    pub fn is_array(&self) -> bool {
        self.declared_type
            .as_deref()
            .is_some_and(|ty| ty.len() >= 5 && ty.as_bytes()[..5].eq_ignore_ascii_case(b"ARRAY"))
    }

    /// True if the column is an array of exactly one bare primitive: one
    /// inner type fragment with no embedded whitespace.
    pub fn is_single_value_array(&self) -> bool {
        self.is_array()
            && self.inner_types.len() == 1
            && !self.inner_types[0].contains(char::is_whitespace)
    }

    /// The declared type with angle-bracket and precision suffixes removed,
    /// uppercased. `ARRAY<STRUCT<...>>` yields `ARRAY`.
    pub fn base_type(&self) -> Option<String> {
        let ty = self.declared_type.as_deref()?;
        let base = ty.split('<').next().unwrap_or(ty);
        let base = base.split('(').next().unwrap_or(base);
        Some(base.trim().to_uppercase())
    }
}
