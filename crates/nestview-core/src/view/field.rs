/// What an emitted field stands for in its view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldRole {
    /// A plain scalar field.
    Dimension,

    /// The hidden marker a repeated group leaves in its containing view.
    RepeatedGroup,

    /// The hidden marker for an array of primitives. Never spawns a view.
    RepeatedScalar,

    /// The nested view's own identity field for the repeated group it is
    /// scoped to.
    GroupIdentity,
}

/// A finally-named field plus everything the external serializer needs to
/// render it.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    /// Emitted identifier, unique within the owning view.
    pub name: String,

    /// Lowercased dotted path of the source column.
    pub source_path: String,

    /// Path relative to the owning view's repeated group, in source casing,
    /// for column references.
    pub sql_path: String,

    pub role: FieldRole,

    pub hidden: bool,

    /// All path segments but the last, title-cased and space-joined. Only
    /// set for fields nested below at least one struct level.
    pub group_label: Option<String>,

    /// The last path segment, title-cased. Set alongside `group_label`.
    pub item_label: Option<String>,

    pub description: Option<String>,

    pub is_primary_key: bool,

    /// The identifier this field was renamed from when collision resolution
    /// had to apply the conflict suffix.
    pub renamed_from: Option<String>,
}
