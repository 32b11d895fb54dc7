//! Time-bucket groups.
//!
//! A date- or datetime-typed column does not emit a plain field; it emits a
//! generated family of fields, one per calendar granularity. The full set of
//! names a group implies is computed up front because the collision step
//! must see it before any sibling scalar field is emitted, and the external
//! serializer reuses it for validation.

use crate::catalog::Column;

/// Which calendar family a bucket group is derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Granularity {
    /// Derived from a `DATE` column.
    Date,
    /// Derived from a `DATETIME` or `TIMESTAMP` column.
    Time,
}

/// One generated bucket suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Timeframe {
    Raw,
    Time,
    Date,
    Week,
    Month,
    Quarter,
    Year,
}

impl Timeframe {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Raw => "raw",
            Self::Time => "time",
            Self::Date => "date",
            Self::Week => "week",
            Self::Month => "month",
            Self::Quarter => "quarter",
            Self::Year => "year",
        }
    }
}

impl core::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Default buckets for date-derived groups.
pub const DATE_TIMEFRAMES: &[Timeframe] = &[
    Timeframe::Raw,
    Timeframe::Date,
    Timeframe::Week,
    Timeframe::Month,
    Timeframe::Quarter,
    Timeframe::Year,
];

/// Default buckets for datetime/timestamp-derived groups.
pub const TIME_TIMEFRAMES: &[Timeframe] = &[
    Timeframe::Raw,
    Timeframe::Time,
    Timeframe::Date,
    Timeframe::Week,
    Timeframe::Month,
    Timeframe::Quarter,
    Timeframe::Year,
];

/// Classifies a column's base type into a bucket granularity, when it has
/// one.
pub fn granularity_of(column: &Column) -> Option<Granularity> {
    match column.base_type()?.as_str() {
        "DATE" => Some(Granularity::Date),
        "DATETIME" | "TIMESTAMP" => Some(Granularity::Time),
        _ => None,
    }
}

/// A generated family of fields derived from one date/time column.
#[derive(Debug, Clone)]
pub struct BucketGroup {
    /// Base name; each bucket's field name is `{name}_{timeframe}`.
    pub name: String,

    /// Lowercased dotted path of the source column.
    pub source_path: String,

    /// Path relative to the owning view, in source casing, for the external
    /// serializer's column references.
    pub sql_path: String,

    pub granularity: Granularity,

    pub timeframes: Vec<Timeframe>,

    /// Every field name this group implies, including the base name itself
    /// and the supplementary ISO-calendar fields when enabled. Seeded into
    /// the collision step before sibling scalar fields are emitted.
    pub generated_names: Vec<String>,

    pub description: Option<String>,
}

impl BucketGroup {
    pub fn new(
        name: String,
        source_path: String,
        sql_path: String,
        granularity: Granularity,
        timeframes: Vec<Timeframe>,
        include_iso_fields: bool,
        description: Option<String>,
    ) -> Self {
        let mut generated_names = vec![name.clone()];
        for timeframe in &timeframes {
            generated_names.push(format!("{name}_{timeframe}"));
        }
        if include_iso_fields && granularity == Granularity::Date {
            generated_names.push(format!("{name}_iso_year"));
            generated_names.push(format!("{name}_iso_week_of_year"));
        }

        Self {
            name,
            source_path,
            sql_path,
            granularity,
            timeframes,
            generated_names,
            description,
        }
    }

    /// Renames the group, rebuilding the generated-name set with the same
    /// suffix structure.
    pub(crate) fn renamed(&self, name: String) -> Self {
        let suffix_source = &self.generated_names[1..];
        let mut generated_names = vec![name.clone()];
        for generated in suffix_source {
            let suffix = &generated[self.name.len()..];
            generated_names.push(format!("{name}{suffix}"));
        }
        Self {
            name,
            generated_names,
            ..self.clone()
        }
    }
}
