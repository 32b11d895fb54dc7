use crate::bucket::{Granularity, Timeframe, DATE_TIMEFRAMES, TIME_TIMEFRAMES};

/// Naming-convention flags supplied by the caller.
#[derive(Debug, Clone, Default)]
pub struct NamingOptions {
    use_table_name: bool,
    include_iso_fields: bool,
    date_timeframes: Option<Vec<Timeframe>>,
    time_timeframes: Option<Vec<Timeframe>>,
}

impl NamingOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefer a materialized-table-derived base name over the logical-model
    /// name when one is supplied to the decomposer.
    pub fn use_table_name(&mut self, enable: bool) -> &mut Self {
        self.use_table_name = enable;
        self
    }

    /// Generate supplementary ISO-calendar fields for date-derived time
    /// buckets.
    pub fn include_iso_fields(&mut self, enable: bool) -> &mut Self {
        self.include_iso_fields = enable;
        self
    }

    /// Override the bucket suffixes generated for date-derived groups.
    pub fn date_timeframes(&mut self, timeframes: Vec<Timeframe>) -> &mut Self {
        self.date_timeframes = Some(timeframes);
        self
    }

    /// Override the bucket suffixes generated for datetime/timestamp-derived
    /// groups.
    pub fn time_timeframes(&mut self, timeframes: Vec<Timeframe>) -> &mut Self {
        self.time_timeframes = Some(timeframes);
        self
    }

    pub fn prefers_table_name(&self) -> bool {
        self.use_table_name
    }

    pub fn iso_fields_enabled(&self) -> bool {
        self.include_iso_fields
    }

    /// The active timeframe list for a granularity: the caller's override
    /// when set, the defaults otherwise.
    pub fn timeframes_for(&self, granularity: Granularity) -> Vec<Timeframe> {
        let (overridden, defaults) = match granularity {
            Granularity::Date => (&self.date_timeframes, DATE_TIMEFRAMES),
            Granularity::Time => (&self.time_timeframes, TIME_TIMEFRAMES),
        };
        overridden.clone().unwrap_or_else(|| defaults.to_vec())
    }
}
