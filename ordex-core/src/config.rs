use crate::{
    Result,
    sorting::{FieldMatching, MissingValues, SortOrder},
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Configuration for applying textual sort specifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortConfig {
    /// Direction used when a segment carries no recognized direction word
    pub default_order: SortOrder,

    /// How field names in a sort specification are matched against the record schema
    pub field_matching: FieldMatching,

    /// Placement of missing values under descending keys
    pub missing_values: MissingValues,

    /// Minimum input length before `Ordered::into_vec_par` sorts on rayon's
    /// pool. Only read with the `parallel-sorting` feature.
    pub parallel_threshold: usize,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            default_order: SortOrder::Ascending,
            field_matching: FieldMatching::Exact,
            missing_values: MissingValues::Natural,
            parallel_threshold: 10_000,
        }
    }
}

impl SortConfig {
    /// Create a configuration that uses `default_order` and defaults elsewhere
    pub fn with_default_order(default_order: SortOrder) -> Self {
        Self {
            default_order,
            ..Self::default()
        }
    }

    /// Parse a configuration from TOML. Keys left out keep their defaults.
    ///
    /// ```
    /// use ordex_core::{SortConfig, SortOrder};
    ///
    /// let config = SortConfig::from_toml_str(r#"default_order = "descending""#).unwrap();
    /// assert_eq!(config.default_order, SortOrder::Descending);
    /// ```
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: SortConfig = toml::from_str(source)?;
        debug!("Loaded sort configuration: {:?}", config);
        Ok(config)
    }
}
