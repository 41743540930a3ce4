//! Sort direction and its application to per-key comparisons

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Sort order
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    /// Interpret a direction word from a sort specification.
    ///
    /// Matching is exact and case-sensitive: `asc`/`ascending` and
    /// `desc`/`descending` are the only recognized spellings.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "asc" | "ascending" => Some(SortOrder::Ascending),
            "desc" | "descending" => Some(SortOrder::Descending),
            _ => None,
        }
    }

    /// Short form used when rendering a spec back to text
    pub fn as_token(self) -> &'static str {
        match self {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        }
    }

    /// Orient a natural-order comparison. Descending swaps less and greater;
    /// equal stays equal.
    #[inline]
    pub fn apply(self, natural: Ordering) -> Ordering {
        match self {
            SortOrder::Ascending => natural,
            SortOrder::Descending => natural.reverse(),
        }
    }

    pub fn is_descending(self) -> bool {
        self == SortOrder::Descending
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}
