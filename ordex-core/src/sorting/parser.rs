//! Parsing of comma-separated sort specifications
//!
//! A specification such as `"lastName desc, age asc, id"` becomes an ordered
//! list of [`SortToken`]s. Parsing is lenient: empty segments are dropped and
//! unrecognized direction words fall back to the default order.

use super::order::SortOrder;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, trace};

/// One field name and direction taken from a sort specification
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortToken {
    pub field: String,
    pub order: SortOrder,
}

impl SortToken {
    pub fn new(field: impl Into<String>, order: SortOrder) -> Self {
        Self {
            field: field.into(),
            order,
        }
    }
}

impl fmt::Display for SortToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.order)
    }
}

/// Ordered sort tokens; the first token is the primary key
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SortSpec {
    tokens: Vec<SortToken>,
}

impl SortSpec {
    /// Parse `spec`, using `default_order` for segments without a recognized
    /// direction word. Blank input yields an empty spec.
    pub fn parse(spec: &str, default_order: SortOrder) -> Self {
        let tokens: Vec<SortToken> = spec
            .split(',')
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .filter_map(|segment| parse_segment(segment, default_order))
            .collect();

        trace!("Parsed sort spec {:?} into {} token(s)", spec, tokens.len());
        Self { tokens }
    }

    pub fn from_tokens(tokens: Vec<SortToken>) -> Self {
        Self { tokens }
    }

    pub fn tokens(&self) -> &[SortToken] {
        &self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Append a key with lower precedence than every existing token
    pub fn push(&mut self, token: SortToken) {
        self.tokens.push(token);
    }
}

fn parse_segment(segment: &str, default_order: SortOrder) -> Option<SortToken> {
    let mut words = segment.split_whitespace();
    let field = words.next()?;

    let order = match words.next() {
        Some(word) => SortOrder::from_token(word).unwrap_or_else(|| {
            debug!(
                "Ignoring unrecognized direction {:?} for field {:?}",
                word, field
            );
            default_order
        }),
        None => default_order,
    };

    Some(SortToken::new(field, order))
}

impl FromStr for SortSpec {
    type Err = Infallible;

    /// Parses with an ascending default
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(SortSpec::parse(s, SortOrder::Ascending))
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{token}")?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a SortSpec {
    type Item = &'a SortToken;
    type IntoIter = std::slice::Iter<'a, SortToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
