//! Multi-key ordering built from sort tokens
//!
//! A [`ChainedOrder`] holds sort keys in precedence order. Comparing two
//! records walks the keys until one of them tells the records apart, so a
//! later key only breaks ties left by every earlier key.

use super::order::SortOrder;
use super::parallel::stable_sort_by;
#[cfg(feature = "parallel-sorting")]
use super::parallel::par_stable_sort_by;
use super::parser::SortSpec;
use super::schema::{
    Extractor, FieldAccessor, FieldMatching, RecordSchema, SortableRecord,
};
use super::utils::{is_sorted_by, reorder_by_indices};
use super::value::{IntoSortValue, MissingValues, SortValue};
use crate::{Result, SortConfig};
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// One key of a chained ordering
pub struct SortKey<R> {
    label: String,
    order: SortOrder,
    extractor: Extractor<R>,
}

impl<R> SortKey<R> {
    /// Key reading a resolved schema field
    pub fn from_accessor(accessor: FieldAccessor<R>, order: SortOrder) -> Self {
        Self {
            label: accessor.name().to_string(),
            order,
            extractor: accessor.into_extractor(),
        }
    }

    /// Key computed by a caller-supplied function
    pub fn from_fn<V, F>(label: impl Into<String>, order: SortOrder, f: F) -> Self
    where
        V: IntoSortValue,
        F: Fn(&R) -> V + Send + Sync + 'static,
    {
        Self {
            label: label.into(),
            order,
            extractor: Arc::new(move |record: &R| f(record).into_sort_value()),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn order(&self) -> SortOrder {
        self.order
    }

    pub fn value(&self, record: &R) -> SortValue {
        (self.extractor)(record)
    }
}

impl<R> Clone for SortKey<R> {
    fn clone(&self) -> Self {
        Self {
            label: self.label.clone(),
            order: self.order,
            extractor: Arc::clone(&self.extractor),
        }
    }
}

impl<R> fmt::Debug for SortKey<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortKey")
            .field("label", &self.label)
            .field("order", &self.order)
            .finish()
    }
}

/// Ordered list of sort keys acting as one composite comparator.
///
/// An empty chain compares every pair of records as equal.
pub struct ChainedOrder<R> {
    keys: Vec<SortKey<R>>,
    missing_values: MissingValues,
}

impl<R> ChainedOrder<R> {
    pub fn new() -> Self {
        Self {
            keys: Vec::new(),
            missing_values: MissingValues::default(),
        }
    }

    pub fn with_missing_values(mut self, missing_values: MissingValues) -> Self {
        self.missing_values = missing_values;
        self
    }

    /// Add a key below every existing key
    pub fn then_by(mut self, key: SortKey<R>) -> Self {
        self.push(key);
        self
    }

    pub fn push(&mut self, key: SortKey<R>) {
        trace!(
            "Chaining sort key {:?} ({}) at level {}",
            key.label,
            key.order,
            self.keys.len()
        );
        self.keys.push(key);
    }

    pub fn keys(&self) -> &[SortKey<R>] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn missing_values(&self) -> MissingValues {
        self.missing_values
    }

    /// Compare two records key by key, stopping at the first difference.
    ///
    /// Each call reads the compared keys from both records again, which
    /// allocates for text keys. When sorting, prefer [`sort`](Self::sort) or
    /// [`extract`](Self::extract) with
    /// [`compare_extracted`](Self::compare_extracted), which read every key
    /// once per record.
    pub fn compare(&self, a: &R, b: &R) -> Ordering {
        for key in &self.keys {
            let ord = key.value(a).compare_with_order(
                &key.value(b),
                key.order,
                self.missing_values,
            );
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    }

    /// Read every key of `record`, in precedence order
    pub fn extract(&self, record: &R) -> Vec<SortValue> {
        self.keys.iter().map(|key| key.value(record)).collect()
    }

    /// [`compare`](Self::compare) over values taken with
    /// [`extract`](Self::extract)
    pub fn compare_extracted(&self, a: &[SortValue], b: &[SortValue]) -> Ordering {
        self.keys
            .iter()
            .zip(a.iter().zip(b))
            .map(|(key, (x, y))| {
                x.compare_with_order(y, key.order, self.missing_values)
            })
            .find(|ord| *ord != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    }

    pub fn is_sorted(&self, items: &[R]) -> bool {
        is_sorted_by(items, |a, b| self.compare(a, b))
    }

    fn decorate(&self, items: Vec<R>) -> Vec<(Vec<SortValue>, R)> {
        items
            .into_iter()
            .map(|record| (self.extract(&record), record))
            .collect()
    }

    /// Stable sort of owned records. Keys are read once per record.
    pub fn sort(&self, items: Vec<R>) -> Vec<R> {
        if self.keys.is_empty() || items.len() < 2 {
            return items;
        }

        let mut decorated = self.decorate(items);
        stable_sort_by(&mut decorated, |a, b| {
            self.compare_extracted(&a.0, &b.0)
        });
        decorated.into_iter().map(|(_, record)| record).collect()
    }

    /// [`sort`](Self::sort) on rayon's pool once `items` holds at least
    /// `parallel_threshold` records
    #[cfg(feature = "parallel-sorting")]
    #[cfg_attr(docsrs, doc(cfg(feature = "parallel-sorting")))]
    pub fn par_sort(&self, items: Vec<R>, parallel_threshold: usize) -> Vec<R>
    where
        R: Send,
    {
        if self.keys.is_empty() || items.len() < 2 {
            return items;
        }

        let mut decorated = self.decorate(items);
        par_stable_sort_by(&mut decorated, parallel_threshold, |a, b| {
            self.compare_extracted(&a.0, &b.0)
        });
        decorated.into_iter().map(|(_, record)| record).collect()
    }

    /// Stable in-place sort of a slice
    pub fn sort_slice(&self, items: &mut [R])
    where
        R: Clone,
    {
        if self.keys.is_empty() || items.len() < 2 {
            return;
        }

        let mut keyed: Vec<(usize, Vec<SortValue>)> = items
            .iter()
            .enumerate()
            .map(|(i, record)| (i, self.extract(record)))
            .collect();
        stable_sort_by(&mut keyed, |a, b| self.compare_extracted(&a.1, &b.1));

        let indices: Vec<usize> = keyed.into_iter().map(|(i, _)| i).collect();
        reorder_by_indices(items, &indices);
    }
}

impl<R: 'static> ChainedOrder<R> {
    /// Build a chain from parsed tokens against `schema`.
    ///
    /// Unknown fields are skipped and the next known field takes the next
    /// precedence level. A known field without a natural ordering fails the
    /// whole build.
    pub fn from_spec_in(
        schema: &RecordSchema<R>,
        spec: &SortSpec,
        config: &SortConfig,
    ) -> Result<Self> {
        let mut chain = Self::new().with_missing_values(config.missing_values);
        chain.extend_from_spec(schema, spec, config.field_matching)?;
        Ok(chain)
    }

    /// Append the resolvable tokens of `spec` below the existing keys
    pub fn extend_from_spec(
        &mut self,
        schema: &RecordSchema<R>,
        spec: &SortSpec,
        matching: FieldMatching,
    ) -> Result<()> {
        for token in spec {
            match schema.resolve(&token.field, matching) {
                Some(field) => {
                    let accessor = field.accessor()?;
                    self.push(SortKey::from_accessor(accessor, token.order));
                }
                None => debug!(
                    "Dropping unknown sort field {:?} for {}",
                    token.field,
                    schema.record_name()
                ),
            }
        }
        Ok(())
    }
}

impl<R: SortableRecord> ChainedOrder<R> {
    /// [`from_spec_in`](Self::from_spec_in) against the record's own schema
    pub fn from_spec(spec: &SortSpec, config: &SortConfig) -> Result<Self> {
        Self::from_spec_in(R::schema(), spec, config)
    }
}

impl<R> Default for ChainedOrder<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Clone for ChainedOrder<R> {
    fn clone(&self) -> Self {
        Self {
            keys: self.keys.clone(),
            missing_values: self.missing_values,
        }
    }
}

impl<R> fmt::Debug for ChainedOrder<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainedOrder")
            .field("keys", &self.keys)
            .field("missing_values", &self.missing_values)
            .finish()
    }
}
