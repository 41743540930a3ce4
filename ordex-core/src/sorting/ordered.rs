//! Entry point: order a sequence of records by a textual sort specification
//!
//! [`order_by_spec`] returns an [`Ordered`] result instead of a plain vector
//! so callers can keep appending keys. All keys are applied in one stable
//! sort when the result is materialized.

use super::chain::{ChainedOrder, SortKey};
use super::order::SortOrder;
use super::parser::{SortSpec, SortToken};
use super::schema::SortableRecord;
use super::value::IntoSortValue;
use crate::{Result, SortConfig};
use std::fmt;
use tracing::debug;

/// Records paired with the ordering to apply to them
pub struct Ordered<R> {
    items: Vec<R>,
    chain: ChainedOrder<R>,
    config: SortConfig,
}

impl<R> Ordered<R> {
    /// Wrap records without any key applied
    pub fn unordered(items: Vec<R>, config: SortConfig) -> Self {
        Self {
            items,
            chain: ChainedOrder::new().with_missing_values(config.missing_values),
            config,
        }
    }

    /// Append a caller-computed key below the existing keys
    pub fn then_by_key<V, F>(
        mut self,
        label: impl Into<String>,
        order: SortOrder,
        f: F,
    ) -> Self
    where
        V: IntoSortValue,
        F: Fn(&R) -> V + Send + Sync + 'static,
    {
        self.chain.push(SortKey::from_fn(label, order, f));
        self
    }

    /// Number of keys that will be applied
    pub fn key_count(&self) -> usize {
        self.chain.len()
    }

    /// Whether materializing will sort at all
    pub fn is_ordered(&self) -> bool {
        !self.chain.is_empty()
    }

    pub fn chain(&self) -> &ChainedOrder<R> {
        &self.chain
    }

    pub fn config(&self) -> &SortConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The records in sorted order. Without keys the input vector is
    /// returned as-is.
    pub fn into_vec(self) -> Vec<R> {
        if self.chain.is_empty() {
            return self.items;
        }
        debug!(
            "Ordering {} record(s) by {} key(s)",
            self.items.len(),
            self.chain.len()
        );
        self.chain.sort(self.items)
    }

    /// [`into_vec`](Self::into_vec) on rayon's pool when there are at least
    /// [`SortConfig::parallel_threshold`] records
    #[cfg(feature = "parallel-sorting")]
    #[cfg_attr(docsrs, doc(cfg(feature = "parallel-sorting")))]
    pub fn into_vec_par(self) -> Vec<R>
    where
        R: Send,
    {
        if self.chain.is_empty() {
            return self.items;
        }
        debug!(
            "Ordering {} record(s) by {} key(s), parallel from {}",
            self.items.len(),
            self.chain.len(),
            self.config.parallel_threshold
        );
        self.chain
            .par_sort(self.items, self.config.parallel_threshold)
    }

    /// Sorted copy of the records, leaving `self` usable
    pub fn to_vec(&self) -> Vec<R>
    where
        R: Clone,
    {
        let mut items = self.items.clone();
        self.chain.sort_slice(&mut items);
        items
    }
}

impl<R: SortableRecord> Ordered<R> {
    /// Append an ascending key on `field`
    pub fn then_by(self, field: &str) -> Result<Self> {
        self.then_by_field(field, SortOrder::Ascending)
    }

    /// Append a descending key on `field`
    pub fn then_by_descending(self, field: &str) -> Result<Self> {
        self.then_by_field(field, SortOrder::Descending)
    }

    /// Append a key on `field`. An unknown field leaves the ordering as it
    /// was; a field without a natural ordering is an error.
    pub fn then_by_field(self, field: &str, order: SortOrder) -> Result<Self> {
        let spec = SortSpec::from_tokens(vec![SortToken::new(field, order)]);
        self.then_by_spec(&spec)
    }

    /// Append every resolvable key of a parsed spec
    pub fn then_by_spec(mut self, spec: &SortSpec) -> Result<Self> {
        self.chain
            .extend_from_spec(R::schema(), spec, self.config.field_matching)?;
        Ok(self)
    }
}

impl<R> IntoIterator for Ordered<R> {
    type Item = R;
    type IntoIter = std::vec::IntoIter<R>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_vec().into_iter()
    }
}

impl<R> fmt::Debug for Ordered<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ordered")
            .field("len", &self.items.len())
            .field("chain", &self.chain)
            .field("config", &self.config)
            .finish()
    }
}

/// Order `records` by `spec`, using `default_order` where a segment names no
/// recognized direction.
///
/// ```
/// use ordex_core::{SortOrder, order_by_spec, sortable_record};
///
/// struct Person {
///     name: String,
///     age: u32,
/// }
///
/// sortable_record!(Person {
///     "name" => |p| p.name.clone(),
///     "age" => |p| p.age,
/// });
///
/// let people = vec![
///     Person { name: "b".into(), age: 1 },
///     Person { name: "z".into(), age: 2 },
///     Person { name: "a".into(), age: 1 },
/// ];
///
/// let sorted = order_by_spec(people, "age, name desc", SortOrder::Ascending)
///     .unwrap()
///     .into_vec();
/// let names: Vec<_> = sorted.iter().map(|p| p.name.as_str()).collect();
/// assert_eq!(names, ["b", "a", "z"]);
/// ```
pub fn order_by_spec<R, I>(
    records: I,
    spec: &str,
    default_order: SortOrder,
) -> Result<Ordered<R>>
where
    R: SortableRecord,
    I: IntoIterator<Item = R>,
{
    order_by_spec_with(records, spec, &SortConfig::with_default_order(default_order))
}

/// [`order_by_spec`] with full configuration
pub fn order_by_spec_with<R, I>(
    records: I,
    spec: &str,
    config: &SortConfig,
) -> Result<Ordered<R>>
where
    R: SortableRecord,
    I: IntoIterator<Item = R>,
{
    let ordered = Ordered::unordered(records.into_iter().collect(), *config);

    let parsed = SortSpec::parse(spec, config.default_order);
    if parsed.is_empty() {
        return Ok(ordered);
    }
    ordered.then_by_spec(&parsed)
}

/// Extension trait adding [`order_by_spec`] to any record source
pub trait OrderBySpec<R: SortableRecord>: IntoIterator<Item = R> + Sized {
    /// Order by `spec` with an ascending default
    fn order_by_spec(self, spec: &str) -> Result<Ordered<R>> {
        order_by_spec(self, spec, SortOrder::Ascending)
    }

    fn order_by_spec_with(self, spec: &str, config: &SortConfig) -> Result<Ordered<R>> {
        order_by_spec_with(self, spec, config)
    }
}

impl<R: SortableRecord, I: IntoIterator<Item = R>> OrderBySpec<R> for I {}
