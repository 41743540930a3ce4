//! Record schemas and field resolution
//!
//! A record type opts into textual sorting by implementing
//! [`SortableRecord`], usually through the [`sortable_record!`] macro. The
//! schema maps field names to accessors and is built once per type.
//!
//! [`sortable_record!`]: crate::sortable_record

use super::value::{IntoSortValue, SortValue, ValueKind};
use crate::{Result, SortError};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;
use tracing::warn;

pub(crate) type Extractor<R> = Arc<dyn Fn(&R) -> SortValue + Send + Sync>;

/// A record type whose fields can be addressed by name
pub trait SortableRecord: Sized + 'static {
    /// The schema for this type. Implementations build it once and hand out
    /// the same reference afterwards.
    fn schema() -> &'static RecordSchema<Self>;
}

/// How field names in a sort specification are matched against schema names
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum FieldMatching {
    #[default]
    Exact,
    /// Exact matches win; otherwise the first ASCII case-insensitive match
    IgnoreAsciiCase,
}

/// A readable field registered on a record schema
pub struct FieldDescriptor<R> {
    name: &'static str,
    type_name: &'static str,
    kind: Option<ValueKind>,
    extractor: Option<Extractor<R>>,
}

impl<R> FieldDescriptor<R> {
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Rust type name of the field as registered
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// `None` for fields whose type has no natural ordering
    pub fn kind(&self) -> Option<ValueKind> {
        self.kind
    }

    pub fn is_comparable(&self) -> bool {
        self.extractor.is_some()
    }

    /// Turn this descriptor into a comparable accessor.
    ///
    /// Fails with [`SortError::IncomparableField`] for opaque fields.
    pub fn accessor(&self) -> Result<FieldAccessor<R>> {
        match (&self.extractor, self.kind) {
            (Some(extractor), Some(kind)) => Ok(FieldAccessor {
                name: self.name,
                kind,
                extractor: Arc::clone(extractor),
            }),
            _ => {
                warn!(
                    "Field {:?} of type {} has no natural ordering",
                    self.name, self.type_name
                );
                Err(SortError::IncomparableField {
                    field: self.name.to_string(),
                    type_name: self.type_name,
                })
            }
        }
    }
}

impl<R> fmt::Debug for FieldDescriptor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("type_name", &self.type_name)
            .field("kind", &self.kind)
            .finish()
    }
}

/// A resolved, comparable field of a record type
pub struct FieldAccessor<R> {
    name: &'static str,
    kind: ValueKind,
    extractor: Extractor<R>,
}

impl<R> FieldAccessor<R> {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Read this field from `record`
    pub fn value(&self, record: &R) -> SortValue {
        (self.extractor)(record)
    }

    /// Natural-order comparison of this field on two records.
    ///
    /// Reads the field from both records on every call, so text fields
    /// allocate each time. Use [`value`](Self::value) to read a key once
    /// when comparing the same record repeatedly.
    pub fn compare(&self, a: &R, b: &R) -> Ordering {
        self.value(a).cmp(&self.value(b))
    }

    pub(crate) fn into_extractor(self) -> Extractor<R> {
        self.extractor
    }
}

impl<R> Clone for FieldAccessor<R> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            kind: self.kind,
            extractor: Arc::clone(&self.extractor),
        }
    }
}

impl<R> fmt::Debug for FieldAccessor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldAccessor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish()
    }
}

/// The named fields of one record type, in registration order
pub struct RecordSchema<R> {
    record: &'static str,
    fields: Vec<FieldDescriptor<R>>,
}

impl<R: 'static> RecordSchema<R> {
    pub fn builder() -> SchemaBuilder<R> {
        SchemaBuilder {
            schema: RecordSchema {
                record: std::any::type_name::<R>(),
                fields: Vec::new(),
            },
        }
    }

    /// Look up a field by name. `None` means the field does not exist; the
    /// caller decides whether that is an error.
    pub fn resolve(
        &self,
        name: &str,
        matching: FieldMatching,
    ) -> Option<&FieldDescriptor<R>> {
        let exact = self.fields.iter().find(|f| f.name == name);
        match matching {
            FieldMatching::Exact => exact,
            FieldMatching::IgnoreAsciiCase => exact.or_else(|| {
                self.fields
                    .iter()
                    .find(|f| f.name.eq_ignore_ascii_case(name))
            }),
        }
    }

    pub fn record_name(&self) -> &'static str {
        self.record
    }

    pub fn fields(&self) -> &[FieldDescriptor<R>] {
        &self.fields
    }

    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.name)
    }
}

impl<R> fmt::Debug for RecordSchema<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordSchema")
            .field("record", &self.record)
            .field("fields", &self.fields)
            .finish()
    }
}

/// Builder for [`RecordSchema`]. Registering a name twice replaces the
/// earlier field in place.
pub struct SchemaBuilder<R> {
    schema: RecordSchema<R>,
}

impl<R: 'static> SchemaBuilder<R> {
    /// Register a sortable field
    pub fn field<V, F>(self, name: &'static str, accessor: F) -> Self
    where
        V: IntoSortValue,
        F: Fn(&R) -> V + Send + Sync + 'static,
    {
        self.insert(FieldDescriptor {
            name,
            type_name: std::any::type_name::<V>(),
            kind: Some(V::KIND),
            extractor: Some(Arc::new(move |record: &R| {
                accessor(record).into_sort_value()
            })),
        })
    }

    /// Register a readable field whose type has no natural ordering
    pub fn opaque<T: ?Sized>(self, name: &'static str) -> Self {
        self.insert(FieldDescriptor {
            name,
            type_name: std::any::type_name::<T>(),
            kind: None,
            extractor: None,
        })
    }

    fn insert(mut self, descriptor: FieldDescriptor<R>) -> Self {
        let fields = &mut self.schema.fields;
        match fields.iter().position(|f| f.name == descriptor.name) {
            Some(index) => fields[index] = descriptor,
            None => fields.push(descriptor),
        }
        self
    }

    pub fn build(self) -> RecordSchema<R> {
        self.schema
    }
}

impl<R> fmt::Debug for SchemaBuilder<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaBuilder")
            .field("pending_fields", &self.schema.fields.len())
            .finish()
    }
}

/// Implement [`SortableRecord`] for a type from a list of named accessors.
///
/// The schema is built on first use and cached in a `OnceLock`.
///
/// ```
/// use ordex_core::{SortableRecord, sortable_record};
///
/// struct Person {
///     name: String,
///     age: u32,
///     tags: Vec<String>,
/// }
///
/// sortable_record!(Person {
///     "name" => |p| p.name.clone(),
///     "age" => |p| p.age,
/// } opaque {
///     "tags": Vec<String>,
/// });
///
/// let names: Vec<_> = Person::schema().field_names().collect();
/// assert_eq!(names, ["name", "age", "tags"]);
/// ```
#[macro_export]
macro_rules! sortable_record {
    (
        $record:ty {
            $($name:literal => $accessor:expr),* $(,)?
        }
        $(opaque { $($opaque_name:literal : $opaque_ty:ty),* $(,)? })?
    ) => {
        impl $crate::sorting::SortableRecord for $record {
            fn schema() -> &'static $crate::sorting::RecordSchema<Self> {
                static SCHEMA: ::std::sync::OnceLock<
                    $crate::sorting::RecordSchema<$record>,
                > = ::std::sync::OnceLock::new();

                SCHEMA.get_or_init(|| {
                    $crate::sorting::RecordSchema::<$record>::builder()
                        $(.field($name, $accessor))*
                        $($(.opaque::<$opaque_ty>($opaque_name))*)?
                        .build()
                })
            }
        }
    };
}
