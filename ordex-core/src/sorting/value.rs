//! Sort values and their natural ordering
//!
//! Field accessors lower record fields into [`SortValue`]s. Each variant
//! compares by the natural order of the underlying type; missing data sorts
//! after every present value.

use super::order::SortOrder;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use uuid::Uuid;

/// Declared value type of a sortable field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Bool,
    Int,
    UInt,
    Float,
    Char,
    Text,
    Date,
    DateTime,
    Uuid,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Bool => "bool",
            ValueKind::Int => "int",
            ValueKind::UInt => "uint",
            ValueKind::Float => "float",
            ValueKind::Char => "char",
            ValueKind::Text => "text",
            ValueKind::Date => "date",
            ValueKind::DateTime => "datetime",
            ValueKind::Uuid => "uuid",
        };
        f.write_str(name)
    }
}

/// A field value extracted for comparison
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SortValue {
    Bool(bool),
    Int(i64),
    UInt(u64),
    /// Total order: NaN sorts above every number
    Float(OrderedFloat<f64>),
    Char(char),
    /// Ordinal comparison of the UTF-8 text
    Text(String),
    Date(NaiveDate),
    DateTime(DateTime<Utc>),
    Uuid(Uuid),
    Missing,
}

impl SortValue {
    pub fn is_missing(&self) -> bool {
        matches!(self, SortValue::Missing)
    }

    fn rank(&self) -> u8 {
        match self {
            SortValue::Bool(_) => 0,
            SortValue::Int(_) => 1,
            SortValue::UInt(_) => 2,
            SortValue::Float(_) => 3,
            SortValue::Char(_) => 4,
            SortValue::Text(_) => 5,
            SortValue::Date(_) => 6,
            SortValue::DateTime(_) => 7,
            SortValue::Uuid(_) => 8,
            SortValue::Missing => u8::MAX,
        }
    }

    /// Compare under a key's direction and missing-value policy
    #[inline]
    pub fn compare_with_order(
        &self,
        other: &Self,
        order: SortOrder,
        missing: MissingValues,
    ) -> Ordering {
        if missing == MissingValues::AlwaysLast {
            match (self.is_missing(), other.is_missing()) {
                (true, true) => return Ordering::Equal,
                (true, false) => return Ordering::Greater,
                (false, true) => return Ordering::Less,
                (false, false) => {}
            }
        }
        order.apply(self.cmp(other))
    }
}

impl Ord for SortValue {
    fn cmp(&self, other: &Self) -> Ordering {
        use SortValue::*;
        match (self, other) {
            (Bool(a), Bool(b)) => a.cmp(b),
            (Int(a), Int(b)) => a.cmp(b),
            (UInt(a), UInt(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.cmp(b),
            (Char(a), Char(b)) => a.cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            (Date(a), Date(b)) => a.cmp(b),
            (DateTime(a), DateTime(b)) => a.cmp(b),
            (Uuid(a), Uuid(b)) => a.cmp(b),
            // Values with data come first. A single key never mixes kinds.
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for SortValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Placement of missing values when a key is descending
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum MissingValues {
    /// Missing sorts last ascending and first descending
    #[default]
    Natural,
    /// Missing sorts last in both directions
    AlwaysLast,
}

/// Conversion of a field type into a comparable [`SortValue`]
pub trait IntoSortValue {
    /// The declared kind for this field type
    const KIND: ValueKind;

    fn into_sort_value(self) -> SortValue;
}

macro_rules! impl_into_sort_value {
    ($kind:ident, $variant:ident, $target:ty => $($ty:ty),+ $(,)?) => {
        $(
            impl IntoSortValue for $ty {
                const KIND: ValueKind = ValueKind::$kind;

                #[inline]
                fn into_sort_value(self) -> SortValue {
                    SortValue::$variant(<$target>::from(self))
                }
            }
        )+
    };
}

impl_into_sort_value!(Int, Int, i64 => i8, i16, i32, i64);
impl_into_sort_value!(UInt, UInt, u64 => u8, u16, u32, u64);
impl_into_sort_value!(Bool, Bool, bool => bool);
impl_into_sort_value!(Char, Char, char => char);
impl_into_sort_value!(Text, Text, String => String, &str);
impl_into_sort_value!(Date, Date, NaiveDate => NaiveDate);
impl_into_sort_value!(DateTime, DateTime, DateTime<Utc> => DateTime<Utc>);
impl_into_sort_value!(Uuid, Uuid, Uuid => Uuid);

impl IntoSortValue for isize {
    const KIND: ValueKind = ValueKind::Int;

    fn into_sort_value(self) -> SortValue {
        SortValue::Int(self as i64)
    }
}

impl IntoSortValue for usize {
    const KIND: ValueKind = ValueKind::UInt;

    fn into_sort_value(self) -> SortValue {
        SortValue::UInt(self as u64)
    }
}

impl IntoSortValue for f32 {
    const KIND: ValueKind = ValueKind::Float;

    fn into_sort_value(self) -> SortValue {
        SortValue::Float(OrderedFloat(f64::from(self)))
    }
}

impl IntoSortValue for f64 {
    const KIND: ValueKind = ValueKind::Float;

    fn into_sort_value(self) -> SortValue {
        SortValue::Float(OrderedFloat(self))
    }
}

impl IntoSortValue for NaiveDateTime {
    const KIND: ValueKind = ValueKind::DateTime;

    fn into_sort_value(self) -> SortValue {
        SortValue::DateTime(self.and_utc())
    }
}

impl IntoSortValue for DateTime<FixedOffset> {
    const KIND: ValueKind = ValueKind::DateTime;

    fn into_sort_value(self) -> SortValue {
        SortValue::DateTime(self.with_timezone(&Utc))
    }
}

impl<T: IntoSortValue> IntoSortValue for Option<T> {
    const KIND: ValueKind = T::KIND;

    fn into_sort_value(self) -> SortValue {
        match self {
            Some(value) => value.into_sort_value(),
            None => SortValue::Missing,
        }
    }
}
