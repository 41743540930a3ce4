//! # Ordex Core
//!
//! Turns client-supplied sort strings such as `"lastName desc, age asc, id"`
//! into a stable multi-key ordering over typed records.
//!
//! ## Overview
//!
//! - **Parsing**: comma-separated segments of `field [asc|ascending|desc|descending]`
//! - **Field resolution**: record types register named fields through
//!   [`sortable_record!`]; names are resolved against that schema at runtime
//! - **Chaining**: keys compose into one comparator, first key primary
//! - **Leniency**: blank segments, unknown fields and unrecognized direction
//!   words are skipped rather than rejected
//!
//! A field whose type has no natural ordering is the only failure, reported
//! as [`SortError::IncomparableField`].
//!
//! ## Feature Flags
//!
//! - `parallel-sorting`: adds `Ordered::into_vec_par` and
//!   `ChainedOrder::par_sort`, which sort large inputs on rayon's pool
//!   (still stable). The sequential API is unchanged.
//!
//! ## Examples
//!
//! ```
//! use ordex_core::{OrderBySpec, sortable_record};
//!
//! #[derive(Debug)]
//! struct Person {
//!     last_name: String,
//!     age: u32,
//! }
//!
//! sortable_record!(Person {
//!     "lastName" => |p| p.last_name.clone(),
//!     "age" => |p| p.age,
//! });
//!
//! let people = vec![
//!     Person { last_name: "Ng".into(), age: 40 },
//!     Person { last_name: "Abe".into(), age: 31 },
//!     Person { last_name: "Ng".into(), age: 22 },
//! ];
//!
//! let sorted = people
//!     .order_by_spec("lastName desc, age")?
//!     .into_vec();
//! assert_eq!(sorted[0].age, 22);
//! assert_eq!(sorted[2].last_name, "Abe");
//! # Ok::<(), ordex_core::SortError>(())
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)]

/// Configuration for applying sort specifications
pub mod config;

/// Error types and error handling utilities
pub mod error;

/// Parsing, field resolution and chained ordering
pub mod sorting;

pub use config::SortConfig;
pub use error::{Result, SortError};
pub use sorting::{
    ChainedOrder, FieldAccessor, FieldMatching, IntoSortValue, MissingValues,
    OrderBySpec, Ordered, RecordSchema, SortKey, SortOrder, SortSpec,
    SortToken, SortValue, SortableRecord, ValueKind, order_by_spec,
    order_by_spec_with,
};
