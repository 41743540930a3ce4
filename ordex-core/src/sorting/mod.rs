//! Textual multi-key sorting for typed records
//!
//! This module provides:
//! - Parsing of comma-separated sort specifications
//! - Typed sort values with natural ordering
//! - Record schemas that resolve field names to accessors
//! - Chained multi-key comparison with per-key direction
//! - The `order_by_spec` entry point and its chainable result

pub mod chain;
pub mod order;
pub mod ordered;
pub mod parallel;
pub mod parser;
pub mod schema;
pub mod utils;
pub mod value;

pub use chain::*;
pub use order::*;
pub use ordered::*;
pub use parser::*;
pub use schema::*;
pub use value::*;
