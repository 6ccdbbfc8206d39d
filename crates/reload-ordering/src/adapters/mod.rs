//! # Adapters Layer (Hexagonal Architecture)
//!
//! Implements outbound port traits.

mod name_table;

pub use name_table::NameTable;
