//! Conversion between untyped storage values and typed, possibly-absent fields.
//!
//! - `raw`: dynamic column values and the narrowed `TextCell` boundary
//! - `literal`: closed-set string enums and their nullable codec
//! - `row`: typed column decoding and whole-row entity decoding
//! - `pg`: the same enums bound to Postgres through sqlx

pub mod literal;
pub mod pg;
pub mod raw;
pub mod row;

pub use literal::LiteralEnum;
pub use raw::{RawValue, TextCell};
pub use row::{FromRaw, FromStorageRow, StorageRow};
