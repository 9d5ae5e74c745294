//! Decoder for the versioned `itemdb` item container.
//!
//! ```no_run
//! use itemdb_parser::{parse_file, schema::item_schema};
//!
//! let result = parse_file("items.dat", &item_schema())?;
//! println!("v{}: {} items", result.version, result.count);
//! # Ok::<(), itemdb_parser::Error>(())
//! ```

pub mod cipher;
pub mod constants;
pub mod error;
pub mod export;
pub mod headers;
pub mod parser;
pub mod schema;
pub mod stream;

pub use error::{Error, Result};
pub use parser::{ParseResult, Record, Value, parse, parse_bytes, parse_file};
pub use schema::{FieldDescriptor, FieldKind, Schema};
