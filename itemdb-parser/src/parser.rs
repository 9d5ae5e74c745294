//! Schema-driven record decoding.

pub mod decoder;
pub mod record;

pub use decoder::{ParseResult, decode_record, parse, parse_bytes, parse_file};
pub use record::{Record, Value};
