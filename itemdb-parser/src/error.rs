use thiserror::Error;

/// Everything that can abort an itemdb parse. None of these are recovered: field boundaries
/// come from the schema, so there is no way to resynchronize mid-record.
#[derive(Error, Debug)]
pub enum Error {
    #[error("stream truncated at offset {offset}: {context} needs {needed} more bytes")]
    TruncatedStream {
        offset: u64,
        needed: usize,
        context: String,
    },

    #[error("cannot decode field `{field}` at offset {offset}: {reason}")]
    Decode {
        field: String,
        offset: u64,
        reason: String,
    },

    #[error("decryption key is empty")]
    InvalidKey,

    #[error("record {index} has id {found} in a v{version} stream, schema is likely out of date")]
    OffsetMismatch { index: u64, found: u64, version: u64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
