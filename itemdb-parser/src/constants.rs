/// Width of the little-endian length that precedes every dynamic-length field.
pub const LENGTH_PREFIX_WIDTH: usize = 2;

/// Header layout of the real format: u16 version followed by u32 item count.
pub const DEFAULT_VERSION_WIDTH: usize = 2;
pub const DEFAULT_COUNT_WIDTH: usize = 4;

/// Rotating XOR key applied to item names.
pub const ITEM_NAME_KEY: &[u8] = b"PBG892FXX982ABC*";

/// Item names are stored in plaintext before this format version.
pub const ITEM_NAME_ENCRYPTED_SINCE: u64 = 3;

/// Newest format version the built-in schema knows about.
pub const LATEST_KNOWN_VERSION: u64 = 16;

/// Upper bound on record slots reserved up front, independent of the declared count.
pub const MAX_PREALLOCATED_RECORDS: usize = 4096;
