use core::fmt;
use std::io::Read;

use crate::{error::Result, schema::HeaderLayout, stream::ByteStream};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemDbHeader {
    /// Gates which fields exist in every record.
    pub version: u64,
    /// Number of records that follow.
    pub count: u64,
}

impl fmt::Display for ItemDbHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "itemdb v{} ({} items)", self.version, self.count)
    }
}

/// Read the version and record count from the start of the stream.
///
/// Values are taken verbatim; an implausible count only shows up later as a truncated read.
pub fn parse_header<R: Read>(
    stream: &mut ByteStream<R>,
    layout: HeaderLayout,
) -> Result<ItemDbHeader> {
    let version = stream.read_uint(layout.version_width, "header version")?;
    let count = stream.read_uint(layout.count_width, "header record count")?;
    Ok(ItemDbHeader { version, count })
}
