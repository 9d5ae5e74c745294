//! Declarative record layouts. A schema is plain data; the decoder interprets it.

mod field;
mod items;

pub use field::{Decryption, FieldDescriptor, FieldKind};
pub use items::item_schema;

use crate::constants::{DEFAULT_COUNT_WIDTH, DEFAULT_VERSION_WIDTH};

/// Byte widths of the two header integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderLayout {
    pub version_width: usize,
    pub count_width: usize,
}

impl HeaderLayout {
    pub const fn new(version_width: usize, count_width: usize) -> Self {
        Self {
            version_width,
            count_width,
        }
    }

    pub const fn size(&self) -> usize {
        self.version_width + self.count_width
    }
}

impl Default for HeaderLayout {
    fn default() -> Self {
        Self::new(DEFAULT_VERSION_WIDTH, DEFAULT_COUNT_WIDTH)
    }
}

/// Ordered field descriptors plus the header layout they are read under.
///
/// Field order is stream order. A schema is never mutated while decoding, so one instance
/// can back any number of parses, including concurrent ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    header: HeaderLayout,
    fields: Vec<FieldDescriptor>,
    index_field: Option<usize>,
}

impl Schema {
    pub fn new(fields: impl IntoIterator<Item = FieldDescriptor>) -> Self {
        Self {
            header: HeaderLayout::default(),
            fields: fields.into_iter().collect(),
            index_field: None,
        }
    }

    pub fn with_header(mut self, header: HeaderLayout) -> Self {
        self.header = header;
        self
    }

    /// Require the named integer field to equal the record's position in the stream.
    /// An unknown name leaves the check disabled.
    pub fn with_index_field(mut self, name: &str) -> Self {
        self.index_field = self.fields.iter().position(|f| f.name == name);
        self
    }

    pub fn header(&self) -> HeaderLayout {
        self.header
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub(crate) fn index_position(&self) -> Option<usize> {
        self.index_field
    }

    pub fn index_field(&self) -> Option<&FieldDescriptor> {
        self.index_field.map(|i| &self.fields[i])
    }

    /// Descriptors whose bytes exist in a stream of the given version.
    pub fn fields_for(&self, version: u64) -> impl Iterator<Item = &FieldDescriptor> + '_ {
        self.fields.iter().filter(move |f| f.is_present_in(version))
    }

    /// Names of the attributes a record of this version actually carries.
    pub fn columns(&self, version: u64) -> Vec<&str> {
        self.fields_for(version)
            .filter(|f| f.kind.is_stored())
            .map(|f| f.name.as_ref())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Default for Schema {
    fn default() -> Self {
        item_schema()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sample() -> Schema {
        Schema::new([
            FieldDescriptor::int("id", 4),
            FieldDescriptor::ignored("pad", 3),
            FieldDescriptor::string("label").since(2),
            FieldDescriptor::int("extra", 1).since(5),
        ])
    }

    #[test]
    fn columns_follow_version_and_skip_ignored() {
        let s = sample();
        assert_eq!(s.columns(1), vec!["id"]);
        assert_eq!(s.columns(2), vec!["id", "label"]);
        assert_eq!(s.columns(9), vec!["id", "label", "extra"]);
        assert_eq!(s.fields_for(1).count(), 2);
    }

    #[test]
    fn index_field_lookup() {
        let s = sample();
        assert!(s.index_field().is_none());
        let s = s.with_index_field("id");
        assert_eq!(s.index_field().map(|f| f.name.as_ref()), Some("id"));
        let s = s.with_index_field("missing");
        assert!(s.index_field().is_none());
    }

    #[test]
    fn header_defaults_to_itemdb_layout() {
        let s = sample();
        assert_eq!(s.header(), HeaderLayout::new(2, 4));
        assert_eq!(s.header().size(), 6);
        let s = s.with_header(HeaderLayout::new(2, 2));
        assert_eq!(s.header().size(), 4);
    }
}
