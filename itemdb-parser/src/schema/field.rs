use std::borrow::Cow;

use crate::cipher::KeySchedule;

/// How a field's bytes are laid out in the stream and what they decode to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Little-endian unsigned integer of the given byte width.
    FixedInt(usize),
    /// Raw block of the given byte width.
    FixedBytes(usize),
    /// u16 little-endian length, then that many bytes of UTF-8 text.
    LengthPrefixedString,
    /// Consumed but not stored. `None` means length-prefixed.
    Ignored(Option<usize>),
}

impl FieldKind {
    /// Byte width when it is known without looking at the stream.
    pub const fn fixed_width(self) -> Option<usize> {
        match self {
            Self::FixedInt(w) | Self::FixedBytes(w) | Self::Ignored(Some(w)) => Some(w),
            Self::LengthPrefixedString | Self::Ignored(None) => None,
        }
    }

    pub const fn is_stored(self) -> bool {
        !matches!(self, Self::Ignored(_))
    }
}

/// Optional decryption rule attached to a text field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decryption {
    pub key: Cow<'static, [u8]>,
    pub schedule: KeySchedule,
    /// Streams older than this carry the field in plaintext.
    pub from_version: u64,
}

/// Declares how one attribute of a record is decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: Cow<'static, str>,
    pub kind: FieldKind,
    /// First format version whose records contain this field.
    pub introduced_in: u64,
    pub decryption: Option<Decryption>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<Cow<'static, str>>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            introduced_in: 1,
            decryption: None,
        }
    }

    pub fn int(name: impl Into<Cow<'static, str>>, width: usize) -> Self {
        Self::new(name, FieldKind::FixedInt(width))
    }

    pub fn bytes(name: impl Into<Cow<'static, str>>, width: usize) -> Self {
        Self::new(name, FieldKind::FixedBytes(width))
    }

    pub fn string(name: impl Into<Cow<'static, str>>) -> Self {
        Self::new(name, FieldKind::LengthPrefixedString)
    }

    pub fn ignored(name: impl Into<Cow<'static, str>>, width: usize) -> Self {
        Self::new(name, FieldKind::Ignored(Some(width)))
    }

    /// Ignored field that carries its own u16 length prefix.
    pub fn ignored_string(name: impl Into<Cow<'static, str>>) -> Self {
        Self::new(name, FieldKind::Ignored(None))
    }

    pub fn since(mut self, version: u64) -> Self {
        self.introduced_in = version;
        self
    }

    /// XOR the raw bytes with `key` (fixed schedule) before decoding them as text.
    pub fn encrypted(mut self, key: impl Into<Cow<'static, [u8]>>) -> Self {
        self.decryption = Some(Decryption {
            key: key.into(),
            schedule: KeySchedule::Fixed,
            from_version: 0,
        });
        self
    }

    /// Change the rotation schedule. No effect unless a key is set.
    pub fn key_schedule(mut self, schedule: KeySchedule) -> Self {
        if let Some(d) = self.decryption.as_mut() {
            d.schedule = schedule;
        }
        self
    }

    /// Only decrypt in streams at or above `version`. No effect unless a key is set.
    pub fn decrypt_from(mut self, version: u64) -> Self {
        if let Some(d) = self.decryption.as_mut() {
            d.from_version = version;
        }
        self
    }

    pub fn is_present_in(&self, version: u64) -> bool {
        version >= self.introduced_in
    }

    /// Decryption rule in effect for a stream of the given version.
    pub fn decryption_for(&self, version: u64) -> Option<&Decryption> {
        self.decryption
            .as_ref()
            .filter(|d| version >= d.from_version)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn constructors_default_to_version_one_without_key() {
        let f = FieldDescriptor::int("id", 4);
        assert_eq!(f.name, "id");
        assert_eq!(f.kind, FieldKind::FixedInt(4));
        assert_eq!(f.introduced_in, 1);
        assert_eq!(f.decryption, None);
    }

    #[test]
    fn key_modifiers_apply_only_after_encrypted() {
        let plain = FieldDescriptor::string("a").key_schedule(KeySchedule::RecordIndex);
        assert_eq!(plain.decryption, None);

        let keyed = FieldDescriptor::string("b")
            .encrypted(&b"k"[..])
            .key_schedule(KeySchedule::RecordIndex)
            .decrypt_from(3);
        let d = keyed.decryption.as_ref().unwrap();
        assert_eq!(d.schedule, KeySchedule::RecordIndex);
        assert_eq!(d.from_version, 3);
        assert!(keyed.decryption_for(2).is_none());
        assert!(keyed.decryption_for(3).is_some());
    }

    #[test]
    fn widths() {
        assert_eq!(FieldKind::FixedBytes(13).fixed_width(), Some(13));
        assert_eq!(FieldKind::Ignored(Some(62)).fixed_width(), Some(62));
        assert_eq!(FieldKind::Ignored(None).fixed_width(), None);
        assert_eq!(FieldKind::LengthPrefixedString.fixed_width(), None);
        assert!(!FieldKind::Ignored(None).is_stored());
    }
}
