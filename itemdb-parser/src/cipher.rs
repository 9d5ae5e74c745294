//! Rotating-XOR obfuscation used for text fields.

use crate::error::{Error, Result};

/// Where the key rotation starts for each record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeySchedule {
    /// Byte `i` of every record is XORed with `key[i % len]`.
    #[default]
    Fixed,
    /// Byte `i` of record `n` is XORed with `key[(i + n) % len]`.
    RecordIndex,
}

impl KeySchedule {
    /// Rotation start for the record at `index`.
    pub fn start(self, index: u64, key_len: usize) -> usize {
        match self {
            Self::Fixed => 0,
            Self::RecordIndex if key_len == 0 => 0,
            Self::RecordIndex => (index % key_len as u64) as usize,
        }
    }
}

/// `plaintext[i] = raw[i] ^ key[i % key.len()]`. Self-inverse.
pub fn xor_decrypt(raw: &[u8], key: &[u8]) -> Result<Vec<u8>> {
    xor_decrypt_at(raw, key, 0)
}

/// Like [`xor_decrypt`], but the rotation starts at `key[start % key.len()]`.
pub fn xor_decrypt_at(raw: &[u8], key: &[u8], start: usize) -> Result<Vec<u8>> {
    if key.is_empty() {
        return Err(Error::InvalidKey);
    }
    Ok(raw
        .iter()
        .zip(key.iter().cycle().skip(start % key.len()))
        .map(|(b, k)| b ^ k)
        .collect())
}
