//! Commit identifiers: the 20 bytes every shard is derived from.
//!
//! An [`Identifier`] is parsed from a hex string. The first 40 hex digits are
//! significant; shorter input is right-padded with `'0'` and longer input is
//! truncated, so `"abc123"` and `"abc1230000…"` name the same shard.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ShardError;

/// Number of significant bytes in an identifier.
pub const IDENTIFIER_BYTES: usize = 20;
/// Number of significant hex digits in an identifier.
pub const IDENTIFIER_HEX_LEN: usize = IDENTIFIER_BYTES * 2;
/// Length of the short prefix shown in captions and file names.
pub const SHORT_LEN: usize = 8;

/// A normalized 20-byte commit identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Identifier {
    bytes: [u8; IDENTIFIER_BYTES],
}

impl Identifier {
    /// Parses a hex string, padding or truncating to 40 digits.
    ///
    /// Returns `ShardError::InvalidIdentifier` if the input is empty or any
    /// character is not an ASCII hex digit. Validation covers the whole input,
    /// including digits past the 40th.
    pub fn parse(hex: &str) -> Result<Self, ShardError> {
        if hex.is_empty() {
            return Err(ShardError::InvalidIdentifier(
                "identifier must not be empty".into(),
            ));
        }
        if let Some((pos, ch)) = hex.char_indices().find(|(_, c)| !c.is_ascii_hexdigit()) {
            return Err(ShardError::InvalidIdentifier(format!(
                "non-hex character {ch:?} at position {pos}"
            )));
        }

        let mut bytes = [0u8; IDENTIFIER_BYTES];
        for (i, digit) in hex.bytes().take(IDENTIFIER_HEX_LEN).enumerate() {
            let nibble = hex_value(digit);
            if i % 2 == 0 {
                bytes[i / 2] = nibble << 4;
            } else {
                bytes[i / 2] |= nibble;
            }
        }
        Ok(Self { bytes })
    }

    /// Builds an identifier from raw bytes.
    pub fn from_bytes(bytes: [u8; IDENTIFIER_BYTES]) -> Self {
        Self { bytes }
    }

    /// The 20 significant bytes.
    pub fn bytes(&self) -> &[u8; IDENTIFIER_BYTES] {
        &self.bytes
    }

    /// Byte at `index`.
    pub fn byte(&self, index: usize) -> u8 {
        self.bytes[index]
    }

    /// Generator seed: bytes 0..4 as a big-endian `u32`.
    ///
    /// May be zero; [`Xorshift32::new`](crate::prng::Xorshift32::new)
    /// normalizes that.
    pub fn seed(&self) -> u32 {
        u32::from_be_bytes([self.bytes[0], self.bytes[1], self.bytes[2], self.bytes[3]])
    }

    /// Lower-case 40-digit hex form.
    pub fn to_hex(&self) -> String {
        self.bytes.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// First eight hex digits of the normalized form.
    pub fn short(&self) -> String {
        let mut hex = self.to_hex();
        hex.truncate(SHORT_LEN);
        hex
    }
}

fn hex_value(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        b'a'..=b'f' => digit - b'a' + 10,
        b'A'..=b'F' => digit - b'A' + 10,
        _ => 0,
    }
}

impl FromStr for Identifier {
    type Err = ShardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Identifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Identifier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Identifier::parse(&s).map_err(serde::de::Error::custom)
    }
}
