//! Content checksum (SHA-1 digest)
//!
//! Checksums are 40-character lowercase hexadecimal strings computed over the
//! full byte content of a file. Two files with equal checksums are treated as
//! identical; the comparison never looks at their bytes again.

use crate::artifacts::checksums::CHECKSUM_LENGTH;
use sha1::{Digest, Sha1};
use std::io::{self, Read};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidChecksum {
    #[error("invalid checksum length: {0}")]
    Length(usize),
    #[error("invalid checksum characters: {0}")]
    Characters(String),
}

/// Hex-encoded SHA-1 digest of a file's content
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Checksum(String);

impl Checksum {
    /// Parse and validate a checksum read back from a snapshot or report
    pub fn try_parse(id: String) -> Result<Self, InvalidChecksum> {
        if id.len() != CHECKSUM_LENGTH {
            return Err(InvalidChecksum::Length(id.len()));
        }
        if !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(InvalidChecksum::Characters(id));
        }
        Ok(Self(id.to_ascii_lowercase()))
    }

    /// Stream `reader` to the end through the hasher
    pub fn compute<R: Read + ?Sized>(reader: &mut R) -> io::Result<Self> {
        let mut hasher = Sha1::new();
        io::copy(reader, &mut hasher)?;

        let digest = hasher.finalize();
        Ok(Self(format!("{digest:x}")))
    }

    pub fn of_bytes(data: &[u8]) -> Self {
        let digest = Sha1::digest(data);
        Self(format!("{digest:x}"))
    }
}

impl AsRef<str> for Checksum {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Checksum {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;

    #[test]
    fn computes_sha1_of_streamed_content() {
        let mut reader = io::Cursor::new(b"hello".to_vec());

        let checksum = Checksum::compute(&mut reader).unwrap();

        assert_eq!(checksum.as_ref(), "aaf4c61ddcc5e8a2dabede0f3b482cd9aea9434d");
        assert_eq!(checksum, Checksum::of_bytes(b"hello"));
    }

    #[rstest]
    #[case("abc", InvalidChecksum::Length(3))]
    #[case(
        "zzf4c61ddcc5e8a2dabede0f3b482cd9aea9434d",
        InvalidChecksum::Characters("zzf4c61ddcc5e8a2dabede0f3b482cd9aea9434d".to_string())
    )]
    fn rejects_malformed_checksums(#[case] raw: &str, #[case] expected: InvalidChecksum) {
        assert_eq!(Checksum::try_parse(raw.to_string()), Err(expected));
    }

    #[test]
    fn normalizes_uppercase_hex() {
        let checksum =
            Checksum::try_parse("AAF4C61DDCC5E8A2DABEDE0F3B482CD9AEA9434D".to_string()).unwrap();

        assert_eq!(checksum, Checksum::of_bytes(b"hello"));
    }

    proptest! {
        #[test]
        fn checksum_is_deterministic(data in proptest::collection::vec(any::<u8>(), 0..4096)) {
            let streamed = Checksum::compute(&mut io::Cursor::new(data.clone())).unwrap();
            prop_assert_eq!(streamed, Checksum::of_bytes(&data));
        }

        #[test]
        fn changing_any_byte_changes_the_checksum(
            data in proptest::collection::vec(any::<u8>(), 1..2048),
            index in any::<prop::sample::Index>(),
            flip in 1u8..=255,
        ) {
            let mut altered = data.clone();
            let i = index.index(altered.len());
            altered[i] ^= flip;

            prop_assert_ne!(Checksum::of_bytes(&data), Checksum::of_bytes(&altered));
        }
    }
}
