//! Hashcat-style mask codec
//!
//! A mask is the per-character class sequence of a word (`Pass1!` becomes
//! `U L L L D S`, rendered `?u?l?l?l?d?s`). Masks are kept packed so that
//! frequency tables over millions of words stay small.
//!
//! ## Packed layout
//!
//! Classes are packed four per byte, two bits each, most significant pair
//! first. Every code ends with a trailer byte holding the 0 to 3 symbols left
//! over after the full bytes, left-aligned and padded with `L` (`00`); the two
//! low bits of the trailer store how many of its symbols are real.
//!
//! ```text
//! "ULLLDS" -> 01 00 00 00 | 10 11 00 10
//!             full byte     D  S  pad count=2
//! ```
//!
//! Because the trailer's count only covers the trailer itself, a length that
//! is a multiple of four simply ends with a `0x00` trailer and decoding never
//! has to look back at the previous byte.

use std::fmt;
use std::str::FromStr;

use crate::charset::CharClass;
use crate::error::AnalyzerError;

/// Packed mask code
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaskCode(Box<[u8]>);

impl MaskCode {
    /// Pack a class sequence
    pub fn encode(classes: &[CharClass]) -> Self {
        let mut bytes = Vec::with_capacity(classes.len() / 4 + 1);
        let mut chunks = classes.chunks_exact(4);

        for chunk in &mut chunks {
            bytes.push(pack(chunk));
        }

        let rest = chunks.remainder();
        bytes.push(pack(rest) | rest.len() as u8);

        Self(bytes.into_boxed_slice())
    }

    /// Classify and pack a word, `None` if any character is unclassified
    pub fn from_word(word: &str) -> Option<Self> {
        let classes = word
            .chars()
            .map(CharClass::of)
            .collect::<Option<Vec<_>>>()?;
        Some(Self::encode(&classes))
    }

    /// Unpack into the class sequence
    pub fn decode(&self) -> Vec<CharClass> {
        let Some((&trailer, full)) = self.0.split_last() else {
            return Vec::new();
        };

        let mut classes = Vec::with_capacity(full.len() * 4 + 3);
        for &byte in full {
            classes.extend(unpack(byte));
        }
        let real = usize::from(trailer & 0b11);
        classes.extend(unpack(trailer).into_iter().take(real));

        classes
    }

    /// Raw packed bytes
    #[cfg(test)]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Number of candidates the mask can generate:
    /// `26^(#L + #U) * 10^#D * 33^#S`
    ///
    /// Returned as `f64` since long masks overflow every integer type; the
    /// value is exact as long as it stays below 2^53.
    pub fn keyspace(&self) -> f64 {
        self.decode()
            .into_iter()
            .map(|class| f64::from(class.cardinality()))
            .product()
    }

    /// Occurrences per unit of keyspace
    pub fn density(&self, count: u64) -> f64 {
        count as f64 / self.keyspace()
    }

    /// `L`/`U`/`D`/`S` letter form, e.g. `ULLLDS`
    #[cfg(test)]
    pub fn letters(&self) -> String {
        self.decode().into_iter().map(CharClass::letter).collect()
    }
}

#[inline]
fn pack(classes: &[CharClass]) -> u8 {
    classes
        .iter()
        .enumerate()
        .fold(0u8, |byte, (i, class)| byte | class.code() << (6 - 2 * i))
}

#[inline]
fn unpack(byte: u8) -> [CharClass; 4] {
    [
        CharClass::from_code(byte >> 6),
        CharClass::from_code(byte >> 4),
        CharClass::from_code(byte >> 2),
        CharClass::from_code(byte),
    ]
}

impl fmt::Display for MaskCode {
    /// Hashcat notation, e.g. `?u?l?l?l?d?s`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for class in self.decode() {
            f.write_str(class.hashcat())?;
        }
        Ok(())
    }
}

impl FromStr for MaskCode {
    type Err = AnalyzerError;

    /// Parse hashcat notation; only the `?l ?u ?d ?s` built-ins are accepted
    fn from_str(mask: &str) -> Result<Self, Self::Err> {
        let invalid = |position| AnalyzerError::InvalidMask {
            mask: mask.to_string(),
            position,
        };

        let bytes = mask.as_bytes();
        if bytes.len() % 2 != 0 {
            return Err(invalid(bytes.len() - 1));
        }

        let classes = bytes
            .chunks_exact(2)
            .enumerate()
            .map(|(i, token)| match token {
                b"?l" => Ok(CharClass::Lower),
                b"?u" => Ok(CharClass::Upper),
                b"?d" => Ok(CharClass::Digit),
                b"?s" => Ok(CharClass::Symbol),
                _ => Err(invalid(i * 2)),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::encode(&classes))
    }
}
