//! Character classification module
//!
//! Every character belongs to at most one of four primitive classes:
//!
//! - **lower**: ASCII `a-z` (26)
//! - **upper**: ASCII `A-Z` (26)
//! - **numeric**: ASCII `0-9` (10)
//! - **symbolic**: the 32 ASCII punctuation characters plus the space (33)
//!
//! Anything else (non-ASCII letters, control characters, emoji...) is
//! unclassified. Restricting the classes to ASCII keeps the cardinalities
//! above exact, which the keyspace math depends on.
//!
//! The [`CHARSETS`] table lists the 15 non-empty unions of the primitives and
//! is shared by every agent that needs it.

use std::fmt;

/// One of the four primitive character classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CharClass {
    Lower = 0,
    Upper = 1,
    Digit = 2,
    Symbol = 3,
}

impl CharClass {
    /// All primitives in mask-code order
    pub const ALL: [CharClass; 4] = [
        CharClass::Lower,
        CharClass::Upper,
        CharClass::Digit,
        CharClass::Symbol,
    ];

    /// Classify a single character
    #[inline]
    pub fn of(c: char) -> Option<Self> {
        match c {
            'a'..='z' => Some(Self::Lower),
            'A'..='Z' => Some(Self::Upper),
            '0'..='9' => Some(Self::Digit),
            ' ' => Some(Self::Symbol),
            c if c.is_ascii_punctuation() => Some(Self::Symbol),
            _ => None,
        }
    }

    /// Two-bit code used by the mask codec
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Inverse of [`CharClass::code`], only the two low bits are read
    #[inline]
    pub const fn from_code(code: u8) -> Self {
        match code & 0b11 {
            0 => Self::Lower,
            1 => Self::Upper,
            2 => Self::Digit,
            _ => Self::Symbol,
        }
    }

    /// Bit of this class inside a [`Charset`] membership mask
    #[inline]
    pub const fn bit(self) -> u8 {
        1 << (self as u8)
    }

    /// Number of distinct characters in the class
    pub const fn cardinality(self) -> u32 {
        match self {
            Self::Lower | Self::Upper => 26,
            Self::Digit => 10,
            Self::Symbol => 33,
        }
    }

    /// Single-letter tag: L, U, D or S
    pub const fn letter(self) -> char {
        match self {
            Self::Lower => 'L',
            Self::Upper => 'U',
            Self::Digit => 'D',
            Self::Symbol => 'S',
        }
    }

    /// Hashcat built-in charset placeholder
    pub const fn hashcat(self) -> &'static str {
        match self {
            Self::Lower => "?l",
            Self::Upper => "?u",
            Self::Digit => "?d",
            Self::Symbol => "?s",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Lower => "lower",
            Self::Upper => "upper",
            Self::Digit => "numeric",
            Self::Symbol => "symbolic",
        }
    }
}

impl fmt::Display for CharClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A named union of primitive classes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Charset {
    pub name: &'static str,
    /// Union of [`CharClass::bit`] values
    pub members: u8,
}

impl Charset {
    const fn new(name: &'static str, members: u8) -> Self {
        Self { name, members }
    }

    /// Sum of the cardinalities of the member classes
    pub const fn keyspace(&self) -> u32 {
        let mut total = 0;
        let mut i = 0;
        while i < CharClass::ALL.len() {
            let class = CharClass::ALL[i];
            if self.members & class.bit() != 0 {
                total += class.cardinality();
            }
            i += 1;
        }
        total
    }

    #[inline]
    pub const fn contains(&self, class: CharClass) -> bool {
        self.members & class.bit() != 0
    }

    /// Check whether a word consists only of characters from this charset
    pub fn matches(&self, word: &str) -> bool {
        word_classes(word).is_some_and(|classes| self.covers(classes))
    }

    /// Check whether a precomputed class mask (see [`word_classes`]) fits
    #[inline]
    pub const fn covers(&self, classes: u8) -> bool {
        classes & !self.members == 0
    }
}

const L: u8 = CharClass::Lower.bit();
const U: u8 = CharClass::Upper.bit();
const D: u8 = CharClass::Digit.bit();
const S: u8 = CharClass::Symbol.bit();

/// Number of entries in [`CHARSETS`]
pub const CHARSET_COUNT: usize = 15;

/// The fixed catalog of 15 charsets
pub static CHARSETS: [Charset; CHARSET_COUNT] = [
    Charset::new("lower", L),
    Charset::new("upper", U),
    Charset::new("numeric", D),
    Charset::new("symbolic", S),
    Charset::new("lower-upper", L | U),
    Charset::new("lower-numeric", L | D),
    Charset::new("lower-symbolic", L | S),
    Charset::new("upper-numeric", U | D),
    Charset::new("upper-symbolic", U | S),
    Charset::new("numeric-symbolic", D | S),
    Charset::new("lower-upper-numeric", L | U | D),
    Charset::new("lower-upper-symbolic", L | U | S),
    Charset::new("lower-numeric-symbolic", L | D | S),
    Charset::new("upper-numeric-symbolic", U | D | S),
    Charset::new("lower-upper-numeric-symbolic", L | U | D | S),
];

/// Union of the classes used by a word, or `None` if any character is
/// unclassified
pub fn word_classes(word: &str) -> Option<u8> {
    word.chars()
        .try_fold(0u8, |acc, c| CharClass::of(c).map(|class| acc | class.bit()))
}
