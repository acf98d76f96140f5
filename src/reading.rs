use crate::error::ValidationError;

use std::fmt;

/// One DNA letter, with its fixed 2-bit wire tag.
///
/// Wire mapping (top two bits of a packed byte): `A=00`, `C=01`, `G=10`,
/// `T=11`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Base {
    A,
    C,
    G,
    T,
}

impl Base {
    /// Map a 2-bit tag to its base. Only the low two bits of `tag` are
    /// considered, so this is total.
    #[inline]
    pub fn from_tag(tag: u8) -> Base {
        match tag & 0b11 {
            0b00 => Base::A,
            0b01 => Base::C,
            0b10 => Base::G,
            0b11 => Base::T,
            // Masked to two bits above; only reachable if the mask changes.
            other => unreachable!("unexpected value for base tag bits: {other}"),
        }
    }

    /// The 2-bit wire tag (0..=3), inverse of [`Base::from_tag`].
    #[inline]
    pub fn tag(self) -> u8 {
        match self {
            Base::A => 0b00,
            Base::C => 0b01,
            Base::G => 0b10,
            Base::T => 0b11,
        }
    }

    #[inline]
    pub fn as_char(self) -> char {
        match self {
            Base::A => 'A',
            Base::C => 'C',
            Base::G => 'G',
            Base::T => 'T',
        }
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Confidence that a base call is correct: an integer in `0..=63`, stored
/// in the low six bits of a packed byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QualityScore(u8);

impl QualityScore {
    pub const MAX: u8 = 63;

    /// Construct from the binary score value. Fails for values above 63;
    /// `u8` rules out negatives at the type level.
    pub fn of_binary(value: u8) -> Result<QualityScore, ValidationError> {
        if value > Self::MAX {
            return Err(ValidationError::ScoreOutOfRange(value));
        }
        Ok(QualityScore(value))
    }

    /// Extract the score from a packed byte by masking the low six bits.
    /// Total: the mask guarantees the `0..=63` range.
    #[inline]
    pub fn from_byte(byte: u8) -> QualityScore {
        QualityScore(byte & 0b0011_1111)
    }

    #[inline]
    pub fn to_binary(self) -> u8 {
        self.0
    }

    /// The FASTQ representation: score + 33, always printable (`'!'`..=`` '`' ``).
    #[inline]
    pub fn to_fastq_char(self) -> char {
        (self.0 + 33) as char
    }
}

impl fmt::Display for QualityScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// One sequenced position: a base call paired with its quality score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BaseReading {
    pub base: Base,
    pub score: QualityScore,
}

impl BaseReading {
    #[inline]
    pub fn new(base: Base, score: QualityScore) -> BaseReading {
        BaseReading { base, score }
    }

    /// Decode a packed byte: bits 7-6 are the base tag, bits 5-0 the score.
    /// Total; every byte value, including `0xFF`, is a valid reading.
    #[inline]
    pub fn from_byte(byte: u8) -> BaseReading {
        BaseReading {
            base: Base::from_tag(byte >> 6),
            score: QualityScore::from_byte(byte),
        }
    }

    /// Encode back to the packed byte. The two parts occupy disjoint bit
    /// ranges, so the bitwise-OR is lossless.
    #[inline]
    pub fn to_byte(self) -> u8 {
        (self.base.tag() << 6) | self.score.to_binary()
    }
}

impl fmt::Display for BaseReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}, {}>", self.base, self.score)
    }
}
