pub mod table;

pub use table::PitchBendTable;

use std::fmt;

use crate::error::{BendError, Result};

/// A 14-bit MIDI 1.0 pitch-bend value (0-16383, 8192 = no bend)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RawBendValue(u16);

impl RawBendValue {
    pub const MIN: RawBendValue = RawBendValue(0);
    pub const CENTER: RawBendValue = RawBendValue(0x2000);
    pub const MAX: RawBendValue = RawBendValue(0x3FFF);

    /// Number of distinct 14-bit values
    pub const COUNT: usize = 0x4000;

    /// Validate an integer as a 14-bit pitch-bend value
    pub fn new(value: i64) -> Result<Self> {
        if (0..=Self::MAX.0 as i64).contains(&value) {
            Ok(Self(value as u16))
        } else {
            Err(BendError::OutOfRange {
                value,
                max: Self::MAX.0,
            })
        }
    }

    /// Combine the two 7-bit data bytes of a pitch-bend message
    /// Bit 7 of each byte is ignored
    pub fn from_data_bytes(lsb: u8, msb: u8) -> Self {
        Self(((msb as u16 & 0x7F) << 7) | (lsb as u16 & 0x7F))
    }

    /// Split into (lsb, msb) 7-bit data bytes
    pub fn to_data_bytes(self) -> (u8, u8) {
        ((self.0 & 0x7F) as u8, (self.0 >> 7) as u8)
    }

    pub fn get(self) -> u16 {
        self.0
    }

    /// Signed distance from center (-8192 to 8191)
    pub fn offset(self) -> i32 {
        self.0 as i32 - Self::CENTER.0 as i32
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl Default for RawBendValue {
    fn default() -> Self {
        Self::CENTER
    }
}

impl fmt::Display for RawBendValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Maximum pitch deviation, in semitones, at full bend deflection
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct BendRange(f64);

impl BendRange {
    /// Range assumed by General MIDI receivers
    pub const DEFAULT_SEMITONES: f64 = 2.0;

    /// Create a range from semitones; must be finite and non-negative
    pub fn from_semitones(semitones: f64) -> Result<Self> {
        if !semitones.is_finite() {
            return Err(BendError::InvalidConfiguration(format!(
                "bend range must be finite, got {}",
                semitones
            )));
        }
        if semitones < 0.0 {
            return Err(BendError::InvalidConfiguration(format!(
                "bend range must not be negative, got {}",
                semitones
            )));
        }
        // Normalise -0.0 so that center entries compare as +0.0
        Ok(Self(semitones + 0.0))
    }

    pub fn from_cents(cents: f64) -> Result<Self> {
        Self::from_semitones(cents / 100.0)
    }

    pub fn semitones(self) -> f64 {
        self.0
    }

    pub fn cents(self) -> f64 {
        self.0 * 100.0
    }
}

impl Default for BendRange {
    fn default() -> Self {
        Self(Self::DEFAULT_SEMITONES)
    }
}

impl fmt::Display for BendRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "±{} semitones", self.0)
    }
}

/// Signed pitch offset from the nominal note pitch
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct PitchDeviation(f64);

impl PitchDeviation {
    pub const ZERO: PitchDeviation = PitchDeviation(0.0);

    pub fn from_semitones(semitones: f64) -> Self {
        Self(semitones)
    }

    pub fn from_cents(cents: f64) -> Self {
        Self(cents / 100.0)
    }

    pub fn semitones(self) -> f64 {
        self.0
    }

    pub fn cents(self) -> f64 {
        self.0 * 100.0
    }
}

impl std::ops::Neg for PitchDeviation {
    type Output = PitchDeviation;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl fmt::Display for PitchDeviation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(p) => write!(f, "{:+.*}", p, self.0),
            None => write!(f, "{:+}", self.0),
        }
    }
}
