//! Integer pitch-bend conversion in the cent domain
//!
//! These mirror the encode/decode rules a synthesizer firmware would use:
//! everything stays in `i64`, with division truncating toward zero. Encoding
//! scales by half the value space (`0x2000` / `0x8000_0000`) while decoding
//! divides by the positive half minus one (`0x1FFF` / `0x7FFF_FFFF`), so the
//! maximum value decodes to exactly `+range` and the minimum to `-range`.

use std::fmt;

use crate::error::{BendError, Result};

/// MIDI 1.0 center (14-bit)
pub const MIDI1_CENTER: i64 = 0x2000;
/// MIDI 1.0 maximum (14-bit)
pub const MIDI1_MAX: i64 = 0x3FFF;
/// MIDI 2.0 center (32-bit)
pub const MIDI2_CENTER: i64 = 0x8000_0000;
/// MIDI 2.0 maximum (32-bit)
pub const MIDI2_MAX: i64 = 0xFFFF_FFFF;

/// Largest accepted range; keeps `offset * MIDI2_CENTER` well inside `i64`
pub const MAX_RANGE_CENTS: i64 = 1_000_000;

/// Pitch-bend sensitivity in whole cents, strictly positive
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CentRange(i64);

impl CentRange {
    pub fn new(cents: i64) -> Result<Self> {
        if cents <= 0 || cents > MAX_RANGE_CENTS {
            return Err(BendError::InvalidConfiguration(format!(
                "pitch bend range must be between 1 and {} cents, got {}",
                MAX_RANGE_CENTS, cents
            )));
        }
        Ok(Self(cents))
    }

    pub fn cents(self) -> i64 {
        self.0
    }

    /// Every whole-cent offset from `-range` to `+range` inclusive
    pub fn offsets(self) -> std::ops::RangeInclusive<i64> {
        -self.0..=self.0
    }
}

impl fmt::Display for CentRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} cents", self.0)
    }
}

/// Encode a cent offset as a 14-bit MIDI 1.0 pitch-bend value
///
/// `min(offset * 0x2000 / range + 0x2000, 0x3FFF)`
pub fn pitch_bend_midi1(offset_cents: i64, range: CentRange) -> i64 {
    (offset_cents * MIDI1_CENTER / range.0 + MIDI1_CENTER).min(MIDI1_MAX)
}

/// Decode a 14-bit MIDI 1.0 pitch-bend value to cents
///
/// `max(range * (value - 0x2000) / 0x1FFF, -range)`
pub fn pitch_from_midi1(value: i64, range: CentRange) -> i64 {
    (range.0 * (value - MIDI1_CENTER) / (MIDI1_CENTER - 1)).max(-range.0)
}

/// Encode a cent offset as a 32-bit MIDI 2.0 pitch-bend value
///
/// `min(offset * 0x8000_0000 / range + 0x8000_0000, 0xFFFF_FFFF)`
pub fn pitch_bend_midi2(offset_cents: i64, range: CentRange) -> i64 {
    (offset_cents * MIDI2_CENTER / range.0 + MIDI2_CENTER).min(MIDI2_MAX)
}

/// Decode a 32-bit MIDI 2.0 pitch-bend value to cents
///
/// `max(range * (value - 0x8000_0000) / 0x7FFF_FFFF, -range)`
pub fn pitch_from_midi2(value: i64, range: CentRange) -> i64 {
    (range.0 * (value - MIDI2_CENTER) / (MIDI2_CENTER - 1)).max(-range.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cents(c: i64) -> CentRange {
        CentRange::new(c).unwrap()
    }

    #[test]
    fn test_rejects_zero_range() {
        assert!(matches!(CentRange::new(0), Err(BendError::InvalidConfiguration(_))));
        assert!(CentRange::new(-100).is_err());
        assert!(CentRange::new(MAX_RANGE_CENTS + 1).is_err());
    }

    #[test]
    fn test_midi1_endpoints() {
        let r = cents(200);
        assert_eq!(pitch_bend_midi1(-200, r), 0);
        assert_eq!(pitch_bend_midi1(0, r), 0x2000);
        // +range would be 0x4000, clamped into 14 bits
        assert_eq!(pitch_bend_midi1(200, r), 0x3FFF);
        assert_eq!(pitch_bend_midi1(100, r), 0x3000);
    }

    #[test]
    fn test_midi1_decode_endpoints() {
        let r = cents(200);
        assert_eq!(pitch_from_midi1(0, r), -200);
        assert_eq!(pitch_from_midi1(0x2000, r), 0);
        assert_eq!(pitch_from_midi1(0x3FFF, r), 200);
    }

    #[test]
    fn test_midi1_truncates_toward_zero() {
        let r = cents(700);
        // 1 * 8192 / 700 = 11.70 -> 11
        assert_eq!(pitch_bend_midi1(1, r), 0x2000 + 11);
        // -1 * 8192 / 700 = -11.70 -> -11
        assert_eq!(pitch_bend_midi1(-1, r), 0x2000 - 11);
        // 700 * 11 / 8191 = 0.94 -> 0
        assert_eq!(pitch_from_midi1(0x2000 + 11, r), 0);
    }

    #[test]
    fn test_midi2_endpoints() {
        let r = cents(4800);
        assert_eq!(pitch_bend_midi2(-4800, r), 0);
        assert_eq!(pitch_bend_midi2(0, r), 0x8000_0000);
        assert_eq!(pitch_bend_midi2(4800, r), 0xFFFF_FFFF);
        assert_eq!(pitch_from_midi2(0, r), -4800);
        assert_eq!(pitch_from_midi2(0xFFFF_FFFF, r), 4800);
    }

    #[test]
    fn test_midi2_round_trip_per_cent() {
        // 32 bits have enough resolution that every cent survives encode/decode
        for c in [100, 200, 1200, 9600] {
            let r = cents(c);
            for offset in r.offsets() {
                let pb = pitch_bend_midi2(offset, r);
                let back = pitch_from_midi2(pb, r);
                assert!((back - offset).abs() <= 1, "range {} offset {} -> {}", c, offset, back);
            }
        }
    }

    #[test]
    fn test_offsets_outside_range_clamp() {
        let r = cents(100);
        assert_eq!(pitch_bend_midi1(500, r), MIDI1_MAX);
        assert_eq!(pitch_from_midi1(-50_000, r), -100);
        assert_eq!(pitch_bend_midi2(500, r), MIDI2_MAX);
    }
}
