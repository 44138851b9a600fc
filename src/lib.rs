//! MIDI pitch-bend lookup tables
//!
//! Converts between raw MIDI pitch-bend values and pitch offsets for a given
//! bend range, either through a precomputed 14-bit table ([`bend`]) or through
//! exact integer cent arithmetic for MIDI 1.0 and MIDI 2.0 ([`formula`]).

pub mod bend;
pub mod config;
pub mod error;
pub mod formula;
pub mod midi;
pub mod report;
pub mod types;

pub use bend::{BendRange, PitchBendTable, PitchDeviation, RawBendValue};
pub use error::{BendError, Result};
