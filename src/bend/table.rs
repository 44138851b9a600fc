use log::debug;

use super::{BendRange, PitchDeviation, RawBendValue};
use crate::error::Result;

/// Precomputed deviation for every 14-bit pitch-bend value at a fixed range
///
/// Entry `i` holds `(i - 8192) / 8192 * range` semitones. The table is built
/// once and only read afterwards, so a single instance can be shared between
/// threads without locking.
#[derive(Debug, Clone, PartialEq)]
pub struct PitchBendTable {
    range: BendRange,
    entries: Box<[f64]>,
}

impl PitchBendTable {
    /// Build a table for a range given in semitones
    pub fn build(semitones: f64) -> Result<Self> {
        Ok(Self::from_range(BendRange::from_semitones(semitones)?))
    }

    /// Build a table for an already validated range
    pub fn from_range(range: BendRange) -> Self {
        let center = RawBendValue::CENTER.get() as f64;
        let entries: Box<[f64]> = (0..RawBendValue::COUNT)
            .map(|i| (i as f64 - center) / center * range.semitones() + 0.0)
            .collect();

        debug!("Built pitch bend table for {} ({} entries)", range, entries.len());

        Self { range, entries }
    }

    pub fn range(&self) -> BendRange {
        self.range
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Deviation between neighbouring raw values
    pub fn step(&self) -> PitchDeviation {
        PitchDeviation(self.range.semitones() / RawBendValue::CENTER.get() as f64)
    }

    /// Look up the deviation for an unchecked integer raw value
    pub fn lookup(&self, raw: i64) -> Result<PitchDeviation> {
        Ok(self.get(RawBendValue::new(raw)?))
    }

    /// Look up the deviation for a validated raw value
    pub fn get(&self, raw: RawBendValue) -> PitchDeviation {
        PitchDeviation(self.entries[raw.index()])
    }

    /// Find the raw value whose deviation is closest to `deviation`
    ///
    /// Exact ties, including runs of equal entries, go to the value nearest
    /// the center. Deviations beyond the table clamp to the outermost entries,
    /// and NaN maps to `CENTER`.
    pub fn inverse(&self, deviation: PitchDeviation) -> RawBendValue {
        let target = deviation.semitones();
        if target.is_nan() {
            return RawBendValue::CENTER;
        }

        let first = self.entries.partition_point(|&entry| entry < target);
        let end = self.entries.partition_point(|&entry| entry <= target);

        let (start, last) = if first < end {
            // Exact match, possibly repeated
            (first, end - 1)
        } else if first == 0 {
            self.run_of(self.entries[0])
        } else if first == self.entries.len() {
            self.run_of(self.entries[first - 1])
        } else {
            let lower = self.entries[first - 1];
            let upper = self.entries[first];
            let below = target - lower;
            let above = upper - target;

            if below < above {
                self.run_of(lower)
            } else if above < below {
                self.run_of(upper)
            } else {
                // Both neighbouring runs are equally close and adjacent
                (self.run_of(lower).0, self.run_of(upper).1)
            }
        };

        RawBendValue(RawBendValue::CENTER.index().clamp(start, last) as u16)
    }

    /// First and last index holding exactly `value`
    fn run_of(&self, value: f64) -> (usize, usize) {
        let start = self.entries.partition_point(|&entry| entry < value);
        let end = self.entries.partition_point(|&entry| entry <= value);
        (start, end - 1)
    }

    /// Iterate over all (raw value, deviation) pairs in ascending raw order
    pub fn iter(&self) -> impl Iterator<Item = (RawBendValue, PitchDeviation)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, &entry)| (RawBendValue(i as u16), PitchDeviation(entry)))
    }
}
