use std::fmt;
use std::io::Write;
use std::sync::Arc;

use anyhow::Result;
use crossbeam_channel::Receiver;
use log::info;

use crate::bend::{BendRange, PitchBendTable, PitchDeviation, RawBendValue};
use crate::types::events::BendEvent;

/// A received pitch bend resolved against its channel's table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BendReading {
    pub channel: u8,
    pub value: RawBendValue,
    pub range: BendRange,
    pub deviation: PitchDeviation,
}

impl fmt::Display for BendReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ch {:>2}  raw {:>5}  {:+9.4} st  {:+9.2} ct  (range {})",
            self.channel + 1,
            self.value,
            self.deviation.semitones(),
            self.deviation.cents(),
            self.range
        )
    }
}

/// Per-channel table state for the live monitor
pub struct BendMonitor {
    tables: [Arc<PitchBendTable>; 16],
}

impl BendMonitor {
    /// Start with every channel at `range`
    pub fn new(range: BendRange) -> Self {
        let table = Arc::new(PitchBendTable::from_range(range));
        Self {
            tables: std::array::from_fn(|_| Arc::clone(&table)),
        }
    }

    pub fn table(&self, channel: u8) -> &PitchBendTable {
        &self.tables[channel as usize & 0x0F]
    }

    /// Apply one event; pitch bends produce a reading
    pub fn handle(&mut self, event: BendEvent) -> Option<BendReading> {
        match event {
            BendEvent::PitchBend { channel, value } => {
                let table = self.table(channel);
                Some(BendReading {
                    channel,
                    value,
                    range: table.range(),
                    deviation: table.get(value),
                })
            }
            BendEvent::RangeChanged { channel, cents } => {
                // u32 cents is always finite and non-negative
                if let Ok(range) = BendRange::from_cents(cents as f64) {
                    info!("Channel {} pitch bend range set to {}", channel + 1, range);
                    self.tables[channel as usize & 0x0F] = Arc::new(PitchBendTable::from_range(range));
                }
                None
            }
        }
    }

    /// Print readings until every sender is gone
    pub fn run<W: Write>(&mut self, events: Receiver<BendEvent>, out: &mut W) -> Result<()> {
        for event in events.iter() {
            if let Some(reading) = self.handle(event) {
                writeln!(out, "{}", reading)?;
                out.flush()?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;

    #[test]
    fn test_reading_uses_channel_range() {
        let mut monitor = BendMonitor::new(BendRange::default());

        let reading = monitor
            .handle(BendEvent::pitch_bend(0, RawBendValue::new(12288).unwrap()))
            .unwrap();
        assert_eq!(reading.deviation.semitones(), 1.0);

        assert!(monitor.handle(BendEvent::range_changed(0, 1200)).is_none());
        let reading = monitor
            .handle(BendEvent::pitch_bend(0, RawBendValue::new(12288).unwrap()))
            .unwrap();
        assert_eq!(reading.deviation.semitones(), 6.0);

        // Other channels keep the default range
        let reading = monitor
            .handle(BendEvent::pitch_bend(1, RawBendValue::new(12288).unwrap()))
            .unwrap();
        assert_eq!(reading.deviation.semitones(), 1.0);
    }

    #[test]
    fn test_run_until_disconnected() {
        let (tx, rx) = unbounded();
        tx.send(BendEvent::pitch_bend(0, RawBendValue::CENTER)).unwrap();
        tx.send(BendEvent::range_changed(0, 4800)).unwrap();
        tx.send(BendEvent::pitch_bend(0, RawBendValue::MIN)).unwrap();
        drop(tx);

        let mut monitor = BendMonitor::new(BendRange::default());
        let mut out = Vec::new();
        monitor.run(rx, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("raw  8192"));
        assert!(lines[0].contains("+0.0000 st"));
        assert!(lines[1].contains("-48.0000 st"));
        assert!(lines[1].contains("-4800.00 ct"));
    }
}
