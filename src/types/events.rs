use crate::bend::RawBendValue;

/// Internal events sent from MIDI thread to the monitor loop
/// Must be simple and fast to construct/parse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BendEvent {
    /// Pitch bend received on a channel (0-15)
    PitchBend { channel: u8, value: RawBendValue },
    /// Pitch-bend sensitivity (RPN 0) changed on a channel, in cents
    RangeChanged { channel: u8, cents: u32 },
}

impl BendEvent {
    /// Create a pitch bend event
    pub fn pitch_bend(channel: u8, value: RawBendValue) -> Self {
        BendEvent::PitchBend { channel, value }
    }

    /// Create a sensitivity change event
    pub fn range_changed(channel: u8, cents: u32) -> Self {
        BendEvent::RangeChanged { channel, cents }
    }
}
