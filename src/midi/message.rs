use super::rpn::RpnTracker;
use crate::bend::RawBendValue;
use crate::types::events::BendEvent;

/// MIDI message types we care about
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MidiMessage {
    PitchBend { channel: u8, value: RawBendValue },
    ControlChange { channel: u8, controller: u8, value: u8 },
    Unknown,
}

impl MidiMessage {
    /// Parse raw MIDI bytes into a message
    /// Handles standard MIDI protocol: [status, data1, data2]
    pub fn parse(bytes: &[u8]) -> Self {
        if bytes.len() < 3 {
            return MidiMessage::Unknown;
        }

        let status = bytes[0];
        let message_type = status & 0xF0;
        let channel = status & 0x0F;

        match message_type {
            0xE0 => {
                // Pitch Bend: LSB first, then MSB
                MidiMessage::PitchBend {
                    channel,
                    value: RawBendValue::from_data_bytes(bytes[1], bytes[2]),
                }
            }
            0xB0 => {
                // Control Change
                MidiMessage::ControlChange {
                    channel,
                    controller: bytes[1],
                    value: bytes[2],
                }
            }
            _ => MidiMessage::Unknown,
        }
    }

    /// Convert MIDI message to a bend event
    /// Filters by MIDI channel: None = omni (all channels), Some(0-15) = specific channel
    pub fn to_bend_event(&self, channel_filter: Option<u8>, rpn: &mut RpnTracker) -> Option<BendEvent> {
        match self {
            MidiMessage::PitchBend { channel, value } => {
                if channel_filter.is_some_and(|ch| ch != *channel) {
                    return None;
                }
                Some(BendEvent::pitch_bend(*channel, *value))
            }
            MidiMessage::ControlChange { channel, controller, value } => {
                // Track RPN state on every channel so later filter changes stay consistent
                let cents = rpn.control_change(*channel, *controller, *value)?;
                if channel_filter.is_some_and(|ch| ch != *channel) {
                    return None;
                }
                Some(BendEvent::range_changed(*channel, cents))
            }
            MidiMessage::Unknown => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::midi::rpn::{CC_DATA_ENTRY_MSB, CC_RPN_LSB, CC_RPN_MSB};

    #[test]
    fn test_parse_pitch_bend() {
        let bytes = [0xE2, 0x00, 0x40]; // Pitch Bend, channel 2, centered
        let msg = MidiMessage::parse(&bytes);
        assert_eq!(
            msg,
            MidiMessage::PitchBend {
                channel: 2,
                value: RawBendValue::CENTER
            }
        );
    }

    #[test]
    fn test_parse_pitch_bend_extremes() {
        let msg = MidiMessage::parse(&[0xE0, 0x7F, 0x7F]);
        assert!(matches!(msg, MidiMessage::PitchBend { value, .. } if value == RawBendValue::MAX));

        let msg = MidiMessage::parse(&[0xE0, 0x00, 0x00]);
        assert!(matches!(msg, MidiMessage::PitchBend { value, .. } if value == RawBendValue::MIN));
    }

    #[test]
    fn test_parse_control_change() {
        let msg = MidiMessage::parse(&[0xB1, 101, 0]);
        assert_eq!(
            msg,
            MidiMessage::ControlChange {
                channel: 1,
                controller: 101,
                value: 0
            }
        );
    }

    #[test]
    fn test_parse_ignores_other_messages() {
        assert_eq!(MidiMessage::parse(&[0x90, 60, 100]), MidiMessage::Unknown);
        assert_eq!(MidiMessage::parse(&[0xE0, 0x00]), MidiMessage::Unknown);
        assert_eq!(MidiMessage::parse(&[]), MidiMessage::Unknown);
    }

    #[test]
    fn test_channel_filter() {
        let mut rpn = RpnTracker::new();
        let msg = MidiMessage::parse(&[0xE3, 0x00, 0x50]);

        assert!(msg.to_bend_event(None, &mut rpn).is_some());
        assert!(msg.to_bend_event(Some(3), &mut rpn).is_some());
        assert!(msg.to_bend_event(Some(0), &mut rpn).is_none());
    }

    #[test]
    fn test_rpn_sequence_emits_range() {
        let mut rpn = RpnTracker::new();
        let messages = [
            [0xB0, CC_RPN_MSB, 0],
            [0xB0, CC_RPN_LSB, 0],
            [0xB0, CC_DATA_ENTRY_MSB, 12],
        ];

        let events: Vec<BendEvent> = messages
            .iter()
            .filter_map(|bytes| MidiMessage::parse(bytes).to_bend_event(None, &mut rpn))
            .collect();

        assert_eq!(events, vec![BendEvent::range_changed(0, 1200)]);
    }
}
