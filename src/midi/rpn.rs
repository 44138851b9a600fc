/// Registered parameter number selection and data entry controllers
pub const CC_DATA_ENTRY_MSB: u8 = 6;
pub const CC_DATA_ENTRY_LSB: u8 = 38;
pub const CC_NRPN_LSB: u8 = 98;
pub const CC_NRPN_MSB: u8 = 99;
pub const CC_RPN_LSB: u8 = 100;
pub const CC_RPN_MSB: u8 = 101;

/// RPN 0,0 is pitch-bend sensitivity
const PITCH_BEND_SENSITIVITY: (u8, u8) = (0, 0);

#[derive(Debug, Clone, Copy, Default)]
struct ChannelState {
    rpn_msb: Option<u8>,
    rpn_lsb: Option<u8>,
    semitones: u8,
    cents: u8,
}

impl ChannelState {
    fn sensitivity_selected(&self) -> bool {
        matches!((self.rpn_msb, self.rpn_lsb), (Some(msb), Some(lsb)) if (msb, lsb) == PITCH_BEND_SENSITIVITY)
    }

    fn total_cents(&self) -> u32 {
        self.semitones as u32 * 100 + self.cents as u32
    }
}

/// Follows RPN 0 (pitch-bend sensitivity) on all 16 channels
///
/// Data entry MSB sets whole semitones and clears the cents; data entry LSB
/// sets the cents. Selecting an NRPN, or any other RPN including the null
/// RPN (127, 127), stops data entry from touching the sensitivity.
#[derive(Debug, Clone, Default)]
pub struct RpnTracker {
    channels: [ChannelState; 16],
}

impl RpnTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a control change; returns the new sensitivity in cents when it changes
    pub fn control_change(&mut self, channel: u8, controller: u8, value: u8) -> Option<u32> {
        let state = self.channels.get_mut(channel as usize & 0x0F)?;

        match controller {
            CC_RPN_MSB => state.rpn_msb = Some(value),
            CC_RPN_LSB => state.rpn_lsb = Some(value),
            CC_NRPN_MSB | CC_NRPN_LSB => {
                state.rpn_msb = None;
                state.rpn_lsb = None;
            }
            CC_DATA_ENTRY_MSB if state.sensitivity_selected() => {
                state.semitones = value;
                state.cents = 0;
                return Some(state.total_cents());
            }
            CC_DATA_ENTRY_LSB if state.sensitivity_selected() => {
                state.cents = value;
                return Some(state.total_cents());
            }
            _ => {}
        }

        None
    }
}
