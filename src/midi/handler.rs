use anyhow::{Result, anyhow};
use crossbeam_channel::Sender;
use log::{info, warn};
use midir::{MidiInput, MidiInputConnection};

use super::message::MidiMessage;
use super::rpn::RpnTracker;
use crate::types::events::BendEvent;

/// MIDI input handler
/// Manages MIDI device connection and sends bend events to the monitor loop
pub struct MidiHandler {
    port_name: String,
    _connection: MidiInputConnection<()>,
}

impl MidiHandler {
    /// Connect to the MIDI input device at `device_index`
    /// Sends parsed events through the provided channel
    pub fn new_with_device(
        event_tx: Sender<BendEvent>,
        device_index: usize,
        channel_filter: Option<u8>,
    ) -> Result<Self> {
        let midi_in = MidiInput::new("pitch-bend-tables-input")?;

        let ports = midi_in.ports();
        let selected_port = ports.get(device_index).ok_or_else(|| {
            anyhow!("MIDI device index {} not available ({} devices)", device_index, ports.len())
        })?;

        let port_name = midi_in
            .port_name(selected_port)
            .unwrap_or_else(|_| "Unknown".to_string());

        info!("Connecting to MIDI input: {}", port_name);

        let mut rpn = RpnTracker::new();
        let connection = midi_in
            .connect(
                selected_port,
                "pitch-bend-tables-input",
                move |_timestamp, bytes, _| {
                    let message = MidiMessage::parse(bytes);

                    if let Some(event) = message.to_bend_event(channel_filter, &mut rpn) {
                        // Use try_send to avoid blocking MIDI thread
                        if event_tx.try_send(event).is_err() {
                            warn!("Dropped {:?}: monitor is not receiving", event);
                        }
                    }
                },
                (),
            )
            .map_err(|e| anyhow!("Failed to connect to MIDI port: {}", e))?;

        Ok(Self {
            port_name,
            _connection: connection,
        })
    }

    pub fn port_name(&self) -> &str {
        &self.port_name
    }

    /// List all available MIDI input devices
    pub fn list_devices() -> Result<Vec<String>> {
        let midi_in = MidiInput::new("pitch-bend-tables-list")?;
        let ports = midi_in.ports();

        let mut devices = Vec::new();
        for port in ports.iter() {
            if let Ok(name) = midi_in.port_name(port) {
                devices.push(name);
            }
        }

        Ok(devices)
    }

    /// Find MIDI device index by name or index string
    pub fn find_device(devices: &[String], search: &str) -> Result<usize> {
        if devices.is_empty() {
            return Err(anyhow!("No MIDI input devices found"));
        }

        // Try to parse as index first
        if let Ok(index) = search.parse::<usize>() {
            if index < devices.len() {
                return Ok(index);
            } else {
                return Err(anyhow!(
                    "MIDI device index {} out of range (0-{})",
                    index,
                    devices.len() - 1
                ));
            }
        }

        // Search by name (case-insensitive substring match)
        let search_lower = search.to_lowercase();
        devices
            .iter()
            .position(|device| device.to_lowercase().contains(&search_lower))
            .ok_or_else(|| anyhow!("MIDI device '{}' not found", search))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn devices() -> Vec<String> {
        vec!["IAC Driver Bus 1".to_string(), "Arturia KeyStep 37".to_string()]
    }

    #[test]
    fn test_find_device_by_index() {
        assert_eq!(MidiHandler::find_device(&devices(), "1").unwrap(), 1);
        assert!(MidiHandler::find_device(&devices(), "2").is_err());
    }

    #[test]
    fn test_find_device_by_name() {
        assert_eq!(MidiHandler::find_device(&devices(), "keystep").unwrap(), 1);
        assert_eq!(MidiHandler::find_device(&devices(), "IAC").unwrap(), 0);
        assert!(MidiHandler::find_device(&devices(), "launchpad").is_err());
    }

    #[test]
    fn test_find_device_none_available() {
        assert!(MidiHandler::find_device(&[], "0").is_err());
    }
}
