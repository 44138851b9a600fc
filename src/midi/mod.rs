pub mod handler;
pub mod message;
pub mod monitor;
pub mod rpn;

pub use handler::MidiHandler;
pub use message::MidiMessage;
pub use monitor::{BendMonitor, BendReading};
