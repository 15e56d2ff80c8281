use crate::engine::EngineEvent;
use serde::{Deserialize, Serialize};

/// Bank Select MSB (Control Change 0).
pub const CC_BANK_MSB: u8 = 0x00;
/// Bank Select LSB (Control Change 32).
pub const CC_BANK_LSB: u8 = 0x20;

/// Raw timestamped MIDI event as the host delivers it: a frame offset
/// within the current processing block and up to three data bytes.
///
/// Events longer than three bytes keep their reported length so the
/// processing path can reject them, but only the first three bytes are
/// retained.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMidiEvent {
    pub frame: u32,
    pub len: u8,
    pub data: [u8; 3],
}

impl RawMidiEvent {
    pub fn new(frame: u32, bytes: &[u8]) -> Self {
        let mut data = [0u8; 3];
        let kept = bytes.len().min(3);
        data[..kept].copy_from_slice(&bytes[..kept]);
        Self {
            frame,
            len: bytes.len().min(u8::MAX as usize) as u8,
            data,
        }
    }

    /// Decode into a channel-voice event. System messages, truncated
    /// messages, and over-long events all decode to `None`; callers drop
    /// those silently.
    pub fn decode(&self) -> Option<EngineEvent> {
        if self.len == 0 || self.len > 3 {
            return None;
        }
        let status = self.data[0];
        if status < 0x80 || status >= 0xF0 {
            return None;
        }
        let channel = status & 0x0F;
        let d1 = self.data[1] & 0x7F;
        let d2 = self.data[2] & 0x7F;
        match (status & 0xF0, self.len) {
            (0x80, 3) => Some(EngineEvent::NoteOff {
                channel,
                key: d1,
                velocity: d2,
            }),
            (0x90, 3) => Some(EngineEvent::NoteOn {
                channel,
                key: d1,
                velocity: d2,
            }),
            (0xA0, 3) => Some(EngineEvent::PolyPressure {
                channel,
                key: d1,
                pressure: d2,
            }),
            (0xB0, 3) => Some(EngineEvent::ControlChange {
                channel,
                control: d1,
                value: d2,
            }),
            (0xC0, 2) => Some(EngineEvent::ProgramChange {
                channel,
                program: d1,
            }),
            (0xD0, 2) => Some(EngineEvent::ChannelPressure {
                channel,
                pressure: d1,
            }),
            // Two data bytes packed into one 14-bit bend value.
            (0xE0, 3) => Some(EngineEvent::PitchBend {
                channel,
                value: ((d2 as u16) << 7) | d1 as u16,
            }),
            _ => None,
        }
    }
}
