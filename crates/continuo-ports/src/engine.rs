use std::path::Path;

#[derive(thiserror::Error, Debug)]
pub enum EngineError {
    #[error("soundfont load failed: {0}")]
    SoundFontLoad(String),
    #[error("soundfont contains no usable presets")]
    EmptySoundFont,
    #[error("backend error: {0}")]
    Backend(String),
}

/// One preset reported by the engine after a load, in bank-file scan order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PresetInfo {
    pub bank: u16,
    pub program: u8,
    pub name: String,
}

/// Channel-voice message in the form the engine consumes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineEvent {
    NoteOff { channel: u8, key: u8, velocity: u8 },
    NoteOn { channel: u8, key: u8, velocity: u8 },
    PolyPressure { channel: u8, key: u8, pressure: u8 },
    ControlChange { channel: u8, control: u8, value: u8 },
    ProgramChange { channel: u8, program: u8 },
    ChannelPressure { channel: u8, pressure: u8 },
    /// 14-bit bend value, 0x2000 = center.
    PitchBend { channel: u8, value: u16 },
}

impl EngineEvent {
    pub fn channel(&self) -> u8 {
        match *self {
            EngineEvent::NoteOff { channel, .. }
            | EngineEvent::NoteOn { channel, .. }
            | EngineEvent::PolyPressure { channel, .. }
            | EngineEvent::ControlChange { channel, .. }
            | EngineEvent::ProgramChange { channel, .. }
            | EngineEvent::ChannelPressure { channel, .. }
            | EngineEvent::PitchBend { channel, .. } => channel,
        }
    }
}

/// Thread model:
/// - load/set_sample_rate/set_polyphony/set_master_gain are called from the
///   worker or core thread (can block and lock internally)
/// - handle_event/render/reset are called from the audio thread (must be
///   realtime-safe; rendering silence is the correct fallback while a load
///   holds the engine interior)
pub trait SynthEngine: Send + Sync {
    /// Blocking load of an instrument bank file. Worker context only.
    fn load(&self, path: &Path) -> Result<Vec<PresetInfo>, EngineError>;

    fn set_sample_rate(&self, sample_rate_hz: u32);
    fn set_polyphony(&self, voices: u16);
    fn set_master_gain(&self, gain: f32);

    /// Called by the audio thread: inject one event into the engine.
    fn handle_event(&self, event: EngineEvent);

    /// Called by the audio thread: render exactly `out_l.len().min(out_r.len())`
    /// frames. Silent while no bank is loaded.
    fn render(&self, out_l: &mut [f32], out_r: &mut [f32]);

    /// Flush all active notes and sounds.
    fn reset(&self);

    /// True once a bank has loaded successfully.
    fn is_ready(&self) -> bool;
}
