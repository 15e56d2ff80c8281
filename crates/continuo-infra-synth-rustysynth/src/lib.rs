use continuo_ports::engine::{EngineError, EngineEvent, PresetInfo, SynthEngine};
use parking_lot::Mutex;
use rustysynth::{SoundFont, Synthesizer, SynthesizerSettings};
use std::fs::File;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicU16, AtomicU32, Ordering};
use std::sync::Arc;

/// rustysynth-backed synthesis engine.
///
/// Audio-thread calls go through `try_lock`: while the worker holds the
/// interior during a load, the engine renders silence instead of blocking
/// the callback.
pub struct RustySynthEngine {
    sample_rate_hz: AtomicU32,
    polyphony: AtomicU16,
    master_gain: AtomicU32,
    enabled: AtomicBool,
    sound_font: Mutex<Option<Arc<SoundFont>>>,
    synth: Mutex<Option<Synthesizer>>,
}

impl Default for RustySynthEngine {
    fn default() -> Self {
        Self::new(48_000)
    }
}

impl RustySynthEngine {
    pub fn new(sample_rate_hz: u32) -> Self {
        Self {
            sample_rate_hz: AtomicU32::new(sample_rate_hz),
            polyphony: AtomicU16::new(256),
            master_gain: AtomicU32::new(1.0_f32.to_bits()),
            enabled: AtomicBool::new(false),
            sound_font: Mutex::new(None),
            synth: Mutex::new(None),
        }
    }

    fn with_active_synth<T>(&self, f: impl FnOnce(&mut Synthesizer) -> T) -> Option<T> {
        let mut guard = self.synth.try_lock()?;
        let synth = guard.as_mut()?;
        Some(f(synth))
    }

    fn build_synthesizer(&self, sound_font: &Arc<SoundFont>) -> Result<Synthesizer, EngineError> {
        let mut settings =
            SynthesizerSettings::new(self.sample_rate_hz.load(Ordering::Relaxed) as i32);
        settings.maximum_polyphony = self.polyphony.load(Ordering::Relaxed) as usize;
        settings.enable_reverb_and_chorus = true;

        let mut synth =
            Synthesizer::new(sound_font, &settings).map_err(|e| EngineError::Backend(e.to_string()))?;
        synth.set_master_volume(f32::from_bits(self.master_gain.load(Ordering::Relaxed)));
        Ok(synth)
    }
}

impl SynthEngine for RustySynthEngine {
    fn load(&self, path: &Path) -> Result<Vec<PresetInfo>, EngineError> {
        let mut file =
            File::open(path).map_err(|e| EngineError::SoundFontLoad(e.to_string()))?;
        let sound_font = Arc::new(
            SoundFont::new(&mut file).map_err(|e| EngineError::SoundFontLoad(e.to_string()))?,
        );

        let presets: Vec<PresetInfo> = sound_font
            .get_presets()
            .iter()
            .map(|preset| PresetInfo {
                bank: preset.get_bank_number() as u16,
                program: preset.get_patch_number() as u8,
                name: preset.get_name().to_string(),
            })
            .collect();

        if presets.is_empty() {
            self.enabled.store(false, Ordering::Relaxed);
            *self.synth.lock() = None;
            *self.sound_font.lock() = None;
            return Err(EngineError::EmptySoundFont);
        }

        let synth = self.build_synthesizer(&sound_font)?;
        *self.sound_font.lock() = Some(sound_font);
        *self.synth.lock() = Some(synth);
        self.enabled.store(true, Ordering::Relaxed);

        log::info!(
            "rustysynth: loaded '{}' with {} presets",
            path.display(),
            presets.len()
        );
        Ok(presets)
    }

    fn set_sample_rate(&self, sample_rate_hz: u32) {
        self.sample_rate_hz.store(sample_rate_hz, Ordering::Relaxed);

        let sound_font = self.sound_font.lock().clone();
        if let Some(sound_font) = sound_font {
            match self.build_synthesizer(&sound_font) {
                Ok(synth) => *self.synth.lock() = Some(synth),
                Err(e) => log::warn!("rustysynth: rebuild after rate change failed: {e}"),
            }
        }
    }

    fn set_polyphony(&self, voices: u16) {
        // Applied on the next synthesizer rebuild.
        self.polyphony.store(voices, Ordering::Relaxed);
    }

    fn set_master_gain(&self, gain: f32) {
        self.master_gain.store(gain.to_bits(), Ordering::Relaxed);
        self.with_active_synth(|synth| synth.set_master_volume(gain));
    }

    fn handle_event(&self, event: EngineEvent) {
        self.with_active_synth(|synth| match event {
            EngineEvent::NoteOff { channel, key, .. } => {
                synth.note_off(channel as i32, key as i32);
            }
            EngineEvent::NoteOn {
                channel,
                key,
                velocity,
            } => {
                if velocity > 0 {
                    synth.note_on(channel as i32, key as i32, velocity as i32);
                } else {
                    synth.note_off(channel as i32, key as i32);
                }
            }
            EngineEvent::PolyPressure {
                channel,
                key,
                pressure,
            } => {
                synth.process_midi_message(channel as i32, 0xA0, key as i32, pressure as i32);
            }
            EngineEvent::ControlChange {
                channel,
                control,
                value,
            } => {
                synth.process_midi_message(channel as i32, 0xB0, control as i32, value as i32);
            }
            EngineEvent::ProgramChange { channel, program } => {
                synth.process_midi_message(channel as i32, 0xC0, program as i32, 0);
            }
            EngineEvent::ChannelPressure { channel, pressure } => {
                synth.process_midi_message(channel as i32, 0xD0, pressure as i32, 0);
            }
            EngineEvent::PitchBend { channel, value } => {
                let lsb = (value & 0x7F) as i32;
                let msb = ((value >> 7) & 0x7F) as i32;
                synth.process_midi_message(channel as i32, 0xE0, lsb, msb);
            }
        });
    }

    fn render(&self, out_l: &mut [f32], out_r: &mut [f32]) {
        for value in out_l.iter_mut() {
            *value = 0.0;
        }
        for value in out_r.iter_mut() {
            *value = 0.0;
        }

        if !self.enabled.load(Ordering::Relaxed) {
            return;
        }

        self.with_active_synth(|synth| {
            let frames = out_l.len().min(out_r.len());
            synth.render(&mut out_l[..frames], &mut out_r[..frames]);
        });
    }

    fn reset(&self) {
        self.with_active_synth(|synth| {
            synth.note_off_all(true);
        });
    }

    fn is_ready(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }
}
