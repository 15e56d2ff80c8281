use crate::catalog::PatchCatalog;
use crate::channel_state::{ChannelMap, CHANNELS};
use crate::demux::{process_block, NotifySinks};
use crate::midnam::NamingQuery;
use crate::reload::{ReloadCoordinator, WorkerHandle};
use continuo_ports::engine::{EngineError, EngineEvent, PresetInfo, SynthEngine};
use continuo_ports::host::{
    BankPatchNotifier, HostFeatures, NamesChangedNotifier, WorkResponse, WorkScheduler,
};
use continuo_ports::midi::{RawMidiEvent, CC_BANK_LSB, CC_BANK_MSB};
use continuo_ports::settings::{PluginSettings, SettingsSource, StorageError};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Preset name the original General MIDI banks use for the standard drum
/// kit; selecting it claims channel 10.
const GM_DRUM_KIT_NAME: &str = "Standard 1";
const GM_DRUM_CHANNEL: u8 = 9;

static INSTANCE_IDS: AtomicU64 = AtomicU64::new(1);

#[derive(thiserror::Error, Debug)]
pub enum PluginError {
    #[error("host is missing required capability: {0}")]
    MissingCapability(&'static str),
    #[error("cannot find soundfont: {0}")]
    SoundFontMissing(String),
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// One plugin instance.
///
/// `run`, `deactivate`, and `on_work_complete` belong to the audio
/// context (the host serializes them); `worker_handle` and
/// `naming_handle` hand out views for the other two contexts.
pub struct PluginInstance {
    engine: Arc<dyn SynthEngine>,
    scheduler: Arc<dyn WorkScheduler>,
    bank_patch: Option<Arc<dyn BankPatchNotifier>>,
    names: Option<Arc<dyn NamesChangedNotifier>>,
    channels: Arc<ChannelMap>,
    catalog: Arc<Mutex<PatchCatalog>>,
    coordinator: ReloadCoordinator,
    bank_path: PathBuf,
    panic: bool,
    send_bank_program: bool,
    instance_id: u64,
}

impl PluginInstance {
    /// Instantiate against the host's feature set. Fatal: a missing
    /// background-work scheduler, or a missing default bank file. The
    /// blocking load itself is deferred to the worker; audio stays
    /// silent until it completes.
    pub fn create(
        sample_rate_hz: u32,
        bundle_path: &Path,
        features: HostFeatures,
        settings_source: Option<&dyn SettingsSource>,
        engine: Arc<dyn SynthEngine>,
    ) -> Result<Self, PluginError> {
        let Some(scheduler) = features.scheduler else {
            log::error!("continuo: host does not provide a background work scheduler");
            return Err(PluginError::MissingCapability("background work scheduler"));
        };

        let settings = match settings_source {
            Some(source) => source.load_settings().unwrap_or_else(|e| {
                log::warn!("continuo: settings unreadable, using defaults: {e}");
                PluginSettings::default()
            }),
            None => PluginSettings::default(),
        };

        let bank_path = bundle_path.join(&settings.soundfont_file);
        if !bank_path.is_file() {
            log::error!("continuo: cannot find soundfont '{}'", bank_path.display());
            return Err(PluginError::SoundFontMissing(
                bank_path.display().to_string(),
            ));
        }

        engine.set_sample_rate(sample_rate_hz);
        engine.set_polyphony(settings.polyphony);
        engine.set_master_gain(settings.master_gain);

        let mut coordinator = ReloadCoordinator::new();
        coordinator.request(bank_path.clone());

        Ok(Self {
            engine,
            scheduler,
            bank_patch: features.bank_patch,
            names: features.names,
            channels: Arc::new(ChannelMap::new(settings.drum_banks)),
            catalog: Arc::new(Mutex::new(PatchCatalog::default())),
            coordinator,
            bank_path,
            panic: false,
            send_bank_program: true,
            instance_id: INSTANCE_IDS.fetch_add(1, Ordering::Relaxed),
        })
    }

    /// Process one block. `events` must be time-ordered by frame offset;
    /// both output buffers are written for their full length on every
    /// call, zero-filled while no bank is usable.
    pub fn run(&mut self, events: &[RawMidiEvent], out_l: &mut [f32], out_r: &mut [f32]) {
        if self.panic {
            self.engine.reset();
            self.panic = false;
        }

        if let Some(request) = self.coordinator.take_dispatch() {
            if let Err(e) = self.scheduler.schedule(request) {
                log::error!("continuo: reload dispatch failed: {e}");
                self.coordinator.complete();
            }
        }

        // Mid-swap the engine's preset bindings belong to the worker;
        // an unloaded engine has nothing to say either way.
        if self.coordinator.in_flight() || !self.engine.is_ready() {
            out_l.fill(0.0);
            out_r.fill(0.0);
            return;
        }

        process_block(
            self.engine.as_ref(),
            &self.channels,
            NotifySinks {
                bank_patch: self.bank_patch.as_deref(),
                names: self.names.as_deref(),
            },
            events,
            out_l,
            out_r,
        );

        if self.send_bank_program {
            self.send_bank_program = false;
            if let Some(bank_patch) = self.bank_patch.as_deref() {
                for channel in 0..CHANNELS as u8 {
                    let record = self.channels.record(channel);
                    bank_patch.notify_program_change(channel, record.bank(), record.program);
                }
            }
        }
    }

    /// Host deactivation: flush everything at the top of the next run.
    pub fn deactivate(&mut self) {
        self.panic = true;
    }

    /// Explicit reconfiguration to a different bank file. Coalesced while
    /// a reload is already in flight.
    pub fn request_reload(&mut self, path: PathBuf) {
        self.coordinator.request(path);
    }

    /// Worker completion, delivered synchronized with the audio context
    /// (never concurrently with `run`). The worker replaced the catalog
    /// on both outcomes (a failed load empties it), so cached naming
    /// documents are stale either way.
    pub fn on_work_complete(&mut self, response: WorkResponse) {
        match response {
            WorkResponse::Loaded { presets } => {
                log::info!(
                    "continuo: loaded '{}' ({} presets)",
                    self.bank_path.display(),
                    presets.len()
                );
                self.apply_default_programs(&presets);
            }
            WorkResponse::Failed { reason } => {
                log::warn!("continuo: staying muted after failed load: {reason}");
            }
        }
        self.send_bank_program = true;
        if let Some(names) = self.names.as_deref() {
            names.notify_names_changed();
        }
        self.coordinator.complete();
    }

    /// Default selection after a load: preset i goes to channel i for the
    /// first sixteen presets, and the GM drum kit claims channel 10.
    fn apply_default_programs(&self, presets: &[PresetInfo]) {
        for (index, preset) in presets.iter().enumerate() {
            if index < CHANNELS {
                self.select_preset(index as u8, preset, false);
            }
            if preset.name == GM_DRUM_KIT_NAME {
                self.select_preset(GM_DRUM_CHANNEL, preset, true);
            }
        }
    }

    fn select_preset(&self, channel: u8, preset: &PresetInfo, is_drum: bool) {
        self.engine.handle_event(EngineEvent::ControlChange {
            channel,
            control: CC_BANK_MSB,
            value: (preset.bank >> 7) as u8,
        });
        self.engine.handle_event(EngineEvent::ControlChange {
            channel,
            control: CC_BANK_LSB,
            value: (preset.bank & 0x7F) as u8,
        });
        self.engine.handle_event(EngineEvent::ProgramChange {
            channel,
            program: preset.program,
        });
        self.channels.select(channel, preset.bank, preset.program, is_drum);
    }

    /// Worker-context view for the host's background thread.
    pub fn worker_handle(&self) -> WorkerHandle {
        WorkerHandle::new(self.engine.clone(), self.catalog.clone())
    }

    /// Query-boundary view for naming-document requests.
    pub fn naming_handle(&self) -> NamingQuery {
        NamingQuery::new(self.channels.clone(), self.catalog.clone(), self.model())
    }

    /// Human-readable model identifier, unique per instance.
    pub fn model(&self) -> String {
        format!("Continuo GM Synth:{:08x}", self.instance_id)
    }
}
