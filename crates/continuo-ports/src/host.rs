use crate::engine::PresetInfo;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(thiserror::Error, Debug)]
pub enum HostError {
    #[error("work queue rejected the request")]
    ScheduleFailed,
    #[error("unknown work payload")]
    UnknownWork,
    #[error("backend error: {0}")]
    Backend(String),
}

/// Background-work request. Handed to the host scheduler from the audio
/// thread; executed later on the worker thread.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WorkRequest {
    ReloadBank { path: PathBuf },
}

/// Worker result, delivered back to the plugin synchronized with the
/// audio thread. Exactly one response per executed request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WorkResponse {
    Loaded { presets: Vec<PresetInfo> },
    Failed { reason: String },
}

/// Realtime-safe hand-off to the host's background worker slot.
pub trait WorkScheduler: Send + Sync {
    fn schedule(&self, request: WorkRequest) -> Result<(), HostError>;
}

/// Bank/program change notification (optional host capability).
pub trait BankPatchNotifier: Send + Sync {
    fn notify_program_change(&self, channel: u8, bank: u16, program: u8);
}

/// Device-name invalidation notification (optional host capability).
pub trait NamesChangedNotifier: Send + Sync {
    fn notify_names_changed(&self);
}

/// Capabilities discovered from the host's feature list at instantiation.
/// The scheduler is required; the notifiers are tolerated absent.
#[derive(Clone, Default)]
pub struct HostFeatures {
    pub scheduler: Option<Arc<dyn WorkScheduler>>,
    pub bank_patch: Option<Arc<dyn BankPatchNotifier>>,
    pub names: Option<Arc<dyn NamesChangedNotifier>>,
}
