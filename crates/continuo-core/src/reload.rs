use crate::catalog::PatchCatalog;
use continuo_ports::engine::SynthEngine;
use continuo_ports::host::{WorkRequest, WorkResponse};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Reload request lifecycle.
///
/// Owned by the audio thread; the host delivers worker completions
/// synchronized with that thread, so plain state suffices.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReloadState {
    Idle,
    Queued(PathBuf),
    InFlight,
}

#[derive(Debug)]
pub struct ReloadCoordinator {
    state: ReloadState,
}

impl Default for ReloadCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl ReloadCoordinator {
    pub fn new() -> Self {
        Self {
            state: ReloadState::Idle,
        }
    }

    /// Queue a (re)load. A request arriving while one is in flight is
    /// coalesced away: only one background slot exists and only the most
    /// recent path matters. A queued-but-undispatched path is superseded.
    pub fn request(&mut self, path: PathBuf) {
        if matches!(self.state, ReloadState::InFlight) {
            return;
        }
        self.state = ReloadState::Queued(path);
    }

    /// Called at the top of an audio callback: hands over the queued
    /// request for dispatch and opens the in-flight window.
    pub fn take_dispatch(&mut self) -> Option<WorkRequest> {
        match std::mem::replace(&mut self.state, ReloadState::InFlight) {
            ReloadState::Queued(path) => Some(WorkRequest::ReloadBank { path }),
            other => {
                self.state = other;
                None
            }
        }
    }

    /// Completion signal: back to idle regardless of load outcome.
    pub fn complete(&mut self) {
        self.state = ReloadState::Idle;
    }

    pub fn in_flight(&self) -> bool {
        matches!(self.state, ReloadState::InFlight)
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, ReloadState::Idle)
    }
}

/// Worker-context view of the plugin: everything the blocking load needs,
/// detached from the audio-side instance so the host can drive it from
/// its worker thread.
#[derive(Clone)]
pub struct WorkerHandle {
    engine: Arc<dyn SynthEngine>,
    catalog: Arc<Mutex<PatchCatalog>>,
}

impl WorkerHandle {
    pub fn new(engine: Arc<dyn SynthEngine>, catalog: Arc<Mutex<PatchCatalog>>) -> Self {
        Self { engine, catalog }
    }

    /// Execute one background request and produce exactly one response,
    /// success or not.
    pub fn execute(&self, request: WorkRequest) -> WorkResponse {
        match request {
            WorkRequest::ReloadBank { path } => self.reload(&path),
        }
    }

    /// Blocking I/O happens before the catalog lock is taken; the rebuilt
    /// catalog is swapped in whole, so readers never observe a
    /// half-populated sequence.
    fn reload(&self, path: &Path) -> WorkResponse {
        let presets = match self.engine.load(path) {
            Ok(presets) => presets,
            Err(e) => {
                log::error!("continuo: soundfont load failed: {e}");
                *self.catalog.lock() = PatchCatalog::default();
                return WorkResponse::Failed {
                    reason: e.to_string(),
                };
            }
        };

        *self.catalog.lock() = PatchCatalog::from_presets(&presets);

        self.engine.reset();

        // Warm-up render so the first audible block is not spent on
        // engine bootstrap.
        let mut warm_l = [0.0f32; 1024];
        let mut warm_r = [0.0f32; 1024];
        self.engine.render(&mut warm_l, &mut warm_r);

        WorkResponse::Loaded { presets }
    }
}
