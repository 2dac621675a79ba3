//! Background model loading.
//!
//! A `MeshLoader` owns at most one worker thread at a time. The worker parses
//! into buffers it owns and reports through a crossbeam channel, so the render
//! thread only polls and never blocks. The previously loaded model stays
//! current until a later load succeeds.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender, TryRecvError, unbounded};
use parking_lot::RwLock;

use crate::constants::PROGRESS_DONE;
use crate::core::mesh::MeshData;
use crate::error::LoadError;
use crate::render::obj_parser::ObjParser;
use crate::render::texture::{TextureImage, load_texture};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Success,
    Failed,
    Cancelled,
}

/// Mesh plus optional companion texture, shared read-only after publication.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedModel {
    pub mesh: MeshData,
    pub texture: Option<TextureImage>,
}

/// Terminal outcome of one load attempt.
#[derive(Debug, Clone)]
pub struct LoadResult {
    pub status: LoadStatus,
    /// Warnings and the error (if any), one per line.
    pub message: String,
    pub warnings: Vec<String>,
    pub error_line: Option<usize>,
    pub model: Option<Arc<LoadedModel>>,
}

impl LoadResult {
    pub fn is_success(&self) -> bool {
        self.status == LoadStatus::Success
    }
}

#[derive(Debug, Clone)]
pub enum LoadEvent {
    Progress(u8),
    Finished(LoadResult),
}

/// Receiver side for callers that prefer callbacks over matching on events.
pub trait LoadObserver {
    fn on_progress(&mut self, _percent: u8) {}
    fn on_complete(&mut self, result: &LoadResult);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("a model is already loading")]
pub struct LoaderBusy;

pub struct LoadRequest {
    pub model_path: PathBuf,
    pub texture_path: Option<PathBuf>,
}

pub struct MeshLoader {
    event_tx: Sender<LoadEvent>,
    event_rx: Receiver<LoadEvent>,
    cancel: Arc<AtomicBool>,
    running: Arc<AtomicBool>,
    current: Arc<RwLock<Option<Arc<LoadedModel>>>>,
    worker: Option<JoinHandle<()>>,
    loads_started: u64,
}

impl Default for MeshLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl MeshLoader {
    pub fn new() -> Self {
        let (event_tx, event_rx) = unbounded::<LoadEvent>();
        Self {
            event_tx,
            event_rx,
            cancel: Arc::new(AtomicBool::new(false)),
            running: Arc::new(AtomicBool::new(false)),
            current: Arc::new(RwLock::new(None)),
            worker: None,
            loads_started: 0,
        }
    }

    /// Starts loading `model_path` on a worker thread.
    ///
    /// Rejected while a previous load is still running; call `stop_loading`
    /// and wait for its `Finished` event first.
    pub fn load<P, Q>(&mut self, model_path: P, texture_path: Option<Q>) -> Result<(), LoaderBusy>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        self.start(LoadRequest {
            model_path: model_path.as_ref().to_path_buf(),
            texture_path: texture_path.map(|p| p.as_ref().to_path_buf()),
        })
    }

    pub fn start(&mut self, request: LoadRequest) -> Result<(), LoaderBusy> {
        if self.is_loading() {
            return Err(LoaderBusy);
        }
        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }
        // The previous worker has exited; whatever it sent and nobody read is stale.
        let stale = self.event_rx.try_iter().count();
        if stale > 0 {
            tracing::debug!("Discarded {} unread events from the previous load", stale);
        }

        self.cancel.store(false, Ordering::SeqCst);
        self.running.store(true, Ordering::SeqCst);
        self.loads_started += 1;

        let tx = self.event_tx.clone();
        let cancel = Arc::clone(&self.cancel);
        let running = Arc::clone(&self.running);
        let current = Arc::clone(&self.current);

        tracing::info!("Loading model {}", request.model_path.display());
        let handle = thread::Builder::new()
            .name(format!("mesh-load-{}", self.loads_started))
            .spawn(move || {
                let result = run_load(&request, &cancel, &tx);
                if let Some(model) = &result.model {
                    *current.write() = Some(Arc::clone(model));
                }
                running.store(false, Ordering::SeqCst);
                // Receiver gone means the loader was dropped; nothing left to notify.
                let _ = tx.send(LoadEvent::Finished(result));
            })
            .expect("Failed to spawn mesh loading worker");

        self.worker = Some(handle);
        Ok(())
    }

    /// Requests cooperative cancellation; observed between records.
    pub fn stop_loading(&self) {
        self.cancel.store(true, Ordering::SeqCst);
    }

    /// True from `load` until the worker has published its terminal result.
    /// Starting another load discards any events of the previous one still unread.
    pub fn is_loading(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Last successfully loaded model.
    pub fn current_model(&self) -> Option<Arc<LoadedModel>> {
        self.current.read().clone()
    }

    /// Next pending event (non-blocking).
    pub fn poll_event(&self) -> Option<LoadEvent> {
        match self.event_rx.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    pub fn poll_events(&self) -> Vec<LoadEvent> {
        self.event_rx.try_iter().collect()
    }

    pub fn wait_event(&self, timeout: Duration) -> Option<LoadEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    /// Drains pending events into `observer`. Returns true if a load finished.
    pub fn dispatch<O: LoadObserver>(&self, observer: &mut O) -> bool {
        let mut finished = false;
        for event in self.event_rx.try_iter() {
            match event {
                LoadEvent::Progress(p) => observer.on_progress(p),
                LoadEvent::Finished(result) => {
                    observer.on_complete(&result);
                    finished = true;
                }
            }
        }
        finished
    }

    /// Blocks until the running load finishes and returns its result.
    pub fn wait_for_result(&self, timeout: Duration) -> Option<LoadResult> {
        loop {
            match self.event_rx.recv_timeout(timeout) {
                Ok(LoadEvent::Finished(result)) => return Some(result),
                Ok(LoadEvent::Progress(_)) => continue,
                Err(_) => return None,
            }
        }
    }
}

impl Drop for MeshLoader {
    fn drop(&mut self) {
        self.cancel.store(true, Ordering::SeqCst);
    }
}

fn run_load(request: &LoadRequest, cancel: &AtomicBool, tx: &Sender<LoadEvent>) -> LoadResult {
    let mut warnings = Vec::new();
    let outcome = parse_and_decode(request, cancel, tx, &mut warnings);

    let mut message = warnings.join("\n");
    match outcome {
        Ok(model) => {
            let _ = tx.send(LoadEvent::Progress(PROGRESS_DONE));
            tracing::info!(
                "Model {} loaded: {} triangles, {} warnings",
                request.model_path.display(),
                model.mesh.triangle_count(),
                warnings.len()
            );
            LoadResult {
                status: LoadStatus::Success,
                message,
                warnings,
                error_line: None,
                model: Some(Arc::new(model)),
            }
        }
        Err(LoadError::Cancelled) => {
            tracing::info!("Loading of {} cancelled", request.model_path.display());
            LoadResult {
                status: LoadStatus::Cancelled,
                message: String::new(),
                warnings: Vec::new(),
                error_line: None,
                model: None,
            }
        }
        Err(e) => {
            tracing::error!("Failed to load {}: {}", request.model_path.display(), e);
            if !message.is_empty() {
                message.push('\n');
            }
            message.push_str(&e.to_string());
            LoadResult {
                status: LoadStatus::Failed,
                message,
                warnings,
                error_line: e.line(),
                model: None,
            }
        }
    }
}

fn parse_and_decode(
    request: &LoadRequest,
    cancel: &AtomicBool,
    tx: &Sender<LoadEvent>,
    warnings: &mut Vec<String>,
) -> Result<LoadedModel, LoadError> {
    let open_err = |source| LoadError::Open {
        path: request.model_path.clone(),
        source,
    };
    let file = File::open(&request.model_path).map_err(open_err)?;
    let total_bytes = file.metadata().map_err(open_err)?.len();

    let _ = tx.send(LoadEvent::Progress(0));
    let mut parser = ObjParser::new(cancel, total_bytes);
    let outcome = parser.parse(BufReader::new(file), |p| {
        let _ = tx.send(LoadEvent::Progress(p));
    });
    warnings.extend_from_slice(parser.warnings());
    outcome?;
    let mesh = parser.into_parsed().mesh;

    if cancel.load(Ordering::Relaxed) {
        return Err(LoadError::Cancelled);
    }

    let texture = match &request.texture_path {
        Some(path) => Some(load_texture(path)?),
        None => None,
    };

    Ok(LoadedModel { mesh, texture })
}
