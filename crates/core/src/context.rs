//! Owner of the long-lived runtime pieces: the frame gate, the capture
//! session, the camera provider, and the score notifier.

use std::path::PathBuf;
use std::sync::Arc;

use crate::capture::domain::camera_provider::{CameraFacing, CameraProvider};
use crate::capture::domain::render_sink::RenderSink;
use crate::capture::infrastructure::capture_session::CaptureSession;
use crate::detection::domain::detector_factory::{Backend, DetectorFactory};
use crate::detection::domain::hardware_probe::HardwareProbe;
use crate::detection::domain::model::ModelKind;
use crate::notify::{ScoreCallback, ScoreNotifier};
use crate::pipeline::frame_gate::{FrameGate, GateConfig, GateError};
use crate::pipeline::sampling::SamplingRate;
use crate::shared::feature_flags::FeatureFlags;

/// One camera-plus-detector runtime.
///
/// Field order doubles as teardown order: the session joins its capture
/// thread (releasing its handle on the gate) before the gate itself and
/// the notifier go away.
pub struct CameraContext {
    session: Option<CaptureSession>,
    gate: Arc<FrameGate>,
    notifier: Option<ScoreNotifier>,
    provider: Box<dyn CameraProvider>,
    /// Sink handed over before the camera opens; attached on open.
    pending_sink: Option<Box<dyn RenderSink>>,
    assets: PathBuf,
}

impl CameraContext {
    pub fn new(
        factory: Box<dyn DetectorFactory>,
        probe: Box<dyn HardwareProbe>,
        provider: Box<dyn CameraProvider>,
        assets: PathBuf,
        callback: Option<ScoreCallback>,
    ) -> Self {
        let notifier = callback.map(ScoreNotifier::spawn);
        let score_tx = notifier.as_ref().and_then(|n| n.sender());
        Self {
            session: None,
            gate: Arc::new(FrameGate::new(factory, probe, score_tx)),
            notifier,
            provider,
            pending_sink: None,
            assets,
        }
    }

    /// Swap the detector configuration; safe while the camera runs.
    pub fn load_model(
        &self,
        model: ModelKind,
        backend: Backend,
        sampling: SamplingRate,
        flags: FeatureFlags,
    ) -> Result<(), GateError> {
        self.gate.configure(GateConfig {
            model,
            backend,
            sampling,
            flags,
            assets: self.assets.clone(),
        })
    }

    /// Open (or reopen) the camera. An already-running session is closed
    /// first; a sink set before opening is attached to the new session.
    pub fn open_camera(&mut self, facing: CameraFacing) -> Result<(), Box<dyn std::error::Error>> {
        self.close_camera();
        let source = self.provider.open(facing)?;
        let session = CaptureSession::open(source, self.gate.clone(), self.pending_sink.take());
        log::info!("camera opened (facing {:?})", facing);
        self.session = Some(session);
        Ok(())
    }

    /// Stop the capture loop and join its thread. Idempotent.
    pub fn close_camera(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.close();
            log::info!("camera closed");
        }
    }

    pub fn camera_open(&self) -> bool {
        self.session.as_ref().map(CaptureSession::is_open).unwrap_or(false)
    }

    /// Attach, replace, or detach the render output. Applies immediately
    /// to a running session, otherwise to the next one opened.
    pub fn set_output_window(&mut self, sink: Option<Box<dyn RenderSink>>) {
        match &self.session {
            Some(session) => session.set_output(sink),
            None => self.pending_sink = sink,
        }
    }

    /// Block until the current capture stream ends on its own.
    pub fn wait(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.wait();
        }
    }

    pub fn gate(&self) -> Arc<FrameGate> {
        self.gate.clone()
    }

    /// Full teardown: close the camera, release the detector, and let the
    /// notifier drain.
    pub fn shutdown(&mut self) {
        self.close_camera();
        self.gate.shutdown();
        if let Some(notifier) = self.notifier.as_mut() {
            notifier.shutdown();
        }
    }
}
