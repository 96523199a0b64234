use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};
use std::time::Instant;

use crossbeam_channel::Sender;
use thiserror::Error;

use crate::detection::domain::detector_factory::{Backend, DetectorFactory};
use crate::detection::domain::hardware_probe::HardwareProbe;
use crate::detection::domain::model::ModelKind;
use crate::detection::domain::object_detector::ObjectDetector;
use crate::overlay::OverlayRenderer;
use crate::pipeline::fps::FpsEstimator;
use crate::pipeline::sampling::SamplingRate;
use crate::shared::constants::DELEGATE_PLACEHOLDER_SCORE;
use crate::shared::detection::Detection;
use crate::shared::feature_flags::FeatureFlags;
use crate::shared::frame::Frame;

#[derive(Error, Debug)]
pub enum GateError {
    #[error("detector load failed for {model}: {reason}")]
    Load { model: &'static str, reason: String },
}

/// Typed, pre-validated configuration for one gate epoch.
#[derive(Clone, Debug)]
pub struct GateConfig {
    pub model: ModelKind,
    pub backend: Backend,
    pub sampling: SamplingRate,
    pub flags: FeatureFlags,
    /// Bundled asset directory handed to the detector factory.
    pub assets: PathBuf,
}

/// Externally visible detector slot state.
///
/// `HardwareUnavailable` is deliberately distinct from `Unconfigured`:
/// both render the placeholder, but the former records that a load was
/// attempted and dropped because the accelerated backend had no device.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DetectorStatus {
    Unconfigured,
    HardwareUnavailable,
    Ready,
}

enum DetectorSlot {
    Unconfigured,
    HardwareUnavailable,
    Ready(Box<dyn ObjectDetector>),
}

impl DetectorSlot {
    fn status(&self) -> DetectorStatus {
        match self {
            DetectorSlot::Unconfigured => DetectorStatus::Unconfigured,
            DetectorSlot::HardwareUnavailable => DetectorStatus::HardwareUnavailable,
            DetectorSlot::Ready(_) => DetectorStatus::Ready,
        }
    }
}

struct GateState {
    slot: DetectorSlot,
    detections: Vec<Detection>,
    counter: u32,
    rate: u32,
    flags: FeatureFlags,
}

/// Decides, per captured frame, whether to run the expensive detector or
/// reuse the previous result set, then draws overlays and maintains the
/// FPS readout.
///
/// Detector slot and result set live behind one lock because capture
/// callbacks run concurrently with reconfiguration from a control thread.
/// The FPS estimator sits behind its own lock so a slow detection pass
/// never delays the frame counter of other callers.
pub struct FrameGate {
    factory: Box<dyn DetectorFactory>,
    probe: Box<dyn HardwareProbe>,
    renderer: OverlayRenderer,
    score_tx: Option<Sender<i32>>,
    state: Mutex<GateState>,
    fps: Mutex<FpsEstimator>,
}

impl FrameGate {
    pub fn new(
        factory: Box<dyn DetectorFactory>,
        probe: Box<dyn HardwareProbe>,
        score_tx: Option<Sender<i32>>,
    ) -> Self {
        Self {
            factory,
            probe,
            renderer: OverlayRenderer,
            score_tx,
            state: Mutex::new(GateState {
                slot: DetectorSlot::Unconfigured,
                detections: Vec::new(),
                counter: 0,
                rate: SamplingRate::default().get(),
                flags: FeatureFlags::default(),
            }),
            fps: Mutex::new(FpsEstimator::new(Instant::now())),
        }
    }

    /// Replace the detector wholesale and reset the sampling epoch.
    ///
    /// Requesting the accelerated backend with no device present releases
    /// the detector entirely (the degrade-to-absent policy) and still
    /// reports success; callers observe it through [`FrameGate::status`].
    /// A factory load failure leaves all existing state untouched.
    pub fn configure(&self, config: GateConfig) -> Result<(), GateError> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);

        if config.backend.is_accelerated() && self.probe.device_count() == 0 {
            log::warn!(
                "accelerated backend requested for {} but no device present; detection disabled",
                config.model.name()
            );
            state.slot = DetectorSlot::HardwareUnavailable;
        } else {
            let spec = config.model.spec(&config.assets, config.backend);
            let detector = self
                .factory
                .load(&spec)
                .map_err(|e| GateError::Load {
                    model: config.model.name(),
                    reason: e.to_string(),
                })?;
            log::debug!(
                "loaded {} (input {}, backend {:?})",
                config.model.name(),
                config.model.target_size(),
                config.backend
            );
            state.slot = DetectorSlot::Ready(detector);
        }

        state.counter = 0;
        state.rate = config.sampling.get();
        state.flags = config.flags;
        Ok(())
    }

    /// Annotate one frame in place.
    ///
    /// Under the state lock: run detection on sampled frames, draw the
    /// (possibly stale) result set, or draw the placeholder when no
    /// detector is held. The FPS update and readout happen outside that
    /// lock.
    pub fn process_frame(&self, frame: &mut Frame) {
        {
            let mut fps = self.fps.lock().unwrap_or_else(PoisonError::into_inner);
            fps.update(Instant::now());
        }

        {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            let GateState {
                slot,
                detections,
                counter,
                rate,
                flags,
            } = &mut *state;

            match slot {
                DetectorSlot::Ready(detector) => {
                    if *counter % *rate == 0 {
                        *counter = 0;
                        match detector.detect(frame) {
                            Ok(objects) => {
                                *detections = objects;
                                if flags.delegate {
                                    if let Some(tx) = &self.score_tx {
                                        let _ = tx.send(DELEGATE_PLACEHOLDER_SCORE);
                                    }
                                }
                            }
                            // Terminal for this call: keep drawing the
                            // previous result set.
                            Err(e) => {
                                log::warn!("detection failed on frame {}: {e}", frame.index());
                            }
                        }
                    }

                    self.renderer.draw_detections(frame, detections, *flags);
                    *counter += 1;
                }
                DetectorSlot::Unconfigured | DetectorSlot::HardwareUnavailable => {
                    self.renderer.draw_placeholder(frame);
                }
            }
        }

        let fps = {
            let fps = self.fps.lock().unwrap_or_else(PoisonError::into_inner);
            fps.fps()
        };
        self.renderer.draw_fps(frame, fps);
    }

    /// Release the detector. Idempotent; the stale result set is left in
    /// place, matching the original teardown.
    pub fn shutdown(&self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if !matches!(state.slot, DetectorSlot::Unconfigured) {
            log::debug!("releasing detector");
        }
        state.slot = DetectorSlot::Unconfigured;
    }

    pub fn status(&self) -> DetectorStatus {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .slot
            .status()
    }

    /// Snapshot of the most recent detection result set.
    pub fn detections(&self) -> Vec<Detection> {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .detections
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use crate::detection::domain::detector_factory::ModelSpec;
    use crate::detection::domain::hardware_probe::StaticProbe;
    use crate::shared::detection::BoundingBox;

    struct FakeDetector {
        calls: Arc<AtomicUsize>,
        epoch: usize,
    }

    impl ObjectDetector for FakeDetector {
        fn detect(&mut self, _frame: &Frame) -> Result<Vec<Detection>, Box<dyn std::error::Error>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![Detection::new(
                self.epoch,
                0.9,
                BoundingBox::new(10.0, 10.0, 20.0, 20.0),
            )])
        }
    }

    struct FailingDetector;

    impl ObjectDetector for FailingDetector {
        fn detect(&mut self, _frame: &Frame) -> Result<Vec<Detection>, Box<dyn std::error::Error>> {
            Err("inference exploded".into())
        }
    }

    /// Factory that hands out call-counting detectors tagged with an epoch.
    struct FakeFactory {
        calls: Arc<AtomicUsize>,
        epoch: AtomicUsize,
        fail: bool,
    }

    impl FakeFactory {
        fn new(calls: Arc<AtomicUsize>) -> Self {
            Self {
                calls,
                epoch: AtomicUsize::new(0),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                calls: Arc::new(AtomicUsize::new(0)),
                epoch: AtomicUsize::new(0),
                fail: true,
            }
        }
    }

    impl DetectorFactory for FakeFactory {
        fn load(
            &self,
            _spec: &ModelSpec,
        ) -> Result<Box<dyn ObjectDetector>, Box<dyn std::error::Error>> {
            if self.fail {
                return Err("missing weights".into());
            }
            Ok(Box::new(FakeDetector {
                calls: self.calls.clone(),
                epoch: self.epoch.fetch_add(1, Ordering::SeqCst),
            }))
        }
    }

    fn frame(index: usize) -> Frame {
        Frame::filled(64, 48, 100, index)
    }

    fn config(sampling_input: i32) -> GateConfig {
        GateConfig {
            model: ModelKind::Tiny,
            backend: Backend::Cpu,
            sampling: SamplingRate::from_input(sampling_input).unwrap(),
            flags: FeatureFlags::overlay_only(),
            assets: Path::new("assets").to_path_buf(),
        }
    }

    fn gate_with_counter() -> (FrameGate, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let gate = FrameGate::new(
            Box::new(FakeFactory::new(calls.clone())),
            Box::new(StaticProbe(1)),
            None,
        );
        (gate, calls)
    }

    #[test]
    fn test_configure_makes_detector_ready() {
        let (gate, _) = gate_with_counter();
        assert_eq!(gate.status(), DetectorStatus::Unconfigured);
        gate.configure(config(0)).unwrap();
        assert_eq!(gate.status(), DetectorStatus::Ready);
    }

    #[test]
    fn test_gpu_without_hardware_drops_detector() {
        let calls = Arc::new(AtomicUsize::new(0));
        let gate = FrameGate::new(
            Box::new(FakeFactory::new(calls.clone())),
            Box::new(StaticProbe(0)),
            None,
        );
        gate.configure(config(0)).unwrap();
        assert_eq!(gate.status(), DetectorStatus::Ready);

        let mut gpu = config(0);
        gpu.backend = Backend::Gpu;
        // Degrade-to-absent still reports success
        gate.configure(gpu).unwrap();
        assert_eq!(gate.status(), DetectorStatus::HardwareUnavailable);

        // Frames now take the placeholder path; no detector runs
        let before = calls.load(Ordering::SeqCst);
        gate.process_frame(&mut frame(0));
        assert_eq!(calls.load(Ordering::SeqCst), before);
    }

    #[test]
    fn test_gpu_with_hardware_loads() {
        let calls = Arc::new(AtomicUsize::new(0));
        let gate = FrameGate::new(
            Box::new(FakeFactory::new(calls)),
            Box::new(StaticProbe(1)),
            None,
        );
        let mut gpu = config(0);
        gpu.backend = Backend::Gpu;
        gate.configure(gpu).unwrap();
        assert_eq!(gate.status(), DetectorStatus::Ready);
    }

    #[test]
    fn test_load_failure_leaves_state_untouched() {
        let gate = FrameGate::new(
            Box::new(FakeFactory::failing()),
            Box::new(StaticProbe(1)),
            None,
        );
        let err = gate.configure(config(0)).unwrap_err();
        assert!(matches!(err, GateError::Load { .. }));
        assert_eq!(gate.status(), DetectorStatus::Unconfigured);
    }

    #[test]
    fn test_no_detector_never_touches_result_set() {
        let (gate, calls) = gate_with_counter();
        let mut f = frame(0);
        let pristine = f.clone();
        gate.process_frame(&mut f);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(gate.detections().is_empty());
        // Placeholder overlay mutated the frame
        assert_ne!(f.data(), pristine.data());
    }

    #[test]
    fn test_rate_one_detects_every_frame() {
        let (gate, calls) = gate_with_counter();
        gate.configure(config(0)).unwrap();
        for i in 0..3 {
            gate.process_frame(&mut frame(i));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_rate_three_detects_first_of_each_cycle() {
        let (gate, calls) = gate_with_counter();
        gate.configure(config(2)).unwrap(); // rate = 3
        for i in 0..6 {
            gate.process_frame(&mut frame(i));
        }
        // indices 0 and 3 trigger detection
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_stale_results_reused_on_skipped_frames() {
        let (gate, _) = gate_with_counter();
        gate.configure(config(4)).unwrap(); // rate = 5
        gate.process_frame(&mut frame(0));
        let first = gate.detections();
        assert_eq!(first.len(), 1);

        for i in 1..5 {
            gate.process_frame(&mut frame(i));
            assert_eq!(gate.detections(), first);
        }
    }

    #[test]
    fn test_reconfigure_resets_sampling_epoch() {
        // The end-to-end cadence scenario: rate 1 detects on all three
        // frames, then rate 3 detects only on the first of the next three.
        let (gate, calls) = gate_with_counter();
        gate.configure(config(0)).unwrap();
        for i in 0..3 {
            gate.process_frame(&mut frame(i));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 3);

        gate.configure(config(2)).unwrap(); // rate = 3, counter reset
        for i in 3..6 {
            gate.process_frame(&mut frame(i));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn test_detection_error_keeps_previous_results() {
        struct FlakyFactory;
        impl DetectorFactory for FlakyFactory {
            fn load(
                &self,
                _spec: &ModelSpec,
            ) -> Result<Box<dyn ObjectDetector>, Box<dyn std::error::Error>> {
                Ok(Box::new(FailingDetector))
            }
        }
        let gate = FrameGate::new(Box::new(FlakyFactory), Box::new(StaticProbe(1)), None);
        gate.configure(config(0)).unwrap();
        gate.process_frame(&mut frame(0));
        assert!(gate.detections().is_empty());
        assert_eq!(gate.status(), DetectorStatus::Ready);
    }

    #[test]
    fn test_shutdown_is_idempotent() {
        let (gate, calls) = gate_with_counter();
        gate.configure(config(0)).unwrap();
        gate.shutdown();
        gate.shutdown();
        assert_eq!(gate.status(), DetectorStatus::Unconfigured);

        gate.process_frame(&mut frame(0));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_delegate_flag_emits_placeholder_score_per_detection() {
        let calls = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = crossbeam_channel::unbounded();
        let gate = FrameGate::new(
            Box::new(FakeFactory::new(calls)),
            Box::new(StaticProbe(1)),
            Some(tx),
        );
        let mut cfg = config(1); // rate = 2
        cfg.flags.delegate = true;
        gate.configure(cfg).unwrap();

        for i in 0..4 {
            gate.process_frame(&mut frame(i));
        }
        // Detection ran on frames 0 and 2; one score each
        let scores: Vec<i32> = rx.try_iter().collect();
        assert_eq!(scores, vec![DELEGATE_PLACEHOLDER_SCORE; 2]);
    }

    #[test]
    fn test_delegate_off_emits_nothing() {
        let calls = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = crossbeam_channel::unbounded();
        let gate = FrameGate::new(
            Box::new(FakeFactory::new(calls)),
            Box::new(StaticProbe(1)),
            Some(tx),
        );
        gate.configure(config(0)).unwrap();
        gate.process_frame(&mut frame(0));
        assert!(rx.try_iter().next().is_none());
    }

    #[test]
    fn test_concurrent_configure_and_process() {
        let calls = Arc::new(AtomicUsize::new(0));
        let gate = Arc::new(FrameGate::new(
            Box::new(FakeFactory::new(calls)),
            Box::new(StaticProbe(1)),
            None,
        ));
        gate.configure(config(0)).unwrap();

        let worker = {
            let gate = gate.clone();
            std::thread::spawn(move || {
                for i in 0..200 {
                    gate.process_frame(&mut frame(i));
                }
            })
        };

        for _ in 0..20 {
            gate.configure(config(0)).unwrap();
        }
        worker.join().unwrap();

        // After the last reconfiguration, the next detection must come
        // from the newest epoch: every result set observed from here on
        // carries the final factory epoch tag.
        gate.configure(config(0)).unwrap();
        gate.process_frame(&mut frame(0));
        let dets = gate.detections();
        assert_eq!(dets.len(), 1);
        assert_eq!(dets[0].class_id, 21); // epochs 0..=21 handed out
    }
}
