//! Stand-in detector used by the harness: reports one centered box per
//! frame so every pipeline stage downstream of inference can be driven
//! without real model weights.

use detcam_core::detection::domain::detector_factory::{DetectorFactory, ModelSpec};
use detcam_core::detection::domain::object_detector::ObjectDetector;
use detcam_core::shared::detection::{BoundingBox, Detection};
use detcam_core::shared::frame::Frame;

const SCORE: f32 = 0.9;

pub struct FixedBoxDetector;

impl ObjectDetector for FixedBoxDetector {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<Detection>, Box<dyn std::error::Error>> {
        let w = frame.width() as f32 / 2.0;
        let h = frame.height() as f32 / 2.0;
        Ok(vec![Detection::new(
            0,
            SCORE,
            BoundingBox::new(w / 2.0, h / 2.0, w, h),
        )])
    }
}

pub struct FixedBoxDetectorFactory;

impl DetectorFactory for FixedBoxDetectorFactory {
    fn load(
        &self,
        spec: &ModelSpec,
    ) -> Result<Box<dyn ObjectDetector>, Box<dyn std::error::Error>> {
        log::info!("using fixed-box detector in place of {}", spec.name);
        Ok(Box::new(FixedBoxDetector))
    }
}
