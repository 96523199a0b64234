use crate::shared::detection::Detection;
use crate::shared::frame::Frame;

/// Domain interface for the inference collaborator.
///
/// Implementations may be stateful (e.g., internal buffers, trackers),
/// hence `&mut self`. The pipeline never inspects how detection happens;
/// it only consumes the ordered result set.
pub trait ObjectDetector: Send {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<Detection>, Box<dyn std::error::Error>>;
}
