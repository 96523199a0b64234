use crate::shared::frame::Frame;

/// Destination for annotated frames, swappable while a session runs.
pub trait RenderSink: Send {
    fn render(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>>;
}
