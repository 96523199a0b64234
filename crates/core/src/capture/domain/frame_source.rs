use crate::shared::frame::Frame;

/// Pull-based stream of captured frames.
///
/// `Ok(None)` marks the end of the stream; an error is terminal for the
/// source.
pub trait FrameSource: Send {
    fn next_frame(&mut self) -> Result<Option<Frame>, Box<dyn std::error::Error>>;
}
