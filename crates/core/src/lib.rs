//! Camera-to-overlay object detection runtime.
//!
//! A capture session pulls frames from a camera-style source and hands
//! each one to the frame gate, which decides whether to run the detector
//! or reuse the previous result set, draws the overlays, and maintains
//! the FPS readout. A thin control plane exposes the whole thing through
//! validated integer selectors and success booleans, the way an embedding
//! host calls it.

pub mod capture;
pub mod context;
pub mod control;
pub mod detection;
pub mod notify;
pub mod overlay;
pub mod pipeline;
pub mod shared;
